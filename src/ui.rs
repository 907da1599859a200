use crate::clipboard::SystemClipboard;
use crate::controller::{TranslationFormController, MAX_INPUT_CHARS};
use crate::languages::Language;
use crate::worker::Dispatcher;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::fs;
use std::time::Instant;

struct TranslatorApp {
    form: TranslationFormController,
    dispatcher: Dispatcher,
    clipboard: SystemClipboard,
}

fn install_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    // Chinese/Japanese/Korean targets need a CJK face or they render as squares.
    let candidates = [
        r"C:\Windows\Fonts\msyh.ttc",
        r"C:\Windows\Fonts\msyh.ttf",
        r"C:\Windows\Fonts\simsun.ttc",
        "/System/Library/Fonts/PingFang.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    ];
    match candidates.iter().find_map(|p| fs::read(p).ok().map(|b| (p, b))) {
        Some((path, bytes)) => {
            fonts.font_data.insert("cjk".to_owned(), egui::FontData::from_owned(bytes));
            for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                fonts.families.entry(family).or_default().push("cjk".to_owned());
            }
            log::info!("Loaded CJK font: {}", path);
        }
        None => log::info!("No CJK font found; some scripts may render as squares"),
    }
    ctx.set_fonts(fonts);
}

fn language_picker(ui: &mut egui::Ui, id: &str, label: &str, current: &mut Language) {
    ui.vertical(|ui| {
        ui.small(label);
        egui::ComboBox::from_id_source(id)
            .selected_text(current.name())
            .width(160.0)
            .show_ui(ui, |ui| {
                for lang in Language::ALL {
                    ui.selectable_value(current, lang, lang.name());
                }
            });
    });
}

impl TranslatorApp {
    fn submit(&mut self, ctx: &egui::Context) {
        if let Some(sub) = self.form.begin_submit() {
            log::info!(
                "Translating request #{} ({} chars, {} -> {})",
                sub.ticket,
                sub.request.text.chars().count(),
                sub.request.source_language,
                sub.request.target_language
            );
            let ctx = ctx.clone();
            self.dispatcher.dispatch(sub, move || ctx.request_repaint());
        }
    }

    fn input_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("ENTER TEXT TO TRANSLATE").small().strong());
        let mut text = self.form.input_text().to_owned();
        let edit = egui::TextEdit::multiline(&mut text)
            .hint_text("Type or paste your text here...")
            .desired_rows(5)
            .desired_width(f32::INFINITY)
            .char_limit(MAX_INPUT_CHARS);
        if ui.add(edit).changed() {
            self.form.set_text(&text);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("{}/{}", self.form.char_count(), MAX_INPUT_CHARS));
        });
    }

    fn language_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut source = self.form.source_language();
            language_picker(ui, "source_lang", "SOURCE", &mut source);
            if source != self.form.source_language() {
                self.form.set_source_language(source);
            }

            let swap = egui::Button::new(icons::ARROWS_LEFT_RIGHT);
            if ui.add_enabled(!self.form.is_loading(), swap).on_hover_text("Swap languages").clicked() {
                self.form.swap_languages();
            }

            let mut target = self.form.target_language();
            language_picker(ui, "target_lang", "TARGET", &mut target);
            if target != self.form.target_language() {
                self.form.set_target_language(target);
            }
        });
    }

    fn output_section(&mut self, ui: &mut egui::Ui, now: Instant) {
        if self.form.is_loading() {
            ui.label(egui::RichText::new("TRANSLATED TEXT").small().strong());
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak("Translating your text...");
            });
            return;
        }
        if self.form.translated_text().is_empty() {
            return;
        }

        ui.label(egui::RichText::new("TRANSLATED TEXT").small().strong());
        egui::ScrollArea::vertical().max_height(240.0).auto_shrink([false, true]).show(ui, |ui| {
            ui.add(egui::Label::new(egui::RichText::new(self.form.translated_text()).size(17.0)).wrap(true));
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(format!("{} Clear", icons::TRASH)).clicked() {
                self.form.clear();
            }
            let copy_label = if self.form.is_copy_confirmed(now) { "Copied!" } else { "Copy" };
            if ui.button(format!("{} {}", icons::COPY, copy_label)).clicked() {
                let _ = self.form.copy_result(&self.clipboard, now);
            }
        });
    }
}

impl eframe::App for TranslatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for outcome in self.dispatcher.drain() {
            self.form.finish_submit(outcome.ticket, outcome.result);
        }
        let now = Instant::now();
        self.form.tick(now);

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| ui.weak("Powered by AI · TransLingua"));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(format!("{} TransLingua", icons::GLOBE));
                ui.weak("Translate text seamlessly using AI");
            });
            ui.add_space(12.0);

            self.input_section(ui);
            ui.add_space(8.0);
            self.language_row(ui);
            ui.add_space(8.0);

            let label = if self.form.is_loading() { "Translating..." } else { "Translate" };
            let button = egui::Button::new(egui::RichText::new(label).size(18.0))
                .min_size(egui::vec2(ui.available_width(), 36.0));
            if ui.add_enabled(self.form.can_submit(), button).clicked() {
                self.submit(ctx);
            }
            ui.add_space(8.0);

            self.output_section(ui, now);
        });

        // Wake up to flip "Copied!" back even without input events
        if let Some(left) = self.form.copy_confirm_remaining(Instant::now()) {
            ctx.request_repaint_after(left);
        }
    }
}

// Run the UI event loop on the main thread (blocking)
pub fn run_ui_main_thread(form: TranslationFormController, dispatcher: Dispatcher) {
    log::info!("Main UI: starting event loop");
    let app = TranslatorApp { form, dispatcher, clipboard: SystemClipboard };
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TransLingua")
            .with_inner_size([760.0, 640.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    match eframe::run_native(
        "TransLingua",
        native_options,
        Box::new(|cc| {
            install_fonts(&cc.egui_ctx);
            Box::new(app)
        }),
    ) {
        Ok(_) => log::info!("Main UI: event loop exited"),
        Err(e) => log::error!("Main UI error: {}", e),
    }
}
