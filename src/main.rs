#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::sync::Arc;

mod backend;
mod clipboard;
mod config;
mod controller;
mod error;
mod languages;
mod logger;
mod ui;
mod worker;

use backend::HttpBackend;
use controller::TranslationFormController;
use worker::Dispatcher;

fn main() {
    logger::init();
    log::info!("App starting");

    // Config: config.json next to the exe, env vars override when present.
    let mut cfg = config::Config::load();
    cfg.apply_env_overrides();
    log::info!(
        "Config loaded: endpoint {}, timeout {}s",
        cfg.endpoint,
        cfg.request_timeout_secs
    );

    let backend = match HttpBackend::new(&cfg) {
        Ok(b) => Arc::new(b),
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    let dispatcher = match Dispatcher::new(backend.clone()) {
        Ok(d) => d,
        Err(e) => {
            log::error!("Failed to start network runtime: {}", e);
            return;
        }
    };

    // Startup probe only informs the log; the form works (and reports) either way.
    dispatcher.handle().spawn(async move {
        match backend.health().await {
            Ok(h) => log::info!("Backend health: {} ({})", h.status, h.service),
            Err(e) => log::warn!("Backend health check failed: {}", e),
        }
    });

    let form = TranslationFormController::from_config(&cfg);

    // Run UI on main thread (blocks)
    ui::run_ui_main_thread(form, dispatcher);
}
