use crate::error::ClipboardError;

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    #[cfg(windows)]
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        clipboard_win::set_clipboard_string(text).map_err(|e| ClipboardError(e.to_string()))
    }

    #[cfg(not(windows))]
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        cli_clipboard::set_contents(text.to_owned()).map_err(|e| ClipboardError(e.to_string()))
    }
}
