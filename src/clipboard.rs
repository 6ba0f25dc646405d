use arboard::Clipboard;

use crate::error::{ClipError, Result};

/// Destination for copied clip content.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard through arboard.
pub struct ArboardClipboard {
    clipboard: Clipboard,
}

impl ArboardClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().map_err(|e| ClipError::Clipboard(e.to_string()))?;
        Ok(Self { clipboard })
    }
}

#[cfg(target_os = "linux")]
const LINUX_HANDOFF_MS: u64 = 1500;

impl ClipboardWriter for ArboardClipboard {
    #[cfg(target_os = "linux")]
    fn write_text(&mut self, text: &str) -> Result<()> {
        use arboard::SetExtLinux;
        use std::time::{Duration, Instant};

        // X11/Wayland selections die with the owning process; hold on briefly
        // so a clipboard manager can take over before we exit.
        let deadline = Instant::now() + Duration::from_millis(LINUX_HANDOFF_MS);
        self.clipboard
            .set()
            .wait_until(deadline)
            .text(text.to_owned())
            .map_err(|e| ClipError::Clipboard(e.to_string()))
    }

    #[cfg(not(target_os = "linux"))]
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipError::Clipboard(e.to_string()))
    }
}

/// Used when clipboard access is turned off; every write fails.
pub struct DisabledClipboard;

impl ClipboardWriter for DisabledClipboard {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(ClipError::Clipboard("clipboard access is disabled".into()))
    }
}

/// Remembers what was written. Handy for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Picks the system clipboard unless `enabled` is false. Opening the system
/// clipboard can fail in headless sessions; that is reported, not fatal.
pub fn open(enabled: bool) -> Box<dyn ClipboardWriter> {
    if !enabled {
        return Box::new(DisabledClipboard);
    }
    match ArboardClipboard::new() {
        Ok(cb) => Box::new(cb),
        Err(err) => Box::new(Unavailable(err.to_string())),
    }
}

struct Unavailable(String);

impl ClipboardWriter for Unavailable {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(ClipError::Clipboard(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_clipboard_reports_clipboard_error() {
        let err = DisabledClipboard.write_text("x").unwrap_err();
        assert!(matches!(err, ClipError::Clipboard(_)));
    }

    #[test]
    fn memory_clipboard_keeps_last_write() {
        let mut cb = MemoryClipboard::default();
        cb.write_text("one").unwrap();
        cb.write_text("two").unwrap();
        assert_eq!(cb.contents.as_deref(), Some("two"));
    }

    #[test]
    fn open_disabled_never_touches_the_system() {
        let mut cb = open(false);
        assert!(cb.write_text("x").is_err());
    }
}
