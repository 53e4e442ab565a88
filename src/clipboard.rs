// Clipboard access.
// System clipboard backed by arboard, plus an in-memory clipboard for tests.

use crate::error::{CheatsheetError, Result};

/// Plain-text clipboard write capability. Writes may fail (no display,
/// permission denied), and callers must not report success in that case.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// OS clipboard. The arboard handle is opened on first use and kept alive,
/// since some platforms drop clipboard contents when the owner goes away.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| CheatsheetError::Clipboard(format!("clipboard unavailable: {e}")))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| CheatsheetError::Clipboard("clipboard unavailable".to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.handle()?
            .set_text(text.to_owned())
            .map_err(|e| CheatsheetError::Clipboard(format!("failed to write to clipboard: {e}")))
    }
}

/// Clipboard that records writes in memory, or fails every write.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub writes: usize,
    pub fail_with: Option<String>,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(CheatsheetError::Clipboard(message.clone()));
        }
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}
