use anyhow::Result;

/// Clipboard operations
pub struct Clipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl Clipboard {
    /// Wrap the system clipboard; degrades gracefully when none is
    /// available (headless hosts).
    pub fn new() -> Self {
        let clipboard = arboard::Clipboard::new().ok();
        Self { clipboard }
    }

    /// Copy text to the clipboard
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        match &mut self.clipboard {
            Some(cb) => {
                cb.set_text(text)?;
                Ok(())
            }
            None => anyhow::bail!("Clipboard not available"),
        }
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}
