//! User-visible page messages returned by services.

/// Errors and notices to show on the next rendered page.
///
/// Services return these instead of queuing them globally; the web layer
/// decides how to display them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMessages {
    pub errors: Vec<String>,
    pub notices: Vec<String>,
}

impl PageMessages {
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn notice(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.notices.is_empty()
    }
}
