use log::{debug, warn};

use crate::document::Document;

/// Reference counted page scroll suppression.
///
/// Every open modal holds one reference. The page's prior scroll state is
/// captured by the first holder and restored only when the last holder
/// releases, so closing one of two stacked dialogs keeps the page locked.
#[derive(Debug, Default)]
pub struct ScrollLock {
    holders: usize,
    prior: Option<bool>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, document: &mut Document) {
        if self.holders == 0 {
            self.prior = Some(document.is_scroll_locked());
            document.set_scroll_locked(true);
            debug!("Page scroll locked");
        }
        self.holders += 1;
    }

    pub fn release(&mut self, document: &mut Document) {
        if self.holders == 0 {
            warn!("Scroll lock released more times than acquired");
            return;
        }
        self.holders -= 1;
        if self.holders == 0 {
            let prior = self.prior.take().unwrap_or(false);
            document.set_scroll_locked(prior);
            debug!("Page scroll restored (locked: {})", prior);
        }
    }

    pub fn holders(&self) -> usize {
        self.holders
    }
}
