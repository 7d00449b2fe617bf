//! Focus containment for one open dialog
//!
//! The trap never caches the dialog's focusable elements: every call receives
//! the list freshly computed from the current view tree, in document order.
//! It only intervenes at the boundaries (Tab on the last element, Shift+Tab on
//! the first); everything in between is left to the host's native order.

use log::{debug, trace};

use crate::document::FocusKey;

/// Focus state the trap reads and writes.
pub trait FocusHost {
    /// Element currently holding focus
    fn active_element(&self) -> Option<FocusKey>;

    /// Move focus to `key`
    fn focus(&mut self, key: &FocusKey);

    /// Whether `key` is still attached and can take focus
    fn is_focusable(&self, key: &FocusKey) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Forward,
    Backward,
}

#[derive(Debug)]
pub struct FocusTrap {
    /// Focus owner before activation; only read back on deactivation
    restore_target: Option<FocusKey>,
    settled: bool,
}

impl FocusTrap {
    /// Capture the element focused right now. Initial focus is applied later
    /// by [`FocusTrap::settle`], once the view has finished mounting.
    pub fn activate<H: FocusHost + ?Sized>(host: &H) -> Self {
        let restore_target = host.active_element();
        debug!("Focus trap activated, restore target: {:?}", restore_target);
        Self {
            restore_target,
            settled: false,
        }
    }

    pub fn restore_target(&self) -> Option<&FocusKey> {
        self.restore_target.as_ref()
    }

    /// Move focus to the first focusable element. Runs once; returns whether
    /// focus moved. With nothing focusable, focus is left alone.
    pub fn settle<H: FocusHost + ?Sized>(&mut self, focusables: &[FocusKey], host: &mut H) -> bool {
        if self.settled {
            return false;
        }
        self.settled = true;

        match focusables.first() {
            Some(first) => {
                host.focus(first);
                true
            }
            None => {
                debug!("Focus trap has no focusable elements, leaving focus unchanged");
                false
            }
        }
    }

    /// Wrap Tab/Shift+Tab at the dialog boundaries.
    ///
    /// Returns true when focus was redirected; false means the host should
    /// apply its native navigation.
    pub fn handle_tab<H: FocusHost + ?Sized>(
        &self,
        direction: TabDirection,
        focusables: &[FocusKey],
        host: &mut H,
    ) -> bool {
        let (Some(first), Some(last)) = (focusables.first(), focusables.last()) else {
            return false;
        };
        let active = host.active_element();

        let target = match direction {
            TabDirection::Forward if active.as_ref() == Some(last) => first,
            TabDirection::Backward if active.as_ref() == Some(first) => last,
            _ => return false,
        };

        trace!("Focus trap wrapping {:?} to {:?}", direction, target.id);
        host.focus(target);
        true
    }

    /// Retire this trap without touching focus, passing its restore target to
    /// the trap of a dialog stacked above it.
    pub fn hand_over(self, above: &mut FocusTrap) {
        debug!(
            "Focus trap handing restore target {:?} to the dialog above",
            self.restore_target
        );
        above.restore_target = self.restore_target;
    }

    /// Give focus back to the element focused before activation, if it can
    /// still take focus. Returns whether focus was restored.
    pub fn deactivate<H: FocusHost + ?Sized>(self, host: &mut H) -> bool {
        match self.restore_target {
            Some(target) if host.is_focusable(&target) => {
                debug!("Focus trap restoring focus to {:?}", target.id);
                host.focus(&target);
                true
            }
            Some(target) => {
                debug!("Restore target {:?} is gone, leaving focus to the host", target.id);
                false
            }
            None => false,
        }
    }
}
