use std::rc::{Rc, Weak};

/// An identity-keyed, weakly-held set of editor surfaces.
///
/// Membership means "currently has this controller's key-up listener
/// attached". Surfaces are compared by pointer, never by contents, and the
/// set takes no strong ownership: a surface dropped by the host simply
/// disappears on the next prune.
#[derive(Debug)]
pub struct ObservedEditors<S> {
    entries: Vec<Weak<S>>,
}

impl<S> ObservedEditors<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether the surface is tracked.
    pub fn contains(&self, surface: &Rc<S>) -> bool {
        self.entries
            .iter()
            .any(|w| w.as_ptr() == Rc::as_ptr(surface))
    }

    /// Track a surface. Returns false if it was already tracked.
    pub fn insert(&mut self, surface: &Rc<S>) -> bool {
        if self.contains(surface) {
            return false;
        }
        self.entries.push(Rc::downgrade(surface));
        true
    }

    /// Stop tracking a surface. Returns false if it was not tracked.
    pub fn remove(&mut self, surface: &Rc<S>) -> bool {
        let before = self.entries.len();
        self.entries.retain(|w| w.as_ptr() != Rc::as_ptr(surface));
        self.entries.len() != before
    }

    /// Drop entries whose surfaces the host has discarded.
    pub fn prune(&mut self) {
        self.entries.retain(|w| w.strong_count() > 0);
    }

    /// Drain all live surfaces, emptying the set.
    pub fn drain(&mut self) -> Vec<Rc<S>> {
        self.entries
            .drain(..)
            .filter_map(|w| w.upgrade())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Default for ObservedEditors<S> {
    fn default() -> Self {
        Self::new()
    }
}
