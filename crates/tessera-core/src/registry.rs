use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::window::WindowHandle;

/// One tracked manageable window.
///
/// The title is a snapshot taken at registration time and is never
/// refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEntry {
    pub handle: WindowHandle,
    pub title: String,
}

/// Authoritative mapping from window handle to tracked entry.
///
/// Not synchronized on its own: the desktop manager keeps it behind the
/// same lock as the move sessions.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<WindowHandle, WindowEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new entry unless the handle is already tracked.
    ///
    /// Returns the inserted entry, or `None` if the handle was present
    /// (the existing snapshot is left untouched).
    pub fn insert(&mut self, handle: WindowHandle, title: String) -> Option<&WindowEntry> {
        use std::collections::hash_map::Entry;

        match self.entries.entry(handle) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => Some(slot.insert(WindowEntry { handle, title })),
        }
    }

    /// Removes and returns the entry for `handle`, if tracked.
    pub fn remove(&mut self, handle: WindowHandle) -> Option<WindowEntry> {
        self.entries.remove(&handle)
    }

    pub fn get(&self, handle: WindowHandle) -> Option<&WindowEntry> {
        self.entries.get(&handle)
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy of every entry, ordered by handle.
    pub fn snapshot(&self) -> Vec<WindowEntry> {
        let mut entries: Vec<WindowEntry> = self.entries.values().cloned().collect();
        entries.sort_by_key(|e| e.handle);
        entries
    }
}
