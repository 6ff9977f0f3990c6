//! History capability
//!
//! The router never talks to a browser directly. Anything that can report
//! the current location, record entries and traverse them can back it:
//! `window.history` in the WASM crate, [`MemoryHistory`] everywhere else.

/// Handle returned by [`History::listen`]
pub type ListenerId = u64;

/// Callback receiving the full location after a traversal
pub type HistoryListener = Box<dyn FnMut(&str)>;

/// Location source and history stack
///
/// Locations are full URLs relative to the origin, base included:
/// `pathname + search + hash`.
pub trait History {
    /// Current location
    fn location(&self) -> String;

    /// Record a new entry and make it current. Does not notify listeners.
    fn push(&mut self, url: &str);

    /// Overwrite the current entry. Does not notify listeners.
    fn replace(&mut self, url: &str);

    /// Move `delta` entries through the stack. Listeners are notified once
    /// the new location is current; out-of-range moves are ignored.
    fn go(&mut self, delta: i32);

    fn back(&mut self) {
        self.go(-1);
    }

    fn forward(&mut self) {
        self.go(1);
    }

    /// Register a traversal listener
    fn listen(&mut self, listener: HistoryListener) -> ListenerId;

    /// Remove a traversal listener. Unknown ids are ignored.
    fn unlisten(&mut self, id: ListenerId);
}

/// In-memory history stack
///
/// Behaves like the browser's session history: pushing truncates the
/// forward entries, and traversal is synchronous.
///
/// # Example
/// ```
/// use waypoint_router::{History, MemoryHistory};
///
/// let mut history = MemoryHistory::new("/");
/// history.push("/tasks");
/// history.back();
/// assert_eq!(history.location(), "/");
/// history.forward();
/// assert_eq!(history.location(), "/tasks");
/// ```
pub struct MemoryHistory {
    entries: Vec<String>,
    position: usize,
    listeners: Vec<(ListenerId, HistoryListener)>,
    next_listener: ListenerId,
}

impl MemoryHistory {
    /// Create a history whose only entry is `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            position: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Index of the current entry
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("entries", &self.entries)
            .field("position", &self.position)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.position].clone()
    }

    fn push(&mut self, url: &str) {
        self.entries.truncate(self.position + 1);
        self.entries.push(url.to_string());
        self.position = self.entries.len() - 1;
    }

    fn replace(&mut self, url: &str) {
        self.entries[self.position] = url.to_string();
    }

    fn go(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        let target = self.position as i64 + i64::from(delta);
        if target < 0 || target >= self.entries.len() as i64 {
            return;
        }
        self.position = target as usize;

        let location = self.entries[self.position].clone();
        for (_, listener) in &mut self.listeners {
            listener(&location);
        }
    }

    fn listen(&mut self, listener: HistoryListener) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}
