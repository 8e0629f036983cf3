//! History buffer and its navigation state machine.

use std::cell::RefCell;

/// Classification of a history line's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// A command matched, every argument parsed, and the callback ran.
    Valid,
    /// Unknown command or argument parse failure; nothing was invoked.
    Invalid,
    /// Plain informational line.
    Neutral,
    /// Error line injected by the host.
    Error,
}

/// One line of console history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub text: String,
    pub validity: Validity,
    /// Display lines this entry occupies (for layout budgeting).
    pub line_count: usize,
    /// Injected via the logging side-channel rather than typed.
    pub is_external: bool,
}

impl HistoryEntry {
    pub fn new(text: impl Into<String>, validity: Validity, is_external: bool) -> Self {
        let text = text.into();
        let line_count = text.lines().count().max(1);
        Self {
            text,
            validity,
            line_count,
            is_external,
        }
    }
}

/// History navigation cursor.
///
/// `-1` means "not navigating, live edit"; cursor `0` refers to the most
/// recent entry, increasing toward older entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryNavState {
    pub cursor: i32,
}

impl HistoryNavState {
    pub fn new() -> Self {
        Self { cursor: -1 }
    }

    pub fn reset(&mut self) {
        self.cursor = -1;
    }

    pub fn is_active(&self) -> bool {
        self.cursor != -1
    }
}

impl Default for HistoryNavState {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only log of past input lines and injected log lines.
///
/// Entries are never mutated; the only removals are the native `clear`
/// command and the optional capacity bound.
pub struct HistoryBuffer {
    entries: RefCell<Vec<HistoryEntry>>,
    /// Optional capacity bound; oldest entries dropped first. `None` keeps
    /// every entry.
    limit: Option<usize>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            limit,
        }
    }

    /// Append an entry. Navigation cursors are not reset here; callers do
    /// that explicitly after a submission.
    pub fn append(&self, entry: HistoryEntry) {
        let mut entries = self.entries.borrow_mut();
        entries.push(entry);
        if let Some(limit) = self.limit
            && entries.len() > limit
        {
            entries.remove(0);
        }
    }

    /// Drop every entry (the native `clear` command).
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Entry at chronological position `index` (0 = oldest).
    pub fn get(&self, index: usize) -> Option<HistoryEntry> {
        self.entries.borrow().get(index).cloned()
    }

    /// Entry referenced by a navigation cursor (0 = most recent), or `None`
    /// for `-1` and out-of-range cursors.
    pub fn at_cursor(&self, cursor: i32) -> Option<HistoryEntry> {
        if cursor < 0 {
            return None;
        }
        let entries = self.entries.borrow();
        let index = entries.len() as i32 - 1 - cursor;
        if index < 0 {
            return None;
        }
        entries.get(index as usize).cloned()
    }

    /// Snapshot of all entries in chronological order (for rendering).
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.borrow().clone()
    }

    /// Move the navigation cursor by `step` (+1 toward older, -1 toward
    /// newer), skipping external log lines.
    ///
    /// External lines are informational and never recalled as editable
    /// input, but the cursor must never stick on one or loop. The skip
    /// aborts, leaving the cursor at its pre-call value, in two cases: the
    /// clamp pinned the candidate on an external entry at the oldest
    /// boundary, or moving toward newer would land exactly on the most
    /// recent entry and that entry is itself external.
    ///
    /// Returns the new cursor. The caller owns the input buffer and sets it
    /// to the entry text at the new cursor, or empty at `-1`.
    pub fn rewind(&self, state: &mut HistoryNavState, step: i32) -> i32 {
        let len = self.len() as i32;
        let prev = state.cursor;
        let step = step.signum();
        if step == 0 {
            return prev;
        }
        let mut candidate = (prev + step).clamp(-1, len - 1);
        while let Some(entry) = self.at_cursor(candidate) {
            if !entry.is_external {
                break;
            }
            let next = (candidate + step).clamp(-1, len - 1);
            if next == candidate {
                // Pinned at the oldest boundary on an external entry.
                candidate = prev;
                break;
            }
            if step == -1 && next == 0 && self.at_cursor(0).is_some_and(|e| e.is_external) {
                // Would land on the most recent entry and it is external.
                candidate = prev;
                break;
            }
            candidate = next;
        }
        state.cursor = candidate;
        candidate
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
