//! Prefix/acronym autocomplete over the command registry.

use std::rc::Rc;

use crate::command::CommandDescriptor;
use crate::registry::CommandRegistry;

/// Transient autocomplete navigation state.
///
/// A navigation run starts with `begin`, cycles with `navigate`, and ends
/// with `cancel`, `commit`, or `reset`. `selected == -1` means "no
/// selection, show the raw buffer".
pub struct AutocompleteState {
    candidates: Vec<Rc<CommandDescriptor>>,
    selected: i32,
    pre_edit: String,
}

impl AutocompleteState {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            selected: -1,
            pre_edit: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.selected != -1
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn selected(&self) -> i32 {
        self.selected
    }

    pub fn selected_descriptor(&self) -> Option<&Rc<CommandDescriptor>> {
        usize::try_from(self.selected)
            .ok()
            .and_then(|i| self.candidates.get(i))
    }

    pub fn pre_edit(&self) -> &str {
        &self.pre_edit
    }

    pub fn candidates(&self) -> &[Rc<CommandDescriptor>] {
        &self.candidates
    }

    /// Start a navigation run over `candidates`, remembering the text typed
    /// so far for later restore.
    pub fn begin(&mut self, candidates: Vec<Rc<CommandDescriptor>>, pre_edit: &str) {
        self.candidates = candidates;
        self.selected = -1;
        self.pre_edit = pre_edit.to_string();
    }

    /// Cycle the selection. The cycle has `len + 1` positions: `-1` (raw
    /// buffer) plus every candidate, wrapping in both directions through
    /// `-1`.
    ///
    /// Returns the text the live buffer should show: the selected id, or
    /// the pre-edit text at `-1`.
    pub fn navigate(&mut self, step: i32) -> String {
        let len = self.candidates.len() as i32;
        if len == 0 {
            return self.pre_edit.clone();
        }
        let span = len + 1;
        let pos = (self.selected + 1 + step.signum()).rem_euclid(span);
        self.selected = pos - 1;
        match self.selected_descriptor() {
            Some(d) => d.id.clone(),
            None => self.pre_edit.clone(),
        }
    }

    /// Abandon the run. Returns the restored pre-edit text.
    pub fn cancel(&mut self) -> String {
        self.selected = -1;
        self.candidates.clear();
        std::mem::take(&mut self.pre_edit)
    }

    /// Accept the current selection as plain text for further editing (not
    /// execution). The selected id becomes the new pre-edit text and the
    /// run ends. Returns `None` when nothing is selected.
    pub fn commit(&mut self) -> Option<String> {
        let committed = self.selected_descriptor().map(|d| d.id.clone())?;
        self.pre_edit = committed.clone();
        self.selected = -1;
        self.candidates.clear();
        Some(committed)
    }

    /// Drop all transient state without touching the live buffer.
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.selected = -1;
        self.pre_edit.clear();
    }
}

impl Default for AutocompleteState {
    fn default() -> Self {
        Self::new()
    }
}

/// Suggestion lookup over a shared registry.
pub struct AutocompleteIndex {
    registry: Rc<CommandRegistry>,
}

impl AutocompleteIndex {
    pub fn new(registry: Rc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Every descriptor whose id starts with `partial`, or whose
    /// capitalized-letters acronym starts with `partial`, compared
    /// case-insensitively. One OR'd check, so a descriptor matching both
    /// rules is listed once. Order is registration order, not sorted.
    ///
    /// Empty or whitespace-only `partial` suppresses autocomplete entirely.
    pub fn compute(&self, partial: &str) -> Vec<Rc<CommandDescriptor>> {
        if partial.trim().is_empty() {
            return Vec::new();
        }
        let needle = partial.to_lowercase();
        self.registry
            .all()
            .into_iter()
            .filter(|d| {
                d.id.to_lowercase().starts_with(&needle)
                    || d.acronym().to_lowercase().starts_with(&needle)
            })
            .collect()
    }
}
