//! Console session: registry, dispatcher, history, and autocomplete wired
//! into one interactive loop.
//!
//! The session is the composition root. It holds no algorithmic logic of
//! its own beyond sequencing: which cursor wins on submission, when typing
//! deactivates a cursor, and what closing discards.

use std::rc::Rc;

use prism_types::error::Result;

use crate::autocomplete::{AutocompleteIndex, AutocompleteState};
use crate::builtins;
use crate::command::CommandDescriptor;
use crate::config::ConsoleConfig;
use crate::dispatch::{ArgumentDispatcher, DispatchOutcome};
use crate::history::{HistoryBuffer, HistoryEntry, HistoryNavState, Validity};
use crate::registry::CommandRegistry;

/// State-change notification the host drains via `take_events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Opened,
    Closed,
}

/// What a submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A history recall was confirmed; the recalled text stays in the
    /// buffer for further editing. Nothing executed.
    RecallConfirmed,
    /// An autocomplete selection was accepted as plain text. Nothing
    /// executed.
    SuggestionAccepted,
    /// The buffer went to the dispatcher.
    Dispatched(DispatchOutcome),
    /// The session is closed; the submission was ignored.
    Ignored,
}

/// The interactive console session.
///
/// Single-threaded by design: registry and history are shared with command
/// callbacks through `Rc` handles, never across threads.
pub struct ConsoleSession {
    registry: Rc<CommandRegistry>,
    history: Rc<HistoryBuffer>,
    dispatcher: ArgumentDispatcher,
    index: AutocompleteIndex,
    open: bool,
    input: String,
    autocomplete: AutocompleteState,
    history_nav: HistoryNavState,
    events: Vec<SessionEvent>,
}

impl ConsoleSession {
    /// Build a closed session with the native commands registered.
    pub fn new() -> Result<Self> {
        Self::with_config(ConsoleConfig::default())
    }

    pub fn with_config(config: ConsoleConfig) -> Result<Self> {
        let registry = Rc::new(CommandRegistry::new());
        let history = Rc::new(HistoryBuffer::with_limit(config.history_limit));
        builtins::register_native_commands(&registry, &history)?;
        let dispatcher = ArgumentDispatcher::new(Rc::clone(&registry), Rc::clone(&history));
        let index = AutocompleteIndex::new(Rc::clone(&registry));
        let mut session = Self {
            registry,
            history,
            dispatcher,
            index,
            open: false,
            input: String::new(),
            autocomplete: AutocompleteState::new(),
            history_nav: HistoryNavState::new(),
            events: Vec::new(),
        };
        if config.open_on_start {
            session.toggle_open();
        }
        Ok(session)
    }

    // -- Accessors --

    pub fn registry(&self) -> &Rc<CommandRegistry> {
        &self.registry
    }

    pub fn history(&self) -> &Rc<HistoryBuffer> {
        &self.history
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history_cursor(&self) -> i32 {
        self.history_nav.cursor
    }

    pub fn autocomplete_selected(&self) -> i32 {
        self.autocomplete.selected()
    }

    // -- Registration passthrough --

    pub fn register_command(&self, descriptor: CommandDescriptor) -> Result<()> {
        self.registry.register(descriptor)
    }

    pub fn override_command(&self, descriptor: CommandDescriptor) -> Result<()> {
        self.registry.register_override(descriptor)
    }

    pub fn remove_command(&self, id: &str, arity: Option<usize>) -> Result<()> {
        self.registry.remove(id, arity)
    }

    // -- Session lifecycle --

    /// Toggle open/closed. Closing clears the input buffer and discards all
    /// transient navigation state, so reopening always starts from a live
    /// empty prompt.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
        if self.open {
            self.events.push(SessionEvent::Opened);
        } else {
            self.input.clear();
            self.history_nav.reset();
            self.autocomplete.reset();
            self.events.push(SessionEvent::Closed);
        }
    }

    /// Drain pending state-change events.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Append a host-injected log line. Only takes effect while the session
    /// is open; otherwise the line is dropped (best-effort, not a durable
    /// log).
    pub fn log_external(&self, text: &str, is_error: bool) {
        if !self.open {
            log::debug!("external line dropped while closed: {text}");
            return;
        }
        let validity = if is_error {
            Validity::Error
        } else {
            Validity::Neutral
        };
        self.history.append(HistoryEntry::new(text, validity, true));
    }

    // -- Input editing --

    /// Replace the input buffer.
    pub fn set_input(&mut self, text: &str) {
        if !self.open {
            return;
        }
        self.input.clear();
        self.input.push_str(text);
        self.sync_cursors_with_input();
    }

    pub fn insert_char(&mut self, ch: char) {
        if !self.open {
            return;
        }
        self.input.push(ch);
        self.sync_cursors_with_input();
    }

    pub fn backspace(&mut self) {
        if !self.open {
            return;
        }
        self.input.pop();
        self.sync_cursors_with_input();
    }

    /// Clear the input buffer and all navigation state.
    pub fn cancel_input(&mut self) {
        if !self.open {
            return;
        }
        self.input.clear();
        self.history_nav.reset();
        self.autocomplete.reset();
    }

    /// Enforce the cursor consistency invariant: a non-(-1) cursor always
    /// denotes an exact match between the buffer and the referenced text.
    fn sync_cursors_with_input(&mut self) {
        if self.history_nav.is_active() {
            let recalled = self.history.at_cursor(self.history_nav.cursor);
            if recalled.is_none_or(|e| e.text != self.input) {
                self.history_nav.reset();
            }
        }
        if self.autocomplete.is_active() {
            let still_exact = self
                .autocomplete
                .selected_descriptor()
                .is_some_and(|d| d.id == self.input);
            if !still_exact {
                self.autocomplete.reset();
            }
        }
    }

    // -- Submission --

    /// Submit the current input buffer.
    ///
    /// Priority order: an active history cursor is only confirmed (no
    /// execution); an active autocomplete selection is committed as plain
    /// text (no execution); otherwise the buffer is dispatched and the
    /// transient state cleared.
    pub fn submit(&mut self) -> Result<Submission> {
        if !self.open {
            return Ok(Submission::Ignored);
        }
        if self.history_nav.is_active() {
            self.history_nav.reset();
            return Ok(Submission::RecallConfirmed);
        }
        if self.autocomplete.is_active() {
            if let Some(text) = self.autocomplete.commit() {
                self.input = text;
            }
            return Ok(Submission::SuggestionAccepted);
        }
        let line = std::mem::take(&mut self.input);
        self.autocomplete.reset();
        self.history_nav.reset();
        let outcome = self.dispatcher.execute(&line)?;
        Ok(Submission::Dispatched(outcome))
    }

    /// Set the buffer to `raw` and submit, following the same cursor
    /// priority rules as `submit`.
    pub fn submit_line(&mut self, raw: &str) -> Result<Submission> {
        if !self.open {
            return Ok(Submission::Ignored);
        }
        self.set_input(raw);
        self.submit()
    }

    // -- Navigation --

    /// Step through past input lines (+1 = older, -1 = newer). Entering
    /// history navigation deactivates any autocomplete run; the buffer
    /// shows the recalled entry, or empties at `-1`.
    pub fn navigate_history(&mut self, step: i32) {
        if !self.open {
            return;
        }
        self.autocomplete.reset();
        self.history.rewind(&mut self.history_nav, step);
        self.input = match self.history.at_cursor(self.history_nav.cursor) {
            Some(entry) => entry.text,
            None => String::new(),
        };
    }

    /// Cycle autocomplete suggestions (+1 = next, -1 = previous). The first
    /// step computes candidates from the current buffer; an empty or
    /// whitespace-only buffer suppresses autocomplete. Entering
    /// autocomplete deactivates history navigation.
    pub fn navigate_autocomplete(&mut self, step: i32) {
        if !self.open {
            return;
        }
        self.history_nav.reset();
        if !self.autocomplete.has_candidates() {
            let candidates = self.index.compute(&self.input);
            if candidates.is_empty() {
                return;
            }
            self.autocomplete.begin(candidates, &self.input);
        }
        self.input = self.autocomplete.navigate(step);
    }

    /// Abandon autocomplete navigation and restore the pre-edit text.
    pub fn cancel_autocomplete(&mut self) {
        if !self.open {
            return;
        }
        if self.autocomplete.has_candidates() {
            self.input = self.autocomplete.cancel();
        }
    }

    // -- Suggestions for help display --

    /// Suggestion labels for `partial`, rendered `"id [Float] [Int]"`.
    pub fn suggestions(&self, partial: &str) -> Vec<String> {
        self.index
            .compute(partial)
            .iter()
            .map(|d| d.suggestion_label())
            .collect()
    }
}
