//! Argument dispatch: tokenization, overload resolution, typed invocation.

use std::rc::Rc;

use prism_types::error::Result;

use crate::history::{HistoryBuffer, HistoryEntry, Validity};
use crate::registry::CommandRegistry;

/// Outcome of dispatching one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The line was empty after trimming; nothing was recorded.
    NoOp,
    /// No registered command matches the identifier and arity.
    Unmatched,
    /// A command matched; `Valid` means every argument parsed and the
    /// callback ran.
    Matched { id: String, validity: Validity },
}

/// Resolves raw input lines against the registry and records outcomes in
/// history.
pub struct ArgumentDispatcher {
    registry: Rc<CommandRegistry>,
    history: Rc<HistoryBuffer>,
}

impl ArgumentDispatcher {
    pub fn new(registry: Rc<CommandRegistry>, history: Rc<HistoryBuffer>) -> Self {
        Self { registry, history }
    }

    /// Tokenize `raw`, resolve the overload set, attempt typed parses, and
    /// invoke the first fully-parsing descriptor's callback.
    ///
    /// Overload resolution is first-match-wins: the scan stops at the first
    /// descriptor whose every parameter parses. When none parses, the last
    /// descriptor of the set is recorded as the matched one with `Invalid`
    /// validity and nothing is invoked.
    ///
    /// History receives the normalized line (whitespace runs collapsed to
    /// single spaces) unless the matched descriptor opts out via
    /// `show_in_history`. The entry for a valid invocation is appended
    /// before the callback runs, so lines the callback itself appends read
    /// after the command line; a callback error then propagates to the
    /// caller.
    pub fn execute(&self, raw: &str) -> Result<DispatchOutcome> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let Some((&id, arg_tokens)) = tokens.split_first() else {
            return Ok(DispatchOutcome::NoOp);
        };
        let line = tokens.join(" ");

        // Snapshot: callbacks may re-enter the registry while we iterate.
        let overloads = self.registry.overloads(id, arg_tokens.len());
        if overloads.is_empty() {
            log::debug!("unmatched input: {line}");
            self.history
                .append(HistoryEntry::new(line, Validity::Invalid, false));
            return Ok(DispatchOutcome::Unmatched);
        }

        let first_match = overloads
            .iter()
            .find_map(|d| d.signature.parse_args(arg_tokens).map(|args| (d, args)));

        match first_match {
            Some((descriptor, args)) => {
                if descriptor.show_in_history {
                    self.history
                        .append(HistoryEntry::new(line, Validity::Valid, false));
                }
                descriptor.invoke(&args)?;
                Ok(DispatchOutcome::Matched {
                    id: descriptor.id.clone(),
                    validity: Validity::Valid,
                })
            },
            None => {
                let last = &overloads[overloads.len() - 1];
                if last.show_in_history {
                    self.history
                        .append(HistoryEntry::new(line, Validity::Invalid, false));
                }
                Ok(DispatchOutcome::Matched {
                    id: last.id.clone(),
                    validity: Validity::Invalid,
                })
            },
        }
    }
}
