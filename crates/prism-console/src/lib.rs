//! Embedded developer console for the PRISM host application.
//!
//! The console is a registry-based dispatch system. Operations register a
//! `CommandDescriptor` (identifier, typed signature, callback); the
//! dispatcher resolves raw input lines by identifier, arity, and per-token
//! type parses; every outcome lands in a scrolling history the operator can
//! navigate. `ConsoleSession` ties registry, dispatcher, history, and
//! autocomplete into one interactive loop.

pub mod autocomplete;
mod builtins;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod history;
pub mod registry;
pub mod session;

/// Suggestion lookup and navigation state.
pub use autocomplete::{AutocompleteIndex, AutocompleteState};
/// Identity of one registrable console operation.
pub use command::{ArgValue, CommandCallback, CommandDescriptor, CommandSignature, TypeTag};
/// Console configuration loaded from TOML.
pub use config::ConsoleConfig;
/// Outcome classification for one dispatched line.
pub use dispatch::{ArgumentDispatcher, DispatchOutcome};
/// History log and navigation state machine.
pub use history::{HistoryBuffer, HistoryEntry, HistoryNavState, Validity};
/// Registry of live command descriptors.
pub use registry::CommandRegistry;
/// The interactive console session.
pub use session::{ConsoleSession, SessionEvent, Submission};
