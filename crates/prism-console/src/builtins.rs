//! Native console-intrinsic commands.
//!
//! These are registered at session construction with the `native` flag, so
//! host code can neither remove nor override them.

use std::rc::Rc;

use prism_types::error::Result;

use crate::command::{ArgValue, CommandDescriptor, CommandSignature, TypeTag};
use crate::history::{HistoryBuffer, HistoryEntry, Validity};
use crate::registry::CommandRegistry;

/// Register the console's own commands: `h`/`help` listings and `clear`.
pub fn register_native_commands(
    registry: &Rc<CommandRegistry>,
    history: &Rc<HistoryBuffer>,
) -> Result<()> {
    let reg = Rc::clone(registry);
    let hist = Rc::clone(history);
    registry.register(
        CommandDescriptor::new(
            "h",
            "List available commands",
            CommandSignature::Nullary,
            move |_| {
                list_commands(&reg, &hist);
                Ok(())
            },
        )
        .native(),
    )?;

    let reg = Rc::clone(registry);
    let hist = Rc::clone(history);
    registry.register(
        CommandDescriptor::new(
            "help",
            "List available commands",
            CommandSignature::Nullary,
            move |_| {
                list_commands(&reg, &hist);
                Ok(())
            },
        )
        .native(),
    )?;

    let reg = Rc::clone(registry);
    let hist = Rc::clone(history);
    registry.register(
        CommandDescriptor::new(
            "help",
            "Describe one command",
            CommandSignature::Unary(TypeTag::Str),
            move |args| {
                describe_command(&reg, &hist, args);
                Ok(())
            },
        )
        .native(),
    )?;

    let hist = Rc::clone(history);
    registry.register(
        CommandDescriptor::new(
            "clear",
            "Clear console history",
            CommandSignature::Nullary,
            move |_| {
                hist.clear();
                Ok(())
            },
        )
        .native()
        .hidden(),
    )?;

    Ok(())
}

/// Append one Neutral line per registered command, in registration order.
fn list_commands(registry: &CommandRegistry, history: &HistoryBuffer) {
    for descriptor in registry.all() {
        let line = format!(
            "{} - {}",
            descriptor.suggestion_label(),
            descriptor.description
        );
        history.append(HistoryEntry::new(line, Validity::Neutral, true));
    }
}

/// Append detail lines for every overload of one id, or an error line when
/// the id is unknown.
fn describe_command(registry: &CommandRegistry, history: &HistoryBuffer, args: &[ArgValue]) {
    let Some(ArgValue::Str(name)) = args.first() else {
        return;
    };
    let matches: Vec<_> = registry
        .all()
        .into_iter()
        .filter(|d| d.id == *name)
        .collect();
    if matches.is_empty() {
        history.append(HistoryEntry::new(
            format!("no such command: {name}"),
            Validity::Error,
            true,
        ));
        return;
    }
    for descriptor in matches {
        let line = format!(
            "{} - {}",
            descriptor.suggestion_label(),
            descriptor.description
        );
        history.append(HistoryEntry::new(line, Validity::Neutral, true));
    }
}
