//! PRISM console demonstration host.
//!
//! Drives a `ConsoleSession` from stdin with a small text protocol standing
//! in for the host's key mapping:
//!
//! - `:open` / `:close` — toggle the console
//! - `:up` / `:down`    — history navigation (older / newer)
//! - `:next` / `:prev`  — cycle autocomplete suggestions
//! - `:esc`             — cancel autocomplete
//! - `:enter`           — submit the current buffer
//! - `:suggest <text>`  — print suggestion labels for a partial id
//! - `:quit`            — exit
//!
//! Every other line is submitted as console input. Configuration is read
//! from `prism.toml` in the working directory when present.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use prism_console::{
    ArgValue, CommandDescriptor, CommandSignature, ConsoleConfig, ConsoleSession, TypeTag,
    Validity,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let mut session = ConsoleSession::with_config(config)?;
    register_demo_commands(&session)?;

    if !session.is_open() {
        session.toggle_open();
    }
    for event in session.take_events() {
        log::info!("session event: {event:?}");
    }
    session.log_external("PRISM console ready. Type 'help' for commands.", false);

    let stdin = io::stdin();
    let mut printed = 0usize;
    render_new_entries(&session, &mut printed);
    render_prompt(&session)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            ":quit" => break,
            ":open" | ":close" => session.toggle_open(),
            ":up" => session.navigate_history(1),
            ":down" => session.navigate_history(-1),
            ":next" => session.navigate_autocomplete(1),
            ":prev" => session.navigate_autocomplete(-1),
            ":esc" => session.cancel_autocomplete(),
            ":enter" => {
                session.submit()?;
            },
            other if other.starts_with(":suggest") => {
                let partial = other.trim_start_matches(":suggest").trim();
                for label in session.suggestions(partial) {
                    println!("    {label}");
                }
            },
            _ => {
                session.submit_line(&line)?;
            },
        }
        for event in session.take_events() {
            log::info!("session event: {event:?}");
        }
        render_new_entries(&session, &mut printed);
        render_prompt(&session)?;
    }

    Ok(())
}

/// Load `prism.toml` from the working directory, falling back to defaults
/// when the file does not exist.
fn load_config() -> Result<ConsoleConfig> {
    match std::fs::read_to_string("prism.toml") {
        Ok(text) => Ok(ConsoleConfig::from_toml_str(&text)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ConsoleConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Register a handful of game-flavored commands against the session.
fn register_demo_commands(session: &ConsoleSession) -> Result<()> {
    session.register_command(CommandDescriptor::new(
        "setSpeed",
        "Set player movement speed",
        CommandSignature::Unary(TypeTag::Float),
        |args| {
            if let Some(ArgValue::Float(speed)) = args.first() {
                log::info!("player speed set to {speed}");
            }
            Ok(())
        },
    ))?;

    session.register_command(CommandDescriptor::new(
        "gravity",
        "Enable or disable gravity",
        CommandSignature::Unary(TypeTag::Bool),
        |args| {
            if let Some(ArgValue::Bool(enabled)) = args.first() {
                log::info!("gravity enabled: {enabled}");
            }
            Ok(())
        },
    ))?;

    session.register_command(CommandDescriptor::new(
        "teleport",
        "Teleport the player to grid coordinates",
        CommandSignature::Binary(TypeTag::Int, TypeTag::Int),
        |args| {
            if let (Some(ArgValue::Int(x)), Some(ArgValue::Int(y))) = (args.first(), args.get(1)) {
                log::info!("teleporting to ({x}, {y})");
            }
            Ok(())
        },
    ))?;

    session.register_command(CommandDescriptor::new(
        "say",
        "Broadcast a message",
        CommandSignature::Unary(TypeTag::Str),
        |args| {
            if let Some(ArgValue::Str(message)) = args.first() {
                log::info!("broadcast: {message}");
            }
            Ok(())
        },
    ))?;

    session.register_command(CommandDescriptor::new(
        "resetLevel",
        "Restart the current level",
        CommandSignature::Nullary,
        |_| {
            log::info!("level reset");
            Ok(())
        },
    ))?;

    Ok(())
}

/// Print history entries appended since the last call, with a validity
/// marker per line.
fn render_new_entries(session: &ConsoleSession, printed: &mut usize) {
    let entries = session.history().entries();
    if entries.len() < *printed {
        // History was cleared.
        *printed = 0;
    }
    for entry in &entries[*printed..] {
        let marker = match entry.validity {
            Validity::Valid => "ok",
            Validity::Invalid => "??",
            Validity::Neutral => "..",
            Validity::Error => "!!",
        };
        println!("[{marker}] {}", entry.text);
    }
    *printed = entries.len();
}

fn render_prompt(session: &ConsoleSession) -> Result<()> {
    if session.is_open() {
        println!("> {}", session.input());
    } else {
        println!("(console closed)");
    }
    io::stdout().flush()?;
    Ok(())
}
