//! Slash commands for indicator settings.
//!
//! Lines look like `/mg size 48` or just `size 48`. Splitting is shell-style
//! so quoted arguments work; the grammar itself is a clap subcommand enum.

use clap::{Parser, Subcommand};
use meleeguard_core::{Probe, ProximityEngine};
use meleeguard_types::formatting::{format_opacity, format_secs, yes_no};
use meleeguard_types::IndicatorConfig;

/// Prefixes accepted in front of a command
const PREFIXES: &[&str] = &["/mg", "/meleeguard"];

#[derive(Parser, Debug)]
#[command(name = "/mg", about = "Melee position indicator settings", disable_version_flag = true)]
struct SlashLine {
    #[command(subcommand)]
    command: SlashCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SlashCommand {
    /// Stop the indicator from being dragged
    Lock,
    /// Allow dragging the indicator
    Unlock,
    /// Flip the enabled flag
    Toggle,
    /// Enable the indicator
    On,
    /// Disable the indicator
    Off,
    /// Set the indicator size in pixels
    Size { value: u32 },
    /// Set the range poll interval in seconds
    Interval {
        #[arg(allow_negative_numbers = true)]
        secs: f64,
    },
    /// Restore default size, position and interval (keeps enabled and locked)
    Reset,
    /// Show current settings
    Status,
}

/// What applying a command did
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// Settings changed; the message describes the new value
    Changed(String),
    /// Caller should print status
    Status,
}

/// Parse one command line.
pub fn parse(line: &str) -> Result<SlashCommand, String> {
    let mut args = shlex::split(line.trim()).ok_or("error: Invalid quoting")?;
    if args
        .first()
        .is_some_and(|first| PREFIXES.iter().any(|p| first.eq_ignore_ascii_case(p)))
    {
        args.remove(0);
    }
    args.insert(0, "/mg".to_string());

    let line = SlashLine::try_parse_from(args).map_err(|e| e.to_string())?;
    Ok(line.command)
}

/// Apply a command to the settings. Values pass through the config clamps.
pub fn apply(command: &SlashCommand, config: &mut IndicatorConfig) -> Applied {
    let message = match command {
        SlashCommand::Lock => {
            config.locked = true;
            "Indicator locked".to_string()
        }
        SlashCommand::Unlock => {
            config.locked = false;
            "Indicator unlocked".to_string()
        }
        SlashCommand::Toggle => {
            config.enabled = !config.enabled;
            enabled_message(config.enabled)
        }
        SlashCommand::On => {
            config.enabled = true;
            enabled_message(true)
        }
        SlashCommand::Off => {
            config.enabled = false;
            enabled_message(false)
        }
        SlashCommand::Size { value } => {
            let size = config.set_size(*value);
            format!("Size set to {}", size)
        }
        SlashCommand::Interval { secs } => {
            let secs = config.set_poll_interval(*secs);
            format!("Poll interval set to {}", format_secs(secs))
        }
        SlashCommand::Reset => {
            config.reset_layout();
            "Indicator reset to defaults".to_string()
        }
        SlashCommand::Status => return Applied::Status,
    };
    tracing::debug!(?command, "Applied slash command");
    Applied::Changed(message)
}

fn enabled_message(enabled: bool) -> String {
    if enabled {
        "Indicator enabled".to_string()
    } else {
        "Indicator disabled".to_string()
    }
}

pub fn describe_config(config: &IndicatorConfig) -> String {
    format!(
        "enabled: {}, interval: {}, size: {}, position: ({:.0}, {:.0}), locked: {}",
        yes_no(config.enabled),
        format_secs(config.poll_interval_secs),
        config.size,
        config.position.x,
        config.position.y,
        yes_no(config.locked),
    )
}

pub fn describe_engine<P: Probe>(engine: &ProximityEngine<P>) -> String {
    let ctx = engine.context();
    let frame = engine.render();
    format!(
        "state: {}, tracking: {}, melee: {}, behind: {}, fading: {}, incoming: {}, outgoing: {}",
        engine.displayed_state(),
        yes_no(ctx.is_tracking()),
        yes_no(ctx.in_melee()),
        yes_no(ctx.is_behind()),
        yes_no(engine.is_fading()),
        format_opacity(frame.incoming.effective_opacity()),
        format_opacity(frame.outgoing.effective_opacity()),
    )
}
