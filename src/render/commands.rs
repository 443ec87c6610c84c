//! Subcommand sections: qualified names, usage lines, aliases, and each
//! command's own option groups.

use std::io::{self, Write};

use tracing::debug;

use super::format::{format_for_man, man_quote};
use super::options::write_group_options;
use super::RenderConfig;
use crate::model::{Command, UsageSpec};

/// Render every visible subcommand of `root`, depth-first by sorted name.
///
/// `prefix` is the qualified path accumulated so far, empty at the top
/// level; the root command itself is emitted separately by the assembler.
pub(super) fn write_subcommands(
    w: &mut dyn Write,
    prefix: &str,
    root: &Command,
    config: &RenderConfig,
) -> io::Result<()> {
    for command in root.sorted_visible_commands() {
        let qualified = if prefix.is_empty() {
            command.name.clone()
        } else {
            format!("{prefix} {}", command.name)
        };
        write_command(w, &qualified, command, config)?;
    }
    Ok(())
}

fn write_command(
    w: &mut dyn Write,
    qualified: &str,
    command: &Command,
    config: &RenderConfig,
) -> io::Result<()> {
    debug!(command = %qualified, "rendering subcommand section");
    writeln!(w, ".SS {qualified}")?;
    writeln!(w, "{}", command.short_description)?;

    if !command.long_description.is_empty() {
        writeln!(w)?;

        // Boilerplate descriptions open with "The <name> command"; give the
        // name itself emphasis without requiring hand-authored markup.
        let lead_in = format!("The {} command", command.name);
        if let Some(rest) = command.long_description.strip_prefix(&lead_in) {
            write!(w, "The \\fI{}\\fP command", man_quote(&command.name))?;
            format_for_man(w, rest)?;
        } else {
            format_for_man(w, &command.long_description)?;
        }
        writeln!(w)?;
    }

    let usage = match &command.usage {
        UsageSpec::Custom(usage) => Some(usage.clone()),
        UsageSpec::Derived if command.has_help_options() => {
            Some(format!("[{}-OPTIONS]", command.name))
        }
        UsageSpec::Derived => None,
    };
    if let Some(usage) = usage {
        writeln!(w)?;
        writeln!(w, "\\fBUsage\\fP: {} {}", man_quote(qualified), man_quote(&usage))?;
        writeln!(w, ".TP")?;
    }

    if !command.aliases.is_empty() {
        writeln!(w)?;
        writeln!(w, "\\fBAliases\\fP: {}", man_quote(&command.aliases.join(", ")))?;
        writeln!(w)?;
    }

    write_group_options(w, &command.group, config)?;
    write_subcommands(w, qualified, command, config)
}
