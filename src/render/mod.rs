//! Groff man page rendering for a command-line description.
//!
//! The renderer walks a read-only [`Parser`] tree and writes a `man(1)`
//! document in one pass: title, name, synopsis, description, options, and a
//! commands section when visible subcommands exist. All configuration is
//! resolved into a [`RenderConfig`] before the first byte is written, so a
//! render either produces the whole document or fails up front.

use std::env::{self, VarError};
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::model::Parser;

mod commands;
mod format;
mod options;

use commands::write_subcommands;
use format::{format_for_man, man_quote};
use options::write_group_options;

/// Environment variable honored for reproducible date stamps.
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

#[derive(Debug, Error)]
pub enum RenderError {
    /// `SOURCE_DATE_EPOCH` was set but did not hold a Unix timestamp.
    #[error("invalid SOURCE_DATE_EPOCH value {value:?}: {reason}")]
    InvalidSourceDateEpoch { value: String, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Syntax used when an option's default comes from an environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvStyle {
    /// `$KEY`
    Posix,
    /// `%KEY%`
    Windows,
}

impl EnvStyle {
    fn target_default() -> Self {
        if cfg!(windows) {
            EnvStyle::Windows
        } else {
            EnvStyle::Posix
        }
    }
}

/// Rendering knobs, resolved before any output is written.
///
/// Keeping the clock and environment lookup out of the render pass makes
/// [`write_man_page`] a pure function of the tree and this config.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Date stamped into the `.TH` header.
    pub date: DateTime<Utc>,
    /// Platform syntax for environment-variable default annotations.
    pub env_style: EnvStyle,
}

impl RenderConfig {
    /// Resolve the config from the process environment and wall clock.
    ///
    /// A present but malformed `SOURCE_DATE_EPOCH` is a fatal configuration
    /// error; an absent one means the current time.
    pub fn from_env() -> Result<Self, RenderError> {
        let date = match env::var(SOURCE_DATE_EPOCH) {
            Ok(raw) => parse_source_date_epoch(&raw)?,
            Err(VarError::NotPresent) => Utc::now(),
            Err(VarError::NotUnicode(_)) => {
                return Err(RenderError::InvalidSourceDateEpoch {
                    value: "<non-unicode>".to_string(),
                    reason: "not valid UTF-8".to_string(),
                })
            }
        };
        Ok(Self {
            date,
            env_style: EnvStyle::target_default(),
        })
    }

    /// Config with a fixed date and the target's env-var syntax.
    pub fn with_date(date: DateTime<Utc>) -> Self {
        Self {
            date,
            env_style: EnvStyle::target_default(),
        }
    }
}

fn parse_source_date_epoch(raw: &str) -> Result<DateTime<Utc>, RenderError> {
    let epoch: i64 = raw
        .parse()
        .map_err(|err: std::num::ParseIntError| RenderError::InvalidSourceDateEpoch {
            value: raw.to_string(),
            reason: err.to_string(),
        })?;
    DateTime::from_timestamp(epoch, 0).ok_or_else(|| RenderError::InvalidSourceDateEpoch {
        value: raw.to_string(),
        reason: "timestamp out of range".to_string(),
    })
}

/// Write a complete man page for `parser` to `w`.
///
/// Sections are emitted in fixed order; the commands section appears only
/// when at least one visible top-level subcommand exists.
pub fn write_man_page(
    parser: &Parser,
    w: &mut dyn Write,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    debug!(program = %parser.name, "rendering man page");

    writeln!(
        w,
        ".TH {} 1 \"{}\"",
        man_quote(&parser.name),
        config.date.format("%-d %B %Y")
    )?;
    writeln!(w, ".SH NAME")?;
    writeln!(
        w,
        "{} \\- {}",
        man_quote(&parser.name),
        man_quote(&parser.short_description)
    )?;

    writeln!(w, ".SH SYNOPSIS")?;
    let usage = if parser.usage.is_empty() {
        "[OPTIONS]"
    } else {
        parser.usage.as_str()
    };
    writeln!(w, "\\fB{}\\fP {}", man_quote(&parser.name), man_quote(usage))?;

    writeln!(w, ".SH DESCRIPTION")?;
    format_for_man(w, &parser.long_description)?;
    writeln!(w)?;

    writeln!(w, ".SH OPTIONS")?;
    write_group_options(w, &parser.command.group, config)?;

    if !parser.visible_commands().is_empty() {
        writeln!(w, ".SH COMMANDS")?;
        write_subcommands(w, "", &parser.command, config)?;
    }
    Ok(())
}

/// Render the man page into a `String`.
pub fn render_to_string(parser: &Parser, config: &RenderConfig) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    write_man_page(parser, &mut buf, config)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
