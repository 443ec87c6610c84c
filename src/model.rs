//! Read-only command model consumed by the man page renderer.
//!
//! These types mirror what a command-line parsing engine exposes: a
//! [`Parser`] owning a root [`Command`], each command owning one root
//! [`Group`] of options plus an ordered set of subcommands. The renderer
//! never mutates this tree; the `with_*` builders exist so callers and tests
//! can assemble one, and every type round-trips through JSON.

use serde::{Deserialize, Serialize};

/// Separator between a group namespace and an option's long name.
pub const NAMESPACE_DELIMITER: &str = ".";

/// Separator between an environment namespace and an option's env key.
pub const ENV_NAMESPACE_DELIMITER: &str = "_";

/// A single command-line option.
///
/// Flag names, value placeholder, defaults, and the environment fallback are
/// independent attributes; the renderer assembles them with priority rules
/// (explicit defaults beat the env key, an optional argument beats a plain
/// value placeholder).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Opt {
    /// Short flag, e.g. `v` for `-v`. Absent when `None`.
    pub short_name: Option<char>,
    /// Long flag without the leading dashes, possibly empty.
    pub long_name: String,
    /// Namespace qualifying the long flag, joined with `.` when non-empty.
    pub namespace: String,
    /// Placeholder shown for the option's value, e.g. `FILE`.
    pub value_name: String,
    /// Explicit default values, in declaration order.
    pub default: Vec<String>,
    /// Whether the option's argument may be omitted.
    pub optional_argument: bool,
    /// Values assumed when an optional argument is omitted.
    pub optional_value: Vec<String>,
    pub required: bool,
    pub description: String,
    /// Environment variable consulted when no value is given.
    pub env_key: String,
    /// Namespace qualifying the env key, joined with `_` when non-empty.
    pub env_namespace: String,
    pub hidden: bool,
}

impl Opt {
    pub fn new(short_name: Option<char>, long_name: &str) -> Self {
        Self {
            short_name,
            long_name: long_name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_value_name(mut self, value_name: &str) -> Self {
        self.value_name = value_name.to_string();
        self
    }

    pub fn with_default(mut self, values: &[&str]) -> Self {
        self.default = values.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Mark the argument optional, with the values assumed when omitted.
    pub fn with_optional_value(mut self, values: &[&str]) -> Self {
        self.optional_argument = true;
        self.optional_value = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn with_env_key(mut self, env_key: &str) -> Self {
        self.env_key = env_key.to_string();
        self
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    pub fn with_env_namespace(mut self, env_namespace: &str) -> Self {
        self.env_namespace = env_namespace.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Long flag qualified by its enclosing namespace.
    pub fn long_name_with_namespace(&self) -> String {
        if self.namespace.is_empty() {
            return self.long_name.clone();
        }
        format!(
            "{}{}{}",
            self.namespace, NAMESPACE_DELIMITER, self.long_name
        )
    }

    /// Env key qualified by its namespace; empty when no key is set.
    pub fn env_key_with_namespace(&self) -> String {
        if self.env_key.is_empty() {
            return String::new();
        }
        if self.env_namespace.is_empty() {
            return self.env_key.clone();
        }
        format!(
            "{}{}{}",
            self.env_namespace, ENV_NAMESPACE_DELIMITER, self.env_key
        )
    }

    /// Whether the option appears in generated documentation.
    pub fn show_in_help(&self) -> bool {
        !self.hidden && (self.short_name.is_some() || !self.long_name.is_empty())
    }
}

/// An ordered collection of options, optionally containing nested subgroups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub short_description: String,
    pub long_description: String,
    pub options: Vec<Opt>,
    pub groups: Vec<Group>,
    pub hidden: bool,
}

impl Group {
    pub fn new(short_description: &str) -> Self {
        Self {
            short_description: short_description.to_string(),
            ..Self::default()
        }
    }

    pub fn with_long_description(mut self, long_description: &str) -> Self {
        self.long_description = long_description.to_string();
        self
    }

    pub fn with_option(mut self, option: Opt) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Whether the group carries visible content (itself or a descendant).
    pub fn show_in_help(&self) -> bool {
        !self.hidden
            && (self.options.iter().any(Opt::show_in_help)
                || self.groups.iter().any(Group::show_in_help))
    }

    /// Visit this group and every descendant in pre-order.
    ///
    /// The visitor sees all groups regardless of visibility; filtering is
    /// the caller's responsibility.
    pub fn each_group<F: FnMut(&Group)>(&self, visitor: &mut F) {
        visitor(self);
        for group in &self.groups {
            group.each_group(visitor);
        }
    }
}

/// How a command's usage string is obtained.
///
/// Replaces a "does the command expose custom usage" probe with an explicit
/// capability resolved once per command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum UsageSpec {
    /// Synthesize usage from the command's visible options.
    #[default]
    Derived,
    /// Caller-supplied usage text, emitted verbatim.
    Custom(String),
}

impl From<Option<String>> for UsageSpec {
    fn from(usage: Option<String>) -> Self {
        match usage {
            Some(text) if !text.is_empty() => UsageSpec::Custom(text),
            _ => UsageSpec::Derived,
        }
    }
}

impl From<UsageSpec> for Option<String> {
    fn from(usage: UsageSpec) -> Self {
        match usage {
            UsageSpec::Derived => None,
            UsageSpec::Custom(text) => Some(text),
        }
    }
}

/// A command with one root option group and an ordered set of subcommands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Command {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub aliases: Vec<String>,
    pub hidden: bool,
    pub usage: UsageSpec,
    pub group: Group,
    pub commands: Vec<Command>,
}

impl Command {
    pub fn new(name: &str, short_description: &str) -> Self {
        Self {
            name: name.to_string(),
            short_description: short_description.to_string(),
            ..Self::default()
        }
    }

    pub fn with_long_description(mut self, long_description: &str) -> Self {
        self.long_description = long_description.to_string();
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = UsageSpec::Custom(usage.to_string());
        self
    }

    pub fn with_option(mut self, option: Opt) -> Self {
        self.group.options.push(option);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.group.groups.push(group);
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Visible subcommands sorted by display name.
    pub fn sorted_visible_commands(&self) -> Vec<&Command> {
        let mut commands: Vec<&Command> =
            self.commands.iter().filter(|c| !c.hidden).collect();
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    /// Whether any group in this command's subtree holds a visible option.
    pub fn has_help_options(&self) -> bool {
        let mut found = false;
        self.group.each_group(&mut |group| {
            if group.options.iter().any(Opt::show_in_help) {
                found = true;
            }
        });
        found
    }
}

/// Fully-populated description of a program, the renderer's input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parser {
    /// Program name, used for the document title and root command.
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    /// Top-level usage override; `[OPTIONS]` is assumed when empty.
    pub usage: String,
    /// Root command owning the top-level option group and subcommands.
    pub command: Command,
}

impl Parser {
    pub fn new(name: &str, short_description: &str) -> Self {
        Self {
            name: name.to_string(),
            short_description: short_description.to_string(),
            command: Command::new(name, short_description),
            ..Self::default()
        }
    }

    pub fn with_long_description(mut self, long_description: &str) -> Self {
        self.long_description = long_description.to_string();
        self
    }

    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    pub fn with_option(mut self, option: Opt) -> Self {
        self.command.group.options.push(option);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.command.group.groups.push(group);
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.command.commands.push(command);
        self
    }

    /// Top-level subcommands not marked hidden, in declaration order.
    pub fn visible_commands(&self) -> Vec<&Command> {
        self.command.commands.iter().filter(|c| !c.hidden).collect()
    }
}
