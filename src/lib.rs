//! Man page generation for declarative command-line descriptions.
//!
//! `optman` models the command/option tree a command-line parser exposes
//! (commands with nested option groups, subcommands, defaults, environment
//! fallbacks) and renders it as a groff `man(1)` document. Free-text
//! descriptions may use a light `` `...' `` convention that renders as bold
//! runs. Output is byte-reproducible when `SOURCE_DATE_EPOCH` is set.

pub mod input;
pub mod model;
pub mod render;

pub use input::{load_description, parse_description, LoadError};
pub use model::{Command, Group, Opt, Parser, UsageSpec};
pub use render::{render_to_string, write_man_page, EnvStyle, RenderConfig, RenderError};
