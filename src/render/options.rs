//! Option rendering: `.SS` subsection headers and `.TP` entries.

use std::io::{self, Write};

use super::format::{format_for_man, man_quote, quote_values};
use super::{EnvStyle, RenderConfig};
use crate::model::{Group, Opt};

/// Render every visible option under `root`, one `each_group` pass.
///
/// A group that fails its visibility check renders nothing itself, but its
/// descendants are still covered by the shared pass. Subsection headers are
/// driven by the walk's root: a visited group gets one only when it carries
/// a short description and `root` has at least one subgroup.
pub(super) fn write_group_options(
    w: &mut dyn Write,
    root: &Group,
    config: &RenderConfig,
) -> io::Result<()> {
    let mut result = Ok(());
    root.each_group(&mut |group| {
        if result.is_err() || !group.show_in_help() {
            return;
        }
        result = write_one_group(&mut *w, root, group, config);
    });
    result
}

fn write_one_group(
    w: &mut dyn Write,
    root: &Group,
    group: &Group,
    config: &RenderConfig,
) -> io::Result<()> {
    if !group.short_description.is_empty() && !root.groups.is_empty() {
        writeln!(w, ".SS {}", group.short_description)?;
        if !group.long_description.is_empty() {
            format_for_man(w, &group.long_description)?;
            writeln!(w)?;
        }
    }

    for opt in &group.options {
        if !opt.show_in_help() {
            continue;
        }
        write_option(w, opt, config)?;
    }
    Ok(())
}

/// Render one option as a `.TP` entry: flag names in a single bold run,
/// value placeholder, default or env annotation, required marker, then the
/// translated description.
fn write_option(w: &mut dyn Write, opt: &Opt, config: &RenderConfig) -> io::Result<()> {
    writeln!(w, ".TP")?;
    write!(w, "\\fB")?;

    if let Some(short) = opt.short_name {
        write!(w, "\\fB\\-{short}\\fR")?;
    }

    if !opt.long_name.is_empty() {
        if opt.short_name.is_some() {
            write!(w, ", ")?;
        }
        write!(w, "\\fB\\-\\-{}\\fR", man_quote(&opt.long_name_with_namespace()))?;
    }

    if !opt.value_name.is_empty() || opt.optional_argument {
        if opt.optional_argument {
            write!(
                w,
                " [\\fI{}={}\\fR]",
                man_quote(&opt.value_name),
                man_quote(&quote_values(&opt.optional_value).join(", "))
            )?;
        } else {
            write!(w, " \\fI{}\\fR", man_quote(&opt.value_name))?;
        }
    }

    if !opt.default.is_empty() {
        write!(
            w,
            " <default: \\fI{}\\fR>",
            man_quote(&quote_values(&opt.default).join(", "))
        )?;
    } else {
        let env_key = opt.env_key_with_namespace();
        if !env_key.is_empty() {
            match config.env_style {
                EnvStyle::Posix => {
                    write!(w, " <default: \\fI${}\\fR>", man_quote(&env_key))?;
                }
                EnvStyle::Windows => {
                    write!(w, " <default: \\fI%{}%\\fR>", man_quote(&env_key))?;
                }
            }
        }
    }

    if opt.required {
        write!(w, " (\\fIrequired\\fR)")?;
    }

    writeln!(w, "\\fP")?;

    if !opt.description.is_empty() {
        format_for_man(w, &opt.description)?;
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn config(env_style: EnvStyle) -> RenderConfig {
        RenderConfig {
            date: DateTime::from_timestamp(0, 0).unwrap(),
            env_style,
        }
    }

    fn render_option(opt: &Opt, env_style: EnvStyle) -> String {
        let mut buf = Vec::new();
        write_option(&mut buf, opt, &config(env_style)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn render_group(group: &Group) -> String {
        let mut buf = Vec::new();
        write_group_options(&mut buf, group, &config(EnvStyle::Posix)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn short_and_long_flags_share_one_bold_run() {
        let opt = Opt::new(Some('v'), "verbose");
        assert_eq!(
            render_option(&opt, EnvStyle::Posix),
            ".TP\n\\fB\\fB\\-v\\fR, \\fB\\-\\-verbose\\fR\\fP\n"
        );
    }

    #[test]
    fn long_only_flag_has_no_separator() {
        let rendered = render_option(&Opt::new(None, "verbose"), EnvStyle::Posix);
        assert!(rendered.contains("\\fB\\-\\-verbose\\fR"));
        assert!(!rendered.contains(", "));
    }

    #[test]
    fn long_flag_uses_namespaced_name() {
        let opt = Opt::new(None, "url").with_namespace("remote");
        let rendered = render_option(&opt, EnvStyle::Posix);
        assert!(rendered.contains("\\fB\\-\\-remote.url\\fR"));
    }

    #[test]
    fn explicit_defaults_beat_env_key() {
        let opt = Opt::new(None, "count")
            .with_default(&["1", "2"])
            .with_env_key("WIDGET_COUNT");
        let rendered = render_option(&opt, EnvStyle::Posix);
        assert!(rendered.contains("<default: \\fI1, 2\\fR>"));
        assert!(!rendered.contains('$'));
    }

    #[test]
    fn env_key_renders_posix_syntax() {
        let opt = Opt::new(None, "token")
            .with_env_key("TOKEN")
            .with_env_namespace("WIDGET");
        let rendered = render_option(&opt, EnvStyle::Posix);
        assert!(rendered.contains("<default: \\fI$WIDGET_TOKEN\\fR>"));
    }

    #[test]
    fn env_key_renders_windows_syntax() {
        let opt = Opt::new(None, "token").with_env_key("TOKEN");
        let rendered = render_option(&opt, EnvStyle::Windows);
        assert!(rendered.contains("<default: \\fI%TOKEN%\\fR>"));
    }

    #[test]
    fn required_marker_without_default_annotation() {
        let opt = Opt::new(None, "input").with_value_name("FILE").required();
        let rendered = render_option(&opt, EnvStyle::Posix);
        assert!(rendered.contains(" \\fIFILE\\fR"));
        assert!(rendered.contains(" (\\fIrequired\\fR)"));
        assert!(!rendered.contains("default"));
    }

    #[test]
    fn optional_argument_beats_plain_value_placeholder() {
        let opt = Opt::new(None, "color")
            .with_value_name("WHEN")
            .with_optional_value(&["always"]);
        let rendered = render_option(&opt, EnvStyle::Posix);
        assert!(rendered.contains(" [\\fIWHEN=always\\fR]"));
        assert!(!rendered.contains(" \\fIWHEN\\fR"));
    }

    #[test]
    fn optional_values_join_after_quoting() {
        let opt = Opt::new(None, "pager")
            .with_value_name("CMD")
            .with_optional_value(&["less", "more cmd"]);
        let rendered = render_option(&opt, EnvStyle::Posix);
        assert!(rendered.contains("[\\fICMD=less, \"more cmd\"\\fR]"));
    }

    #[test]
    fn description_goes_through_translator() {
        let opt = Opt::new(Some('f'), "").with_description("use `fast' mode");
        let rendered = render_option(&opt, EnvStyle::Posix);
        assert!(rendered.ends_with("use \\fBfast\\fP mode\n"));
    }

    #[test]
    fn hidden_options_are_skipped() {
        let group = Group::default()
            .with_option(Opt::new(Some('v'), "verbose"))
            .with_option(Opt::new(Some('x'), "secret").hidden());
        let rendered = render_group(&group);
        assert!(rendered.contains("\\-\\-verbose"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn subgroup_headers_require_root_subgroups() {
        let lone = Group::new("Output options").with_option(Opt::new(Some('o'), ""));
        assert!(!render_group(&lone).contains(".SS"));

        let root = Group::default()
            .with_group(Group::new("Output options").with_option(Opt::new(Some('o'), "")))
            .with_group(Group::new("Input options").with_option(Opt::new(Some('i'), "")));
        let rendered = render_group(&root);
        assert!(rendered.contains(".SS Output options\n"));
        assert!(rendered.contains(".SS Input options\n"));
    }

    #[test]
    fn subgroup_long_description_follows_header() {
        let root = Group::default()
            .with_group(
                Group::new("Tuning")
                    .with_long_description("Knobs for `fast' mode.")
                    .with_option(Opt::new(Some('t'), "")),
            )
            .with_group(Group::new("Other").with_option(Opt::new(Some('z'), "")));
        let rendered = render_group(&root);
        assert!(rendered.contains(".SS Tuning\nKnobs for \\fBfast\\fP mode.\n"));
    }

    #[test]
    fn hidden_group_skipped_but_descendants_still_visited() {
        let root = Group::default()
            .with_group(
                Group::new("Hidden")
                    .hidden()
                    .with_option(Opt::new(Some('h'), "hush"))
                    .with_group(
                        Group::new("Nested").with_option(Opt::new(Some('n'), "nested")),
                    ),
            )
            .with_group(Group::new("Sibling").with_option(Opt::new(Some('s'), "")));
        let rendered = render_group(&root);
        assert!(!rendered.contains("hush"));
        assert!(rendered.contains("\\-\\-nested"));
        assert!(rendered.contains(".SS Nested\n"));
    }
}
