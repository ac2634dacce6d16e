use crate::{config::Config, request::Theme, util::shell_quote};
use std::path::Path;

/// Options shown in the copyable command; the source may be missing while
/// the user is still filling in the form.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions<'a> {
    pub source: Option<&'a Path>,
    pub output_dir: &'a str,
    pub body_only: bool,
    pub no_toc: bool,
    pub theme: Theme,
}

/// Renders the shell command a user could run by hand, fenced as bash.
///
/// Defaults are left out to keep the line short: the configured default
/// output directory and the default theme never appear.
pub fn render_command(cfg: &Config, opts: &CommandOptions<'_>) -> String {
    let mut parts = vec![shell_quote(&cfg.converter.executable)];

    if let Some(source) = opts.source {
        parts.push(shell_quote(&source.to_string_lossy()));
    }
    if !opts.output_dir.is_empty() && opts.output_dir != cfg.defaults.output_dir {
        parts.push("-o".into());
        parts.push(shell_quote(opts.output_dir));
    }
    if opts.body_only {
        parts.push("--body-only".into());
    }
    if opts.no_toc {
        parts.push("--no-toc".into());
    }
    if !opts.theme.is_default() {
        parts.push("--theme".into());
        parts.push(opts.theme.to_string());
    }

    format!("```bash\n{}\n```", parts.join(" "))
}
