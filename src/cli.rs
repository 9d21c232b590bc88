//! Command-line interface for sparkgrep.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::detect::{collect_files, default_patterns, NotebookOptions, Runner};
use crate::report::{self, EXIT_SUCCESS};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Detect leftover Spark and Databricks debugging actions.
///
/// Scans Python scripts and Jupyter notebooks for calls such as
/// `display(df)`, `df.show()` or a bare `df.collect()` and exits non-zero
/// when any are found, so it can gate commits from a pre-commit hook.
#[derive(Parser, Debug)]
#[command(name = "sparkgrep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to check
    pub files: Vec<PathBuf>,

    /// Additional pattern to check, as "regex:description" (repeatable)
    #[arg(long, num_args = 1, action = ArgAction::Append, value_name = "PATTERN")]
    pub additional_patterns: Vec<String>,

    /// Do not use the built-in patterns
    #[arg(long)]
    pub disable_default_patterns: bool,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Exit non-zero when a file cannot be read or parsed
    #[arg(long)]
    pub fail_on_error: bool,

    /// Ignore %magic and !shell lines in notebook cells
    #[arg(long)]
    pub skip_magic_lines: bool,

    /// Scan files in parallel (output order is unchanged)
    #[arg(long)]
    pub parallel: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Effective settings after merging the config file and the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub use_defaults: bool,
    pub additional_patterns: Vec<String>,
    pub fail_on_error: bool,
    pub skip_magic_lines: bool,
}

impl Settings {
    /// Boolean switches are on when set in either place. Extra patterns
    /// from both are kept, config entries first.
    pub fn merge(config: &Config, cli: &Cli) -> Self {
        let mut additional_patterns = config.additional_patterns.clone();
        additional_patterns.extend(cli.additional_patterns.iter().cloned());
        Self {
            use_defaults: !(config.disable_default_patterns || cli.disable_default_patterns),
            additional_patterns,
            fail_on_error: config.fail_on_error || cli.fail_on_error,
            skip_magic_lines: config.skip_magic_lines || cli.skip_magic_lines,
        }
    }
}

/// Run a scan and print the report. Returns the process exit code.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let (config, config_path) = match cli.config.as_deref() {
        Some(path) if !path.exists() => {
            report::write_warnings(&[format!(
                "Warning: Config file not found: {}, using defaults",
                path.display()
            )]);
            (Config::default(), None)
        }
        explicit => Config::load(explicit, Path::new("."))?,
    };
    if let Some(path) = &config_path {
        debug!(path = %path.display(), "Loaded config");
    }
    let settings = Settings::merge(&config, cli);
    let exclude = config.exclude_set()?;

    let runner = Runner::new(
        &default_patterns(),
        settings.use_defaults,
        settings.additional_patterns.as_slice(),
    )
    .notebook_options(NotebookOptions {
        skip_magic_lines: settings.skip_magic_lines,
    })
    .parallel(cli.parallel);

    // Pattern problems are reported even when there is nothing to scan.
    if cli.format == Format::Text {
        report::write_warnings(&report::pattern_warnings(runner.pattern_errors()));
    }

    let files = collect_files(&cli.files, &exclude);
    if files.is_empty() {
        if cli.format == Format::Json {
            report::write_warnings(&report::pattern_warnings(runner.pattern_errors()));
        }
        debug!("No files to scan");
        return Ok(EXIT_SUCCESS);
    }

    let result = runner.run(files.as_slice());

    match cli.format {
        Format::Json => report::write_json(&result, settings.fail_on_error)?,
        Format::Text => {
            report::write_warnings(&report::file_warnings(&result));
            report::write_text(&result);
        }
    }

    Ok(report::exit_code(&result, settings.fail_on_error))
}
