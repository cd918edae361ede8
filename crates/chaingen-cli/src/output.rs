//! What the user reads on stdout. Logs and errors go to stderr elsewhere.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on flags and configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// `--output-format` wins over `output.format`; `auto` resolves to
    /// `human` on a terminal and `plain` otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => format_from_config(&config.output.format),
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Primary command output (file contents, values). Never suppressed.
    pub fn data(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    /// Pretty-printed JSON document. Never suppressed.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Info, msg)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    /// One status line. Human output gets a symbol, plain output a word
    /// prefix for warnings only.
    fn status(&self, status: Status, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = self.status_line(status, msg);
        self.term.write_line(&line)
    }

    fn status_line(&self, status: Status, msg: &str) -> String {
        if self.resolved_format != OutputFormat::Human {
            return match status {
                Status::Warning => format!("warning: {msg}"),
                Status::Success | Status::Info => msg.to_owned(),
            };
        }
        let symbol = status.symbol();
        if self.no_color {
            return format!("{symbol} {msg}");
        }
        match status {
            Status::Success => format!("{} {msg}", symbol.green().bold()),
            Status::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
            Status::Info => format!("{} {msg}", symbol.blue().bold()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Status {
    Success,
    Warning,
    Info,
}

impl Status {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }
}

fn format_from_config(format: &str) -> OutputFormat {
    match format.to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
