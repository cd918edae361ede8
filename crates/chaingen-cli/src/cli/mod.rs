//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "chaingen",
    bin_name = "chaingen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Compile build settings into a CMake toolchain file",
    long_about = "Chaingen turns a description of the target platform (settings, \
                  options, variables) into conan_toolchain.cmake and \
                  conan_project_include.cmake.",
    after_help = "EXAMPLES:\n\
        \x20 chaingen generate --profile linux-gcc.toml --output-dir build\n\
        \x20 chaingen generate -s os=Linux -s compiler=gcc -o fPIC=True\n\
        \x20 chaingen templates --os Android\n\
        \x20 chaingen completions bash > /usr/share/bash-completion/completions/chaingen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the toolchain and project-include files.
    #[command(
        visible_alias = "gen",
        about = "Generate a CMake toolchain",
        after_help = "EXAMPLES:\n\
            \x20 chaingen generate --profile android.toml --android-ndk /opt/ndk\n\
            \x20 chaingen generate -s os=Windows -s compiler=\"Visual Studio\" -s compiler.version=16\n\
            \x20 chaingen generate --var debug:MYVAR=DEBUG_VALUE --var release:MYVAR=RELEASE_VALUE\n\
            \x20 chaingen generate --profile p.toml --dry-run"
    )]
    Generate(GenerateArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 chaingen templates\n\
            \x20 chaingen templates --os Macos\n\
            \x20 chaingen templates --template-dir ./my-templates"
    )]
    Templates(TemplatesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 chaingen completions bash > ~/.local/share/bash-completion/completions/chaingen\n\
            \x20 chaingen completions zsh  > ~/.zfunc/_chaingen\n\
            \x20 chaingen completions fish > ~/.config/fish/completions/chaingen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 chaingen config list\n\
            \x20 chaingen config get android.ndk\n\
            \x20 chaingen config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `chaingen generate`.
#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    /// TOML profile with `[settings]`, `[options]`, `[variables]` and
    /// `[definitions]` tables.
    #[arg(short = 'p', long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Target setting, overriding the profile.
    #[arg(
        short = 's',
        long = "setting",
        value_name = "KEY=VALUE",
        help = "Setting, e.g. -s compiler.version=9"
    )]
    pub settings: Vec<String>,

    /// Package option, overriding the profile.
    #[arg(
        short = 'o',
        long = "option",
        value_name = "KEY=VALUE",
        help = "Option, e.g. -o shared=True"
    )]
    pub options: Vec<String>,

    /// Profile describing the build machine. Cross-building is detected
    /// when its `os` or `arch` differs from the target.
    #[arg(long = "build-profile", value_name = "FILE")]
    pub build_profile: Option<PathBuf>,

    /// CMake generator name; deduced from the compiler when omitted.
    #[arg(long = "generator", value_name = "NAME")]
    pub generator: Option<String>,

    /// Generator platform (`CMAKE_GENERATOR_PLATFORM`).
    #[arg(long = "generator-platform", value_name = "PLATFORM")]
    pub generator_platform: Option<String>,

    /// Generator toolset (`CMAKE_GENERATOR_TOOLSET`).
    #[arg(long = "toolset", value_name = "TOOLSET")]
    pub toolset: Option<String>,

    /// Build type; defaults to the `build_type` setting.
    #[arg(long = "build-type", value_name = "TYPE")]
    pub build_type: Option<String>,

    /// Do not add the `/MP` parallel compile flag.
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// `CMAKE_INSTALL_PREFIX`.
    #[arg(long = "install-prefix", value_name = "DIR")]
    pub install_prefix: Option<String>,

    /// Android NDK root; its toolchain file is included for Android targets.
    #[arg(long = "android-ndk", value_name = "DIR", env = "ANDROID_NDK")]
    pub android_ndk: Option<String>,

    /// Load templates from this directory instead of the built-in set.
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// CMake variable, optionally scoped to one build configuration.
    #[arg(
        long = "var",
        value_name = "[CONFIG:]NAME=VALUE",
        value_parser = parse_assignment
    )]
    pub variables: Vec<Assignment>,

    /// Preprocessor definition, optionally scoped to one build configuration.
    #[arg(
        long = "define",
        value_name = "[CONFIG:]NAME=VALUE",
        value_parser = parse_assignment
    )]
    pub definitions: Vec<Assignment>,

    /// Where to write the generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Render and print the files without writing them.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the context each template receives instead of rendering it.
    /// Implies `--dry-run`.
    #[arg(long = "show-context")]
    pub show_context: bool,
}

/// A `--var`/`--define` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub configuration: Option<String>,
    pub name: String,
    pub value: String,
}

/// Parse `[CONFIG:]NAME=VALUE`. The value may itself contain `:` and `=`.
pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (target, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected [CONFIG:]NAME=VALUE, got '{raw}'"))?;
    let (configuration, name) = match target.split_once(':') {
        Some((configuration, name)) => (Some(configuration.trim()), name.trim()),
        None => (None, target.trim()),
    };
    if name.is_empty() {
        return Err(format!("missing variable name in '{raw}'"));
    }
    if configuration.is_some_and(str::is_empty) {
        return Err(format!("empty configuration name in '{raw}'"));
    }
    Ok(Assignment {
        configuration: configuration.map(str::to_string),
        name: name.to_string(),
        value: value.to_string(),
    })
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `chaingen templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Mark the toolchain template selected for this `os` setting.
    #[arg(long = "os", value_name = "OS")]
    pub os: Option<String>,

    /// List this directory instead of the built-in set.
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `chaingen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `chaingen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `android.ndk`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
