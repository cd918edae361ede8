//! Implementation of the `chaingen generate` command.
//!
//! Responsibility: merge profile, flags and configuration into a
//! `GenerationRequest`, call the core toolchain service, and display the
//! results. No deduction logic lives here.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, instrument};

use chaingen_adapters::{EchoRenderer, LocalFilesystem, MiniJinjaRenderer, NumCpus};
use chaingen_core::{
    application::{GenerationReport, ToolchainService, ports::TemplateRenderer},
    domain::{GenerationRequest, Variables},
    error::ChaingenError,
};

use crate::{
    cli::{Assignment, GenerateArgs},
    commands::open_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    profile::Profile,
};

/// Everything the service needs for one run.
#[derive(Debug)]
pub struct Inputs {
    pub request: GenerationRequest,
    pub variables: Variables,
    pub definitions: Variables,
}

/// Execute the `chaingen generate` command.
#[instrument(skip_all, fields(output_dir = %args.output_dir.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let inputs = build_inputs(&args, &config)?;
    debug!(
        os = inputs.request.settings.get("os").unwrap_or("-"),
        generator = inputs.request.generator.as_deref().unwrap_or("-"),
        "Request resolved"
    );

    let template_dir = args
        .template_dir
        .as_deref()
        .or(config.templates.dir.as_deref());
    let store = open_store(template_dir)?;
    let renderer: Box<dyn TemplateRenderer> = if args.show_context {
        Box::new(EchoRenderer::new())
    } else {
        Box::new(MiniJinjaRenderer::new(Arc::clone(&store)))
    };
    let service = ToolchainService::new(
        Box::new(store),
        renderer,
        Box::new(LocalFilesystem::new()),
        Box::new(NumCpus),
    );

    let Inputs {
        request,
        variables,
        definitions,
    } = inputs;

    if args.dry_run || args.show_context {
        let report = service.preview(&request, &variables, &definitions, &args.output_dir)?;
        return show_preview(&report, &output);
    }

    let report = service.generate(&request, &variables, &definitions, &args.output_dir)?;
    info!(toolchain = %report.paths.toolchain.display(), "Toolchain generated");
    show_report(&report, &output)
}

/// Merge profile files, command-line pairs and configuration defaults.
///
/// Command-line settings and options override the profile; flags override
/// configuration.
pub fn build_inputs(args: &GenerateArgs, config: &AppConfig) -> CliResult<Inputs> {
    let mut profile = match &args.profile {
        Some(path) => Profile::load(path)?,
        None => Profile::default(),
    };

    for pair in &args.settings {
        profile
            .settings
            .insert_pair(pair)
            .map_err(ChaingenError::from)?;
    }
    for pair in &args.options {
        profile
            .options
            .insert_pair(pair)
            .map_err(ChaingenError::from)?;
    }
    apply_assignments(&mut profile.variables, &args.variables);
    apply_assignments(&mut profile.definitions, &args.definitions);

    let build_settings = match &args.build_profile {
        Some(path) => Some(Profile::load(path)?.settings),
        None => None,
    };

    let mut request = GenerationRequest::new(profile.settings, profile.options);
    request.build_settings = build_settings;
    request.generator = args
        .generator
        .clone()
        .or_else(|| config.generation.generator.clone());
    request.generator_platform = args.generator_platform.clone();
    request.toolset = args.toolset.clone();
    request.build_type = args.build_type.clone();
    request.parallel = !args.no_parallel && config.generation.parallel;
    request.install_prefix = args
        .install_prefix
        .clone()
        .or_else(|| config.generation.install_prefix.clone());
    request.android_ndk = args
        .android_ndk
        .clone()
        .or_else(|| config.android.ndk.clone());

    Ok(Inputs {
        request,
        variables: profile.variables,
        definitions: profile.definitions,
    })
}

fn apply_assignments(store: &mut Variables, assignments: &[Assignment]) {
    for assignment in assignments {
        match &assignment.configuration {
            Some(configuration) => store.set_for_configuration(
                configuration.clone(),
                assignment.name.clone(),
                assignment.value.clone(),
            ),
            None => store.set(assignment.name.clone(), assignment.value.clone()),
        };
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

fn summary(report: &GenerationReport) -> serde_json::Value {
    json!({
        "written": report.written,
        "toolchain": report.paths.toolchain.display().to_string(),
        "project_include": report.paths.project_include.display().to_string(),
        "toolchain_template": report.toolchain_template,
        "project_include_template": report.project_include_template,
        "advisories": report
            .advisories
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
    })
}

fn show_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&summary(report))?;
        return Ok(());
    }

    for advisory in &report.advisories {
        output.warning(&advisory.to_string())?;
    }
    output.success(&format!("Wrote {}", report.paths.toolchain.display()))?;
    output.success(&format!("Wrote {}", report.paths.project_include.display()))?;
    output.print("")?;
    output.print("Configure with:")?;
    output.print(&format!(
        "  cmake -DCMAKE_TOOLCHAIN_FILE={} <source-dir>",
        report.paths.toolchain.display()
    ))?;
    Ok(())
}

fn show_preview(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        let mut doc = summary(report);
        doc["rendered"] = json!({
            "toolchain": report.rendered.toolchain,
            "project_include": report.rendered.project_include,
        });
        output.json(&doc)?;
        return Ok(());
    }

    for advisory in &report.advisories {
        output.warning(&advisory.to_string())?;
    }
    output.info("Dry run: no files written")?;
    for (path, template, text) in [
        (
            &report.paths.project_include,
            &report.project_include_template,
            &report.rendered.project_include,
        ),
        (
            &report.paths.toolchain,
            &report.toolchain_template,
            &report.rendered.toolchain,
        ),
    ] {
        output.header(&format!("── {} (from {}) ──", path.display(), template))?;
        output.data(text.trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaingen_core::domain::VariableValue;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args() -> GenerateArgs {
        GenerateArgs {
            output_dir: PathBuf::from("."),
            ..GenerateArgs::default()
        }
    }

    #[test]
    fn flags_override_profile() {
        let dir = TempDir::new().unwrap();
        let profile = dir.path().join("p.toml");
        fs::write(
            &profile,
            "[settings]\nos = \"Linux\"\nbuild_type = \"Debug\"\n\n[options]\nshared = true\n",
        )
        .unwrap();

        let mut args = args();
        args.profile = Some(profile);
        args.settings = vec!["build_type=Release".into()];
        args.options = vec!["shared=False".into()];

        let inputs = build_inputs(&args, &AppConfig::default()).unwrap();
        assert_eq!(inputs.request.settings.get("os"), Some("Linux"));
        assert_eq!(inputs.request.settings.get("build_type"), Some("Release"));
        assert_eq!(inputs.request.options.get("shared"), Some(false));
    }

    #[test]
    fn configuration_fills_missing_flags() {
        let mut config = AppConfig::default();
        config.generation.generator = Some("Ninja".into());
        config.generation.parallel = false;
        config.android.ndk = Some("/opt/ndk".into());

        let mut args = args();
        args.android_ndk = Some("/explicit/ndk".into());

        let inputs = build_inputs(&args, &config).unwrap();
        assert_eq!(inputs.request.generator.as_deref(), Some("Ninja"));
        assert!(!inputs.request.parallel);
        assert_eq!(inputs.request.android_ndk.as_deref(), Some("/explicit/ndk"));
    }

    #[test]
    fn no_parallel_flag_wins() {
        let mut args = args();
        args.no_parallel = true;
        let inputs = build_inputs(&args, &AppConfig::default()).unwrap();
        assert!(!inputs.request.parallel);
    }

    #[test]
    fn assignments_land_in_their_store() {
        let mut args = args();
        args.variables = vec![
            Assignment {
                configuration: None,
                name: "A".into(),
                value: "1".into(),
            },
            Assignment {
                configuration: Some("debug".into()),
                name: "MYVAR".into(),
                value: "DEBUG_VALUE".into(),
            },
        ];
        args.definitions = vec![Assignment {
            configuration: None,
            name: "DEF".into(),
            value: "x".into(),
        }];

        let inputs = build_inputs(&args, &AppConfig::default()).unwrap();
        assert_eq!(inputs.variables.get("A"), Some(&VariableValue::from("1")));
        assert_eq!(
            inputs
                .variables
                .configuration("debug")
                .and_then(|b| b.get("MYVAR")),
            Some(&VariableValue::from("DEBUG_VALUE"))
        );
        assert_eq!(inputs.definitions.get("DEF"), Some(&VariableValue::from("x")));
        assert_eq!(inputs.definitions.get("A"), None);
    }

    #[test]
    fn malformed_option_is_a_user_error() {
        let mut args = args();
        args.options = vec!["fPIC=perhaps".into()];
        let err = build_inputs(&args, &AppConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn build_profile_supplies_build_settings() {
        let dir = TempDir::new().unwrap();
        let build = dir.path().join("build.toml");
        fs::write(&build, "[settings]\nos = \"Linux\"\narch = \"x86_64\"\n").unwrap();

        let mut args = args();
        args.build_profile = Some(build);
        let inputs = build_inputs(&args, &AppConfig::default()).unwrap();
        assert_eq!(
            inputs.request.build_settings.as_ref().and_then(|s| s.get("arch")),
            Some("x86_64")
        );
    }
}
