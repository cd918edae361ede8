//! Toolchain Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Validate variable stores
//! 2. Select templates for the target OS
//! 3. Deduce the toolchain context
//! 4. Render both files
//! 5. Write them (skipped for previews)

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CpuCount, Filesystem, TemplateRenderer, TemplateStore},
        services::{
            template_selector::{TemplateSelection, TemplateSelector},
            toolchain_writer::{OutputPaths, RenderedToolchain, ToolchainWriter},
        },
    },
    domain::{
        Advisory, CMakeToolchain, DeducedToolchainContext, DomainValidator as validator,
        GenerationRequest, PlatformHelper, Variables, deduce,
    },
    error::{ChaingenError, ChaingenResult},
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub name: String,
    /// Whether this template would be picked for the queried OS.
    pub selected: bool,
}

/// What a generation run produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub paths: OutputPaths,
    /// `false` for previews.
    pub written: bool,
    pub toolchain_template: String,
    pub project_include_template: String,
    pub advisories: Vec<Advisory>,
    pub context: DeducedToolchainContext,
    pub rendered: RenderedToolchain,
}

/// Main generation service.
pub struct ToolchainService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    cpu: Box<dyn CpuCount>,
}

impl ToolchainService {
    /// Create a new toolchain service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use chaingen_core::application::ToolchainService;
    ///
    /// let service = ToolchainService::new(
    ///     store,      // impl TemplateStore
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    ///     cpu,        // impl CpuCount
    /// );
    /// ```
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        cpu: Box<dyn CpuCount>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            cpu,
        }
    }

    /// Generate `conan_toolchain.cmake` and `conan_project_include.cmake` in
    /// `output_dir`.
    #[instrument(
        skip_all,
        fields(
            os = request.settings.get("os").unwrap_or("-"),
            output_dir = %output_dir.as_ref().display()
        )
    )]
    pub fn generate(
        &self,
        request: &GenerationRequest,
        variables: &Variables,
        preprocessor_definitions: &Variables,
        output_dir: impl AsRef<Path>,
    ) -> ChaingenResult<GenerationReport> {
        let mut report =
            self.prepare(request, variables, preprocessor_definitions, output_dir.as_ref())?;

        ToolchainWriter::new(self.renderer.as_ref(), self.filesystem.as_ref())
            .write_rendered(&report.rendered, &report.paths)?;
        report.written = true;

        info!(
            template = %report.toolchain_template,
            advisories = report.advisories.len(),
            "Generation completed successfully"
        );
        Ok(report)
    }

    /// Render both files as [`generate`](Self::generate) would, without
    /// writing anything.
    #[instrument(
        skip_all,
        fields(os = request.settings.get("os").unwrap_or("-"))
    )]
    pub fn preview(
        &self,
        request: &GenerationRequest,
        variables: &Variables,
        preprocessor_definitions: &Variables,
        output_dir: impl AsRef<Path>,
    ) -> ChaingenResult<GenerationReport> {
        self.prepare(request, variables, preprocessor_definitions, output_dir.as_ref())
    }

    /// List all available templates, marking the toolchain template that
    /// would be used for `os`.
    pub fn list_templates(&self, os: Option<&str>) -> ChaingenResult<Vec<TemplateInfo>> {
        let names = self.store.list()?;
        // An unresolvable selection still lists what is there.
        let selected = TemplateSelector::new(self.store.as_ref())
            .toolchain_template_name(os)
            .ok();

        Ok(names
            .into_iter()
            .map(|name| TemplateInfo {
                selected: selected.as_deref() == Some(name.as_str()),
                name,
            })
            .collect())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn prepare(
        &self,
        request: &GenerationRequest,
        variables: &Variables,
        preprocessor_definitions: &Variables,
        output_dir: &Path,
    ) -> ChaingenResult<GenerationReport> {
        // 1. Validate names that end up verbatim in CMake
        validator::validate_variables(variables)?;
        validator::validate_variables(preprocessor_definitions)?;

        // 2. Resolve templates (fatal before any write)
        let TemplateSelection {
            templates,
            base_toolchain,
            advisories: selection_advisories,
        } = TemplateSelector::new(self.store.as_ref())
            .select(&request.settings, request.android_ndk.as_deref())?;
        info!(template = %templates.toolchain.name, "Template resolved");

        // 3. Deduce
        let deduction = deduce(request, || self.cpu.cpu_count());
        let advisories: Vec<Advisory> = deduction
            .advisories
            .into_iter()
            .chain(selection_advisories)
            .collect();
        for advisory in &advisories {
            warn!("{}", advisory);
        }
        let context = deduction.context.with_base_toolchain(base_toolchain);

        // 4. Render
        let paths = OutputPaths::in_dir(output_dir)?;
        let toolchain = CMakeToolchain::new(
            context,
            variables.clone(),
            preprocessor_definitions.clone(),
            PlatformHelper::new(request.settings.clone()),
        );
        let contexts = toolchain
            .template_contexts(&paths.project_include_cmake())
            .map_err(|e| {
                ChaingenError::from(ApplicationError::RenderingFailed {
                    template: templates.toolchain.name.clone(),
                    reason: e.to_string(),
                })
            })?;
        let rendered = ToolchainWriter::new(self.renderer.as_ref(), self.filesystem.as_ref())
            .render(&contexts, &templates)?;

        Ok(GenerationReport {
            paths,
            written: false,
            toolchain_template: templates.toolchain.name,
            project_include_template: templates.project_include.name,
            advisories,
            context: toolchain.context().clone(),
            rendered,
        })
    }
}
