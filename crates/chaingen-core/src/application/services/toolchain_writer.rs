//! Rendering and writing of the two generated files.
//!
//! Both files are rendered in memory before anything touches the filesystem,
//! so a template error never leaves a half-written pair behind.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
        services::template_selector::TemplatePair,
    },
    domain::TemplateContexts,
    error::ChaingenResult,
};

pub const TOOLCHAIN_FILE: &str = "conan_toolchain.cmake";
pub const PROJECT_INCLUDE_FILE: &str = "conan_project_include.cmake";

/// Where the two generated files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub toolchain: PathBuf,
    pub project_include: PathBuf,
}

impl OutputPaths {
    /// Standard file names inside `dir`, made absolute against the current
    /// directory.
    pub fn in_dir(dir: &Path) -> ChaingenResult<Self> {
        let dir = std::path::absolute(dir).map_err(|e| ApplicationError::FilesystemError {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            toolchain: dir.join(TOOLCHAIN_FILE),
            project_include: dir.join(PROJECT_INCLUDE_FILE),
        })
    }

    /// Project-include path as CMake wants it: forward slashes only.
    pub fn project_include_cmake(&self) -> String {
        self.project_include.to_string_lossy().replace('\\', "/")
    }
}

/// Rendered text of both files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedToolchain {
    pub toolchain: String,
    pub project_include: String,
}

/// Renders a [`TemplatePair`] and writes the results.
pub struct ToolchainWriter<'a> {
    renderer: &'a dyn TemplateRenderer,
    filesystem: &'a dyn Filesystem,
}

impl<'a> ToolchainWriter<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, filesystem: &'a dyn Filesystem) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Render both templates without writing.
    pub fn render(
        &self,
        contexts: &TemplateContexts,
        templates: &TemplatePair,
    ) -> ChaingenResult<RenderedToolchain> {
        let project_include = self.renderer.render(
            &templates.project_include.name,
            &templates.project_include.source,
            &contexts.project_include,
        )?;
        let toolchain = self.renderer.render(
            &templates.toolchain.name,
            &templates.toolchain.source,
            &contexts.toolchain,
        )?;
        debug!(
            toolchain_bytes = toolchain.len(),
            project_include_bytes = project_include.len(),
            "Templates rendered"
        );
        Ok(RenderedToolchain {
            toolchain,
            project_include,
        })
    }

    /// Render both templates, then write the project include followed by the
    /// toolchain. Existing files are overwritten.
    pub fn write(
        &self,
        contexts: &TemplateContexts,
        templates: &TemplatePair,
        paths: &OutputPaths,
    ) -> ChaingenResult<RenderedToolchain> {
        let rendered = self.render(contexts, templates)?;
        self.write_rendered(&rendered, paths)?;
        Ok(rendered)
    }

    /// Write already rendered text. If the toolchain cannot be written the
    /// project include written just before it is removed again.
    pub fn write_rendered(
        &self,
        rendered: &RenderedToolchain,
        paths: &OutputPaths,
    ) -> ChaingenResult<()> {
        for path in [&paths.project_include, &paths.toolchain] {
            if let Some(parent) = path.parent() {
                if !self.filesystem.exists(parent) {
                    self.filesystem.create_dir_all(parent)?;
                }
            }
        }

        self.filesystem
            .write_file(&paths.project_include, &rendered.project_include)?;
        if let Err(err) = self
            .filesystem
            .write_file(&paths.toolchain, &rendered.toolchain)
        {
            if let Err(cleanup) = self.filesystem.remove_file(&paths.project_include) {
                warn!(
                    path = %paths.project_include.display(),
                    error = %cleanup,
                    "Could not remove project include after failed toolchain write"
                );
            }
            return Err(err);
        }

        info!(
            toolchain = %paths.toolchain.display(),
            project_include = %paths.project_include.display(),
            "Toolchain written"
        );
        Ok(())
    }
}
