//! The toolchain aggregate and the render contexts built from it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::deduction::DeducedToolchainContext;
use crate::domain::helper::PlatformHelper;
use crate::domain::variables::{ConfigurationRecord, VariableRecord, Variables};

/// Data handed to a template renderer.
///
/// `data` is a flat JSON object of context keys; `platform` is exposed to
/// templates as a callable object rather than as data.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    data: Map<String, Value>,
    platform: PlatformHelper,
}

impl RenderContext {
    pub fn new(data: Map<String, Value>, platform: PlatformHelper) -> Self {
        Self { data, platform }
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn platform(&self) -> &PlatformHelper {
        &self.platform
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// Contexts for the two generated files.
#[derive(Debug, Clone)]
pub struct TemplateContexts {
    pub toolchain: RenderContext,
    pub project_include: RenderContext,
}

#[derive(Serialize)]
struct ToolchainData<'a> {
    #[serde(flatten)]
    deduced: &'a DeducedToolchainContext,
    variables: Vec<VariableRecord>,
    variables_config: Vec<ConfigurationRecord>,
    preprocessor_definitions: Vec<VariableRecord>,
    preprocessor_definitions_config: Vec<ConfigurationRecord>,
    conan_project_include_cmake: &'a str,
}

#[derive(Serialize)]
struct ProjectIncludeData {
    vs_static_runtime: bool,
}

/// Everything needed to render one toolchain: the deduced values, both
/// variable stores and the template helper.
#[derive(Debug, Clone)]
pub struct CMakeToolchain {
    context: DeducedToolchainContext,
    variables: Variables,
    preprocessor_definitions: Variables,
    platform: PlatformHelper,
}

impl CMakeToolchain {
    pub fn new(
        context: DeducedToolchainContext,
        variables: Variables,
        preprocessor_definitions: Variables,
        platform: PlatformHelper,
    ) -> Self {
        Self {
            context,
            variables,
            preprocessor_definitions,
            platform,
        }
    }

    pub fn context(&self) -> &DeducedToolchainContext {
        &self.context
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn preprocessor_definitions(&self) -> &Variables {
        &self.preprocessor_definitions
    }

    /// Build both render contexts. `project_include_path` is the absolute,
    /// forward-slashed path of the generated project include.
    pub fn template_contexts(
        &self,
        project_include_path: &str,
    ) -> Result<TemplateContexts, serde_json::Error> {
        let toolchain = ToolchainData {
            deduced: &self.context,
            variables: self.variables.global_records(),
            variables_config: self.variables.configuration_records(),
            preprocessor_definitions: self.preprocessor_definitions.global_records(),
            preprocessor_definitions_config: self.preprocessor_definitions.configuration_records(),
            conan_project_include_cmake: project_include_path,
        };
        let project_include = ProjectIncludeData {
            vs_static_runtime: self.context.vs_static_runtime,
        };

        Ok(TemplateContexts {
            toolchain: RenderContext::new(to_object(&toolchain)?, self.platform.clone()),
            project_include: RenderContext::new(
                to_object(&project_include)?,
                self.platform.clone(),
            ),
        })
    }
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "render context must be an object, got {other}"
        ))),
    }
}
