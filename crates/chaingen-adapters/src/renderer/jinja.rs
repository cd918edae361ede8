//! Jinja-compatible renderer backed by `minijinja`.
//!
//! `{% include %}` is resolved through the same [`TemplateStore`] the
//! templates were selected from, and the platform helper is exposed as the
//! callable object `platform`:
//!
//! ```jinja
//! set(CMAKE_ANDROID_ARCH_ABI {{ platform.android_abi(platform.settings("arch")) }})
//! ```
//!
//! Values placed into CMake arguments go through the `cmake_quote` filter, or
//! `cmake_genex` inside a generator expression.

use std::{collections::BTreeMap, sync::Arc};

use minijinja::{
    AutoEscape, Environment, Error, ErrorKind, State, Value,
    value::{Object, ObjectRepr, from_args},
};
use tracing::{debug, instrument};

use chaingen_core::{
    application::{
        ApplicationError,
        ports::{TemplateRenderer, TemplateStore},
    },
    domain::{PlatformHelper, RenderContext, escape},
    error::ChaingenResult,
};

/// Name under which templates see the platform helper.
pub const PLATFORM_HELPER: &str = "platform";

/// Renderer for Jinja templates.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Create a renderer that loads included templates from `store`.
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("cmake_quote", |value: &str| {
            escape::quoted_argument(value).into_owned()
        });
        env.add_filter("cmake_genex", escape::generator_expression_argument);
        env.set_loader(move |name| {
            store.get(name).map_err(|e| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not load template '{name}'"),
                )
                .with_source(e)
            })
        });
        Self { env }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    #[instrument(skip(self, source, context))]
    fn render(&self, name: &str, source: &str, context: &RenderContext) -> ChaingenResult<String> {
        let mut vars: BTreeMap<String, Value> = context
            .data()
            .iter()
            .map(|(key, value)| (key.clone(), Value::from_serialize(value)))
            .collect();
        vars.insert(
            PLATFORM_HELPER.to_string(),
            Value::from_object(PlatformObject(context.platform().clone())),
        );

        let rendered = self
            .env
            .render_named_str(name, source, vars)
            .map_err(|e| ApplicationError::RenderingFailed {
                template: name.to_string(),
                reason: e.to_string(),
            })?;
        debug!(bytes = rendered.len(), "rendered");
        Ok(rendered)
    }
}

/// [`PlatformHelper`] as a template object.
#[derive(Debug)]
struct PlatformObject(PlatformHelper);

impl Object for PlatformObject {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "settings" => {
                let (name,): (String,) = from_args(args)?;
                Ok(self
                    .0
                    .settings(&name)
                    .map_or_else(|| Value::from(()), Value::from))
            }
            "android_abi" => {
                let (arch,): (String,) = from_args(args)?;
                Ok(Value::from(self.0.android_abi(&arch)))
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("{PLATFORM_HELPER} has no method named {method}"),
            )),
        }
    }
}
