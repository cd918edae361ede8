//! Stub renderer that ignores template syntax.

use chaingen_core::{
    application::ports::TemplateRenderer, domain::RenderContext, error::ChaingenResult,
};
use serde_json::Value;

/// Emits the template's first line, then one `key=value` line per context
/// key in sorted order. Useful for checking what a template would receive.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoRenderer;

impl EchoRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for EchoRenderer {
    fn render(&self, _name: &str, source: &str, context: &RenderContext) -> ChaingenResult<String> {
        let mut out = String::new();
        if let Some(first) = source.lines().next() {
            out.push_str(first);
            out.push('\n');
        }

        let mut entries: Vec<_> = context.data().iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (key, value) in entries {
            out.push_str(&format!("{key}={}\n", plain(value)));
        }
        Ok(out)
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaingen_core::domain::PlatformHelper;
    use serde_json::{Map, json};

    #[test]
    fn echoes_sorted_keys() {
        let mut data = Map::new();
        data.insert("b".into(), json!("two"));
        data.insert("a".into(), json!(null));
        data.insert("c".into(), json!(true));
        let ctx = RenderContext::new(data, PlatformHelper::default());

        let out = EchoRenderer::new()
            .render("t", "# header {{ ignored }}\nbody", &ctx)
            .unwrap();
        assert_eq!(out, "# header {{ ignored }}\na=\nb=two\nc=true\n");
    }
}
