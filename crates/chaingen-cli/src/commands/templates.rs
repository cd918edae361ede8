//! Implementation of the `chaingen templates` command.

use std::sync::Arc;

use serde_json::json;

use chaingen_adapters::{LocalFilesystem, MiniJinjaRenderer, NumCpus};
use chaingen_core::application::{TemplateInfo, ToolchainService};

use crate::{
    cli::TemplatesArgs, commands::open_store, config::AppConfig, error::CliResult,
    output::OutputManager,
};

pub fn execute(args: TemplatesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = args.template_dir.as_deref().or(config.templates.dir.as_deref());
    let store = open_store(dir)?;
    let service = ToolchainService::new(
        Box::new(Arc::clone(&store)),
        Box::new(MiniJinjaRenderer::new(store)),
        Box::new(LocalFilesystem::new()),
        Box::new(NumCpus),
    );

    let templates = service.list_templates(args.os.as_deref())?;

    if output.is_json() {
        let entries: Vec<_> = templates
            .iter()
            .map(|t| json!({ "name": t.name, "selected": t.selected }))
            .collect();
        output.json(&serde_json::Value::Array(entries))?;
        return Ok(());
    }

    match dir {
        Some(dir) => output.header(&format!("Templates in {}:", dir.display()))?,
        None => output.header("Built-in templates:")?,
    }
    for template in &templates {
        output.data(&line(template, args.os.as_deref()))?;
    }
    Ok(())
}

fn line(template: &TemplateInfo, os: Option<&str>) -> String {
    match (template.selected, os) {
        (true, Some(os)) => format!("* {}  (toolchain for {os})", template.name),
        (true, None) => format!("* {}  (default toolchain)", template.name),
        (false, _) => format!("  {}", template.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_template_is_marked() {
        let selected = TemplateInfo {
            name: "android.toolchain.cmake.tmpl".into(),
            selected: true,
        };
        let other = TemplateInfo {
            name: "blocks/header.cmake".into(),
            selected: false,
        };
        assert_eq!(
            line(&selected, Some("Android")),
            "* android.toolchain.cmake.tmpl  (toolchain for Android)"
        );
        assert_eq!(line(&other, Some("Android")), "  blocks/header.cmake");
    }
}
