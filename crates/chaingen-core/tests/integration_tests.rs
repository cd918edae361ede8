//! Integration tests for chaingen-core, driven through the public API with
//! small in-test port implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chaingen_core::{
    application::services::{
        template_selector::{FALLBACK_TOOLCHAIN_TEMPLATE, PROJECT_INCLUDE_TEMPLATE},
        toolchain_writer::{PROJECT_INCLUDE_FILE, TOOLCHAIN_FILE},
    },
    application::ApplicationError,
    domain::{DomainError, SharedLibs},
    prelude::*,
};

struct MapStore(BTreeMap<String, String>);

impl MapStore {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl TemplateStore for MapStore {
    fn get(&self, name: &str) -> ChaingenResult<Option<String>> {
        Ok(self.0.get(name).cloned())
    }

    fn list(&self) -> ChaingenResult<Vec<String>> {
        Ok(self.0.keys().cloned().collect())
    }
}

/// Replaces `@key@` with the JSON text of that context key.
struct AtRenderer;

impl TemplateRenderer for AtRenderer {
    fn render(&self, _name: &str, source: &str, context: &RenderContext) -> ChaingenResult<String> {
        let mut out = source.to_string();
        for (key, value) in context.data() {
            out = out.replace(&format!("@{key}@"), &value.to_string());
        }
        Ok(out)
    }
}

/// Keeps written files in order. Writes to a path ending in `fail_on` fail.
#[derive(Clone, Default)]
struct RecordingFs(Arc<Mutex<Vec<(PathBuf, String)>>>, Option<&'static str>);

impl RecordingFs {
    fn failing_on(file: &'static str) -> Self {
        Self(Arc::default(), Some(file))
    }
}

impl Filesystem for RecordingFs {
    fn create_dir_all(&self, _path: &Path) -> ChaingenResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ChaingenResult<()> {
        if self.1.is_some_and(|file| path.ends_with(file)) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No space left on device".into(),
            }
            .into());
        }
        self.0
            .lock()
            .unwrap()
            .push((path.to_path_buf(), content.to_string()));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> ChaingenResult<()> {
        self.0.lock().unwrap().retain(|(p, _)| p != path);
        Ok(())
    }

    fn exists(&self, _path: &Path) -> bool {
        true
    }
}

struct FixedCpus(usize);

impl CpuCount for FixedCpus {
    fn cpu_count(&self) -> usize {
        self.0
    }
}

fn service(store: MapStore, fs: RecordingFs) -> ToolchainService {
    ToolchainService::new(
        Box::new(store),
        Box::new(AtRenderer),
        Box::new(fs),
        Box::new(FixedCpus(4)),
    )
}

fn default_store() -> MapStore {
    MapStore::new(&[
        (FALLBACK_TOOLCHAIN_TEMPLATE, "shared=@shared_libs@ fpic=@fpic@"),
        (PROJECT_INCLUDE_TEMPLATE, "static=@vs_static_runtime@"),
    ])
}

#[test]
fn test_full_generation_workflow() {
    let fs = RecordingFs::default();
    let service = service(default_store(), fs.clone());

    let request = GenerationRequest::new(
        Settings::new().with("os", "Linux").with("compiler", "gcc"),
        Options::new().with("shared", false).with("fPIC", true),
    );
    let report = service
        .generate(&request, &Variables::new(), &Variables::new(), "/out")
        .unwrap();

    let written = fs.0.lock().unwrap().clone();
    assert_eq!(written.len(), 2);
    assert!(written[0].0.ends_with(PROJECT_INCLUDE_FILE));
    assert_eq!(written[0].1, "static=false");
    assert!(written[1].0.ends_with(TOOLCHAIN_FILE));
    assert_eq!(written[1].1, "shared=\"OFF\" fpic=true");
    assert_eq!(report.context.shared_libs, Some(SharedLibs::Off));
}

#[test]
fn test_generation_is_deterministic() {
    let request = GenerationRequest::new(
        Settings::new()
            .with("os", "Windows")
            .with("compiler", "Visual Studio")
            .with("compiler.version", "16")
            .with("compiler.runtime", "MTd"),
        Options::new(),
    );
    let mut vars = Variables::new();
    vars.for_configuration("debug").set("A", "1");
    vars.for_configuration("release").set("A", "2");

    let first = service(default_store(), RecordingFs::default())
        .preview(&request, &vars, &Variables::new(), "/out")
        .unwrap();
    let second = service(default_store(), RecordingFs::default())
        .preview(&request, &vars, &Variables::new(), "/out")
        .unwrap();

    assert_eq!(first.rendered, second.rendered);
    assert_eq!(first.rendered.project_include, "static=true");
}

#[test]
fn test_missing_templates_write_nothing() {
    let fs = RecordingFs::default();
    let store = MapStore::new(&[(PROJECT_INCLUDE_TEMPLATE, "")]);
    let request = GenerationRequest::new(Settings::new().with("os", "Linux"), Options::new());

    let err = service(store, fs.clone())
        .generate(&request, &Variables::new(), &Variables::new(), "/out")
        .unwrap_err();

    assert!(matches!(
        err,
        ChaingenError::Domain(DomainError::TemplateNotFound { .. })
    ));
    assert!(fs.0.lock().unwrap().is_empty());
}

#[test]
fn failed_toolchain_write_leaves_no_files() {
    let fs = RecordingFs::failing_on(TOOLCHAIN_FILE);
    let request = GenerationRequest::new(Settings::new().with("os", "Linux"), Options::new());

    let err = service(default_store(), fs.clone())
        .generate(&request, &Variables::new(), &Variables::new(), "/b")
        .unwrap_err();

    assert!(matches!(
        err,
        ChaingenError::Application(ApplicationError::FilesystemError { .. })
    ));
    assert!(fs.0.lock().unwrap().is_empty());
}
