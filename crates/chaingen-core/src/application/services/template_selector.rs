//! Template selection by target OS.
//!
//! The toolchain template is looked up as `<os lowercase>.toolchain.cmake.tmpl`
//! and falls back to [`FALLBACK_TOOLCHAIN_TEMPLATE`]. Android targets also get
//! the NDK's own toolchain file chain-included.

use tracing::debug;

use crate::{
    application::ports::TemplateStore,
    domain::{Advisory, DomainError, Settings, value_objects::is_android},
    error::ChaingenResult,
};

pub const TOOLCHAIN_TEMPLATE_SUFFIX: &str = ".toolchain.cmake.tmpl";
pub const FALLBACK_TOOLCHAIN_TEMPLATE: &str = "generic.toolchain.cmake.tmpl";
pub const PROJECT_INCLUDE_TEMPLATE: &str = "project_include.cmake.tmpl";

/// Location of the NDK's toolchain file under its root.
const NDK_TOOLCHAIN_FILE: &str = "build/cmake/android.toolchain.cmake";

/// A template name with its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTemplate {
    pub name: String,
    pub source: String,
}

/// The two templates of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePair {
    pub toolchain: SelectedTemplate,
    pub project_include: SelectedTemplate,
}

/// Outcome of template selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSelection {
    pub templates: TemplatePair,
    /// Toolchain file to include before ours (Android NDK).
    pub base_toolchain: Option<String>,
    pub advisories: Vec<Advisory>,
}

/// Dedicated toolchain template name for `os`.
pub fn toolchain_template_name(os: &str) -> String {
    format!("{}{}", os.to_lowercase(), TOOLCHAIN_TEMPLATE_SUFFIX)
}

/// `<ndk>/build/cmake/android.toolchain.cmake` with forward slashes.
pub fn android_base_toolchain(ndk: &str) -> String {
    let root = ndk.replace('\\', "/");
    format!("{}/{}", root.trim_end_matches('/'), NDK_TOOLCHAIN_FILE)
}

/// Picks templates out of a [`TemplateStore`].
pub struct TemplateSelector<'a> {
    store: &'a dyn TemplateStore,
}

impl<'a> TemplateSelector<'a> {
    pub fn new(store: &'a dyn TemplateStore) -> Self {
        Self { store }
    }

    /// Select both templates for the target described by `settings`.
    pub fn select(
        &self,
        settings: &Settings,
        android_ndk: Option<&str>,
    ) -> ChaingenResult<TemplateSelection> {
        let os = settings.get("os");
        let toolchain = self.toolchain_template(os)?;

        let project_include = self
            .store
            .get(PROJECT_INCLUDE_TEMPLATE)?
            .map(|source| SelectedTemplate {
                name: PROJECT_INCLUDE_TEMPLATE.to_string(),
                source,
            })
            .ok_or_else(|| DomainError::ProjectIncludeTemplateNotFound {
                name: PROJECT_INCLUDE_TEMPLATE.to_string(),
            })?;

        let mut advisories = Vec::new();
        let base_toolchain = if os.is_some_and(is_android) {
            match android_ndk {
                Some(ndk) => Some(android_base_toolchain(ndk)),
                None => {
                    advisories.push(Advisory::AndroidNdkMissing);
                    None
                }
            }
        } else {
            None
        };

        Ok(TemplateSelection {
            templates: TemplatePair {
                toolchain,
                project_include,
            },
            base_toolchain,
            advisories,
        })
    }

    /// Name of the toolchain template that [`select`](Self::select) would use
    /// for `os`, without loading it.
    pub fn toolchain_template_name(&self, os: Option<&str>) -> ChaingenResult<String> {
        self.toolchain_template(os).map(|t| t.name)
    }

    fn toolchain_template(&self, os: Option<&str>) -> ChaingenResult<SelectedTemplate> {
        let dedicated = os.map(toolchain_template_name);

        if let Some(name) = &dedicated {
            if let Some(source) = self.store.get(name)? {
                debug!(template = %name, "Using dedicated toolchain template");
                return Ok(SelectedTemplate {
                    name: name.clone(),
                    source,
                });
            }
        }

        match self.store.get(FALLBACK_TOOLCHAIN_TEMPLATE)? {
            Some(source) => {
                debug!(template = FALLBACK_TOOLCHAIN_TEMPLATE, "Using generic toolchain template");
                Ok(SelectedTemplate {
                    name: FALLBACK_TOOLCHAIN_TEMPLATE.to_string(),
                    source,
                })
            }
            None => Err(DomainError::TemplateNotFound {
                os: os.unwrap_or_default().to_string(),
                dedicated: dedicated.unwrap_or_default(),
                fallback: FALLBACK_TOOLCHAIN_TEMPLATE.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockTemplateStore;
    use crate::error::ChaingenError;

    fn store_with(names: &'static [&'static str]) -> MockTemplateStore {
        let mut store = MockTemplateStore::new();
        store.expect_get().returning(move |name| {
            Ok(names
                .contains(&name)
                .then(|| format!("source of {name}")))
        });
        store
    }

    #[test]
    fn dedicated_template_wins() {
        let store = store_with(&[
            "android.toolchain.cmake.tmpl",
            FALLBACK_TOOLCHAIN_TEMPLATE,
            PROJECT_INCLUDE_TEMPLATE,
        ]);
        let settings = Settings::new().with("os", "Android");
        let selection = TemplateSelector::new(&store)
            .select(&settings, Some("/opt/ndk"))
            .unwrap();

        assert_eq!(selection.templates.toolchain.name, "android.toolchain.cmake.tmpl");
        assert_eq!(
            selection.templates.toolchain.source,
            "source of android.toolchain.cmake.tmpl"
        );
        assert_eq!(selection.templates.project_include.name, PROJECT_INCLUDE_TEMPLATE);
        assert_eq!(
            selection.base_toolchain.as_deref(),
            Some("/opt/ndk/build/cmake/android.toolchain.cmake")
        );
        assert!(selection.advisories.is_empty());
    }

    #[test]
    fn falls_back_to_generic() {
        let store = store_with(&[FALLBACK_TOOLCHAIN_TEMPLATE, PROJECT_INCLUDE_TEMPLATE]);
        let settings = Settings::new().with("os", "Linux");
        let selection = TemplateSelector::new(&store).select(&settings, None).unwrap();

        assert_eq!(selection.templates.toolchain.name, FALLBACK_TOOLCHAIN_TEMPLATE);
        assert_eq!(selection.base_toolchain, None);
    }

    #[test]
    fn no_os_uses_generic() {
        let store = store_with(&[FALLBACK_TOOLCHAIN_TEMPLATE, PROJECT_INCLUDE_TEMPLATE]);
        let name = TemplateSelector::new(&store)
            .toolchain_template_name(None)
            .unwrap();
        assert_eq!(name, FALLBACK_TOOLCHAIN_TEMPLATE);
    }

    #[test]
    fn missing_templates_are_fatal() {
        let store = store_with(&[PROJECT_INCLUDE_TEMPLATE]);
        let settings = Settings::new().with("os", "Linux");
        let err = TemplateSelector::new(&store).select(&settings, None).unwrap_err();

        assert!(matches!(
            err,
            ChaingenError::Domain(DomainError::TemplateNotFound { ref dedicated, .. })
                if dedicated == "linux.toolchain.cmake.tmpl"
        ));
    }

    #[test]
    fn missing_project_include_is_fatal() {
        let store = store_with(&[FALLBACK_TOOLCHAIN_TEMPLATE]);
        let err = TemplateSelector::new(&store)
            .select(&Settings::new(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ChaingenError::Domain(DomainError::ProjectIncludeTemplateNotFound { .. })
        ));
    }

    #[test]
    fn android_without_ndk_is_advised() {
        let store = store_with(&[FALLBACK_TOOLCHAIN_TEMPLATE, PROJECT_INCLUDE_TEMPLATE]);
        let settings = Settings::new().with("os", "Android");
        let selection = TemplateSelector::new(&store).select(&settings, None).unwrap();

        assert_eq!(selection.base_toolchain, None);
        assert_eq!(selection.advisories, vec![Advisory::AndroidNdkMissing]);
    }

    #[test]
    fn ndk_path_is_normalized() {
        assert_eq!(
            android_base_toolchain("C:\\android\\ndk\\"),
            "C:/android/ndk/build/cmake/android.toolchain.cmake"
        );
    }

    #[test]
    fn template_name_is_lowercased() {
        assert_eq!(toolchain_template_name("Macos"), "macos.toolchain.cmake.tmpl");
    }
}
