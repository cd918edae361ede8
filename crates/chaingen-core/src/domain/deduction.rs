//! Toolchain deduction engine.
//!
//! Every derived value of the toolchain file is computed here from a
//! [`GenerationRequest`], by small pure functions that can be checked one by
//! one. [`deduce`] runs them all and collects the advisories raised on the way.
//!
//! Nothing in this module fails: unknown compilers, missing settings and
//! contradicting options all resolve to "not applicable" (`None`), possibly
//! with an [`Advisory`] explaining why.

use std::fmt;

use serde::Serialize;

use crate::domain::flags;
use crate::domain::generator;
use crate::domain::settings::{Options, Settings};
use crate::domain::value_objects::{
    CompilerFamily, CxxExtensions, SharedLibs, is_android, is_macos, is_windows,
};

/// Default for both find/module search paths: where find-package
/// generators drop their files.
pub const CMAKE_BINARY_DIR: &str = "${CMAKE_BINARY_DIR}";

// ── Inputs ───────────────────────────────────────────────────────────────────

/// Everything a caller supplies for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Target (host) settings.
    pub settings: Settings,
    /// Package options.
    pub options: Options,
    /// Settings of the machine running the build, when it differs from the
    /// target.
    pub build_settings: Option<Settings>,
    /// Caller-chosen CMake generator; deduced from settings when `None`.
    pub generator: Option<String>,
    pub generator_platform: Option<String>,
    pub toolset: Option<String>,
    /// Caller-chosen build type; wins over the `build_type` setting.
    pub build_type: Option<String>,
    /// Request the parallel-compile flag where the generator supports it.
    pub parallel: bool,
    pub install_prefix: Option<String>,
    /// Root of an Android NDK installation.
    pub android_ndk: Option<String>,
}

impl GenerationRequest {
    pub fn new(settings: Settings, options: Options) -> Self {
        Self {
            settings,
            options,
            parallel: true,
            ..Self::default()
        }
    }
}

// ── Advisories ───────────────────────────────────────────────────────────────

/// A non-fatal mismatch resolved during deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Advisory {
    /// `fPIC` is meaningless for Windows targets.
    FpicIgnoredOnWindows,
    /// `fPIC` is implied by `shared=True`.
    FpicIgnoredForShared,
    /// Android target but no NDK to chain-include.
    AndroidNdkMissing,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FpicIgnoredOnWindows => "Toolchain: Ignoring fPIC option defined for Windows",
            Self::FpicIgnoredForShared => {
                "Toolchain: Ignoring fPIC option defined for a shared library"
            }
            Self::AndroidNdkMissing => {
                "Toolchain: No Android NDK configured, the NDK toolchain file will not be included"
            }
        })
    }
}

// ── Output ───────────────────────────────────────────────────────────────────

/// `CMAKE_SYSTEM_*` values for a cross build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossBuild {
    pub system_name: String,
    pub system_version: Option<String>,
    pub system_processor: Option<String>,
}

/// The result of one deduction run. Field names are the template context
/// keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeducedToolchainContext {
    pub architecture: Option<String>,
    pub fpic: Option<bool>,
    pub vs_static_runtime: bool,
    pub set_libcxx: Option<String>,
    pub glibcxx: Option<String>,
    pub cppstd: Option<String>,
    pub cppstd_extensions: Option<CxxExtensions>,
    pub parallel: Option<String>,
    pub shared_libs: Option<SharedLibs>,
    pub generator: Option<String>,
    pub generator_platform: Option<String>,
    pub toolset: Option<String>,
    pub build_type: Option<String>,
    pub install_prefix: Option<String>,
    pub base_toolchain: Option<String>,
    pub skip_rpath: bool,
    pub cross_build: Option<CrossBuild>,
    pub cmake_prefix_path: String,
    pub cmake_module_path: String,
}

impl DeducedToolchainContext {
    /// Attach the chain-included toolchain file chosen at template selection.
    pub fn with_base_toolchain(self, base_toolchain: Option<String>) -> Self {
        Self {
            base_toolchain,
            ..self
        }
    }
}

/// Deduced context plus the advisories raised while computing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    pub context: DeducedToolchainContext,
    pub advisories: Vec<Advisory>,
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Run every deduction for `request`.
///
/// `cpu_count` is only called when a parallel-capable generator is selected.
pub fn deduce(request: &GenerationRequest, cpu_count: impl FnOnce() -> usize) -> Deduction {
    let settings = &request.settings;
    let mut advisories = Vec::new();

    let (fpic, fpic_advisory) = deduce_fpic(settings, &request.options);
    advisories.extend(fpic_advisory);

    let generator = request
        .generator
        .clone()
        .or_else(|| generator::default_generator(settings));
    let generator_ref = generator.as_deref();

    let generator_platform = request
        .generator_platform
        .clone()
        .or_else(|| generator::generator_platform(settings, generator_ref));
    let toolset = request
        .toolset
        .clone()
        .or_else(|| generator::toolset(settings, generator_ref));

    let (set_libcxx, glibcxx) = deduce_libcxx(settings);
    let (cppstd, cppstd_extensions) = deduce_cppstd(settings);

    let context = DeducedToolchainContext {
        architecture: flags::architecture_flag(settings),
        fpic,
        vs_static_runtime: deduce_vs_static_runtime(settings),
        set_libcxx,
        glibcxx,
        cppstd,
        cppstd_extensions,
        parallel: deduce_parallel(request.parallel, generator_ref, cpu_count),
        shared_libs: deduce_shared_libs(&request.options),
        build_type: deduce_build_type(request.build_type.as_deref(), settings, generator_ref),
        generator_platform,
        toolset,
        install_prefix: request.install_prefix.as_deref().map(to_forward_slashes),
        base_toolchain: None,
        skip_rpath: deduce_skip_rpath(settings),
        cross_build: deduce_cross_build(settings, request.build_settings.as_ref()),
        cmake_prefix_path: CMAKE_BINARY_DIR.into(),
        cmake_module_path: CMAKE_BINARY_DIR.into(),
        generator,
    };

    Deduction {
        context,
        advisories,
    }
}

/// Position-independent code.
///
/// `None` when the option is absent, when the target is Windows, or when
/// building shared; otherwise the option value. An explicit `false` is kept
/// so the toolchain can turn the CMake default off.
pub fn deduce_fpic(settings: &Settings, options: &Options) -> (Option<bool>, Option<Advisory>) {
    let Some(fpic) = options.get("fPIC") else {
        return (None, None);
    };
    if settings.get("os").is_some_and(is_windows) {
        return (None, Some(Advisory::FpicIgnoredOnWindows));
    }
    if options.get("shared") == Some(true) {
        return (None, Some(Advisory::FpicIgnoredForShared));
    }
    (Some(fpic), None)
}

/// Static MSVC runtime (`MT`, `MTd`).
pub fn deduce_vs_static_runtime(settings: &Settings) -> bool {
    let is_msvc = settings
        .get("compiler")
        .is_some_and(|c| c.parse::<CompilerFamily>().ok() == Some(CompilerFamily::VisualStudio));
    is_msvc
        && settings
            .get("compiler.runtime")
            .is_some_and(|runtime| runtime.contains("MT"))
}

/// Standard library selection flag and GCC ABI tag.
pub fn deduce_libcxx(settings: &Settings) -> (Option<String>, Option<String>) {
    let Some(libcxx) = settings.get("compiler.libcxx") else {
        return (None, None);
    };
    let Some(compiler) = settings
        .get("compiler")
        .and_then(|c| c.parse::<CompilerFamily>().ok())
    else {
        return (None, None);
    };
    (
        flags::libcxx_flag(&compiler, libcxx),
        flags::glibcxx_abi(&compiler, libcxx).map(str::to_string),
    )
}

/// C++ standard and GNU extensions from `compiler.cppstd`.
pub fn deduce_cppstd(settings: &Settings) -> (Option<String>, Option<CxxExtensions>) {
    match settings.get("compiler.cppstd") {
        None => (None, None),
        Some(value) => match value.strip_prefix("gnu") {
            Some(standard) => (Some(standard.to_string()), Some(CxxExtensions::On)),
            None => (Some(value.to_string()), Some(CxxExtensions::Off)),
        },
    }
}

/// `/MP<jobs>` for Visual Studio generators when parallel builds are on.
pub fn deduce_parallel(
    requested: bool,
    generator: Option<&str>,
    cpu_count: impl FnOnce() -> usize,
) -> Option<String> {
    if requested && generator::supports_parallel_flag(generator) {
        Some(format!("/MP{}", cpu_count()))
    } else {
        None
    }
}

/// `BUILD_SHARED_LIBS` from the `shared` option, if it exists.
pub fn deduce_shared_libs(options: &Options) -> Option<SharedLibs> {
    options.get("shared").map(SharedLibs::from)
}

/// `CMAKE_BUILD_TYPE`, suppressed for multi-configuration generators.
pub fn deduce_build_type(
    requested: Option<&str>,
    settings: &Settings,
    generator: Option<&str>,
) -> Option<String> {
    if generator::is_multi_configuration(generator) {
        return None;
    }
    requested
        .or_else(|| settings.get("build_type"))
        .map(str::to_string)
}

/// Apple desktop builds skip RPATH handling.
pub fn deduce_skip_rpath(settings: &Settings) -> bool {
    settings.get("os").is_some_and(is_macos)
}

/// `CMAKE_SYSTEM_*` when the build machine differs from the target.
pub fn deduce_cross_build(settings: &Settings, build: Option<&Settings>) -> Option<CrossBuild> {
    let build = build?;
    let os = settings.get("os")?;
    let build_os = build.get("os")?;

    let same_os = os == build_os;
    let same_arch = settings.get("arch") == build.get("arch");
    if same_os && same_arch {
        return None;
    }

    let system_version = if is_android(os) {
        settings.get("os.api_level")
    } else {
        settings.get("os.version")
    };

    Some(CrossBuild {
        system_name: cmake_system_name(os).to_string(),
        system_version: system_version.map(str::to_string),
        system_processor: settings.get("arch").map(str::to_string),
    })
}

/// CMake's name for an OS setting value.
pub fn cmake_system_name(os: &str) -> &str {
    match os {
        "Macos" => "Darwin",
        "Neutrino" => "QNX",
        other => other,
    }
}

fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux() -> Settings {
        Settings::new()
            .with("os", "Linux")
            .with("arch", "x86_64")
            .with("compiler", "gcc")
            .with("compiler.version", "9")
            .with("build_type", "Release")
    }

    fn no_cpus() -> usize {
        panic!("cpu count must not be queried")
    }

    // ── fPIC ─────────────────────────────────────────────────────────────────

    #[test]
    fn fpic_absent_is_not_applicable() {
        assert_eq!(deduce_fpic(&linux(), &Options::new()), (None, None));
    }

    #[test]
    fn fpic_ignored_on_windows() {
        let settings = Settings::new().with("os", "Windows");
        let options = Options::new().with("fPIC", true);
        assert_eq!(
            deduce_fpic(&settings, &options),
            (None, Some(Advisory::FpicIgnoredOnWindows))
        );
    }

    #[test]
    fn fpic_ignored_for_shared() {
        let options = Options::new().with("fPIC", true).with("shared", true);
        assert_eq!(
            deduce_fpic(&linux(), &options),
            (None, Some(Advisory::FpicIgnoredForShared))
        );
    }

    #[test]
    fn fpic_kept_for_static() {
        let options = Options::new().with("fPIC", true).with("shared", false);
        assert_eq!(deduce_fpic(&linux(), &options), (Some(true), None));
    }

    #[test]
    fn fpic_explicit_false_is_kept() {
        let options = Options::new().with("fPIC", false);
        assert_eq!(deduce_fpic(&linux(), &options), (Some(false), None));
    }

    // ── runtime / libcxx / cppstd ───────────────────────────────────────────

    #[test]
    fn static_runtime_only_for_msvc_mt() {
        let vs = Settings::new().with("compiler", "Visual Studio");
        assert!(deduce_vs_static_runtime(&vs.clone().with("compiler.runtime", "MT")));
        assert!(deduce_vs_static_runtime(&vs.clone().with("compiler.runtime", "MTd")));
        assert!(!deduce_vs_static_runtime(&vs.clone().with("compiler.runtime", "MD")));
        assert!(!deduce_vs_static_runtime(&vs));
        assert!(!deduce_vs_static_runtime(
            &linux().with("compiler.runtime", "MT")
        ));
        assert!(!deduce_vs_static_runtime(
            &Settings::new()
                .with("compiler", "msvc")
                .with("compiler.runtime", "static")
        ));
    }

    #[test]
    fn libcxx_empty_means_no_flags() {
        assert_eq!(deduce_libcxx(&linux()), (None, None));
    }

    #[test]
    fn libcxx_gcc_abi_tag() {
        let settings = linux().with("compiler.libcxx", "libstdc++11");
        assert_eq!(deduce_libcxx(&settings), (None, Some("1".into())));
    }

    #[test]
    fn libcxx_clang_stdlib_flag() {
        let settings = linux()
            .with("compiler", "clang")
            .with("compiler.libcxx", "libc++");
        assert_eq!(
            deduce_libcxx(&settings),
            (Some("-stdlib=libc++".into()), None)
        );
    }

    #[test]
    fn cppstd_gnu_prefix_enables_extensions() {
        let settings = linux().with("compiler.cppstd", "gnu17");
        assert_eq!(
            deduce_cppstd(&settings),
            (Some("17".into()), Some(CxxExtensions::On))
        );
    }

    #[test]
    fn cppstd_plain_disables_extensions() {
        let settings = linux().with("compiler.cppstd", "17");
        assert_eq!(
            deduce_cppstd(&settings),
            (Some("17".into()), Some(CxxExtensions::Off))
        );
    }

    #[test]
    fn cppstd_absent() {
        assert_eq!(deduce_cppstd(&linux()), (None, None));
    }

    // ── generator-dependent ─────────────────────────────────────────────────

    #[test]
    fn parallel_embeds_cpu_count_for_visual_studio() {
        assert_eq!(
            deduce_parallel(true, Some("Visual Studio 16 2019"), || 8).as_deref(),
            Some("/MP8")
        );
        assert_eq!(deduce_parallel(false, Some("Visual Studio 16 2019"), no_cpus), None);
        assert_eq!(deduce_parallel(true, Some("Ninja"), no_cpus), None);
    }

    #[test]
    fn build_type_prefers_request() {
        assert_eq!(
            deduce_build_type(Some("Debug"), &linux(), Some("Ninja")).as_deref(),
            Some("Debug")
        );
        assert_eq!(
            deduce_build_type(None, &linux(), Some("Ninja")).as_deref(),
            Some("Release")
        );
    }

    #[test]
    fn build_type_suppressed_for_multi_config() {
        assert_eq!(
            deduce_build_type(Some("Debug"), &linux(), Some("Ninja Multi-Config")),
            None
        );
        assert_eq!(deduce_build_type(None, &linux(), Some("Xcode")), None);
    }

    #[test]
    fn shared_libs_tri_state() {
        assert_eq!(
            deduce_shared_libs(&Options::new().with("shared", true)),
            Some(SharedLibs::On)
        );
        assert_eq!(
            deduce_shared_libs(&Options::new().with("shared", false)),
            Some(SharedLibs::Off)
        );
        assert_eq!(deduce_shared_libs(&Options::new()), None);
    }

    #[test]
    fn skip_rpath_only_on_macos() {
        assert!(deduce_skip_rpath(&Settings::new().with("os", "Macos")));
        assert!(!deduce_skip_rpath(&linux()));
        assert!(!deduce_skip_rpath(&Settings::new()));
    }

    // ── cross building ──────────────────────────────────────────────────────

    #[test]
    fn cross_build_android_from_macos() {
        let target = Settings::new()
            .with("os", "Android")
            .with("os.api_level", "23")
            .with("arch", "x86_64");
        let build = Settings::new().with("os", "Macos").with("arch", "x86_64");

        assert_eq!(
            deduce_cross_build(&target, Some(&build)),
            Some(CrossBuild {
                system_name: "Android".into(),
                system_version: Some("23".into()),
                system_processor: Some("x86_64".into()),
            })
        );
    }

    #[test]
    fn native_build_is_not_cross() {
        assert_eq!(deduce_cross_build(&linux(), Some(&linux())), None);
        assert_eq!(deduce_cross_build(&linux(), None), None);
    }

    #[test]
    fn cross_build_maps_system_name() {
        let target = Settings::new()
            .with("os", "Macos")
            .with("os.version", "10.15")
            .with("arch", "armv8");
        let build = Settings::new().with("os", "Macos").with("arch", "x86_64");
        let cross = deduce_cross_build(&target, Some(&build)).unwrap();
        assert_eq!(cross.system_name, "Darwin");
        assert_eq!(cross.system_version.as_deref(), Some("10.15"));
    }

    // ── full run ────────────────────────────────────────────────────────────

    #[test]
    fn deduce_is_reproducible() {
        let request = GenerationRequest::new(
            linux().with("compiler.cppstd", "gnu14"),
            Options::new().with("fPIC", true).with("shared", false),
        );
        let a = deduce(&request, || 4);
        let b = deduce(&request, || 4);
        assert_eq!(a, b);
        assert_eq!(a.context.generator.as_deref(), Some("Unix Makefiles"));
        assert_eq!(a.context.architecture.as_deref(), Some("-m64"));
        assert_eq!(a.context.fpic, Some(true));
        assert_eq!(a.context.shared_libs, Some(SharedLibs::Off));
        assert_eq!(a.context.build_type.as_deref(), Some("Release"));
        assert!(a.advisories.is_empty());
    }

    #[test]
    fn deduce_visual_studio() {
        let settings = Settings::new()
            .with("os", "Windows")
            .with("arch", "x86_64")
            .with("compiler", "Visual Studio")
            .with("compiler.version", "16")
            .with("compiler.runtime", "MT")
            .with("build_type", "Release");
        let request = GenerationRequest::new(settings, Options::new().with("fPIC", true));

        let deduction = deduce(&request, || 12);
        let ctx = deduction.context;
        assert_eq!(ctx.generator.as_deref(), Some("Visual Studio 16 2019"));
        assert_eq!(ctx.generator_platform.as_deref(), Some("x64"));
        assert_eq!(ctx.parallel.as_deref(), Some("/MP12"));
        assert_eq!(ctx.build_type, None);
        assert!(ctx.vs_static_runtime);
        assert_eq!(ctx.fpic, None);
        assert_eq!(deduction.advisories, vec![Advisory::FpicIgnoredOnWindows]);
    }

    #[test]
    fn caller_values_override_deduced_ones() {
        let mut request = GenerationRequest::new(linux(), Options::new());
        request.generator = Some("Ninja".into());
        request.build_type = Some("Debug".into());
        request.install_prefix = Some("C:\\pkg\\install".into());

        let ctx = deduce(&request, no_cpus).context;
        assert_eq!(ctx.generator.as_deref(), Some("Ninja"));
        assert_eq!(ctx.build_type.as_deref(), Some("Debug"));
        assert_eq!(ctx.install_prefix.as_deref(), Some("C:/pkg/install"));
    }

    #[test]
    fn serializes_with_template_keys() {
        let request = GenerationRequest::new(
            linux().with("compiler.cppstd", "17"),
            Options::new().with("shared", true),
        );
        let value = serde_json::to_value(deduce(&request, no_cpus).context).unwrap();
        assert_eq!(value["cppstd"], "17");
        assert_eq!(value["cppstd_extensions"], "OFF");
        assert_eq!(value["shared_libs"], "ON");
        assert_eq!(value["fpic"], serde_json::Value::Null);
        assert_eq!(value["cmake_prefix_path"], "${CMAKE_BINARY_DIR}");
    }
}
