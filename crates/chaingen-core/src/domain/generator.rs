//! CMake generator identity: default generator, platform, toolset and
//! multi-configuration detection.

use crate::domain::settings::Settings;
use crate::domain::value_objects::{CompilerFamily, is_windows};

/// Visual Studio major version → generator name.
pub static VISUAL_STUDIO_GENERATORS: &[(&str, &str)] = &[
    ("8", "Visual Studio 8 2005"),
    ("9", "Visual Studio 9 2008"),
    ("10", "Visual Studio 10 2010"),
    ("11", "Visual Studio 11 2012"),
    ("12", "Visual Studio 12 2013"),
    ("14", "Visual Studio 14 2015"),
    ("15", "Visual Studio 15 2017"),
    ("16", "Visual Studio 16 2019"),
    ("17", "Visual Studio 17 2022"),
];

/// Target architecture → `CMAKE_GENERATOR_PLATFORM` for Visual Studio.
pub static VISUAL_STUDIO_PLATFORMS: &[(&str, &str)] = &[
    ("x86", "Win32"),
    ("x86_64", "x64"),
    ("armv7", "ARM"),
    ("armv8", "ARM64"),
];

/// Generator names that carry every build configuration in one project.
const MULTI_CONFIG_MARKERS: &[&str] = &["Visual", "Xcode", "Multi-Config"];

fn compiler(settings: &Settings) -> Option<CompilerFamily> {
    settings.get("compiler").and_then(|c| c.parse().ok())
}

/// Generator to use when the caller did not pick one.
///
/// `None` only for a Visual Studio version with no known generator.
pub fn default_generator(settings: &Settings) -> Option<String> {
    let Some(compiler) = compiler(settings) else {
        return Some("Unix Makefiles".into());
    };

    if compiler == CompilerFamily::VisualStudio {
        let version = settings.get("compiler.version")?;
        let major = version.split('.').next().unwrap_or(version);
        return VISUAL_STUDIO_GENERATORS
            .iter()
            .find(|(v, _)| *v == major)
            .map(|(_, name)| name.to_string());
    }

    // Host OS decides the make flavour; fall back to the target OS.
    let os = settings
        .get("os_build")
        .or_else(|| settings.get("os"))
        .unwrap_or_default();
    if is_windows(os) {
        Some("MinGW Makefiles".into())
    } else {
        Some("Unix Makefiles".into())
    }
}

/// `CMAKE_GENERATOR_PLATFORM` for Visual Studio generators.
pub fn generator_platform(settings: &Settings, generator: Option<&str>) -> Option<String> {
    let generator = generator?;
    if !generator.contains("Visual") || compiler(settings)? != CompilerFamily::VisualStudio {
        return None;
    }
    let arch = settings.get("arch")?;
    VISUAL_STUDIO_PLATFORMS
        .iter()
        .find(|(a, _)| *a == arch)
        .map(|(_, platform)| platform.to_string())
}

/// `CMAKE_GENERATOR_TOOLSET` from `compiler.toolset` for Visual Studio.
pub fn toolset(settings: &Settings, generator: Option<&str>) -> Option<String> {
    if !generator.is_some_and(|g| g.contains("Visual")) {
        return None;
    }
    if compiler(settings)? != CompilerFamily::VisualStudio {
        return None;
    }
    settings.get("compiler.toolset").map(str::to_string)
}

/// Whether `generator` selects the configuration at build time.
pub fn is_multi_configuration(generator: Option<&str>) -> bool {
    generator.is_some_and(|g| MULTI_CONFIG_MARKERS.iter().any(|m| g.contains(m)))
}

/// Whether `generator` accepts the `/MP` parallel-compile flag.
pub fn supports_parallel_flag(generator: Option<&str>) -> bool {
    generator.is_some_and(|g| g.contains("Visual Studio"))
}
