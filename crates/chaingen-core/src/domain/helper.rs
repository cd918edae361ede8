//! Read-only helper handed to templates.
//!
//! Templates get settings lookups and a couple of platform derivations
//! through this facade instead of the whole settings model.

use crate::domain::settings::Settings;

/// Architecture → Android ABI name. Anything not listed maps to itself.
pub static ANDROID_ABIS: &[(&str, &str)] = &[
    ("armv5el", "armeabi"),
    ("armv5hf", "armeabi"),
    ("armv5", "armeabi"),
    ("armv6", "armeabi-v6"),
    ("armv7", "armeabi-v7a"),
    ("armv7hf", "armeabi-v7a"),
    ("armv8", "arm64-v8a"),
];

/// Template-facing view of the target settings.
#[derive(Debug, Clone, Default)]
pub struct PlatformHelper {
    settings: Settings,
}

impl PlatformHelper {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Safe setting lookup.
    pub fn settings(&self, name: &str) -> Option<&str> {
        self.settings.get(name)
    }

    /// Android ABI name for `arch`.
    pub fn android_abi(&self, arch: &str) -> String {
        to_android_abi(arch).to_string()
    }
}

pub fn to_android_abi(arch: &str) -> &str {
    ANDROID_ABIS
        .iter()
        .find(|(a, _)| *a == arch)
        .map_or(arch, |(_, abi)| *abi)
}
