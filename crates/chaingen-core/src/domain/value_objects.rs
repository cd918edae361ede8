//! Domain value objects: CompilerFamily, SharedLibs, CxxExtensions.
//!
//! # Design
//!
//! Pure value types with equality-by-value. They hold NO flag tables; every
//! per-family flag spelling lives in `flags.rs`.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ── CompilerFamily ───────────────────────────────────────────────────────────

/// Compiler identity, as given by the `compiler` setting.
///
/// Families the deduction tables know about get a variant; everything else is
/// kept verbatim in `Unknown` and resolves to "no flag" in every table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompilerFamily {
    Gcc,
    Clang,
    AppleClang,
    SunCc,
    VisualStudio,
    Intel,
    Unknown(String),
}

impl CompilerFamily {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gcc => "gcc",
            Self::Clang => "clang",
            Self::AppleClang => "apple-clang",
            Self::SunCc => "sun-cc",
            Self::VisualStudio => "Visual Studio",
            Self::Intel => "intel",
            Self::Unknown(name) => name,
        }
    }

    /// Families driven through a GCC-compatible command line.
    pub const fn is_gcc_like(&self) -> bool {
        matches!(self, Self::Gcc | Self::Clang | Self::AppleClang | Self::SunCc)
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerFamily {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "gcc" => Self::Gcc,
            "clang" => Self::Clang,
            "apple-clang" => Self::AppleClang,
            "sun-cc" => Self::SunCc,
            "Visual Studio" => Self::VisualStudio,
            "intel" => Self::Intel,
            other => Self::Unknown(other.to_string()),
        })
    }
}

// ── Operating system predicates ──────────────────────────────────────────────

/// `true` for any OS value naming the Windows family (`Windows`,
/// `WindowsStore`, `WindowsCE`).
pub fn is_windows(os: &str) -> bool {
    os.contains("Windows")
}

/// `true` for the Apple desktop OS.
pub fn is_macos(os: &str) -> bool {
    os == "Macos"
}

/// `true` for the Android target.
pub fn is_android(os: &str) -> bool {
    os.starts_with("Android")
}

// ── SharedLibs ───────────────────────────────────────────────────────────────

/// Value of `BUILD_SHARED_LIBS`, derived from the `shared` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedLibs {
    On,
    Off,
}

impl SharedLibs {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

impl From<bool> for SharedLibs {
    fn from(shared: bool) -> Self {
        if shared { Self::On } else { Self::Off }
    }
}

impl Serialize for SharedLibs {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for SharedLibs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── CxxExtensions ────────────────────────────────────────────────────────────

/// Value of `CMAKE_CXX_EXTENSIONS`, derived from a `gnu` prefix on
/// `compiler.cppstd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CxxExtensions {
    On,
    Off,
}

impl CxxExtensions {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

impl Serialize for CxxExtensions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
