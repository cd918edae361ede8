//! Per-compiler-family flag tables.
//!
//! Every table is keyed by [`CompilerFamily`]. A family or value that is not
//! listed resolves to `None`: these lookups are advisory, they never reject a
//! configuration.
//!
//! # Adding a New Compiler
//!
//! 1. Add a variant to `CompilerFamily` in `value_objects.rs`
//! 2. Add entries to [`LIBCXX_FLAGS`] / [`ARCH_FLAGS`] as needed
//! 3. The deduction engine only reads these tables, nothing else to wire

use crate::domain::settings::Settings;
use crate::domain::value_objects::{CompilerFamily, is_android};

// ── Standard library selection ───────────────────────────────────────────────

/// How a family spells "link against this standard library".
#[derive(Debug, Clone, Copy)]
pub enum LibcxxRule {
    /// `<prefix><libcxx>` for any libcxx value.
    Passthrough { prefix: &'static str },
    /// Explicit `libcxx value → flag` pairs.
    Table(&'static [(&'static str, &'static str)]),
}

/// One family's standard-library flag spelling.
#[derive(Debug, Clone)]
pub struct LibcxxDef {
    pub family: CompilerFamily,
    pub rule: LibcxxRule,
}

/// Link-time standard library flags.
pub static LIBCXX_FLAGS: &[LibcxxDef] = &[
    // apple-clang only ships libc++ and libstdc++
    LibcxxDef {
        family: CompilerFamily::AppleClang,
        rule: LibcxxRule::Passthrough { prefix: "-stdlib=" },
    },
    LibcxxDef {
        family: CompilerFamily::Clang,
        rule: LibcxxRule::Table(&[
            ("libc++", "-stdlib=libc++"),
            ("libstdc++", "-stdlib=libstdc++"),
            ("libstdc++11", "-stdlib=libstdc++"),
        ]),
    },
    LibcxxDef {
        family: CompilerFamily::SunCc,
        rule: LibcxxRule::Table(&[
            ("libCstd", "-library=Cstd"),
            ("libstdcxx", "-library=stdcxx4"),
            ("libstlport", "-library=stlport4"),
            ("libstdc++", "-library=stdcpp"),
        ]),
    },
];

/// GCC dual-ABI switch: value of `_GLIBCXX_USE_CXX11_ABI`.
pub static GLIBCXX_ABI: &[(&str, &str)] = &[("libstdc++11", "1"), ("libstdc++", "0")];

/// Standard library selection flag for `compiler` + `libcxx`.
pub fn libcxx_flag(compiler: &CompilerFamily, libcxx: &str) -> Option<String> {
    let def = LIBCXX_FLAGS.iter().find(|d| d.family == *compiler)?;
    match def.rule {
        LibcxxRule::Passthrough { prefix } => Some(format!("{prefix}{libcxx}")),
        LibcxxRule::Table(table) => lookup(table, libcxx).map(str::to_string),
    }
}

/// ABI tag for GCC's libstdc++ variants.
pub fn glibcxx_abi(compiler: &CompilerFamily, libcxx: &str) -> Option<&'static str> {
    if *compiler != CompilerFamily::Gcc {
        return None;
    }
    lookup(GLIBCXX_ABI, libcxx)
}

// ── Architecture ─────────────────────────────────────────────────────────────

/// Width flags shared by every GCC-compatible family.
pub static ARCH_FLAGS: &[(&str, &str)] = &[
    ("x86_64", "-m64"),
    ("sparcv9", "-m64"),
    ("s390x", "-m64"),
    ("x86", "-m32"),
    ("sparc", "-m32"),
    ("s390", "-m31"),
];

/// AIX spells PowerPC widths differently.
pub static AIX_ARCH_FLAGS: &[(&str, &str)] = &[("ppc32", "-maix32"), ("ppc64", "-maix64")];

/// Intel, with `(gcc-style, msvc-style)` spellings.
pub static INTEL_ARCH_FLAGS: &[(&str, (&str, &str))] =
    &[("x86", ("-m32", "/Qm32")), ("x86_64", ("-m64", "/Qm64"))];

/// Compiler width/ISA flag for the target in `settings`.
pub fn architecture_flag(settings: &Settings) -> Option<String> {
    let compiler: CompilerFamily = settings.get("compiler")?.parse().ok()?;
    let arch = settings.get("arch")?;
    let os = settings.get("os").unwrap_or_default();

    // The NDK toolchain file owns the target triple.
    if is_android(os) {
        return None;
    }

    if compiler.is_gcc_like() {
        if let Some(flag) = lookup(ARCH_FLAGS, arch) {
            return Some(flag.to_string());
        }
        if os == "AIX" {
            return lookup(AIX_ARCH_FLAGS, arch).map(str::to_string);
        }
        return None;
    }

    if compiler == CompilerFamily::Intel {
        let msvc_style = settings.get("compiler.base") == Some("Visual Studio");
        return INTEL_ARCH_FLAGS
            .iter()
            .find(|(a, _)| *a == arch)
            .map(|(_, (gcc, msvc))| if msvc_style { msvc } else { gcc })
            .map(|flag| flag.to_string());
    }

    None
}

fn lookup<'a>(table: &'a [(&str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
