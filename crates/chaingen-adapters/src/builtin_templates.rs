//! Built-in templates.
//!
//! The templates that ship with Chaingen are compiled into the binary, so the
//! tool works without any template directory on disk.
//!
//! # Layout
//!
//! ```text
//! templates/
//! ├── generic.toolchain.cmake.tmpl   ← fallback for every OS
//! ├── android.toolchain.cmake.tmpl
//! ├── macos.toolchain.cmake.tmpl
//! ├── project_include.cmake.tmpl
//! └── blocks/                        ← fragments pulled in with {% include %}
//!     ├── header.cmake
//!     ├── crossbuild.cmake
//!     └── ...
//! ```
//!
//! A template directory passed with `--template-dir` uses the same names.

/// `(name, source)` for every built-in template, sorted by name.
pub static BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "android.toolchain.cmake.tmpl",
        include_str!("../templates/android.toolchain.cmake.tmpl"),
    ),
    (
        "blocks/base_toolchain.cmake",
        include_str!("../templates/blocks/base_toolchain.cmake"),
    ),
    (
        "blocks/build.cmake",
        include_str!("../templates/blocks/build.cmake"),
    ),
    (
        "blocks/compiler.cmake",
        include_str!("../templates/blocks/compiler.cmake"),
    ),
    (
        "blocks/crossbuild.cmake",
        include_str!("../templates/blocks/crossbuild.cmake"),
    ),
    (
        "blocks/flags_init.cmake",
        include_str!("../templates/blocks/flags_init.cmake"),
    ),
    (
        "blocks/generator.cmake",
        include_str!("../templates/blocks/generator.cmake"),
    ),
    (
        "blocks/header.cmake",
        include_str!("../templates/blocks/header.cmake"),
    ),
    (
        "blocks/try_compile.cmake",
        include_str!("../templates/blocks/try_compile.cmake"),
    ),
    (
        "blocks/variables.cmake",
        include_str!("../templates/blocks/variables.cmake"),
    ),
    (
        "generic.toolchain.cmake.tmpl",
        include_str!("../templates/generic.toolchain.cmake.tmpl"),
    ),
    (
        "macos.toolchain.cmake.tmpl",
        include_str!("../templates/macos.toolchain.cmake.tmpl"),
    ),
    (
        "project_include.cmake.tmpl",
        include_str!("../templates/project_include.cmake.tmpl"),
    ),
];

/// Source of the built-in template called `name`.
pub fn get(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| *source)
}

/// Every built-in template.
pub fn all() -> impl Iterator<Item = (&'static str, &'static str)> {
    BUILTIN_TEMPLATES.iter().copied()
}
