//! Core domain layer for Chaingen.
//!
//! This module contains pure toolchain logic. All I/O, template storage and
//! rendering concerns are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **No clocks, no randomness**: identical inputs deduce identical contexts
//! - **Few crates**: std + thiserror, plus serde/indexmap for ordered,
//!   serializable data
//! - **Nothing fails silently**: unknown inputs resolve to "not applicable",
//!   mismatches become [`Advisory`] values
//!
pub mod deduction;
pub mod error;
pub mod escape;
pub mod flags;
pub mod generator;
pub mod helper;
pub mod settings;
pub mod toolchain;
pub mod value_objects;
pub mod variables;

mod validation;

pub use deduction::{
    Advisory, CrossBuild, DeducedToolchainContext, Deduction, GenerationRequest, deduce,
};
pub use error::{DomainError, ErrorCategory};
pub use helper::PlatformHelper;
pub use settings::{Options, Settings};
pub use toolchain::{CMakeToolchain, RenderContext, TemplateContexts};
pub use validation::DomainValidator;
pub use value_objects::{CompilerFamily, CxxExtensions, SharedLibs};
pub use variables::{ConfigurationBucket, ReverseIndex, VariableValue, Variables};
