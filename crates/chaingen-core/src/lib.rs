//! Chaingen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Chaingen, which
//! compiles declarative build settings into a CMake toolchain file, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          chaingen-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ToolchainService, Selector, Writer)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Store, Filesystem, Render, Cpu)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    chaingen-adapters (Infrastructure)   │
//! │ (InMemoryStore, MiniJinjaRenderer, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Settings, Variables, deduction tables) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chaingen_core::prelude::*;
//!
//! // 1. Describe the target
//! let settings = Settings::new()
//!     .with("os", "Linux")
//!     .with("compiler", "gcc")
//!     .with("build_type", "Release");
//! let request = GenerationRequest::new(settings, Options::new().with("fPIC", true));
//!
//! // 2. Use application service (with injected adapters)
//! let service = ToolchainService::new(store, renderer, filesystem, cpu);
//! service.generate(&request, &Variables::new(), &Variables::new(), "build").unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, TemplateInfo, ToolchainService,
        ports::{CpuCount, Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        Advisory, GenerationRequest, Options, PlatformHelper, RenderContext, Settings,
        VariableValue, Variables,
    };
    pub use crate::error::{ChaingenError, ChaingenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
