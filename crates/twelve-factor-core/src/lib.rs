//! # twelve-factor-core
//!
//! Core framework for heuristic twelve-factor compliance checking.
//!
//! This crate provides the foundational traits and types for building
//! factor checks. It includes:
//!
//! - [`Check`] trait for project-wide checks
//! - [`Engine`] for running checks in a fixed order
//! - [`Finding`] and [`CheckResult`] for representing results
//! - [`PatternTable`] holding the regexes content checks look for
//! - [`report::render`] for the text report
//!
//! ## Example
//!
//! ```ignore
//! use twelve_factor_core::{report, Engine};
//!
//! let engine = Engine::builder()
//!     .root("./my-app")
//!     .check(MyCheck)
//!     .build()?;
//!
//! let result = engine.validate();
//! println!("{}", report::render(&result));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod check;
mod config;
mod context;
mod engine;
mod patterns;
mod types;

pub mod report;

pub use check::{Check, CheckBox};
pub use config::{CheckConfig, Config, ConfigError, ScanConfig};
pub use context::{file_name, ProjectContext, ReadError};
pub use engine::{Engine, EngineBuilder, EngineError};
pub use patterns::{builtin_specs, Pattern, PatternSpec, PatternTable, Signal};
pub use types::{CheckResult, Factor, Finding, FindingKind};
