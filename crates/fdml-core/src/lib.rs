//! fdml-core: shared foundation for the FDML validation engines.
//!
//! - `document`: owned element tree parsed with quick-xml, plus the `NodeQuery` facade
//! - `errors`: one error enum per subsystem, `thiserror` only
//! - `config`: TOML configuration with layered resolution
//! - `tracing`: `FDML_LOG`-driven subscriber setup
//! - `constants`: version gate and compiled defaults

pub mod constants;
pub mod config;
pub mod document;
pub mod errors;
pub mod tracing;

pub use config::FdmlConfig;
pub use document::{Document, Element, NodeQuery};
