//! # po-schema
//!
//! JSON Schema generation, validation, and registry for purchase order
//! records.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of the JSON Schemas for every record and
//!   CLI response type
//! - Validation of incoming JSON against a named schema before it is parsed
//! - Schema export for external tooling (`poadm schema`)
//!
//! ## Architecture
//!
//! Types are defined in `po-core` with `#[derive(JsonSchema)]`. This crate
//! imports those types and provides the registry and validation layer.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
