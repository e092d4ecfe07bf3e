//! Domain layer shared across the ClientPulse backend.
//!
//! Holds the primitive type aliases, the domain error type, status enums,
//! and the small pieces of pure business logic (validation, portal token
//! generation, invoice numbering) that the other crates build on.

pub mod error;
pub mod numbering;
pub mod portal;
pub mod status;
pub mod types;
pub mod validation;
