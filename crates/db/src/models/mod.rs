//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod agency;
pub mod client;
pub mod file;
pub mod invoice;
pub mod message;
pub mod project;
pub mod session;
pub mod task;
pub mod user;
