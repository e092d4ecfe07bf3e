//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Tenant-owned tables are
//! always queried with an explicit `agency_id` filter supplied by the
//! caller; there is no ambient tenant context.

pub mod agency_repo;
pub mod client_repo;
pub mod file_repo;
pub mod invoice_repo;
pub mod message_repo;
pub mod project_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;

pub use agency_repo::AgencyRepo;
pub use client_repo::ClientRepo;
pub use file_repo::FileRepo;
pub use invoice_repo::InvoiceRepo;
pub use message_repo::MessageRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
