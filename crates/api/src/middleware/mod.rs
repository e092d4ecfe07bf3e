//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated staff user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireStaff`] -- Requires `admin` or `member` role.
//! - [`portal::PortalClient`] -- Resolves a client from a portal token path segment.

pub mod auth;
pub mod portal;
pub mod rbac;
