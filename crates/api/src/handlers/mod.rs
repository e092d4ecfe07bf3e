//! HTTP request handlers, grouped by resource.

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod files;
pub mod invoices;
pub mod messages;
pub mod portal;
pub mod projects;
pub mod settings;
pub mod tasks;
