//! Portal access token generation.
//!
//! A portal token is the sole credential for a client's portal view: an
//! opaque 32-character lowercase-hex string carried in the URL path. It is
//! stored and compared in plaintext; there is no expiry, rotation, or
//! revocation (a deliberate simplicity trade-off, see DESIGN.md).

use uuid::Uuid;

/// Length of a portal token in characters.
pub const PORTAL_TOKEN_LEN: usize = 32;

/// Generate a fresh portal token: a UUIDv4 in simple form, i.e. 32
/// lowercase hex characters with no hyphens.
pub fn generate_portal_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Cheap shape check used before hitting the database on portal lookups.
pub fn is_portal_token_shaped(token: &str) -> bool {
    token.len() == PORTAL_TOKEN_LEN && token.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
}
