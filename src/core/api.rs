//! Portal endpoint paths, relative to the configured base URL.

/// Webauthn devices registered to the authenticated user.
pub const WEBAUTHN_DEVICES_PATH: &str = "/api/webauthn/devices";
