use super::api::WEBAUTHN_DEVICES_PATH;
use super::device::WebauthnDevice;
use super::transport::{Transport, get_optional};
use crate::error::Result;

/// Fetch the webauthn devices of the authenticated user.
///
/// `Ok(None)` means the portal answered `null`, which is not the same as
/// `Ok(Some(vec![]))` (no devices registered). Transport errors are returned
/// as-is.
pub async fn fetch_devices<C: Transport>(transport: &C) -> Result<Option<Vec<WebauthnDevice>>> {
    get_optional(transport, WEBAUTHN_DEVICES_PATH).await
}
