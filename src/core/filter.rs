use serde::{Deserialize, Serialize};

use super::device::{Attachment, WebauthnDevice};

/// A composable set of device filters. All fields are AND-combined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceFilter {
    pub attachment: Option<Attachment>,
    pub clone_warning: Option<bool>,
    pub discoverable: Option<bool>,
    pub unused: Option<bool>,
    pub name_contains: Option<String>,
}

impl DeviceFilter {
    /// Test whether a device matches this filter.
    pub fn matches(&self, device: &WebauthnDevice) -> bool {
        if let Some(ref attachment) = self.attachment {
            if device.attachment() != Some(attachment) {
                return false;
            }
        }
        if let Some(want) = self.clone_warning {
            if device.has_clone_warning() != want {
                return false;
            }
        }
        if let Some(want) = self.discoverable {
            if device.is_discoverable() != want {
                return false;
            }
        }
        if let Some(want) = self.unused {
            if device.never_used() != want {
                return false;
            }
        }
        if let Some(ref name) = self.name_contains {
            let description = device.description().unwrap_or("");
            if !description.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.attachment.is_none()
            && self.clone_warning.is_none()
            && self.discoverable.is_none()
            && self.unused.is_none()
            && self.name_contains.is_none()
    }

    /// Keep only matching devices, preserving order.
    pub fn apply(&self, devices: Vec<WebauthnDevice>) -> Vec<WebauthnDevice> {
        if self.is_empty() {
            return devices;
        }
        devices.into_iter().filter(|d| self.matches(d)).collect()
    }
}

/// Counts over a device list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceSummary {
    pub total: usize,
    pub platform: usize,
    pub cross_platform: usize,
    pub other_attachment: usize,
    pub discoverable: usize,
    pub clone_warnings: usize,
    pub never_used: usize,
}

impl DeviceSummary {
    pub fn from_devices(devices: &[WebauthnDevice]) -> Self {
        let mut summary = Self {
            total: devices.len(),
            ..Default::default()
        };
        for device in devices {
            match device.attachment() {
                Some(Attachment::Platform) => summary.platform += 1,
                Some(Attachment::CrossPlatform) => summary.cross_platform += 1,
                _ => summary.other_attachment += 1,
            }
            if device.is_discoverable() {
                summary.discoverable += 1;
            }
            if device.has_clone_warning() {
                summary.clone_warnings += 1;
            }
            if device.never_used() {
                summary.never_used += 1;
            }
        }
        summary
    }
}
