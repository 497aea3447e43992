use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that may be missing (`None`), explicitly `null` (`Some(None)`)
/// or set (`Some(Some(v))`).
pub type Nullable<T> = Option<Option<T>>;

/// A webauthn credential registered to the current user.
///
/// Known fields keep the missing/`null` distinction so a decoded record
/// serializes back to the payload it came from. Fields the portal sends that
/// are not modelled here land in `extra` and are written back out verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebauthnDevice {
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub id: Nullable<i64>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Nullable<Timestamp>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub last_used_at: Nullable<Timestamp>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub rpid: Nullable<String>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub kid: Nullable<String>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub aaguid: Nullable<String>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub attestation_type: Nullable<String>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub attachment: Nullable<Attachment>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub transports: Nullable<Vec<String>>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub sign_count: Nullable<u64>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub clone_warning: Nullable<bool>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub discoverable: Nullable<bool>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub present: Nullable<bool>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub verified: Nullable<bool>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub backup_eligible: Nullable<bool>,
    #[serde(default, with = "serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub backup_state: Nullable<bool>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An RFC 3339 timestamp that serializes back to the exact text it was
/// parsed from.
#[derive(Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    at: DateTime<FixedOffset>,
}

impl Timestamp {
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self {
            raw: raw.to_string(),
            at: DateTime::parse_from_rfc3339(raw)?,
        })
    }

    pub fn at(&self) -> DateTime<FixedOffset> {
        self.at
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Authenticator attachment modality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Attachment {
    Platform,
    CrossPlatform,
    #[serde(untagged)]
    Other(String),
}

impl Attachment {
    pub fn label(&self) -> &str {
        match self {
            Attachment::Platform => "platform",
            Attachment::CrossPlatform => "cross-platform",
            Attachment::Other(s) if s.is_empty() => "unknown",
            Attachment::Other(s) => s,
        }
    }
}

impl WebauthnDevice {
    pub fn id(&self) -> Option<i64> {
        self.id.flatten()
    }

    pub fn kid(&self) -> Option<&str> {
        self.kid.as_ref().and_then(|k| k.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(|d| d.as_deref())
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref().and_then(Option::as_ref)
    }

    pub fn last_used_at(&self) -> Option<&Timestamp> {
        self.last_used_at.as_ref().and_then(Option::as_ref)
    }

    /// Display name: description, else kid, else id.
    pub fn display_name(&self) -> String {
        if let Some(d) = self.description().filter(|d| !d.is_empty()) {
            return d.to_string();
        }
        if let Some(kid) = self.kid() {
            return kid.to_string();
        }
        self.id()
            .map(|id| format!("#{id}"))
            .unwrap_or_else(|| "(unnamed)".into())
    }

    pub fn has_clone_warning(&self) -> bool {
        self.clone_warning.flatten().unwrap_or(false)
    }

    pub fn is_discoverable(&self) -> bool {
        self.discoverable.flatten().unwrap_or(false)
    }

    pub fn never_used(&self) -> bool {
        self.last_used_at().is_none()
    }
}
