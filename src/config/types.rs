use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthdevConfig {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the authentication portal, e.g. `https://auth.example.com`.
    pub url: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub insecure_skip_verify: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 10,
            connect_timeout_secs: 5,
            insecure_skip_verify: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "authelia_session".into(),
            cookie: None,
        }
    }
}

impl SessionConfig {
    /// Copy of this section with the cookie value masked, for printing.
    pub fn redacted(&self) -> Self {
        Self {
            cookie_name: self.cookie_name.clone(),
            cookie: self.cookie.as_ref().map(|_| "<redacted>".into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: String,
    pub spinner: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: "auto".into(),
            spinner: true,
        }
    }
}
