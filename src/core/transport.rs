use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::config::types::AuthdevConfig;
use crate::error::{AuthdevError, Result};

/// Longest response body kept in a `Status` error.
const MAX_ERROR_BODY: usize = 512;

/// Performs GET requests against the portal on behalf of the session.
pub trait Transport {
    /// GET `path` and return the body of a 2xx response.
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// GET `path` once and decode the body as JSON `T` or `null`.
///
/// An empty body decodes as `None`, the same as `null`.
pub async fn get_optional<T, C>(transport: &C, path: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    C: Transport,
{
    let body = transport.get(path).await?;
    decode_optional(path, &body)
}

fn decode_optional<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map_err(|source| AuthdevError::Decode {
        path: path.to_string(),
        source,
    })
}

/// `reqwest`-backed transport carrying the portal session cookie.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build a transport from config. Fails when no base URL is set.
    pub fn from_config(cfg: &AuthdevConfig) -> Result<Self> {
        let raw = cfg.server.url.as_deref().ok_or_else(|| {
            AuthdevError::Config(
                "no portal URL configured (set server.url, AUTHDEV_URL or --url)".into(),
            )
        })?;
        let base_url = Url::parse(raw)
            .map_err(|e| AuthdevError::Config(format!("invalid portal URL {raw}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AuthdevError::Config(format!(
                "unsupported URL scheme: {}",
                base_url.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("authdev/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(ref cookie) = cfg.session.cookie {
            let mut value =
                HeaderValue::from_str(&format!("{}={}", cfg.session.cookie_name, cookie))
                    .map_err(|e| AuthdevError::Config(format!("invalid session cookie: {e}")))?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(cfg.server.timeout_secs))
            .connect_timeout(Duration::from_secs(cfg.server.connect_timeout_secs))
            .danger_accept_invalid_certs(cfg.server.insecure_skip_verify);
        // Loopback portals never go through a system proxy.
        if is_loopback(&base_url) {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| AuthdevError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the base URL, keeping any base path prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| AuthdevError::Config(format!("invalid path {path}: {e}")))
    }
}

fn is_loopback(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok_and(|ip| ip.is_loopback())
}

impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");

        let transport_err = |source| AuthdevError::Transport {
            path: path.to_string(),
            source,
        };

        let resp = self.client.get(url).send().await.map_err(transport_err)?;
        let status = resp.status();
        tracing::debug!(path, %status, "response");

        let body = resp.bytes().await.map_err(transport_err)?;
        if !status.is_success() {
            let mut text = String::from_utf8_lossy(&body).into_owned();
            if text.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                text.truncate(cut);
                text.push('…');
            }
            return Err(AuthdevError::Status {
                path: path.to_string(),
                status,
                body: text,
            });
        }

        Ok(body.to_vec())
    }
}
