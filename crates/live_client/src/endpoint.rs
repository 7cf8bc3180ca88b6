use url::Url;

use crate::error::ClientError;

/// Where the realtime socket lives, derived from the page the app is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub secure: bool,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
}

impl Endpoint {
    /// Mirrors the page's scheme, host and port. A `dev_port` replaces the
    /// page port when the UI is served by a separate development server.
    pub fn from_page_url(page: &str, dev_port: Option<u16>) -> Result<Self, ClientError> {
        let page = Url::parse(page)?;
        let secure = match page.scheme() {
            "https" | "wss" => true,
            "http" | "ws" => false,
            other => {
                return Err(ClientError::InvalidEndpoint(format!(
                    "unsupported scheme `{other}`"
                )))
            }
        };
        let host = page
            .host_str()
            .ok_or_else(|| ClientError::InvalidEndpoint(format!("`{page}` has no host")))?
            .to_string();

        Ok(Self {
            secure,
            host,
            port: dev_port.or_else(|| page.port()),
            path: "/".to_string(),
        })
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        self
    }

    pub fn url(&self) -> Result<Url, ClientError> {
        let scheme = if self.secure { "wss" } else { "ws" };
        let authority = match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        };
        Ok(Url::parse(&format!("{scheme}://{authority}{}", self.path))?)
    }
}
