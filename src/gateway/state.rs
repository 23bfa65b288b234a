use tracing::Span;

/// Forwarding target of one traffic class
///
/// Immutable after construction. `reqwest::Client` pools connections
/// internally and is cheap to clone, so this is shared by every request.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    base_url: String,
    client: reqwest::Client,
}

impl ServerConfig {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Base URL whose path is replaced by the inbound path
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

/// Gateway application state (shared)
#[derive(Debug, Clone)]
pub struct GatewayState {
    /// Backend serving `/orders`
    pub orders: ServerConfig,
    /// Parent span for every forwarded request
    pub span: Span,
}

impl GatewayState {
    pub fn new(orders: ServerConfig, span: Span) -> Self {
        Self { orders, span }
    }
}
