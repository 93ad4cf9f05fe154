//! MailHog async client implementation.

use crate::constants::{
    DEFAULT_BASE_URL, MESSAGE_PATH, MESSAGES_PATH, SEARCH_CONTAINING, SEARCH_FROM, SEARCH_PATH,
    SEARCH_TO, USER_AGENT_VALUE,
};
use crate::{Error, Message, Messages, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Field a search is run against.
///
/// [`Client::search`] takes anything that is `AsRef<str>`, so kinds MailHog
/// adds later can still be passed as plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// Match the sender address.
    From,
    /// Match any recipient address.
    To,
    /// Match anywhere in the message content.
    Containing,
}

impl SearchKind {
    /// Wire name used in the `kind` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::From => SEARCH_FROM,
            SearchKind::To => SEARCH_TO,
            SearchKind::Containing => SEARCH_CONTAINING,
        }
    }
}

impl AsRef<str> for SearchKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Async client for the MailHog HTTP API.
///
/// Holds only the base URL and a [`reqwest::Client`], so it is cheap to clone
/// and can be shared between tasks. Use [`Client::new`] for defaults or
/// [`Client::builder`] for custom settings like timeouts and proxies.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the MailHog instance at `base_url` with default settings.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailhog_client::Client;
    /// # fn main() -> Result<(), mailhog_client::Error> {
    /// let client = Client::new("http://localhost:8025")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().base_url(base_url).build()
    }

    /// Create a client that sends requests through a caller-owned transport.
    ///
    /// Timeouts, proxies and TLS settings are whatever `http` was built with.
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Client {
            http,
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying HTTP transport.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// List captured messages, newest first.
    ///
    /// # Arguments
    /// * `start` - Offset of the first message to return
    /// * `limit` - Maximum number of messages to return
    ///
    /// # Examples
    /// ```no_run
    /// # use mailhog_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailhog_client::Error> {
    /// let client = Client::new("http://localhost:8025")?;
    /// let page = client.messages(0, 50).await?;
    /// println!("{} of {} messages", page.count, page.total);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn messages(&self, start: usize, limit: usize) -> Result<Messages> {
        let url = self.url(MESSAGES_PATH);
        let params = [("start", start.to_string()), ("limit", limit.to_string())];

        self.get_json(self.http.get(&url).query(&params)).await
    }

    /// Fetch a single message by id.
    ///
    /// The id is inserted into the URL path as given, which matches the
    /// identifiers MailHog hands out (e.g. `kLT8D_S0...=@mailhog.example`).
    ///
    /// # Examples
    /// ```no_run
    /// # use mailhog_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailhog_client::Error> {
    /// let client = Client::new("http://localhost:8025")?;
    /// let message = client
    ///     .message("eZVH3mSvQl9oWzIc4U1j1zWO8TWFWNv123iPrS0sOkE=@mailhog.example")
    ///     .await?;
    /// println!("{:?}", message.subject());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn message(&self, id: &str) -> Result<Message> {
        let url = self.message_url(id);
        self.get_json(self.http.get(&url)).await
    }

    /// Search captured messages.
    ///
    /// # Arguments
    /// * `kind` - A [`SearchKind`], or any other kind string MailHog understands
    /// * `query` - Text to search for; escaped before it is sent
    /// * `start` - Offset of the first match to return
    /// * `limit` - Maximum number of matches to return
    ///
    /// # Examples
    /// ```no_run
    /// # use mailhog_client::{Client, SearchKind};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailhog_client::Error> {
    /// let client = Client::new("http://localhost:8025")?;
    /// let found = client
    ///     .search(SearchKind::To, "alice@example.com", 0, 10)
    ///     .await?;
    /// for msg in found.items {
    ///     println!("{}: {:?}", msg.id, msg.subject());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(
        &self,
        kind: impl AsRef<str>,
        query: &str,
        start: usize,
        limit: usize,
    ) -> Result<Messages> {
        let url = self.url(SEARCH_PATH);
        let params = [
            ("kind", kind.as_ref().to_string()),
            ("query", query.to_string()),
            ("start", start.to_string()),
            ("limit", limit.to_string()),
        ];

        self.get_json(self.http.get(&url).query(&params)).await
    }

    /// Delete a single message. This cannot be undone.
    pub async fn delete_message(&self, id: &str) -> Result<()> {
        let url = self.message_url(id);
        self.send_discarding(self.http.request(Method::DELETE, &url))
            .await
    }

    /// Delete every message stored by the server. This cannot be undone.
    pub async fn delete_all_messages(&self) -> Result<()> {
        let url = self.url(MESSAGE_PATH);
        self.send_discarding(self.http.request(Method::DELETE, &url))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn message_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, MESSAGE_PATH, id)
    }

    /// Send a request and require a `200 OK` response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "sending MailHog request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!(%status, url = %response.url(), "received MailHog response");

        if status != StatusCode::OK {
            warn!(%status, url = %response.url(), "MailHog request failed");
            // Drain so the connection goes back to the pool; the status is the error.
            let _ = response.bytes().await;
            return Err(Error::UnexpectedStatus { status });
        }
        Ok(response)
    }

    /// Send a request whose body carries no data, reading the body to the end.
    async fn send_discarding(&self, request: reqwest::RequestBuilder) -> Result<()> {
        self.send(request).await?.bytes().await?;
        Ok(())
    }

    /// Common GET pattern: send, check status, read the whole body, decode.
    async fn get_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let body = self.send(request).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(Into::into)
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

/// Builder for configuring a MailHog client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    user_agent: String,
    timeout: Option<Duration>,
    proxy: Option<String>,
    http: Option<reqwest::Client>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Base URL `http://localhost:8025`
    /// - No timeout beyond reqwest's own
    /// - No proxy
    /// - Default user agent
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT_VALUE.to_string(),
            timeout: None,
            proxy: None,
            http: None,
        }
    }

    /// Set the MailHog base URL (e.g., "http://mailhog:8025").
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a total timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:1080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Use an already configured transport.
    ///
    /// When set, the user agent, timeout and proxy settings are ignored.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client. No request is sent until an operation is called.
    pub fn build(self) -> Result<Client> {
        if let Some(http) = self.http {
            return Ok(Client::with_http_client(self.base_url, http));
        }

        let mut builder = reqwest::Client::builder().user_agent(self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Client::with_http_client(self.base_url, builder.build()?))
    }
}
