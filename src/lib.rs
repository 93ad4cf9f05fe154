//! # MailHog Client
//! Asynchronous wrapper around the [MailHog](https://github.com/mailhog/MailHog) HTTP API, providing simple methods to list, fetch, search, and delete captured messages from Rust using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers who send email from the code under test and want to assert on what was sent: point the application's SMTP settings at MailHog, then inspect the captured [`Message`]s from the test and clear the store between runs.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`, and requests are logged at `debug` level through `tracing`.
//!
//! ## Out of scope
//! Not an SMTP client or server. It only talks to MailHog's REST endpoints and performs no retries, caching, or pagination beyond the `start`/`limit` it is given.
//!
//! ## Errors
//! Connection and body-read failures surface as [`Error::Transport`], any status other than `200 OK` as [`Error::UnexpectedStatus`], and bodies that do not match the expected shape as [`Error::Decode`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use mailhog_client::{Client, SearchKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailhog_client::Error> {
//!     let client = Client::new("http://localhost:8025")?;
//!
//!     let found = client.search(SearchKind::To, "alice@example.com", 0, 10).await?;
//!     for msg in &found.items {
//!         println!("{}: {:?}", msg.id, msg.subject());
//!     }
//!
//!     client.delete_all_messages().await?;
//!     Ok(())
//! }
//! ```

mod client;
pub mod constants;
mod error;
mod models;

pub use client::{Client, ClientBuilder, SearchKind};
pub use error::Error;
pub use models::{Content, Headers, Message, Messages, Mime, Path, Raw};

/// Result type alias for MailHog operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
