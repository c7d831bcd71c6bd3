//! Client-side backend service for Snibox snippets and labels.
//!
//! ARCHITECTURE
//! ============
//! `api` holds the entry points the UI calls. Each one runs a single
//! mutation through `service::ResourceService`, which talks to the server
//! through a `net::Transport` and reports back through the injected
//! `state::Ui` (store + notifier). `config` supplies the base URL and
//! timeouts for the production `net::ReqwestTransport`.

pub mod api;
pub mod config;
pub mod net;
pub mod service;
pub mod state;

pub use api::{LabelDraft, SnippetDraft, data, label, snippet};
pub use config::{ApiConfig, ConfigError};
pub use net::{ReqwestTransport, Transport, TransportError};
pub use service::{Outcome, ResourceService};
pub use state::{AppStore, Notifier, StateSink, ToastLog, Ui};
