//! Chat Widget
//!
//! A minimal chat widget: it captures user text, renders a transcript and
//! relays each message to a remote chat endpoint, displaying the reply.
//!
//! # Architecture
//!
//! - **Widget**: one controller generic over a view (the DOM contract) and a
//!   transport (the HTTP collaborator)
//! - **Terminal**: the controller driven from stdin, rendered to stdout
//! - **Server**: Axum-based host for the browser page plus a relay route
//!
//! # Modules
//!
//! - [`widget`]: controller, formatting and views
//! - [`transport`]: chat endpoint transport
//! - [`protocol`]: wire types
//! - [`server`]: HTTP server
//! - [`cli`]: terminal front end

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod server;
pub mod transport;
pub mod ui;
pub mod widget;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::transport::ChatTransport;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream chat endpoint, if configured.
    pub transport: Option<Arc<dyn ChatTransport>>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
