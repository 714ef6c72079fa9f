//! qelves-core: GraphQL operation capture from browser network traffic
//!
//! This crate reconstructs GraphQL operations from captured HTTP
//! request/response pairs:
//!
//! - **Payload extraction** - [`graphql::extract`] finds operations in JSON,
//!   batched JSON and multipart upload bodies
//! - **Classification** - [`graphql::classify`] and [`graphql::resolve_name`]
//! - **Event assembly** - [`events::assemble`] fans a transaction out into
//!   [`NetworkEvent`]s, one per operation
//! - **Capture** - [`monitor::prepare`] / [`monitor::capture`] for the two-phase
//!   "inspect request, then fetch body" flow, and [`Har`] loading
//! - **Event store** - [`EventStore`] with multi-selection, filter and search
//! - **Export** - [`ExportBundle`] with mandatory header redaction
//!
//! # Quick Start
//!
//! ```no_run
//! use qelves_core::{EventStore, ExportBundle, Har, monitor};
//!
//! async fn example() -> qelves_core::Result<()> {
//!     let har = Har::load("capture.har".as_ref()).await?;
//!
//!     let mut store = EventStore::new();
//!     monitor::ingest_har(&har, &mut store).await;
//!
//!     let ids: Vec<String> = store.filtered().map(|e| e.id.clone()).collect();
//!     store.select_range(&ids);
//!
//!     let bundle = ExportBundle::from_events(store.selected_events());
//!     bundle.write_to("bundle.json".as_ref(), true).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Transaction ──prepare──▶ PendingCapture ──complete(body)──▶ [NetworkEvent] ──append──▶ EventStore
//!                 │                                                                        │
//!            gate + extract                                                    filtered() / selection
//! ```

pub mod capture;
pub mod demo;
pub mod error;
pub mod events;
pub mod export;
pub mod graphql;
pub mod monitor;
pub mod store;

// Re-export key types for convenience
pub use capture::{ContentSource, FetchedContent, Har, Header, Transaction};
pub use error::{CaptureError, ExportError, QelvesError, Result};
pub use events::{HeaderMap, NetworkEvent};
pub use export::{ExportBundle, REDACTION_MARKER, Redaction, to_curl};
pub use graphql::{GraphQLPayload, OperationType};
pub use monitor::{IngestReport, PendingCapture};
pub use store::{ClickModifiers, EventStore, OperationFilter, ParseFilterError};
