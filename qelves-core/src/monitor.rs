//! Two-phase transaction capture
//!
//! Capture happens in two steps. [`prepare`] runs the relevance gate and
//! extracts operations from the request. [`PendingCapture::complete`] builds
//! events once the response body has been fetched. In-flight captures share
//! nothing; only the resulting events meet, in the store, in completion order.

use tracing::debug;

use crate::capture::{ContentSource, FetchedContent, Har, Transaction};
use crate::events::{NetworkEvent, admit, build_events};
use crate::graphql::GraphQLPayload;
use crate::store::EventStore;

/// A transaction known to carry GraphQL, awaiting its response body
#[derive(Debug, Clone)]
pub struct PendingCapture {
    transaction: Transaction,
    payloads: Vec<GraphQLPayload>,
}

impl PendingCapture {
    /// Number of operations the transaction carries
    pub fn operations(&self) -> usize {
        self.payloads.len()
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Build the transaction's events from its fetched response body
    pub fn complete(self, content: FetchedContent) -> Vec<NetworkEvent> {
        build_events(&self.transaction, self.payloads, content.into_decoded())
    }
}

/// Phase one: decide whether the transaction is GraphQL traffic
pub fn prepare(transaction: &Transaction) -> Option<PendingCapture> {
    admit(transaction).map(|payloads| PendingCapture {
        transaction: transaction.clone(),
        payloads,
    })
}

/// Run both phases, fetching the response body from `source`
pub async fn capture<S>(transaction: &Transaction, source: &S) -> Vec<NetworkEvent>
where
    S: ContentSource + ?Sized,
{
    let Some(pending) = prepare(transaction) else {
        return Vec::new();
    };
    let content = source.content().await;
    pending.complete(content)
}

/// Outcome of ingesting a batch of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Transactions examined
    pub transactions: usize,
    /// Transactions that carried GraphQL
    pub captured: usize,
    /// Events appended to the store
    pub events: usize,
}

/// Feed every HAR entry through the pipeline, in entry order
pub async fn ingest_har(har: &Har, store: &mut EventStore) -> IngestReport {
    ingest(har.entries(), store).await
}

/// Feed transactions through the pipeline, each using its embedded body
pub async fn ingest(transactions: &[Transaction], store: &mut EventStore) -> IngestReport {
    let mut report = IngestReport::default();

    for transaction in transactions {
        report.transactions += 1;
        let events = capture(transaction, transaction).await;
        if events.is_empty() {
            continue;
        }
        report.captured += 1;
        report.events += events.len();
        store.extend(events);
    }

    debug!(
        transactions = report.transactions,
        captured = report.captured,
        events = report.events,
        "Ingest complete"
    );
    report
}
