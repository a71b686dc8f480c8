//! Typed access to the managed backend holding all application data.
//!
//! The [`RemoteDataClient`] trait is the seam between the app and the
//! backend-as-a-service: authentication, collection queries with
//! filter/sort/include, and create/delete mutations. [`ManifestClient`]
//! talks to the real API over HTTP; [`mock::MockClient`] is an
//! in-memory stand-in for tests.

mod error;
mod http;
pub mod mock;

pub use error::ClientError;
pub use http::ManifestClient;

use crate::domain::Identity;
use async_trait::async_trait;
use serde::Deserialize;

/// Direction of a server-applied sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Query options for a collection fetch. All shaping (filtering,
/// ordering, relation joins) happens server-side; the client never
/// re-sorts locally.
#[derive(Debug, Clone, Default)]
pub struct CollectionQuery {
    /// Equality filters, `field = value`.
    pub filter: Vec<(String, String)>,
    pub sort: Option<(String, SortOrder)>,
    /// Relation names to join into each returned record.
    pub include: Vec<String>,
}

impl CollectionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.push((field.into(), value.into()));
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    pub fn include(mut self, relation: impl Into<String>) -> Self {
        self.include.push(relation.into());
        self
    }
}

/// One page of raw records. The catalog and harvest modules decode the
/// rows into their domain types.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RecordPage {
    pub data: Vec<serde_json::Value>,
}

/// Contract of the external backend, as this app consumes it.
///
/// One instance is constructed at startup and injected wherever remote
/// data is needed; session tokens are passed per call because a single
/// client serves every browser session.
#[async_trait]
pub trait RemoteDataClient: Send + Sync {
    /// Resolves who the given session token belongs to.
    async fn resolve_current_identity(&self, token: &str) -> Result<Identity, ClientError>;

    /// Exchanges credentials for a session token.
    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError>;

    /// Ends the session behind the token.
    async fn logout(&self, token: &str) -> Result<(), ClientError>;

    async fn query_collection(
        &self,
        token: &str,
        collection: &str,
        query: CollectionQuery,
    ) -> Result<RecordPage, ClientError>;

    async fn create_record(
        &self,
        token: &str,
        collection: &str,
        fields: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError>;

    async fn delete_record(
        &self,
        token: &str,
        collection: &str,
        id: &str,
    ) -> Result<(), ClientError>;
}
