//! In-memory [`RemoteDataClient`] for tests.

use super::{ClientError, CollectionQuery, RecordPage, RemoteDataClient};
use crate::domain::Identity;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

pub const MOCK_TOKEN: &str = "mock-token";

/// Configurable backend stand-in. Records every call so tests can
/// assert not only on outcomes but on which remote calls were (or were
/// not) issued.
#[derive(Default)]
pub struct MockClient {
    account: Mutex<Option<(String, String, Identity)>>,
    identity: Mutex<Option<Identity>>,
    collections: Mutex<HashMap<String, Vec<Value>>>,
    failing_queries: Mutex<Vec<String>>,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
    query_log: Mutex<Vec<(String, CollectionQuery)>>,
    created: Mutex<Vec<(String, Value)>>,
    delete_log: Mutex<Vec<(String, String)>>,
    logout_calls: AtomicU32,
    next_id: AtomicU32,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an already-authenticated session.
    pub fn with_identity(self, identity: Identity) -> Self {
        *self.identity.lock().unwrap() = Some(identity);
        self
    }

    /// Registers credentials that `login` will accept.
    pub fn with_account(self, email: &str, password: &str, identity: Identity) -> Self {
        *self.account.lock().unwrap() = Some((email.to_string(), password.to_string(), identity));
        self
    }

    pub fn with_collection(self, name: &str, records: Vec<Value>) -> Self {
        self.collections
            .lock()
            .unwrap()
            .insert(name.to_string(), records);
        self
    }

    /// Makes every query against the named collection fail.
    pub fn failing_collection(self, name: &str) -> Self {
        self.fail_queries(name);
        self
    }

    /// Makes queries against the named collection fail from this point
    /// on. Unlike [`failing_collection`](Self::failing_collection) this
    /// can be flipped mid-test, after earlier queries succeeded.
    pub fn fail_queries(&self, name: &str) {
        self.failing_queries.lock().unwrap().push(name.to_string());
    }

    pub fn failing_create(self) -> Self {
        self.fail_create.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_delete(self) -> Self {
        self.fail_delete.store(true, Ordering::SeqCst);
        self
    }

    /// Number of queries issued against the named collection.
    pub fn query_count(&self, collection: &str) -> usize {
        self.query_log
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == collection)
            .count()
    }

    pub fn last_query(&self, collection: &str) -> Option<CollectionQuery> {
        self.query_log
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _)| name == collection)
            .map(|(_, query)| query.clone())
    }

    pub fn create_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    /// Fields of the most recent create call, exactly as submitted.
    pub fn last_created(&self) -> Option<Value> {
        self.created
            .lock()
            .unwrap()
            .last()
            .map(|(_, fields)| fields.clone())
    }

    pub fn delete_count(&self) -> usize {
        self.delete_log.lock().unwrap().len()
    }

    pub fn logout_count(&self) -> u32 {
        self.logout_calls.load(Ordering::SeqCst)
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn matches(record: &Value, filter: &[(String, String)]) -> bool {
        filter.iter().all(|(field, value)| {
            record
                .get(field)
                .map(|v| match v {
                    Value::String(s) => s == value,
                    other => other.to_string() == *value,
                })
                .unwrap_or(false)
        })
    }
}

#[async_trait]
impl RemoteDataClient for MockClient {
    async fn resolve_current_identity(&self, _token: &str) -> Result<Identity, ClientError> {
        self.identity
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::Auth("no active session".to_string()))
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let account = self.account.lock().unwrap().clone();
        match account {
            Some((known_email, known_password, identity))
                if known_email == email && known_password == password =>
            {
                *self.identity.lock().unwrap() = Some(identity);
                Ok(MOCK_TOKEN.to_string())
            }
            _ => Err(ClientError::Auth("invalid credentials".to_string())),
        }
    }

    async fn logout(&self, _token: &str) -> Result<(), ClientError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        *self.identity.lock().unwrap() = None;
        Ok(())
    }

    async fn query_collection(
        &self,
        _token: &str,
        collection: &str,
        query: CollectionQuery,
    ) -> Result<RecordPage, ClientError> {
        self.query_log
            .lock()
            .unwrap()
            .push((collection.to_string(), query.clone()));

        if self
            .failing_queries
            .lock()
            .unwrap()
            .iter()
            .any(|name| name == collection)
        {
            return Err(ClientError::Network("connection refused".to_string()));
        }

        let data = self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| Self::matches(record, &query.filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(RecordPage { data })
    }

    async fn create_record(
        &self,
        _token: &str,
        collection: &str,
        fields: Value,
    ) -> Result<Value, ClientError> {
        self.created
            .lock()
            .unwrap()
            .push((collection.to_string(), fields.clone()));

        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ClientError::Validation("rejected by backend".to_string()));
        }

        let mut record = fields;
        let id = format!("r{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        record
            .as_object_mut()
            .ok_or_else(|| ClientError::Validation("fields must be an object".to_string()))?
            .insert("id".to_string(), Value::String(id));

        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());

        Ok(record)
    }

    async fn delete_record(
        &self,
        _token: &str,
        collection: &str,
        id: &str,
    ) -> Result<(), ClientError> {
        self.delete_log
            .lock()
            .unwrap()
            .push((collection.to_string(), id.to_string()));

        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ClientError::Network("connection refused".to_string()));
        }

        let mut collections = self.collections.lock().unwrap();
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| ClientError::NotFound(format!("no collection {collection}")))?;
        let before = records.len();
        records.retain(|record| record.get("id").and_then(Value::as_str) != Some(id));

        if records.len() == before {
            return Err(ClientError::NotFound(format!("no record {id}")));
        }
        Ok(())
    }
}
