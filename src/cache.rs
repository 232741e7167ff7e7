//! Keyed revalidation caches.
//!
//! Each page owns a [`QueryCache`] holding one [`Query`] per [`CacheKey`] it
//! reads. A query keeps its last good data across revalidations, remembers
//! the last error and whether a fetch is in flight. Mutations never write
//! into the cache; they invalidate keys and the page re-fetches them.

use crate::api::{AdminApi, ApiError, ConnectorIndexingStatus, Credential, DocumentSet, Persona};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Identifies a cached backend collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    IndexingStatuses,
    Credentials,
    DocumentSets,
    Personas,
}

impl CacheKey {
    pub fn label(&self) -> &'static str {
        match self {
            CacheKey::IndexingStatuses => "indexing statuses",
            CacheKey::Credentials => "credentials",
            CacheKey::DocumentSets => "document sets",
            CacheKey::Personas => "personas",
        }
    }
}

/// Data stored under a [`CacheKey`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    IndexingStatuses(Vec<ConnectorIndexingStatus>),
    Credentials(Vec<Credential>),
    DocumentSets(Vec<DocumentSet>),
    Personas(Vec<Persona>),
}

impl Payload {
    pub fn key(&self) -> CacheKey {
        match self {
            Payload::IndexingStatuses(_) => CacheKey::IndexingStatuses,
            Payload::Credentials(_) => CacheKey::Credentials,
            Payload::DocumentSets(_) => CacheKey::DocumentSets,
            Payload::Personas(_) => CacheKey::Personas,
        }
    }
}

/// Fetch the collection stored under `key`.
pub async fn fetch_payload(api: &dyn AdminApi, key: CacheKey) -> Result<Payload, ApiError> {
    Ok(match key {
        CacheKey::IndexingStatuses => Payload::IndexingStatuses(api.list_indexing_statuses().await?),
        CacheKey::Credentials => Payload::Credentials(api.list_credentials().await?),
        CacheKey::DocumentSets => Payload::DocumentSets(api.list_document_sets().await?),
        CacheKey::Personas => Payload::Personas(api.list_personas().await?),
    })
}

/// State of one cached fetch.
#[derive(Debug, Clone)]
pub struct Query<T> {
    data: Option<T>,
    error: Option<String>,
    in_flight: bool,
    revalidate_requested: bool,
    fetch_count: usize,
    last_updated: Option<DateTime<Utc>>,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            in_flight: false,
            revalidate_requested: false,
            fetch_count: 0,
            last_updated: None,
        }
    }
}

impl<T> Query<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Number of fetches started for this query
    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Start a fetch. Returns `false` if one is already running; the
    /// request is remembered and honored when the running fetch resolves.
    pub fn begin_fetch(&mut self) -> bool {
        if self.in_flight {
            self.revalidate_requested = true;
            return false;
        }
        self.in_flight = true;
        self.fetch_count += 1;
        true
    }

    /// Record the outcome of the running fetch. Previous data survives an
    /// error. Returns `true` when a revalidation was requested meanwhile.
    pub fn resolve(&mut self, result: Result<T, String>) -> bool {
        self.in_flight = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.last_updated = Some(Utc::now());
            }
            Err(error) => self.error = Some(error),
        }
        std::mem::take(&mut self.revalidate_requested)
    }
}

/// The set of queries a page reads, keyed by [`CacheKey`].
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    queries: HashMap<CacheKey, Query<Payload>>,
}

impl QueryCache {
    pub fn new(keys: &[CacheKey]) -> Self {
        Self {
            queries: keys.iter().map(|key| (*key, Query::new())).collect(),
        }
    }

    pub fn owns(&self, key: CacheKey) -> bool {
        self.queries.contains_key(&key)
    }

    pub fn keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<CacheKey> = self.queries.keys().copied().collect();
        keys.sort_by_key(|key| key.label());
        keys
    }

    pub fn query(&self, key: CacheKey) -> Option<&Query<Payload>> {
        self.queries.get(&key)
    }

    /// Mark `key` for re-fetch. Returns `true` when the caller must start a fetch.
    pub fn revalidate(&mut self, key: CacheKey) -> bool {
        self.queries.get_mut(&key).is_some_and(|query| query.begin_fetch())
    }

    /// Store a fetch result. Returns `true` when the caller must fetch again.
    pub fn resolve(&mut self, key: CacheKey, result: Result<Payload, String>) -> bool {
        let result = match result {
            Ok(payload) if payload.key() != key => {
                log::warn!("Dropping {} payload delivered for {}", payload.key().label(), key.label());
                Err(format!("unexpected {} payload", payload.key().label()))
            }
            other => other,
        };
        self.queries.get_mut(&key).is_some_and(|query| query.resolve(result))
    }

    pub fn fetch_count(&self, key: CacheKey) -> usize {
        self.query(key).map_or(0, Query::fetch_count)
    }

    /// When `key` last resolved successfully
    pub fn last_updated(&self, key: CacheKey) -> Option<DateTime<Utc>> {
        self.query(key).and_then(Query::last_updated)
    }

    pub fn credentials(&self) -> Option<&[Credential]> {
        match self.query(CacheKey::Credentials)?.data()? {
            Payload::Credentials(items) => Some(items),
            _ => None,
        }
    }

    pub fn indexing_statuses(&self) -> Option<&[ConnectorIndexingStatus]> {
        match self.query(CacheKey::IndexingStatuses)?.data()? {
            Payload::IndexingStatuses(items) => Some(items),
            _ => None,
        }
    }
}
