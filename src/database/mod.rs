// ABOUTME: Document store abstraction used by generation and the CRUD services
// ABOUTME: Owner-partitioned JSON documents with SQLite and in-process backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Document Store
//!
//! Every record is a JSON document keyed by `(collection, id, owner)`. The
//! `sort_key` timestamp drives newest-first listing and range filters; it is
//! the only indexed attribute besides the key.
//!
//! Updates are unconditional overwrites (`upsert`); no read-modify-write
//! cycle is protected.

/// In-process store on concurrent maps
pub mod memory;
/// `SQLite` store on a single `documents` table
pub mod sqlite;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

pub use memory::InMemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult};

/// Logical partition of documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    /// Generated workouts
    #[serde(rename = "workouts")]
    Workouts,
    /// Generated meal plans
    #[serde(rename = "meals")]
    Meals,
    /// Logged meals
    #[serde(rename = "mealLogs")]
    MealLogs,
    /// Weight check-ins
    #[serde(rename = "progress")]
    Progress,
    /// User profiles
    #[serde(rename = "users")]
    Users,
}

impl Collection {
    /// Stored name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workouts => "workouts",
            Self::Meals => "meals",
            Self::MealLogs => "mealLogs",
            Self::Progress => "progress",
            Self::Users => "users",
        }
    }

    /// Singular noun for error messages
    #[must_use]
    pub const fn entity_name(&self) -> &'static str {
        match self {
            Self::Workouts => "Workout",
            Self::Meals => "Meal plan",
            Self::MealLogs => "Meal log entry",
            Self::Progress => "Weight check-in",
            Self::Users => "User profile",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored record
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Partition
    pub collection: Collection,
    /// Identifier, unique within `(collection, owner)`
    pub id: String,
    /// Owning user
    pub owner: String,
    /// Ordering and range-filter timestamp
    pub sort_key: DateTime<Utc>,
    /// Entity as JSON
    pub body: Value,
}

impl Document {
    /// Serialize an entity into a document
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the entity cannot be converted to JSON
    pub fn from_entity<T: Serialize>(
        collection: Collection,
        id: impl Into<String>,
        owner: impl Into<String>,
        sort_key: DateTime<Utc>,
        entity: &T,
    ) -> AppResult<Self> {
        Ok(Self {
            collection,
            id: id.into(),
            owner: owner.into(),
            sort_key,
            body: serde_json::to_value(entity)?,
        })
    }

    /// Deserialize the body into an entity
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the body does not match `T`
    pub fn into_entity<T: DeserializeOwned>(self) -> AppResult<T> {
        Ok(serde_json::from_value(self.body)?)
    }
}

/// Inclusive bounds on `sort_key`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Earliest timestamp included
    pub from: Option<DateTime<Utc>>,
    /// Latest timestamp included
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Everything at or after `from`
    #[must_use]
    pub const fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// Everything between `from` and `to`
    #[must_use]
    pub const fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Whether a timestamp falls inside the range
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        !matches!(self.from, Some(from) if at < from) && !matches!(self.to, Some(to) if at > to)
    }
}

/// Storage collaborator for plans, logs, and profiles
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Insert a new document
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the key is taken, or a database error
    async fn create(&self, document: Document) -> AppResult<Document>;

    /// Fetch a document by key
    async fn read(
        &self,
        collection: Collection,
        id: &str,
        owner: &str,
    ) -> AppResult<Option<Document>>;

    /// Insert or overwrite a document
    async fn upsert(&self, document: Document) -> AppResult<Document>;

    /// Remove a document; `false` when nothing matched
    async fn delete(&self, collection: Collection, id: &str, owner: &str) -> AppResult<bool>;

    /// All of an owner's documents in a collection, newest first
    async fn list_by_owner(
        &self,
        collection: Collection,
        owner: &str,
        range: Option<TimeRange>,
    ) -> AppResult<Vec<Document>>;
}

/// Build the configured store
///
/// # Errors
///
/// Returns a database error if the `SQLite` database cannot be opened or its
/// schema created
pub async fn create_store(config: &DatabaseConfig) -> AppResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match &config.url {
        DatabaseUrl::InProcess => Arc::new(InMemoryDocumentStore::new()),
        url @ (DatabaseUrl::SQLite { .. } | DatabaseUrl::SQLiteMemory) => {
            Arc::new(SqliteDocumentStore::connect(url).await?)
        }
    };
    info!(
        backend = store.backend_name(),
        url = %config.url,
        ephemeral = config.url.is_ephemeral(),
        "Document store ready"
    );
    Ok(store)
}

/// Fixed-width RFC 3339 form so stored keys sort lexically in time order
pub(crate) fn encode_sort_key(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_sort_key(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored sort key {raw}: {e}")))
}

pub(crate) fn duplicate_error(document: &Document) -> AppError {
    AppError::already_exists(format!(
        "{} {}",
        document.collection.entity_name(),
        document.id
    ))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_sort_key_round_trip_and_order() {
        let early = Utc.with_ymd_and_hms(2025, 1, 9, 23, 59, 59).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        assert!(encode_sort_key(early) < encode_sort_key(late));
        assert_eq!(decode_sort_key(&encode_sort_key(late)).unwrap(), late);
        assert!(decode_sort_key("yesterday").is_err());
    }

    #[test]
    fn test_time_range() {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        assert!(TimeRange::default().contains(at));
        assert!(TimeRange::since(at).contains(at));
        let later = TimeRange::between(
            at + chrono::Duration::seconds(1),
            at + chrono::Duration::hours(1),
        );
        assert!(!later.contains(at));
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::MealLogs.as_str(), "mealLogs");
        assert_eq!(
            serde_json::to_value(Collection::Workouts).unwrap(),
            serde_json::json!("workouts")
        );
    }
}
