// ABOUTME: SQLite document store using sqlx with one documents table
// ABOUTME: Schema is created on connect; bodies are stored as JSON text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::{
    decode_sort_key, duplicate_error, encode_sort_key, Collection, Document, DocumentStore,
    TimeRange,
};
use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Document store on an `SQLite` database
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Open the database and create the schema
    ///
    /// In-memory databases use a single connection, since every `SQLite`
    /// memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns a database error if the file cannot be created or opened or
    /// the schema statements fail
    pub async fn connect(url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match url {
            DatabaseUrl::SQLite { path } => {
                ensure_parent_dir(path)?;
                SqlitePool::connect(&format!("sqlite:{}?mode=rwc", path.display())).await?
            }
            DatabaseUrl::SQLiteMemory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .connect("sqlite::memory:")
                    .await?
            }
            DatabaseUrl::InProcess => {
                return Err(AppError::config(
                    "The in-process store does not use SQLite",
                ))
            }
        };

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the documents table and its listing index
    ///
    /// # Errors
    ///
    /// Returns a database error if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                owner TEXT NOT NULL,
                sort_key TEXT NOT NULL,
                body TEXT NOT NULL,
                PRIMARY KEY (collection, id, owner)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_documents_owner_sort ON documents(collection, owner, sort_key)",
        )
        .execute(&self.pool)
        .await?;

        debug!("SQLite document schema ready");
        Ok(())
    }

    fn document_from_row(collection: Collection, row: &SqliteRow) -> AppResult<Document> {
        let sort_key: String = row.try_get("sort_key")?;
        let body: String = row.try_get("body")?;
        Ok(Document {
            collection,
            id: row.try_get("id")?,
            owner: row.try_get("owner")?,
            sort_key: decode_sort_key(&sort_key)?,
            body: serde_json::from_str(&body)?,
        })
    }
}

fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::database(format!(
                "Cannot create database directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(&self, document: Document) -> AppResult<Document> {
        let result = sqlx::query(
            "INSERT INTO documents (collection, id, owner, sort_key, body) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(document.collection.as_str())
        .bind(&document.id)
        .bind(&document.owner)
        .bind(encode_sort_key(document.sort_key))
        .bind(serde_json::to_string(&document.body)?)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(document),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(duplicate_error(&document))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn read(
        &self,
        collection: Collection,
        id: &str,
        owner: &str,
    ) -> AppResult<Option<Document>> {
        let row = sqlx::query(
            "SELECT id, owner, sort_key, body FROM documents WHERE collection = ? AND id = ? AND owner = ?",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| Self::document_from_row(collection, &r))
            .transpose()
    }

    async fn upsert(&self, document: Document) -> AppResult<Document> {
        sqlx::query(
            r"
            INSERT INTO documents (collection, id, owner, sort_key, body) VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (collection, id, owner)
            DO UPDATE SET sort_key = excluded.sort_key, body = excluded.body
            ",
        )
        .bind(document.collection.as_str())
        .bind(&document.id)
        .bind(&document.owner)
        .bind(encode_sort_key(document.sort_key))
        .bind(serde_json::to_string(&document.body)?)
        .execute(&self.pool)
        .await?;
        Ok(document)
    }

    async fn delete(&self, collection: Collection, id: &str, owner: &str) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ? AND owner = ?")
                .bind(collection.as_str())
                .bind(id)
                .bind(owner)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(
        &self,
        collection: Collection,
        owner: &str,
        range: Option<TimeRange>,
    ) -> AppResult<Vec<Document>> {
        let range = range.unwrap_or_default();
        // Absent bounds are bound as NULL and ignored by the predicate
        let rows = sqlx::query(
            r"
            SELECT id, owner, sort_key, body FROM documents
            WHERE collection = ? AND owner = ?
              AND (? IS NULL OR sort_key >= ?)
              AND (? IS NULL OR sort_key <= ?)
            ORDER BY sort_key DESC, id DESC
            ",
        )
        .bind(collection.as_str())
        .bind(owner)
        .bind(range.from.map(encode_sort_key))
        .bind(range.from.map(encode_sort_key))
        .bind(range.to.map(encode_sort_key))
        .bind(range.to.map(encode_sort_key))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Self::document_from_row(collection, row))
            .collect()
    }
}
