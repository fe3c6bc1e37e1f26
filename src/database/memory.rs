// ABOUTME: In-process document store backed by a concurrent hash map
// ABOUTME: Used for tests, demos, and DATABASE_URL=memory; nothing survives a restart
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{duplicate_error, Collection, Document, DocumentStore, TimeRange};
use crate::errors::AppResult;

type DocumentKey = (Collection, String, String);

/// Document store held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<DocumentKey, Document>,
}

impl InMemoryDocumentStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across all collections
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn key(collection: Collection, id: &str, owner: &str) -> DocumentKey {
        (collection, id.to_owned(), owner.to_owned())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, document: Document) -> AppResult<Document> {
        let key = Self::key(document.collection, &document.id, &document.owner);
        match self.documents.entry(key) {
            Entry::Occupied(_) => Err(duplicate_error(&document)),
            Entry::Vacant(slot) => {
                slot.insert(document.clone());
                Ok(document)
            }
        }
    }

    async fn read(
        &self,
        collection: Collection,
        id: &str,
        owner: &str,
    ) -> AppResult<Option<Document>> {
        Ok(self
            .documents
            .get(&Self::key(collection, id, owner))
            .map(|entry| entry.value().clone()))
    }

    async fn upsert(&self, document: Document) -> AppResult<Document> {
        let key = Self::key(document.collection, &document.id, &document.owner);
        self.documents.insert(key, document.clone());
        Ok(document)
    }

    async fn delete(&self, collection: Collection, id: &str, owner: &str) -> AppResult<bool> {
        Ok(self
            .documents
            .remove(&Self::key(collection, id, owner))
            .is_some())
    }

    async fn list_by_owner(
        &self,
        collection: Collection,
        owner: &str,
        range: Option<TimeRange>,
    ) -> AppResult<Vec<Document>> {
        let range = range.unwrap_or_default();
        let mut documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| {
                let doc = entry.value();
                doc.collection == collection && doc.owner == owner && range.contains(doc.sort_key)
            })
            .map(|entry| entry.value().clone())
            .collect();

        documents.sort_by(|a, b| b.sort_key.cmp(&a.sort_key).then_with(|| b.id.cmp(&a.id)));
        Ok(documents)
    }
}
