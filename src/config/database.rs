// ABOUTME: Document store configuration for SQLite and in-process backends
// ABOUTME: Parses DATABASE_URL into a type-safe DatabaseUrl
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default on-disk location of the document database
pub const DEFAULT_DATABASE_PATH: &str = "./data/fitplan.db";

/// Type-safe database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite`
    SQLiteMemory,
    /// Pure in-process store backed by concurrent maps, nothing persisted
    InProcess,
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// Accepts `sqlite:<path>`, `sqlite::memory:`, `memory`, or a bare path
    /// (treated as an `SQLite` file).
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("memory") {
            return Self::InProcess;
        }
        match trimmed.strip_prefix("sqlite:") {
            Some(":memory:") => Self::SQLiteMemory,
            Some(path) => Self::SQLite {
                path: PathBuf::from(path.trim_start_matches("//")),
            },
            None => Self::SQLite {
                path: PathBuf::from(trimmed),
            },
        }
    }

    /// Convert to a sqlx connection string (`None` for the in-process store)
    #[must_use]
    pub fn to_connection_string(&self) -> Option<String> {
        match self {
            Self::SQLite { path } => Some(format!("sqlite:{}", path.display())),
            Self::SQLiteMemory => Some("sqlite::memory:".to_owned()),
            Self::InProcess => None,
        }
    }

    /// Check if data is lost on restart
    #[must_use]
    pub const fn is_ephemeral(&self) -> bool {
        matches!(self, Self::SQLiteMemory | Self::InProcess)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.to_connection_string() {
            Some(url) => write!(f, "{url}"),
            None => write!(f, "memory"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Where documents live
    pub url: DatabaseUrl,
}

impl DatabaseConfig {
    /// Load database configuration from `DATABASE_URL`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL")
                .map(|url| DatabaseUrl::parse_url(&url))
                .unwrap_or_default(),
        }
    }
}
