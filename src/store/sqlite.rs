//! SQLite-backed package store.
//!
//! Each collection is a table of JSON documents keyed by `_id`, keeping the
//! document-store layout the agents expect.

use std::path::Path;

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::PackageStore;
use crate::core::models::TourPackage;
use crate::errors::AgentError;

#[derive(Debug, sqlx::FromRow)]
struct DocRow {
    doc: String,
}

pub struct SqlitePackageStore {
    pool: SqlitePool,
}

impl SqlitePackageStore {
    /// Opens (creating if needed) the database file and ensures the schema.
    pub async fn connect(path: &str) -> Result<Self, AgentError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AgentError::Persistence(format!(
                        "Failed to create db dir {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        let pool = SqlitePool::connect(&format!("sqlite:{path}?mode=rwc")).await?;
        Self::with_pool(pool).await
    }

    /// Wraps an existing pool and ensures the schema. Tests pass a
    /// `sqlite::memory:` pool.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, AgentError> {
        sqlx::query("CREATE TABLE IF NOT EXISTS tours (_id TEXT PRIMARY KEY, doc TEXT NOT NULL)")
            .execute(&pool)
            .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS customized_tours (_id TEXT PRIMARY KEY, doc TEXT NOT NULL)",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }

    async fn fetch_doc(&self, table: &str, id: &str) -> Result<Option<TourPackage>, AgentError> {
        // table is one of two fixed names, never caller input
        let query = format!("SELECT doc FROM {table} WHERE _id = ?");
        let row: Option<DocRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let package = serde_json::from_str(&row.doc).map_err(|e| {
                    AgentError::Persistence(format!("Corrupt package document {id}: {e}"))
                })?;
                Ok(Some(package))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PackageStore for SqlitePackageStore {
    async fn find_tour(&self, tour_id: &str) -> Result<Option<TourPackage>, AgentError> {
        self.fetch_doc("tours", tour_id).await
    }

    async fn insert_tour(&self, package: &TourPackage) -> Result<(), AgentError> {
        let doc = serde_json::to_string(package)
            .map_err(|e| AgentError::Persistence(format!("Failed to serialize package: {e}")))?;
        sqlx::query("INSERT OR REPLACE INTO tours (_id, doc) VALUES (?, ?)")
            .bind(&package.id)
            .bind(&doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_customized(&self, mut package: TourPackage) -> Result<String, AgentError> {
        package.id = Uuid::new_v4().to_string();
        let doc = serde_json::to_string(&package)
            .map_err(|e| AgentError::Persistence(format!("Failed to serialize package: {e}")))?;
        sqlx::query("INSERT INTO customized_tours (_id, doc) VALUES (?, ?)")
            .bind(&package.id)
            .bind(&doc)
            .execute(&self.pool)
            .await?;
        Ok(package.id)
    }

    async fn find_customized(&self, id: &str) -> Result<Option<TourPackage>, AgentError> {
        self.fetch_doc("customized_tours", id).await
    }
}
