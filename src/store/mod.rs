//! Package persistence

pub mod memory;
pub mod sqlite;

// Re-export implementations for convenience
pub use memory::MemoryPackageStore;
pub use sqlite::SqlitePackageStore;

use async_trait::async_trait;

use crate::core::models::TourPackage;
use crate::errors::AgentError;

/// Persistence port over the two package collections: base `tours` and
/// derived `customized_tours`.
///
/// A missing document is `Ok(None)`, never an error; only store or transport
/// failures surface as `Persistence`.
#[async_trait]
pub trait PackageStore: Send + Sync {
    async fn find_tour(&self, tour_id: &str) -> Result<Option<TourPackage>, AgentError>;

    /// Inserts or replaces a base package keyed by its own id.
    async fn insert_tour(&self, package: &TourPackage) -> Result<(), AgentError>;

    /// Inserts a customized package under a fresh store-assigned id and
    /// returns that id. Any id already on the package is discarded.
    async fn insert_customized(&self, package: TourPackage) -> Result<String, AgentError>;

    async fn find_customized(&self, id: &str) -> Result<Option<TourPackage>, AgentError>;
}
