//! In-memory package store for tests and examples.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::PackageStore;
use crate::core::models::TourPackage;
use crate::errors::AgentError;

#[derive(Default)]
pub struct MemoryPackageStore {
    tours: RwLock<HashMap<String, TourPackage>>,
    customized: RwLock<HashMap<String, TourPackage>>,
}

impl MemoryPackageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PackageStore for MemoryPackageStore {
    async fn find_tour(&self, tour_id: &str) -> Result<Option<TourPackage>, AgentError> {
        Ok(self.tours.read().await.get(tour_id).cloned())
    }

    async fn insert_tour(&self, package: &TourPackage) -> Result<(), AgentError> {
        self.tours
            .write()
            .await
            .insert(package.id.clone(), package.clone());
        Ok(())
    }

    async fn insert_customized(&self, mut package: TourPackage) -> Result<String, AgentError> {
        package.id = Uuid::new_v4().to_string();
        let id = package.id.clone();
        self.customized.write().await.insert(id.clone(), package);
        Ok(id)
    }

    async fn find_customized(&self, id: &str) -> Result<Option<TourPackage>, AgentError> {
        Ok(self.customized.read().await.get(id).cloned())
    }
}
