use std::{path::PathBuf, sync::Arc};

use models::Place;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{catalog::store::PlaceCatalog, errors::ServiceError, storage::JsonListCodec};

/// In-memory place list persisted through a [`JsonListCodec`].
///
/// Every mutation runs under the write lock: it is applied to a working
/// copy, the copy is saved, and only then does it replace the live list.
/// A failed save leaves the live list untouched.
pub struct PlaceRegistry {
    places: RwLock<Vec<Place>>,
    codec: JsonListCodec<Place>,
}

impl PlaceRegistry {
    /// Open the registry from its snapshot file.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let codec = JsonListCodec::new(path);
        let places = codec.load().await?;
        info!(file = %codec.path().display(), count = places.len(), "place registry loaded");
        Ok(Arc::new(Self::from_parts(codec, places)))
    }

    /// Build a registry over an already-loaded list. Nothing is written until the first mutation.
    pub fn from_parts(codec: JsonListCodec<Place>, places: Vec<Place>) -> Self {
        Self { places: RwLock::new(places), codec }
    }

    pub async fn len(&self) -> usize {
        self.places.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.places.read().await.is_empty()
    }

    pub async fn list(&self) -> Vec<Place> {
        self.places.read().await.clone()
    }

    pub async fn get(&self, id: i64) -> Result<Place, ServiceError> {
        let places = self.places.read().await;
        let idx = position(id, places.len())?;
        Ok(places[idx].clone())
    }

    pub async fn create(&self, place: Place) -> Result<usize, ServiceError> {
        let name = place.name.clone();
        let id = self
            .mutate(|places| {
                if places.iter().any(|p| p.name == place.name) {
                    return Err(ServiceError::Conflict(format!("place '{}' already exists", place.name)));
                }
                places.push(place);
                Ok(places.len() - 1)
            })
            .await?;
        debug!(id, %name, "place created");
        Ok(id)
    }

    pub async fn update_description(&self, id: i64, description: &str) -> Result<Place, ServiceError> {
        let updated = self
            .mutate(|places| {
                let idx = position(id, places.len())?;
                if description.is_empty() {
                    return Err(ServiceError::Validation("description is required".into()));
                }
                places[idx].description = description.to_string();
                Ok(places[idx].clone())
            })
            .await?;
        debug!(id, name = %updated.name, "place description updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<Place, ServiceError> {
        let removed = self
            .mutate(|places| {
                let idx = position(id, places.len())?;
                Ok(places.remove(idx))
            })
            .await?;
        debug!(id, name = %removed.name, "place deleted");
        Ok(removed)
    }

    async fn mutate<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<Place>) -> Result<R, ServiceError>,
    {
        let mut live = self.places.write().await;
        let mut next = live.clone();
        let out = f(&mut next)?;
        self.codec.save(&next).await?;
        *live = next;
        Ok(out)
    }
}

fn position(id: i64, len: usize) -> Result<usize, ServiceError> {
    usize::try_from(id)
        .ok()
        .filter(|idx| *idx < len)
        .ok_or_else(|| ServiceError::not_found("place"))
}

#[async_trait::async_trait]
impl PlaceCatalog for PlaceRegistry {
    async fn create(&self, place: Place) -> Result<usize, ServiceError> { self.create(place).await }
    async fn list(&self) -> Vec<Place> { self.list().await }
    async fn get(&self, id: i64) -> Result<Place, ServiceError> { self.get(id).await }
    async fn update_description(&self, id: i64, description: &str) -> Result<Place, ServiceError> { self.update_description(id, description).await }
    async fn delete(&self, id: i64) -> Result<Place, ServiceError> { self.delete(id).await }
}
