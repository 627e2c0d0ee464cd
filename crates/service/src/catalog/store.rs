use async_trait::async_trait;
use models::Place;

use crate::errors::ServiceError;

/// Trait abstraction over the place list consumed by the HTTP layer.
/// Ids are positional and signed so that negative ids reach the bounds check.
#[async_trait]
pub trait PlaceCatalog: Send + Sync {
    /// Append a place with a unique name; returns its id.
    async fn create(&self, place: Place) -> Result<usize, ServiceError>;
    async fn list(&self) -> Vec<Place>;
    async fn get(&self, id: i64) -> Result<Place, ServiceError>;
    async fn update_description(&self, id: i64, description: &str) -> Result<Place, ServiceError>;
    /// Remove a place; later places move one id down.
    async fn delete(&self, id: i64) -> Result<Place, ServiceError>;
}
