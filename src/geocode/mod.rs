pub mod nominatim;
pub mod types;

use async_trait::async_trait;

pub use nominatim::{GeocodeError, NominatimClient};
pub use types::LocationResult;

/// Free-text search against an upstream geocoding API.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<LocationResult>, GeocodeError>;
}
