use crate::domain::model::Coordinate;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Geographic reference lookups a radius search depends on.
#[async_trait]
pub trait ZipDirectory: Send + Sync {
    async fn resolve_city_state(&self, city: &str, state: &str) -> Result<Coordinate>;
    async fn resolve_zip(&self, zip: &str) -> Result<Coordinate>;
    async fn zips_within_radius(&self, center: Coordinate, radius_miles: u32)
        -> Result<HashSet<String>>;
}

pub trait MapViewer: Send + Sync {
    fn open(&self, path: &Path) -> Result<()>;
}
