use crate::core::distance::distance_miles;
use crate::domain::model::{Coordinate, ZipCentroid};
use crate::domain::ports::ZipDirectory;
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// Zip directory backed by an in-memory table of centroids. Loaded from a
/// reference CSV (`zipcode,lat,lng,major_city,state`) or built directly as a
/// test fixture.
#[derive(Debug, Clone, Default)]
pub struct TableZipDirectory {
    entries: Vec<ZipCentroid>,
}

impl TableZipDirectory {
    pub fn new(entries: Vec<ZipCentroid>) -> Self {
        Self { entries }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FinderError::DataLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
        let mut entries = Vec::new();
        for row in reader.deserialize() {
            let entry: ZipCentroid = row?;
            entries.push(entry);
        }

        tracing::info!(
            "📁 Loaded {} zip centroids from {}",
            entries.len(),
            path.display()
        );
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ZipDirectory for TableZipDirectory {
    async fn resolve_city_state(&self, city: &str, state: &str) -> Result<Coordinate> {
        // Several zips can share a city; the last listed one represents it.
        self.entries
            .iter()
            .filter(|e| {
                e.major_city.eq_ignore_ascii_case(city) && e.state.eq_ignore_ascii_case(state)
            })
            .last()
            .map(ZipCentroid::coordinate)
            .ok_or_else(|| {
                FinderError::geocode(format!("{}, {}", city, state), "unknown city or state")
            })
    }

    async fn resolve_zip(&self, zip: &str) -> Result<Coordinate> {
        self.entries
            .iter()
            .find(|e| e.zipcode == zip)
            .map(ZipCentroid::coordinate)
            .ok_or_else(|| FinderError::geocode(zip, "unknown zip code"))
    }

    async fn zips_within_radius(
        &self,
        center: Coordinate,
        radius_miles: u32,
    ) -> Result<HashSet<String>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| distance_miles(center, e.coordinate()) <= radius_miles as f64)
            .map(|e| e.zipcode.clone())
            .collect())
    }
}
