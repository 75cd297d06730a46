use crate::core::dataset::Dataset;
use crate::core::distance::distance_miles;
use crate::domain::model::{Coordinate, DriveThruFilter, Origin, SearchResult, Store};
use crate::domain::ports::ZipDirectory;
use crate::utils::error::Result;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static ZIP5: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d{5})").expect("hardcoded"));

/// First five digits of a zip, so ZIP+4 values match their base zip.
pub fn normalize_zip(zip: &str) -> Option<&str> {
    ZIP5.captures(zip)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub struct SearchEngine<'a> {
    dataset: &'a Dataset,
    zips: &'a dyn ZipDirectory,
}

impl<'a> SearchEngine<'a> {
    pub fn new(dataset: &'a Dataset, zips: &'a dyn ZipDirectory) -> Self {
        Self { dataset, zips }
    }

    pub fn by_city_state(&self, city: &str, state: &str) -> SearchResult {
        let city = city.trim().to_lowercase();
        let state = state.trim().to_lowercase();

        let stores: Vec<Store> = self
            .dataset
            .stores()
            .iter()
            .filter(|s| s.city.to_lowercase() == city && s.state.to_lowercase() == state)
            .cloned()
            .collect();

        tracing::debug!("City search '{}, {}' matched {} stores", city, state, stores.len());

        SearchResult {
            stores,
            origin: None,
            radius_miles: None,
            candidate_zips: None,
        }
    }

    pub async fn resolve_origin(&self, origin: &Origin) -> Result<Coordinate> {
        match origin {
            Origin::CityState { city, state } => {
                self.zips.resolve_city_state(city.trim(), state.trim()).await
            }
            Origin::Zip(zip) => self.zips.resolve_zip(zip.trim()).await,
        }
    }

    pub async fn within_radius(
        &self,
        origin: &Origin,
        radius_miles: i64,
        drive_thru: DriveThruFilter,
    ) -> Result<SearchResult> {
        let radius = radius_miles.clamp(0, u32::MAX as i64) as u32;
        let center = self.resolve_origin(origin).await?;
        let candidates = self.zips.zips_within_radius(center, radius).await?;

        tracing::debug!(
            "Origin {} resolved to ({}, {}), {} candidate zips within {} miles",
            origin,
            center.lat,
            center.long,
            candidates.len(),
            radius
        );

        let stores = self.rank(center, radius, &candidates, drive_thru);

        Ok(SearchResult {
            stores,
            origin: Some(center),
            radius_miles: Some(radius),
            candidate_zips: Some(candidates.len()),
        })
    }

    fn rank(
        &self,
        center: Coordinate,
        radius: u32,
        candidates: &HashSet<String>,
        drive_thru: DriveThruFilter,
    ) -> Vec<Store> {
        let mut stores: Vec<Store> = self
            .dataset
            .stores()
            .iter()
            .filter(|s| normalize_zip(&s.zip).is_some_and(|zip| candidates.contains(zip)))
            .filter_map(|s| {
                let coordinate = s.coordinate?;
                Some(s.clone().with_distance(distance_miles(center, coordinate)))
            })
            .collect();

        // Zip centroids only approximate the radius, so the exact cutoff runs after sorting.
        stores.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        stores.retain(|s| s.distance.is_some_and(|d| d <= radius as f64));
        stores.retain(|s| drive_thru.accepts(s));
        stores
    }
}
