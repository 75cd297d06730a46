use crate::domain::model::{Coordinate, ZipCentroid};
use crate::domain::ports::ZipDirectory;
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = "store-finder/0.1";

/// Zip directory served over HTTP.
///
/// Endpoints, relative to the configured base URL:
/// - `GET zipcodes/{zip}` returns one centroid, 404 when unknown
/// - `GET zipcodes?city=..&state=..` returns a list of centroids
/// - `GET zipcodes/radius?lat=..&lng=..&radius=..` returns a list of centroids
pub struct HttpZipDirectory {
    client: Client,
    base_url: Url,
}

impl HttpZipDirectory {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(endpoint).map_err(|e| FinderError::InvalidConfigValueError {
            field: "zip_directory.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FinderError::ConfigError {
                message: format!("Zip directory URL cannot be a base: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// `Ok(None)` on 404.
    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        tracing::debug!("Zip directory request: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("Zip directory response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FinderError::Service {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(Some(response.json::<T>().await?))
    }
}

#[async_trait]
impl ZipDirectory for HttpZipDirectory {
    async fn resolve_city_state(&self, city: &str, state: &str) -> Result<Coordinate> {
        let url = self.url(
            &["zipcodes"],
            &[("city", city.to_string()), ("state", state.to_string())],
        )?;
        let matches: Vec<ZipCentroid> = self.fetch(url).await?.unwrap_or_default();

        // Several zips can share a city; the last listed one represents it.
        matches
            .last()
            .map(ZipCentroid::coordinate)
            .ok_or_else(|| {
                FinderError::geocode(format!("{}, {}", city, state), "unknown city or state")
            })
    }

    async fn resolve_zip(&self, zip: &str) -> Result<Coordinate> {
        let url = self.url(&["zipcodes", zip], &[])?;
        let entry: Option<ZipCentroid> = self.fetch(url).await?;
        entry
            .map(|e| e.coordinate())
            .ok_or_else(|| FinderError::geocode(zip, "unknown zip code"))
    }

    async fn zips_within_radius(
        &self,
        center: Coordinate,
        radius_miles: u32,
    ) -> Result<HashSet<String>> {
        let url = self.url(
            &["zipcodes", "radius"],
            &[
                ("lat", center.lat.to_string()),
                ("lng", center.long.to_string()),
                ("radius", radius_miles.to_string()),
            ],
        )?;
        let entries: Vec<ZipCentroid> = self.fetch(url).await?.unwrap_or_default();
        Ok(entries.into_iter().map(|e| e.zipcode).collect())
    }
}
