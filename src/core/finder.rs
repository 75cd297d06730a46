use crate::core::dataset::Dataset;
use crate::core::search::SearchEngine;
use crate::domain::model::{SearchQuery, SearchResult};
use crate::domain::ports::{MapViewer, Storage, ZipDirectory};
use crate::render::{render_listing, MapDocument, MapSettings};
use crate::utils::error::{FinderError, Result};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct FinderSettings {
    pub map: MapSettings,
    /// Echo search diagnostics to the output stream.
    pub debug: bool,
}

pub struct StoreFinder<S: Storage> {
    dataset: Dataset,
    zips: Box<dyn ZipDirectory>,
    storage: S,
    viewer: Box<dyn MapViewer>,
    settings: FinderSettings,
}

impl<S: Storage> StoreFinder<S> {
    pub fn new(
        dataset: Dataset,
        zips: Box<dyn ZipDirectory>,
        storage: S,
        viewer: Box<dyn MapViewer>,
        settings: FinderSettings,
    ) -> Self {
        Self {
            dataset,
            zips,
            storage,
            viewer,
            settings,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> &FinderSettings {
        &self.settings
    }

    /// Runs a query. A valid query with no matches is `FinderError::NoStoresFound`.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        let engine = SearchEngine::new(&self.dataset, self.zips.as_ref());

        let result = match query {
            SearchQuery::CityState { city, state } => engine.by_city_state(city, state),
            SearchQuery::Radius {
                origin,
                radius_miles,
                drive_thru,
            } => {
                engine
                    .within_radius(origin, *radius_miles, *drive_thru)
                    .await?
            }
        };

        tracing::info!("🔍 {:?} matched {} stores", query, result.len());

        if result.is_empty() {
            return Err(FinderError::NoStoresFound);
        }
        Ok(result)
    }

    /// Prints the listing, writes the map and opens it. Returns the map path
    /// when one was written.
    pub async fn present<W: Write>(
        &self,
        result: &SearchResult,
        out: &mut W,
    ) -> Result<Option<String>> {
        if self.settings.debug {
            if let (Some(origin), Some(radius)) = (result.origin, result.radius_miles) {
                writeln!(
                    out,
                    "[debug] origin ({}, {}), radius {} miles, candidate zips: {}",
                    origin.lat,
                    origin.long,
                    radius,
                    result.candidate_zips.unwrap_or_default()
                )?;
            }
        }

        write!(out, "{}", render_listing(result))?;

        let Some(document) = MapDocument::from_result(result, &self.settings.map) else {
            tracing::warn!("No store in the result has coordinates, skipping map");
            return Ok(None);
        };

        if self.settings.debug {
            writeln!(
                out,
                "[debug] map center ({}, {}), {} markers",
                document.center.lat,
                document.center.long,
                document.markers.len()
            )?;
        }

        let html = document.to_html()?;
        let path = self
            .storage
            .write_file(&self.settings.map.output_file, html.as_bytes())
            .await
            .map_err(|e| match e {
                FinderError::IoError(source) => FinderError::MapWrite {
                    path: self.settings.map.output_file.clone(),
                    source,
                },
                other => other,
            })?;
        writeln!(out, "Map located in: {}", path)?;
        tracing::info!("📁 Map written to {}", path);

        if self.settings.map.open_browser {
            if let Err(e) = self.viewer.open(Path::new(&path)) {
                tracing::warn!("Could not open browser: {}", e);
            }
        }

        Ok(Some(path))
    }
}
