use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal value of the `Features - Stations` column that marks a drive-through.
pub const DRIVE_THROUGH: &str = "Drive-Through";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub long: f64,
}

impl Coordinate {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub number: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub coordinate: Option<Coordinate>,
    pub has_drive_thru: bool,
    /// Only set on stores produced by a radius search.
    pub distance: Option<f64>,
}

impl Store {
    pub fn with_distance(self, distance: f64) -> Self {
        Self {
            distance: Some(distance),
            ..self
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Store ID: {}\t{}", self.number, self.name)?;
        writeln!(f, "{}", self.address)?;
        writeln!(f, "{}, {} {}", self.city, self.state, self.zip)?;
        match self.coordinate {
            Some(c) => writeln!(f, "({}, {})", c.lat, c.long)?,
            None => writeln!(f, "(unknown location)")?,
        }
        write!(
            f,
            "Drive-Through: {}",
            if self.has_drive_thru { "YES" } else { "NO" }
        )?;
        if let Some(distance) = self.distance {
            write!(f, "\nDistance: {:.2} miles", distance)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveThruFilter {
    #[default]
    Any,
    Only,
    Without,
}

impl DriveThruFilter {
    pub fn accepts(&self, store: &Store) -> bool {
        match self {
            Self::Any => true,
            Self::Only => store.has_drive_thru,
            Self::Without => !store.has_drive_thru,
        }
    }
}

/// Where a radius search measures distance from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    CityState { city: String, state: String },
    Zip(String),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CityState { city, state } => write!(f, "{}, {}", city, state),
            Self::Zip(zip) => write!(f, "{}", zip),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    CityState {
        city: String,
        state: String,
    },
    Radius {
        origin: Origin,
        radius_miles: i64,
        drive_thru: DriveThruFilter,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResult {
    pub stores: Vec<Store>,
    pub origin: Option<Coordinate>,
    pub radius_miles: Option<u32>,
    /// Zips the directory reported within the radius, before the exact cutoff.
    pub candidate_zips: Option<usize>,
}

impl SearchResult {
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

/// One zip code entry as served by a zip directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipCentroid {
    pub zipcode: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub major_city: String,
    #[serde(default)]
    pub state: String,
}

impl ZipCentroid {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}
