use crate::domain::model::{Coordinate, Store, DRIVE_THROUGH};
use crate::utils::error::{FinderError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const STORE_NUMBER: &str = "Store Number";
pub const NAME: &str = "Name";
pub const STREET_ADDRESS: &str = "Street Address";
pub const CITY: &str = "City";
pub const STATE: &str = "State";
pub const ZIP: &str = "Zip";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const FEATURES_STATIONS: &str = "Features - Stations";

/// Columns projected out of the source file, in this order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    STORE_NUMBER,
    NAME,
    STREET_ADDRESS,
    CITY,
    STATE,
    ZIP,
    LATITUDE,
    LONGITUDE,
    FEATURES_STATIONS,
];

/// The store table, in source-file order. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    stores: Vec<Store>,
}

impl Dataset {
    pub fn new(stores: Vec<Store>) -> Self {
        Self { stores }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FinderError::DataLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let dataset = Self::from_reader(file).map_err(|e| match e {
            FinderError::CsvError(err) => FinderError::DataLoad {
                path: path.display().to_string(),
                message: err.to_string(),
            },
            other => other,
        })?;

        tracing::info!(
            "📁 Loaded {} stores from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::locate(&headers)?;

        let mut stores = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            stores.push(columns.store(&record, row + 1));
        }

        Ok(Self { stores })
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

struct ColumnIndex([usize; 9]);

impl ColumnIndex {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let mut index = [0usize; 9];
        for (slot, column) in index.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| FinderError::MissingColumn {
                    column: column.to_string(),
                })?;
        }
        Ok(Self(index))
    }

    fn field(&self, record: &StringRecord, column: usize) -> String {
        record
            .get(self.0[column])
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    fn store(&self, record: &StringRecord, row: usize) -> Store {
        let lat = parse_degrees(&self.field(record, 6), 90.0);
        let long = parse_degrees(&self.field(record, 7), 180.0);
        let coordinate = match (lat, long) {
            (Some(lat), Some(long)) => Some(Coordinate::new(lat, long)),
            _ => {
                tracing::debug!("Row {} has no usable coordinate", row);
                None
            }
        };

        Store {
            number: self.field(record, 0),
            name: self.field(record, 1),
            address: self.field(record, 2),
            city: self.field(record, 3),
            state: self.field(record, 4),
            zip: self.field(record, 5),
            coordinate,
            has_drive_thru: self.field(record, 8) == DRIVE_THROUGH,
            distance: None,
        }
    }
}

/// `f64::from_str` also accepts `NaN` and `inf`, which cannot be plotted.
fn parse_degrees(value: &str, limit: f64) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
}
