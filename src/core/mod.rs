pub mod dataset;
pub mod distance;
pub mod finder;
pub mod search;

pub use crate::domain::model::{Coordinate, DriveThruFilter, Origin, SearchQuery, SearchResult, Store};
pub use crate::domain::ports::{MapViewer, Storage, ZipDirectory};
pub use crate::utils::error::Result;
