// Adapters layer: concrete implementations of the domain ports.

pub mod browser;
pub mod zip_http;
pub mod zip_table;

pub use browser::{NoBrowser, SystemBrowser};
pub use zip_http::HttpZipDirectory;
pub use zip_table::TableZipDirectory;
