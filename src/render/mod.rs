pub mod listing;
pub mod map;

pub use listing::render_listing;
pub use map::{MapDocument, MapSettings};
