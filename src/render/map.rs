use crate::domain::model::{Coordinate, SearchResult, DRIVE_THROUGH};
use crate::utils::error::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const DEFAULT_MAP_FILE: &str = "map.html";
pub const DEFAULT_ZOOM: u8 = 11;

const POPUP_MAX_WIDTH: u32 = 200;
const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css";
const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js";
const AWESOME_MARKERS_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css";
const AWESOME_MARKERS_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js";
const FONT_AWESOME_CSS: &str =
    "https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@6.2.0/css/all.min.css";
const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub output_file: String,
    pub zoom_start: u8,
    pub open_browser: bool,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            output_file: DEFAULT_MAP_FILE.to_string(),
            zoom_start: DEFAULT_ZOOM,
            open_browser: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Green,
    Purple,
}

impl MarkerColor {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Purple => "purple",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub popup: String,
    pub color: MarkerColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub center: Coordinate,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapDocument {
    /// `None` when no store in the result has a coordinate to plot.
    pub fn from_result(result: &SearchResult, settings: &MapSettings) -> Option<Self> {
        let markers: Vec<Marker> = result
            .stores
            .iter()
            .filter_map(|store| {
                let position = store.coordinate?;
                let (popup, color) = if store.has_drive_thru {
                    (
                        format!("{}<br>{}", escape_html(&store.name), DRIVE_THROUGH),
                        MarkerColor::Green,
                    )
                } else {
                    (format!("{}<br>", escape_html(&store.name)), MarkerColor::Purple)
                };
                Some(Marker {
                    position,
                    popup,
                    color,
                })
            })
            .collect();

        if markers.is_empty() {
            return None;
        }

        let count = markers.len() as f64;
        let lat = markers.iter().map(|m| m.position.lat).sum::<f64>() / count;
        let long = markers.iter().map(|m| m.position.long).sum::<f64>() / count;

        Some(Self {
            center: Coordinate::new(lat, long),
            zoom: settings.zoom_start,
            markers,
        })
    }

    pub fn to_html(&self) -> Result<String> {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(
            html,
            "<!-- generated by store-finder at {} -->",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        html.push_str("<title>Store Finder</title>\n");
        for css in [LEAFLET_CSS, AWESOME_MARKERS_CSS, FONT_AWESOME_CSS] {
            let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{}\"/>", css);
        }
        for js in [LEAFLET_JS, AWESOME_MARKERS_JS] {
            let _ = writeln!(html, "<script src=\"{}\"></script>", js);
        }
        html.push_str(
            "<style>html, body, #map {width: 100%; height: 100%; margin: 0; padding: 0;}</style>\n",
        );
        html.push_str("</head>\n<body>\n<div id=\"map\"></div>\n<script>\n");

        let _ = writeln!(
            html,
            "var map = L.map(\"map\").setView([{}, {}], {});",
            self.center.lat, self.center.long, self.zoom
        );
        let _ = writeln!(
            html,
            "L.tileLayer(\"{}\", {{maxZoom: 19, attribution: \"&copy; OpenStreetMap contributors\"}}).addTo(map);",
            TILE_URL
        );

        for marker in &self.markers {
            let popup = serde_json::to_string(&marker.popup)?;
            let _ = writeln!(
                html,
                "L.marker([{}, {}], {{icon: L.AwesomeMarkers.icon({{icon: \"coffee\", prefix: \"fa\", markerColor: \"{}\"}})}}).bindPopup(L.popup({{maxWidth: {}}}).setContent({})).addTo(map);",
                marker.position.lat,
                marker.position.long,
                marker.color.as_str(),
                POPUP_MAX_WIDTH,
                popup
            );
        }

        html.push_str("</script>\n</body>\n</html>\n");
        Ok(html)
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
