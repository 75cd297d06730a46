use std::io::Write;
use store_finder::core::distance::distance_miles;
use store_finder::domain::model::{
    Coordinate, DriveThruFilter, Origin, SearchQuery, ZipCentroid,
};
use store_finder::{
    Dataset, FinderError, FinderSettings, LocalStorage, NoBrowser, StoreFinder, TableZipDirectory,
};
use tempfile::{NamedTempFile, TempDir};

const STORES_CSV: &str = "\
Brand,Store Number,Name,Ownership Type,Street Address,City,State,Zip,Phone Number,Latitude,Longitude,Features - Stations
Starbucks,100-1,Pike Place,Company Owned,102 Pike St,Seattle,WA,98101,206-555-0100,47.6101,-122.3421,
Starbucks,100-2,Westlake Center,Company Owned,400 Pine St,Seattle,WA,98101-2012,206-555-0101,47.6114,-122.3376,Drive-Through
Starbucks,100-3,Seattle Center,Company Owned,305 Harrison St,Seattle,WA,98109,206-555-0102,47.6205,-122.3493,Drive-Through
Starbucks,100-4,Bellevue Square,Licensed,575 Bellevue Sq,Bellevue,WA,98004,425-555-0103,47.6145,-122.1925,Drive-Through
Starbucks,100-5,Congress Ave,Company Owned,600 Congress Ave,Austin,TX,78701,512-555-0104,30.2686,-97.7427,Drive-Through
Starbucks,100-6,Kiosk,Licensed,1 Unknown Way,Seattle,WA,98101,,,,
";

fn dataset() -> Dataset {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(STORES_CSV.as_bytes()).unwrap();
    file.flush().unwrap();
    Dataset::from_path(file.path()).unwrap()
}

fn centroid(zip: &str, lat: f64, lng: f64, city: &str, state: &str) -> ZipCentroid {
    ZipCentroid {
        zipcode: zip.to_string(),
        lat,
        lng,
        major_city: city.to_string(),
        state: state.to_string(),
    }
}

fn zips() -> TableZipDirectory {
    TableZipDirectory::new(vec![
        centroid("98101", 47.6101, -122.3421, "Seattle", "WA"),
        centroid("98109", 47.6205, -122.3493, "Seattle", "WA"),
        centroid("98004", 47.6145, -122.1925, "Bellevue", "WA"),
        centroid("78701", 30.2686, -97.7427, "Austin", "TX"),
    ])
}

fn finder(output_dir: &TempDir) -> StoreFinder<LocalStorage> {
    let mut settings = FinderSettings::default();
    settings.map.open_browser = false;
    StoreFinder::new(
        dataset(),
        Box::new(zips()),
        LocalStorage::new(output_dir.path().display().to_string()),
        Box::new(NoBrowser),
        settings,
    )
}

fn numbers(result: &store_finder::domain::model::SearchResult) -> Vec<&str> {
    result.stores.iter().map(|s| s.number.as_str()).collect()
}

fn near_zip(zip: &str, radius_miles: i64, drive_thru: DriveThruFilter) -> SearchQuery {
    SearchQuery::Radius {
        origin: Origin::Zip(zip.to_string()),
        radius_miles,
        drive_thru,
    }
}

#[tokio::test]
async fn test_city_state_search_ignores_case() {
    let temp_dir = TempDir::new().unwrap();
    let finder = finder(&temp_dir);

    for (city, state) in [("seattle", "wa"), ("SEATTLE", "WA"), ("Seattle", "Wa")] {
        let result = finder
            .search(&SearchQuery::CityState {
                city: city.to_string(),
                state: state.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(numbers(&result), vec!["100-1", "100-2", "100-3", "100-6"]);
        assert!(result
            .stores
            .iter()
            .all(|s| s.city.to_lowercase() == "seattle" && s.state.to_lowercase() == "wa"));
    }

    let austin = finder
        .search(&SearchQuery::CityState {
            city: "austin".to_string(),
            state: "tx".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(numbers(&austin), vec!["100-5"]);
}

#[tokio::test]
async fn test_city_state_no_match_reports_no_stores() {
    let temp_dir = TempDir::new().unwrap();
    let finder = finder(&temp_dir);

    let err = finder
        .search(&SearchQuery::CityState {
            city: "Portland".to_string(),
            state: "OR".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FinderError::NoStoresFound));
}

#[tokio::test]
async fn test_zip_radius_results_are_bounded_and_sorted() {
    let temp_dir = TempDir::new().unwrap();
    let finder = finder(&temp_dir);

    let result = finder
        .search(&near_zip("98101", 5, DriveThruFilter::Any))
        .await
        .unwrap();

    // ZIP+4 stores match their base zip; the kiosk has no coordinate.
    assert_eq!(numbers(&result), vec!["100-1", "100-2", "100-3"]);

    let origin = result.origin.unwrap();
    assert_eq!(origin, Coordinate::new(47.6101, -122.3421));
    let distances: Vec<f64> = result.stores.iter().map(|s| s.distance.unwrap()).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    for store in &result.stores {
        let exact = distance_miles(origin, store.coordinate.unwrap());
        assert!(exact <= 5.0);
        assert_eq!(store.distance, Some(exact));
    }
}

#[tokio::test]
async fn test_zip_radius_drive_thru_filters() {
    let temp_dir = TempDir::new().unwrap();
    let finder = finder(&temp_dir);

    let only = finder
        .search(&near_zip("98101", 5, DriveThruFilter::Only))
        .await
        .unwrap();
    assert_eq!(numbers(&only), vec!["100-2", "100-3"]);
    assert!(only.stores.iter().all(|s| s.has_drive_thru));

    let without = finder
        .search(&near_zip("98101", 5, DriveThruFilter::Without))
        .await
        .unwrap();
    assert_eq!(numbers(&without), vec!["100-1"]);
}

#[tokio::test]
async fn test_radius_from_city_uses_resolved_origin() {
    let temp_dir = TempDir::new().unwrap();
    let finder = finder(&temp_dir);

    let result = finder
        .search(&SearchQuery::Radius {
            origin: Origin::CityState {
                city: "Seattle".to_string(),
                state: "WA".to_string(),
            },
            radius_miles: 10,
            drive_thru: DriveThruFilter::Any,
        })
        .await
        .unwrap();

    // The last Seattle zip (98109) is the origin.
    assert_eq!(numbers(&result), vec!["100-3", "100-1", "100-2", "100-4"]);
    assert_eq!(result.radius_miles, Some(10));
}

#[tokio::test]
async fn test_zero_radius_keeps_only_exact_origin() {
    let temp_dir = TempDir::new().unwrap();
    let finder = finder(&temp_dir);

    let result = finder
        .search(&near_zip("98101", 0, DriveThruFilter::Any))
        .await
        .unwrap();
    assert_eq!(numbers(&result), vec!["100-1"]);
    assert_eq!(result.stores[0].distance, Some(0.0));

    // Nothing sits exactly on the 78701 centroid once drive-throughs are excluded.
    let err = finder
        .search(&near_zip("78701", 0, DriveThruFilter::Without))
        .await
        .unwrap_err();
    assert!(matches!(err, FinderError::NoStoresFound));
}

#[tokio::test]
async fn test_same_search_twice_is_identical() {
    let temp_dir = TempDir::new().unwrap();
    let finder = finder(&temp_dir);
    let query = near_zip("98101", 20, DriveThruFilter::Any);

    let first = finder.search(&query).await.unwrap();
    let second = finder.search(&query).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_zip_is_geocode_error() {
    let temp_dir = TempDir::new().unwrap();
    let finder = finder(&temp_dir);

    let err = finder
        .search(&near_zip("00000", 5, DriveThruFilter::Any))
        .await
        .unwrap_err();
    assert!(matches!(err, FinderError::Geocode { .. }));
}

#[tokio::test]
async fn test_written_map_has_one_marker_per_located_store() {
    let temp_dir = TempDir::new().unwrap();
    let finder = finder(&temp_dir);

    let result = finder
        .search(&SearchQuery::CityState {
            city: "Seattle".to_string(),
            state: "WA".to_string(),
        })
        .await
        .unwrap();
    let located = result.stores.iter().filter(|s| s.coordinate.is_some()).count();
    assert_eq!(result.len(), 4);
    assert_eq!(located, 3);

    let mut out = Vec::new();
    let path = finder.present(&result, &mut out).await.unwrap().unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    let markers = html
        .lines()
        .filter(|line| line.starts_with("L.marker("))
        .count();
    assert_eq!(markers, located);
    assert!(path.ends_with("map.html"));

    let listing = String::from_utf8(out).unwrap();
    assert!(listing.starts_with("4 stores found"));
    assert!(listing.contains("(unknown location)"));
    assert!(listing.contains(&format!("Map located in: {}", path)));
}

#[tokio::test]
async fn test_map_is_overwritten_by_next_search() {
    let temp_dir = TempDir::new().unwrap();
    let finder = finder(&temp_dir);
    let mut out = Vec::new();

    let wide = finder
        .search(&near_zip("98101", 10, DriveThruFilter::Any))
        .await
        .unwrap();
    let path = finder.present(&wide, &mut out).await.unwrap().unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    assert_eq!(first.matches("L.marker(").count(), 4);

    let narrow = finder
        .search(&near_zip("98101", 0, DriveThruFilter::Any))
        .await
        .unwrap();
    let same_path = finder.present(&narrow, &mut out).await.unwrap().unwrap();
    assert_eq!(path, same_path);
    let second = std::fs::read_to_string(&same_path).unwrap();
    assert_eq!(second.matches("L.marker(").count(), 1);

    let listing = String::from_utf8(out).unwrap();
    assert!(listing.contains("Distance: 0.00 miles"));
}
