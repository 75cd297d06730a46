use httpmock::prelude::*;
use std::time::Duration;
use store_finder::domain::model::{Coordinate, DriveThruFilter, Origin, SearchQuery, Store};
use store_finder::domain::ports::ZipDirectory;
use store_finder::{
    Dataset, FinderError, FinderSettings, HttpZipDirectory, LocalStorage, NoBrowser, StoreFinder,
};
use tempfile::TempDir;

fn seattle_centroid(zip: &str, lat: f64, lng: f64) -> serde_json::Value {
    serde_json::json!({
        "zipcode": zip,
        "lat": lat,
        "lng": lng,
        "major_city": "Seattle",
        "state": "WA"
    })
}

#[tokio::test]
async fn test_resolve_zip() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/zipcodes/98101");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(seattle_centroid("98101", 47.6101, -122.3421));
    });

    let zips = HttpZipDirectory::new(&server.url("/api"), None).unwrap();
    let coordinate = zips.resolve_zip("98101").await.unwrap();

    api_mock.assert();
    assert_eq!(coordinate, Coordinate::new(47.6101, -122.3421));
}

#[tokio::test]
async fn test_unknown_zip_is_geocode_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/zipcodes/00000");
        then.status(404);
    });

    let zips = HttpZipDirectory::new(&server.url("/api"), None).unwrap();
    let err = zips.resolve_zip("00000").await.unwrap_err();

    api_mock.assert();
    assert!(matches!(err, FinderError::Geocode { .. }));
}

#[tokio::test]
async fn test_resolve_city_state_uses_last_entry() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/zipcodes")
            .query_param("city", "Seattle")
            .query_param("state", "WA");
        then.status(200).json_body(serde_json::json!([
            seattle_centroid("98101", 47.6101, -122.3421),
            seattle_centroid("98109", 47.6205, -122.3493)
        ]));
    });

    let zips = HttpZipDirectory::new(&server.url("/api"), None).unwrap();
    let coordinate = zips.resolve_city_state("Seattle", "WA").await.unwrap();

    api_mock.assert();
    assert_eq!(coordinate, Coordinate::new(47.6205, -122.3493));
}

#[tokio::test]
async fn test_city_without_zips_is_geocode_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/zipcodes");
        then.status(200).json_body(serde_json::json!([]));
    });

    let zips = HttpZipDirectory::new(&server.url("/api"), None).unwrap();
    let err = zips.resolve_city_state("Atlantis", "ZZ").await.unwrap_err();

    api_mock.assert();
    assert!(matches!(err, FinderError::Geocode { .. }));
}

#[tokio::test]
async fn test_zips_within_radius_deduplicates() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/zipcodes/radius")
            .query_param("lat", "47.6101")
            .query_param("lng", "-122.3421")
            .query_param("radius", "5");
        then.status(200).json_body(serde_json::json!([
            seattle_centroid("98101", 47.6101, -122.3421),
            seattle_centroid("98109", 47.6205, -122.3493),
            seattle_centroid("98101", 47.6101, -122.3421)
        ]));
    });

    let zips = HttpZipDirectory::new(&server.url("/api"), None).unwrap();
    let found = zips
        .zips_within_radius(Coordinate::new(47.6101, -122.3421), 5)
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(found.len(), 2);
    assert!(found.contains("98101"));
    assert!(found.contains("98109"));
}

#[tokio::test]
async fn test_server_error_is_service_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/zipcodes/98101");
        then.status(503);
    });

    let zips = HttpZipDirectory::new(&server.url("/api"), Some(Duration::from_secs(5))).unwrap();
    let err = zips.resolve_zip("98101").await.unwrap_err();

    api_mock.assert();
    match err {
        FinderError::Service { status, url } => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/api/zipcodes/98101"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_end_to_end_radius_search_over_http() {
    let server = MockServer::start();
    let zip_mock = server.mock(|when, then| {
        when.method(GET).path("/api/zipcodes/98101");
        then.status(200)
            .json_body(seattle_centroid("98101", 47.6101, -122.3421));
    });
    let radius_mock = server.mock(|when, then| {
        when.method(GET).path("/api/zipcodes/radius");
        then.status(200).json_body(serde_json::json!([
            seattle_centroid("98101", 47.6101, -122.3421)
        ]));
    });

    let store = |number: &str, lat: f64, long: f64, has_drive_thru: bool| Store {
        number: number.to_string(),
        name: format!("Store {}", number),
        address: "1 Pike St".to_string(),
        city: "Seattle".to_string(),
        state: "WA".to_string(),
        zip: "98101".to_string(),
        coordinate: Some(Coordinate::new(lat, long)),
        has_drive_thru,
        distance: None,
    };
    let dataset = Dataset::new(vec![
        store("far", 47.6114, -122.3376, true),
        store("near", 47.6101, -122.3421, false),
    ]);

    let temp_dir = TempDir::new().unwrap();
    let finder = StoreFinder::new(
        dataset,
        Box::new(HttpZipDirectory::new(&server.url("/api"), None).unwrap()),
        LocalStorage::new(temp_dir.path().display().to_string()),
        Box::new(NoBrowser),
        FinderSettings::default(),
    );

    let result = finder
        .search(&SearchQuery::Radius {
            origin: Origin::Zip("98101".to_string()),
            radius_miles: 5,
            drive_thru: DriveThruFilter::Any,
        })
        .await
        .unwrap();

    zip_mock.assert();
    radius_mock.assert();
    let numbers: Vec<&str> = result.stores.iter().map(|s| s.number.as_str()).collect();
    assert_eq!(numbers, vec!["near", "far"]);
}
