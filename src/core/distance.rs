use crate::domain::model::Coordinate;
use geo::{HaversineDistance, Point};

const METERS_PER_MILE: f64 = 1609.344;

/// Great-circle distance in miles.
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let from = Point::new(a.long, a.lat);
    let to = Point::new(b.long, b.lat);
    from.haversine_distance(&to) / METERS_PER_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let seattle = Coordinate::new(47.6062, -122.3321);
        assert_eq!(distance_miles(seattle, seattle), 0.0);
    }

    #[test]
    fn test_seattle_to_austin() {
        let seattle = Coordinate::new(47.6062, -122.3321);
        let austin = Coordinate::new(30.2672, -97.7431);
        let miles = distance_miles(seattle, austin);
        // ~1770 miles as the crow flies
        assert!((miles - 1770.0).abs() < 15.0, "got {}", miles);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(47.61, -122.33);
        let b = Coordinate::new(47.62, -122.35);
        assert!((distance_miles(a, b) - distance_miles(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let miles = distance_miles(a, b);
        assert!((miles - 69.1).abs() < 0.2, "got {}", miles);
    }
}
