use serde::{Deserialize, Serialize};

use crate::models::JobPosting;

/// Mean Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

const KM_PER_MILE: f64 = 1.609_344;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Great-circle distance between two points using the haversine formula
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().asin()
}

pub fn km_to_miles(km: f64) -> f64 {
    km / KM_PER_MILE
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

/// Job postings sharing a (city, state) pair, with the straight-line distance
/// from the search origin to the group's representative coordinate
#[derive(Debug, Serialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    /// None when neither the origin nor any posting in the group has coordinates
    pub distance_miles: Option<f64>,
    pub jobs: Vec<JobPosting>,
}

/// Group postings by (city, state), case-insensitively.
///
/// The group's distance is measured from `origin` to the first posting in the
/// group that carries coordinates. Groups are sorted ascending by distance;
/// groups without a resolvable distance sort last regardless of insertion
/// order.
pub fn group_by_city(jobs: Vec<JobPosting>, origin: Option<Coordinates>) -> Vec<CityGroup> {
    let mut groups: Vec<CityGroup> = Vec::new();

    for job in jobs {
        let key_city = job.city.trim().to_lowercase();
        let key_state = job.state.trim().to_uppercase();

        match groups
            .iter_mut()
            .find(|g| g.city.to_lowercase() == key_city && g.state == key_state)
        {
            Some(group) => group.jobs.push(job),
            None => groups.push(CityGroup {
                city: job.city.trim().to_string(),
                state: key_state,
                distance_miles: None,
                jobs: vec![job],
            }),
        }
    }

    if let Some(origin) = origin {
        for group in &mut groups {
            group.distance_miles = group
                .jobs
                .iter()
                .find_map(|j| j.coordinates())
                .map(|c| round_tenth(km_to_miles(haversine_km(origin, c))));
        }
    }

    // Ascending by distance, undefined distances last
    groups.sort_by(|a, b| match (a.distance_miles, b.distance_miles) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    groups
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(id: i64, city: &str, state: &str, coords: Option<(f64, f64)>) -> JobPosting {
        JobPosting {
            id,
            title: "Caregiver".to_string(),
            description: "In-home care".to_string(),
            zipcode: "02118".to_string(),
            city: city.to_string(),
            state: state.to_string(),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            active: true,
            created_at: chrono::Utc::now(),
        }
    }

    const BOSTON: Coordinates = Coordinates {
        lat: 42.3601,
        lng: -71.0589,
    };
    const CAMBRIDGE: Coordinates = Coordinates {
        lat: 42.3736,
        lng: -71.1097,
    };

    #[test]
    fn test_haversine_symmetric() {
        let ab = haversine_km(BOSTON, CAMBRIDGE);
        let ba = haversine_km(CAMBRIDGE, BOSTON);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_identity_is_zero() {
        assert_eq!(haversine_km(BOSTON, BOSTON), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Boston to Cambridge is roughly 4.4 km as the crow flies
        let d = haversine_km(BOSTON, CAMBRIDGE);
        assert!(d > 3.5 && d < 5.5, "unexpected distance: {}", d);
    }

    #[test]
    fn test_same_city_postings_share_a_group() {
        let jobs = vec![
            posting(1, "Boston", "MA", Some((42.36, -71.06))),
            posting(2, "Cambridge", "MA", Some((42.37, -71.11))),
            posting(3, "boston", "ma", Some((42.35, -71.07))),
        ];

        let groups = group_by_city(jobs, None);
        assert_eq!(groups.len(), 2);

        let boston = groups
            .iter()
            .find(|g| g.city.eq_ignore_ascii_case("boston"))
            .unwrap();
        assert_eq!(boston.jobs.len(), 2);
        assert_eq!(boston.state, "MA");
    }

    #[test]
    fn test_groups_sorted_ascending_by_distance() {
        let jobs = vec![
            posting(1, "Worcester", "MA", Some((42.2626, -71.8023))),
            posting(2, "Cambridge", "MA", Some((42.3736, -71.1097))),
        ];

        let groups = group_by_city(jobs, Some(BOSTON));
        assert_eq!(groups[0].city, "Cambridge");
        assert_eq!(groups[1].city, "Worcester");
        assert!(groups[0].distance_miles.unwrap() < groups[1].distance_miles.unwrap());
    }

    #[test]
    fn test_undefined_distance_sorts_last() {
        // Insertion order puts the coordinate-less group first
        let jobs = vec![
            posting(1, "Springfield", "MA", None),
            posting(2, "Cambridge", "MA", Some((42.3736, -71.1097))),
        ];

        let groups = group_by_city(jobs, Some(BOSTON));
        assert_eq!(groups[0].city, "Cambridge");
        assert!(groups[0].distance_miles.is_some());
        assert_eq!(groups[1].city, "Springfield");
        assert!(groups[1].distance_miles.is_none());
    }

    #[test]
    fn test_no_origin_leaves_distances_undefined() {
        let jobs = vec![posting(1, "Boston", "MA", Some((42.36, -71.06)))];
        let groups = group_by_city(jobs, None);
        assert!(groups[0].distance_miles.is_none());
    }
}
