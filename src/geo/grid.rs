use serde::Serialize;

/// Catalog entry: city, state code, coordinates, baseline hybrid cost and a
/// popularity score. Reference data, not derived from live sources.
struct CityEntry {
    city: &'static str,
    state: &'static str,
    lat: f64,
    lon: f64,
    base_cost: f64,
    popularity: i64,
}

static CITY_CATALOG: [CityEntry; 36] = [
    CityEntry { city: "New York", state: "NY", lat: 40.7128, lon: -74.0060, base_cost: 2500.0, popularity: 95 },
    CityEntry { city: "Los Angeles", state: "CA", lat: 34.0522, lon: -118.2437, base_cost: 2300.0, popularity: 90 },
    CityEntry { city: "Chicago", state: "IL", lat: 41.8781, lon: -87.6298, base_cost: 1900.0, popularity: 85 },
    CityEntry { city: "Houston", state: "TX", lat: 29.7604, lon: -95.3698, base_cost: 1700.0, popularity: 80 },
    CityEntry { city: "Phoenix", state: "AZ", lat: 33.4484, lon: -112.0740, base_cost: 1600.0, popularity: 78 },
    CityEntry { city: "Philadelphia", state: "PA", lat: 39.9526, lon: -75.1652, base_cost: 1800.0, popularity: 75 },
    CityEntry { city: "San Antonio", state: "TX", lat: 29.4241, lon: -98.4936, base_cost: 1500.0, popularity: 70 },
    CityEntry { city: "San Diego", state: "CA", lat: 32.7157, lon: -117.1611, base_cost: 2000.0, popularity: 82 },
    CityEntry { city: "Dallas", state: "TX", lat: 32.7767, lon: -96.7970, base_cost: 1700.0, popularity: 79 },
    CityEntry { city: "Austin", state: "TX", lat: 30.2672, lon: -97.7431, base_cost: 1800.0, popularity: 88 },
    CityEntry { city: "San Jose", state: "CA", lat: 37.3382, lon: -121.8863, base_cost: 2400.0, popularity: 72 },
    CityEntry { city: "Jacksonville", state: "FL", lat: 30.3322, lon: -81.6557, base_cost: 1400.0, popularity: 65 },
    CityEntry { city: "Columbus", state: "OH", lat: 39.9612, lon: -82.9988, base_cost: 1300.0, popularity: 64 },
    CityEntry { city: "Fort Worth", state: "TX", lat: 32.7555, lon: -97.3308, base_cost: 1500.0, popularity: 62 },
    CityEntry { city: "Charlotte", state: "NC", lat: 35.2271, lon: -80.8431, base_cost: 1450.0, popularity: 74 },
    CityEntry { city: "Seattle", state: "WA", lat: 47.6062, lon: -122.3321, base_cost: 2200.0, popularity: 86 },
    CityEntry { city: "Denver", state: "CO", lat: 39.7392, lon: -104.9903, base_cost: 1900.0, popularity: 84 },
    CityEntry { city: "Nashville", state: "TN", lat: 36.1627, lon: -86.7816, base_cost: 1600.0, popularity: 81 },
    CityEntry { city: "Boston", state: "MA", lat: 42.3601, lon: -71.0589, base_cost: 2300.0, popularity: 83 },
    CityEntry { city: "Portland", state: "OR", lat: 45.5152, lon: -122.6784, base_cost: 1900.0, popularity: 76 },
    CityEntry { city: "Las Vegas", state: "NV", lat: 36.1699, lon: -115.1398, base_cost: 1500.0, popularity: 77 },
    CityEntry { city: "Detroit", state: "MI", lat: 42.3314, lon: -83.0458, base_cost: 1200.0, popularity: 58 },
    CityEntry { city: "Memphis", state: "TN", lat: 35.1495, lon: -90.0490, base_cost: 1250.0, popularity: 55 },
    CityEntry { city: "Baltimore", state: "MD", lat: 39.2904, lon: -76.6122, base_cost: 1550.0, popularity: 60 },
    CityEntry { city: "Milwaukee", state: "WI", lat: 43.0389, lon: -87.9065, base_cost: 1350.0, popularity: 57 },
    CityEntry { city: "Albuquerque", state: "NM", lat: 35.0844, lon: -106.6504, base_cost: 1300.0, popularity: 54 },
    CityEntry { city: "Tucson", state: "AZ", lat: 32.2226, lon: -110.9747, base_cost: 1250.0, popularity: 53 },
    CityEntry { city: "Sacramento", state: "CA", lat: 38.5816, lon: -121.4944, base_cost: 1800.0, popularity: 66 },
    CityEntry { city: "Kansas City", state: "MO", lat: 39.0997, lon: -94.5786, base_cost: 1350.0, popularity: 61 },
    CityEntry { city: "Atlanta", state: "GA", lat: 33.7490, lon: -84.3880, base_cost: 1700.0, popularity: 87 },
    CityEntry { city: "Miami", state: "FL", lat: 25.7617, lon: -80.1918, base_cost: 1900.0, popularity: 89 },
    CityEntry { city: "Raleigh", state: "NC", lat: 35.7796, lon: -78.6382, base_cost: 1500.0, popularity: 73 },
    CityEntry { city: "Minneapolis", state: "MN", lat: 44.9778, lon: -93.2650, base_cost: 1500.0, popularity: 68 },
    CityEntry { city: "New Orleans", state: "LA", lat: 29.9511, lon: -90.0715, base_cost: 1400.0, popularity: 63 },
    CityEntry { city: "Tampa", state: "FL", lat: 27.9506, lon: -82.4572, base_cost: 1500.0, popularity: 71 },
    CityEntry { city: "Salt Lake City", state: "UT", lat: 40.7608, lon: -111.8910, base_cost: 1450.0, popularity: 67 },
];

/// One heatmap row.
#[derive(Debug, Clone, Serialize)]
pub struct CityCost {
    pub city: &'static str,
    pub state: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub diy_cost: i64,
    pub hybrid_cost: i64,
    pub full_service_cost: i64,
    pub popularity: i64,
}

/// Great-circle distance in kilometers (standard double-precision
/// Haversine, R = 6371 km).
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

fn home_size_multiplier(home_size: &str) -> f64 {
    match home_size {
        "studio" => 0.6,
        "1bedroom" => 0.8,
        "2bedroom" => 1.0,
        "3bedroom" => 1.3,
        _ => 1.5,
    }
}

fn match_origin(origin: &str) -> &'static CityEntry {
    let origin_city = origin
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    CITY_CATALOG
        .iter()
        .find(|entry| {
            let name = entry.city.to_lowercase();
            !origin_city.is_empty() && (origin_city.contains(&name) || name.contains(&origin_city))
        })
        .unwrap_or(&CITY_CATALOG[0])
}

/// Synthetic per-city cost table anchored at the matched origin. The hybrid
/// cost scales with home size and great-circle distance; DIY and
/// full-service are fixed ratios of it. Popularity decays with distance
/// (one point per 50 km) and never drops below 20.
pub fn cost_grid(origin: &str, home_size: &str) -> Vec<CityCost> {
    let anchor = match_origin(origin);
    let multiplier = home_size_multiplier(home_size);

    CITY_CATALOG
        .iter()
        .map(|entry| {
            let distance_km = haversine_km(anchor.lat, anchor.lon, entry.lat, entry.lon);
            let hybrid =
                (entry.base_cost * multiplier * (1.0 + distance_km / 1000.0)).round() as i64;
            let diy = (hybrid as f64 * 0.6).round() as i64;
            let full = (hybrid as f64 * 1.7).round() as i64;
            let popularity = (entry.popularity - (distance_km / 50.0).round() as i64).max(20);
            CityCost {
                city: entry.city,
                state: entry.state,
                lat: entry.lat,
                lon: entry.lon,
                diy_cost: diy,
                hybrid_cost: hybrid,
                full_service_cost: full,
                popularity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_new_york_to_los_angeles() {
        let d = haversine_km(40.7128, -74.0060, 34.0522, -118.2437);
        assert!((d - 3936.0).abs() < 10.0, "NY-LA distance was {d}");
    }

    #[test]
    fn haversine_is_zero_for_identical_points() {
        assert_eq!(haversine_km(41.8781, -87.6298, 41.8781, -87.6298), 0.0);
    }

    #[test]
    fn every_row_orders_its_tiers() {
        for row in cost_grid("Denver, CO", "3bedroom") {
            assert!(
                row.diy_cost < row.hybrid_cost && row.hybrid_cost < row.full_service_cost,
                "tier ordering broken for {}",
                row.city
            );
        }
    }

    #[test]
    fn self_origin_yields_base_cost_times_multiplier_only() {
        let rows = cost_grid("Chicago, IL", "2bedroom");
        let chicago = rows.iter().find(|r| r.city == "Chicago").unwrap();
        // distance factor is 1 at zero self-distance, 2bedroom multiplier is 1.0
        assert_eq!(chicago.hybrid_cost, 1900);
        assert_eq!(chicago.popularity, 85);

        let studio_rows = cost_grid("Chicago, IL", "studio");
        let chicago_studio = studio_rows.iter().find(|r| r.city == "Chicago").unwrap();
        assert_eq!(chicago_studio.hybrid_cost, (1900.0_f64 * 0.6).round() as i64);
    }

    #[test]
    fn unknown_origin_falls_back_to_first_catalog_entry() {
        let rows = cost_grid("Nowhereville, ZZ", "2bedroom");
        let anchor_row = rows.iter().find(|r| r.city == "New York").unwrap();
        assert_eq!(anchor_row.hybrid_cost, 2500);
    }

    #[test]
    fn origin_match_is_case_insensitive_substring() {
        let rows = cost_grid("salt lake city, UT", "2bedroom");
        let slc = rows.iter().find(|r| r.city == "Salt Lake City").unwrap();
        assert_eq!(slc.hybrid_cost, 1450);
    }

    #[test]
    fn popularity_decays_with_distance_but_never_below_floor() {
        let rows = cost_grid("New York, NY", "2bedroom");
        let la = rows.iter().find(|r| r.city == "Los Angeles").unwrap();
        assert!(la.popularity < 90);
        assert!(rows.iter().all(|r| r.popularity >= 20));
    }

    #[test]
    fn unknown_home_size_uses_largest_multiplier() {
        let rows = cost_grid("Chicago, IL", "castle");
        let chicago = rows.iter().find(|r| r.city == "Chicago").unwrap();
        assert_eq!(chicago.hybrid_cost, (1900.0_f64 * 1.5).round() as i64);
    }
}
