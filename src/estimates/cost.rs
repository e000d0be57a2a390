use rand::Rng;
use serde::Serialize;

use super::distance::DistanceEstimator;
use super::dto::{
    AdditionalItems, CalculationInput, CostBreakdown, HomeSize, Service, TierCosts,
};

/// Per-tier dollar amounts: (diy, hybrid, full_service).
type Tiered = (i64, i64, i64);

/// Base cost table keyed by home size. Strictly increasing across tiers and
/// across sizes.
fn base_costs(size: HomeSize) -> Tiered {
    match size {
        HomeSize::Studio => (300, 800, 1500),
        HomeSize::OneBedroom => (450, 1200, 2200),
        HomeSize::TwoBedroom => (700, 1800, 3500),
        HomeSize::ThreeBedroom => (1000, 2500, 5000),
    }
}

/// Per-mile rates, cheapest for DIY.
const RATE_DIY: f64 = 0.70;
const RATE_HYBRID: f64 = 1.50;
const RATE_FULL: f64 = 2.50;

/// Full-service absorbs a piano at no marginal cost: it is already included.
fn item_surcharge(items: AdditionalItems) -> Tiered {
    match items {
        AdditionalItems::None => (0, 0, 0),
        AdditionalItems::Piano => (250, 400, 0),
        AdditionalItems::Artwork => (100, 150, 200),
        AdditionalItems::Gym => (150, 250, 300),
        AdditionalItems::Multiple => (300, 500, 600),
    }
}

/// Packing is already bundled in full service.
fn service_surcharge(service: Service) -> Tiered {
    match service {
        Service::Packing => (100, 200, 0),
        Service::Storage => (150, 150, 150),
        Service::Cleaning => (200, 200, 200),
    }
}

/// Stand-in for a real mover-inventory integration.
pub trait AvailabilityOracle: Send + Sync {
    fn is_available(&self) -> bool;
}

/// Production oracle: roughly 70% of slots are open.
pub struct RandomAvailability;

impl AvailabilityOracle for RandomAvailability {
    fn is_available(&self) -> bool {
        rand::thread_rng().gen_bool(0.7)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Company {
    pub name: &'static str,
    pub rating: f64,
    pub price_level: &'static str,
    pub available: bool,
}

static COMPANY_CATALOG: [(&str, f64, &str); 5] = [
    ("Atlas Relocation", 4.8, "$$$"),
    ("Two Guys and a Van", 4.6, "$$"),
    ("BoxCar Movers", 4.3, "$$"),
    ("Summit Van Lines", 4.5, "$$$"),
    ("Hometown Haulers", 4.4, "$"),
];

/// Assigns availability to every catalog entry, then returns exactly the
/// first two entries — not sorted or filtered by availability.
pub fn recommend_companies(oracle: &dyn AvailabilityOracle) -> Vec<Company> {
    let mut companies: Vec<Company> = COMPANY_CATALOG
        .iter()
        .map(|(name, rating, price_level)| Company {
            name,
            rating: *rating,
            price_level,
            available: oracle.is_available(),
        })
        .collect();
    companies.truncate(2);
    companies
}

#[derive(Debug)]
pub struct CostEstimate {
    pub distance: i64,
    pub costs: TierCosts,
    pub breakdown: CostBreakdown,
    pub companies: Vec<Company>,
}

/// Pure cost pipeline: base table, distance surcharge (rounded per tier),
/// additional-item surcharge, then service surcharges. The breakdown is
/// derived from the hybrid total alone.
pub fn estimate(
    input: &CalculationInput,
    estimator: &dyn DistanceEstimator,
    oracle: &dyn AvailabilityOracle,
) -> CostEstimate {
    let distance = estimator.estimate_miles(&input.origin, &input.destination);

    let (base_diy, base_hybrid, base_full) = base_costs(input.home_size);
    let mut diy = base_diy + (distance as f64 * RATE_DIY).round() as i64;
    let mut hybrid = base_hybrid + (distance as f64 * RATE_HYBRID).round() as i64;
    let mut full = base_full + (distance as f64 * RATE_FULL).round() as i64;

    let (item_diy, item_hybrid, item_full) = item_surcharge(input.additional_items);
    diy += item_diy;
    hybrid += item_hybrid;
    full += item_full;

    for service in &input.services {
        let (s_diy, s_hybrid, s_full) = service_surcharge(*service);
        diy += s_diy;
        hybrid += s_hybrid;
        full += s_full;
    }

    CostEstimate {
        distance,
        breakdown: breakdown(hybrid),
        costs: TierCosts {
            diy,
            hybrid,
            full_service: full,
        },
        companies: recommend_companies(oracle),
    }
}

/// Visualization breakdown computed from the hybrid total as the reference.
/// Rounding drift against the total is expected.
pub fn breakdown(hybrid_total: i64) -> CostBreakdown {
    let total = hybrid_total as f64;
    CostBreakdown {
        transportation: (total * 0.45).round() as i64,
        labor: (total * 0.30).round() as i64,
        materials: (total * 0.15).round() as i64,
        other: (total * 0.10).round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimates::distance::FixedDistance;
    use crate::estimates::dto::Flexibility;

    struct AlwaysAvailable;
    impl AvailabilityOracle for AlwaysAvailable {
        fn is_available(&self) -> bool {
            true
        }
    }

    fn input(
        home_size: HomeSize,
        additional_items: AdditionalItems,
        services: Vec<Service>,
    ) -> CalculationInput {
        CalculationInput {
            origin: "123 Main St, New York, NY".into(),
            destination: "456 Oak Ave, New York, NY".into(),
            home_size,
            additional_items,
            move_date: "2025-06-01".into(),
            flexibility: Flexibility::Exact,
            services,
        }
    }

    #[test]
    fn base_table_orders_tiers_for_every_size() {
        for size in HomeSize::ALL {
            let result = estimate(
                &input(size, AdditionalItems::None, vec![]),
                &FixedDistance(0),
                &AlwaysAvailable,
            );
            assert!(
                result.costs.diy < result.costs.hybrid
                    && result.costs.hybrid < result.costs.full_service,
                "tier ordering broken for {}",
                size.as_str()
            );
        }
    }

    #[test]
    fn zero_everything_returns_the_raw_base_table() {
        let result = estimate(
            &input(HomeSize::TwoBedroom, AdditionalItems::None, vec![]),
            &FixedDistance(0),
            &AlwaysAvailable,
        );
        assert_eq!(result.costs.diy, 700);
        assert_eq!(result.costs.hybrid, 1800);
        assert_eq!(result.costs.full_service, 3500);
    }

    #[test]
    fn distance_surcharge_rounds_per_tier() {
        let result = estimate(
            &input(HomeSize::Studio, AdditionalItems::None, vec![]),
            &FixedDistance(15),
            &AlwaysAvailable,
        );
        // 15 * 0.70 = 10.5 -> 11; 15 * 1.50 = 22.5 -> 23 (ties away from zero);
        // 15 * 2.50 = 37.5 -> 38
        assert_eq!(result.costs.diy, 300 + 11);
        assert_eq!(result.costs.hybrid, 800 + 23);
        assert_eq!(result.costs.full_service, 1500 + 38);
    }

    #[test]
    fn full_service_absorbs_piano() {
        let with_piano = estimate(
            &input(HomeSize::OneBedroom, AdditionalItems::Piano, vec![]),
            &FixedDistance(0),
            &AlwaysAvailable,
        );
        let without = estimate(
            &input(HomeSize::OneBedroom, AdditionalItems::None, vec![]),
            &FixedDistance(0),
            &AlwaysAvailable,
        );
        assert_eq!(with_piano.costs.full_service, without.costs.full_service);
        assert!(with_piano.costs.diy > without.costs.diy);
        assert!(with_piano.costs.hybrid > without.costs.hybrid);
    }

    #[test]
    fn services_sum_independently() {
        let result = estimate(
            &input(
                HomeSize::Studio,
                AdditionalItems::None,
                vec![Service::Packing, Service::Storage, Service::Cleaning],
            ),
            &FixedDistance(0),
            &AlwaysAvailable,
        );
        assert_eq!(result.costs.diy, 300 + 100 + 150 + 200);
        assert_eq!(result.costs.hybrid, 800 + 200 + 150 + 200);
        assert_eq!(result.costs.full_service, 1500 + 0 + 150 + 200);
    }

    #[test]
    fn breakdown_components_are_bounded_and_near_the_total() {
        for total in [800, 1800, 2122, 5000, 12345] {
            let b = breakdown(total);
            for part in [b.transportation, b.labor, b.materials, b.other] {
                assert!(part >= 0);
                assert!(part <= total);
            }
            let sum = b.transportation + b.labor + b.materials + b.other;
            assert!((sum - total).abs() <= 4, "drift too large for {total}: {sum}");
        }
    }

    #[test]
    fn exactly_two_companies_in_catalog_order() {
        let companies = recommend_companies(&AlwaysAvailable);
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].name, "Atlas Relocation");
        assert_eq!(companies[1].name, "Two Guys and a Van");
        assert!(companies.iter().all(|c| c.available));
    }

    #[test]
    fn worked_example_same_city_two_bedroom() {
        // same-city request pinned to 12 miles
        let result = estimate(
            &input(HomeSize::TwoBedroom, AdditionalItems::None, vec![]),
            &FixedDistance(12),
            &AlwaysAvailable,
        );
        assert_eq!(result.distance, 12);
        assert_eq!(result.costs.diy, 700 + 8); // 12 * 0.70 = 8.4 -> 8
        assert_eq!(result.costs.hybrid, 1800 + 18);
        assert_eq!(result.costs.full_service, 3500 + 30);
        assert_eq!(result.companies.len(), 2);
        let sum = result.breakdown.transportation
            + result.breakdown.labor
            + result.breakdown.materials
            + result.breakdown.other;
        assert!((sum - result.costs.hybrid).abs() <= 4);
    }
}
