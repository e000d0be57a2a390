use rand::Rng;

/// How far apart the two addresses look, judged from their text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveScope {
    Local,
    InState,
    LongDistance,
}

impl MoveScope {
    /// Half-open mile range each scope draws from.
    pub fn miles_range(self) -> std::ops::Range<i64> {
        match self {
            MoveScope::Local => 5..25,
            MoveScope::InState => 25..200,
            MoveScope::LongDistance => 200..3000,
        }
    }
}

/// Classify a pair of free-text addresses by comparing their comma-separated
/// parts: a shared locality token means a local move, a shared trailing
/// "state" token an in-state move, anything else long distance.
pub fn classify(origin: &str, destination: &str) -> MoveScope {
    let origin_parts = address_parts(origin);
    let dest_parts = address_parts(destination);

    // The trailing part is the state, so it is excluded from the locality
    // comparison: two addresses must share a city token, not merely a
    // state, to count as a local move.
    let origin_locality = locality(&origin_parts);
    let dest_locality = locality(&dest_parts);

    if origin_locality
        .iter()
        .any(|p| dest_locality.iter().any(|q| p == q))
    {
        return MoveScope::Local;
    }

    match (origin_parts.last(), dest_parts.last()) {
        (Some(a), Some(b)) if a == b => MoveScope::InState,
        _ => MoveScope::LongDistance,
    }
}

fn address_parts(address: &str) -> Vec<String> {
    address
        .split(',')
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

fn locality(parts: &[String]) -> &[String] {
    // A single-token address has no separate state part; treat the whole
    // thing as locality.
    if parts.len() > 1 {
        &parts[..parts.len() - 1]
    } else {
        parts
    }
}

/// Stand-in for a real geocoding/distance-matrix integration. Swappable so
/// tests (and an eventual real integration) can pin the returned distance.
pub trait DistanceEstimator: Send + Sync {
    fn estimate_miles(&self, origin: &str, destination: &str) -> i64;
}

/// Production estimator: classifies the pair, then draws a magnitude
/// uniformly from the scope's range.
pub struct HeuristicDistance;

impl DistanceEstimator for HeuristicDistance {
    fn estimate_miles(&self, origin: &str, destination: &str) -> i64 {
        let scope = classify(origin, destination);
        rand::thread_rng().gen_range(scope.miles_range())
    }
}

#[cfg(test)]
pub struct FixedDistance(pub i64);

#[cfg(test)]
impl DistanceEstimator for FixedDistance {
    fn estimate_miles(&self, _origin: &str, _destination: &str) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_city_token_is_local() {
        let scope = classify(
            "123 Main St, New York, NY",
            "456 Oak Ave, New York, NY",
        );
        assert_eq!(scope, MoveScope::Local);
    }

    #[test]
    fn shared_state_token_is_in_state() {
        let scope = classify("Albany, NY", "Buffalo, NY");
        assert_eq!(scope, MoveScope::InState);
    }

    #[test]
    fn state_token_alone_never_counts_as_shared_locality() {
        // different cities in the same state must land in the in-state
        // tier, never local, regardless of address depth
        assert_eq!(
            classify("1 Elm St, Albany, NY", "9 Pine Rd, Buffalo, NY"),
            MoveScope::InState
        );
        assert_eq!(classify("Sacramento, CA", "San Diego, CA"), MoveScope::InState);
    }

    #[test]
    fn single_token_addresses_compare_as_locality() {
        assert_eq!(classify("Denver", "Denver"), MoveScope::Local);
        assert_eq!(classify("Denver", "Denver, CO"), MoveScope::Local);
    }

    #[test]
    fn disjoint_addresses_are_long_distance() {
        let scope = classify("Seattle, WA", "Miami, FL");
        assert_eq!(scope, MoveScope::LongDistance);
    }

    #[test]
    fn comparison_ignores_case_and_whitespace() {
        let scope = classify("boston,  ma", "Cambridge, MA");
        assert_eq!(scope, MoveScope::InState);
    }

    #[test]
    fn empty_addresses_fall_back_to_long_distance() {
        assert_eq!(classify("", ""), MoveScope::LongDistance);
    }

    #[test]
    fn heuristic_draws_stay_inside_the_scope_range() {
        let estimator = HeuristicDistance;
        for _ in 0..50 {
            let local = estimator.estimate_miles("A St, Denver, CO", "B St, Denver, CO");
            assert!((5..25).contains(&local), "local draw out of range: {local}");

            let in_state = estimator.estimate_miles("Denver, CO", "Boulder, CO");
            assert!((25..200).contains(&in_state), "in-state draw out of range: {in_state}");

            let long = estimator.estimate_miles("Denver, CO", "Portland, OR");
            assert!((200..3000).contains(&long), "long draw out of range: {long}");
        }
    }

    #[test]
    fn ranges_are_disjoint() {
        let local = MoveScope::Local.miles_range();
        let in_state = MoveScope::InState.miles_range();
        let long = MoveScope::LongDistance.miles_range();
        assert_eq!(local.end, in_state.start);
        assert_eq!(in_state.end, long.start);
    }
}
