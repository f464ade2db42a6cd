//! Batch planning
//!
//! Splits a batch's identifiers into carrier-appropriate work units: one
//! identifier per unit for UPS (its API has no bulk lookup), contiguous
//! chunks of up to [`USPS_CHUNK_SIZE`] for USPS.

use shiptrack_domain::constants::USPS_CHUNK_SIZE;
use shiptrack_domain::{Carrier, WorkUnit};

/// Plan a batch of identifiers into work units for the given carrier.
///
/// Order-preserving; every input identifier lands in exactly one unit.
/// Duplicates pass through as distinct requests - deduplication is the
/// caller's policy, not the planner's. Empty input yields an empty plan and
/// no network calls are issued.
pub fn plan(identifiers: &[String], carrier: Carrier) -> Vec<WorkUnit> {
    match carrier {
        Carrier::Ups => identifiers
            .iter()
            .map(|id| WorkUnit::new(carrier, vec![id.clone()]))
            .collect(),
        Carrier::Usps => identifiers
            .chunks(USPS_CHUNK_SIZE)
            .map(|chunk| WorkUnit::new(carrier, chunk.to_vec()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identifiers(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("ID{i:03}")).collect()
    }

    #[test]
    fn ups_plan_is_one_unit_per_identifier() {
        for n in [0, 1, 7, 25] {
            let ids = identifiers(n);
            let units = plan(&ids, Carrier::Ups);
            assert_eq!(units.len(), n);
            for (unit, id) in units.iter().zip(&ids) {
                assert_eq!(unit.identifiers, vec![id.clone()]);
            }
        }
    }

    #[test]
    fn usps_plan_chunks_preserve_order_and_sizes() {
        for n in 0..=35 {
            let ids = identifiers(n);
            let units = plan(&ids, Carrier::Usps);

            assert_eq!(units.len(), n.div_ceil(USPS_CHUNK_SIZE));
            assert_eq!(units.iter().map(WorkUnit::len).sum::<usize>(), n);
            assert!(units.iter().all(|u| u.len() <= USPS_CHUNK_SIZE));

            let flattened: Vec<String> =
                units.iter().flat_map(|u| u.identifiers.clone()).collect();
            assert_eq!(flattened, ids, "chunking must preserve input order");
        }
    }

    #[test]
    fn usps_final_chunk_may_be_short() {
        let units = plan(&identifiers(12), Carrier::Usps);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].len(), 10);
        assert_eq!(units[1].len(), 2);
    }

    #[test]
    fn duplicates_pass_through_as_distinct_requests() {
        let ids = vec!["SAME".to_string(), "SAME".to_string()];
        assert_eq!(plan(&ids, Carrier::Ups).len(), 2);
        assert_eq!(plan(&ids, Carrier::Usps)[0].len(), 2);
    }
}
