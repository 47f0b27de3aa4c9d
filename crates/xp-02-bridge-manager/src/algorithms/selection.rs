//! # Adapter Selection
//!
//! Orders capable adapters by health, then preference, then registration.

use shared_types::ProtocolKind;

/// Selection input for one capable adapter.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub protocol: ProtocolKind,
    /// Position in the registry.
    pub registration: usize,
    pub healthy: bool,
    pub success_rate: f64,
}

/// Order candidates: healthy first, then by preference list, then by
/// registration. Candidates under `min_success_rate` are dropped.
pub fn rank_candidates(
    mut candidates: Vec<Candidate>,
    preference: &[ProtocolKind],
    min_success_rate: Option<f64>,
) -> Vec<Candidate> {
    if let Some(min) = min_success_rate {
        candidates.retain(|c| c.success_rate >= min);
    }

    let rank = |c: &Candidate| {
        let preferred = preference
            .iter()
            .position(|p| *p == c.protocol)
            .unwrap_or(preference.len());
        (!c.healthy, preferred, c.registration)
    };
    candidates.sort_by_key(rank);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candidate(protocol: ProtocolKind, registration: usize, healthy: bool) -> Candidate {
        Candidate {
            protocol,
            registration,
            healthy,
            success_rate: if healthy { 1.0 } else { 0.2 },
        }
    }

    #[test]
    fn test_registration_order_by_default() {
        let ranked = rank_candidates(
            vec![
                candidate(ProtocolKind::LiquiditySwap, 1, true),
                candidate(ProtocolKind::Attestation, 0, true),
            ],
            &[],
            None,
        );
        assert_eq!(ranked[0].protocol, ProtocolKind::Attestation);
    }

    #[test]
    fn test_preference_overrides_registration() {
        let ranked = rank_candidates(
            vec![
                candidate(ProtocolKind::Attestation, 0, true),
                candidate(ProtocolKind::LiquiditySwap, 1, true),
            ],
            &[ProtocolKind::LiquiditySwap],
            None,
        );
        assert_eq!(ranked[0].protocol, ProtocolKind::LiquiditySwap);
    }

    #[test]
    fn test_unhealthy_sorted_last() {
        let ranked = rank_candidates(
            vec![
                candidate(ProtocolKind::Attestation, 0, false),
                candidate(ProtocolKind::LiquiditySwap, 1, true),
            ],
            &[ProtocolKind::Attestation],
            None,
        );
        assert_eq!(ranked[0].protocol, ProtocolKind::LiquiditySwap);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_hard_gate_drops_candidates() {
        let ranked = rank_candidates(
            vec![
                candidate(ProtocolKind::Attestation, 0, false),
                candidate(ProtocolKind::LiquiditySwap, 1, true),
            ],
            &[],
            Some(0.5),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].protocol, ProtocolKind::LiquiditySwap);
    }

    proptest! {
        #[test]
        fn prop_ranking_keeps_every_candidate_without_gate(flags in proptest::collection::vec(any::<bool>(), 0..3)) {
            let kinds = [ProtocolKind::Attestation, ProtocolKind::LiquiditySwap, ProtocolKind::ContractEvent];
            let input: Vec<Candidate> = flags
                .iter()
                .enumerate()
                .map(|(i, healthy)| candidate(kinds[i], i, *healthy))
                .collect();
            let ranked = rank_candidates(input.clone(), &[], None);
            prop_assert_eq!(ranked.len(), input.len());
            let first_unhealthy = ranked.iter().position(|c| !c.healthy).unwrap_or(ranked.len());
            prop_assert!(ranked[first_unhealthy..].iter().all(|c| !c.healthy));
        }
    }
}
