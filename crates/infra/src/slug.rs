//! Random numeric slug assignment.
//!
//! Every externally addressable record gets an opaque slug instead of
//! exposing its internal identifier. Slugs are drawn at random so URLs
//! carry no ordering information.

use rand::Rng;
use thiserror::Error;

/// Generated slug length: eight decimal digits, zero-padded.
pub const SLUG_LEN: usize = 8;

/// Default attempt bound for [`generate_slug`].
pub const DEFAULT_SLUG_ATTEMPTS: u32 = 32;

/// The bounded search gave up before finding a free slug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not find a free slug in {attempts} attempts")]
pub struct SlugSpaceExhausted {
    pub attempts: u32,
}

/// Draw zero-padded numeric slugs from `rng` until one is free.
///
/// Candidates are checked against `exists`, and the search is bounded so a
/// dense slug space surfaces as an error instead of a spin. Callers re-check
/// uniqueness at commit time; this function only proposes.
pub fn generate_slug<R, F>(
    rng: &mut R,
    mut exists: F,
    attempts: u32,
) -> Result<String, SlugSpaceExhausted>
where
    R: Rng + ?Sized,
    F: FnMut(&str) -> bool,
{
    for _ in 0..attempts {
        let candidate = format!("{:0width$}", rng.gen_range(0..100_000_000u32), width = SLUG_LEN);
        if !exists(&candidate) {
            return Ok(candidate);
        }
    }
    Err(SlugSpaceExhausted { attempts })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn slugs_are_eight_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let slug = generate_slug(&mut rng, |_| false, DEFAULT_SLUG_ATTEMPTS).unwrap();
            assert_eq!(slug.len(), SLUG_LEN);
            assert!(slug.bytes().all(|b| b.is_ascii_digit()), "{slug}");
        }
    }

    #[test]
    fn small_values_are_zero_padded() {
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        let slug = generate_slug(&mut rng, |_| false, 1).unwrap();
        assert_eq!(slug, "00000000");
    }

    #[test]
    fn collisions_trigger_a_retry() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = Vec::new();
        let slug = generate_slug(
            &mut rng,
            |candidate| {
                // Refuse the first two candidates.
                seen.push(candidate.to_string());
                seen.len() <= 2
            },
            DEFAULT_SLUG_ATTEMPTS,
        )
        .unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen.last().unwrap(), &slug);
    }

    #[test]
    fn exhaustion_is_reported_not_spun() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut calls = 0u32;
        let err = generate_slug(
            &mut rng,
            |_| {
                calls += 1;
                true
            },
            5,
        )
        .unwrap_err();
        assert_eq!(err, SlugSpaceExhausted { attempts: 5 });
        assert_eq!(calls, 5);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_slug(&mut StdRng::seed_from_u64(99), |_| false, 1).unwrap();
        let b = generate_slug(&mut StdRng::seed_from_u64(99), |_| false, 1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_runs_stay_distinct() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let slug = generate_slug(&mut rng, |s| seen.contains(s), DEFAULT_SLUG_ATTEMPTS).unwrap();
            assert!(seen.insert(slug));
        }
    }
}
