//! Spin planning and angle-to-section resolution.

use std::time::Duration;

use serde::Serialize;

use super::{RouletteSection, SECTION_COUNT, SECTION_DEGREES, SECTIONS};
use crate::rng::RandomSource;

/// How long the wheel turns before the result is committed.
pub const SPIN_SETTLE: Duration = Duration::from_millis(4000);

/// Rotation added by every spin before the random offset (five full turns).
pub const BASE_SPIN_DEGREES: u64 = 1800;

/// Sections are drawn shifted by half an arc so section 0 is centered
/// under the pointer at rest.
const POINTER_OFFSET: u64 = SECTION_DEGREES / 2;

/// The outcome of starting a spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpinPlan {
    /// Cumulative rotation the wheel turns to.
    pub target_degrees: u64,
    /// Random offset that was added on top of the base turns.
    pub extra_degrees: u64,
    /// Settle window before the result may be resolved.
    pub settle: Duration,
}

/// A resolved roulette outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Index of the selected section (0..12).
    pub index: usize,
    /// The selected section.
    pub section: &'static RouletteSection,
}

/// Plan a spin from the current cumulative rotation.
///
/// Draws one offset in `0..360` and adds it to five full turns.
pub fn plan_spin(current_degrees: u64, rng: &mut dyn RandomSource) -> SpinPlan {
    let extra_degrees = u64::from(rng.uniform(0, 359));
    SpinPlan {
        target_degrees: current_degrees + BASE_SPIN_DEGREES + extra_degrees,
        extra_degrees,
        settle: SPIN_SETTLE,
    }
}

/// Index of the section under the pointer for a cumulative rotation.
///
/// The wheel turns clockwise under a fixed pointer, so selection travels
/// against the rotation.
pub fn section_index(cumulative_degrees: u64) -> usize {
    let normalized = cumulative_degrees % 360;
    let offset = (360 - normalized + POINTER_OFFSET) % 360;
    (offset / SECTION_DEGREES) as usize % SECTION_COUNT
}

/// Resolve a cumulative rotation to a section.
pub fn resolve(cumulative_degrees: u64) -> Resolution {
    let index = section_index(cumulative_degrees);
    Resolution {
        index,
        section: &SECTIONS[index],
    }
}

/// Normalized rotation at which section `index` sits centered under the
/// pointer.
pub fn section_center(index: usize) -> u64 {
    (360 - (index % SECTION_COUNT) as u64 * SECTION_DEGREES) % 360
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use proptest::prelude::*;

    #[test]
    fn every_center_resolves_to_its_section() {
        for i in 0..SECTION_COUNT {
            assert_eq!(section_index(section_center(i)), i, "section {i}");
            assert_eq!(section_index(section_center(i) + 360 * 7), i);
        }
    }

    #[test]
    fn boundary_tie_break() {
        assert_eq!(section_index(14), 0);
        assert_eq!(section_index(15), 0);
        assert_eq!(section_index(16), 11);
        assert_eq!(section_index(45), 11);
        assert_eq!(section_index(46), 10);
        assert_eq!(section_index(345), 1);
        assert_eq!(section_index(346), 0);
    }

    #[test]
    fn zero_and_full_turns_resolve_to_first() {
        assert_eq!(section_index(0), 0);
        assert_eq!(section_index(360), 0);
        assert_eq!(section_index(1800), 0);
    }

    #[test]
    fn scripted_zero_offset() {
        let mut rng = ScriptedSource::new([0]);
        let plan = plan_spin(0, &mut rng);
        assert_eq!(plan.target_degrees, 1800);
        assert_eq!(plan.settle, Duration::from_millis(4000));

        let res = resolve(plan.target_degrees);
        assert_eq!(res.index, 0);
        assert_eq!(res.section.text, "Choveu");
        assert!(!res.section.is_good);
    }

    #[test]
    fn scripted_offset_accumulates() {
        let mut rng = ScriptedSource::new([30, 359]);
        let first = plan_spin(0, &mut rng);
        assert_eq!(first.target_degrees, 1830);
        assert_eq!(resolve(first.target_degrees).index, 11);

        let second = plan_spin(first.target_degrees, &mut rng);
        assert_eq!(second.target_degrees, 1830 + 1800 + 359);
    }

    proptest! {
        #[test]
        fn spin_adds_between_1800_and_2160(current in 0u64..1_000_000, seed in any::<u64>()) {
            let mut rng = crate::rng::StdRandom::seeded(seed);
            let plan = plan_spin(current, &mut rng);
            let delta = plan.target_degrees - current;
            prop_assert!((1800..2160).contains(&delta));
        }

        #[test]
        fn resolution_ignores_full_turns(deg in 0u64..360, turns in 0u64..10_000) {
            prop_assert_eq!(section_index(deg), section_index(deg + turns * 360));
        }

        #[test]
        fn each_section_spans_thirty_degrees(i in 0usize..12, within in 0u64..30) {
            // Section i covers the half-open arc (center - 15, center + 15].
            let start = (section_center(i) + 360 - 14) % 360;
            prop_assert_eq!(section_index((start + within) % 360), i);
        }
    }
}
