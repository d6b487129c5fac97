//! The roulette of moments.
//!
//! Twelve fixed sections, each a 30 degree wedge classified as a good or a
//! bad moment. The wheel's rotation only ever grows: every spin adds at
//! least five full turns to the previous total so the wheel never snaps
//! back visually.

pub mod resolve;

pub use resolve::{
    BASE_SPIN_DEGREES, Resolution, SPIN_SETTLE, SpinPlan, plan_spin, resolve, section_center,
    section_index,
};

use serde::Serialize;

/// Number of sections on the wheel.
pub const SECTION_COUNT: usize = 12;

/// Arc covered by each section.
pub const SECTION_DEGREES: u64 = 360 / SECTION_COUNT as u64;

/// One labeled wedge of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouletteSection {
    /// Display label.
    pub text: &'static str,
    /// Whether landing here is a good moment.
    pub is_good: bool,
}

impl RouletteSection {
    const fn new(text: &'static str, is_good: bool) -> Self {
        Self { text, is_good }
    }
}

impl std::fmt::Display for RouletteSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_good { "good" } else { "bad" };
        write!(f, "{} ({kind})", self.text)
    }
}

/// The wheel, in drawing order starting at the pointer.
pub const SECTIONS: [RouletteSection; SECTION_COUNT] = [
    RouletteSection::new("Choveu", false),
    RouletteSection::new("Dia ensolarado", true),
    RouletteSection::new("A comida estava ruim", false),
    RouletteSection::new("A comida estava ótima", true),
    RouletteSection::new("Som alto por perto", false),
    RouletteSection::new("Brisa legal", true),
    RouletteSection::new("Cara feia", false),
    RouletteSection::new("Dedada na bochecha", true),
    RouletteSection::new("A brincadeira machucou", false),
    RouletteSection::new("Sorrisos", true),
    RouletteSection::new("Alguém precisou remarcar", false),
    RouletteSection::new("Momento incrível", true),
];

/// Roulette state as seen by renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouletteState {
    /// Total rotation applied to the wheel so far.
    pub cumulative_degrees: u64,
    /// True while a spin's settle window is open.
    pub is_spinning: bool,
    /// The last committed outcome, if any.
    pub last_result: Option<Resolution>,
}

impl RouletteState {
    /// Start a spin: the wheel turns to the plan's target and the previous
    /// result is hidden until the new one is committed.
    pub(crate) fn begin(&mut self, plan: &SpinPlan) {
        self.cumulative_degrees = plan.target_degrees;
        self.is_spinning = true;
        self.last_result = None;
    }

    /// Finish the open spin and record its outcome.
    pub(crate) fn commit(&mut self) -> Resolution {
        let res = resolve(self.cumulative_degrees);
        self.is_spinning = false;
        self.last_result = Some(res);
        res
    }
}
