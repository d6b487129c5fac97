//! The heart die: a single six-sided die with an animate-then-reveal roll.
//!
//! The face is drawn when the roll starts, but the visible face only
//! changes once the settle window has elapsed.

pub mod roll;

pub use roll::{DiceTransform, EXTRA_SPINS, ROLL_SETTLE, RollPlan, plan_roll};

use serde::Serialize;

/// Die state as seen by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceState {
    /// The visible face (1-6).
    pub current_face: u32,
    /// True while a roll's settle window is open.
    pub is_rolling: bool,
    /// Rotation target of the most recent roll.
    pub transform: DiceTransform,
}

impl Default for DiceState {
    fn default() -> Self {
        Self {
            current_face: 1,
            is_rolling: false,
            transform: DiceTransform::default(),
        }
    }
}

impl DiceState {
    /// Start a roll. The transform is updated now, the face only on commit.
    pub(crate) fn begin(&mut self, plan: &RollPlan) {
        self.is_rolling = true;
        self.transform = plan.transform;
    }

    /// Reveal the rolled face and close the settle window.
    pub(crate) fn commit(&mut self, face: u32) {
        self.current_face = face;
        self.is_rolling = false;
    }
}

/// A pip position on a 3x3 die face grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pip {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Middle of the left column.
    MidLeft,
    /// Center.
    Center,
    /// Middle of the right column.
    MidRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl Pip {
    /// Grid cell as `(row, column)`, both in `0..3`.
    pub fn cell(self) -> (usize, usize) {
        match self {
            Self::TopLeft => (0, 0),
            Self::TopRight => (0, 2),
            Self::MidLeft => (1, 0),
            Self::Center => (1, 1),
            Self::MidRight => (1, 2),
            Self::BottomLeft => (2, 0),
            Self::BottomRight => (2, 2),
        }
    }
}

/// Pip layout for a face. Faces outside 1-6 have no pips.
pub fn pips(face: u32) -> &'static [Pip] {
    use Pip::*;
    match face {
        1 => &[Center],
        2 => &[TopRight, BottomLeft],
        3 => &[TopRight, Center, BottomLeft],
        4 => &[TopLeft, TopRight, BottomLeft, BottomRight],
        5 => &[TopLeft, TopRight, Center, BottomLeft, BottomRight],
        6 => &[TopLeft, TopRight, MidLeft, MidRight, BottomLeft, BottomRight],
        _ => &[],
    }
}

/// Caption for a revealed face ("1 Coração", "4 Corações").
pub fn face_label(face: u32) -> String {
    if face == 1 {
        "1 Coração".to_string()
    } else {
        format!("{face} Corações")
    }
}
