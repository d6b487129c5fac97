//! Roll planning: face draw and the 3D rotation the die animates to.

use std::time::Duration;

use serde::Serialize;

use crate::rng::RandomSource;

/// How long the die tumbles before the face is revealed.
pub const ROLL_SETTLE: Duration = Duration::from_millis(1000);

/// Minimum and maximum extra full turns added to every roll.
pub const EXTRA_SPINS: (u32, u32) = (3, 5);

/// Rotation target (degrees around X and Y) for a die cube.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiceTransform {
    /// Rotation around the X axis.
    pub rot_x: i32,
    /// Rotation around the Y axis.
    pub rot_y: i32,
}

impl DiceTransform {
    /// Create a transform.
    pub const fn new(rot_x: i32, rot_y: i32) -> Self {
        Self { rot_x, rot_y }
    }

    /// Rotation that brings `face` to the front, without extra turns.
    pub fn for_face(face: u32) -> Self {
        match face {
            2 => Self::new(0, -90),
            3 => Self::new(0, 180),
            4 => Self::new(0, 90),
            5 => Self::new(-90, 0),
            6 => Self::new(90, 0),
            _ => Self::new(0, 0),
        }
    }

    /// Add `turns` full rotations on both axes.
    pub fn with_turns(self, turns: u32) -> Self {
        let extra = turns as i32 * 360;
        Self::new(self.rot_x + extra, self.rot_y + extra)
    }
}

impl std::fmt::Display for DiceTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rotateX({}deg) rotateY({}deg)", self.rot_x, self.rot_y)
    }
}

/// The outcome of starting a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollPlan {
    /// The face that will be revealed once the die settles.
    pub face: u32,
    /// Extra full turns in the animation.
    pub extra_spins: u32,
    /// Rotation target for the animation.
    pub transform: DiceTransform,
    /// Settle window before the face is revealed.
    pub settle: Duration,
}

/// Plan a roll: draw the face first, then the number of extra turns.
pub fn plan_roll(rng: &mut dyn RandomSource) -> RollPlan {
    let face = rng.uniform(1, 6);
    let extra_spins = rng.uniform(EXTRA_SPINS.0, EXTRA_SPINS.1);
    RollPlan {
        face,
        extra_spins,
        transform: DiceTransform::for_face(face).with_turns(extra_spins),
        settle: ROLL_SETTLE,
    }
}
