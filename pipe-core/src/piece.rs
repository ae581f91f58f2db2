//! Pipe piece vocabulary: sides, side sets, shapes and rotation buckets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance, in degrees, used when snapping an animated angle to a bucket.
pub const DEFAULT_EPSILON: f32 = 0.0625; // 2^-4

/// One of the four cardinal sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// Towards row 0.
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Every side, in bit order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The side facing this one across a cell boundary.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The side this one faces after a quarter turn counter-clockwise.
    pub const fn rotate_ccw(self) -> Self {
        match self {
            Self::Top => Self::Left,
            Self::Left => Self::Bottom,
            Self::Bottom => Self::Right,
            Self::Right => Self::Top,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Top => 0b0001,
            Self::Bottom => 0b0010,
            Self::Left => 0b0100,
            Self::Right => 0b1000,
        }
    }
}

/// A set of sides, stored as a 4-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sides(u8);

impl Sides {
    /// No open sides.
    pub const EMPTY: Self = Self(0);
    /// All four sides, as a cross piece opens.
    pub const ALL: Self = Self(0b1111);

    /// Builds a set from a slice of sides; duplicates collapse.
    pub fn from_sides(sides: &[Side]) -> Self {
        sides.iter().fold(Self::EMPTY, |set, &side| set.with(side))
    }

    /// This set plus `side`.
    #[must_use]
    pub const fn with(self, side: Side) -> Self {
        Self(self.0 | side.bit())
    }

    /// Adds `side` in place.
    pub fn insert(&mut self, side: Side) {
        *self = self.with(side);
    }

    /// True if `side` is in the set.
    pub const fn contains(self, side: Side) -> bool {
        self.0 & side.bit() != 0
    }

    /// Number of sides in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True for [`Sides::EMPTY`].
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in [`Side::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |&side| self.contains(side))
    }

    /// Rotates every side in the set a quarter turn counter-clockwise.
    #[must_use]
    pub fn rotate_ccw(self) -> Self {
        self.iter()
            .fold(Self::EMPTY, |set, side| set.with(side.rotate_ccw()))
    }

    /// True for exactly two sides facing each other (Top+Bottom or Left+Right).
    pub fn is_opposite_pair(self) -> bool {
        let mut sides = self.iter();
        match (sides.next(), sides.next(), sides.next()) {
            (Some(a), Some(b), None) => a.opposite() == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// The four pipe piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    /// I-shaped piece.
    Straight,
    /// L-shaped piece.
    Corner,
    /// Three open sides.
    TJunction,
    /// All four sides open; fits any rotation.
    Cross,
}

impl Shape {
    /// Every shape, fewest open sides first.
    pub const ALL: [Self; 4] = [Self::Straight, Self::Corner, Self::TJunction, Self::Cross];

    /// Open sides of the piece at [`Rotation::R0`].
    pub fn base_sides(self) -> Sides {
        match self {
            Self::Straight => Sides::from_sides(&[Side::Top, Side::Bottom]),
            Self::Corner => Sides::from_sides(&[Side::Top, Side::Left]),
            Self::TJunction => Sides::from_sides(&[Side::Left, Side::Top, Side::Right]),
            Self::Cross => Sides::ALL,
        }
    }

    /// Open sides of the piece when turned to `rotation`.
    pub fn sides_at(self, rotation: Rotation) -> Sides {
        (0..rotation.quarter_turns()).fold(self.base_sides(), |sides, _| sides.rotate_ccw())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Straight => "straight",
            Self::Corner => "corner",
            Self::TJunction => "t-junction",
            Self::Cross => "cross",
        };
        f.write_str(name)
    }
}

/// A piece orientation quantized to 90 degree steps, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// The shape's base orientation.
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Every bucket in turning order.
    pub const ALL: [Self; 4] = [Self::R0, Self::R90, Self::R180, Self::R270];

    /// Number of counter-clockwise quarter turns from [`Rotation::R0`].
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::R0 => 0,
            Self::R90 => 1,
            Self::R180 => 2,
            Self::R270 => 3,
        }
    }

    /// Bucket after `turns` quarter turns, modulo a full turn.
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Self::R0,
            1 => Self::R90,
            2 => Self::R180,
            _ => Self::R270,
        }
    }

    /// Bucket angle: 0, 90, 180 or 270.
    pub fn degrees(self) -> f32 {
        f32::from(self.quarter_turns()) * 90.0
    }

    /// The next bucket after a +90 degree turn.
    #[must_use]
    pub const fn rotate_ccw(self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + 1)
    }

    /// Snaps an angle in degrees to a bucket.
    ///
    /// The angle is first normalized into `[0, 360)`, so any multiple of a full
    /// turn maps to the same bucket. Returns `None` when the angle is not within
    /// `epsilon` of one of 0, 90, 180 or 270, e.g. while a piece is mid-turn.
    pub fn from_degrees(degrees: f32, epsilon: f32) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let normalized = degrees.rem_euclid(360.0);
        // 360 itself is the 0 bucket approached from below.
        [0.0_f32, 90.0, 180.0, 270.0, 360.0]
            .iter()
            .position(|&bucket| (normalized - bucket).abs() <= epsilon)
            .map(|index| Self::from_quarter_turns(index as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_set_semantics() {
        let mut sides = Sides::EMPTY;
        sides.insert(Side::Bottom);
        sides.insert(Side::Bottom);
        assert_eq!(sides.len(), 1);
        sides.insert(Side::Top);
        assert!(sides.contains(Side::Top));
        assert!(!sides.contains(Side::Left));
        assert!(sides.is_opposite_pair());
        assert!(!Sides::from_sides(&[Side::Top, Side::Left]).is_opposite_pair());
        assert!(!Sides::ALL.is_opposite_pair());
    }

    #[test]
    fn corner_rotates_through_all_quadrants() {
        let at = |r| Shape::Corner.sides_at(r);
        assert_eq!(at(Rotation::R0), Sides::from_sides(&[Side::Top, Side::Left]));
        assert_eq!(at(Rotation::R90), Sides::from_sides(&[Side::Left, Side::Bottom]));
        assert_eq!(at(Rotation::R180), Sides::from_sides(&[Side::Bottom, Side::Right]));
        assert_eq!(at(Rotation::R270), Sides::from_sides(&[Side::Right, Side::Top]));
    }

    #[test]
    fn t_junction_drops_one_side_per_bucket() {
        let missing: Vec<Side> = Rotation::ALL
            .iter()
            .map(|&r| {
                let sides = Shape::TJunction.sides_at(r);
                assert_eq!(sides.len(), 3);
                Side::ALL
                    .into_iter()
                    .find(|&s| !sides.contains(s))
                    .unwrap()
            })
            .collect();
        assert_eq!(missing, vec![Side::Bottom, Side::Right, Side::Top, Side::Left]);
    }

    #[test]
    fn rotation_snapping() {
        assert_eq!(Rotation::from_degrees(0.0, DEFAULT_EPSILON), Some(Rotation::R0));
        assert_eq!(Rotation::from_degrees(90.04, DEFAULT_EPSILON), Some(Rotation::R90));
        assert_eq!(Rotation::from_degrees(359.97, DEFAULT_EPSILON), Some(Rotation::R0));
        assert_eq!(Rotation::from_degrees(-90.0, DEFAULT_EPSILON), Some(Rotation::R270));
        assert_eq!(Rotation::from_degrees(630.0, DEFAULT_EPSILON), Some(Rotation::R270));
        assert_eq!(Rotation::from_degrees(45.0, DEFAULT_EPSILON), None);
        assert_eq!(Rotation::from_degrees(90.5, DEFAULT_EPSILON), None);
        assert_eq!(Rotation::from_degrees(f32::NAN, DEFAULT_EPSILON), None);
    }

    #[test]
    fn rotate_wraps_after_full_turn() {
        let turned = (0..4).fold(Rotation::R90, |r, _| r.rotate_ccw());
        assert_eq!(turned, Rotation::R90);
        assert_eq!(Rotation::R270.rotate_ccw(), Rotation::R0);
    }
}
