//! Units of measure used throughout the crate.
//!
//! All layout happens in PDF points ([`Pt`], 1/72 of an inch). [`In`] and [`Mm`] exist
//! purely for convenience when declaring page geometry and convert into points.

use derive_more::{
    Add, AddAssign, Deref, Display, Div, From, Into, Mul, MulAssign, Sub, SubAssign, Sum,
};
use serde::{Deserialize, Serialize};

/// A length in PDF points (1/72 inch)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Sum,
    Deref,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Pt(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From, Into)]
pub struct In(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From, Into)]
pub struct Mm(pub f32);

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * 72.0 / 25.4)
    }
}

impl Pt {
    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_inches_and_millimetres() {
        assert_eq!(Pt::from(In(1.0)), Pt(72.0));
        let a4_width: Pt = Mm(210.0).into();
        assert!((a4_width.0 - 595.2756).abs() < 0.001);
    }

    #[test]
    fn arithmetic_stays_in_points() {
        let mut x = Pt(10.0) + Pt(2.5) - Pt(0.5);
        x += Pt(1.0);
        assert_eq!(x, Pt(13.0));
        assert_eq!(x * 2.0_f32, Pt(26.0));
        assert_eq!(x / 2.0_f32, Pt(6.5));
        let total: Pt = [Pt(1.0), Pt(2.0), Pt(3.0)].into_iter().sum();
        assert_eq!(total, Pt(6.0));
    }
}
