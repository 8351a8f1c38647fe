//! Two-dimensional vector with polar accessors.
//!
//! `Vec2` uses `f64` components.  The alignment rule works on headings
//! (angles) while positions are integrated on Cartesian components, so the
//! type exposes both views: `length`/`angle` and `set_length`/`set_angle`.
//! Every operation is pure and allocation-free.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A plain 2-D vector of two `f64` components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Below this length the direction of a vector is treated as undefined
    /// and [`set_length`](Self::set_length) leaves it untouched.
    pub const EPSILON: f64 = 1e-4;

    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of the given `length` pointing at `angle` radians.
    #[inline]
    pub fn from_polar(length: f64, angle: f64) -> Self {
        Self::new(length * angle.cos(), length * angle.sin())
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Heading in radians, in `(-π, π]`.
    ///
    /// Uses the two-argument arctangent so all four quadrants are
    /// distinguished.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Rescale to `length` without changing direction.
    ///
    /// No-op when the current length is below [`Vec2::EPSILON`].
    pub fn set_length(&mut self, length: f64) {
        let l = self.length();
        if l > Self::EPSILON {
            *self *= length / l;
        }
    }

    /// Rotate to `angle` radians, keeping the current length.
    pub fn set_angle(&mut self, angle: f64) {
        *self = Self::from_polar(self.length(), angle);
    }

    /// Rescale to unit length (see [`set_length`](Self::set_length)).
    #[inline]
    pub fn normalize(&mut self) {
        self.set_length(1.0);
    }

    /// Straight-line (non-periodic) distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).length()
    }

    /// Shift the x component by `dx`.  Renderers use this to draw ghost
    /// copies of agents across a periodic boundary.
    #[inline]
    pub fn shift_x(&mut self, dx: f64) {
        self.x += dx;
    }

    #[inline]
    pub fn shift_y(&mut self, dy: f64) {
        self.y += dy;
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<f64> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl DivAssign<f64> for Vec2 {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::iter::Sum for Vec2 {
    fn sum<I: Iterator<Item = Vec2>>(iter: I) -> Vec2 {
        iter.fold(Vec2::ZERO, Add::add)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}
