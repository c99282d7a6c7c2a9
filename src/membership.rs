use num::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fuzzy set with a triangular membership function.
///
/// Membership rises from 0 at `left` to 1 at `top` and falls back to 0 at
/// `right`. The support is open: `left` and `right` themselves have
/// membership 0.
///
/// Deserialized values go through [`new`](Self::new) as well, so a malformed
/// triangle is rejected instead of loaded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Triangle<F>", bound(deserialize = "F: Float + Deserialize<'de>"))
)]
pub struct MembershipFunction<F = f64> {
    name: String,
    left: F,
    top: F,
    right: F,
}

/// Unchecked wire form of a [`MembershipFunction`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct Triangle<F> {
    name: String,
    left: F,
    top: F,
    right: F,
}

#[cfg(feature = "serde")]
impl<F: Float> TryFrom<Triangle<F>> for MembershipFunction<F> {
    type Error = ConfigError;

    fn try_from(raw: Triangle<F>) -> Result<Self, ConfigError> {
        Self::new(raw.name, raw.left, raw.top, raw.right)
    }
}

impl<F: Float> MembershipFunction<F> {
    pub fn new(name: impl Into<String>, left: F, top: F, right: F) -> Result<Self, ConfigError> {
        let name = name.into();

        if !(left.is_finite() && top.is_finite() && right.is_finite()) || left > top || top > right {
            return Err(ConfigError::InvalidTriangle {
                name,
                left: left.to_f64().unwrap_or(f64::NAN),
                top: top.to_f64().unwrap_or(f64::NAN),
                right: right.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self { name, left, top, right })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn left(&self) -> F {
        self.left
    }

    pub fn top(&self) -> F {
        self.top
    }

    pub fn right(&self) -> F {
        self.right
    }

    /// Whether `x` lies strictly inside `(left, right)`.
    pub fn intersects(&self, x: F) -> bool {
        x > self.left && x < self.right
    }

    /// Degree of membership of `x`, in `[0, 1]`.
    ///
    /// A side of zero width is a vertical edge, so no slope is computed for it.
    pub fn membership(&self, x: F) -> F {
        if !self.intersects(x) {
            return F::zero();
        }

        if x <= self.top {
            if self.top == self.left {
                return F::one();
            }

            (x - self.left) / (self.top - self.left)
        } else {
            if self.top == self.right {
                return F::one();
            }

            (x - self.top) / (self.top - self.right) + F::one()
        }
    }
}

#[test]
fn test_triangle_membership() {
    let mf = MembershipFunction::new("medium", 0., 1., 2.).unwrap();

    assert_eq!(mf.membership(-1.), 0.);
    assert_eq!(mf.membership(0.), 0.);
    assert_eq!(mf.membership(0.25), 0.25);
    assert_eq!(mf.membership(1.), 1.);
    assert_eq!(mf.membership(1.5), 0.5);
    assert_eq!(mf.membership(2.), 0.);
    assert_eq!(mf.membership(3.), 0.);
}

#[test]
fn test_degenerate_sides() {
    let left_edge = MembershipFunction::new("left_edge", 0., 0., 1.).unwrap();

    assert_eq!(left_edge.membership(0.), 0.);
    assert_eq!(left_edge.membership(0.5), 0.5);
    assert!(left_edge.membership(1e-9) > 0.99);

    let right_edge = MembershipFunction::new("right_edge", 0., 1., 1.).unwrap();

    assert_eq!(right_edge.membership(0.5), 0.5);
    assert!(right_edge.membership(1. - 1e-9) > 0.99);
    assert_eq!(right_edge.membership(1.), 0.);

    let spike = MembershipFunction::new("spike", 1., 1., 1.).unwrap();

    assert_eq!(spike.membership(1.), 0.);
    assert!(spike.membership(0.5f64).is_finite());
}

#[test]
fn test_rejects_bad_triangles() {
    assert!(matches!(
        MembershipFunction::new("bad", 1., 0., 2.),
        Err(ConfigError::InvalidTriangle { .. })
    ));
    assert!(MembershipFunction::new("bad", 0., 2., 1.).is_err());
    assert!(MembershipFunction::new("bad", f64::NAN, 0., 1.).is_err());
    assert!(MembershipFunction::new("bad", 0., 0.5, f64::INFINITY).is_err());
}

#[test]
fn test_f32_membership() {
    let mf = MembershipFunction::new("zero", -1.0f32, 0., 1.).unwrap();

    assert_eq!(mf.membership(-0.5), 0.5);
    assert_eq!(mf.membership(0.), 1.);
}
