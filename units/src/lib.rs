//! Typed quantities used at the boundary of the projectors.
//!
//! The projectors themselves work on plain `f64` radians. Angles arriving from
//! configuration files or the command line carry their units with them, and
//! are converted here, exactly once.

pub use uom;
pub use uom::si::f64::Angle;

mod units {
  pub use uom::si::angle::{degree, radian, revolution};
}

/// Generate a function called NAME which returns QUANTITY by interpreting its
/// argument as UNIT
///
/// wrap!(NAME QUANTITY UNIT);
macro_rules! wrap {
  ($name:ident $quantity:ident $unit:ident ) => {
    pub fn $name(x: f64) -> $quantity { $quantity::new::<units::$unit>(x) }
  };
}

wrap!(deg  Angle     degree);
wrap!(rad  Angle     radian);
wrap!(turn Angle revolution);

// Reverse direction of the above
pub fn deg_(x: Angle) -> f64 { x.get::<units::degree>() }
pub fn rad_(x: Angle) -> f64 { x.get::<units::radian>() }

#[macro_export]
macro_rules! assert_uom_eq {
  ($unit:ident, $lhs:expr, $rhs:expr, $algo:ident <= $tol:expr) => {
    float_eq::assert_float_eq!($lhs.get::<$unit>(), $rhs.get::<$unit>(), $algo <= $tol)
  };
}
