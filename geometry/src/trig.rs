/// Cosine and sine of a single projection angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trig {
    pub cos: f64,
    pub sin: f64,
}

/// The image axis which a ray is sampled along, once per index.
///
/// For steep rays (`|cos θ| < |sin θ|`) the projector steps over `Columns`,
/// interpolating within each column; otherwise it steps over `Rows`,
/// interpolating within each row. The interpolation therefore always divides
/// by the larger of the two direction cosines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DominantAxis {
    Columns,
    Rows,
}

impl Trig {
    pub fn of(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { cos, sin }
    }

    pub fn dominant_axis(&self) -> DominantAxis {
        if self.cos.abs() < self.sin.abs() { DominantAxis::Columns }
        else                               { DominantAxis::Rows    }
    }

    /// `1 / max(|cos|, |sin|)`: how much longer than one pixel the ray is,
    /// between successive crossings of the dominant axis.
    pub fn slope(&self) -> f64 {
        1.0 / self.cos.abs().max(self.sin.abs())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use float_eq::assert_float_eq;
    use std::f64::consts::PI;

    #[rstest(/**/ angle        , expected,
             case(0.0          , DominantAxis::Rows   ),
             case(PI / 2.0     , DominantAxis::Columns),
             case(PI           , DominantAxis::Rows   ),
             case(-PI / 2.0    , DominantAxis::Columns),
             case(0.3          , DominantAxis::Rows   ),
             case(1.2          , DominantAxis::Columns),
             case(PI - 0.3     , DominantAxis::Rows   ),
             case(PI / 2.0 + 0.5, DominantAxis::Columns),
    )]
    fn dominant_axis(angle: f64, expected: DominantAxis) {
        assert_eq!(Trig::of(angle).dominant_axis(), expected);
    }

    #[rstest(/**/ angle   , expected,
             case(0.0     , 1.0),
             case(PI / 4.0, std::f64::consts::SQRT_2),
             case(PI / 2.0, 1.0),
    )]
    fn slope_of_angle(angle: f64, expected: f64) {
        assert_float_eq!(Trig::of(angle).slope(), expected, abs <= 1e-12);
    }

    use proptest::prelude::*;
    proptest! {
        // Whichever axis is chosen, the divisor is never smaller than 1/√2
        #[test]
        fn divisor_is_bounded_away_from_zero(angle in -10.0..(10.0 as f64)) {
            let t = Trig::of(angle);
            let divisor = match t.dominant_axis() {
                DominantAxis::Columns => t.sin.abs(),
                DominantAxis::Rows    => t.cos.abs(),
            };
            prop_assert!(divisor >= std::f64::consts::FRAC_1_SQRT_2 - 1e-12);
        }
    }
}
