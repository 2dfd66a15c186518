use serde::{Deserialize, Serialize};

/// Control points of a piecewise-linear membership shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Rises from `a` to a peak at `b`, falls back to zero at `c`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Rises from `a` to `b`, holds at one until `c`, falls to zero at `d`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl Shape {
    pub fn points(&self) -> Vec<f64> {
        match *self {
            Shape::Triangular { a, b, c } => vec![a, b, c],
            Shape::Trapezoidal { a, b, c, d } => vec![a, b, c, d],
        }
    }

    fn is_well_formed(&self) -> bool {
        let points = self.points();

        points.iter().all(|p| p.is_finite()) && points.windows(2).all(|w| w[0] <= w[1])
    }
}

/// A validated [`Shape`] that can be evaluated at any real `x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MembershipFunction(Shape);

impl MembershipFunction {
    /// Returns `None` when the control points are not finite and
    /// non-decreasing.
    pub fn new(shape: Shape) -> Option<Self> {
        shape.is_well_formed().then_some(Self(shape))
    }

    pub fn triangular(a: f64, b: f64, c: f64) -> Option<Self> {
        Self::new(Shape::Triangular { a, b, c })
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Option<Self> {
        Self::new(Shape::Trapezoidal { a, b, c, d })
    }

    pub fn shape(&self) -> Shape {
        self.0
    }

    /// Degree of membership of `x`, always in `[0, 1]`.
    ///
    /// Coinciding control points produce a vertical edge rather than a
    /// division by zero: the flat top wins at the shared point.
    pub fn degree(&self, x: f64) -> f64 {
        match self.0 {
            Shape::Triangular { a, b, c } => {
                if x == b {
                    1.
                } else if x <= a || x >= c {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            },
            Shape::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.
                } else if b <= x && x <= c {
                    1.
                } else if x < b {
                    // a <= x < b, so b > a
                    (x - a) / (b - a)
                } else {
                    // c < x <= d, so d > c
                    (d - x) / (d - c)
                }
            },
        }
    }
}
