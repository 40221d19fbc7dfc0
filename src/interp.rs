use crate::SiteError;

/// Interpolates y(x) with clamping to the boundary values (no extrapolation)
///
/// Implements the piecewise-linear rule over sorted abscissae; values outside
/// the range of `xs` return the first or last ordinate.
pub(crate) fn linear_interp(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len();
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    let i = interval_index(xs, x);
    let t = (x - xs[i]) / (xs[i + 1] - xs[i]);
    ys[i] + t * (ys[i + 1] - ys[i])
}

/// Finds i such that xs[i] <= x < xs[i+1]
///
/// The caller must guarantee xs[0] <= x <= xs[n-1] with n >= 2.
fn interval_index(xs: &[f64], x: f64) -> usize {
    let n = xs.len();
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Implements 1D interpolation over a fixed table of points
///
/// With fewer than four points, the rule is piecewise linear; otherwise a
/// natural cubic spline is fitted through the points. Either way, evaluation
/// outside the tabulated range is clamped to the boundary ordinate.
#[derive(Clone, Debug)]
pub(crate) struct Interp1D {
    /// Abscissae (strictly increasing)
    xs: Vec<f64>,

    /// Ordinates (same length as xs)
    ys: Vec<f64>,

    /// Second derivatives of the natural spline; empty for the linear rule
    ypp: Vec<f64>,
}

impl Interp1D {
    /// Allocates a new instance and fits the interpolant
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, SiteError> {
        if xs.len() != ys.len() {
            return Err(SiteError::Configuration(
                "abscissae and ordinates must have the same length",
            ));
        }
        if xs.len() < 2 {
            return Err(SiteError::Configuration(
                "at least two points are required for interpolation",
            ));
        }
        for i in 1..xs.len() {
            if xs[i] <= xs[i - 1] {
                return Err(SiteError::Configuration(
                    "abscissae must be strictly increasing",
                ));
            }
        }
        let ypp = if xs.len() < 4 {
            Vec::new()
        } else {
            natural_spline_second_derivs(xs, ys)
        };
        Ok(Interp1D {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            ypp,
        })
    }

    /// Evaluates the interpolant at x (clamped to the tabulated range)
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }
        if self.ypp.is_empty() {
            return linear_interp(&self.xs, &self.ys, x);
        }
        let i = interval_index(&self.xs, x);
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;
        a * self.ys[i]
            + b * self.ys[i + 1]
            + ((a * a * a - a) * self.ypp[i] + (b * b * b - b) * self.ypp[i + 1]) * h * h / 6.0
    }
}

/// Solves for the second derivatives of the natural cubic spline
///
/// Uses the Thomas algorithm on the standard tridiagonal system with the
/// natural end conditions y''(x₀) = y''(xₙ₋₁) = 0.
fn natural_spline_second_derivs(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut ypp = vec![0.0; n];
    let mut gamma = vec![0.0; n]; // decomposition workspace
    for i in 1..n - 1 {
        let h_lo = xs[i] - xs[i - 1];
        let h_hi = xs[i + 1] - xs[i];
        let sig = h_lo / (h_lo + h_hi);
        let p = sig * ypp[i - 1] + 2.0;
        ypp[i] = (sig - 1.0) / p;
        gamma[i] = (ys[i + 1] - ys[i]) / h_hi - (ys[i] - ys[i - 1]) / h_lo;
        gamma[i] = (6.0 * gamma[i] / (h_lo + h_hi) - sig * gamma[i - 1]) / p;
    }
    ypp[n - 1] = 0.0;
    for i in (0..n - 1).rev() {
        ypp[i] = ypp[i] * ypp[i + 1] + gamma[i];
    }
    ypp
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
