use crate::interp::Interp1D;
use crate::SiteError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};

/// Defines which strain-dependent property a curve describes
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CurveParam {
    /// Shear-modulus reduction curve G/Gmax(γ)
    ModReduc,

    /// Damping ratio curve β(γ)
    Damping,
}

impl CurveParam {
    /// Returns the parameter matching a raw label
    pub fn from_label(label: &str) -> Result<Self, SiteError> {
        match label {
            "mod_reduc" => Ok(CurveParam::ModReduc),
            "damping" => Ok(CurveParam::Damping),
            _ => Err(SiteError::Configuration(
                "invalid nonlinear property parameter",
            )),
        }
    }
}

/// Implements a strain-dependent property interpolated in log-strain space
///
/// Holds a table of (strain, value) pairs and interpolates the value at an
/// arbitrary strain against `ln(strain)`. With fewer than four points the
/// interpolation is linear; otherwise a cubic spline is used. Strains
/// outside the tabulated range return the boundary value (flat
/// extrapolation, never extrapolated).
///
/// # Notes
///
/// * Strains must be positive and increasing; values are decimal
///   (e.g., 0.05 for 5 % damping)
/// * Reassigning the strains or the values rebuilds the interpolant
/// * If the strains and values have different lengths, the interpolant is
///   not built and [`NonlinearProperty::evaluate`] fails
#[derive(Clone, Debug)]
pub struct NonlinearProperty {
    /// Name used for identification
    name: String,

    /// Strains corresponding to each value
    strains: Vector,

    /// Property values corresponding to each strain
    values: Vector,

    /// Which property the curve describes (None if not tagged)
    param: Option<CurveParam>,

    /// Interpolant over ln(strain); None until a consistent table is set
    interp: Option<Interp1D>,
}

impl NonlinearProperty {
    /// Allocates a new instance
    pub fn new(name: &str, strains: Vector, values: Vector, param: Option<CurveParam>) -> Self {
        let mut prop = NonlinearProperty {
            name: name.to_string(),
            strains,
            values,
            param,
            interp: None,
        };
        prop.update();
        prop
    }

    /// Returns the name of the curve
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the strains of the table
    pub fn strains(&self) -> &Vector {
        &self.strains
    }

    /// Returns the values of the table
    pub fn values(&self) -> &Vector {
        &self.values
    }

    /// Returns the parameter tag of the curve
    pub fn param(&self) -> Option<CurveParam> {
        self.param
    }

    /// Reassigns the strains and rebuilds the interpolant
    pub fn set_strains(&mut self, strains: Vector) {
        self.strains = strains;
        self.update();
    }

    /// Reassigns the values and rebuilds the interpolant
    pub fn set_values(&mut self, values: Vector) {
        self.values = values;
        self.update();
    }

    /// Evaluates the property at a given strain
    ///
    /// Interpolates in ln(strain) space; a strain below the smallest or
    /// above the largest tabulated strain returns the boundary value.
    /// Zero strain maps to the smallest-strain value.
    pub fn evaluate(&self, strain: f64) -> Result<f64, SiteError> {
        if strain < 0.0 {
            return Err(SiteError::Configuration("strain must be non-negative"));
        }
        match &self.interp {
            Some(interp) => Ok(interp.eval(f64::ln(strain))),
            None => Err(SiteError::Configuration(
                "nonlinear property has no interpolant (inconsistent table)",
            )),
        }
    }

    /// Evaluates the property at several strains
    pub fn evaluate_many(&self, strains: &Vector) -> Result<Vector, SiteError> {
        let mut values = Vector::new(strains.dim());
        for i in 0..strains.dim() {
            values[i] = self.evaluate(strains[i])?;
        }
        Ok(values)
    }

    /// Rebuilds the interpolant from the current table
    fn update(&mut self) {
        self.interp = None;
        let n = self.strains.dim();
        if n == 0 || n != self.values.dim() {
            return;
        }
        if self.strains.as_data().iter().any(|s| *s <= 0.0) {
            return;
        }
        let log_strains: Vec<f64> = self.strains.as_data().iter().map(|s| f64::ln(*s)).collect();
        if let Ok(interp) = Interp1D::new(&log_strains, self.values.as_data()) {
            self.interp = Some(interp);
        }
    }
}

impl PartialEq for NonlinearProperty {
    /// Structural equality over name, table, and parameter tag
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.param == other.param
            && self.strains.as_data() == other.strains.as_data()
            && self.values.as_data() == other.values.as_data()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{CurveParam, NonlinearProperty};
    use crate::SiteError;
    use russell_lab::{approx_eq, Vector};

    #[test]
    fn from_label_works() {
        assert_eq!(CurveParam::from_label("mod_reduc"), Ok(CurveParam::ModReduc));
        assert_eq!(CurveParam::from_label("damping"), Ok(CurveParam::Damping));
        assert_eq!(
            CurveParam::from_label("stiffness"),
            Err(SiteError::Configuration(
                "invalid nonlinear property parameter"
            ))
        );
    }

    #[test]
    fn evaluate_reproduces_table() {
        let strains = Vector::from(&[1e-5, 1e-4, 1e-3, 1e-2, 1e-1]);
        let values = Vector::from(&[1.0, 0.97, 0.82, 0.52, 0.20]);
        let curve = NonlinearProperty::new("gg", strains, values, Some(CurveParam::ModReduc));
        for (s, v) in [(1e-5, 1.0), (1e-4, 0.97), (1e-3, 0.82), (1e-2, 0.52), (1e-1, 0.2)] {
            approx_eq(curve.evaluate(s).unwrap(), v, 1e-14);
        }
    }

    #[test]
    fn evaluate_clamps_out_of_range() {
        let strains = Vector::from(&[1e-4, 1e-3, 1e-2, 1e-1]);
        let values = Vector::from(&[0.98, 0.80, 0.50, 0.18]);
        let curve = NonlinearProperty::new("gg", strains, values, Some(CurveParam::ModReduc));
        assert_eq!(curve.evaluate(1e-7).unwrap(), 0.98);
        assert_eq!(curve.evaluate(10.0).unwrap(), 0.18);
        // zero strain maps to the smallest-strain value
        assert_eq!(curve.evaluate(0.0).unwrap(), 0.98);
        assert_eq!(
            curve.evaluate(-1.0).err(),
            Some(SiteError::Configuration("strain must be non-negative"))
        );
    }

    #[test]
    fn linear_rule_below_four_points() {
        // ln-space midpoint of 1e-4 and 1e-2 is 1e-3
        let strains = Vector::from(&[1e-4, 1e-2]);
        let values = Vector::from(&[1.0, 0.5]);
        let curve = NonlinearProperty::new("gg", strains, values, None);
        approx_eq(curve.evaluate(1e-3).unwrap(), 0.75, 1e-14);
    }

    #[test]
    fn mismatched_table_fails_fast() {
        let curve = NonlinearProperty::new(
            "bad",
            Vector::from(&[1e-4, 1e-3, 1e-2]),
            Vector::from(&[1.0, 0.9]),
            None,
        );
        assert_eq!(
            curve.evaluate(1e-3).err(),
            Some(SiteError::Configuration(
                "nonlinear property has no interpolant (inconsistent table)"
            ))
        );
    }

    #[test]
    fn reassignment_rebuilds_interpolant() {
        let mut curve = NonlinearProperty::new(
            "bad",
            Vector::from(&[1e-4, 1e-3, 1e-2]),
            Vector::from(&[1.0, 0.9]),
            None,
        );
        assert!(curve.evaluate(1e-3).is_err());
        curve.set_values(Vector::from(&[1.0, 0.9, 0.6]));
        approx_eq(curve.evaluate(1e-3).unwrap(), 0.9, 1e-14);
        curve.set_strains(Vector::from(&[1e-5, 1e-4, 1e-3]));
        approx_eq(curve.evaluate(1e-4).unwrap(), 0.9, 1e-14);
    }

    #[test]
    fn evaluate_many_works() {
        let strains = Vector::from(&[1e-4, 1e-3, 1e-2]);
        let values = Vector::from(&[1.0, 0.8, 0.5]);
        let curve = NonlinearProperty::new("gg", strains, values, None);
        let out = curve
            .evaluate_many(&Vector::from(&[1e-4, 1e-3, 1e-2]))
            .unwrap();
        russell_lab::array_approx_eq(out.as_data(), &[1.0, 0.8, 0.5], 1e-14);
    }

    #[test]
    fn structural_equality_works() {
        let a = NonlinearProperty::new(
            "gg",
            Vector::from(&[1e-4, 1e-2]),
            Vector::from(&[1.0, 0.5]),
            Some(CurveParam::ModReduc),
        );
        let b = a.clone();
        assert_eq!(a, b);
        let c = NonlinearProperty::new(
            "gg",
            Vector::from(&[1e-4, 1e-2]),
            Vector::from(&[1.0, 0.4]),
            Some(CurveParam::ModReduc),
        );
        assert_ne!(a, c);
    }
}
