use crate::{
    default_strains, CurveParam, Damping, NonlinearProperty, ParamKishida, SiteError, SoilType,
    GRAVITY,
};
use log::debug;
use russell_lab::Vector;

/// Mean values of the regression predictors (Kishida et al., 2009)
const X1_MEAN: f64 = -2.5;
const X2_MEAN: f64 = 4.0;
const X3_MEAN: f64 = 0.5;

/// Implements the Kishida (2009) empirical model for highly organic soils
///
/// Unlike the Masing-based hyperbolic models, this is an independent
/// multiple regression: predictors are the log strain plus a reference
/// strain, the log mean stress, and a logistic transform of the organic
/// content; shear modulus and damping are weighted sums of main effects and
/// pairwise interactions evaluated in log space and exponentiated. The
/// modulus reduction curve is normalized so its smallest-strain value is 1.
///
/// If the unit weight is not supplied, it is estimated by a log-linear
/// regression over the mean stress and the organic-content predictor.
pub struct ModelKishida {
    param: ParamKishida,
}

impl ModelKishida {
    /// Allocates a new instance
    pub fn new(param: ParamKishida) -> Result<Self, SiteError> {
        if param.mean_stress <= 0.0 || param.organic_content < 0.0 || param.lab_consol_ratio <= 0.0
        {
            return Err(SiteError::Configuration(
                "Kishida parameters must be positive (mean_stress, lab_consol_ratio) with non-negative organic_content",
            ));
        }
        Ok(ModelKishida { param })
    }

    /// Returns the logistic organic-content predictor x₃
    fn x_3(&self) -> f64 {
        2.0 / (1.0 + f64::exp(self.param.organic_content / 23.0))
    }

    /// Returns the reference strain from the x₃ predictor
    fn strain_ref(&self) -> f64 {
        let b_9 = -1.41;
        let b_10 = -0.950;
        f64::exp(b_9 + b_10 * (self.x_3() - X3_MEAN))
    }

    /// Estimates the unit weight [kN/m³] from the regression over mean stress
    /// and organic content
    pub fn estimated_unit_wt(&self) -> f64 {
        let x_2 = f64::ln(self.param.mean_stress);
        let ln_density = -0.112 + 0.038 * x_2 + 0.360 * self.x_3();
        f64::exp(ln_density) * GRAVITY
    }

    /// Builds a soil type with the generated curves
    ///
    /// If `unit_wt` is None, the unit weight is estimated by the empirical
    /// regression. If `strains` is None, the default 20-point log-spaced
    /// grid is used; the first strain should be small enough that the
    /// modulus reduction is equal to 1.
    pub fn soil_type(
        &self,
        name: &str,
        unit_wt: Option<f64>,
        strains: Option<&Vector>,
    ) -> Result<SoilType, SiteError> {
        let default = default_strains();
        let strains = match strains {
            Some(strains) => strains,
            None => &default,
        };
        let n = strains.dim();
        if n < 2 {
            return Err(SiteError::Configuration(
                "at least two strains are required to build soil curves",
            ));
        }
        if strains.as_data().iter().any(|s| *s <= 0.0) {
            return Err(SiteError::Configuration("strains must be positive"));
        }

        let strain_ref = self.strain_ref();
        let unit_wt = match unit_wt {
            Some(value) => value,
            None => self.estimated_unit_wt(),
        };
        debug!(
            "Kishida curves '{}': strain_ref = {}, unit_wt = {}",
            name, strain_ref, unit_wt
        );

        let mod_reducs = self.calc_mod_reduc(strains, strain_ref);
        let dampings = self.calc_damping(&mod_reducs);

        let curve_name = format!(
            "Kishida (σₘ'={:.1} kN/m², OC={:.0} %)",
            self.param.mean_stress, self.param.organic_content
        );
        let mod_reduc = NonlinearProperty::new(
            &curve_name,
            strains.clone(),
            mod_reducs,
            Some(CurveParam::ModReduc),
        );
        let damping = NonlinearProperty::new(
            &curve_name,
            strains.clone(),
            dampings,
            Some(CurveParam::Damping),
        );
        SoilType::new(name, unit_wt, Some(mod_reduc), Damping::Curve(damping))
    }

    /// Computes the normalized shear modulus reduction (Equation 1)
    fn calc_mod_reduc(&self, strains: &Vector, strain_ref: f64) -> Vector {
        let n = strains.dim();
        let x_2 = f64::ln(self.param.mean_stress);
        let x_3 = self.x_3();
        let x_4 = f64::ln(self.param.lab_consol_ratio);
        let mut shear_mod = Vector::new(n);
        for i in 0..n {
            let strain = strains[i];
            let x_1 = f64::ln(strain + strain_ref);
            let denom = f64::ln(1.0 / strain_ref + strain / strain_ref);
            let x = [
                1.0,
                x_1,
                x_2,
                x_3,
                x_4,
                (x_1 - X1_MEAN) * (x_2 - X2_MEAN),
                (x_1 - X1_MEAN) * (x_3 - X3_MEAN),
                (x_2 - X2_MEAN) * (x_3 - X3_MEAN),
                (x_1 - X1_MEAN) * (x_2 - X2_MEAN) * (x_3 - X3_MEAN),
            ];
            let b = [
                5.11,
                -0.729,
                1.0 - 0.37 * X3_MEAN * (1.0 + (f64::ln(strain_ref) - X1_MEAN) / denom),
                -0.693,
                0.8 - 0.4 * x_3,
                0.37 * X3_MEAN / denom,
                0.0,
                -0.37 * (1.0 + (f64::ln(strain_ref) - X1_MEAN) / denom),
                0.37 / denom,
            ];
            let ln_shear_mod: f64 = b.iter().zip(&x).map(|(b, x)| b * x).sum();
            shear_mod[i] = f64::exp(ln_shear_mod);
        }
        // normalize so the smallest-strain value equals 1
        let first = shear_mod[0];
        for i in 0..n {
            shear_mod[i] /= first;
        }
        shear_mod
    }

    /// Computes the damping ratio [percent] from the reduction curve (Equation 16)
    fn calc_damping(&self, mod_reducs: &Vector) -> Vector {
        let x_1_mean = -1.0;
        let x_2 = f64::ln(self.param.mean_stress);
        let x_3 = self.x_3();
        let c = [2.86, 0.571, -0.103, -0.141, 0.0419, -0.240];
        let n = mod_reducs.dim();
        let mut dampings = Vector::new(n);
        for i in 0..n {
            let x_1 = f64::ln(f64::ln(1.0 / mod_reducs[i]) + 0.103);
            let x = [
                1.0,
                x_1,
                x_2,
                x_3,
                (x_1 - x_1_mean) * (x_2 - X2_MEAN),
                (x_2 - X2_MEAN) * (x_3 - X3_MEAN),
            ];
            let ln_damping: f64 = c.iter().zip(&x).map(|(c, x)| c * x).sum();
            dampings[i] = f64::exp(ln_damping);
        }
        dampings
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ModelKishida;
    use crate::{Damping, ParamKishida, SiteError};
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_wrong_input() {
        let mut param = ParamKishida::default();
        param.mean_stress = -1.0;
        assert_eq!(
            ModelKishida::new(param).err(),
            Some(SiteError::Configuration(
                "Kishida parameters must be positive (mean_stress, lab_consol_ratio) with non-negative organic_content"
            ))
        );
    }

    #[test]
    fn unit_wt_estimation_works() {
        // σₘ'=101.3 kN/m², OC=10 %
        let model = ModelKishida::new(ParamKishida::default()).unwrap();
        approx_eq(model.estimated_unit_wt(), 13.866794762509613, 1e-13);
        let soil = model.soil_type("peat", None, None).unwrap();
        approx_eq(soil.unit_wt(), 13.866794762509613, 1e-13);
        // a supplied unit weight takes precedence
        let soil = model.soil_type("peat", Some(12.0), None).unwrap();
        assert_eq!(soil.unit_wt(), 12.0);
    }

    #[test]
    fn generated_curves_match_published_model() {
        let model = ModelKishida::new(ParamKishida::default()).unwrap();
        let soil = model.soil_type("peat", None, None).unwrap();
        let mod_reduc = soil.mod_reduc().unwrap();
        // normalized: smallest-strain value is exactly 1
        assert_eq!(mod_reduc.values()[0], 1.0);
        approx_eq(mod_reduc.values()[10], 0.9337456355361606, 1e-13);
        approx_eq(mod_reduc.values()[19], 0.16961950830001615, 1e-13);
        let damping = match soil.damping() {
            Damping::Curve(curve) => curve,
            _ => panic!("expected damping curve"),
        };
        approx_eq(damping.values()[0], 2.460163437842965, 1e-13);
        approx_eq(damping.values()[19], 13.91415309325779, 1e-12);
        assert_eq!(mod_reduc.name(), "Kishida (σₘ'=101.3 kN/m², OC=10 %)");
        assert_eq!(soil.damping_min(), damping.values()[0]);
    }
}
