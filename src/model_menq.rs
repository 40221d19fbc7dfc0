use crate::model_hyperbolic::build_hyperbolic_soil_type;
use crate::{default_strains, HyperbolicFormulation, ParamMenq, SiteError, SoilType, KPA_TO_ATM};
use russell_lab::Vector;

/// Implements the Menq (2003) empirical model for gravelly soils
///
/// Shares the Darendeli curve pipeline and replaces only the reference
/// strain, curvature, and minimum damping regressions, which depend on the
/// uniformity coefficient and the mean grain diameter instead of the
/// plasticity index and the overconsolidation ratio.
pub struct ModelMenq {
    param: ParamMenq,
}

impl ModelMenq {
    /// Allocates a new instance
    pub fn new(param: ParamMenq) -> Result<Self, SiteError> {
        if param.uniformity_coeff <= 0.0
            || param.diam_mean <= 0.0
            || param.mean_stress <= 0.0
            || param.num_cycles <= 0.0
        {
            return Err(SiteError::Configuration(
                "Menq parameters must be positive (uniformity_coeff, diam_mean, mean_stress, num_cycles)",
            ));
        }
        Ok(ModelMenq { param })
    }

    /// Builds a soil type with the generated curves
    ///
    /// If `strains` is None, the default 20-point log-spaced grid is used.
    pub fn soil_type(
        &self,
        name: &str,
        unit_wt: f64,
        strains: Option<&Vector>,
    ) -> Result<SoilType, SiteError> {
        match strains {
            Some(strains) => build_hyperbolic_soil_type(name, unit_wt, strains, self),
            None => build_hyperbolic_soil_type(name, unit_wt, &default_strains(), self),
        }
    }
}

impl HyperbolicFormulation for ModelMenq {
    fn strain_ref(&self) -> f64 {
        let p = &self.param;
        0.12 * f64::powf(p.uniformity_coeff, -0.6)
            * f64::powf(p.mean_stress, 0.5 * f64::powf(p.uniformity_coeff, -0.15))
    }

    fn curvature(&self) -> f64 {
        0.86 + 0.1 * f64::log10(self.param.mean_stress * KPA_TO_ATM)
    }

    fn damping_min(&self) -> f64 {
        let p = &self.param;
        0.55 * f64::powf(p.uniformity_coeff, 0.1)
            * f64::powf(p.diam_mean, -0.3)
            * f64::powf(p.mean_stress, -0.08)
    }

    fn num_cycles(&self) -> f64 {
        self.param.num_cycles
    }

    fn curve_name(&self) -> String {
        format!(
            "Menq (Cᵤ={:.1}, D₅₀={:.1} mm, σₘ'={:.1} kN/m²)",
            self.param.uniformity_coeff, self.param.diam_mean, self.param.mean_stress
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ModelMenq;
    use crate::{Damping, HyperbolicFormulation, ParamMenq, SiteError};
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_wrong_input() {
        let mut param = ParamMenq::default();
        param.diam_mean = -5.0;
        assert_eq!(
            ModelMenq::new(param).err(),
            Some(SiteError::Configuration(
                "Menq parameters must be positive (uniformity_coeff, diam_mean, mean_stress, num_cycles)"
            ))
        );
    }

    #[test]
    fn regressions_match_published_model() {
        // Cᵤ=10, D₅₀=5 mm, σₘ'=1 kN/m², N=10
        let model = ModelMenq::new(ParamMenq::default()).unwrap();
        approx_eq(model.strain_ref(), 0.03014263717811496, 1e-15);
        approx_eq(model.curvature(), 0.6594283387586269, 1e-15);
        approx_eq(model.damping_min(), 0.42723978534365364, 1e-15);
    }

    #[test]
    fn generated_curves_behave_like_darendeli_pipeline() {
        let model = ModelMenq::new(ParamMenq::default()).unwrap();
        let soil = model.soil_type("gravel", 20.0, None).unwrap();
        assert!(soil.is_nonlinear());
        let mod_reduc = soil.mod_reduc().unwrap();
        assert_eq!(mod_reduc.name(), "Menq (Cᵤ=10.0, D₅₀=5.0 mm, σₘ'=1.0 kN/m²)");
        // hyperbolic relation at the first grid point
        let expected = 1.0
            / (1.0 + f64::powf(1e-4 / model.strain_ref(), model.curvature()));
        approx_eq(mod_reduc.values()[0], expected, 1e-15);
        // damping is monotone non-decreasing (running-maximum invariant)
        let damping = match soil.damping() {
            Damping::Curve(curve) => curve,
            _ => panic!("expected damping curve"),
        };
        let values = damping.values();
        for i in 1..values.dim() {
            assert!(values[i] >= values[i - 1]);
        }
        approx_eq(values[0], model.damping_min() / 100.0, 1e-3);
    }
}
