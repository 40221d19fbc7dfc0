use crate::model_hyperbolic::build_hyperbolic_soil_type;
use crate::{
    default_strains, HyperbolicFormulation, ParamDarendeli, SiteError, SoilType, KPA_TO_ATM,
};
use russell_lab::Vector;

/// Implements the Darendeli (2001) empirical model for fine grained soils
///
/// Generates the modulus reduction and damping curves of a [`SoilType`] from
/// the plasticity index, the overconsolidation ratio, the mean effective
/// stress, the excitation frequency, and the number of loading cycles.
pub struct ModelDarendeli {
    param: ParamDarendeli,
}

impl ModelDarendeli {
    /// Allocates a new instance
    pub fn new(param: ParamDarendeli) -> Result<Self, SiteError> {
        if param.ocr <= 0.0
            || param.mean_stress <= 0.0
            || param.freq <= 0.0
            || param.num_cycles <= 0.0
        {
            return Err(SiteError::Configuration(
                "Darendeli parameters must be positive (ocr, mean_stress, freq, num_cycles)",
            ));
        }
        Ok(ModelDarendeli { param })
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

impl HyperbolicFormulation for ModelDarendeli {
    fn strain_ref(&self) -> f64 {
        let p = &self.param;
        (0.0352 + 0.0010 * p.plas_index * f64::powf(p.ocr, 0.3246))
            * f64::powf(p.mean_stress * KPA_TO_ATM, 0.3483)
    }

    fn curvature(&self) -> f64 {
        0.9190
    }

    fn damping_min(&self) -> f64 {
        let p = &self.param;
        (0.8005 + 0.0129 * p.plas_index * f64::powf(p.ocr, -0.1069))
            * f64::powf(p.mean_stress * KPA_TO_ATM, -0.2889)
            * (1.0 + 0.2919 * f64::ln(p.freq))
    }

    fn num_cycles(&self) -> f64 {
        self.param.num_cycles
    }

    fn curve_name(&self) -> String {
        format!(
            "Darendeli (PI={:.0}, OCR={:.1}, σₘ'={:.1} kN/m²)",
            self.param.plas_index, self.param.ocr, self.param.mean_stress
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
