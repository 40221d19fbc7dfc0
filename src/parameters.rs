use russell_lab::Vector;
use serde::{Deserialize, Serialize};

/// Returns the default strain grid for the empirical curve generators
///
/// 20 points log-spaced between 1e-4 % and 10^0.5 ≈ 3.16 % shear strain.
pub fn default_strains() -> Vector {
    let n = 20;
    let mut strains = Vector::new(n);
    for i in 0..n {
        let exponent = -4.0 + 4.5 * (i as f64) / ((n - 1) as f64);
        strains[i] = f64::powf(10.0, exponent);
    }
    strains
}

/// Holds parameters for the Darendeli (2001) model for fine grained soils
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct ParamDarendeli {
    /// Plasticity index PI [percent]
    pub plas_index: f64,

    /// Overconsolidation ratio OCR
    pub ocr: f64,

    /// Mean effective stress σₘ' [kN/m²]
    pub mean_stress: f64,

    /// Excitation frequency [Hz]
    pub freq: f64,

    /// Number of cycles of loading
    pub num_cycles: f64,
}

impl Default for ParamDarendeli {
    fn default() -> Self {
        ParamDarendeli {
            plas_index: 0.0,
            ocr: 1.0,
            mean_stress: 101.3,
            freq: 1.0,
            num_cycles: 10.0,
        }
    }
}

/// Holds parameters for the Menq (2003) model for gravelly soils
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct ParamMenq {
    /// Uniformity coefficient Cᵤ
    pub uniformity_coeff: f64,

    /// Mean grain diameter D₅₀ [mm]
    pub diam_mean: f64,

    /// Mean effective stress σₘ' [kN/m²]
    pub mean_stress: f64,

    /// Number of cycles of loading
    pub num_cycles: f64,
}

impl Default for ParamMenq {
    fn default() -> Self {
        ParamMenq {
            uniformity_coeff: 10.0,
            diam_mean: 5.0,
            mean_stress: 1.0,
            num_cycles: 10.0,
        }
    }
}

/// Holds parameters for the Kishida (2009) model for highly organic soils
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct ParamKishida {
    /// Mean effective stress σₘ' [kN/m²]
    pub mean_stress: f64,

    /// Organic content [percent]
    pub organic_content: f64,

    /// Laboratory consolidation ratio (use 1 for field applications)
    pub lab_consol_ratio: f64,
}

impl Default for ParamKishida {
    fn default() -> Self {
        ParamKishida {
            mean_stress: 101.3,
            organic_content: 10.0,
            lab_consol_ratio: 1.0,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
