use crate::SiteError;
use serde::{Deserialize, Serialize};

/// Defines the wave field at which a location within the column is evaluated
///
/// The wave field distinguishes how the up-going and down-going wave
/// components are combined by the external propagation solver.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum WaveField {
    /// Motion at a free surface (up-going plus down-going, doubled up-going at the top)
    Outcrop,

    /// Motion within the column (up-going plus down-going)
    Within,

    /// Up-going (incident) component only
    IncomingOnly,
}

impl WaveField {
    /// Returns the wave field matching a raw label
    pub fn from_label(label: &str) -> Result<Self, SiteError> {
        match label {
            "outcrop" => Ok(WaveField::Outcrop),
            "within" => Ok(WaveField::Within),
            "incoming_only" => Ok(WaveField::IncomingOnly),
            _ => Err(SiteError::Configuration("unknown wave field label")),
        }
    }
}

/// Defines the formulation combining shear modulus and damping into a complex modulus
///
/// Each formulation preserves the dissipated energy of the hysteresis loop;
/// they differ in how well the modulus amplitude is preserved.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CompModulus {
    /// Frequency-independent formulation (Seed et al., 1970)
    ///
    /// Overestimates the modulus: `|G*| = G √(1 + 4β²)`
    Seed,

    /// Simplified formulation (Kramer, 1996)
    ///
    /// Overestimates the modulus: `|G*| = G √(1 + 2β² + β⁴)`
    Kramer,

    /// Energy-consistent formulation (Dormieux and Canou, 1990)
    ///
    /// Preserves the modulus: `|G*| = G`
    Dormieux,
}

impl CompModulus {
    /// Returns the formulation matching a raw label
    pub fn from_label(label: &str) -> Result<Self, SiteError> {
        match label {
            "seed" => Ok(CompModulus::Seed),
            "kramer" => Ok(CompModulus::Kramer),
            "dormieux" => Ok(CompModulus::Dormieux),
            _ => Err(SiteError::UnsupportedModel(
                "unrecognized complex modulus formulation",
            )),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{CompModulus, WaveField};
    use crate::SiteError;

    #[test]
    fn wave_field_from_label_works() {
        assert_eq!(WaveField::from_label("outcrop"), Ok(WaveField::Outcrop));
        assert_eq!(WaveField::from_label("within"), Ok(WaveField::Within));
        assert_eq!(
            WaveField::from_label("incoming_only"),
            Ok(WaveField::IncomingOnly)
        );
        assert_eq!(
            WaveField::from_label("refracted"),
            Err(SiteError::Configuration("unknown wave field label"))
        );
    }

    #[test]
    fn comp_modulus_from_label_works() {
        assert_eq!(CompModulus::from_label("seed"), Ok(CompModulus::Seed));
        assert_eq!(CompModulus::from_label("kramer"), Ok(CompModulus::Kramer));
        assert_eq!(
            CompModulus::from_label("dormieux"),
            Ok(CompModulus::Dormieux)
        );
        assert_eq!(
            CompModulus::from_label("viscous"),
            Err(SiteError::UnsupportedModel(
                "unrecognized complex modulus formulation"
            ))
        );
    }
}
