use crate::{NonlinearProperty, SiteError, GRAVITY};

/// Defines the damping behavior of a soil type
#[derive(Clone, Debug, PartialEq)]
pub enum Damping {
    /// Linear behavior with a constant damping ratio [decimal]
    Constant(f64),

    /// Strain-dependent damping ratio curve
    Curve(NonlinearProperty),
}

/// Combines material properties with nonlinear strain-dependent behavior
///
/// A soil type couples the unit weight of the material with an optional
/// shear-modulus reduction curve and a damping specification. Without a
/// modulus reduction curve the soil is linear with no reduction; with a
/// constant damping the soil dissipates the same energy at every strain.
///
/// Soil types are immutable once built and may be shared by several layers.
#[derive(Clone, Debug, PartialEq)]
pub struct SoilType {
    /// Name used for identification
    name: String,

    /// Unit weight of the material [kN/m³]
    unit_wt: f64,

    /// Shear-modulus reduction curve (None => linear, no reduction)
    mod_reduc: Option<NonlinearProperty>,

    /// Damping specification (constant ratio or curve)
    damping: Damping,
}

impl SoilType {
    /// Allocates a new instance
    pub fn new(
        name: &str,
        unit_wt: f64,
        mod_reduc: Option<NonlinearProperty>,
        damping: Damping,
    ) -> Result<Self, SiteError> {
        if unit_wt < 0.0 {
            return Err(SiteError::Configuration("unit weight must be non-negative"));
        }
        Ok(SoilType {
            name: name.to_string(),
            unit_wt,
            mod_reduc,
            damping,
        })
    }

    /// Returns the name of the soil type
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit weight [kN/m³]
    pub fn unit_wt(&self) -> f64 {
        self.unit_wt
    }

    /// Returns the shear-modulus reduction curve (None => linear)
    pub fn mod_reduc(&self) -> Option<&NonlinearProperty> {
        self.mod_reduc.as_ref()
    }

    /// Returns the damping specification
    pub fn damping(&self) -> &Damping {
        &self.damping
    }

    /// Returns the density of the soil [Mg/m³]
    pub fn density(&self) -> f64 {
        self.unit_wt / GRAVITY
    }

    /// Returns the small-strain damping [decimal]
    ///
    /// This is the first value of the damping curve, or the constant itself.
    pub fn damping_min(&self) -> f64 {
        match &self.damping {
            Damping::Constant(value) => *value,
            Damping::Curve(curve) => curve.values()[0],
        }
    }

    /// Tells whether any strain-dependent curve is specified
    pub fn is_nonlinear(&self) -> bool {
        self.mod_reduc.is_some() || matches!(self.damping, Damping::Curve(_))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
