use crate::{CompModulus, Damping, IterativeValue, SiteError, SoilType};
use russell_lab::{cpx, Complex64};
use std::sync::Arc;

/// Couples a soil type with the geometry and stress state of one layer
///
/// A layer holds the strain-compatible shear modulus and damping as
/// [`IterativeValue`]s so an external equivalent-linear solver can assign a
/// strain, read the complex modulus/velocity, and check [`Layer::max_error`]
/// until convergence.
///
/// # Notes
///
/// * The soil type is shared (several layers may reference the same one)
/// * `depth` and `vert_stress_top` are assigned by the owning
///   [`crate::Profile`] during its layer-update pass and are only valid
///   afterwards
/// * The thickness is mutated through [`crate::Profile::set_thickness`] so
///   the depth/stress chaining of the column stays consistent
#[derive(Clone, Debug)]
pub struct Layer {
    /// Soil type (shared, immutable after construction)
    soil_type: Arc<SoilType>,

    /// Thickness [m]
    thickness: f64,

    /// Initial (small-strain) shear-wave velocity [m/s]
    initial_shear_vel: f64,

    /// Depth to the top of the layer [m] (assigned by the profile)
    depth: f64,

    /// Total vertical stress at the top of the layer [kN/m²] (assigned by the profile)
    vert_stress_top: f64,

    /// Strain-compatible shear modulus [kN/m²]
    shear_mod: IterativeValue,

    /// Strain-compatible damping ratio [decimal]
    damping: IterativeValue,

    /// Shear strain (iteration history only tracked for nonlinear soils)
    strain: IterativeValue,
}

impl Layer {
    /// Allocates a new instance
    ///
    /// The halfspace at the base of a profile is modeled as a layer with
    /// zero thickness.
    pub fn new(soil_type: Arc<SoilType>, thickness: f64, shear_vel: f64) -> Result<Self, SiteError> {
        if thickness < 0.0 {
            return Err(SiteError::Configuration("thickness must be non-negative"));
        }
        if shear_vel <= 0.0 {
            return Err(SiteError::Configuration("shear velocity must be positive"));
        }
        let initial_shear_mod = soil_type.density() * shear_vel * shear_vel;
        let damping_min = soil_type.damping_min();
        Ok(Layer {
            soil_type,
            thickness,
            initial_shear_vel: shear_vel,
            depth: 0.0,
            vert_stress_top: 0.0,
            shear_mod: IterativeValue::new(initial_shear_mod),
            damping: IterativeValue::new(damping_min),
            strain: IterativeValue::new(0.0),
        })
    }

    /// Creates a copy with the same inputs and a fresh iteration state
    pub fn duplicate(&self) -> Layer {
        Layer {
            soil_type: Arc::clone(&self.soil_type),
            thickness: self.thickness,
            initial_shear_vel: self.initial_shear_vel,
            depth: 0.0,
            vert_stress_top: 0.0,
            shear_mod: IterativeValue::new(self.initial_shear_mod()),
            damping: IterativeValue::new(self.soil_type.damping_min()),
            strain: IterativeValue::new(0.0),
        }
    }

    /// Returns the soil type
    pub fn soil_type(&self) -> &SoilType {
        &self.soil_type
    }

    /// Returns the shared handle to the soil type
    pub fn soil_type_handle(&self) -> &Arc<SoilType> {
        &self.soil_type
    }

    /// Returns the thickness [m]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Returns the depth to the top of the layer [m]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Returns the depth to the middle of the layer [m]
    pub fn depth_mid(&self) -> f64 {
        self.depth + self.thickness / 2.0
    }

    /// Returns the depth to the base of the layer [m]
    pub fn depth_base(&self) -> f64 {
        self.depth + self.thickness
    }

    /// Returns the unit weight of the soil [kN/m³]
    pub fn unit_wt(&self) -> f64 {
        self.soil_type.unit_wt()
    }

    /// Returns the density of the soil [Mg/m³]
    pub fn density(&self) -> f64 {
        self.soil_type.density()
    }

    /// Returns the initial (small-strain) shear-wave velocity [m/s]
    pub fn initial_shear_vel(&self) -> f64 {
        self.initial_shear_vel
    }

    /// Returns the initial (small-strain) shear modulus [kN/m²]
    pub fn initial_shear_mod(&self) -> f64 {
        self.density() * self.initial_shear_vel * self.initial_shear_vel
    }

    /// Returns the strain-compatible shear modulus [kN/m²]
    pub fn shear_mod(&self) -> &IterativeValue {
        &self.shear_mod
    }

    /// Returns the strain-compatible damping ratio [decimal]
    pub fn damping(&self) -> &IterativeValue {
        &self.damping
    }

    /// Returns the shear strain
    pub fn strain(&self) -> &IterativeValue {
        &self.strain
    }

    /// Returns the strain-compatible shear-wave velocity [m/s]
    pub fn shear_vel(&self) -> f64 {
        f64::sqrt(self.shear_mod.value() / self.density())
    }

    /// Returns the strain-compatible complex shear modulus [kN/m²]
    ///
    /// Combines the current real modulus with the current damping according
    /// to the requested dissipation formulation.
    pub fn comp_shear_mod(&self, model: CompModulus) -> Complex64 {
        let damping = self.damping.value();
        let comp_factor = match model {
            CompModulus::Seed => cpx!(1.0, 2.0 * damping),
            CompModulus::Kramer => cpx!(1.0 - damping * damping, 2.0 * damping),
            CompModulus::Dormieux => cpx!(f64::sqrt(1.0 - 4.0 * damping * damping), 2.0 * damping),
        };
        comp_factor * self.shear_mod.value()
    }

    /// Returns the strain-compatible complex shear-wave velocity [m/s]
    pub fn comp_shear_vel(&self, model: CompModulus) -> Complex64 {
        (self.comp_shear_mod(model) / self.density()).sqrt()
    }

    /// Returns the largest relative error of the iterative values [percent]
    pub fn max_error(&self) -> f64 {
        f64::max(
            self.shear_mod.relative_error(),
            self.damping.relative_error(),
        )
    }

    /// Assigns a strain and recomputes the dependent modulus and damping
    ///
    /// The dispatch between nonlinear and linear behavior follows the
    /// explicit `is_nonlinear` flag of the soil type: linear soils keep a
    /// modulus reduction of 1 and their constant damping.
    pub fn set_strain(&mut self, strain: f64) -> Result<(), SiteError> {
        if !strain.is_finite() {
            return Err(SiteError::DegenerateValue("strain must be finite"));
        }
        if strain < 0.0 {
            return Err(SiteError::Configuration("strain must be non-negative"));
        }
        if self.soil_type.is_nonlinear() {
            self.strain.update(strain);
        } else {
            self.strain = IterativeValue::new(strain);
        }
        let mod_reduc = match self.soil_type.mod_reduc() {
            Some(curve) => curve.evaluate(strain)?,
            None => 1.0,
        };
        self.shear_mod
            .update(self.initial_shear_mod() * mod_reduc);
        let damping = match self.soil_type.damping() {
            Damping::Curve(curve) => curve.evaluate(strain)?,
            Damping::Constant(value) => *value,
        };
        self.damping.update(damping);
        Ok(())
    }

    /// Restores the small-strain state and clears the iteration history
    pub fn reset(&mut self) {
        self.shear_mod = IterativeValue::new(self.initial_shear_mod());
        self.damping = IterativeValue::new(self.soil_type.damping_min());
        self.strain = IterativeValue::new(0.0);
    }

    /// Returns the total vertical stress at an offset within the layer [kN/m²]
    ///
    /// Valid only after the owning profile has run its layer-update pass.
    pub fn vert_stress(&self, depth_within: f64) -> Result<f64, SiteError> {
        if depth_within < 0.0 || depth_within > self.thickness {
            return Err(SiteError::Configuration(
                "depth within the layer must be in 0 ≤ d ≤ thickness",
            ));
        }
        Ok(self.vert_stress_top + depth_within * self.unit_wt())
    }

    /// Returns the shear-wave travel time through the layer [s]
    pub fn travel_time(&self) -> f64 {
        self.thickness / self.shear_vel()
    }

    /// Returns the contribution of the layer to the site attenuation [s]
    ///
    /// `κ₀ increment = 2 βmin h / vs`
    pub fn incr_site_atten(&self) -> f64 {
        2.0 * self.soil_type.damping_min() * self.thickness / self.initial_shear_vel
    }

    /// Assigns the depth and total vertical stress at the top of the layer
    /// (called by the profile during its layer-update pass)
    pub(crate) fn set_top(&mut self, depth: f64, vert_stress: f64) {
        self.depth = depth;
        self.vert_stress_top = vert_stress;
    }

    /// Assigns the thickness (called by the profile, which then re-chains
    /// the column)
    pub(crate) fn set_thickness(&mut self, thickness: f64) {
        self.thickness = thickness;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
