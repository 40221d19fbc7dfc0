use crate::{Layer, SiteError, WaveField};

/// Addresses a point within a layer of a profile
///
/// A location pairs the layer (by index and by reference) with the depth
/// measured from the top of that layer and the wave field at which the
/// external solver evaluates the motion.
#[derive(Clone, Copy, Debug)]
pub struct Location<'a> {
    /// Index of the layer in the profile
    index: usize,

    /// The layer containing the point
    layer: &'a Layer,

    /// Depth from the top of the layer [m]
    depth_within: f64,

    /// Wave field at which the motion is evaluated
    wave_field: WaveField,
}

impl<'a> Location<'a> {
    /// Allocates a new instance
    pub fn new(
        index: usize,
        layer: &'a Layer,
        wave_field: WaveField,
        depth_within: f64,
    ) -> Result<Self, SiteError> {
        if depth_within < 0.0 || depth_within > layer.thickness() {
            return Err(SiteError::Configuration(
                "depth within the layer must be in 0 ≤ d ≤ thickness",
            ));
        }
        Ok(Location {
            index,
            layer,
            depth_within,
            wave_field,
        })
    }

    /// Allocates a new instance from a raw wave field label
    pub fn from_label(
        index: usize,
        layer: &'a Layer,
        wave_field: &str,
        depth_within: f64,
    ) -> Result<Self, SiteError> {
        Location::new(index, layer, WaveField::from_label(wave_field)?, depth_within)
    }

    /// Returns the index of the layer in the profile
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the layer containing the point
    pub fn layer(&self) -> &'a Layer {
        self.layer
    }

    /// Returns the depth from the top of the layer [m]
    pub fn depth_within(&self) -> f64 {
        self.depth_within
    }

    /// Returns the wave field at which the motion is evaluated
    pub fn wave_field(&self) -> WaveField {
        self.wave_field
    }

    /// Returns the absolute depth of the point in the column [m]
    pub fn depth(&self) -> f64 {
        self.layer.depth() + self.depth_within
    }

    /// Returns the total vertical stress at the point [kN/m²]
    ///
    /// The effective stress (with the pore pressure subtracted) is computed
    /// by [`crate::Profile::vert_stress_at`] since it depends on the water
    /// table of the profile.
    pub fn vert_stress(&self) -> Result<f64, SiteError> {
        self.layer.vert_stress(self.depth_within)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
