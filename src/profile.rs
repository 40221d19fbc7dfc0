use crate::interp::linear_interp;
use crate::{Layer, Location, SiteError, SoilType, WaveField, GRAVITY};
use log::debug;
use std::ops::Index;

/// Holds the soil column: a stack of layers over an infinite halfspace
///
/// The last layer is the halfspace; it has no finite base and is never
/// advanced past when chaining depths and stresses down the column. The
/// profile owns its layers and keeps the depth and total vertical stress at
/// the top of every layer consistent: `depth[i] = depth_base[i-1]` and
/// `vert_stress[i]` equals the stress at the base of layer i-1. The chain is
/// recomputed whenever a thickness changes (see [`Profile::set_thickness`]).
#[derive(Clone, Debug)]
pub struct Profile {
    /// Layers from the surface down; the last one is the halfspace
    layers: Vec<Layer>,

    /// Depth of the water table [m]
    wt_depth: f64,
}

impl Profile {
    /// Allocates a new instance and runs the layer-update pass
    pub fn new(layers: Vec<Layer>, wt_depth: f64) -> Result<Self, SiteError> {
        if layers.is_empty() {
            return Err(SiteError::Configuration(
                "a profile requires at least one layer (the halfspace)",
            ));
        }
        if wt_depth < 0.0 {
            return Err(SiteError::Configuration(
                "water table depth must be non-negative",
            ));
        }
        let mut profile = Profile { layers, wt_depth };
        profile.update_layers(0)?;
        Ok(profile)
    }

    /// Returns the number of layers (including the halfspace)
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Tells whether the profile has no layers (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the layers from the surface down
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns a mutable layer, e.g., for the solver to assign strains
    ///
    /// The thickness cannot be changed through this accessor; use
    /// [`Profile::set_thickness`] so the column stays consistent.
    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer, SiteError> {
        if index >= self.layers.len() {
            return Err(SiteError::Configuration("layer index is out of range"));
        }
        Ok(&mut self.layers[index])
    }

    /// Returns the depth of the water table [m]
    pub fn wt_depth(&self) -> f64 {
        self.wt_depth
    }

    /// Assigns the depth of the water table [m]
    pub fn set_wt_depth(&mut self, wt_depth: f64) -> Result<(), SiteError> {
        if wt_depth < 0.0 {
            return Err(SiteError::Configuration(
                "water table depth must be non-negative",
            ));
        }
        self.wt_depth = wt_depth;
        Ok(())
    }

    /// Assigns a new thickness to a layer and re-chains the column below it
    pub fn set_thickness(&mut self, index: usize, thickness: f64) -> Result<(), SiteError> {
        if index >= self.layers.len() {
            return Err(SiteError::Configuration("layer index is out of range"));
        }
        if thickness < 0.0 {
            return Err(SiteError::Configuration("thickness must be non-negative"));
        }
        self.layers[index].set_thickness(thickness);
        self.update_layers(index + 1)
    }

    /// Recomputes depth and total vertical stress from a starting layer down
    ///
    /// Chains from the base of the preceding layer; with `start_index = 0`
    /// the chain starts at the surface with zero depth and stress.
    pub fn update_layers(&mut self, start_index: usize) -> Result<(), SiteError> {
        if start_index > self.layers.len() {
            return Err(SiteError::Configuration("start index is out of range"));
        }
        let (mut depth, mut vert_stress) = if start_index == 0 {
            (0.0, 0.0)
        } else {
            let prev = &self.layers[start_index - 1];
            (prev.depth_base(), prev.vert_stress(prev.thickness())?)
        };
        let n = self.layers.len();
        for i in start_index..n {
            self.layers[i].set_top(depth, vert_stress);
            if i + 1 < n {
                // values at the base of this layer apply at the top of the next
                depth = self.layers[i].depth_base();
                vert_stress = self.layers[i].vert_stress(self.layers[i].thickness())?;
            }
        }
        debug!(
            "updated layers {}..{} (column base depth = {})",
            start_index,
            n,
            self.layers[n - 1].depth()
        );
        Ok(())
    }

    /// Returns the hydrostatic pore pressure at a depth [kN/m²]
    ///
    /// Zero at and above the water table, growing linearly with slope equal
    /// to the gravitational constant below it.
    pub fn pore_pressure(&self, depth: f64) -> f64 {
        GRAVITY * f64::max(depth - self.wt_depth, 0.0)
    }

    /// Creates a location addressed by depth or by layer index
    ///
    /// Exactly one of `depth` and `index` must be given. By depth, the first
    /// layer whose range contains the depth is selected, falling back to the
    /// halfspace (at zero offset) when the depth exceeds all finite layers.
    /// By index, the location is at the top of that layer.
    pub fn location(
        &self,
        wave_field: WaveField,
        depth: Option<f64>,
        index: Option<usize>,
    ) -> Result<Location<'_>, SiteError> {
        match (depth, index) {
            (Some(depth), None) => {
                let n = self.layers.len();
                for (i, layer) in self.layers[..n - 1].iter().enumerate() {
                    if layer.depth() <= depth && depth < layer.depth_base() {
                        return Location::new(i, layer, wave_field, depth - layer.depth());
                    }
                }
                Location::new(n - 1, &self.layers[n - 1], wave_field, 0.0)
            }
            (None, Some(index)) => {
                if index >= self.layers.len() {
                    return Err(SiteError::Configuration("layer index is out of range"));
                }
                Location::new(index, &self.layers[index], wave_field, 0.0)
            }
            _ => Err(SiteError::Configuration(
                "exactly one of depth or index must be given",
            )),
        }
    }

    /// Returns the total or effective vertical stress at a location [kN/m²]
    pub fn vert_stress_at(&self, location: &Location, effective: bool) -> Result<f64, SiteError> {
        let total = location.vert_stress()?;
        if effective {
            Ok(total - self.pore_pressure(location.depth()))
        } else {
            Ok(total)
        }
    }

    /// Returns the time-averaged shear-wave velocity down to a depth [m/s]
    ///
    /// Builds the cumulative travel-time-versus-depth curve (extending into
    /// the halfspace if needed) and returns `depth / travel_time(depth)`.
    pub fn time_average_vel(&self, depth: f64) -> Result<f64, SiteError> {
        if depth <= 0.0 {
            return Err(SiteError::DegenerateValue(
                "depth must be positive to average the velocity",
            ));
        }
        let n = self.layers.len();
        let mut depths: Vec<f64> = self.layers.iter().map(|layer| layer.depth()).collect();
        // the last layer is infinite and is treated separately
        let mut travel_times = vec![0.0];
        travel_times.extend(self.layers[..n - 1].iter().map(|layer| layer.travel_time()));
        // if needed, extend into the halfspace down to the requested depth
        let halfspace = &self.layers[n - 1];
        if depths[n - 1] < depth {
            depths.push(depth);
            travel_times.push((depth - halfspace.depth()) / halfspace.shear_vel());
        }
        let mut total = 0.0;
        let cumulative: Vec<f64> = travel_times
            .iter()
            .map(|dt| {
                total += dt;
                total
            })
            .collect();
        Ok(depth / linear_interp(&depths, &cumulative, depth))
    }

    /// Estimates the equivalent column-average velocity of the fundamental
    /// Rayleigh mode [m/s]
    ///
    /// Follows the simplification proposed by Urzua et al. (2017): the mode
    /// shape is approximated by the cumulative-from-base integral of
    /// `thickness · depth_mid / vs²` per layer instead of solving the
    /// eigenproblem.
    pub fn simplified_rayleigh_vel(&self) -> Result<f64, SiteError> {
        let n = self.layers.len();
        let total_thickness: f64 = self.layers.iter().map(|layer| layer.thickness()).sum();
        if total_thickness <= 0.0 {
            return Err(SiteError::DegenerateValue(
                "the column has no finite thickness",
            ));
        }
        let mut mode_incr = vec![0.0; n];
        for (i, layer) in self.layers.iter().enumerate() {
            let vs = layer.shear_vel();
            mode_incr[i] = layer.depth_mid() * layer.thickness() / (vs * vs);
        }
        // mode shape accumulated from the base of the column, with a
        // trailing zero below the last layer
        let mut shape = vec![0.0; n + 1];
        for i in (0..n).rev() {
            shape[i] = shape[i + 1] + mode_incr[i];
        }
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, layer) in self.layers.iter().enumerate() {
            let vs = layer.shear_vel();
            let dm = layer.depth_mid();
            numerator += layer.thickness() * dm * dm / (vs * vs);
            let pair = shape[i] + shape[i + 1];
            denominator += layer.thickness() * pair * pair;
        }
        let freq_fund = f64::sqrt(4.0 * numerator / denominator);
        let period_fund = 2.0 * std::f64::consts::PI / freq_fund;
        Ok(4.0 * total_thickness / period_fund)
    }

    /// Returns the site attenuation κ₀ of the column [s]
    pub fn site_attenuation(&self) -> f64 {
        self.layers.iter().map(|layer| layer.incr_site_atten()).sum()
    }

    /// Returns the largest relative error across all layers [percent]
    ///
    /// This is the column-level convergence measure checked by the external
    /// equivalent-linear solver after each strain assignment.
    pub fn max_error(&self) -> f64 {
        self.layers
            .iter()
            .map(|layer| layer.max_error())
            .fold(0.0, f64::max)
    }

    /// Restores the small-strain state of every layer
    pub fn reset(&mut self) {
        for layer in &mut self.layers {
            layer.reset();
        }
    }

    /// Returns the distinct soil types referenced by the layers
    ///
    /// Duplicates are removed by structural equality, so soil types shared
    /// across layers appear once.
    pub fn soil_types(&self) -> Vec<&SoilType> {
        let mut out: Vec<&SoilType> = Vec::new();
        for layer in &self.layers {
            let soil_type = layer.soil_type();
            if !out.iter().any(|known| *known == soil_type) {
                out.push(soil_type);
            }
        }
        out
    }

    /// Splits the layers into thinner ones for wave propagation
    pub fn auto_discretize(&self) -> Result<Profile, SiteError> {
        Err(SiteError::UnsupportedModel(
            "automatic layer discretization is not implemented",
        ))
    }
}

impl Index<usize> for Profile {
    type Output = Layer;
    fn index(&self, index: usize) -> &Layer {
        &self.layers[index]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
