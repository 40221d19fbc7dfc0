//! Sira -- soil column models for equivalent-linear site-response analysis
//!
//! This crate represents a layered soil column (a [`Profile`] of [`Layer`]s
//! over an infinite halfspace) together with the strain-dependent stiffness
//! and damping of its materials ([`SoilType`] holding [`NonlinearProperty`]
//! curves). Empirical regression models (Darendeli, Menq, Kishida) generate
//! the nonlinear curves from physical soil parameters.
//!
//! An external frequency-domain solver drives the equivalent-linear
//! iteration: it assigns a strain to each layer, reads the strain-compatible
//! complex shear modulus and velocity, and checks [`Layer::max_error`]
//! (tracked by [`IterativeValue`]) until the column converges. This crate
//! exposes the state needed for that loop but no looping construct itself.

mod constants;
mod enums;
mod error;
mod interp;
mod iterative_value;
mod layer;
mod location;
mod model_darendeli;
mod model_hyperbolic;
mod model_kishida;
mod model_menq;
mod nonlinear_property;
mod parameters;
mod profile;
mod soil_type;
pub use crate::constants::*;
pub use crate::enums::*;
pub use crate::error::*;
pub use crate::iterative_value::*;
pub use crate::layer::*;
pub use crate::location::*;
pub use crate::model_darendeli::*;
pub use crate::model_hyperbolic::*;
pub use crate::model_kishida::*;
pub use crate::model_menq::*;
pub use crate::nonlinear_property::*;
pub use crate::parameters::*;
pub use crate::profile::*;
pub use crate::soil_type::*;
