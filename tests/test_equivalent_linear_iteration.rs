use russell_lab::approx_eq;
use sira::{
    CompModulus, Damping, Layer, ModelDarendeli, ModelMenq, ParamDarendeli, ParamMenq, Profile,
    SiteError, SoilType, WaveField,
};
use std::sync::Arc;

const TOL_PERCENT: f64 = 0.5;
const MAX_ITERATIONS: usize = 30;

/// Builds a clay-over-gravel column on an elastic halfspace
fn sample_profile() -> Result<Profile, SiteError> {
    let mut param = ParamDarendeli::default();
    param.plas_index = 30.0;
    let clay = Arc::new(ModelDarendeli::new(param)?.soil_type("clay (PI=30)", 17.0, None)?);
    let gravel = Arc::new(ModelMenq::new(ParamMenq::default())?.soil_type("gravel", 19.0, None)?);
    let rock = Arc::new(SoilType::new("rock", 22.0, None, Damping::Constant(0.004))?);
    let layers = vec![
        Layer::new(clay, 8.0, 180.0)?,
        Layer::new(gravel, 12.0, 320.0)?,
        Layer::new(rock, 0.0, 1100.0)?,
    ];
    Profile::new(layers, 4.0)
}

#[test]
fn test_equivalent_linear_iteration() -> Result<(), SiteError> {
    // profile: two nonlinear layers over an elastic halfspace
    let mut profile = sample_profile()?;
    let initial_mods: Vec<f64> = profile.layers().iter().map(|l| l.initial_shear_mod()).collect();

    // stand-in for the frequency-domain solver: each layer carries a fixed
    // demand and the compatible strain is the fixed point of
    // strain = demand / shear_mod(strain)
    let demands = [3000.0, 8000.0, 500.0];

    // iterate until the relative change of modulus and damping converges
    let mut iterations = 0;
    loop {
        for i in 0..profile.len() {
            let strain = demands[i] / profile[i].shear_mod().value();
            profile.layer_mut(i)?.set_strain(strain)?;
        }
        iterations += 1;
        if profile.max_error() < TOL_PERCENT || iterations == MAX_ITERATIONS {
            break;
        }
    }
    assert!(iterations < MAX_ITERATIONS);
    assert!(profile.max_error() < TOL_PERCENT);

    // the nonlinear layers soften; the elastic halfspace does not
    assert!(profile[0].shear_mod().value() < 0.8 * initial_mods[0]);
    assert!(profile[1].shear_mod().value() < 0.8 * initial_mods[1]);
    assert_eq!(profile[2].shear_mod().value(), initial_mods[2]);

    // damping grows above the small-strain value
    assert!(profile[0].damping().value() > profile[0].soil_type().damping_min());
    assert!(profile[1].damping().value() > profile[1].soil_type().damping_min());
    assert_eq!(profile[2].damping().value(), 0.004);

    // the energy-consistent complex velocity preserves the real amplitude
    let comp_vel = profile[0].comp_shear_vel(CompModulus::Dormieux);
    approx_eq(comp_vel.norm(), profile[0].shear_vel(), 1e-10);

    // resetting restores the small-strain state of the whole column
    profile.reset();
    assert_eq!(profile.max_error(), 0.0);
    for (i, layer) in profile.layers().iter().enumerate() {
        assert_eq!(layer.shear_mod().value(), initial_mods[i]);
    }
    Ok(())
}

#[test]
fn test_profile_metrics_and_locations() -> Result<(), SiteError> {
    let profile = sample_profile()?;

    // time-averaged velocity over the finite layers: 20 / (8/180 + 12/320)
    approx_eq(profile.time_average_vel(20.0)?, 244.0677966101695, 1e-12);

    // small-strain attenuation collects every layer's contribution
    let expected_atten = 2.0 * profile[0].soil_type().damping_min() * 8.0 / 180.0
        + 2.0 * profile[1].soil_type().damping_min() * 12.0 / 320.0;
    approx_eq(profile.site_attenuation(), expected_atten, 1e-15);

    // location in the second layer; effective stress removes the water column
    let location = profile.location(WaveField::Outcrop, Some(14.0), None)?;
    assert_eq!(location.index(), 1);
    assert_eq!(location.depth_within(), 6.0);
    let total = profile.vert_stress_at(&location, false)?;
    let effective = profile.vert_stress_at(&location, true)?;
    approx_eq(total, 8.0 * 17.0 + 6.0 * 19.0, 1e-13);
    approx_eq(total - effective, sira::GRAVITY * 10.0, 1e-13);

    // the distinct soil types of the column
    let soil_types = profile.soil_types();
    assert_eq!(soil_types.len(), 3);
    assert!(soil_types[0].is_nonlinear());
    assert!(!soil_types[2].is_nonlinear());
    Ok(())
}
