use crate::{CurveParam, Damping, NonlinearProperty, SiteError, SoilType};
use log::debug;
use russell_lab::Vector;

/// Defines the regression hooks of the modified hyperbolic soil models
///
/// The Darendeli pipeline (modulus reduction, Masing damping, monotonized
/// total damping) is shared; an implementation only supplies the three
/// closed-form regressions that differ between models.
pub trait HyperbolicFormulation {
    /// Returns the reference strain γᵣ [percent]
    fn strain_ref(&self) -> f64;

    /// Returns the curvature coefficient of the hyperbolic relation
    fn curvature(&self) -> f64;

    /// Returns the minimum (small-strain) damping [percent]
    fn damping_min(&self) -> f64;

    /// Returns the number of loading cycles
    fn num_cycles(&self) -> f64;

    /// Returns the name given to the generated curves
    fn curve_name(&self) -> String;
}

/// Builds a soil type from a hyperbolic formulation over a strain grid
///
/// Runs the shared pipeline:
///
/// 1. Modified hyperbolic modulus reduction `G/Gmax = 1 / (1 + (γ/γᵣ)^a)`
/// 2. Masing damping from the perfect hyperbolic relation, corrected by a
///    cubic polynomial whose coefficients depend on the curvature
/// 3. Masing correction factor `0.6329 − 0.00566 ln(N)`
/// 4. Total damping `βmin + β_masing · b · (G/Gmax)^0.1` [percent]
/// 5. Running-maximum monotonization (damping must not decrease with
///    strain) and conversion to decimal
pub(crate) fn build_hyperbolic_soil_type(
    name: &str,
    unit_wt: f64,
    strains: &Vector,
    form: &dyn HyperbolicFormulation,
) -> Result<SoilType, SiteError> {
    let n = strains.dim();
    if n < 2 {
        return Err(SiteError::Configuration(
            "at least two strains are required to build soil curves",
        ));
    }
    if strains.as_data().iter().any(|s| *s <= 0.0) {
        return Err(SiteError::Configuration("strains must be positive"));
    }

    let strain_ref = form.strain_ref();
    let curvature = form.curvature();
    let damping_min = form.damping_min();
    debug!(
        "hyperbolic curves '{}': strain_ref = {}, curvature = {}, damping_min = {}",
        name, strain_ref, curvature, damping_min
    );

    // modified hyperbolic shear modulus reduction
    let mut mod_reduc = Vector::new(n);
    for i in 0..n {
        mod_reduc[i] = 1.0 / (1.0 + f64::powf(strains[i] / strain_ref, curvature));
    }

    // correction between the perfect hyperbolic strain model and the modified model
    let c1 = -1.1143 * curvature * curvature + 1.8618 * curvature + 0.2523;
    let c2 = 0.0805 * curvature * curvature - 0.0710 * curvature - 0.0095;
    let c3 = -0.0005 * curvature * curvature + 0.0002 * curvature + 0.0003;

    let masing_corr = 0.6329 - 0.00566 * f64::ln(form.num_cycles());

    let mut damping = Vector::new(n);
    let mut running_max = f64::NEG_INFINITY;
    for i in 0..n {
        let strain = strains[i];
        // Masing damping of the perfect hyperbolic model [percent]
        let a1 = (100.0 / std::f64::consts::PI)
            * (4.0 * (strain - strain_ref * f64::ln((strain + strain_ref) / strain_ref))
                / (strain * strain / (strain + strain_ref))
                - 2.0);
        let masing = c1 * a1 + c2 * a1 * a1 + c3 * a1 * a1 * a1;
        let total = damping_min + masing * masing_corr * f64::powf(mod_reduc[i], 0.1);
        // prevent the damping from reducing at large strains
        running_max = f64::max(running_max, total);
        damping[i] = running_max / 100.0;
    }

    let curve_name = form.curve_name();
    let mod_reduc = NonlinearProperty::new(
        &curve_name,
        strains.clone(),
        mod_reduc,
        Some(CurveParam::ModReduc),
    );
    let damping = NonlinearProperty::new(
        &curve_name,
        strains.clone(),
        damping,
        Some(CurveParam::Damping),
    );
    SoilType::new(name, unit_wt, Some(mod_reduc), Damping::Curve(damping))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{build_hyperbolic_soil_type, HyperbolicFormulation};
    use crate::{default_strains, SiteError};
    use russell_lab::{approx_eq, Vector};

    struct Sample {}

    impl HyperbolicFormulation for Sample {
        fn strain_ref(&self) -> f64 {
            0.05
        }
        fn curvature(&self) -> f64 {
            0.9
        }
        fn damping_min(&self) -> f64 {
            1.0
        }
        fn num_cycles(&self) -> f64 {
            10.0
        }
        fn curve_name(&self) -> String {
            "sample".to_string()
        }
    }

    #[test]
    fn build_captures_wrong_input() {
        let form = Sample {};
        assert_eq!(
            build_hyperbolic_soil_type("s", 18.0, &Vector::from(&[1e-4]), &form).err(),
            Some(SiteError::Configuration(
                "at least two strains are required to build soil curves"
            ))
        );
        assert_eq!(
            build_hyperbolic_soil_type("s", 18.0, &Vector::from(&[0.0, 1e-3]), &form).err(),
            Some(SiteError::Configuration("strains must be positive"))
        );
    }

    #[test]
    fn pipeline_works() {
        let form = Sample {};
        let strains = default_strains();
        let soil = build_hyperbolic_soil_type("s", 18.0, &strains, &form).unwrap();
        assert!(soil.is_nonlinear());
        let mod_reduc = soil.mod_reduc().unwrap();
        assert_eq!(mod_reduc.name(), "sample");
        // hyperbolic relation at the grid points
        for i in 0..strains.dim() {
            let expected = 1.0 / (1.0 + f64::powf(strains[i] / 0.05, 0.9));
            approx_eq(mod_reduc.values()[i], expected, 1e-15);
        }
        // hyperbolic relation decreases from ~1 towards 0
        assert!(mod_reduc.values()[0] > 0.99);
        assert!(mod_reduc.values()[strains.dim() - 1] < 0.05);
    }

    #[test]
    fn damping_is_monotone_and_decimal() {
        let form = Sample {};
        let strains = default_strains();
        let soil = build_hyperbolic_soil_type("s", 18.0, &strains, &form).unwrap();
        let damping = match soil.damping() {
            crate::Damping::Curve(curve) => curve,
            _ => panic!("expected damping curve"),
        };
        let values = damping.values();
        for i in 1..values.dim() {
            assert!(values[i] >= values[i - 1]);
        }
        // small-strain damping approaches damping_min converted to decimal
        approx_eq(values[0], 0.01, 1e-3);
        assert_eq!(soil.damping_min(), values[0]);
    }
}
