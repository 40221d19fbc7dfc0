/// Gravitational acceleration [m/s²]
///
/// Used to convert unit weight [kN/m³] into density [Mg/m³] and to compute
/// hydrostatic pore pressure below the water table.
pub const GRAVITY: f64 = 9.80665;

/// Converts stress from kN/m² (kPa) to atmospheres
///
/// The empirical regressions are calibrated with the mean effective stress
/// expressed in atmospheres.
pub const KPA_TO_ATM: f64 = 1000.0 / 101325.0;
