//! Standard-normal tail probability for the test statistic.
//!
//! Uses the Abramowitz & Stegun 7.1.26 polynomial approximation of erf
//! (absolute error below 1.5e-7), which is plenty for reporting p-values
//! alongside an asymptotic z-score.

const P: f64 = 0.327_591_1;
const A1: f64 = 0.254_829_592;
const A2: f64 = -0.284_496_736;
const A3: f64 = 1.421_413_741;
const A4: f64 = -1.453_152_027;
const A5: f64 = 1.061_405_429;

fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Cumulative distribution function of the standard normal.
pub(crate) fn std_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Two-sided p-value for a standard-normal test statistic.
pub(crate) fn two_sided_p_value(z: f64) -> f64 {
    (2.0 * (1.0 - std_normal_cdf(z.abs()))).clamp(0.0, 1.0)
}
