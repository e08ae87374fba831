//! Lo-MacKinlay (1988) variance-ratio test with the heteroskedasticity-robust
//! correction.
//!
//! The variance ratio compares the per-period variance of overlapping
//! q-period log returns against the variance of one-period log returns;
//! under the random-walk null it equals 1. The robust correction `theta`
//! weights squared-deviation autocorrelations at lags 1..q-1 with a
//! triangular kernel, so the z-score stays asymptotically standard normal
//! when returns are heteroskedastic.
//!
//! Every quantity is a pure function of the weekly series and the horizon:
//! repeat calls with the same inputs yield bit-identical output, and calls
//! for different horizons are independent.

use serde::Serialize;
use thiserror::Error;

use crate::domain::WeeklySeries;
use crate::stats::normal::two_sided_p_value;

/// Variance below this is indistinguishable from double-precision noise in
/// the squared log-return deviations and is treated as zero.
const VARIANCE_FLOOR: f64 = 1e-24;

/// Outcome of one variance-ratio test.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VarianceRatioResult {
    /// Aggregation horizon (weeks per long period).
    pub q: usize,
    /// Number of one-period returns (series length minus one).
    pub n: usize,
    /// sigma_q^2 / sigma_a^2; 1 under the random-walk null.
    pub variance_ratio: f64,
    /// Heteroskedasticity-robust asymptotic variance of the ratio.
    pub theta: f64,
    /// sqrt(n) * (VR - 1) / sqrt(theta); asymptotically N(0, 1).
    pub z_statistic: f64,
    /// Two-sided normal tail probability of `z_statistic`.
    pub p_value: f64,
}

/// Structured error types for estimation.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("invalid horizon: q={q} must satisfy 2 <= q < {n_raw} (series length)")]
    InvalidHorizon { q: usize, n_raw: usize },

    #[error("degenerate variance: one-period returns have zero sample variance")]
    DegenerateVariance,

    #[error("degenerate horizon: overlapping-sample normalizer m={m} is not positive")]
    DegenerateHorizon { m: f64 },

    #[error("degenerate theta: robust variance correction collapsed to {theta}")]
    DegenerateTheta { theta: f64 },
}

/// Run the variance-ratio test on `series` at horizon `q`.
///
/// Requires `2 <= q < series.len()`. All sums run in ascending index order
/// with f64 accumulation; indices whose lag operand falls before the start
/// of the series are excluded from every sum rather than treated as zero.
pub fn estimate(series: &WeeklySeries, q: usize) -> Result<VarianceRatioResult, EstimateError> {
    let n_raw = series.len();
    if q < 2 || q >= n_raw {
        return Err(EstimateError::InvalidHorizon { q, n_raw });
    }

    // Log levels and one-period returns. n = n_raw - 1.
    let logs: Vec<f64> = series.levels().map(f64::ln).collect();
    let rets: Vec<f64> = logs.windows(2).map(|w| w[1] - w[0]).collect();
    let n = rets.len();
    let nf = n as f64;
    let qf = q as f64;

    // Overlapping-sample normalizer. q < n_raw already excludes m <= 0, but
    // the formula is guarded on its own terms.
    let m = qf * (nf - qf + 1.0) * (1.0 - qf / nf);
    if n <= 1 || m <= 0.0 {
        return Err(EstimateError::DegenerateHorizon { m });
    }

    let muhat = rets.iter().sum::<f64>() / nf;
    let devs: Vec<f64> = rets.iter().map(|r| r - muhat).collect();

    // Unbiased one-period variance.
    let sum_sq_dev: f64 = devs.iter().map(|d| d * d).sum();
    let sigma_a_sq = sum_sq_dev / (nf - 1.0);
    if sigma_a_sq <= VARIANCE_FLOOR {
        return Err(EstimateError::DegenerateVariance);
    }

    // q-period variance from overlapping windows: the q-period return ending
    // at index k is defined for k >= q only.
    let sum_sq_dev_q: f64 = (q..n_raw)
        .map(|k| {
            let dev_q = (logs[k] - logs[k - q]) - qf * muhat;
            dev_q * dev_q
        })
        .sum();
    let sigma_q_sq = sum_sq_dev_q / m;

    let variance_ratio = sigma_q_sq / sigma_a_sq;

    // Robust correction: delta(j) is a squared-deviation autocorrelation at
    // lag j; the shared denominator is hoisted out of the lag loop.
    let denom = sum_sq_dev * sum_sq_dev;
    let mut theta = 0.0;
    for j in 1..q {
        let lag_product: f64 = devs[j..]
            .iter()
            .zip(devs.iter())
            .map(|(dk, dk_lag)| (dk * dk) * (dk_lag * dk_lag))
            .sum();
        let delta_j = nf * lag_product / denom;
        let weight = 2.0 * (qf - j as f64) / qf;
        theta += weight * weight * delta_j;
    }
    // A collapsed theta would send z to infinity; it means the lag products
    // vanished even though the one-period variance did not.
    if !theta.is_finite() || theta <= 0.0 {
        return Err(EstimateError::DegenerateTheta { theta });
    }

    let z_statistic = nf.sqrt() * (variance_ratio - 1.0) / theta.sqrt();
    Ok(VarianceRatioResult {
        q,
        n,
        variance_ratio,
        theta,
        z_statistic,
        p_value: two_sided_p_value(z_statistic),
    })
}

/// Run the test at each horizon, preserving input order.
///
/// Horizons are independent and replayable; the first failure aborts the
/// batch so a partially valid report is never returned.
pub fn evaluate_horizons(
    series: &WeeklySeries,
    horizons: &[usize],
) -> Result<Vec<VarianceRatioResult>, EstimateError> {
    horizons.iter().map(|&q| estimate(series, q)).collect()
}
