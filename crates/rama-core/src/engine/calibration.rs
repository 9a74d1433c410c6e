use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InsufficientDataError {
    #[error("Calibration requires at least 2 pairs (got {0})")]
    TooFewPairs(usize),

    #[error("Internal energies have zero variance; the slope is undefined")]
    ZeroVariance,
}

/// Ordinary-least-squares map from the internal energy scale to an external
/// scalar score: `external ≈ slope * internal + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub rmse: f64,
}

/// Fits the linear map over `(internal_energy, external_score)` pairs.
///
/// Fails fast on fewer than two pairs or zero internal-energy variance;
/// retrying cannot repair degenerate calibration data.
pub fn fit(pairs: &[(f64, f64)]) -> Result<CalibrationFit, InsufficientDataError> {
    if pairs.len() < 2 {
        return Err(InsufficientDataError::TooFewPairs(pairs.len()));
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    for &(x, y) in pairs {
        covariance += (x - mean_x) * (y - mean_y);
        variance_x += (x - mean_x).powi(2);
    }
    if variance_x < f64::EPSILON {
        return Err(InsufficientDataError::ZeroVariance);
    }

    let slope = covariance / variance_x;
    let intercept = mean_y - slope * mean_x;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for &(x, y) in pairs {
        let predicted = slope * x + intercept;
        ss_res += (y - predicted).powi(2);
        ss_tot += (y - mean_y).powi(2);
    }
    let r_squared = if ss_tot < f64::EPSILON {
        // Perfectly flat external scores reproduced exactly.
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(CalibrationFit {
        slope,
        intercept,
        r_squared,
        rmse: (ss_res / n).sqrt(),
    })
}
