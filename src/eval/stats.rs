//! Paired significance testing for comparing two rankers on the same queries.
//!
//! # References
//!
//! - Smucker et al. (2007). "A comparison of statistical significance tests
//!   for information retrieval evaluation"
//! - Press et al. "Numerical Recipes", section 6.4 (incomplete beta function)

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};

/// Result of a paired t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    /// t-statistic; positive when the first sample has the larger mean.
    pub t_statistic: f64,
    /// Two-sided p-value in `[0, 1]`, or NaN with fewer than two pairs.
    pub p_value: f64,
    /// Degrees of freedom.
    pub df: usize,
}

impl TTestResult {
    /// Returns true if the difference is significant at the given alpha level.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// Formats the result for display.
    pub fn format(&self) -> String {
        let sig_marker = if self.is_significant(0.05) { "*" } else { "" };
        format!(
            "t({})={:.3}, p={:.4}{}",
            self.df, self.t_statistic, self.p_value, sig_marker
        )
    }
}

/// Two-sided paired t-test on per-query scores of two systems.
///
/// Both slices must be in the same query order. When every difference is
/// zero the systems are indistinguishable and the p-value is 1; when the
/// differences are constant but non-zero the p-value is 0. With fewer than
/// two pairs the statistic and p-value are NaN.
pub fn paired_ttest(system_a: &[f64], system_b: &[f64]) -> Result<TTestResult> {
    if system_a.len() != system_b.len() {
        return Err(EvalError::Significance(format!(
            "paired samples differ in length ({} vs {})",
            system_a.len(),
            system_b.len()
        )));
    }
    if system_a.iter().chain(system_b).any(|v| !v.is_finite()) {
        return Err(EvalError::Significance(
            "samples contain non-finite values".to_string(),
        ));
    }

    let n = system_a.len();
    if n < 2 {
        return Ok(TTestResult {
            t_statistic: f64::NAN,
            p_value: f64::NAN,
            df: n.saturating_sub(1),
        });
    }
    let df = n - 1;

    let diffs: Vec<f64> = system_a
        .iter()
        .zip(system_b)
        .map(|(a, b)| a - b)
        .collect();

    let mean_diff = diffs.iter().sum::<f64>() / n as f64;
    let var_diff = diffs.iter().map(|d| (d - mean_diff).powi(2)).sum::<f64>() / df as f64;
    let se = (var_diff / n as f64).sqrt();

    let (t_statistic, p_value) = if se > 0.0 {
        let t = mean_diff / se;
        (t, two_sided_p_value(t, df))
    } else if mean_diff == 0.0 {
        (0.0, 1.0)
    } else {
        (mean_diff.signum() * f64::INFINITY, 0.0)
    };

    Ok(TTestResult {
        t_statistic,
        p_value,
        df,
    })
}

/// Two-sided tail probability of Student's t with `df` degrees of freedom.
///
/// p = I_{df/(df+t²)}(df/2, 1/2)
fn two_sided_p_value(t: f64, df: usize) -> f64 {
    let df = df as f64;
    let x = df / (df + t * t);
    regularized_incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

/// Regularized incomplete beta function I_x(a, b).
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let front =
        (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln()).exp();

    // The continued fraction converges fastest on this side of the mean.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// Lentz evaluation of the incomplete beta continued fraction.
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 200;
    const EPS: f64 = 1e-14;
    const TINY: f64 = 1e-300;

    let guard = |v: f64| if v.abs() < TINY { TINY } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 / guard(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }

    h
}

/// Natural log of the gamma function (Lanczos approximation).
fn ln_gamma(x: f64) -> f64 {
    const COEFFS: [f64; 6] = [
        76.18009172947146,
        -86.50532032941677,
        24.01409824083091,
        -1.231739572450155,
        0.1208650973866179e-2,
        -0.5395239384953e-5,
    ];

    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();

    let mut ser = 1.000000000190015;
    for (i, coeff) in COEFFS.iter().enumerate() {
        ser += coeff / (x + 1.0 + i as f64);
    }

    -tmp + (2.5066282746310005 * ser / x).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_reference_value() {
        // diffs 0.1, 0.2, 0.3: mean 0.2, sd 0.1, t = 2*sqrt(3), df = 2
        let a = [0.5, 0.6, 0.7];
        let b = [0.4, 0.4, 0.4];
        let result = paired_ttest(&a, &b).unwrap();

        assert_eq!(result.df, 2);
        assert!((result.t_statistic - 2.0 * 3.0_f64.sqrt()).abs() < 1e-9);
        // closed form for df = 2: p = 1 - t / sqrt(2 + t^2) = 1 - sqrt(12/14)
        let expected = 1.0 - (12.0_f64 / 14.0).sqrt();
        assert!((result.p_value - expected).abs() < 1e-7);
    }

    #[test]
    fn test_df_one_closed_form() {
        // df = 1 is Cauchy: p = 1 - (2/pi) * atan(|t|)
        let a = [0.3, 0.9];
        let b = [0.1, 0.2];
        let result = paired_ttest(&a, &b).unwrap();
        let expected = 1.0 - 2.0 / std::f64::consts::PI * result.t_statistic.abs().atan();
        assert!((result.p_value - expected).abs() < 1e-7);
    }

    #[test]
    fn test_significant_difference() {
        let a = [0.9, 0.92, 0.88, 0.91, 0.89, 0.93, 0.87, 0.90];
        let b = [0.7, 0.72, 0.68, 0.71, 0.69, 0.73, 0.67, 0.71];
        let result = paired_ttest(&a, &b).unwrap();

        assert!(result.is_significant(0.001));
        assert!(result.t_statistic > 0.0);
    }

    #[test]
    fn test_not_significant() {
        let a = [0.85, 0.87, 0.86, 0.84, 0.85];
        let b = [0.84, 0.86, 0.87, 0.85, 0.86];
        let result = paired_ttest(&a, &b).unwrap();

        assert!(!result.is_significant(0.05));
        assert!(result.t_statistic < 0.0);
    }

    #[test]
    fn test_identical_samples() {
        let a = [0.2, 0.4, 0.6];
        let result = paired_ttest(&a, &a).unwrap();
        assert_eq!(result.t_statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_constant_shift() {
        let a = [0.3, 0.5, 0.7];
        let b = [0.25, 0.45, 0.65];
        let result = paired_ttest(&a, &b).unwrap();
        // floating point may leave a tiny variance; either way p is ~0
        assert!(result.p_value < 1e-6);
        assert!(result.t_statistic > 0.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(paired_ttest(&[0.1, 0.2], &[0.1]).is_err());
        assert!(paired_ttest(&[0.1, f64::NAN], &[0.2, 0.3]).is_err());
        assert!(paired_ttest(&[f64::INFINITY], &[0.2]).is_err());
    }

    #[test]
    fn test_single_pair_gives_nan() {
        let result = paired_ttest(&[0.5], &[0.25]).unwrap();
        assert!(result.p_value.is_nan());
        assert!(result.t_statistic.is_nan());
        assert_eq!(result.df, 0);
        assert!(!result.is_significant(0.05));

        let empty = paired_ttest(&[], &[]).unwrap();
        assert!(empty.p_value.is_nan());
        assert_eq!(empty.df, 0);
    }

    #[test]
    fn test_incomplete_beta_bounds() {
        assert_eq!(regularized_incomplete_beta(2.0, 0.5, 0.0), 0.0);
        assert_eq!(regularized_incomplete_beta(2.0, 0.5, 1.0), 1.0);
        // I_x(1, 1) = x
        assert!((regularized_incomplete_beta(1.0, 1.0, 0.3) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_format() {
        let result = TTestResult {
            t_statistic: 3.4641,
            p_value: 0.0742,
            df: 2,
        };
        assert_eq!(result.format(), "t(2)=3.464, p=0.0742");
    }
}
