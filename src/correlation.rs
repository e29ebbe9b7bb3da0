//! Correlation coefficients.

use itertools::Itertools;
use ordered_float::NotNan;

use crate::error::{Error, Result};

/// Pearson product-moment correlation coefficient.
///
/// Fails with `Error::InvalidArgument` when the sequences differ in
/// length, have fewer than two elements, contain NaN, or when either
/// sequence is constant (the coefficient is undefined).
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    check_samples(x, y)?;

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Err(Error::invalid_argument(
            "correlation is undefined for constant input",
        ));
    }

    Ok((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Spearman rank correlation coefficient.
///
/// This is the Pearson correlation of the ranks of `x` and `y`. Tied
/// values are assigned the average of the ranks that they span.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<f64> {
    check_samples(x, y)?;
    pearson(&ranks(x)?, &ranks(y)?)
}

/// Fractional (1-based) ranks of the values.
///
/// Tied values get the mean of the ranks they would occupy.
pub fn ranks(values: &[f64]) -> Result<Vec<f64>> {
    let mut sorted = values
        .iter()
        .enumerate()
        .map(|(idx, &v)| {
            NotNan::new(v)
                .map(|v| (v, idx))
                .map_err(|_| Error::invalid_argument("cannot rank NaN"))
        })
        .collect::<Result<Vec<_>>>()?;
    sorted.sort_unstable();

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    for (_, tied) in &sorted.iter().group_by(|(v, _)| *v) {
        let tied = tied.collect::<Vec<_>>();
        let end = start + tied.len();

        // Ranks start..end (0-based) share their mean, 1-based.
        let rank = (start + end + 1) as f64 / 2.0;
        for &&(_, idx) in &tied {
            ranks[idx] = rank;
        }

        start = end;
    }

    Ok(ranks)
}

fn check_samples(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::invalid_argument(format!(
            "sequences have different lengths: {} and {}",
            x.len(),
            y.len()
        )));
    }

    if x.len() < 2 {
        return Err(Error::invalid_argument(format!(
            "correlation requires at least 2 samples, got {}",
            x.len()
        )));
    }

    if x.iter().chain(y.iter()).any(|v| v.is_nan()) {
        return Err(Error::invalid_argument("samples contain NaN"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{pearson, ranks, spearman};

    #[test]
    fn pearson_of_linear_relation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [3.0, 5.0, 7.0, 9.0];
        assert_abs_diff_eq!(pearson(&x, &y).unwrap(), 1.0, epsilon = 1e-12);

        let y_neg = [-1.0, -2.0, -3.0, -4.0];
        assert_abs_diff_eq!(pearson(&x, &y_neg).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn pearson_known_value() {
        // Computed with scipy.stats.pearsonr.
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        assert_abs_diff_eq!(pearson(&x, &y).unwrap(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn spearman_of_monotone_nonlinear_relation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|v: &f64| v.exp()).collect();
        assert_abs_diff_eq!(spearman(&x, &y).unwrap(), 1.0, epsilon = 1e-12);
        assert!(pearson(&x, &y).unwrap() < 1.0);
    }

    #[test]
    fn ranks_average_ties() {
        assert_eq!(
            ranks(&[10.0, 20.0, 10.0, 30.0]).unwrap(),
            vec![1.5, 3.0, 1.5, 4.0]
        );
        assert_eq!(ranks(&[5.0, 5.0, 5.0]).unwrap(), vec![2.0, 2.0, 2.0]);
        assert!(ranks(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn spearman_with_ties() {
        // Computed with scipy.stats.spearmanr.
        let x = [1.0, 2.0, 2.0, 3.0];
        let y = [1.0, 3.0, 2.0, 4.0];
        assert_abs_diff_eq!(
            spearman(&x, &y).unwrap(),
            0.9486832980505138,
            epsilon = 1e-12
        );
    }

    #[test]
    fn two_samples_are_well_defined() {
        assert_abs_diff_eq!(
            pearson(&[0.1, 0.9], &[2.0, 8.0]).unwrap(),
            1.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            spearman(&[0.9, 0.1], &[2.0, 8.0]).unwrap(),
            -1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(pearson(&[1.0], &[1.0]).is_err());
        assert!(pearson(&[], &[]).is_err());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_err());
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_err());
        assert!(spearman(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).is_err());
        assert!(pearson(&[1.0, f64::NAN], &[1.0, 2.0]).is_err());
    }
}
