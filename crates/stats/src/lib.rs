//! Summary statistics for simulated and forward-modelled series.
//!
//! Missing values travel through the toolkit as NaN, so the `nan_*`
//! helpers skip them the way a masked reduction would.

/// Arithmetic mean of a slice. Returns NaN if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Mean over the non-NaN entries. Returns NaN if no entry is defined.
pub fn nan_mean(data: &[f64]) -> f64 {
    nan_mean_iter(data.iter().copied())
}

/// Mean over the non-NaN items of an iterator. Returns NaN if none is defined.
pub fn nan_mean_iter(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Number of non-NaN entries.
pub fn count_defined(data: &[f64]) -> usize {
    data.iter().filter(|v| !v.is_nan()).count()
}

/// Sample variance with N-1 denominator over the non-NaN entries.
/// Returns NaN if fewer than 2 entries are defined.
pub fn nan_variance(data: &[f64]) -> f64 {
    let defined: Vec<f64> = data.iter().copied().filter(|v| !v.is_nan()).collect();
    let n = defined.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(&defined);
    defined.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / (n - 1) as f64
}

/// Sample standard deviation with N-1 denominator over the non-NaN entries.
pub fn nan_sd(data: &[f64]) -> f64 {
    nan_variance(data).sqrt()
}

/// Lag-1 autocorrelation of a series without gaps.
///
/// Returns `None` for fewer than 3 values, any NaN, or constant input.
pub fn lag1_autocorrelation(data: &[f64]) -> Option<f64> {
    if data.len() < 3 || data.iter().any(|v| v.is_nan()) {
        return None;
    }
    let m = mean(data);
    let denom: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    if denom == 0.0 {
        return None;
    }
    let num: f64 = data.windows(2).map(|w| (w[0] - m) * (w[1] - m)).sum();
    Some(num / denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&xs), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_nan_mean_skips_gaps() {
        assert_relative_eq!(nan_mean(&[1.0, f64::NAN, 3.0]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_mean_all_gaps() {
        assert!(nan_mean(&[f64::NAN, f64::NAN]).is_nan());
        assert!(nan_mean(&[]).is_nan());
    }

    #[test]
    fn test_nan_mean_iter() {
        let v = nan_mean_iter([10.0, f64::NAN, 20.0, 30.0]);
        assert_relative_eq!(v, 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_count_defined() {
        assert_eq!(count_defined(&[1.0, f64::NAN, 0.0]), 2);
    }

    #[test]
    fn test_nan_variance() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, f64::NAN];
        assert_relative_eq!(nan_variance(&data), 4.666667, epsilon = 1e-6);
        assert_relative_eq!(nan_sd(&data), 4.666667_f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_nan_variance_short() {
        assert!(nan_variance(&[1.0, f64::NAN]).is_nan());
    }

    #[test]
    fn test_lag1_alternating() {
        let r = lag1_autocorrelation(&[1.0, -1.0, 1.0, -1.0, 1.0, -1.0]).unwrap();
        assert!(r < -0.8, "r = {r}");
    }

    #[test]
    fn test_lag1_rejects_constant_and_gaps() {
        assert!(lag1_autocorrelation(&[2.0, 2.0, 2.0]).is_none());
        assert!(lag1_autocorrelation(&[1.0, f64::NAN, 2.0, 3.0]).is_none());
        assert!(lag1_autocorrelation(&[1.0, 2.0]).is_none());
    }
}
