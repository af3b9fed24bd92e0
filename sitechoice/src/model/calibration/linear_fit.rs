use serde::Serialize;

/// a simple least squares line `y = intercept + slope * x`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    /// fits `y` on `x`. returns None when the inputs are empty, of different
    /// lengths, hold a non-finite value, or when `x` has no variance.
    pub fn ordinary_least_squares(x: &[f64], y: &[f64]) -> Option<LinearFit> {
        if x.is_empty() || x.len() != y.len() {
            return None;
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return None;
        }
        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;
        let (sxy, sxx) = x
            .iter()
            .zip(y.iter())
            .fold((0.0, 0.0), |(sxy, sxx), (xi, yi)| {
                let dx = xi - mean_x;
                (sxy + dx * (yi - mean_y), sxx + dx * dx)
            });
        if sxx == 0.0 {
            return None;
        }
        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        Some(LinearFit { intercept, slope })
    }

    /// the `x` that this line maps to `y`
    pub fn invert(&self, y: f64) -> f64 {
        (y - self.intercept) / self.slope
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = x.map(|v| 0.5 + 2.0 * v);
        let fit = LinearFit::ordinary_least_squares(&x, &y).expect("fit exists");
        assert!((fit.intercept - 0.5).abs() < 1e-12);
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.invert(4.5) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(LinearFit::ordinary_least_squares(&[], &[]).is_none());
        assert!(LinearFit::ordinary_least_squares(&[1.0, 1.0], &[2.0, 3.0]).is_none());
        assert!(LinearFit::ordinary_least_squares(&[1.0, 2.0], &[2.0]).is_none());
        assert!(LinearFit::ordinary_least_squares(&[1.0, f64::NAN], &[2.0, 3.0]).is_none());
    }

    #[test]
    fn test_flat_response_has_zero_slope() {
        let fit = LinearFit::ordinary_least_squares(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0])
            .expect("fit exists");
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 5.0);
    }
}
