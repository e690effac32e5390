//! Moment estimates over the rows of a feature matrix.
//!
//! Rows are samples and columns are feature dimensions. Covariance uses the
//! sample convention (divides by `n - 1`).

use nalgebra::{DMatrix, DVector};

/// Per-column arithmetic mean. Zero rows yield a zero vector.
pub fn column_means(x: &DMatrix<f64>) -> DVector<f64> {
    let n = x.nrows();
    if n == 0 {
        return DVector::zeros(x.ncols());
    }
    DVector::from_iterator(x.ncols(), x.column_iter().map(|c| c.sum() / n as f64))
}

/// Sample covariance of the columns of `x` around `mean`.
///
/// Fewer than two rows carry no spread information; the result is then the
/// zero matrix rather than a division by zero.
pub fn sample_covariance(x: &DMatrix<f64>, mean: &DVector<f64>) -> DMatrix<f64> {
    let (n, d) = x.shape();
    if n < 2 {
        return DMatrix::zeros(d, d);
    }

    let centered = DMatrix::from_fn(n, d, |i, j| x[(i, j)] - mean[j]);
    let mut cov = centered.tr_mul(&centered) / (n as f64 - 1.0);

    // force exact symmetry so the Cholesky factor sees a single triangle
    for i in 0..d {
        for j in 0..i {
            let v = 0.5 * (cov[(i, j)] + cov[(j, i)]);
            cov[(i, j)] = v;
            cov[(j, i)] = v;
        }
    }
    cov
}

/// Adds `epsilon` to the diagonal.
pub fn regularize(mut cov: DMatrix<f64>, epsilon: f64) -> DMatrix<f64> {
    for i in 0..cov.nrows().min(cov.ncols()) {
        cov[(i, i)] += epsilon;
    }
    cov
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::SymmetricEigen;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn means_per_column() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 10.0, 2.0, 20.0, 3.0, 30.0]);
        let m = column_means(&x);
        assert!(approx_eq(m[0], 2.0, 1e-12));
        assert!(approx_eq(m[1], 20.0, 1e-12));
    }

    #[test]
    fn covariance_uses_n_minus_one() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
        let cov = sample_covariance(&x, &column_means(&x));
        assert!(approx_eq(cov[(0, 0)], 1.0, 1e-12));
        assert!(approx_eq(cov[(0, 1)], 2.0, 1e-12));
        assert!(approx_eq(cov[(1, 0)], 2.0, 1e-12));
        assert!(approx_eq(cov[(1, 1)], 4.0, 1e-12));
    }

    #[test]
    fn single_row_has_zero_covariance() {
        let x = DMatrix::from_row_slice(1, 3, &[1.0, 2.0, 3.0]);
        let cov = sample_covariance(&x, &column_means(&x));
        assert_eq!(cov, DMatrix::zeros(3, 3));
    }

    #[test]
    fn regularized_constant_column_has_min_eigenvalue_epsilon() {
        let eps = 1e-6;
        let x = DMatrix::from_row_slice(
            4,
            3,
            &[5.0, 1.0, 2.0, 5.0, 2.0, 4.0, 5.0, 3.0, 6.0, 5.0, 4.0, 8.0],
        );
        let raw = sample_covariance(&x, &column_means(&x));
        let reg = regularize(raw, eps);

        let eig = SymmetricEigen::new(reg);
        let min = eig.eigenvalues.iter().copied().fold(f64::INFINITY, f64::min);
        assert!(min >= eps - 1e-12, "min eigenvalue {min}");
    }
}
