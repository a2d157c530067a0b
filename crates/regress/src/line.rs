//! Straight-line fitting by the least-squares method.

use nalgebra::{Dim, Matrix, RealField, Scalar, Storage, U1};
use num_traits::NumCast;

/// A straight-line model `y = slope * x + intercept`, fitted to paired
/// samples by ordinary least squares.
///
/// A freshly constructed model is the zero line. Fitting against an input
/// whose x values have no variance (denominator of the slope is exactly
/// zero) or against an empty sample resets the model to that default
/// instead of dividing by zero.
#[derive(Clone, Copy, Debug)]
pub struct LineFit<T> {
    slope: T,
    intercept: T,
}

impl<T> LineFit<T>
where
    T: Scalar + RealField + NumCast + Copy,
{
    pub fn new() -> Self {
        LineFit {
            slope: T::zero(),
            intercept: T::zero(),
        }
    }

    pub fn slope(&self) -> T {
        self.slope
    }

    pub fn intercept(&self) -> T {
        self.intercept
    }

    /// Fits the model to the paired samples `(x[i], y[i])`, with
    ///
    /// ```math
    /// slope     = Σ(x_i - x̄)(y_i - ȳ) / Σ(x_i - x̄)²
    /// intercept = ȳ - slope * x̄
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `x` and `y` have different lengths.
    pub fn fit<D, SA, SB>(&mut self, x: &Matrix<T, D, U1, SA>, y: &Matrix<T, D, U1, SB>)
    where
        D: Dim,
        SA: Storage<T, D>,
        SB: Storage<T, D>,
    {
        assert_eq!(
            x.nrows(),
            y.nrows(),
            "x and y must hold the same number of samples"
        );

        let n = x.nrows();
        if n == 0 {
            self.slope = T::zero();
            self.intercept = T::zero();
            return;
        }

        let len = T::from(n).unwrap();
        let x_mean = x.sum() / len;
        let y_mean = y.sum() / len;

        let mut numerator = T::zero();
        let mut denominator = T::zero();
        for (&x_i, &y_i) in x.iter().zip(y.iter()) {
            let dx = x_i - x_mean;
            numerator += dx * (y_i - y_mean);
            denominator += dx * dx;
        }

        if denominator == T::zero() {
            self.slope = T::zero();
            self.intercept = T::zero();
            return;
        }

        self.slope = numerator / denominator;
        self.intercept = y_mean - self.slope * x_mean;
    }

    /// Evaluates the fitted line at `x`.
    pub fn predict(&self, x: T) -> T {
        self.slope * x + self.intercept
    }
}

impl<T> Default for LineFit<T>
where
    T: Scalar + RealField + NumCast + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
