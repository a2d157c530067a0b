//! Dense linear-system solver using Gaussian elimination with partial (row)
//! pivoting.
//!
use nalgebra::{
    allocator::Allocator, Const, DefaultAllocator, Dim, Matrix, OVector, RealField, Scalar,
    Storage, StorageMut, U1,
};

use crate::Error;

/// Solves the n-dimensional system `A x = b` by Gaussian elimination with
/// partial pivoting, returning the freshly allocated solution vector.
///
/// Both `mat_a` and `b` are transformed in place: elimination permutes and
/// combines their rows, and back substitution consumes the transformed
/// right-hand side. On return `mat_a` holds an upper-triangular remnant and
/// `b` is no longer algebraically meaningful. This avoids an O(n²) copy of
/// the system; callers that still need the original `A` or `b` must clone
/// before calling.
///
/// At each elimination step the pivot row is the one with the largest
/// absolute value in the current column (ties go to the lowest row index),
/// which bounds the magnitude of the elimination factors and with it the
/// growth of rounding error. A pivot that is exactly zero means the matrix
/// is singular; the solve aborts with [`Error::SingularMatrix`] rather than
/// dividing through and letting NaN or infinity propagate into the result.
/// Pivots that are merely small are accepted, so an ill-conditioned system
/// yields a finite solution with correspondingly amplified error.
///
/// Returns [`Error::DimensionMismatch`] without touching either argument if
/// `mat_a` is not square or `b` does not have one entry per row of `mat_a`.
pub fn solve<T, D, SA, SB>(
    mat_a: &mut Matrix<T, D, D, SA>,
    b: &mut Matrix<T, D, U1, SB>,
) -> Result<OVector<T, D>, Error>
where
    T: Scalar + RealField + Copy,
    D: Dim,
    SA: StorageMut<T, D, D>,
    SB: StorageMut<T, D>,
    DefaultAllocator: Allocator<T, D>,
{
    let n = mat_a.nrows();
    if mat_a.ncols() != n || b.nrows() != n {
        return Err(Error::DimensionMismatch {
            nrows: n,
            ncols: mat_a.ncols(),
            rhs: b.nrows(),
        });
    }

    tracing::trace!("gauss::solve (n={})", n);

    eliminate(mat_a, b)?;
    Ok(back_substitute(mat_a, b))
}

/// Reduces the square matrix A to upper-triangular form, applying every row
/// permutation and row combination to the right-hand side b as well.
///
/// At elimination step k, k=0, 1, ..., n-1:
///
/// 1. The pivot row l is the row in k..n with the largest absolute value in
///     column k; rows k and l are swapped whole in both A and b, so each row
///     keeps its right-hand-side entry.
///
/// 2. Every row i below the pivot is combined with the pivot row using
///     `factor = -a(i,k)/a(k,k)`. The eliminated entry a(i,k) is written as
///     an explicit zero instead of relying on floating-point cancellation,
///     which can leave residue below the diagonal and corrupt back
///     substitution.
///
/// Fails with [`Error::SingularMatrix`] if the selected pivot is exactly
/// zero, reporting the column index numbered from one.
fn eliminate<T, D, SA, SB>(
    mat_a: &mut Matrix<T, D, D, SA>,
    b: &mut Matrix<T, D, U1, SB>,
) -> Result<(), Error>
where
    T: Scalar + RealField + Copy,
    D: Dim,
    SA: StorageMut<T, D, D>,
    SB: StorageMut<T, D>,
{
    let n = mat_a.nrows();

    for k in 0..n {
        let col_k = mat_a.column(k);

        // find l = pivot row number
        let mut l = k;
        for i in (k + 1)..n {
            if col_k[i].abs() > col_k[l].abs() {
                l = i;
            }
        }

        // check for zero pivot element
        if col_k[l] == T::zero() {
            return Err(Error::SingularMatrix { col: k + 1 });
        }

        // swap rows k and l in both A and b if necessary
        if l != k {
            mat_a.swap_rows(k, l);
            b.swap_rows(k, l);
        }

        let pivot = mat_a[(k, k)];
        let b_k = b[k];

        // row_i = row_i - [a(i,k)/a(k,k)] row_k, i=k+1, ..., n-1
        for i in (k + 1)..n {
            let factor = -mat_a[(i, k)] / pivot;
            mat_a[(i, k)] = T::zero();
            for j in (k + 1)..n {
                let a_kj = mat_a[(k, j)];
                mat_a[(i, j)] += factor * a_kj;
            }
            b[i] += factor * b_k;
        }
    }

    Ok(())
}

/// Solves the upper-triangular system left behind by [`eliminate`], from the
/// last equation up to the first, and returns the solution as a new vector.
/// The remaining entries of b are updated in place as each unknown becomes
/// known, so every equation has a single unknown left by the time its turn
/// comes.
fn back_substitute<T, D, SA, SB>(
    mat_a: &Matrix<T, D, D, SA>,
    b: &mut Matrix<T, D, U1, SB>,
) -> OVector<T, D>
where
    T: Scalar + RealField + Copy,
    D: Dim,
    SA: Storage<T, D, D>,
    SB: StorageMut<T, D>,
    DefaultAllocator: Allocator<T, D>,
{
    let n = mat_a.nrows();
    let (dim, _) = b.shape_generic();
    let mut x = OVector::<T, D>::zeros_generic(dim, Const::<1>);

    for k in (0..n).rev() {
        x[k] = b[k] / mat_a[(k, k)];
        let x_k = x[k];
        for i in 0..k {
            b[i] -= mat_a[(i, k)] * x_k;
        }
    }

    x
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{matrix, vector, ComplexField, DMatrix, DVector};

    use super::*;

    #[test]
    fn test_pivot_selection() {
        // a(0,0) is zero, so elimination without pivoting would divide by it
        // immediately. Row 1 must be selected as the pivot for column 0.
        let mut mat_a = matrix![
            0.0, 1.0;
            1.0, 1.0;
        ];
        let mut b = vector![1.0, 3.0];

        let x = solve(&mut mat_a, &mut b).unwrap();
        assert_relative_eq!(x, vector![2.0, 1.0], max_relative = 1e-12);
    }

    #[test]
    fn test_solve_3x3() {
        let a0 = matrix![
            3.0, 2.0, -4.0;
            2.0, 3.0, 3.0;
            5.0, -3.0, 1.0;
        ];
        let b0 = vector![3.0, 15.0, 14.0];

        let mut mat_a = a0;
        let mut b = b0;
        let x = solve(&mut mat_a, &mut b).unwrap();

        // verify against the pristine system, since the solve consumed the
        // working copies
        assert_relative_eq!(a0 * x, b0, max_relative = 1e-12);
        assert_relative_eq!(x, vector![3.0, 1.0, 2.0], max_relative = 1e-12);
    }

    #[test]
    fn test_solve_4x4() {
        let a0 = matrix![
            2.0, 1.0, 0.0, 0.0;
            1.0, 3.0, 1.0, 0.0;
            0.0, 1.0, 4.0, 1.0;
            0.0, 0.0, 1.0, 5.0;
        ];
        let b0 = vector![4.0, 10.0, 18.0, 23.0];

        let mut mat_a = a0;
        let mut b = b0;
        let x = solve(&mut mat_a, &mut b).unwrap();

        assert_relative_eq!(a0 * x, b0, max_relative = 1e-12);
        assert_relative_eq!(x, vector![1.0, 2.0, 3.0, 4.0], max_relative = 1e-12);
    }

    #[test]
    fn test_solve_dynamic() {
        let a0 = DMatrix::from_row_slice(3, 3, &[4.0, -2.0, 1.0, 3.0, 6.0, -4.0, 2.0, 1.0, 8.0]);
        let b0 = DVector::from_row_slice(&[5.0, 12.0, 7.0]);

        let mut mat_a = a0.clone();
        let mut b = b0.clone();
        let x = solve(&mut mat_a, &mut b).unwrap();

        assert_relative_eq!(&a0 * &x, b0, max_relative = 1e-12);
    }

    #[test]
    fn test_solve_1x1() {
        let mut mat_a = matrix![4.0];
        let mut b = vector![8.0];

        let x = solve(&mut mat_a, &mut b).unwrap();
        assert_relative_eq!(x, vector![2.0], max_relative = 1e-12);
    }

    #[test]
    fn test_singular() {
        let mut mat_a = matrix![
            1.0, 1.0;
            1.0, 1.0;
        ];
        let mut b = vector![2.0, 2.0];

        // the second pivot is an exact zero; the solve must fail instead of
        // returning a NaN-laden vector
        let err = solve(&mut mat_a, &mut b).unwrap_err();
        assert!(matches!(err, Error::SingularMatrix { col: 2 }));
    }

    #[test]
    fn test_tiny_pivot_accepted() {
        // every candidate pivot in column 0 is tiny but nonzero: the system
        // is ill-conditioned, not singular, and must still produce a finite
        // solution
        let mut mat_a = matrix![
            1.0e-13, 1.0;
            1.0e-15, 1.0;
        ];
        let mut b = vector![1.0, 2.0];

        let x = solve(&mut mat_a, &mut b).unwrap();
        assert!(x.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_rhs_length_mismatch() {
        let a0 = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0]);
        let mut mat_a = a0.clone();
        let mut b = DVector::from_row_slice(&[1.0, 2.0]);

        let err = solve(&mut mat_a, &mut b).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                nrows: 3,
                ncols: 3,
                rhs: 2
            }
        ));
        // rejected at the boundary, before any arithmetic touched the matrix
        assert_eq!(mat_a, a0);
    }

    #[test]
    fn test_non_square() {
        let mut mat_a = DMatrix::<f64>::zeros(2, 3);
        let mut b = DVector::from_row_slice(&[1.0, 2.0]);

        let err = solve(&mut mat_a, &mut b).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                nrows: 2,
                ncols: 3,
                rhs: 2
            }
        ));
    }

    #[test]
    fn test_deterministic_resolve() {
        // column 0 holds a pivot tie; the lowest row index wins, so two
        // solves from fresh copies agree bitwise
        let a0 = matrix![
            1.0, 2.0;
            1.0, 3.0;
        ];
        let b0 = vector![4.0, 5.0];

        let x1 = solve(&mut a0.clone(), &mut b0.clone()).unwrap();
        let x2 = solve(&mut a0.clone(), &mut b0.clone()).unwrap();
        assert_eq!(x1, x2);
    }
}
