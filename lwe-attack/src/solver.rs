//! Solves systems of linear equations modulo a prime.
//!
//! There is no pivot search and no null space. The solver
//! eliminates with the diagonal entries as pivots and, if there are more
//! unknowns than equations, fixes the trailing unknowns to 1.

use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::rings::{PrimeField, Ring as _, RingElement as _};
use crate::vector::Vector;

/// Builds the augmented matrix `[A | b]`.
pub fn augment(a: &Matrix<PrimeField>, b: &Vector<PrimeField>) -> Matrix<PrimeField> {
    a.with_column(b)
}

/// Builds the augmented matrix `[A | I | b]`.
///
/// The identity block gives every equation its own extra unknown, so the
/// solution also tells how far each equation is from the column space of `A`.
pub fn augment_with_identity(
    a: &Matrix<PrimeField>,
    b: &Vector<PrimeField>,
) -> Matrix<PrimeField> {
    a.concat_cols(&Matrix::identity(a.num_rows())).with_column(b)
}

/// Solves the system given by the augmented matrix `ab` (the last column is
/// the right-hand side) and returns one solution.
///
/// The diagonal entries `ab[y][y]` for `y < min(n, m)` are used as pivots,
/// where `n` is the number of equations and `m` the number of unknowns. If a
/// pivot is zero mod p, [`Error::SingularPivot`] is returned. Equations past
/// the `m`-th are ignored.
///
/// If `n < m`, the last `m - n` unknowns are set to 1 and the rest is solved
/// for. This is a shortcut, not a parametrization of all solutions.
///
/// `ab` is not modified.
pub fn solve_mod_p(
    ab: &Matrix<PrimeField>,
    f: &PrimeField,
) -> Result<Vector<PrimeField>> {
    assert!(ab.num_cols() > 0, "The augmented matrix needs a right-hand side.");

    // Work on a copy. Callers may still need the original.
    let mut ab = ab.clone();
    let n = ab.num_rows();
    let m = ab.num_cols() - 1;
    let k = n.min(m);
    debug!(equations = n, unknowns = m, "solving mod p");

    // Forward elimination.
    for y in 0..k {
        let denom = f
            .inverse(&ab[(y, y)])
            .ok_or(Error::SingularPivot { row: y })?;

        for y2 in y + 1..k {
            if ab[(y2, y)].is_zero() {
                continue;
            }

            let factor = f.mul(ab[(y2, y)].clone(), &denom);
            let (target, pivot) = ab.get_rows_mut(y2, y);

            // Everything left of `y` is already zero in both rows.
            for x in y..=m {
                f.mul_sub_assign(&mut target[x], &factor, &pivot[x]);
            }
        }
    }

    // The free unknowns.
    let mut solved: Vec<_> = std::iter::repeat_n(PrimeField::one(), m.saturating_sub(n)).collect();

    // Back substitution. `solved[x]` is the value of unknown `m - 1 - x`.
    for y in (0..k).rev() {
        let mut b = ab[(y, m)].clone();
        for (x, s) in solved.iter().enumerate() {
            f.mul_sub_assign(&mut b, &ab[(y, m - 1 - x)], s);
        }

        let inv = f
            .inverse(&ab[(y, y)])
            .ok_or(Error::SingularPivot { row: y })?;
        solved.push(f.mul(b, &inv));
    }

    solved.reverse();
    Ok(Vector::from_raw_entries(solved))
}

/// Brings `a` into reduced row echelon form in place and returns the pivot
/// columns. Zero rows are removed, so afterwards the number of rows is the
/// rank.
///
/// Unlike [`solve_mod_p`] this searches for pivots, so it works for any
/// matrix. Every pivot is 1 and is the only non-zero entry in its column.
pub fn reduced_row_echelon(
    a: &mut Matrix<PrimeField>,
    f: &PrimeField,
) -> Result<Vec<usize>> {
    let mut pivots = Vec::new();
    let mut r = 0;
    for c in 0..a.num_cols() {
        if r == a.num_rows() {
            break;
        }

        let Some(pivot) = (r..a.num_rows()).find(|&i| !a[(i, c)].is_zero()) else {
            // Nothing to eliminate in this column.
            continue;
        };

        a.swap_rows(r, pivot);
        let inv = f.inverse(&a[(r, c)]).ok_or(Error::SingularPivot { row: r })?;
        a.row_multiply(r, &inv, f);

        for k in 0..a.num_rows() {
            if k == r || a[(k, c)].is_zero() {
                continue;
            }
            let m = f.neg(a[(k, c)].clone());
            a.row_multiply_add(k, r, &m, f);
        }

        pivots.push(c);
        r += 1;
    }

    a.remove_zero_rows();
    Ok(pivots)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn mersenne_61() -> PrimeField {
        PrimeField::new((BigUint::from(1u8) << 61u32) - 1u8)
    }

    fn random_matrix(
        rows: usize,
        cols: usize,
        f: &PrimeField,
        rng: &mut StdRng,
    ) -> Matrix<PrimeField> {
        Matrix::from_fn(rows, cols, |_, _| f.random(rng))
    }

    fn random_vector(dim: usize, f: &PrimeField, rng: &mut StdRng) -> Vector<PrimeField> {
        (0..dim).map(|_| f.random(rng)).collect()
    }

    #[test]
    fn small_square_system() {
        let f = PrimeField::new(97u32.into());
        let a = Matrix::from_i64_rows(&[[2, 1, 1], [1, 3, 2], [1, 0, 0]], &f);
        let s = Vector::from_i64s(&[1, 2, 3], &f);
        let b = a.mul_vec_post(&s, &f);
        assert_eq!(b, Vector::from_i64s(&[7, 13, 1], &f));

        let x = solve_mod_p(&augment(&a, &b), &f).unwrap();
        assert_eq!(x, s);
    }

    #[test]
    fn square_systems_are_solved_exactly() {
        let rng = &mut StdRng::seed_from_u64(0);
        let f = mersenne_61();

        for n in 1..8 {
            let a = random_matrix(n, n, &f, rng);
            let b = random_vector(n, &f, rng);
            let x = solve_mod_p(&augment(&a, &b), &f).unwrap();
            assert_eq!(x.dim(), n);
            assert_eq!(a.mul_vec_post(&x, &f), b);
        }
    }

    #[test]
    fn underdetermined_pads_with_ones() {
        let rng = &mut StdRng::seed_from_u64(1);
        let f = mersenne_61();

        for (n, m) in [(1, 2), (2, 3), (3, 7), (5, 15)] {
            let a = random_matrix(n, m, &f, rng);
            let b = random_vector(n, &f, rng);
            let x = solve_mod_p(&augment(&a, &b), &f).unwrap();
            assert_eq!(x.dim(), m);
            assert!(x.iter().skip(n).all(|e| e.is_one()));
            assert_eq!(a.mul_vec_post(&x, &f), b);
        }
    }

    #[test]
    fn identity_augmented_system() {
        let rng = &mut StdRng::seed_from_u64(2);
        let f = mersenne_61();
        let a = random_matrix(6, 2, &f, rng);
        let b = random_vector(6, &f, rng);

        let ab = augment_with_identity(&a, &b);
        assert_eq!(ab.num_cols(), 2 + 6 + 1);

        let x = solve_mod_p(&ab, &f).unwrap();
        assert_eq!(x.dim(), 8);
        assert!(x.iter().skip(6).all(|e| e.is_one()));

        // A * x[..2] + x[2..] = b
        let lhs = a.mul_vec_post(&x.slice(0..2), &f).add(&x.slice(2..8), &f);
        assert_eq!(lhs, b);
    }

    #[test]
    fn overdetermined_ignores_extra_rows() {
        let f = PrimeField::new(97u32.into());
        // The third equation contradicts the first two.
        let ab = Matrix::from_i64_rows(&[[1, 0, 4], [0, 1, 5], [1, 1, 0]], &f);
        let x = solve_mod_p(&ab, &f).unwrap();
        assert_eq!(x, Vector::from_i64s(&[4, 5], &f));
    }

    #[test]
    fn input_is_not_modified() {
        let rng = &mut StdRng::seed_from_u64(3);
        let f = mersenne_61();
        let ab = random_matrix(4, 5, &f, rng);
        let copy = ab.clone();
        solve_mod_p(&ab, &f).unwrap();
        assert_eq!(ab, copy);
    }

    #[test]
    fn zero_pivot_is_an_error() {
        let f = PrimeField::new(97u32.into());
        let ab = Matrix::from_i64_rows(&[[0, 1, 1], [1, 0, 1]], &f);
        assert!(matches!(
            solve_mod_p(&ab, &f),
            Err(Error::SingularPivot { row: 0 })
        ));

        // The second pivot becomes zero during elimination.
        let ab = Matrix::from_i64_rows(&[[1, 2, 1], [2, 4, 1]], &f);
        assert!(matches!(
            solve_mod_p(&ab, &f),
            Err(Error::SingularPivot { row: 1 })
        ));
    }

    #[test]
    fn echelon_form_of_dependent_rows() {
        let f = PrimeField::new(7u32.into());
        let mut a = Matrix::from_i64_rows(&[[0, 2, 4, 6], [0, 1, 2, 3], [1, 1, 1, 1]], &f);
        let pivots = reduced_row_echelon(&mut a, &f).unwrap();
        assert_eq!(pivots, [0, 1]);
        assert_eq!(a, Matrix::from_i64_rows(&[[1, 0, -1, -2], [0, 1, 2, 3]], &f));
    }

    #[test]
    fn echelon_form_keeps_the_row_space() {
        let rng = &mut StdRng::seed_from_u64(5);
        let f = mersenne_61();
        let a = random_matrix(3, 6, &f, rng);
        let mut e = a.clone();
        let pivots = reduced_row_echelon(&mut e, &f).unwrap();
        assert_eq!(pivots, [0, 1, 2]);

        // Every original row is the combination of the echelon rows given by
        // its entries in the pivot columns.
        for row in a.rows() {
            let mut comb = Vector::zero(6);
            for (i, &c) in pivots.iter().enumerate() {
                comb.mul_add_assign(&row[c], e.row(i), &f);
            }
            assert_eq!(&comb, row);
        }
    }

    #[test]
    fn solving_is_deterministic() {
        let rng = &mut StdRng::seed_from_u64(4);
        let f = mersenne_61();
        let ab = random_matrix(5, 9, &f, rng);
        assert_eq!(solve_mod_p(&ab, &f).unwrap(), solve_mod_p(&ab, &f).unwrap());
    }
}
