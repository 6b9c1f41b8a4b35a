//! Linear-algebra kernels over [`Vector`] and [`Matrix`].
//!
//! Every kernel writes into a caller-supplied `out` buffer and fails with
//! `ShapeMismatch` before touching it if the operands disagree. Kernels named
//! `*_in_place` use `out` as their left operand; the `*_accumulate` variants
//! add into `out` instead of overwriting it.

use crate::error::{NnError, NnResult};
use crate::math::{matrix::Matrix, vector::Vector};

fn same_len(op: &'static str, out: &Vector, v: &Vector) -> NnResult<()> {
    if out.len() != v.len() {
        return Err(NnError::shape(op, out.shape(), v.shape()));
    }
    Ok(())
}

fn same_shape(op: &'static str, out: &Matrix, m: &Matrix) -> NnResult<()> {
    if out.shape() != m.shape() {
        return Err(NnError::shape(op, out.shape(), m.shape()));
    }
    Ok(())
}

fn mat_vec_shapes(op: &'static str, out: &Vector, mat: &Matrix, vec: &Vector) -> NnResult<()> {
    if vec.len() != mat.cols() {
        return Err(NnError::shape(op, (mat.cols(), 1), vec.shape()));
    }
    if out.len() != mat.rows() {
        return Err(NnError::shape(op, (mat.rows(), 1), out.shape()));
    }
    Ok(())
}

fn zip_into(out: &mut Vector, a: &Vector, b: &Vector, f: impl Fn(f32, f32) -> f32) {
    for ((o, &x), &y) in out.as_mut_slice().iter_mut().zip(a.as_slice()).zip(b.as_slice()) {
        *o = f(x, y);
    }
}

fn zip_in_place(out: &mut [f32], other: &[f32], f: impl Fn(f32, f32) -> f32) {
    for (o, &y) in out.iter_mut().zip(other) {
        *o = f(*o, y);
    }
}

// ---------------------------------------------------------------------------
// Matrix-vector product
// ---------------------------------------------------------------------------

/// `out = mat · vec`. Overwrites `out`.
pub fn multiply(out: &mut Vector, mat: &Matrix, vec: &Vector) -> NnResult<()> {
    mat_vec_shapes("multiply", out, mat, vec)?;
    out.fill(0.0);
    accumulate_product(out, mat, vec);
    Ok(())
}

/// `out += mat · vec`.
pub fn multiply_accumulate(out: &mut Vector, mat: &Matrix, vec: &Vector) -> NnResult<()> {
    mat_vec_shapes("multiply_accumulate", out, mat, vec)?;
    accumulate_product(out, mat, vec);
    Ok(())
}

fn accumulate_product(out: &mut Vector, mat: &Matrix, vec: &Vector) {
    let v = vec.as_slice();
    for (i, o) in out.as_mut_slice().iter_mut().enumerate() {
        *o += mat.row(i).iter().zip(v).map(|(m, x)| m * x).sum::<f32>();
    }
}

// ---------------------------------------------------------------------------
// Element-wise vector kernels
// ---------------------------------------------------------------------------

pub fn add(out: &mut Vector, v1: &Vector, v2: &Vector) -> NnResult<()> {
    same_len("add", out, v1)?;
    same_len("add", out, v2)?;
    zip_into(out, v1, v2, |a, b| a + b);
    Ok(())
}

pub fn subtract(out: &mut Vector, v1: &Vector, v2: &Vector) -> NnResult<()> {
    same_len("subtract", out, v1)?;
    same_len("subtract", out, v2)?;
    zip_into(out, v1, v2, |a, b| a - b);
    Ok(())
}

/// Element-wise (Hadamard) product.
pub fn hadamard(out: &mut Vector, v1: &Vector, v2: &Vector) -> NnResult<()> {
    same_len("hadamard", out, v1)?;
    same_len("hadamard", out, v2)?;
    zip_into(out, v1, v2, |a, b| a * b);
    Ok(())
}

pub fn scalar_multiply(out: &mut Vector, v: &Vector, s: f32) -> NnResult<()> {
    same_len("scalar_multiply", out, v)?;
    for (o, &x) in out.as_mut_slice().iter_mut().zip(v.as_slice()) {
        *o = x * s;
    }
    Ok(())
}

pub fn add_in_place(out: &mut Vector, v: &Vector) -> NnResult<()> {
    same_len("add_in_place", out, v)?;
    zip_in_place(out.as_mut_slice(), v.as_slice(), |a, b| a + b);
    Ok(())
}

pub fn subtract_in_place(out: &mut Vector, v: &Vector) -> NnResult<()> {
    same_len("subtract_in_place", out, v)?;
    zip_in_place(out.as_mut_slice(), v.as_slice(), |a, b| a - b);
    Ok(())
}

pub fn hadamard_in_place(out: &mut Vector, v: &Vector) -> NnResult<()> {
    same_len("hadamard_in_place", out, v)?;
    zip_in_place(out.as_mut_slice(), v.as_slice(), |a, b| a * b);
    Ok(())
}

pub fn scale_in_place(out: &mut Vector, s: f32) {
    out.as_mut_slice().iter_mut().for_each(|x| *x *= s);
}

// ---------------------------------------------------------------------------
// Matrix kernels
// ---------------------------------------------------------------------------

/// `out = matᵀ`; `out` must already have the swapped dimensions.
pub fn transpose(out: &mut Matrix, mat: &Matrix) -> NnResult<()> {
    if out.shape() != (mat.cols(), mat.rows()) {
        return Err(NnError::shape("transpose", (mat.cols(), mat.rows()), out.shape()));
    }
    for i in 0..out.rows() {
        for j in 0..out.cols() {
            out[(i, j)] = mat[(j, i)];
        }
    }
    Ok(())
}

fn outer_shapes(op: &'static str, out: &Matrix, v1: &Vector, v2: &Vector) -> NnResult<()> {
    if out.shape() != (v1.len(), v2.len()) {
        return Err(NnError::shape(op, (v1.len(), v2.len()), out.shape()));
    }
    Ok(())
}

/// `out[i, j] = v1[i] * v2[j]`.
pub fn outer_product(out: &mut Matrix, v1: &Vector, v2: &Vector) -> NnResult<()> {
    outer_shapes("outer_product", out, v1, v2)?;
    for (i, &a) in v1.as_slice().iter().enumerate() {
        for (o, &b) in out.row_mut(i).iter_mut().zip(v2.as_slice()) {
            *o = a * b;
        }
    }
    Ok(())
}

/// `out[i, j] += v1[i] * v2[j]`.
pub fn outer_product_accumulate(out: &mut Matrix, v1: &Vector, v2: &Vector) -> NnResult<()> {
    outer_shapes("outer_product_accumulate", out, v1, v2)?;
    for (i, &a) in v1.as_slice().iter().enumerate() {
        for (o, &b) in out.row_mut(i).iter_mut().zip(v2.as_slice()) {
            *o += a * b;
        }
    }
    Ok(())
}

pub fn add_matrix(out: &mut Matrix, m1: &Matrix, m2: &Matrix) -> NnResult<()> {
    same_shape("add_matrix", out, m1)?;
    same_shape("add_matrix", out, m2)?;
    for ((o, &a), &b) in out.as_mut_slice().iter_mut().zip(m1.as_slice()).zip(m2.as_slice()) {
        *o = a + b;
    }
    Ok(())
}

pub fn subtract_matrix(out: &mut Matrix, m1: &Matrix, m2: &Matrix) -> NnResult<()> {
    same_shape("subtract_matrix", out, m1)?;
    same_shape("subtract_matrix", out, m2)?;
    for ((o, &a), &b) in out.as_mut_slice().iter_mut().zip(m1.as_slice()).zip(m2.as_slice()) {
        *o = a - b;
    }
    Ok(())
}

pub fn scalar_multiply_matrix(out: &mut Matrix, m: &Matrix, s: f32) -> NnResult<()> {
    same_shape("scalar_multiply_matrix", out, m)?;
    for (o, &x) in out.as_mut_slice().iter_mut().zip(m.as_slice()) {
        *o = x * s;
    }
    Ok(())
}

pub fn add_matrix_in_place(out: &mut Matrix, m: &Matrix) -> NnResult<()> {
    same_shape("add_matrix_in_place", out, m)?;
    zip_in_place(out.as_mut_slice(), m.as_slice(), |a, b| a + b);
    Ok(())
}

pub fn subtract_matrix_in_place(out: &mut Matrix, m: &Matrix) -> NnResult<()> {
    same_shape("subtract_matrix_in_place", out, m)?;
    zip_in_place(out.as_mut_slice(), m.as_slice(), |a, b| a - b);
    Ok(())
}

pub fn scale_matrix_in_place(out: &mut Matrix, s: f32) {
    out.as_mut_slice().iter_mut().for_each(|x| *x *= s);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vector(values: &[f32]) -> Vector {
        Vector::from_vec(values.to_vec())
    }

    #[test]
    fn multiply_overwrites_output() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        let mut out = vector(&[100.0, 100.0, 100.0]);
        multiply(&mut out, &m, &vector(&[1.0, -1.0])).unwrap();
        assert_eq!(out.as_slice(), &[-1.0, -1.0, -1.0]);
    }

    #[test]
    fn multiply_accumulate_adds_into_output() {
        let m = Matrix::identity(2).unwrap();
        let mut out = vector(&[1.0, 1.0]);
        multiply_accumulate(&mut out, &m, &vector(&[2.0, 3.0])).unwrap();
        assert_eq!(out.as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn multiply_rejects_wrong_input_length() {
        let m = Matrix::zeros(3, 2).unwrap();
        let mut out = Vector::zeros(3).unwrap();
        let err = multiply(&mut out, &m, &vector(&[1.0, 2.0, 3.0])).unwrap_err();
        assert!(matches!(
            err,
            NnError::ShapeMismatch { op: "multiply", expected: (2, 1), found: (3, 1) }
        ));
    }

    #[test]
    fn multiply_rejects_wrong_output_length() {
        let m = Matrix::zeros(3, 2).unwrap();
        let mut out = Vector::zeros(2).unwrap();
        assert!(multiply(&mut out, &m, &vector(&[1.0, 2.0])).is_err());
    }

    #[test]
    fn elementwise_kernels() {
        let a = vector(&[1.0, 2.0, 3.0]);
        let b = vector(&[4.0, 5.0, 6.0]);
        let mut out = Vector::zeros(3).unwrap();

        add(&mut out, &a, &b).unwrap();
        assert_eq!(out.as_slice(), &[5.0, 7.0, 9.0]);
        subtract(&mut out, &a, &b).unwrap();
        assert_eq!(out.as_slice(), &[-3.0, -3.0, -3.0]);
        hadamard(&mut out, &a, &b).unwrap();
        assert_eq!(out.as_slice(), &[4.0, 10.0, 18.0]);
        scalar_multiply(&mut out, &a, 0.5).unwrap();
        assert_eq!(out.as_slice(), &[0.5, 1.0, 1.5]);
    }

    #[test]
    fn in_place_kernels_alias_the_output() {
        let mut acc = vector(&[1.0, 2.0]);
        add_in_place(&mut acc, &vector(&[1.0, 1.0])).unwrap();
        hadamard_in_place(&mut acc, &vector(&[2.0, 3.0])).unwrap();
        subtract_in_place(&mut acc, &vector(&[1.0, 1.0])).unwrap();
        scale_in_place(&mut acc, 2.0);
        assert_eq!(acc.as_slice(), &[6.0, 16.0]);
    }

    #[test]
    fn elementwise_length_mismatch_is_an_error() {
        let mut out = Vector::zeros(2).unwrap();
        assert!(add(&mut out, &vector(&[1.0, 2.0]), &vector(&[1.0])).is_err());
        assert!(hadamard_in_place(&mut out, &vector(&[1.0, 2.0, 3.0])).is_err());
    }

    #[test]
    fn outer_product_builds_rank_one_matrix() {
        let mut out = Matrix::zeros(2, 3).unwrap();
        outer_product(&mut out, &vector(&[1.0, 2.0]), &vector(&[3.0, 4.0, 5.0])).unwrap();
        assert_eq!(out.as_slice(), &[3.0, 4.0, 5.0, 6.0, 8.0, 10.0]);

        outer_product_accumulate(&mut out, &vector(&[1.0, 0.0]), &vector(&[1.0, 1.0, 1.0])).unwrap();
        assert_eq!(out.row(0), &[4.0, 5.0, 6.0]);
        assert_eq!(out.row(1), &[6.0, 8.0, 10.0]);
    }

    #[test]
    fn outer_product_checks_output_shape() {
        let mut out = Matrix::zeros(3, 2).unwrap();
        assert!(outer_product(&mut out, &vector(&[1.0, 2.0]), &vector(&[3.0, 4.0, 5.0])).is_err());
    }

    #[test]
    fn transpose_requires_swapped_output() {
        let m = Matrix::zeros(2, 3).unwrap();
        let mut out = Matrix::zeros(2, 3).unwrap();
        assert!(transpose(&mut out, &m).is_err());
    }

    #[test]
    fn matrix_kernels() {
        let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![4.0, 3.0, 2.0, 1.0]).unwrap();
        let mut out = Matrix::zeros(2, 2).unwrap();

        add_matrix(&mut out, &a, &b).unwrap();
        assert_eq!(out.as_slice(), &[5.0; 4]);
        subtract_matrix(&mut out, &a, &b).unwrap();
        assert_eq!(out.as_slice(), &[-3.0, -1.0, 1.0, 3.0]);
        scalar_multiply_matrix(&mut out, &a, 2.0).unwrap();
        assert_eq!(out.as_slice(), &[2.0, 4.0, 6.0, 8.0]);

        add_matrix_in_place(&mut out, &a).unwrap();
        subtract_matrix_in_place(&mut out, &b).unwrap();
        scale_matrix_in_place(&mut out, 0.5);
        assert_eq!(out.as_slice(), &[-0.5, 1.5, 3.5, 5.5]);

        let wrong = Matrix::zeros(1, 4).unwrap();
        assert!(add_matrix_in_place(&mut out, &wrong).is_err());
    }

    fn matrix_strategy() -> impl Strategy<Value = Matrix> {
        (1usize..8, 1usize..8).prop_flat_map(|(r, c)| {
            prop::collection::vec(-100.0f32..100.0, r * c)
                .prop_map(move |data| Matrix::from_vec(r, c, data).unwrap())
        })
    }

    proptest! {
        #[test]
        fn double_transpose_is_identity(m in matrix_strategy()) {
            let back = m.transpose().unwrap().transpose().unwrap();
            prop_assert_eq!(back, m);
        }

        #[test]
        fn identity_product_returns_input(values in prop::collection::vec(-100.0f32..100.0, 1..16)) {
            let v = Vector::from_vec(values);
            let id = Matrix::identity(v.len()).unwrap();
            let mut out = Vector::zeros(v.len()).unwrap();
            multiply(&mut out, &id, &v).unwrap();
            prop_assert_eq!(out, v);
        }

        #[test]
        fn product_length_matches_rows(m in matrix_strategy()) {
            let v = Vector::zeros(m.cols()).unwrap();
            let mut out = Vector::zeros(m.rows()).unwrap();
            multiply(&mut out, &m, &v).unwrap();
            prop_assert_eq!(out.len(), m.rows());
        }
    }
}
