use rand::Rng;
use std::ops::{Index, IndexMut};

use crate::error::{NnError, NnResult};
use crate::math::vector::alloc_zeroed;

/// Row-major dense matrix of `f32`; element `(r, c)` lives at `c + r * cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> NnResult<Matrix> {
        let elements = rows
            .checked_mul(cols)
            .ok_or(NnError::AllocationFailure { elements: usize::MAX })?;
        Ok(Matrix { rows, cols, data: alloc_zeroed(elements)? })
    }

    /// Uniform samples in `[-1, 1)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> NnResult<Matrix> {
        let mut res = Matrix::zeros(rows, cols)?;
        for x in res.data.iter_mut() {
            *x = rng.gen_range(-1.0f32..1.0);
        }
        Ok(res)
    }

    pub fn identity(n: usize) -> NnResult<Matrix> {
        let mut res = Matrix::zeros(n, n)?;
        for i in 0..n {
            res[(i, i)] = 1.0;
        }
        Ok(res)
    }

    /// Wraps a flat row-major buffer of exactly `rows * cols` values.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> NnResult<Matrix> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(NnError::shape("from_vec", (rows, cols), (data.len(), 1)));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix from nested rows, all of which must share a length.
    pub fn from_rows(rows: &[Vec<f32>]) -> NnResult<Matrix> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut res = Matrix::zeros(rows.len(), cols)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(NnError::shape("from_rows", (1, cols), (1, row.len())));
            }
            res.row_mut(i).copy_from_slice(row);
        }
        Ok(res)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn row(&self, r: usize) -> &[f32] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [f32] {
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn fill(&mut self, value: f32) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Allocating transpose; the result has swapped dimensions.
    pub fn transpose(&self) -> NnResult<Matrix> {
        let mut res = Matrix::zeros(self.cols, self.rows)?;
        crate::math::ops::transpose(&mut res, self)?;
        Ok(res)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    fn index(&self, (r, c): (usize, usize)) -> &f32 {
        &self.data[c + r * self.cols]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f32 {
        &mut self.data[c + r * self.cols]
    }
}
