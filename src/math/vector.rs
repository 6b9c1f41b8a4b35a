use rand::Rng;
use std::ops::{Index, IndexMut};

use crate::error::{NnError, NnResult};

/// Allocates `elements` zeroed floats, reporting failure instead of aborting.
pub(crate) fn alloc_zeroed(elements: usize) -> NnResult<Vec<f32>> {
    let mut data = Vec::new();
    data.try_reserve_exact(elements)
        .map_err(|_| NnError::AllocationFailure { elements })?;
    data.resize(elements, 0.0);
    Ok(data)
}

/// Fixed-length dense vector of `f32`. The length is set at creation and
/// never changes; the backing storage is only reachable as a slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    pub fn zeros(len: usize) -> NnResult<Vector> {
        Ok(Vector { data: alloc_zeroed(len)? })
    }

    pub fn from_vec(data: Vec<f32>) -> Vector {
        Vector { data }
    }

    pub fn from_slice(data: &[f32]) -> NnResult<Vector> {
        let mut v = Vector::zeros(data.len())?;
        v.data.copy_from_slice(data);
        Ok(v)
    }

    /// Uniform samples in `[-1, 1)`.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> NnResult<Vector> {
        let mut v = Vector::zeros(len)?;
        for x in v.data.iter_mut() {
            *x = rng.gen_range(-1.0f32..1.0);
        }
        Ok(v)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Shape as reported in `ShapeMismatch` errors.
    pub fn shape(&self) -> (usize, usize) {
        (self.data.len(), 1)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn fill(&mut self, value: f32) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Overwrites every element from `src`, which must have the same length.
    pub fn copy_from(&mut self, src: &[f32]) -> NnResult<()> {
        if src.len() != self.data.len() {
            return Err(NnError::shape("copy_from", self.shape(), (src.len(), 1)));
        }
        self.data.copy_from_slice(src);
        Ok(())
    }
}

impl Index<usize> for Vector {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        &self.data[i]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.data[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn zeros_has_requested_length() {
        let v = Vector::zeros(5).unwrap();
        assert_eq!(v.len(), 5);
        assert!(v.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn random_stays_in_half_open_unit_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let v = Vector::random(1000, &mut rng).unwrap();
        assert!(v.as_slice().iter().all(|&x| (-1.0..1.0).contains(&x)));
    }

    #[test]
    fn copy_from_rejects_wrong_length() {
        let mut v = Vector::zeros(3).unwrap();
        let err = v.copy_from(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, NnError::ShapeMismatch { op: "copy_from", .. }));
    }

    #[test]
    fn absurd_length_reports_allocation_failure() {
        let err = Vector::zeros(usize::MAX / 2).unwrap_err();
        assert!(matches!(err, NnError::AllocationFailure { .. }));
    }
}
