use crate::error::{NnError, NnResult};
use crate::math::matrix::Matrix;

/// Parallel feature and one-hot label matrices, one example per row.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Matrix,
    labels: Matrix,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Matrix) -> NnResult<Dataset> {
        if features.rows() != labels.rows() {
            return Err(NnError::InvalidDataset(format!(
                "{} feature rows but {} label rows",
                features.rows(),
                labels.rows()
            )));
        }
        Ok(Dataset { features, labels })
    }

    /// Builds a dataset from per-example rows.
    pub fn from_rows(features: &[Vec<f32>], labels: &[Vec<f32>]) -> NnResult<Dataset> {
        Dataset::new(Matrix::from_rows(features)?, Matrix::from_rows(labels)?)
    }

    pub fn len(&self) -> usize {
        self.features.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn feature_dim(&self) -> usize {
        self.features.cols()
    }

    pub fn num_classes(&self) -> usize {
        self.labels.cols()
    }

    pub fn features(&self, j: usize) -> &[f32] {
        self.features.row(j)
    }

    pub fn label(&self, j: usize) -> &[f32] {
        self.labels.row(j)
    }
}

/// Expands class indices into a `labels.len() × num_classes` one-hot matrix.
pub fn one_hot(labels: &[usize], num_classes: usize) -> NnResult<Matrix> {
    let mut res = Matrix::zeros(labels.len(), num_classes)?;
    for (i, &class) in labels.iter().enumerate() {
        if class >= num_classes {
            return Err(NnError::InvalidDataset(format!(
                "label {i} has class {class}, out of range for {num_classes} classes"
            )));
        }
        res[(i, class)] = 1.0;
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_row_counts() {
        let err = Dataset::new(Matrix::zeros(3, 2).unwrap(), Matrix::zeros(2, 2).unwrap()).unwrap_err();
        assert!(matches!(err, NnError::InvalidDataset(_)));
    }

    #[test]
    fn one_hot_sets_single_component() {
        let m = one_hot(&[2, 0], 3).unwrap();
        assert_eq!(m.row(0), &[0.0, 0.0, 1.0]);
        assert_eq!(m.row(1), &[1.0, 0.0, 0.0]);
        assert!(one_hot(&[3], 3).is_err());
    }

    #[test]
    fn rows_are_addressable() {
        let ds = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]], &[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.feature_dim(), 2);
        assert_eq!(ds.features(1), &[3.0, 4.0]);
        assert_eq!(ds.label(0), &[0.0, 1.0]);
    }
}
