//! MNIST-style IDX decoding.
//!
//! Image files are IDX3: `00 00 08 03`, then big-endian `u32` item count,
//! rows and cols, then `count * rows * cols` unsigned bytes. Label files are
//! IDX1: `00 00 08 01`, big-endian `u32` count, then one class byte per item.

use std::path::Path;

use tracing::debug;

use crate::data::dataset::{one_hot, Dataset};
use crate::error::{NnError, NnResult};
use crate::math::matrix::Matrix;

fn invalid(msg: String) -> NnError {
    NnError::InvalidDataset(msg)
}

fn be_u32(bytes: &[u8], offset: usize) -> usize {
    u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]]) as usize
}

/// Validates the magic number and returns the big-endian dimension fields.
fn read_header(bytes: &[u8], what: &str, dims: u8) -> NnResult<Vec<usize>> {
    let header_len = 4 + 4 * dims as usize;
    if bytes.len() < header_len {
        return Err(invalid(format!(
            "{what} file too short: need {header_len} header bytes, got {}",
            bytes.len()
        )));
    }
    if bytes[0] != 0 || bytes[1] != 0 || bytes[2] != 0x08 || bytes[3] != dims {
        return Err(invalid(format!(
            "{what} file: bad magic {:02X} {:02X} {:02X} {:02X}, expected 00 00 08 {dims:02X}",
            bytes[0], bytes[1], bytes[2], bytes[3]
        )));
    }
    Ok((0..dims as usize).map(|d| be_u32(bytes, 4 + 4 * d)).collect())
}

/// Decodes an image/label IDX pair into a dataset. Pixels are scaled to
/// `[0, 1]`; labels become one-hot rows of width `num_classes`.
pub fn parse_idx_pair(image_bytes: &[u8], label_bytes: &[u8], num_classes: usize) -> NnResult<Dataset> {
    let dims = read_header(image_bytes, "image", 3)?;
    let (count, rows, cols) = (dims[0], dims[1], dims[2]);
    let pixels = rows
        .checked_mul(cols)
        .ok_or_else(|| invalid(format!("image dimensions {rows}x{cols} overflow")))?;
    let body = count
        .checked_mul(pixels)
        .ok_or_else(|| invalid(format!("{count} images of {pixels} pixels overflow")))?;
    let image_end = body
        .checked_add(16)
        .ok_or_else(|| invalid(format!("{count} images of {pixels} pixels overflow")))?;
    if image_bytes.len() < image_end {
        return Err(invalid(format!(
            "image file declares {count} images of {rows}x{cols} but holds {} bytes",
            image_bytes.len()
        )));
    }

    let label_count = read_header(label_bytes, "label", 1)?[0];
    if label_count != count {
        return Err(invalid(format!(
            "image file has {count} items but label file has {label_count}"
        )));
    }
    let label_end = count
        .checked_add(8)
        .ok_or_else(|| invalid(format!("{count} labels overflow")))?;
    if label_bytes.len() < label_end {
        return Err(invalid(format!(
            "label file declares {count} labels but holds {} bytes",
            label_bytes.len()
        )));
    }

    let data = image_bytes[16..image_end].iter().map(|&px| px as f32 / 255.0).collect();
    let features = Matrix::from_vec(count, pixels, data)?;

    let classes: Vec<usize> = label_bytes[8..label_end].iter().map(|&c| c as usize).collect();
    let labels = one_hot(&classes, num_classes)?;

    Dataset::new(features, labels)
}

/// Reads and decodes an IDX pair from disk.
pub fn load_idx_pair(image_path: &Path, label_path: &Path, num_classes: usize) -> NnResult<Dataset> {
    let images = std::fs::read(image_path)?;
    let labels = std::fs::read(label_path)?;
    let dataset = parse_idx_pair(&images, &labels, num_classes)?;
    debug!(
        path = %image_path.display(),
        examples = dataset.len(),
        features = dataset.feature_dim(),
        "loaded IDX dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(count: u32, rows: u32, cols: u32, pixels: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0, 0, 0x08, 0x03];
        for v in [count, rows, cols] {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        bytes.extend_from_slice(pixels);
        bytes
    }

    fn labels(classes: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0, 0, 0x08, 0x01];
        bytes.extend_from_slice(&(classes.len() as u32).to_be_bytes());
        bytes.extend_from_slice(classes);
        bytes
    }

    #[test]
    fn decodes_pixels_and_one_hot_labels() {
        let ds = parse_idx_pair(&images(2, 1, 2, &[0, 255, 51, 0]), &labels(&[1, 0]), 2).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.features(0), &[0.0, 1.0]);
        assert_eq!(ds.features(1), &[0.2, 0.0]);
        assert_eq!(ds.label(0), &[0.0, 1.0]);
        assert_eq!(ds.label(1), &[1.0, 0.0]);
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut img = images(1, 1, 1, &[0]);
        img[3] = 0x01;
        assert!(matches!(
            parse_idx_pair(&img, &labels(&[0]), 2),
            Err(NnError::InvalidDataset(_))
        ));
    }

    #[test]
    fn rejects_truncated_images() {
        assert!(parse_idx_pair(&images(2, 2, 2, &[0; 5]), &labels(&[0, 1]), 2).is_err());
    }

    #[test]
    fn rejects_header_whose_body_size_overflows() {
        // 641 * 6700417 * (2^32 - 1) == 2^64 - 1, so only the header offset overflows.
        let img = images(u32::MAX, 641, 6_700_417, &[]);
        assert!(matches!(
            parse_idx_pair(&img, &labels(&[0]), 2),
            Err(NnError::InvalidDataset(_))
        ));
    }

    #[test]
    fn rejects_count_mismatch() {
        assert!(parse_idx_pair(&images(1, 1, 1, &[0]), &labels(&[0, 1]), 2).is_err());
    }

    #[test]
    fn rejects_out_of_range_class() {
        assert!(parse_idx_pair(&images(1, 1, 1, &[0]), &labels(&[5]), 2).is_err());
    }
}
