use crate::error::{NnError, NnResult};

pub const CHECKPOINT_EXTENSION: &str = "ckpt";

/// `<s0>-<s1>-...-<sN>-<hint>.ckpt`.
///
/// The hint may not start with a digit, since [`parse_topology`] would read
/// it back as another layer size, and may not contain a path separator.
pub fn checkpoint_file_name(sizes: &[usize], hint: &str) -> NnResult<String> {
    if hint.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(NnError::InvalidCheckpointName(format!(
            "hint '{hint}' starts with a digit"
        )));
    }
    if hint.contains(['/', '\\']) {
        return Err(NnError::InvalidCheckpointName(format!(
            "hint '{hint}' contains a path separator"
        )));
    }
    let topology = sizes.iter().map(|s| s.to_string()).collect::<Vec<_>>().join("-");
    Ok(format!("{topology}-{hint}.{CHECKPOINT_EXTENSION}"))
}

/// Reads the leading run of dash-separated decimal sizes from a file name,
/// stopping at the first token that is not purely digits. The extension is
/// dropped first, so a name without a hint (`784-30-10.ckpt`) keeps its last
/// size.
pub fn parse_topology(file_name: &str) -> NnResult<Vec<usize>> {
    let stem = file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem);
    let mut sizes = Vec::new();
    for token in stem.split('-') {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            break;
        }
        let size = token.parse::<usize>().map_err(|_| {
            NnError::InvalidCheckpointName(format!("layer size '{token}' in '{file_name}' is out of range"))
        })?;
        sizes.push(size);
    }
    if sizes.len() < 2 {
        return Err(NnError::InvalidCheckpointName(format!(
            "'{file_name}' does not start with at least two dash-separated layer sizes"
        )));
    }
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_encodes_topology_and_hint() {
        assert_eq!(checkpoint_file_name(&[784, 30, 10], "digits").unwrap(), "784-30-10-digits.ckpt");
    }

    #[test]
    fn parse_stops_at_first_non_numeric_token() {
        assert_eq!(parse_topology("784-30-10-digits.ckpt").unwrap(), vec![784, 30, 10]);
        assert_eq!(parse_topology("2-3-1-run-7-4.ckpt").unwrap(), vec![2, 3, 1]);
    }

    #[test]
    fn name_without_hint_keeps_last_size() {
        assert_eq!(parse_topology("784-30-10.ckpt").unwrap(), vec![784, 30, 10]);
        assert_eq!(parse_topology("2-1").unwrap(), vec![2, 1]);
        assert_eq!(parse_topology("4-3-v1.2.ckpt").unwrap(), vec![4, 3]);
    }

    #[test]
    fn has_no_layer_count_cap() {
        let sizes: Vec<usize> = (1..=20).collect();
        let name = checkpoint_file_name(&sizes, "deep").unwrap();
        assert_eq!(parse_topology(&name).unwrap(), sizes);
    }

    #[test]
    fn rejects_names_without_topology() {
        assert!(matches!(parse_topology("digits.ckpt"), Err(NnError::InvalidCheckpointName(_))));
        assert!(matches!(parse_topology("784-digits.ckpt"), Err(NnError::InvalidCheckpointName(_))));
    }

    #[test]
    fn rejects_ambiguous_hints() {
        assert!(checkpoint_file_name(&[2, 1], "5x").is_err());
        assert!(checkpoint_file_name(&[2, 1], "a/b").is_err());
    }
}
