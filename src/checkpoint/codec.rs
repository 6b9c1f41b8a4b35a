//! Raw binary checkpoints.
//!
//! The body is, for every layer in order (input layer included), the weight
//! matrix row-major followed by the bias vector, each value as a
//! little-endian `f32`. There is no header; the topology lives in the file
//! name (see [`super::name`]).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::checkpoint::name::{checkpoint_file_name, parse_topology};
use crate::error::{NnError, NnResult};
use crate::network::network::Network;

const FLOAT_BYTES: usize = std::mem::size_of::<f32>();

/// Body size in bytes for a network with the given layer sizes.
pub fn expected_len(sizes: &[usize]) -> usize {
    let mut previous = 0usize;
    let mut floats = 0usize;
    for &size in sizes {
        floats = floats.saturating_add(size.saturating_mul(previous).saturating_add(size));
        previous = size;
    }
    floats.saturating_mul(FLOAT_BYTES)
}

fn corrupt(source: &str, sizes: &[usize], found: usize) -> NnError {
    NnError::CorruptCheckpoint {
        path: source.to_owned(),
        topology: sizes.iter().map(|s| s.to_string()).collect::<Vec<_>>().join("-"),
        expected: expected_len(sizes),
        found,
    }
}

fn write_floats<W: Write>(w: &mut W, values: &[f32]) -> io::Result<()> {
    for v in values {
        w.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}

fn write_network<W: Write>(network: &Network, w: &mut W) -> io::Result<()> {
    for layer in &network.layers {
        write_floats(w, layer.weights.as_slice())?;
        write_floats(w, layer.biases.as_slice())?;
    }
    Ok(())
}

fn read_floats(dst: &mut [f32], bytes: &[u8]) {
    for (d, chunk) in dst.iter_mut().zip(bytes.chunks_exact(FLOAT_BYTES)) {
        *d = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}

/// Serializes every layer's weights and biases.
pub fn encode(network: &Network) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(expected_len(&network.sizes()));
    // Writing into a Vec cannot fail.
    let _ = write_network(network, &mut bytes);
    bytes
}

/// Overwrites `network`'s parameters from a checkpoint body. The byte count
/// must match the network's topology exactly; `source` names the body in
/// the error.
pub fn decode_into(network: &mut Network, bytes: &[u8], source: &str) -> NnResult<()> {
    let sizes = network.sizes();
    if bytes.len() != expected_len(&sizes) {
        return Err(corrupt(source, &sizes, bytes.len()));
    }

    let mut offset = 0;
    for layer in &mut network.layers {
        for buf in [layer.weights.as_mut_slice(), layer.biases.as_mut_slice()] {
            let end = offset + buf.len() * FLOAT_BYTES;
            read_floats(buf, &bytes[offset..end]);
            offset = end;
        }
    }
    Ok(())
}

/// Writes `network` to `dir/<topology>-<hint>.ckpt` and returns the path.
pub fn save(network: &Network, dir: &Path, hint: &str) -> NnResult<PathBuf> {
    let path = dir.join(checkpoint_file_name(&network.sizes(), hint)?);
    std::fs::create_dir_all(dir)?;

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    write_network(network, &mut writer)?;
    writer.flush()?;

    debug!(path = %path.display(), bytes = expected_len(&network.sizes()), "checkpoint written");
    Ok(path)
}

/// Rebuilds a network from a checkpoint, taking its topology from the file name.
///
/// The file size is checked against the named topology before any parameter
/// memory is allocated.
pub fn load(path: &Path) -> NnResult<Network> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| NnError::InvalidCheckpointName(format!("'{}' has no usable file name", path.display())))?;
    let sizes = parse_topology(file_name)?;
    let source = path.display().to_string();

    let on_disk = std::fs::metadata(path)?.len();
    if on_disk != expected_len(&sizes) as u64 {
        let found = usize::try_from(on_disk).unwrap_or(usize::MAX);
        return Err(corrupt(&source, &sizes, found));
    }

    let bytes = std::fs::read(path)?;
    let mut network = Network::zeroed(&sizes)?;
    decode_into(&mut network, &bytes, &source)?;

    debug!(path = %path.display(), ?sizes, "checkpoint loaded");
    Ok(network)
}
