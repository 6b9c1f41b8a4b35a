pub mod codec;
pub mod name;

pub use codec::{decode_into, encode, load, save};
pub use name::{checkpoint_file_name, parse_topology, CHECKPOINT_EXTENSION};
