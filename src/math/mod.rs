pub mod matrix;
pub mod ops;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
