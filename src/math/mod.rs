pub mod lcg48;
pub mod matrix;

pub use lcg48::Lcg48;
pub use matrix::Matrix;
