pub mod weight_codec;

pub use weight_codec::{decode, encode, from_bytes, read_file, to_bytes, write_file};
