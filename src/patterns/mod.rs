pub mod parser;
pub mod pattern;

pub use parser::{parse_patterns, read_patterns};
pub use pattern::Pattern;
