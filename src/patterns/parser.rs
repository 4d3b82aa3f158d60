//! Reader for the text pattern format.
//!
//! ```text
//! <header line>
//! <header line>
//! x1 x2 ... xn    y1 ... ym
//! ```
//!
//! The first two lines are skipped. Each following line holds the input block
//! and the target block separated by the first run of four spaces; values
//! inside a block are separated by one or more spaces. Blank lines are
//! ignored.
use std::path::Path;

use log::info;

use crate::error::{MlpError, Result};
use crate::patterns::pattern::Pattern;

const HEADER_LINES: usize = 2;
const BLOCK_SEPARATOR: &str = "    ";

/// Parses pattern text into patterns, in file order.
pub fn parse_patterns(text: &str) -> Result<Vec<Pattern>> {
    let mut patterns = Vec::new();

    for (idx, line) in text.lines().enumerate().skip(HEADER_LINES) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let (x_block, y_block) = line.split_once(BLOCK_SEPARATOR).ok_or_else(|| {
            MlpError::Format(format!(
                "line {line_no}: expected input and target blocks separated by four spaces"
            ))
        })?;

        let x = parse_block(x_block, line_no, "input")?;
        let y = parse_block(y_block, line_no, "target")?;
        patterns.push(Pattern::new(x, y));
    }

    Ok(patterns)
}

/// Reads and parses a pattern file.
pub fn read_patterns<P: AsRef<Path>>(path: P) -> Result<Vec<Pattern>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let patterns = parse_patterns(&text)?;
    info!("read {} patterns from {}", patterns.len(), path.display());
    Ok(patterns)
}

fn parse_block(block: &str, line_no: usize, what: &str) -> Result<Vec<f64>> {
    let values = block
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| -> Result<f64> {
            let value = token.parse::<f64>().map_err(|_| {
                MlpError::Format(format!("line {line_no}: '{token}' is not a valid number"))
            })?;
            if !value.is_finite() {
                return Err(MlpError::Format(format!(
                    "line {line_no}: '{token}' is not a finite number"
                )));
            }
            Ok(value)
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.is_empty() {
        return Err(MlpError::Format(format!("line {line_no}: empty {what} block")));
    }
    Ok(values)
}
