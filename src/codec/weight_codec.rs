//! Binary weight file format.
//!
//! ```text
//! for each transition, in forward order:
//!   byte   inputs   (layer size + 1 for the bias row)
//!   byte   outputs  (size of the receiving layer)
//!   inputs * outputs big-endian IEEE-754 f64, row by row
//! ```
//!
//! There is no header, length prefix or checksum; a file simply ends after
//! the last transition.
use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::{MlpError, Result};
use crate::math::Matrix;
use crate::network::weights::WeightStore;

/// Largest row or column count a single-byte field can hold.
pub const MAX_ENCODED_COUNT: usize = u8::MAX as usize;

/// Writes `store` to `writer`. Every count is checked before the first byte
/// is written, so an oversized store leaves the writer untouched.
pub fn encode<W: Write>(store: &WeightStore, writer: &mut W) -> Result<()> {
    let counts = store
        .matrices()
        .iter()
        .enumerate()
        .map(|(t, m)| -> Result<(u8, u8)> {
            Ok((count_byte(t, "inputs", m.rows())?, count_byte(t, "outputs", m.cols())?))
        })
        .collect::<Result<Vec<_>>>()?;

    for (m, (inputs, outputs)) in store.matrices().iter().zip(counts) {
        writer.write_all(&[inputs, outputs])?;
        for weight in m.iter() {
            writer.write_all(&weight.to_be_bytes())?;
        }
        debug!("encoded {inputs}x{outputs} transition");
    }
    Ok(())
}

/// Reads transitions until the stream ends on a transition boundary.
pub fn decode<R: Read>(reader: &mut R) -> Result<WeightStore> {
    let mut layers = Vec::new();

    while let Some(inputs) = read_count(reader)? {
        let t = layers.len();
        let outputs = read_count(reader)?.ok_or_else(|| {
            MlpError::Format(format!("transition {t}: missing outputs count"))
        })?;
        let (rows, cols) = (usize::from(inputs), usize::from(outputs));

        let mut m = Matrix::zeros(rows, cols);
        let mut buf = [0u8; 8];
        for i in 0..rows {
            for o in 0..cols {
                reader.read_exact(&mut buf).map_err(|e| truncated(e, t))?;
                if let Some(w) = m.get_mut(i, o) {
                    *w = f64::from_be_bytes(buf);
                }
            }
        }
        debug!("decoded {rows}x{cols} transition");
        layers.push(m);
    }

    WeightStore::from_matrices(layers)
}

pub fn to_bytes(store: &WeightStore) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    encode(store, &mut bytes)?;
    Ok(bytes)
}

pub fn from_bytes(bytes: &[u8]) -> Result<WeightStore> {
    decode(&mut &bytes[..])
}

/// Encodes `store` into a new file at `path`, replacing any existing file.
pub fn write_file<P: AsRef<Path>>(path: P, store: &WeightStore) -> Result<()> {
    let path = path.as_ref();
    // Encode up front so an overflow never truncates an existing file.
    let bytes = to_bytes(store)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    info!("wrote {} bytes of weights to {}", bytes.len(), path.display());
    Ok(())
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<WeightStore> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let store = decode(&mut reader)?;
    info!("read {} weight transitions from {}", store.transitions(), path.display());
    Ok(store)
}

fn count_byte(transition: usize, what: &str, count: usize) -> Result<u8> {
    u8::try_from(count).map_err(|_| {
        MlpError::Overflow(format!(
            "transition {transition}: {what} count {count} exceeds {MAX_ENCODED_COUNT}"
        ))
    })
}

/// Reads one count byte; `None` at end of stream.
fn read_count<R: Read>(reader: &mut R) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

fn truncated(e: io::Error, transition: usize) -> MlpError {
    if e.kind() == ErrorKind::UnexpectedEof {
        MlpError::Format(format!("transition {transition}: weight data is truncated"))
    } else {
        MlpError::Io(e)
    }
}
