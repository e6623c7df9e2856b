//! A crate for finding the shortest cross solutions of the 3x3 Rubik's cube.
//!
//! The four edges around a face are tracked in a reduced state space of 12·11·10·9·2⁴ = 190080
//! states. A breadth first search from the solved cross fills a distance table per face, which is
//! cached on disk and then used to read off optimal solutions move by move.

#[macro_use]
extern crate lazy_static;

/// Module containing functions for scrambling the cube.
pub mod scramble;

pub mod error;

/// Module containing 3x3 cube and cross table constants.
pub mod constants;
pub mod cache;
pub mod coord;
pub mod cubie;
pub mod facelet;
pub mod moves;
pub mod pruning;
pub mod solver;

use std::io::Write;
use std::path::Path;

use bincode::{
    config::{self, Configuration, Fixint, Limit, LittleEndian},
    decode_from_slice, encode_to_vec,
    error::DecodeError,
    Decode, Encode,
};
use tempfile::NamedTempFile;

use crate::error::Error;
pub use crate::moves::Move;

/// Upper bound on the bytes a decoded table may claim, so a corrupt length prefix fails instead of
/// allocating.
const TABLE_SIZE_LIMIT: usize = 1 << 24;

/// Tables are stored with fixed width integers, so every entry of a distance array takes the same
/// number of bytes on disk.
const CONFIG: Configuration<LittleEndian, Fixint, Limit<TABLE_SIZE_LIMIT>> = config::standard()
    .with_fixed_int_encoding()
    .with_limit::<TABLE_SIZE_LIMIT>();

/// Encode `table` and atomically replace the file at `path` with it.
///
/// The bytes are written to a temporary file in the destination directory first, which is only
/// renamed over `path` after a successful sync. On any error the temporary file is removed and a
/// previously written table stays untouched.
pub fn write_table<P, T: Encode>(path: P, table: &T) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let encoded = encode_to_vec(table, CONFIG)?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&encoded)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn decode_table<T: Decode<()>>(bytes: &[u8]) -> Result<T, Error> {
    let (decoded, written) = decode_from_slice(bytes, CONFIG)?;
    if written != bytes.len() {
        return Err(DecodeError::Other("trailing bytes after table").into());
    }
    Ok(decoded)
}
