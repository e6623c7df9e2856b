use std::path::{Path, PathBuf};

use bincode::{Decode, Encode};
use log::{debug, info, warn};

use crate::constants::*;
use crate::coord::CrossCoord;
use crate::error::Error;
use crate::facelet::Color;
use crate::moves::MoveEffects;
use crate::pruning::DistanceTable;
use crate::{decode_table, write_table};

/// On-disk form of one distance table: a fixed header followed by the distances, one byte each.
#[derive(Debug, Encode, Decode)]
struct CacheRecord {
    version: u32,
    move_tokens: Vec<String>,
    state_count: u32,
    face: u8,
    distances: Vec<i8>,
}

/// Directory of cached distance tables, one file per face.
///
/// A table is only trusted if its record was written with the same format version, the same move
/// vocabulary and the same state count as the running program, and if its distances pass
/// [DistanceTable::verify]. Anything else counts as a miss and the table is rebuilt.
#[derive(Debug, Clone)]
pub struct TableCache {
    dir: PathBuf,
    move_tokens: Vec<String>,
}

impl TableCache {
    /// A cache in `dir` for tables searched with the move vocabulary `move_tokens`.
    pub fn new<P: Into<PathBuf>>(dir: P, move_tokens: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            move_tokens,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file holding the table of `face`.
    pub fn path(&self, face: Color) -> PathBuf {
        self.dir.join(format!("cross_{}.tbl", face))
    }

    /// Load the table of `face`, or `None` if there is no usable cached table.
    pub fn load(
        &self,
        face: Color,
        coord: &CrossCoord,
        effects: &MoveEffects,
    ) -> Option<DistanceTable> {
        let path = self.path(face);
        if !path.exists() {
            debug!("No cached table at {}", path.display());
            return None;
        }
        match self.read(face, coord, effects) {
            Ok(table) => {
                info!("Loading {} table...", path.display());
                Some(table)
            }
            Err(err) => {
                warn!("Ignoring cached table {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Read and validate the record of `face`.
    pub fn read(
        &self,
        face: Color,
        coord: &CrossCoord,
        effects: &MoveEffects,
    ) -> Result<DistanceTable, Error> {
        let bytes = std::fs::read(self.path(face))?;
        let record: CacheRecord = decode_table(&bytes)?;
        if record.version != CACHE_VERSION {
            return Err(Error::CacheMismatch("format version"));
        }
        if record.move_tokens != self.move_tokens {
            return Err(Error::CacheMismatch("move vocabulary"));
        }
        if record.state_count as usize != N_CROSS_STATES {
            return Err(Error::CacheMismatch("state count"));
        }
        if record.face as usize != face as usize {
            return Err(Error::CacheMismatch("face"));
        }
        if record.distances.len() != N_CROSS_STATES {
            return Err(Error::CacheMismatch("table length"));
        }
        if record.distances.iter().any(|&d| d < 0) {
            return Err(Error::CacheMismatch("unvisited entries"));
        }
        let table = DistanceTable::from_raw(face, record.distances);
        table.verify(coord, effects)?;
        Ok(table)
    }

    /// Write `table` to its file, atomically replacing an older one.
    pub fn store(&self, table: &DistanceTable) -> Result<(), Error> {
        let record = CacheRecord {
            version: CACHE_VERSION,
            move_tokens: self.move_tokens.clone(),
            state_count: N_CROSS_STATES as u32,
            face: table.face() as u8,
            distances: table.as_slice().to_vec(),
        };
        let path = self.path(table.face());
        write_table(&path, &record)?;
        info!("Wrote {} table", path.display());
        Ok(())
    }
}
