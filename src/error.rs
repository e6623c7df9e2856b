use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

use crate::facelet::Color;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid scramble string")]
    InvalidScramble,
    #[error("invalid facelet string")]
    InvalidFaceletString,
    #[error("invalid facelet value")]
    InvalidFaceletValue,
    #[error("invalid cubie value")]
    InvalidCubieValue,
    #[error("unknown face: {0:?}")]
    InvalidFace(String),
    #[error("invalid cross state: {0}")]
    InvalidCrossState(String),
    #[error("state index {0} out of range")]
    InvalidStateIndex(usize),
    #[error("cache record rejected: {0}")]
    CacheMismatch(&'static str),
    #[error("distance table for face {face} is incomplete ({visited} of {total} states reached)")]
    IncompleteTable {
        face: Color,
        visited: usize,
        total: usize,
    },
    #[error("distance table for face {face} is inconsistent at state {index}")]
    InconsistentTable { face: Color, index: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
