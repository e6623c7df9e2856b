use std::str::FromStr;

use rand::{thread_rng, Rng};

use crate::constants::*;
use crate::{error::Error, Move};

/// Parse a whitespace separated scramble such as `"R U R' U'"`.
///
/// Fails on the first token outside the 18 face turns.
pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace().map(Move::from_str).collect()
}

pub fn scramble_to_str(s: &[Move]) -> Result<String, Error> {
    let result: Vec<String> = s.iter().map(Move::to_string).collect();
    Ok(result.join(" "))
}

/// A random scramble of `length` moves, never turning the same face twice in a row.
pub fn gen_scramble(length: usize) -> Vec<Move> {
    gen_scramble_with(&mut thread_rng(), length)
}

/// Like [gen_scramble], drawing from `rng`.
pub fn gen_scramble_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<Move> {
    let mut scramble: Vec<Move> = Vec::with_capacity(length);
    while scramble.len() < length {
        let m = ALL_MOVES[rng.gen_range(0..N_MOVE)];
        if scramble.last().is_some_and(|last| last.is_same_layer(m)) {
            continue;
        }
        scramble.push(m);
    }
    scramble
}
