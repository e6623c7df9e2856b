use std::collections::VecDeque;

use log::{debug, info};

use crate::constants::*;
use crate::coord::{CrossCoord, CrossState};
use crate::error::Error;
use crate::facelet::Color;
use crate::moves::MoveEffects;

/// The distance table of one cross.
///
/// `distances[ix]` is *exactly* the number of moves needed to solve the cross of `face` from the
/// state with index ix. Tables are built once, then only read.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DistanceTable {
    face: Color,
    distances: Vec<i8>,
}

impl DistanceTable {
    /// Fill the table by a breadth first search backwards from the solved cross.
    ///
    /// Every state is labelled exactly once, when it is first reached. Since the moves are closed
    /// under inversion, the distance from the goal found this way is also the distance to it.
    pub fn build(face: Color, coord: &CrossCoord, effects: &MoveEffects) -> Result<Self, Error> {
        info!("Creating cross distance table for face {}...", face);
        let mut distances = vec![UNVISITED; N_CROSS_STATES];
        let goal = coord.encode(&CrossState::solved(face))?;
        distances[goal] = 0;

        let mut queue = VecDeque::with_capacity(N_CROSS_STATES);
        queue.push_back(goal);
        let mut done = 1;
        let mut depth = 0;
        while let Some(ix) = queue.pop_front() {
            let d = distances[ix];
            if d > depth {
                debug!("Depth: {} done: {}/{}", depth, done, N_CROSS_STATES);
                depth = d;
            }
            let state = coord.decode(ix)?;
            for (_, effect) in effects.iter() {
                let ix1 = coord.encode(&state.apply(effect))?;
                if distances[ix1] == UNVISITED {
                    distances[ix1] = d + 1;
                    done += 1;
                    queue.push_back(ix1);
                }
            }
        }
        debug!("Depth: {} done: {}/{}", depth, done, N_CROSS_STATES);

        if done != N_CROSS_STATES {
            return Err(Error::IncompleteTable {
                face,
                visited: done,
                total: N_CROSS_STATES,
            });
        }
        Ok(Self { face, distances })
    }

    /// Wrap distances read back from storage. The caller is responsible for their validity.
    pub(crate) fn from_raw(face: Color, distances: Vec<i8>) -> Self {
        Self { face, distances }
    }

    /// Check that the table holds the true distances of `face`.
    ///
    /// The goal must be the only state at distance 0, no entry may exceed [MAX_CROSS_DEPTH],
    /// neighbours may differ by at most one and every other state needs a neighbour one step
    /// closer. A table passing these checks equals the one [DistanceTable::build] produces.
    pub fn verify(&self, coord: &CrossCoord, effects: &MoveEffects) -> Result<(), Error> {
        let inconsistent = |index| Error::InconsistentTable {
            face: self.face,
            index,
        };
        if self.distances.len() != N_CROSS_STATES {
            return Err(inconsistent(self.distances.len()));
        }
        let goal = coord.encode(&CrossState::solved(self.face))?;
        for ix in 0..N_CROSS_STATES {
            let d = self.distance(ix).ok_or_else(|| inconsistent(ix))?;
            if d > MAX_CROSS_DEPTH || (d == 0) != (ix == goal) {
                return Err(inconsistent(ix));
            }
            let state = coord.decode(ix)?;
            let mut closer = d == 0;
            for (_, effect) in effects.iter() {
                let ix1 = coord.encode(&state.apply(effect))?;
                let d1 = self.distance(ix1).ok_or_else(|| inconsistent(ix1))?;
                if d1 > d + 1 || d > d1 + 1 {
                    return Err(inconsistent(ix));
                }
                closer |= d1 + 1 == d;
            }
            if !closer {
                return Err(inconsistent(ix));
            }
        }
        Ok(())
    }

    pub fn face(&self) -> Color {
        self.face
    }

    /// Distance of the state with index `ix` to the solved cross, `None` for an unreached state.
    pub fn distance(&self, ix: usize) -> Option<usize> {
        match self.distances.get(ix) {
            Some(&d) if d >= 0 => Some(d as usize),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.distances
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// The largest distance, i.e. the number of moves the hardest cross needs.
    pub fn max_depth(&self) -> usize {
        self.distances.iter().copied().max().unwrap_or(0).max(0) as usize
    }

    /// Number of states at each distance, index = distance.
    pub fn depth_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.max_depth() + 1];
        for &d in self.distances.iter().filter(|&&d| d >= 0) {
            counts[d as usize] += 1;
        }
        counts
    }
}
