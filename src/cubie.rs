use std::fmt;

use crate::constants::*;
use crate::error::Error;
use crate::facelet::Color;
use crate::moves::{self, Move};

/// The names of the corner positions of the cube. Corner URF e.g. has an U(p), a R(ight) and a F(ront) facelet.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Corner {
    URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB,
}

/// The names of the edge positions of the cube. Edge UR e.g. has an U(p) and R(ight) facelet.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Edge {
    UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Read access to the edges of a full cube state.
///
/// This is all the cross search needs from a cube: which edge cubie sits at a slot and whether it
/// is flipped there.
pub trait EdgeCubies {
    /// The edge cubie occupying `slot`, slots numbered like [Edge].
    fn edge_piece(&self, slot: usize) -> Edge;
    /// 0 if the cubie at `slot` is oriented as in the solved cube, 1 if flipped.
    fn edge_orientation(&self, slot: usize) -> u8;
}

/// Represent a cube on the cubie level with 8 corner cubies, 12 edge cubies and the cubie orientations.
///
/// Is also used to represent:
/// 1. the 18 cube moves
/// 2. the state a scramble leaves the cube in
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CubieCube {
    /// corner permutation
    pub cp: [Corner; N_CORNER],
    /// corner orientation
    pub co: [u8; N_CORNER],
    /// edge permutation
    pub ep: [Edge; N_EDGE],
    /// edge orientation
    pub eo: [u8; N_EDGE],
}

impl Default for CubieCube {
    /// The solved cube.
    fn default() -> Self {
        Self {
            cp: ALL_CORNERS,
            co: [0; N_CORNER],
            ep: ALL_EDGES,
            eo: [0; N_EDGE],
        }
    }
}

impl EdgeCubies for CubieCube {
    fn edge_piece(&self, slot: usize) -> Edge {
        self.ep[slot]
    }

    fn edge_orientation(&self, slot: usize) -> u8 {
        self.eo[slot]
    }
}

impl From<&Vec<Move>> for CubieCube {
    /// The state a sequence of moves leaves the solved cube in.
    fn from(moves: &Vec<Move>) -> Self {
        CubieCube::default().apply_moves(moves)
    }
}

/// The six clockwise face turns in U, R, F, D, L, B order.
pub fn basic_move_cubes() -> [CubieCube; N_FACE] {
    [
        moves::U_MOVE,
        moves::R_MOVE,
        moves::F_MOVE,
        moves::D_MOVE,
        moves::L_MOVE,
        moves::B_MOVE,
    ]
}

impl CubieCube {
    /// Multiply this cubie cube with another cubie cube b, restricted to the corners.
    pub fn corner_multiply(&mut self, b: CubieCube) {
        let mut c_perm = [Corner::URF; N_CORNER];
        let mut c_ori = [0; N_CORNER];
        for c in 0..N_CORNER {
            let from = b.cp[c] as usize;
            c_perm[c] = self.cp[from];
            c_ori[c] = (self.co[from] + b.co[c]) % 3;
        }
        self.cp = c_perm;
        self.co = c_ori;
    }

    /// Multiply this cubie cube with another cubie cube b, restricted to the edges.
    pub fn edge_multiply(&mut self, b: CubieCube) {
        let mut e_perm = [Edge::UR; N_EDGE];
        let mut e_ori = [0; N_EDGE];
        for e in 0..N_EDGE {
            let from = b.ep[e] as usize;
            e_perm[e] = self.ep[from];
            e_ori[e] = (b.eo[e] + self.eo[from]) % 2;
        }
        self.ep = e_perm;
        self.eo = e_ori;
    }

    /// Multiply this cubie cube with another cubie cube b.
    pub fn multiply(&mut self, b: CubieCube) {
        self.corner_multiply(b);
        self.edge_multiply(b);
    }

    /// Apply a single move in place.
    pub fn apply_move(&mut self, m: Move) {
        let bmc = basic_move_cubes();
        let face = m as usize / 3;
        for _ in 0..m as usize % 3 + 1 {
            self.multiply(bmc[face]);
        }
    }

    /// Return the state after applying `moves` to this cube.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        let mut cc = *self;
        for &m in moves {
            cc.apply_move(m);
        }
        cc
    }

    /// True if the four edges around `face` are at their home positions and not flipped.
    pub fn is_cross_solved(&self, face: Color) -> bool {
        CROSS_EDGES[face as usize]
            .iter()
            .all(|&e| self.ep[e as usize] == e && self.eo[e as usize] == 0)
    }

    /// Give the parity of the corner permutation.
    pub fn corner_parity(&self) -> u8 {
        let mut s = 0;
        for i in (1..N_CORNER).rev() {
            for j in 0..i {
                if self.cp[j] > self.cp[i] {
                    s += 1;
                }
            }
        }
        s % 2
    }

    /// Give the parity of the edge permutation. A solvable cube has the same corner and edge parity.
    pub fn edge_parity(&self) -> u8 {
        let mut s = 0;
        for i in (1..N_EDGE).rev() {
            for j in 0..i {
                if self.ep[j] > self.ep[i] {
                    s += 1;
                }
            }
        }
        s % 2
    }

    /// Check if the cubie cube is a reachable cube state.
    pub fn verify(&self) -> Result<(), Error> {
        let mut edge_count = [0; N_EDGE];
        for e in self.ep {
            edge_count[e as usize] += 1;
        }
        let mut corner_count = [0; N_CORNER];
        for c in self.cp {
            corner_count[c as usize] += 1;
        }
        if edge_count.iter().any(|&n| n != 1) || corner_count.iter().any(|&n| n != 1) {
            return Err(Error::InvalidCubieValue);
        }
        if self.eo.iter().any(|&o| o > 1) || self.co.iter().any(|&o| o > 2) {
            return Err(Error::InvalidCubieValue);
        }
        let flip: u32 = self.eo.iter().map(|&o| o as u32).sum();
        let twist: u32 = self.co.iter().map(|&o| o as u32).sum();
        if flip % 2 != 0 || twist % 3 != 0 {
            return Err(Error::InvalidCubieValue);
        }
        if self.edge_parity() != self.corner_parity() {
            return Err(Error::InvalidCubieValue);
        }
        Ok(())
    }
}
