use crate::cubie::{Corner, Corner::*, Edge, Edge::*};
use crate::facelet::Color;
use crate::moves::Move::{self, *};

/// number of corners
pub const N_CORNER: usize = 8;
/// number of edges
pub const N_EDGE: usize = 12;
/// number of moves of the outer layer vocabulary
pub const N_MOVE: usize = 18;
/// number of faces, one cross per face
pub const N_FACE: usize = 6;

/// number of edges tracked by a cross
pub const N_CROSS_EDGES: usize = 4;
/// 12!/8! ordered placements of the four cross edges
pub const N_CROSS_PERM: usize = 11880;
/// 2^4 orientations of the four cross edges
pub const N_CROSS_ORI: usize = 16;
/// size of the reduced state space and of each distance table
pub const N_CROSS_STATES: usize = N_CROSS_PERM * N_CROSS_ORI;

/// distance table entry of a state the search has not reached
pub const UNVISITED: i8 = -1;
/// bumped whenever the encoding or the record layout changes
pub const CACHE_VERSION: u32 = 1;
/// directory the distance tables are cached in
pub const DEFAULT_TABLE_DIR: &str = "tables";
/// environment variable overriding [DEFAULT_TABLE_DIR] for the shared solver
pub const TABLE_DIR_ENV: &str = "CROSS_SOLVER_TABLES";
/// the hardest cross of any face needs 8 moves
pub const MAX_CROSS_DEPTH: usize = 8;
/// depth bound used by the top-k search when the caller gives none
pub const DEFAULT_TOP_K_DEPTH: usize = MAX_CROSS_DEPTH;

pub const ALL_COLORS: [Color; N_FACE] = [Color::U, Color::R, Color::F, Color::D, Color::L, Color::B];

#[rustfmt::skip]
pub const ALL_CORNERS: [Corner; N_CORNER] = [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB];

#[rustfmt::skip]
pub const ALL_EDGES: [Edge; N_EDGE] = [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR];

/// Canonical move order. Solutions are reconstructed by taking the first move in this order that
/// gets closer to the solved cross.
#[rustfmt::skip]
pub const ALL_MOVES: [Move; N_MOVE] = [
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
];

/// The four edges around each face center, indexed by [Color].
#[rustfmt::skip]
pub const CROSS_EDGES: [[Edge; N_CROSS_EDGES]; N_FACE] = [
    [UR, UF, UL, UB], // U
    [UR, DR, FR, BR], // R
    [UF, DF, FR, FL], // F
    [DR, DF, DL, DB], // D
    [UL, DL, FL, BL], // L
    [UB, DB, BL, BR], // B
];
