use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use self::Move::*;
use crate::constants::*;
use crate::cubie::{Corner::*, CubieCube, Edge::*, EdgeCubies};
use crate::error::Error;

/// Layer moves, Up, Right, Front, Down, Left, Back.
///
/// $ clockwise, $2 double, $3 counter-clockwise.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            R3 => write!(f, "R'"),
            L3 => write!(f, "L'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(R),
            "R'" => Ok(R3),
            "R2" => Ok(R2),
            "L" => Ok(L),
            "L'" => Ok(L3),
            "L2" => Ok(L2),
            "U" => Ok(U),
            "U'" => Ok(U3),
            "U2" => Ok(U2),
            "D" => Ok(D),
            "D'" => Ok(D3),
            "D2" => Ok(D2),
            "F" => Ok(F),
            "F'" => Ok(F3),
            "F2" => Ok(F2),
            "B" => Ok(B),
            "B'" => Ok(B3),
            "B2" => Ok(B2),
            _ => Err(Error::InvalidScramble),
        }
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[rustfmt::skip]
impl Move {
    pub fn is_same_layer(&self, other: Move) -> bool {
        matches!(
            (&self, other),
            (U | U2 | U3, U | U2 | U3)
            | (D | D2 | D3, D | D2 | D3)
            | (R | R2 | R3, R | R2 | R3)
            | (L | L2 | L3, L | L2 | L3)
            | (F | F2 | F3, F | F2 | F3)
            | (B | B2 | B3, B | B2 | B3)
        )
    }

    pub fn get_inverse(self) -> Self {
        match self {
            U => U3,
            U3 => U,
            D => D3,
            D3 => D,
            R => R3,
            R3 => R,
            L => L3,
            L3 => L,
            F => F3,
            F3 => F,
            B => B3,
            B3 => B,
            _ => self,
        }
    }
}

/// The basic six cube moves described by permutations and changes in orientation.
///
/// U_MOVE
pub const U_MOVE: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// R_MOVE
pub const R_MOVE: CubieCube = CubieCube {
    cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR], //permutation of the corners
    co: [2, 0, 0, 1, 1, 0, 0, 2],                 //changes of the orientations of the corners
    ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR], //permutation of the edges
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],     //changes of the permutations of the edges
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// F_MOVE
pub const F_MOVE: CubieCube = CubieCube {
    cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// D_MOVE
pub const D_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// L_MOVE
pub const L_MOVE: CubieCube = CubieCube {
    cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// B_MOVE
pub const B_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

/// What one move does to the edges, read off the solved cube.
///
/// An edge at slot `p` moves to slot `forward_pos[p]`. An edge landing at slot `q` has its
/// orientation XORed with `flip[q]`: the flip belongs to the destination slot, not to the cubie.
/// Moves act on cubies the same way whatever the rest of the cube looks like, so these two arrays
/// transform any tracked edge in constant time.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MoveEffect {
    pub forward_pos: [u8; N_EDGE],
    pub flip: [u8; N_EDGE],
}

impl MoveEffect {
    /// Apply `m` once to the solved cube and record where every edge landed.
    pub fn new(m: Move) -> Self {
        let mut cc = CubieCube::default();
        cc.apply_move(m);
        let mut forward_pos = [0; N_EDGE];
        let mut flip = [0; N_EDGE];
        for q in 0..N_EDGE {
            // on the solved cube the cubie at q came from its home slot
            forward_pos[cc.edge_piece(q) as usize] = q as u8;
            flip[q] = cc.edge_orientation(q) & 1;
        }
        Self { forward_pos, flip }
    }

    /// New slot and orientation of an edge at `pos` with orientation `ori`.
    #[inline]
    pub fn apply(&self, pos: u8, ori: u8) -> (u8, u8) {
        let new_pos = self.forward_pos[pos as usize];
        (new_pos, ori ^ self.flip[new_pos as usize])
    }
}

/// Move effects for the whole move vocabulary, built once and shared read-only by all searches.
///
/// The vocabulary must be closed under inversion: the distance tables are searched backwards from
/// the solved cross, which only gives forward distances if every move can be undone by another one.
#[derive(Debug, Clone)]
pub struct MoveEffects {
    moves: Vec<Move>,
    effects: Vec<MoveEffect>,
}

impl Default for MoveEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveEffects {
    pub fn new() -> Self {
        Self {
            moves: ALL_MOVES.to_vec(),
            effects: ALL_MOVES.iter().map(|&m| MoveEffect::new(m)).collect(),
        }
    }

    /// The effect of `m`.
    pub fn get(&self, m: Move) -> &MoveEffect {
        &self.effects[m as usize]
    }

    /// Iterate over `(move, effect)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Move, &MoveEffect)> {
        self.moves.iter().copied().zip(self.effects.iter())
    }

    /// The move tokens, as recorded in the table cache.
    pub fn tokens(&self) -> Vec<String> {
        self.moves.iter().map(|m| m.to_string()).collect()
    }
}

#[cfg(test)]
mod test {
    use crate::moves::*;

    #[test]
    fn test_move_from_str() {
        assert_eq!(Move::from_str("R'").unwrap(), R3);
        assert_eq!(Move::from_str("B2").unwrap(), B2);
        assert!(Move::from_str("R3").is_err());
        assert!(Move::from_str("x").is_err());
    }

    #[test]
    fn test_move_display() {
        let tokens: Vec<String> = ALL_MOVES.iter().map(|m| m.to_string()).collect();
        assert_eq!(
            tokens.join(" "),
            "U U2 U' R R2 R' F F2 F' D D2 D' L L2 L' B B2 B'"
        );
        for m in ALL_MOVES {
            assert_eq!(Move::from_str(&m.to_string()).unwrap(), m);
        }
    }

    #[test]
    fn test_u_effect() {
        let e = MoveEffect::new(U);
        // U cycles UF -> UL -> UB -> UR -> UF
        assert_eq!(e.forward_pos[UF as usize], UL as u8);
        assert_eq!(e.forward_pos[UL as usize], UB as u8);
        assert_eq!(e.forward_pos[UB as usize], UR as u8);
        assert_eq!(e.forward_pos[UR as usize], UF as u8);
        assert_eq!(e.forward_pos[DF as usize], DF as u8);
        assert_eq!(e.flip, [0; N_EDGE]);
    }

    #[test]
    fn test_f_effect_flips() {
        let e = MoveEffect::new(F);
        assert_eq!(e.apply(UF as u8, 0), (FR as u8, 1));
        assert_eq!(e.apply(FR as u8, 1), (DF as u8, 0));
        assert_eq!(e.apply(UR as u8, 0), (UR as u8, 0));
    }

    #[test]
    fn test_effects_closed_under_inversion() {
        let effects = MoveEffects::new();
        for (m, e) in effects.iter() {
            let inv = effects.get(m.get_inverse());
            for pos in 0..N_EDGE as u8 {
                for ori in 0..2 {
                    let (p1, o1) = e.apply(pos, ori);
                    assert_eq!(inv.apply(p1, o1), (pos, ori), "{m} on slot {pos}");
                }
            }
        }
    }

    #[test]
    fn test_effects_match_cubie_level() {
        let effects = MoveEffects::new();
        let scramble = [R, U, F3, D2, L, B3, U2];
        let cc = CubieCube::default().apply_moves(&scramble);
        for e in ALL_EDGES {
            let (mut pos, mut ori) = (e as u8, 0);
            for m in scramble {
                (pos, ori) = effects.get(m).apply(pos, ori);
            }
            assert_eq!(cc.ep[pos as usize], e);
            assert_eq!(cc.eo[pos as usize], ori);
        }
    }
}
