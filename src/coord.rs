use std::fmt;

use crate::constants::*;
use crate::cubie::EdgeCubies;
use crate::error::Error;
use crate::facelet::Color;
use crate::moves::MoveEffect;

/// Represent the cross of one face on the coordinate level.
///
/// `positions[i]` is the slot of the i-th edge of the face (in [CROSS_EDGES] order),
/// `orientations[i]` is 1 if that edge is flipped.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct CrossState {
    pub positions: [u8; N_CROSS_EDGES],
    pub orientations: [u8; N_CROSS_EDGES],
}

impl fmt::Display for CrossState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(positions: {:?}, orientations: {:?})",
            self.positions, self.orientations
        )
    }
}

impl CrossState {
    /// Build a cross state, checking that the slots are distinct and in range and that the
    /// orientations are 0 or 1.
    pub fn new(
        positions: [u8; N_CROSS_EDGES],
        orientations: [u8; N_CROSS_EDGES],
    ) -> Result<Self, Error> {
        for (i, &p) in positions.iter().enumerate() {
            if p as usize >= N_EDGE {
                return Err(Error::InvalidCrossState(format!("slot {p} out of range")));
            }
            if positions[..i].contains(&p) {
                return Err(Error::InvalidCrossState(format!("slot {p} occupied twice")));
            }
        }
        if let Some(o) = orientations.iter().find(|&&o| o > 1) {
            return Err(Error::InvalidCrossState(format!("orientation {o} is not 0 or 1")));
        }
        Ok(Self {
            positions,
            orientations,
        })
    }

    /// The solved cross of `face`: every edge at home, none flipped.
    pub fn solved(face: Color) -> Self {
        let edges = CROSS_EDGES[face as usize];
        Self {
            positions: edges.map(|e| e as u8),
            orientations: [0; N_CROSS_EDGES],
        }
    }

    /// Extract the cross of `face` from a full cube.
    pub fn from_cube<C: EdgeCubies + ?Sized>(cube: &C, face: Color) -> Result<Self, Error> {
        let mut positions = [0; N_CROSS_EDGES];
        let mut orientations = [0; N_CROSS_EDGES];
        for (i, &edge) in CROSS_EDGES[face as usize].iter().enumerate() {
            let slot = (0..N_EDGE)
                .find(|&s| cube.edge_piece(s) == edge)
                .ok_or(Error::InvalidCubieValue)?;
            positions[i] = slot as u8;
            orientations[i] = cube.edge_orientation(slot) & 1;
        }
        Self::new(positions, orientations)
    }

    pub fn is_solved(&self, face: Color) -> bool {
        *self == Self::solved(face)
    }

    /// The state after one move, in constant time.
    #[inline]
    pub fn apply(&self, effect: &MoveEffect) -> Self {
        let mut next = *self;
        for i in 0..N_CROSS_EDGES {
            (next.positions[i], next.orientations[i]) =
                effect.apply(self.positions[i], self.orientations[i]);
        }
        next
    }

    fn orientation_bits(&self) -> usize {
        self.orientations
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &o)| acc | ((o as usize & 1) << i))
    }
}

/// Bijection between cross states and the dense indices `0..N_CROSS_STATES`.
///
/// index = rank(positions) * 16 + orientation bits, where rank is the lexicographic rank of the
/// ordered slot tuple among all 12·11·10·9 tuples of distinct slots. The order is fixed here for
/// good; cached distance tables depend on it.
pub struct CrossCoord {
    perm_by_rank: Vec<[u8; N_CROSS_EDGES]>,
    /// rank of the tuple (a, b, c, d) at a·12³ + b·12² + c·12 + d, `u16::MAX` for tuples with repeats
    rank_by_perm: Vec<u16>,
}

impl Default for CrossCoord {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossCoord {
    pub fn new() -> Self {
        let mut perm_by_rank = Vec::with_capacity(N_CROSS_PERM);
        let mut rank_by_perm = vec![u16::MAX; N_EDGE.pow(N_CROSS_EDGES as u32)];
        let n = N_EDGE as u8;
        for a in 0..n {
            for b in (0..n).filter(|&b| b != a) {
                for c in (0..n).filter(|&c| c != a && c != b) {
                    for d in (0..n).filter(|&d| d != a && d != b && d != c) {
                        let perm = [a, b, c, d];
                        rank_by_perm[Self::slot_key(&perm)] = perm_by_rank.len() as u16;
                        perm_by_rank.push(perm);
                    }
                }
            }
        }
        debug_assert_eq!(perm_by_rank.len(), N_CROSS_PERM);
        Self {
            perm_by_rank,
            rank_by_perm,
        }
    }

    #[inline]
    fn slot_key(positions: &[u8; N_CROSS_EDGES]) -> usize {
        positions
            .iter()
            .fold(0, |acc, &p| acc * N_EDGE + p as usize)
    }

    /// Lexicographic rank of four distinct slots.
    pub fn rank(&self, positions: &[u8; N_CROSS_EDGES]) -> Result<u16, Error> {
        if positions.iter().any(|&p| p as usize >= N_EDGE) {
            return Err(Error::InvalidCrossState(format!(
                "slots {positions:?} out of range"
            )));
        }
        match self.rank_by_perm[Self::slot_key(positions)] {
            u16::MAX => Err(Error::InvalidCrossState(format!(
                "slots {positions:?} are not distinct"
            ))),
            rank => Ok(rank),
        }
    }

    /// The slots with lexicographic rank `rank`.
    pub fn unrank(&self, rank: u16) -> Result<[u8; N_CROSS_EDGES], Error> {
        self.perm_by_rank
            .get(rank as usize)
            .copied()
            .ok_or(Error::InvalidStateIndex(rank as usize))
    }

    pub fn encode(&self, state: &CrossState) -> Result<usize, Error> {
        if state.orientations.iter().any(|&o| o > 1) {
            return Err(Error::InvalidCrossState(format!(
                "orientations {:?} are not bits",
                state.orientations
            )));
        }
        let rank = self.rank(&state.positions)? as usize;
        Ok(rank * N_CROSS_ORI + state.orientation_bits())
    }

    pub fn decode(&self, index: usize) -> Result<CrossState, Error> {
        if index >= N_CROSS_STATES {
            return Err(Error::InvalidStateIndex(index));
        }
        let positions = self.unrank((index / N_CROSS_ORI) as u16)?;
        let bits = index % N_CROSS_ORI;
        let mut orientations = [0; N_CROSS_EDGES];
        for (i, o) in orientations.iter_mut().enumerate() {
            *o = ((bits >> i) & 1) as u8;
        }
        Ok(CrossState {
            positions,
            orientations,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::coord::*;
    use crate::cubie::{CubieCube, Edge};
    use crate::moves::Move;

    #[test]
    fn test_rank_unrank() {
        let coord = CrossCoord::new();
        assert_eq!(coord.rank(&[0, 1, 2, 3]).unwrap(), 0);
        assert_eq!(coord.rank(&[0, 1, 2, 4]).unwrap(), 1);
        assert_eq!(coord.rank(&[11, 10, 9, 8]).unwrap(), (N_CROSS_PERM - 1) as u16);
        for rank in 0..N_CROSS_PERM as u16 {
            let perm = coord.unrank(rank).unwrap();
            assert_eq!(coord.rank(&perm).unwrap(), rank);
        }
        assert!(coord.unrank(N_CROSS_PERM as u16).is_err());
    }

    #[test]
    fn test_encode_decode() {
        let coord = CrossCoord::new();
        for index in 0..N_CROSS_STATES {
            let state = coord.decode(index).unwrap();
            assert_eq!(coord.encode(&state).unwrap(), index);
        }
        let state = CrossState::new([7, 3, 11, 0], [1, 0, 0, 1]).unwrap();
        let index = coord.encode(&state).unwrap();
        assert_eq!(index % N_CROSS_ORI, 0b1001);
        assert_eq!(coord.decode(index).unwrap(), state);
        assert!(matches!(
            coord.decode(N_CROSS_STATES),
            Err(Error::InvalidStateIndex(_))
        ));
    }

    #[test]
    fn test_invalid_states() {
        let coord = CrossCoord::new();
        assert!(CrossState::new([0, 1, 1, 3], [0; 4]).is_err());
        assert!(CrossState::new([0, 1, 2, 12], [0; 4]).is_err());
        assert!(CrossState::new([0, 1, 2, 3], [0, 2, 0, 0]).is_err());
        assert!(coord.rank(&[5, 5, 6, 7]).is_err());
        assert!(coord.rank(&[0, 1, 2, 200]).is_err());
        let bad = CrossState {
            positions: [4, 4, 4, 4],
            orientations: [0; 4],
        };
        assert!(matches!(
            coord.encode(&bad),
            Err(Error::InvalidCrossState(_))
        ));
    }

    #[test]
    fn test_solved_states() {
        let coord = CrossCoord::new();
        assert_eq!(coord.encode(&CrossState::solved(Color::U)).unwrap(), 0);
        let cc = CubieCube::default();
        for face in ALL_COLORS {
            let state = CrossState::from_cube(&cc, face).unwrap();
            assert_eq!(state, CrossState::solved(face));
            assert!(state.is_solved(face));
        }
    }

    #[test]
    fn test_from_cube() {
        let cc = CubieCube::default().apply_moves(&[Move::F]);
        let state = CrossState::from_cube(&cc, Color::U).unwrap();
        // UF went to FR and got flipped, the rest of the U cross stays
        assert_eq!(
            state.positions,
            [Edge::UR as u8, Edge::FR as u8, Edge::UL as u8, Edge::UB as u8]
        );
        assert_eq!(state.orientations, [0, 1, 0, 0]);

        let mut broken = CubieCube::default();
        broken.ep[Edge::UF as usize] = Edge::UR;
        assert!(matches!(
            CrossState::from_cube(&broken, Color::U),
            Err(Error::InvalidCubieValue)
        ));
    }
}
