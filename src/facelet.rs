use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::cubie::CubieCube;
use crate::error::Error;

/// Names the colors of the cube facelets: up, right, face, down, left, back.
///
/// A color also names the face whose center carries it, which is how crosses are addressed.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Color {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<char> for Color {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'U' => Ok(Color::U),
            'R' => Ok(Color::R),
            'F' => Ok(Color::F),
            'D' => Ok(Color::D),
            'L' => Ok(Color::L),
            'B' => Ok(Color::B),
            _ => Err(Error::InvalidFace(c.to_string())),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Color::try_from(c.to_ascii_uppercase()),
            _ => Err(Error::InvalidFace(s.to_string())),
        }
    }
}

/// The names of the facelet positions of the cube.
///
/// ```text
///              |************|
///              |*U1**U2**U3*|
///              |************|
///              |*U4**U5**U6*|
///              |************|
///              |*U7**U8**U9*|
///              |************|
/// |************|************|************|************|
/// |*L1**L2**L3*|*F1**F2**F3*|*R1**R2**R3*|*B1**B2**B3*|
/// |************|************|************|************|
/// |*L4**L5**L6*|*F4**F5**F6*|*R4**R5**R6*|*B4**B5**B6*|
/// |************|************|************|************|
/// |*L7**L8**L9*|*F7**F8**F9*|*R7**R8**R9*|*B7**B8**B9*|
/// |************|************|************|************|
///              |************|
///              |*D1**D2**D3*|
///              |************|
///              |*D4**D5**D6*|
///              |************|
///              |*D7**D8**D9*|
///              |************|
/// ```
///
/// A facelet string lists the 54 facelets in the order U1..U9, R1..R9, F1..F9, D1..D9, L1..L9,
/// B1..B9, for example the solved cube is
/// "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB".
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FaceCube {
    pub f: [Color; 54],
}

// Facelet indices of the corner and edge positions, in the order of the cubie enums.
const U1: usize = 0;
const U2: usize = 1;
const U3: usize = 2;
const U4: usize = 3;
const U6: usize = 5;
const U7: usize = 6;
const U8: usize = 7;
const U9: usize = 8;
const R1: usize = 9;
const R2: usize = 10;
const R3: usize = 11;
const R4: usize = 12;
const R6: usize = 14;
const R7: usize = 15;
const R8: usize = 16;
const R9: usize = 17;
const F1: usize = 18;
const F2: usize = 19;
const F3: usize = 20;
const F4: usize = 21;
const F6: usize = 23;
const F7: usize = 24;
const F8: usize = 25;
const F9: usize = 26;
const D1: usize = 27;
const D2: usize = 28;
const D3: usize = 29;
const D4: usize = 30;
const D6: usize = 32;
const D7: usize = 33;
const D8: usize = 34;
const D9: usize = 35;
const L1: usize = 36;
const L2: usize = 37;
const L3: usize = 38;
const L4: usize = 39;
const L6: usize = 41;
const L7: usize = 42;
const L8: usize = 43;
const L9: usize = 44;
const B1: usize = 45;
const B2: usize = 46;
const B3: usize = 47;
const B4: usize = 48;
const B6: usize = 50;
const B7: usize = 51;
const B8: usize = 52;
const B9: usize = 53;

#[rustfmt::skip]
const CORNER_FACELET: [[usize; 3]; N_CORNER] = [
    [U9, R1, F3], [U7, F1, L3], [U1, L1, B3], [U3, B1, R3],
    [D3, F9, R7], [D1, L9, F7], [D7, B9, L7], [D9, R9, B7],
];

#[rustfmt::skip]
const EDGE_FACELET: [[usize; 2]; N_EDGE] = [
    [U6, R2], [U8, F2], [U4, L2], [U2, B2], [D6, R8], [D2, F8],
    [D4, L8], [D8, B8], [F6, R4], [F4, L6], [B6, L4], [B4, R6],
];

#[rustfmt::skip]
const CORNER_COLOR: [[Color; 3]; N_CORNER] = {
    use Color::*;
    [
        [U, R, F], [U, F, L], [U, L, B], [U, B, R],
        [D, F, R], [D, L, F], [D, B, L], [D, R, B],
    ]
};

#[rustfmt::skip]
const EDGE_COLOR: [[Color; 2]; N_EDGE] = {
    use Color::*;
    [
        [U, R], [U, F], [U, L], [U, B], [D, R], [D, F],
        [D, L], [D, B], [F, R], [F, L], [B, L], [B, R],
    ]
};

impl Default for FaceCube {
    fn default() -> Self {
        let mut f = [Color::U; 54];
        for (i, c) in ALL_COLORS.iter().enumerate() {
            f[9 * i..9 * i + 9].fill(*c);
        }
        Self { f }
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.f {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for FaceCube {
    type Error = Error;

    /// Parse a facelet string, checking that every color occurs exactly nine times.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.chars().count() != 54 {
            return Err(Error::InvalidFaceletString);
        }
        let mut f = [Color::U; 54];
        let mut count = [0; N_FACE];
        for (i, c) in s.chars().enumerate() {
            let color = Color::try_from(c).map_err(|_| Error::InvalidFaceletString)?;
            f[i] = color;
            count[color as usize] += 1;
        }
        if count.iter().any(|&n| n != 9) {
            return Err(Error::InvalidFaceletString);
        }
        Ok(Self { f })
    }
}

impl TryFrom<&CubieCube> for FaceCube {
    type Error = Error;

    fn try_from(cc: &CubieCube) -> Result<Self, Self::Error> {
        let mut fc = FaceCube::default();
        for i in 0..N_CORNER {
            let j = cc.cp[i] as usize;
            let ori = cc.co[i] as usize;
            if ori > 2 {
                return Err(Error::InvalidCubieValue);
            }
            for k in 0..3 {
                fc.f[CORNER_FACELET[i][(k + ori) % 3]] = CORNER_COLOR[j][k];
            }
        }
        for i in 0..N_EDGE {
            let j = cc.ep[i] as usize;
            let ori = cc.eo[i] as usize;
            if ori > 1 {
                return Err(Error::InvalidCubieValue);
            }
            for k in 0..2 {
                fc.f[EDGE_FACELET[i][(k + ori) % 2]] = EDGE_COLOR[j][k];
            }
        }
        Ok(fc)
    }
}

impl TryFrom<&FaceCube> for CubieCube {
    type Error = Error;

    /// Identify every corner and edge cubie by its colors.
    ///
    /// Fails with `InvalidFaceletValue` if some position holds no existing cubie, and with the
    /// error of [CubieCube::verify] if the cubies do not form a reachable cube.
    fn try_from(fc: &FaceCube) -> Result<Self, Self::Error> {
        for (i, c) in ALL_COLORS.iter().enumerate() {
            if fc.f[9 * i + 4] != *c {
                return Err(Error::InvalidFaceletValue);
            }
        }
        let mut cc = CubieCube::default();
        for i in 0..N_CORNER {
            let fac = CORNER_FACELET[i];
            // the U or D colored facelet gives the orientation
            let ori = (0..3)
                .find(|&o| matches!(fc.f[fac[o]], Color::U | Color::D))
                .ok_or(Error::InvalidFaceletValue)?;
            let col1 = fc.f[fac[(ori + 1) % 3]];
            let col2 = fc.f[fac[(ori + 2) % 3]];
            let j = (0..N_CORNER)
                .find(|&j| CORNER_COLOR[j][1] == col1 && CORNER_COLOR[j][2] == col2)
                .ok_or(Error::InvalidFaceletValue)?;
            cc.cp[i] = ALL_CORNERS[j];
            cc.co[i] = ori as u8;
        }
        for i in 0..N_EDGE {
            let a = fc.f[EDGE_FACELET[i][0]];
            let b = fc.f[EDGE_FACELET[i][1]];
            let (j, ori) = (0..N_EDGE)
                .find_map(|j| {
                    if EDGE_COLOR[j] == [a, b] {
                        Some((j, 0))
                    } else if EDGE_COLOR[j] == [b, a] {
                        Some((j, 1))
                    } else {
                        None
                    }
                })
                .ok_or(Error::InvalidFaceletValue)?;
            cc.ep[i] = ALL_EDGES[j];
            cc.eo[i] = ori;
        }
        cc.verify()?;
        Ok(cc)
    }
}
