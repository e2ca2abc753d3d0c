//! A module providing the piece-level state of the Rubik's Cube and the face
//! turns that act on it.
//!
//! The state is represented by four vectors: corner permutation, corner
//! orientation, edge permutation, and edge orientation. Slot `i` of a
//! permutation vector holds the piece whose home slot is the stored value.

use std::{
    fmt::{self, Display},
    ops::Deref,
    str::FromStr,
};

use itertools::Itertools;

use crate::error::BldError;

pub const EDGES: usize = 12;
pub const CORNERS: usize = 8;

/// An enum for the faces of the Rubik's Cube.
///
/// - U: top face
/// - D: bottom face
/// - F: front face
/// - B: back face
/// - R: right face
/// - L: left face
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Face {
    U,
    D,
    F,
    B,
    R,
    L,
}

impl Face {
    pub const ALL: [Self; 6] = [Face::U, Face::D, Face::F, Face::B, Face::R, Face::L];

    fn from_char(c: char) -> Option<Self> {
        match c {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            'R' => Some(Face::R),
            'L' => Some(Face::L),
            _ => None,
        }
    }

    /// The face on the other side of the cube. A face and its opposite turn
    /// independently of each other.
    pub fn opposite(self) -> Self {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
            Face::R => Face::L,
            Face::L => Face::R,
        }
    }

    fn turn(self) -> &'static FaceTurn {
        &FACE_TURNS[self as usize]
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Represents the direction which to turn a face. `Prime` represents
/// a counter-clockwise rotation of a face, and `Double` represents
/// a 180 degree rotation of a face.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Direction {
    Normal,
    Prime,
    Double,
}

impl Direction {
    /// The number of clockwise quarter turns this direction amounts to.
    pub fn quarter_turns(self) -> usize {
        match self {
            Direction::Normal => 1,
            Direction::Double => 2,
            Direction::Prime => 3,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Normal => write!(f, ""),
            Direction::Prime => write!(f, "'"),
            Direction::Double => write!(f, "2"),
        }
    }
}

/// An instantiation of a certain face equipped with a direction.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct MoveInstance {
    pub face: Face,
    pub dir: Direction,
}

impl MoveInstance {
    pub fn new(face: Face, dir: Direction) -> Self {
        Self { face, dir }
    }

    #[must_use]
    pub fn invert(&self) -> Self {
        Self {
            face: self.face,
            dir: match self.dir {
                Direction::Normal => Direction::Prime,
                Direction::Prime => Direction::Normal,
                Direction::Double => Direction::Double,
            },
        }
    }
}

impl FromStr for MoveInstance {
    type Err = BldError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || BldError::InvalidMoveToken(token.to_owned());

        let mut chars = token.chars();
        let face = chars.next().and_then(Face::from_char).ok_or_else(invalid)?;
        let dir = match chars.as_str() {
            "" => Direction::Normal,
            "2" => Direction::Double,
            "'" => Direction::Prime,
            _ => return Err(invalid()),
        };

        Ok(MoveInstance { face, dir })
    }
}

impl Display for MoveInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.dir)
    }
}

/// A shorthand macro that can be used to construct `MoveInstance`s.
///
/// ```
/// use bld_core::cube::*;
/// use bld_core::cube_move;
///
/// let r_prime: MoveInstance = cube_move!(R, Prime);
/// let u2: MoveInstance = cube_move!(U, Double);
/// assert_eq!(r_prime.to_string(), "R'");
/// assert_eq!(u2.to_string(), "U2");
/// ```
#[macro_export]
macro_rules! cube_move {
    ($face: ident, $dir:ident) => {{
        MoveInstance {
            face: Face::$face,
            dir: Direction::$dir,
        }
    }};
}

/// A vector of all allowed moves on a Rubik's Cube.
pub const ALL_MOVES: [MoveInstance; 18] = [
    cube_move!(U, Normal),
    cube_move!(U, Prime),
    cube_move!(U, Double),
    cube_move!(D, Normal),
    cube_move!(D, Prime),
    cube_move!(D, Double),
    cube_move!(F, Normal),
    cube_move!(F, Prime),
    cube_move!(F, Double),
    cube_move!(B, Normal),
    cube_move!(B, Prime),
    cube_move!(B, Double),
    cube_move!(R, Normal),
    cube_move!(R, Prime),
    cube_move!(R, Double),
    cube_move!(L, Normal),
    cube_move!(L, Prime),
    cube_move!(L, Double),
];

/// A struct representing sequences of moves, such as scrambles.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct MoveSequence(Vec<MoveInstance>);

impl MoveSequence {
    pub fn new(moves: Vec<MoveInstance>) -> Self {
        Self(moves)
    }

    #[must_use]
    pub fn invert(&self) -> Self {
        MoveSequence(self.iter().rev().map(MoveInstance::invert).collect())
    }
}

impl FromStr for MoveSequence {
    type Err = BldError;

    /// Parses whitespace-separated move tokens, failing on the first token
    /// that is not one of the 18 face turns.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(MoveSequence)
    }
}

impl Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().join(" "))
    }
}

impl Deref for MoveSequence {
    type Target = Vec<MoveInstance>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One clockwise quarter turn of a face.
///
/// Cycles are in goes-to order: the piece in `cycle[k]` moves to
/// `cycle[k + 1]`. `corner_twist[k]` is added to the orientation of the piece
/// that lands in `corner_cycle[k]`.
struct FaceTurn {
    corner_cycle: [u8; 4],
    corner_twist: [u8; 4],
    edge_cycle: [u8; 4],
    edge_flip: u8,
}

// Indexed by `Face as usize`. Twists are mod 3, so 2 is a counter-clockwise
// twist.
static FACE_TURNS: [FaceTurn; 6] = [
    // U: UBL UBR UFR UFL / UF UL UB UR
    FaceTurn {
        corner_cycle: [0, 1, 2, 3],
        corner_twist: [0, 0, 0, 0],
        edge_cycle: [0, 1, 2, 3],
        edge_flip: 0,
    },
    // D: DFL DFR DBR DBL / DF DR DB DL
    FaceTurn {
        corner_cycle: [4, 5, 6, 7],
        corner_twist: [0, 0, 0, 0],
        edge_cycle: [8, 11, 10, 9],
        edge_flip: 0,
    },
    // F: UFR DFR DFL UFL / UF FR DF FL
    FaceTurn {
        corner_cycle: [2, 5, 4, 3],
        corner_twist: [1, 2, 1, 2],
        edge_cycle: [0, 7, 8, 4],
        edge_flip: 1,
    },
    // B: UBL DBL DBR UBR / UB BL DB BR
    FaceTurn {
        corner_cycle: [0, 7, 6, 1],
        corner_twist: [1, 2, 1, 2],
        edge_cycle: [2, 5, 10, 6],
        edge_flip: 1,
    },
    // R: UBR DBR DFR UFR / UR BR DR FR
    FaceTurn {
        corner_cycle: [1, 6, 5, 2],
        corner_twist: [1, 2, 1, 2],
        edge_cycle: [3, 6, 11, 7],
        edge_flip: 0,
    },
    // L: UBL UFL DFL DBL / UL FL DL BL
    FaceTurn {
        corner_cycle: [0, 3, 4, 7],
        corner_twist: [2, 1, 2, 1],
        edge_cycle: [1, 4, 9, 5],
        edge_flip: 0,
    },
];

/// Moves the pieces along a 4-cycle, carrying their orientation with them and
/// adding `twist[k]` to whatever lands in `cycle[k]`.
fn cycle_pieces(
    perm: &mut [u8],
    ori: &mut [u8],
    cycle: &[u8; 4],
    twist: &[u8; 4],
    orientation_count: u8,
) {
    let last = usize::from(cycle[3]);
    let (carried_perm, carried_ori) = (perm[last], ori[last]);

    for k in (1..4).rev() {
        let from = usize::from(cycle[k - 1]);
        let to = usize::from(cycle[k]);
        perm[to] = perm[from];
        ori[to] = (ori[from] + twist[k]) % orientation_count;
    }

    let first = usize::from(cycle[0]);
    perm[first] = carried_perm;
    ori[first] = (carried_ori + twist[0]) % orientation_count;
}

fn is_permutation(perm: &[u8]) -> bool {
    let mut seen = 0_u16;
    for &piece in perm {
        if usize::from(piece) >= perm.len() || seen & (1 << piece) != 0 {
            return false;
        }
        seen |= 1 << piece;
    }
    true
}

pub(crate) fn is_identity(perm: &[u8]) -> bool {
    perm.iter().enumerate().all(|(i, &piece)| usize::from(piece) == i)
}

/// The underlying struct for representing a configuration of the Rubik's Cube.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CubeState {
    cp: [u8; CORNERS],
    co: [u8; CORNERS],
    ep: [u8; EDGES],
    eo: [u8; EDGES],
}

impl Default for CubeState {
    fn default() -> CubeState {
        CubeState {
            cp: const {
                let mut arr = [0; CORNERS];
                let mut i = 0;
                while i < CORNERS {
                    arr[i] = i as u8;
                    i += 1;
                }
                arr
            },
            co: [0; CORNERS],
            ep: const {
                let mut arr = [0; EDGES];
                let mut i = 0;
                while i < EDGES {
                    arr[i] = i as u8;
                    i += 1;
                }
                arr
            },
            eo: [0; EDGES],
        }
    }
}

impl CubeState {
    /// The solved cube.
    pub fn solved() -> Self {
        Self::default()
    }

    /// Builds a state from raw vectors, checking that both permutations are
    /// permutations and that orientations are in range. Orientation sums are
    /// not checked, so unreachable states are accepted.
    pub fn from_parts(
        cp: [u8; CORNERS],
        co: [u8; CORNERS],
        ep: [u8; EDGES],
        eo: [u8; EDGES],
    ) -> Result<Self, BldError> {
        if !is_permutation(&cp) {
            return Err(BldError::InvalidCubeState(
                "corner permutation is not a permutation of 0..8",
            ));
        }
        if !is_permutation(&ep) {
            return Err(BldError::InvalidCubeState(
                "edge permutation is not a permutation of 0..12",
            ));
        }
        if co.iter().any(|&o| o >= 3) {
            return Err(BldError::InvalidCubeState(
                "corner orientation values must be 0, 1, or 2",
            ));
        }
        if eo.iter().any(|&o| o >= 2) {
            return Err(BldError::InvalidCubeState(
                "edge orientation values must be 0 or 1",
            ));
        }
        Ok(CubeState { cp, co, ep, eo })
    }

    pub fn corner_permutation(&self) -> &[u8; CORNERS] {
        &self.cp
    }

    pub fn corner_orientation(&self) -> &[u8; CORNERS] {
        &self.co
    }

    pub fn edge_permutation(&self) -> &[u8; EDGES] {
        &self.ep
    }

    pub fn edge_orientation(&self) -> &[u8; EDGES] {
        &self.eo
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::solved()
    }

    /// Applies one clockwise quarter turn of `face`.
    pub fn apply_face_turn(&mut self, face: Face) {
        let turn = face.turn();
        cycle_pieces(
            &mut self.cp,
            &mut self.co,
            &turn.corner_cycle,
            &turn.corner_twist,
            3,
        );
        cycle_pieces(
            &mut self.ep,
            &mut self.eo,
            &turn.edge_cycle,
            &[turn.edge_flip; 4],
            2,
        );
    }

    /// Applies a move to a Rubik's Cube configuration.
    pub fn apply_move(&mut self, m: MoveInstance) {
        for _ in 0..m.dir.quarter_turns() {
            self.apply_face_turn(m.face);
        }
    }

    /// Applies a sequence of moves, in order.
    pub fn apply_moves(&mut self, moves: &MoveSequence) {
        for &m in moves.iter() {
            self.apply_move(m);
        }
    }

    /// Parses and applies a scramble. Nothing is applied if any token fails
    /// to parse.
    pub fn apply_scramble(&mut self, scramble: &str) -> Result<(), BldError> {
        let moves: MoveSequence = scramble.parse()?;
        self.apply_moves(&moves);
        Ok(())
    }
}
