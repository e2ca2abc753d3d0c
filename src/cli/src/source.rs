//! Where candidate scrambles come from: a random-move generator, or lines of
//! text from a file or stdin.

use std::{
    convert::Infallible,
    io::{self, BufRead, Lines},
};

use bld_core::{
    MoveSequence, ScrambleSource,
    cube::{ALL_MOVES, MoveInstance},
};

/// Random-move scrambles that never turn the same face twice in a row and
/// never turn the same axis three times in a row.
pub struct RandomMoveSource {
    rng: fastrand::Rng,
    length: usize,
}

impl RandomMoveSource {
    pub fn new(rng: fastrand::Rng, length: usize) -> Self {
        RandomMoveSource { rng, length }
    }

    fn allowed_after(previous: &[MoveInstance], candidate: MoveInstance) -> bool {
        match previous {
            // "R L R" is "R2 L", so the whole axis is blocked
            [.., a, b] if a.face == b.face.opposite() => {
                candidate.face != a.face && candidate.face != b.face
            }
            [.., b] => candidate.face != b.face,
            [] => true,
        }
    }

    pub fn scramble(&mut self) -> MoveSequence {
        let mut moves = Vec::with_capacity(self.length);
        while moves.len() < self.length {
            let candidate = ALL_MOVES[self.rng.usize(..ALL_MOVES.len())];
            if Self::allowed_after(&moves, candidate) {
                moves.push(candidate);
            }
        }
        MoveSequence::new(moves)
    }
}

impl ScrambleSource for RandomMoveSource {
    type Error = Infallible;

    fn fetch(&mut self, count: usize) -> Result<Vec<String>, Self::Error> {
        Ok((0..count).map(|_| self.scramble().to_string()).collect())
    }
}

/// One scramble per line. Blank lines are skipped, and list numbering such
/// as `12. ` or `3) ` in front of a scramble is dropped.
pub struct LineSource<R> {
    lines: Lines<R>,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource {
            lines: reader.lines(),
        }
    }
}

fn strip_numbering(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return line;
    }
    rest.strip_prefix(['.', ')'])
        .map_or(line, str::trim_start)
}

impl<R: BufRead> ScrambleSource for LineSource<R> {
    type Error = io::Error;

    fn fetch(&mut self, count: usize) -> Result<Vec<String>, Self::Error> {
        let mut scrambles = Vec::with_capacity(count);
        while scrambles.len() < count {
            let Some(line) = self.lines.next() else {
                break;
            };
            let line = line?;
            let scramble = strip_numbering(line.trim());
            if !scramble.is_empty() {
                scrambles.push(scramble.to_owned());
            }
        }
        Ok(scrambles)
    }
}
