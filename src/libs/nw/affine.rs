use super::{best_of, Alignment, AlignmentModel, Direction, GAP, INDEL};
use crate::libs::error::{AlignError, Result};
use crate::libs::grid::Grid;
use crate::libs::sequence::Sequence;
use crate::libs::sub_matrix::SubstitutionMatrix;

/// Score of a cell that no path can reach.
const DISALLOWED: f64 = f64::NEG_INFINITY;

/// The three Gotoh states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// `M`, the column pairs two residues
    Match,
    /// `I`, the column is a gap in sequence 1
    Insert,
    /// `D`, the column is a gap in sequence 2
    Delete,
}

/// A traceback cell: the move taken and the state it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub state: State,
    pub direction: Direction,
}

/// Global alignment with affine gaps: a run of `k` gap columns costs
/// `gap_open + (k - 1) * gap_extend`.
#[derive(Debug, Clone, Copy)]
pub struct AffineGap<'a> {
    matrix: &'a SubstitutionMatrix,
    gap_open: f64,
    gap_extend: f64,
}

/// The three score grids and their traceback grids, `(m+1) x (n+1)` each.
#[derive(Debug, Clone)]
pub struct AffineGrids {
    m: Grid<f64>,
    i: Grid<f64>,
    d: Grid<f64>,
    trace_m: Grid<Pointer>,
    trace_i: Grid<Pointer>,
    trace_d: Grid<Pointer>,
}

impl AffineGrids {
    fn new(nrows: usize, ncols: usize) -> Result<Self> {
        let mut grids = Self {
            m: Grid::new(nrows, ncols, DISALLOWED),
            i: Grid::new(nrows, ncols, DISALLOWED),
            d: Grid::new(nrows, ncols, DISALLOWED),
            trace_m: Grid::new(nrows, ncols, Self::stop(State::Match)),
            trace_i: Grid::new(nrows, ncols, Self::stop(State::Insert)),
            trace_d: Grid::new(nrows, ncols, Self::stop(State::Delete)),
        };

        // the first row only moves left, the first column only moves up
        for state in [State::Match, State::Insert, State::Delete] {
            let trace = grids.trace_mut(state);
            for j in 1..ncols {
                trace.set(0, j, Pointer { state, direction: Direction::Left })?;
            }
            for i in 1..nrows {
                trace.set(i, 0, Pointer { state, direction: Direction::Up })?;
            }
        }
        grids.m.set(0, 0, 0.0)?;

        Ok(grids)
    }

    fn stop(state: State) -> Pointer {
        Pointer {
            state,
            direction: Direction::Stop,
        }
    }

    pub fn score(&self, state: State) -> &Grid<f64> {
        match state {
            State::Match => &self.m,
            State::Insert => &self.i,
            State::Delete => &self.d,
        }
    }

    pub fn trace(&self, state: State) -> &Grid<Pointer> {
        match state {
            State::Match => &self.trace_m,
            State::Insert => &self.trace_i,
            State::Delete => &self.trace_d,
        }
    }

    fn trace_mut(&mut self, state: State) -> &mut Grid<Pointer> {
        match state {
            State::Match => &mut self.trace_m,
            State::Insert => &mut self.trace_i,
            State::Delete => &mut self.trace_d,
        }
    }

    /// The best state at the bottom-right cell and its score. Ties prefer
    /// `M`, then `I`, then `D`.
    pub fn best_end(&self) -> Result<(State, f64)> {
        let (row, col) = (self.m.nrows() - 1, self.m.ncols() - 1);
        let (idx, best) = best_of([
            self.m.get(row, col)?,
            self.i.get(row, col)?,
            self.d.get(row, col)?,
        ]);
        Ok(([State::Match, State::Insert, State::Delete][idx], best))
    }
}

impl<'a> AffineGap<'a> {
    pub fn new(matrix: &'a SubstitutionMatrix, gap_open: f64, gap_extend: f64) -> Self {
        Self {
            matrix,
            gap_open,
            gap_extend,
        }
    }

    /// Fills the `M`, `I` and `D` grids.
    ///
    /// ```text
    /// M[i][j] = sub(a_i, b_j) + max(M[i-1][j-1], I[i-1][j-1], D[i-1][j-1])
    /// I[i][j] = max(M[i][j-1] + open, I[i][j-1] + extend)
    /// D[i][j] = max(M[i-1][j] + open, D[i-1][j] + extend)
    /// ```
    ///
    /// `M` is reachable on its first row and column only at the origin; a
    /// leading gap of length `k` is `open + (k - 1) * extend` in `I` along
    /// the first row and in `D` down the first column.
    pub fn fill(&self, seq1: &Sequence, seq2: &Sequence) -> Result<AffineGrids> {
        let nrows = seq1.len() + 1;
        let ncols = seq2.len() + 1;
        log::trace!("affine fill: 3 x {} x {}", nrows, ncols);

        let mut g = AffineGrids::new(nrows, ncols)?;
        for j in 1..ncols {
            g.i.set(0, j, self.gap_open + (j - 1) as f64 * self.gap_extend)?;
        }
        for i in 1..nrows {
            g.d.set(i, 0, self.gap_open + (i - 1) as f64 * self.gap_extend)?;
        }

        for i in 1..nrows {
            let a = seq1.base(i - 1)?;
            for j in 1..ncols {
                let sub = self.matrix.get_score(a, seq2.base(j - 1)?)? as f64;

                let (idx, best) = best_of([
                    g.m.get(i - 1, j - 1)?,
                    g.i.get(i - 1, j - 1)?,
                    g.d.get(i - 1, j - 1)?,
                ]);
                g.m.set(i, j, best + sub)?;
                g.trace_m.set(
                    i,
                    j,
                    Pointer {
                        state: [State::Match, State::Insert, State::Delete][idx],
                        direction: Direction::Diagonal,
                    },
                )?;

                let (idx, best) = best_of([
                    g.m.get(i, j - 1)? + self.gap_open,
                    g.i.get(i, j - 1)? + self.gap_extend,
                ]);
                g.i.set(i, j, best)?;
                g.trace_i.set(
                    i,
                    j,
                    Pointer {
                        state: [State::Match, State::Insert][idx],
                        direction: Direction::Left,
                    },
                )?;

                let (idx, best) = best_of([
                    g.m.get(i - 1, j)? + self.gap_open,
                    g.d.get(i - 1, j)? + self.gap_extend,
                ]);
                g.d.set(i, j, best)?;
                g.trace_d.set(
                    i,
                    j,
                    Pointer {
                        state: [State::Match, State::Delete][idx],
                        direction: Direction::Up,
                    },
                )?;
            }
        }

        Ok(g)
    }

    /// Follows the pointers from the best end state at `(m, n)` to the
    /// origin.
    pub fn traceback(
        &self,
        grids: &AffineGrids,
        seq1: &Sequence,
        seq2: &Sequence,
    ) -> Result<Alignment> {
        let (mut i, mut j) = (seq1.len(), seq2.len());
        let (mut state, _) = grids.best_end()?;
        let mut aligned1 = Vec::with_capacity(i + j);
        let mut aligned2 = Vec::with_capacity(i + j);

        while i > 0 || j > 0 {
            let pointer = grids.trace(state).get(i, j)?;
            let stalled = |message: &str| AlignError::Traceback {
                row: i,
                col: j,
                message: format!("{:?} state: {}", state, message),
            };

            match pointer.direction {
                Direction::Diagonal => {
                    let (pi, pj) = i
                        .checked_sub(1)
                        .zip(j.checked_sub(1))
                        .ok_or_else(|| stalled("diagonal move off the grid"))?;
                    aligned1.push(seq1.base(pi)?);
                    aligned2.push(seq2.base(pj)?);
                    (i, j) = (pi, pj);
                }
                Direction::Up => {
                    let pi = i
                        .checked_sub(1)
                        .ok_or_else(|| stalled("up move off the grid"))?;
                    aligned1.push(seq1.base(pi)?);
                    aligned2.push(GAP);
                    i = pi;
                }
                Direction::Left => {
                    let pj = j
                        .checked_sub(1)
                        .ok_or_else(|| stalled("left move off the grid"))?;
                    aligned1.push(GAP);
                    aligned2.push(seq2.base(pj)?);
                    j = pj;
                }
                Direction::Stop => {
                    return Err(stalled("reached a stop cell before the origin"));
                }
            }
            state = pointer.state;
        }

        aligned1.reverse();
        aligned2.reverse();
        Alignment::new(aligned1, aligned2)
    }
}

impl AlignmentModel for AffineGap<'_> {
    fn align(&self, seq1: &Sequence, seq2: &Sequence) -> Result<(Alignment, f64)> {
        let grids = self.fill(seq1, seq2)?;
        let alignment = self.traceback(&grids, seq1, seq2)?;
        let (_, optimum) = grids.best_end()?;
        Ok((alignment, optimum))
    }

    /// Substitution scores, plus `open` for every gap run and `extend` for
    /// every further gap column.
    fn score_alignment(&self, alignment: &Alignment) -> Result<f64> {
        let mut score = 0.0;
        let mut gap_columns = 0usize;
        for (a, b, ann) in alignment.columns() {
            if ann == INDEL {
                gap_columns += 1;
            } else {
                score += self.matrix.get_score(a, b)? as f64;
            }
        }

        let runs = super::count_indels(alignment.annotation());
        score += runs as f64 * self.gap_open + (gap_columns - runs) as f64 * self.gap_extend;

        Ok(score)
    }
}
