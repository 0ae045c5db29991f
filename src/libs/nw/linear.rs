use super::{best_of, Alignment, AlignmentModel, Direction, GAP, INDEL};
use crate::libs::error::{AlignError, Result};
use crate::libs::grid::Grid;
use crate::libs::sequence::Sequence;
use crate::libs::sub_matrix::SubstitutionMatrix;

/// Global alignment with a constant penalty per gap column.
///
/// ```
/// use nwalign::libs::nw::{AlignmentModel, LinearGap};
/// use nwalign::libs::sequence::Sequence;
/// use nwalign::libs::sub_matrix::SubstitutionMatrix;
///
/// let matrix = SubstitutionMatrix::simple(b"ACGT", 1, -1).unwrap();
/// let model = LinearGap::new(&matrix, -2.0);
///
/// let result = model
///     .execute(&Sequence::new("a", b"AC"), &Sequence::new("b", b"A"))
///     .unwrap();
/// assert_eq!(result.alignment.aligned_seq1(), b"AC");
/// assert_eq!(result.alignment.aligned_seq2(), b"A-");
/// assert_eq!(result.statistics.score, -1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LinearGap<'a> {
    matrix: &'a SubstitutionMatrix,
    gap: f64,
}

/// Filled score and traceback grids, `(m+1) x (n+1)`.
#[derive(Debug, Clone)]
pub struct LinearGrids {
    score: Grid<f64>,
    trace: Grid<Direction>,
}

impl LinearGrids {
    pub fn score(&self) -> &Grid<f64> {
        &self.score
    }

    pub fn trace(&self) -> &Grid<Direction> {
        &self.trace
    }

    /// The optimum global score, found in the bottom-right cell.
    pub fn optimum(&self) -> Result<f64> {
        self.score
            .get(self.score.nrows() - 1, self.score.ncols() - 1)
    }
}

impl<'a> LinearGap<'a> {
    pub fn new(matrix: &'a SubstitutionMatrix, gap: f64) -> Self {
        Self { matrix, gap }
    }

    /// `S[i][j] = max(S[i-1][j-1] + sub, S[i-1][j] + gap, S[i][j-1] + gap)`
    ///
    /// Ties resolve in that order: diagonal, up, left.
    pub fn fill(&self, seq1: &Sequence, seq2: &Sequence) -> Result<LinearGrids> {
        let nrows = seq1.len() + 1;
        let ncols = seq2.len() + 1;
        log::trace!("linear fill: {} x {}", nrows, ncols);

        let mut score = Grid::new(nrows, ncols, 0.0);
        let mut trace = Grid::new(nrows, ncols, Direction::Stop);

        for j in 1..ncols {
            score.set(0, j, j as f64 * self.gap)?;
            trace.set(0, j, Direction::Left)?;
        }
        for i in 1..nrows {
            score.set(i, 0, i as f64 * self.gap)?;
            trace.set(i, 0, Direction::Up)?;
        }

        for i in 1..nrows {
            let a = seq1.base(i - 1)?;
            for j in 1..ncols {
                let sub = self.matrix.get_score(a, seq2.base(j - 1)?)? as f64;
                let (idx, best) = best_of([
                    score.get(i - 1, j - 1)? + sub,
                    score.get(i - 1, j)? + self.gap,
                    score.get(i, j - 1)? + self.gap,
                ]);
                score.set(i, j, best)?;
                trace.set(
                    i,
                    j,
                    [Direction::Diagonal, Direction::Up, Direction::Left][idx],
                )?;
            }
        }

        Ok(LinearGrids { score, trace })
    }

    /// Walks the traceback grid from `(m, n)` back to `(0, 0)`.
    pub fn traceback(
        &self,
        grids: &LinearGrids,
        seq1: &Sequence,
        seq2: &Sequence,
    ) -> Result<Alignment> {
        let (mut i, mut j) = (seq1.len(), seq2.len());
        let mut aligned1 = Vec::with_capacity(i + j);
        let mut aligned2 = Vec::with_capacity(i + j);

        while i > 0 || j > 0 {
            match grids.trace.get(i, j)? {
                Direction::Diagonal => {
                    aligned1.push(seq1.base(i - 1)?);
                    aligned2.push(seq2.base(j - 1)?);
                    i -= 1;
                    j -= 1;
                }
                Direction::Up => {
                    aligned1.push(seq1.base(i - 1)?);
                    aligned2.push(GAP);
                    i -= 1;
                }
                Direction::Left => {
                    aligned1.push(GAP);
                    aligned2.push(seq2.base(j - 1)?);
                    j -= 1;
                }
                Direction::Stop => {
                    return Err(AlignError::Traceback {
                        row: i,
                        col: j,
                        message: "reached a stop cell before the origin".to_string(),
                    });
                }
            }
        }

        aligned1.reverse();
        aligned2.reverse();
        Alignment::new(aligned1, aligned2)
    }
}

impl AlignmentModel for LinearGap<'_> {
    fn align(&self, seq1: &Sequence, seq2: &Sequence) -> Result<(Alignment, f64)> {
        let grids = self.fill(seq1, seq2)?;
        let alignment = self.traceback(&grids, seq1, seq2)?;
        Ok((alignment, grids.optimum()?))
    }

    fn score_alignment(&self, alignment: &Alignment) -> Result<f64> {
        let mut score = 0.0;
        for (a, b, ann) in alignment.columns() {
            if ann == INDEL {
                score += self.gap;
            } else {
                score += self.matrix.get_score(a, b)? as f64;
            }
        }
        Ok(score)
    }
}
