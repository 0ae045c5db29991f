//! Needleman-Wunsch global alignment.
//!
//! Two gap models share one contract, [`AlignmentModel`]:
//!
//! - [`LinearGap`] charges a constant penalty for every gap column
//! - [`AffineGap`] charges an opening penalty for the first column of a gap
//!   run and an extension penalty for each further column
//!
//! Both fill their DP grids in row-major order, trace the optimal path back
//! to the origin and derive [`AlignmentStatistics`] from the finished
//! alignment.

pub mod affine;
pub mod batch;
pub mod linear;

pub use affine::{AffineGap, AffineGrids, Pointer, State};
pub use batch::align_batch;
pub use linear::{LinearGap, LinearGrids};

use crate::libs::error::{AlignError, Result};
use crate::libs::sequence::Sequence;
use crate::libs::sub_matrix::SubstitutionMatrix;
use itertools::Itertools;

/// Gap marker in aligned rows.
pub const GAP: u8 = b'-';

/// Annotation symbols.
pub const MATCH: u8 = b'|';
pub const MISMATCH: u8 = b'*';
pub const INDEL: u8 = b' ';

/// Largest difference tolerated between the DP optimum and the rescored
/// alignment.
pub const SCORE_TOLERANCE: f64 = 1e-6;

/// Move recorded in a traceback cell.
///
/// `Up` comes from `(i-1, j)` and consumes a residue of sequence 1 against a
/// gap; `Left` comes from `(i, j-1)` and consumes a residue of sequence 2
/// against a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Stop,
    Diagonal,
    Up,
    Left,
}

/// Gap penalties, selecting the gap model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GapPenalty {
    Linear { gap: f64 },
    Affine { open: f64, extend: f64 },
}

impl GapPenalty {
    pub fn model<'a>(&self, matrix: &'a SubstitutionMatrix) -> Box<dyn AlignmentModel + 'a> {
        match *self {
            GapPenalty::Linear { gap } => Box::new(LinearGap::new(matrix, gap)),
            GapPenalty::Affine { open, extend } => Box::new(AffineGap::new(matrix, open, extend)),
        }
    }
}

/// Two equal-length aligned rows and their annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    aligned_seq1: Vec<u8>,
    aligned_seq2: Vec<u8>,
    annotation: Vec<u8>,
}

impl Alignment {
    pub fn new(aligned_seq1: Vec<u8>, aligned_seq2: Vec<u8>) -> Result<Self> {
        if aligned_seq1.len() != aligned_seq2.len() {
            return Err(AlignError::LengthMismatch {
                top: aligned_seq1.len(),
                bottom: aligned_seq2.len(),
            });
        }
        let annotation = annotate(&aligned_seq1, &aligned_seq2);

        Ok(Self {
            aligned_seq1,
            aligned_seq2,
            annotation,
        })
    }

    pub fn aligned_seq1(&self) -> &[u8] {
        &self.aligned_seq1
    }

    pub fn aligned_seq2(&self) -> &[u8] {
        &self.aligned_seq2
    }

    pub fn annotation(&self) -> &[u8] {
        &self.annotation
    }

    pub fn len(&self) -> usize {
        self.annotation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotation.is_empty()
    }

    /// `(residue1, residue2, annotation)` for every column.
    pub fn columns(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        itertools::izip!(
            self.aligned_seq1.iter().copied(),
            self.aligned_seq2.iter().copied(),
            self.annotation.iter().copied()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentStatistics {
    pub matches: usize,
    pub percent_identity: u32,
    pub indels: usize,
    pub mean_indel_length: f64,
    pub length: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    pub alignment: Alignment,
    pub statistics: AlignmentStatistics,
}

/// The operations shared by both gap models.
///
/// Implementors supply the recurrence ([`align`](Self::align)) and the
/// matching column-wise rescoring; orchestration is provided.
pub trait AlignmentModel {
    /// Fills the DP grids and traces back the optimal alignment. Returns the
    /// alignment together with the optimum score at `(m, n)`.
    fn align(&self, seq1: &Sequence, seq2: &Sequence) -> Result<(Alignment, f64)>;

    /// Recomputes the score of a finished alignment from its columns.
    fn score_alignment(&self, alignment: &Alignment) -> Result<f64>;

    /// Aligns the pair and derives its statistics.
    ///
    /// Fails with [`AlignError::ScoreDisagreement`] if the rescored alignment
    /// does not reproduce the DP optimum, including when either is NaN or
    /// infinite.
    fn execute(&self, seq1: &Sequence, seq2: &Sequence) -> Result<AlignmentResult> {
        let (alignment, optimum) = self.align(seq1, seq2)?;
        let statistics = compute_statistics(self, seq1, seq2, &alignment)?;

        // NaN never compares as within tolerance
        if !((statistics.score - optimum).abs() <= SCORE_TOLERANCE) {
            return Err(AlignError::ScoreDisagreement {
                optimum,
                rescored: statistics.score,
            });
        }

        Ok(AlignmentResult {
            alignment,
            statistics,
        })
    }
}

/// Annotates each column: `|` identical, ` ` if either side is a gap, `*`
/// otherwise.
///
/// ```
/// use nwalign::libs::nw::annotate;
///
/// assert_eq!(annotate(b"AC-GT", b"AGTG-"), b"|* | ".to_vec());
/// ```
pub fn annotate(aligned_seq1: &[u8], aligned_seq2: &[u8]) -> Vec<u8> {
    aligned_seq1
        .iter()
        .zip(aligned_seq2)
        .map(|(&a, &b)| {
            if a == GAP || b == GAP {
                INDEL
            } else if a == b {
                MATCH
            } else {
                MISMATCH
            }
        })
        .collect()
}

/// Lengths of the maximal runs of gap columns, left to right.
fn indel_runs(annotation: &[u8]) -> Vec<usize> {
    annotation
        .iter()
        .chunk_by(|&&c| c == INDEL)
        .into_iter()
        .filter(|(is_indel, _)| *is_indel)
        .map(|(_, run)| run.count())
        .collect()
}

/// Number of indel events. A run of adjacent gap columns counts once.
pub fn count_indels(annotation: &[u8]) -> usize {
    indel_runs(annotation).len()
}

/// Mean length of the indel runs, or 0 when there are none.
pub fn mean_indel_length(annotation: &[u8]) -> f64 {
    let runs = indel_runs(annotation);
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().sum::<usize>() as f64 / runs.len() as f64
}

pub fn compute_statistics<M: AlignmentModel + ?Sized>(
    model: &M,
    seq1: &Sequence,
    seq2: &Sequence,
    alignment: &Alignment,
) -> Result<AlignmentStatistics> {
    let annotation = alignment.annotation();
    let matches = annotation.iter().filter(|&&c| c == MATCH).count();

    let mean_length = (seq1.len() + seq2.len()) as f64 / 2.0;
    let percent_identity = if mean_length > 0.0 {
        // ties go to the even neighbour
        (matches as f64 / mean_length * 100.0).round_ties_even() as u32
    } else {
        0
    };

    Ok(AlignmentStatistics {
        matches,
        percent_identity,
        indels: count_indels(annotation),
        mean_indel_length: mean_indel_length(annotation),
        length: annotation.len(),
        score: model.score_alignment(alignment)?,
    })
}

/// Index and value of the largest candidate. Earlier candidates win ties.
pub(crate) fn best_of<const N: usize>(candidates: [f64; N]) -> (usize, f64) {
    let mut best = (0, candidates[0]);
    for (idx, &value) in candidates.iter().enumerate().skip(1) {
        if value > best.1 {
            best = (idx, value);
        }
    }
    best
}
