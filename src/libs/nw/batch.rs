use super::GapPenalty;
use crate::libs::error::AlignError;
use crate::libs::report;
use crate::libs::sequence::Sequence;
use crate::libs::sub_matrix::SubstitutionMatrix;
use anyhow::Context;
use std::io::Write;

/// Aligns `seqs1[i]` against `seqs2[i]` for every `i` and writes one report
/// per pair, numbered from 1. Returns the number of pairs aligned.
///
/// The first failing pair aborts the run.
pub fn align_batch(
    seqs1: &[Sequence],
    seqs2: &[Sequence],
    matrix: &SubstitutionMatrix,
    penalty: GapPenalty,
    writer: &mut dyn Write,
) -> anyhow::Result<usize> {
    if seqs1.len() != seqs2.len() {
        return Err(AlignError::BatchSize {
            left: seqs1.len(),
            right: seqs2.len(),
        }
        .into());
    }

    let model = penalty.model(matrix);
    log::debug!("{} pairs, {:?}", seqs1.len(), penalty);

    for (idx, (seq1, seq2)) in seqs1.iter().zip(seqs2).enumerate() {
        let num = idx + 1;
        log::info!(
            "Alignment #{}: {} ({}) vs {} ({})",
            num,
            seq1.name(),
            seq1.len(),
            seq2.name(),
            seq2.len()
        );

        let result = model
            .execute(seq1, seq2)
            .with_context(|| format!("failed to align pair #{}", num))?;
        log::debug!(
            "Alignment #{}: score={} length={}",
            num,
            result.statistics.score,
            result.statistics.length
        );

        writer.write_all(report::render(num, &result).as_bytes())?;
    }

    Ok(seqs1.len())
}
