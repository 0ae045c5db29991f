use crate::libs::nw::AlignmentResult;

/// Columns per block of aligned output.
pub const BLOCK_WIDTH: usize = 60;

/// Renders the textual report of the `num`-th alignment.
///
/// ```
/// use nwalign::libs::nw::{AlignmentModel, LinearGap};
/// use nwalign::libs::report::render;
/// use nwalign::libs::sequence::Sequence;
/// use nwalign::libs::sub_matrix::SubstitutionMatrix;
///
/// let matrix = SubstitutionMatrix::simple(b"ACGT", 1, -1).unwrap();
/// let result = LinearGap::new(&matrix, -2.0)
///     .execute(&Sequence::new("a", b"AC"), &Sequence::new("b", b"AG"))
///     .unwrap();
///
/// let text = render(1, &result);
/// assert!(text.starts_with("Alignment #1:\n\nSequence #1: seq1A\n"));
/// assert!(text.ends_with("AC\n|*\nAG\n\n"));
/// ```
pub fn render(num: usize, result: &AlignmentResult) -> String {
    let stats = &result.statistics;
    let alignment = &result.alignment;

    let mut out = String::new();
    out += &format!("Alignment #{}:\n\n", num);
    out += &format!("Sequence #1: seq{}A\n", num);
    out += &format!("Sequence #2: seq{}B\n", num);
    out += &format!("Matches: {}\n", stats.matches);
    out += &format!("Percent identity: {}%\n", stats.percent_identity);
    out += &format!(
        "Indels: number={} mean length={:.1}\n",
        stats.indels, stats.mean_indel_length
    );
    out += &format!("Alignment length: {}\n", stats.length);
    out += &format!("Score={:.1}\n\n", stats.score);

    for (top, ann, bottom) in itertools::izip!(
        alignment.aligned_seq1().chunks(BLOCK_WIDTH),
        alignment.annotation().chunks(BLOCK_WIDTH),
        alignment.aligned_seq2().chunks(BLOCK_WIDTH)
    ) {
        for line in [top, ann, bottom] {
            out.push_str(&String::from_utf8_lossy(line));
            out.push('\n');
        }
        out.push('\n');
    }

    out
}
