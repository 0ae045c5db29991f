use crate::libs::error::{AlignError, Result};
use anyhow::Context;
use std::io::BufRead;

/// A substitution matrix for sequence alignment scoring.
///
/// Scores live in a 256x256 table indexed by the two residue bytes. Only
/// pairs drawn from the loaded alphabet have a score; looking up any other
/// pair is an error rather than a silent zero. The table need not be
/// symmetric.
#[derive(Debug, Clone)]
pub struct SubstitutionMatrix {
    alphabet: Vec<u8>,
    matrix: Vec<Option<i32>>,
}

impl SubstitutionMatrix {
    /// Builds a matrix from an alphabet and a row-major score table, where
    /// `scores[r][c]` is the score of `(alphabet[r], alphabet[c])`.
    pub fn from_table(alphabet: &[u8], scores: &[Vec<i32>]) -> Result<Self> {
        let mut matrix = Self::empty(alphabet)?;

        if scores.len() != alphabet.len() {
            return Err(AlignError::MatrixFormat(format!(
                "expected {} score rows, found {}",
                alphabet.len(),
                scores.len()
            )));
        }
        for (&r, row) in alphabet.iter().zip(scores) {
            if row.len() != alphabet.len() {
                return Err(AlignError::MatrixFormat(format!(
                    "row {} has {} scores, expected {}",
                    r as char,
                    row.len(),
                    alphabet.len()
                )));
            }
            for (&c, &score) in alphabet.iter().zip(row) {
                matrix.matrix[Self::idx(r, c)] = Some(score);
            }
        }

        Ok(matrix)
    }

    /// A uniform matrix: `match_score` on the diagonal, `mismatch` elsewhere.
    ///
    /// ```
    /// use nwalign::libs::sub_matrix::SubstitutionMatrix;
    ///
    /// let m = SubstitutionMatrix::simple(b"ACGT", 1, -1).unwrap();
    /// assert_eq!(m.get_score(b'A', b'A').unwrap(), 1);
    /// assert_eq!(m.get_score(b'A', b'G').unwrap(), -1);
    /// assert!(m.get_score(b'A', b'N').is_err());
    /// ```
    pub fn simple(alphabet: &[u8], match_score: i32, mismatch: i32) -> Result<Self> {
        let scores: Vec<Vec<i32>> = alphabet
            .iter()
            .map(|r| {
                alphabet
                    .iter()
                    .map(|c| if r == c { match_score } else { mismatch })
                    .collect()
            })
            .collect();
        Self::from_table(alphabet, &scores)
    }

    /// Loads a whitespace-delimited matrix file.
    ///
    /// The first content line lists the alphabet (column symbols). Each
    /// following line starts with a row symbol followed by one integer per
    /// column. Blank lines and lines starting with '#' are skipped.
    ///
    /// ```text
    ///    A  C  G  T
    /// A  1 -1 -1 -1
    /// C -1  1 -1 -1
    /// G -1 -1  1 -1
    /// T -1 -1 -1  1
    /// ```
    pub fn from_file(infile: &str) -> anyhow::Result<Self> {
        let reader = crate::reader(infile)?;
        let matrix = Self::from_reader(reader)
            .with_context(|| format!("failed to load substitution matrix {}", infile))?;
        Ok(matrix)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut matrix: Option<Self> = None;
        let mut seen_rows: Vec<u8> = vec![];

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            let at_line = |message: String| {
                AlignError::MatrixFormat(format!("line {}: {}", line_no, message))
            };

            let m = match matrix.as_mut() {
                Some(m) => m,
                None => {
                    let alphabet = Self::parse_symbols(&parts).map_err(at_line)?;
                    matrix = Some(Self::empty(&alphabet)?);
                    continue;
                }
            };

            let row = Self::parse_symbols(&parts[..1]).map_err(at_line)?[0];
            if !m.alphabet.contains(&row) {
                return Err(at_line(format!(
                    "row symbol {} is not in the alphabet",
                    row as char
                )));
            }
            if seen_rows.contains(&row) {
                return Err(at_line(format!("row symbol {} appears twice", row as char)));
            }
            if parts.len() - 1 != m.alphabet.len() {
                return Err(at_line(format!(
                    "row {} has {} scores, expected {}",
                    row as char,
                    parts.len() - 1,
                    m.alphabet.len()
                )));
            }

            for (j, field) in parts[1..].iter().enumerate() {
                let score = field
                    .parse::<i32>()
                    .map_err(|_| at_line(format!("invalid score {:?}", field)))?;
                let col = m.alphabet[j];
                m.matrix[Self::idx(row, col)] = Some(score);
            }
            seen_rows.push(row);
        }

        let matrix = matrix.ok_or_else(|| {
            AlignError::MatrixFormat("no alphabet header found".to_string())
        })?;
        if seen_rows.len() != matrix.alphabet.len() {
            let missing: String = matrix
                .alphabet
                .iter()
                .filter(|b| !seen_rows.contains(b))
                .map(|&b| b as char)
                .collect();
            return Err(AlignError::MatrixFormat(format!(
                "missing rows for {}",
                missing
            )));
        }

        Ok(matrix)
    }

    /// Get the substitution score for two residues.
    pub fn get_score(&self, a: u8, b: u8) -> Result<i32> {
        self.matrix[Self::idx(a, b)].ok_or(AlignError::MissingPair {
            a: a as char,
            b: b as char,
        })
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    /// All `(row, col, score)` entries in alphabet order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, u8, i32)> + '_ {
        self.alphabet.iter().flat_map(move |&r| {
            self.alphabet
                .iter()
                .filter_map(move |&c| self.matrix[Self::idx(r, c)].map(|s| (r, c, s)))
        })
    }

    fn empty(alphabet: &[u8]) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(AlignError::MatrixFormat("empty alphabet".to_string()));
        }
        for (i, b) in alphabet.iter().enumerate() {
            if alphabet[..i].contains(b) {
                return Err(AlignError::MatrixFormat(format!(
                    "symbol {} appears twice in the alphabet",
                    *b as char
                )));
            }
        }

        Ok(Self {
            alphabet: alphabet.to_vec(),
            matrix: vec![None; 256 * 256],
        })
    }

    fn parse_symbols(parts: &[&str]) -> std::result::Result<Vec<u8>, String> {
        parts
            .iter()
            .map(|s| match s.as_bytes() {
                [b] => Ok(*b),
                _ => Err(format!("expected a single-character symbol, found {:?}", s)),
            })
            .collect()
    }

    fn idx(a: u8, b: u8) -> usize {
        (a as usize) * 256 + (b as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_simple_matrix() {
        let m = SubstitutionMatrix::simple(b"AC", 2, -3).unwrap();
        assert_eq!(m.alphabet(), b"AC");
        assert_eq!(m.get_score(b'A', b'A').unwrap(), 2);
        assert_eq!(m.get_score(b'C', b'A').unwrap(), -3);
        assert_eq!(m.entries().count(), 4);
    }

    #[test]
    fn test_missing_pair() {
        let m = SubstitutionMatrix::simple(b"ACGT", 1, -1).unwrap();
        match m.get_score(b'a', b'C') {
            Err(AlignError::MissingPair { a, b }) => assert_eq!((a, b), ('a', 'C')),
            other => panic!("expected MissingPair, got {:?}", other),
        }
    }

    #[test]
    fn test_from_reader_asymmetric() {
        let text = "# toy matrix\n\n   A  C\nA  5 -2\nC -7  4\n";
        let m = SubstitutionMatrix::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(m.get_score(b'A', b'C').unwrap(), -2);
        assert_eq!(m.get_score(b'C', b'A').unwrap(), -7);
        assert_eq!(m.get_score(b'C', b'C').unwrap(), 4);

        let entries: Vec<_> = m.entries().collect();
        assert_eq!(
            entries,
            vec![(b'A', b'A', 5), (b'A', b'C', -2), (b'C', b'A', -7), (b'C', b'C', 4)]
        );
    }

    #[test]
    fn test_from_reader_row_order() {
        // Rows are keyed by their own symbol, not by position
        let text = "A C\nC 0 9\nA 8 1\n";
        let m = SubstitutionMatrix::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(m.get_score(b'A', b'A').unwrap(), 8);
        assert_eq!(m.get_score(b'C', b'C').unwrap(), 9);
    }

    #[test]
    fn test_from_reader_errors() {
        let cases = [
            ("", "no alphabet header"),
            ("A C\nA 1\n", "row A has 1 scores"),
            ("A C\nA 1 x\n", "invalid score"),
            ("A C\nG 1 1\n", "not in the alphabet"),
            ("A C\nA 1 1\nA 1 1\n", "appears twice"),
            ("A C\nA 1 1\n", "missing rows for C"),
            ("A A\nA 1 1\n", "appears twice in the alphabet"),
            ("AC GT\n", "single-character symbol"),
        ];
        for (text, expected) in cases {
            let err = SubstitutionMatrix::from_reader(Cursor::new(text))
                .err()
                .unwrap();
            assert!(
                err.to_string().contains(expected),
                "{:?}: {} does not mention {}",
                text,
                err,
                expected
            );
        }
    }

    #[test]
    fn test_from_table_shape() {
        assert!(SubstitutionMatrix::from_table(b"AC", &[vec![1, 0]]).is_err());
        assert!(SubstitutionMatrix::from_table(b"AC", &[vec![1, 0], vec![0]]).is_err());
        assert!(SubstitutionMatrix::from_table(b"", &[]).is_err());
    }
}
