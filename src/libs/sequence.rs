use crate::libs::error::{AlignError, Result};
use anyhow::Context;

/// An immutable residue sequence read from one FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    residues: Vec<u8>,
}

impl Sequence {
    pub fn new(name: &str, residues: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            residues: residues.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Residue at the 0-based position `pos`.
    pub fn base(&self, pos: usize) -> Result<u8> {
        self.residues
            .get(pos)
            .copied()
            .ok_or(AlignError::PositionOutOfRange {
                pos,
                len: self.residues.len(),
            })
    }
}

/// Reads every record of a FASTA file, in file order.
///
/// Multi-line records are joined into one sequence. Records without any
/// residues are dropped, so they do not take part in pairing.
pub fn read_sequences(infile: &str) -> anyhow::Result<Vec<Sequence>> {
    let reader = crate::reader(infile)?;
    let mut fa_in = noodles_fasta::io::Reader::new(reader);

    let mut seqs = vec![];
    for result in fa_in.records() {
        let record = result.with_context(|| format!("malformed FASTA in {}", infile))?;
        let name = String::from_utf8(record.name().into())?;
        let residues: &[u8] = record.sequence().as_ref();

        if residues.is_empty() {
            log::warn!("{}: skipping empty record {}", infile, name);
            continue;
        }
        seqs.push(Sequence::new(&name, residues));
    }
    log::debug!("{}: read {} sequences", infile, seqs.len());

    Ok(seqs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sequence_base() {
        let seq = Sequence::new("s1", b"ACGT");
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.base(0).unwrap(), b'A');
        assert_eq!(seq.base(3).unwrap(), b'T');

        match seq.base(4) {
            Err(AlignError::PositionOutOfRange { pos, len }) => {
                assert_eq!((pos, len), (4, 4));
            }
            other => panic!("expected PositionOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_sequence_empty() {
        let seq = Sequence::new("empty", b"");
        assert!(seq.is_empty());
        assert!(seq.base(0).is_err());
    }

    #[test]
    fn test_read_sequences_multiline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.fa");
        fs::write(
            &path,
            ">first desc\nACGT\nTTGA\n>empty\n>second\nGG\nC\n",
        )
        .unwrap();

        let seqs = read_sequences(path.to_str().unwrap()).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0], Sequence::new("first", b"ACGTTTGA"));
        assert_eq!(seqs[1], Sequence::new("second", b"GGC"));
    }
}
