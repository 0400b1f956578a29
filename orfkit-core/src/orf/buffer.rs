use crate::alphabets::dna;
use crate::error::{OrfError, OrfResult};
use crate::orf::location::Strand;

/// Padding byte written past the logical end of both buffers. Normalization
/// clears bit 5 of every input byte and the complement table never produces
/// it, so it cannot occur inside a stored sequence.
pub const SENTINEL: u8 = 0xFF;

/// Bytes of sentinel padding kept after the logical end, one 128-bit register.
/// The scanner reads at most six bytes from the last codon position.
pub const LOOKAHEAD: usize = 16;

pub(crate) const CODON: usize = 3;

const INITIAL_CAPACITY: usize = 32_000;

/// Forward sequence and reverse complement, both sentinel-padded.
#[derive(Clone, Debug)]
pub struct SequenceBuffers {
    forward: Vec<u8>,
    reverse_complement: Vec<u8>,
    len: usize,
}

impl Default for SequenceBuffers {
    fn default() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }
}

impl SequenceBuffers {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: vec![SENTINEL; capacity + LOOKAHEAD],
            reverse_complement: vec![SENTINEL; capacity + LOOKAHEAD],
            len: 0,
        }
    }

    /// Replaces both buffers with `seq` and its reverse complement.
    ///
    /// On error the logical length is reset to zero, so nothing derived from
    /// the rejected sequence remains observable.
    pub fn set(&mut self, seq: &[u8]) -> OrfResult<()> {
        self.len = 0;
        let n = seq.len();
        if n < CODON {
            return Err(OrfError::SequenceTooShort { len: n });
        }

        let needed = n + LOOKAHEAD;
        if needed > self.forward.len() {
            self.forward.resize(needed, SENTINEL);
            self.reverse_complement.resize(needed, SENTINEL);
        }

        for (pos, (dst, &src)) in self.forward[..n].iter_mut().zip(seq).enumerate() {
            let base = dna::normalize(src);
            if !dna::has_complement(base) {
                return Err(OrfError::InvalidBase {
                    ch: src as char,
                    pos,
                });
            }
            *dst = base;
        }

        let forward = &self.forward[..n];
        for (dst, &base) in self.reverse_complement[..n]
            .iter_mut()
            .zip(forward.iter().rev())
        {
            *dst = dna::complement(base);
        }

        self.forward[n..needed].fill(SENTINEL);
        self.reverse_complement[n..needed].fill(SENTINEL);
        self.len = n;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated bytes per buffer, padding included.
    pub fn capacity(&self) -> usize {
        self.forward.len()
    }

    /// The logical sequence of one strand.
    pub fn strand(&self, strand: Strand) -> &[u8] {
        &self.padded(strand)[..self.len]
    }

    /// The logical sequence followed by exactly `LOOKAHEAD` sentinel bytes.
    pub(crate) fn padded(&self, strand: Strand) -> &[u8] {
        let buf = match strand {
            Strand::Plus => &self.forward,
            Strand::Minus => &self.reverse_complement,
        };
        &buf[..self.len + LOOKAHEAD]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_rna() {
        let mut buffers = SequenceBuffers::default();
        buffers.set(b"augcUn").unwrap();
        assert_eq!(buffers.strand(Strand::Plus), b"ATGCTN");
        assert_eq!(buffers.strand(Strand::Minus), b"NAGCAT");
    }

    #[test]
    fn pads_with_sentinel() {
        let mut buffers = SequenceBuffers::default();
        buffers.set(b"ACGTA").unwrap();
        for strand in [Strand::Plus, Strand::Minus] {
            let padded = buffers.padded(strand);
            assert_eq!(padded.len(), 5 + LOOKAHEAD);
            assert!(padded[5..].iter().all(|&b| b == SENTINEL));
        }
    }

    #[test]
    fn rejects_short_sequence() {
        let mut buffers = SequenceBuffers::default();
        assert!(matches!(
            buffers.set(b"AC"),
            Err(OrfError::SequenceTooShort { len: 2 })
        ));
        assert!(buffers.is_empty());
    }

    #[test]
    fn rejects_invalid_base_and_clears_state() {
        let mut buffers = SequenceBuffers::default();
        buffers.set(b"ATGAAATAG").unwrap();
        match buffers.set(b"ATG-AATAG") {
            Err(OrfError::InvalidBase { ch: '-', pos: 3 }) => {}
            other => panic!("expected invalid base, got {other:?}"),
        }
        assert_eq!(buffers.len(), 0);
        assert!(buffers.strand(Strand::Plus).is_empty());
    }

    #[test]
    fn grows_but_never_shrinks() {
        let mut buffers = SequenceBuffers::with_capacity(4);
        assert_eq!(buffers.capacity(), 4 + LOOKAHEAD);
        let long = b"ACGT".repeat(10);
        buffers.set(&long).unwrap();
        assert_eq!(buffers.capacity(), 40 + LOOKAHEAD);
        buffers.set(b"ACG").unwrap();
        assert_eq!(buffers.capacity(), 40 + LOOKAHEAD);
        assert_eq!(buffers.strand(Strand::Plus), b"ACG");
        assert!(buffers.padded(Strand::Plus)[3..]
            .iter()
            .all(|&b| b == SENTINEL));
    }
}
