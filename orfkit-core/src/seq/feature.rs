use crate::alphabets::dna;
use crate::error::{OrfError, OrfResult};
use crate::orf::location::{SequenceLocation, Strand};

/// A half-open interval on the forward (input) coordinates of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeatureLocation {
    start: usize,
    end: usize,
    strand: Strand,
}

impl FeatureLocation {
    pub fn new(start: usize, end: usize, strand: Strand) -> OrfResult<Self> {
        if start > end {
            return Err(OrfError::InvalidLocation { start, end });
        }
        Ok(Self { start, end, strand })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The same interval expressed on the other strand of a sequence of length `len`.
    pub fn reverse_complement(&self, len: usize) -> Self {
        debug_assert!(self.end <= len);
        let start = len.saturating_sub(self.end);
        let end = len.saturating_sub(self.start);
        let strand = match self.strand {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
        };
        Self { start, end, strand }
    }

    /// Reads the covered bases from the forward sequence, reverse-complemented
    /// for the minus strand.
    pub fn extract(&self, forward: &[u8]) -> OrfResult<Vec<u8>> {
        let slice = forward
            .get(self.start..self.end)
            .ok_or(OrfError::LocationOutOfBounds {
                from: self.start,
                to: self.end,
                len: forward.len(),
            })?;
        Ok(match self.strand {
            Strand::Plus => slice.to_vec(),
            Strand::Minus => dna::reverse_complement(slice),
        })
    }
}

impl SequenceLocation {
    /// Maps the location onto forward-strand coordinates of a sequence of
    /// length `seq_len`. Minus-strand offsets are mirrored.
    pub fn to_feature_location(&self, seq_len: usize) -> OrfResult<FeatureLocation> {
        if self.to > seq_len || self.to <= self.from {
            return Err(OrfError::LocationOutOfBounds {
                from: self.from,
                to: self.to,
                len: seq_len,
            });
        }
        let on_buffer = FeatureLocation {
            start: self.from,
            end: self.to,
            strand: Strand::Plus,
        };
        Ok(match self.strand {
            Strand::Plus => on_buffer,
            Strand::Minus => on_buffer.reverse_complement(seq_len),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_location_validation() {
        assert!(FeatureLocation::new(5, 2, Strand::Plus).is_err());
        assert!(FeatureLocation::new(2, 2, Strand::Minus).unwrap().is_empty());
    }

    #[test]
    fn feature_location_basics() {
        let loc = FeatureLocation::new(2, 5, Strand::Plus).unwrap();
        assert_eq!(loc.start(), 2);
        assert_eq!(loc.end(), 5);
        assert_eq!(loc.strand(), Strand::Plus);
        assert_eq!(loc.len(), 3);
        assert!(!loc.is_empty());
    }

    #[test]
    fn minus_strand_is_mirrored() {
        // reverse complement of CCCATGAAATAGGG is CCCTATTTCATGGG
        let loc = SequenceLocation::new(3, 12, Strand::Minus, false, false);
        let feature = loc.to_feature_location(14).unwrap();
        assert_eq!((feature.start(), feature.end()), (2, 11));
        assert_eq!(feature.strand(), Strand::Minus);
        assert_eq!(feature.extract(b"CCCATGAAATAGGG").unwrap(), b"TATTTCATG");
    }

    #[test]
    fn out_of_range_location() {
        let loc = SequenceLocation::new(3, 20, Strand::Plus, false, false);
        assert!(loc.to_feature_location(10).is_err());
        let feature = FeatureLocation::new(3, 20, Strand::Plus).unwrap();
        assert!(feature.extract(b"ACGT").is_err());
    }
}
