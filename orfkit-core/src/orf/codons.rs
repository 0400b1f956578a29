use crate::error::{CodonKind, OrfError, OrfResult};
use crate::genetic_code::Codon;

#[cfg(feature = "simd")]
use wide::{i32x4, CmpEq};

/// Hard limit imposed by the two-register packed layout.
pub const MAX_CODONS: usize = 8;

/// Codons per register.
const LANES: usize = 4;

/// Keeps the three codon bytes of a little-endian 4-byte load.
const CODON_MASK: u32 = 0x00FF_FFFF;

/// Value of a register lane with no codon. Its top byte is set, which a
/// masked codon key never has.
#[cfg(feature = "simd")]
const EMPTY_LANE: i32 = -1;

/// Eight 4-byte slots, each holding one codon in its low three bytes.
/// Unused trailing slots stay zero; only the first `count` slots are compared.
#[repr(C, align(32))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PackedCodons([u32; MAX_CODONS]);

/// A fixed-capacity codon set supporting constant-time membership tests.
#[derive(Clone, Debug)]
pub struct CodonSet {
    kind: CodonKind,
    packed: PackedCodons,
    count: usize,
    #[cfg(feature = "simd")]
    hi: i32x4,
    #[cfg(feature = "simd")]
    lo: i32x4,
}

impl CodonSet {
    pub fn new(kind: CodonKind, codons: &[Codon]) -> OrfResult<Self> {
        if codons.is_empty() {
            return Err(OrfError::EmptyCodonSet { kind });
        }
        if codons.len() > MAX_CODONS {
            return Err(OrfError::TooManyCodons {
                kind,
                count: codons.len(),
            });
        }

        let mut packed = PackedCodons::default();
        for (slot, codon) in packed.0.iter_mut().zip(codons) {
            if !codon.iter().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T')) {
                return Err(OrfError::InvalidCodon {
                    kind,
                    codon: String::from_utf8_lossy(codon).into_owned(),
                });
            }
            *slot = u32::from_le_bytes([codon[0], codon[1], codon[2], 0]);
        }

        Ok(Self {
            kind,
            packed,
            count: codons.len(),
            #[cfg(feature = "simd")]
            hi: load_lanes(&packed.0[..codons.len().min(LANES)]),
            #[cfg(feature = "simd")]
            lo: load_lanes(packed.0.get(LANES..codons.len()).unwrap_or(&[])),
        })
    }

    pub fn kind(&self) -> CodonKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn codons(&self) -> Vec<Codon> {
        self.packed.0[..self.count]
            .iter()
            .map(|slot| {
                let [a, b, c, _] = slot.to_le_bytes();
                [a, b, c]
            })
            .collect()
    }

    /// Tests the codon starting at `window[0]`. Reads four bytes, so the caller
    /// must guarantee `window.len() >= 4` (the scanner's padding does).
    #[inline]
    pub fn matches(&self, window: &[u8]) -> bool {
        self.contains_key(codon_key(window))
    }

    #[cfg(feature = "simd")]
    #[inline]
    pub(crate) fn contains_key(&self, key: u32) -> bool {
        let needle = i32x4::splat(key as i32);
        let mut hits = needle.cmp_eq(self.hi);
        if self.count > LANES {
            hits = hits | needle.cmp_eq(self.lo);
        }
        hits.to_array() != [0; LANES]
    }

    #[cfg(not(feature = "simd"))]
    #[inline]
    pub(crate) fn contains_key(&self, key: u32) -> bool {
        self.contains_key_scalar(key)
    }

    #[cfg_attr(feature = "simd", allow(dead_code))]
    #[inline]
    pub(crate) fn contains_key_scalar(&self, key: u32) -> bool {
        self.packed.0[..self.count].iter().any(|&slot| slot == key)
    }
}

#[cfg(feature = "simd")]
fn load_lanes(slots: &[u32]) -> i32x4 {
    let mut lanes = [EMPTY_LANE; LANES];
    for (lane, &slot) in lanes.iter_mut().zip(slots) {
        *lane = slot as i32;
    }
    i32x4::from(lanes)
}

#[inline]
pub(crate) fn codon_key(window: &[u8]) -> u32 {
    u32::from_le_bytes([window[0], window[1], window[2], window[3]]) & CODON_MASK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_first_three_bytes() {
        let set = CodonSet::new(CodonKind::Start, &[*b"ATG"]).unwrap();
        assert!(set.matches(b"ATGA"));
        assert!(set.matches(b"ATGC"));
        assert!(!set.matches(b"ATTG"));
        assert!(!set.matches(b"TATG"));
    }

    #[test]
    fn second_register_is_searched() {
        let codons = [
            *b"TTA", *b"TTG", *b"CTG", *b"ATT", *b"ATC", *b"ATA", *b"ATG", *b"GTG",
        ];
        let set = CodonSet::new(CodonKind::Start, &codons).unwrap();
        assert_eq!(set.len(), 8);
        for codon in &codons {
            let window = [codon[0], codon[1], codon[2], b'A'];
            assert!(set.matches(&window), "{:?}", std::str::from_utf8(codon));
        }
        assert!(!set.matches(b"CCCA"));
    }

    #[test]
    fn padding_never_matches() {
        let set = CodonSet::new(CodonKind::Stop, &[*b"TAA", *b"TAG", *b"TGA"]).unwrap();
        assert!(!set.matches(&[0, 0, 0, 0]));
        assert!(!set.matches(&[0xff, 0xff, 0xff, 0xff]));
        assert!(!set.matches(&[b'T', b'A', 0xff, 0xff]));
    }

    #[test]
    fn unused_lanes_of_second_register_never_match() {
        let codons = [*b"TTG", *b"CTG", *b"ATT", *b"ATG", *b"GTG"];
        let set = CodonSet::new(CodonKind::Start, &codons).unwrap();
        assert!(set.matches(b"GTGA"));
        assert!(!set.matches(&[0, 0, 0, b'A']));
        assert!(!set.contains_key(0));
        assert_eq!(set.contains_key(0), set.contains_key_scalar(0));
    }

    #[test]
    fn rejects_oversized_and_empty_sets() {
        let nine = [*b"AAA"; 9];
        assert!(matches!(
            CodonSet::new(CodonKind::Stop, &nine),
            Err(OrfError::TooManyCodons {
                kind: CodonKind::Stop,
                count: 9
            })
        ));
        assert!(matches!(
            CodonSet::new(CodonKind::Start, &[]),
            Err(OrfError::EmptyCodonSet {
                kind: CodonKind::Start
            })
        ));
    }

    #[test]
    fn rejects_non_dna_codon() {
        assert!(CodonSet::new(CodonKind::Start, &[*b"AUG"]).is_err());
        assert!(CodonSet::new(CodonKind::Start, &[*b"atg"]).is_err());
    }

    #[test]
    fn codons_roundtrip_through_slots() {
        let set = CodonSet::new(CodonKind::Stop, &[*b"TAA", *b"TGA"]).unwrap();
        assert_eq!(set.codons(), vec![*b"TAA", *b"TGA"]);
        assert_eq!(set.kind(), CodonKind::Stop);
    }
}
