use std::sync::LazyLock;

/// Complement table entry for bytes outside the IUPAC nucleotide alphabet.
pub const INVALID: u8 = b'.';

// N->N, S->S, W->W, U->A, T->A
static COMPLEMENT: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut comp = [INVALID; 256];
    b"ACGTURYSWKMBDHVN"
        .iter()
        .zip(b"TGCAAYRSWMKVHDBN".iter())
        .for_each(|(&a, &b)| {
            comp[a as usize] = b;
            comp[a as usize + 32] = b + 32;
        });
    comp
});

#[inline]
pub fn complement(a: u8) -> u8 {
    COMPLEMENT[a as usize]
}

#[inline]
pub fn has_complement(a: u8) -> bool {
    complement(a) != INVALID
}

/// Upper-cases by clearing the lowercase bit and rewrites U to T.
#[inline]
pub fn normalize(a: u8) -> u8 {
    let upper = a & !0x20;
    if upper == b'U' {
        b'T'
    } else {
        upper
    }
}

/// A base that cannot take part in an exact codon: `N` or anything without a complement.
#[inline]
pub fn is_gap_or_n(a: u8) -> bool {
    a == b'N' || !has_complement(a)
}

pub fn reverse_complement(text: &[u8]) -> Vec<u8> {
    text.iter().rev().map(|&a| complement(a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complements_iupac() {
        assert_eq!(reverse_complement(b"ACGT"), b"ACGT");
        assert_eq!(reverse_complement(b"AAGC"), b"GCTT");
        assert_eq!(reverse_complement(b"RYKMBDHVNSW"), b"WSNBDHVKMRY");
        assert_eq!(reverse_complement(b"acgu"), b"acgt");
    }

    #[test]
    fn u_complements_to_a() {
        assert_eq!(complement(b'U'), b'A');
        assert_eq!(complement(b'u'), b'a');
    }

    #[test]
    fn non_iupac_has_no_complement() {
        for &b in b"-*.#0EFIJLOPQXZ " {
            assert!(!has_complement(b), "{}", b as char);
        }
        assert!(!has_complement(0x7f));
        assert!(!has_complement(0xff));
    }

    #[test]
    fn normalize_masks_case_and_rna() {
        assert_eq!(normalize(b'a'), b'A');
        assert_eq!(normalize(b'u'), b'T');
        assert_eq!(normalize(b'U'), b'T');
        assert_eq!(normalize(b'G'), b'G');
    }

    #[test]
    fn gap_or_n() {
        assert!(is_gap_or_n(b'N'));
        assert!(is_gap_or_n(b'-'));
        assert!(!is_gap_or_n(b'R'));
        assert!(!is_gap_or_n(b'A'));
    }
}
