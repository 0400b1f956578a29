//! NCBI genetic code tables.
//!
//! Each table is stored in the NCBI `ncbieaa` / `sncbieaa` layout: 64 characters
//! indexed by codon in TCAG order (TTT, TTC, TTA, TTG, TCT, ...). The first string
//! holds the translated amino acid, the second marks alternative initiation codons
//! with `M` and additional termination codons with `*`.
//!
//! Only the start and stop codon sets are exposed; translation is not needed for
//! ORF detection.

use crate::error::{OrfError, OrfResult};

pub type Codon = [u8; 3];

/// The canonical start codon, used when alternative table starts are not honored.
pub const CANONICAL_START: Codon = *b"ATG";

const BASES: [u8; 4] = *b"TCAG";

#[derive(Clone, Copy, Debug)]
pub struct GeneticCode {
    pub id: u32,
    pub name: &'static str,
    amino_acids: &'static [u8; 64],
    starts: &'static [u8; 64],
}

#[rustfmt::skip]
static CODES: [GeneticCode; 27] = [
    GeneticCode::new(1, "Standard",
        b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"---M------**--*----M---------------M----------------------------"),
    GeneticCode::new(2, "Vertebrate Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG",
        b"----------**--------------------MMMM----------**---M------------"),
    GeneticCode::new(3, "Yeast Mitochondrial",
        b"FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"----------**----------------------MM---------------M------------"),
    GeneticCode::new(4, "Mold, Protozoan, and Coelenterate Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"--MM------**-------M------------MMMM---------------M------------"),
    GeneticCode::new(5, "Invertebrate Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG",
        b"---M------**--------------------MMMM---------------M------------"),
    GeneticCode::new(6, "Ciliate, Dasycladacean and Hexamita Nuclear",
        b"FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"--------------*--------------------M----------------------------"),
    GeneticCode::new(9, "Echinoderm and Flatworm Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        b"----------**-----------------------M---------------M------------"),
    GeneticCode::new(10, "Euplotid Nuclear",
        b"FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"----------**-----------------------M----------------------------"),
    GeneticCode::new(11, "Bacterial, Archaeal and Plant Plastid",
        b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"---M------**--*----M------------MMMM---------------M------------"),
    GeneticCode::new(12, "Alternative Yeast Nuclear",
        b"FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"----------**--*----M---------------M----------------------------"),
    GeneticCode::new(13, "Ascidian Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG",
        b"---M------**----------------------MM---------------M------------"),
    GeneticCode::new(14, "Alternative Flatworm Mitochondrial",
        b"FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        b"-----------*-----------------------M----------------------------"),
    GeneticCode::new(15, "Blepharisma Macronuclear",
        b"FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"----------*---*--------------------M----------------------------"),
    GeneticCode::new(16, "Chlorophycean Mitochondrial",
        b"FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"----------*---*--------------------M----------------------------"),
    GeneticCode::new(21, "Trematode Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        b"----------**-----------------------M---------------M------------"),
    GeneticCode::new(22, "Scenedesmus obliquus Mitochondrial",
        b"FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"------*---*---*--------------------M----------------------------"),
    GeneticCode::new(23, "Thraustochytrium Mitochondrial",
        b"FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"--*-------**--*-----------------M--M---------------M------------"),
    GeneticCode::new(24, "Rhabdopleuridae Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG",
        b"---M------**-------M---------------M---------------M------------"),
    GeneticCode::new(25, "Candidate Division SR1 and Gracilibacteria",
        b"FFLLSSSSYY**CCGWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"---M------**-----------------------M---------------M------------"),
    GeneticCode::new(26, "Pachysolen tannophilus Nuclear",
        b"FFLLSSSSYY**CC*WLLLAPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"----------**--*----M---------------M----------------------------"),
    GeneticCode::new(27, "Karyorelict Nuclear",
        b"FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"--------------*--------------------M----------------------------"),
    GeneticCode::new(28, "Condylostoma Nuclear",
        b"FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"----------**--*--------------------M----------------------------"),
    GeneticCode::new(29, "Mesodinium Nuclear",
        b"FFLLSSSSYYYYCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"--------------*--------------------M----------------------------"),
    GeneticCode::new(30, "Peritrich Nuclear",
        b"FFLLSSSSYYEECC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"--------------*--------------------M----------------------------"),
    GeneticCode::new(31, "Blastocrithidia Nuclear",
        b"FFLLSSSSYYEECCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"----------**-----------------------M----------------------------"),
    GeneticCode::new(32, "Balanophoraceae Plastid",
        b"FFLLSSSSYY*WCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        b"---M------*---*----M------------MMMM---------------M------------"),
    GeneticCode::new(33, "Cephalodiscidae Mitochondrial",
        b"FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG",
        b"---M-------*-------M---------------M---------------M------------"),
];

impl GeneticCode {
    const fn new(
        id: u32,
        name: &'static str,
        amino_acids: &'static [u8; 64],
        starts: &'static [u8; 64],
    ) -> Self {
        Self {
            id,
            name,
            amino_acids,
            starts,
        }
    }

    /// Looks up an NCBI translation table by id.
    pub fn ncbi(id: u32) -> OrfResult<&'static GeneticCode> {
        CODES
            .iter()
            .find(|code| code.id == id)
            .ok_or(OrfError::UnknownGeneticCode { id })
    }

    pub fn all() -> &'static [GeneticCode] {
        &CODES
    }

    /// Codons flagged as initiation sites by the table, in TCAG order.
    pub fn start_codons(&self) -> Vec<Codon> {
        codons()
            .filter(|&(idx, _)| self.starts[idx] == b'M')
            .map(|(_, codon)| codon)
            .collect()
    }

    /// Codons that terminate translation, in TCAG order.
    pub fn stop_codons(&self) -> Vec<Codon> {
        codons()
            .filter(|&(idx, _)| self.amino_acids[idx] == b'*' || self.starts[idx] == b'*')
            .map(|(_, codon)| codon)
            .collect()
    }

    /// Start codons honored by an ORF search: every table start, or only `ATG`.
    pub fn orf_start_codons(&self, use_all_table_starts: bool) -> Vec<Codon> {
        if use_all_table_starts {
            self.start_codons()
        } else {
            vec![CANONICAL_START]
        }
    }
}

fn codons() -> impl Iterator<Item = (usize, Codon)> {
    (0..64usize).map(|idx| {
        (
            idx,
            [BASES[idx >> 4], BASES[(idx >> 2) & 3], BASES[idx & 3]],
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_code() {
        let code = GeneticCode::ncbi(1).unwrap();
        assert_eq!(code.name, "Standard");
        assert_eq!(code.start_codons(), vec![*b"TTG", *b"CTG", *b"ATG"]);
        assert_eq!(code.stop_codons(), vec![*b"TAA", *b"TAG", *b"TGA"]);
        assert_eq!(code.orf_start_codons(false), vec![*b"ATG"]);
    }

    #[test]
    fn vertebrate_mitochondrial() {
        let code = GeneticCode::ncbi(2).unwrap();
        assert_eq!(
            code.start_codons(),
            vec![*b"ATT", *b"ATC", *b"ATA", *b"ATG", *b"GTG"]
        );
        assert_eq!(
            code.stop_codons(),
            vec![*b"TAA", *b"TAG", *b"AGA", *b"AGG"]
        );
    }

    #[test]
    fn ciliate_only_tga_stops() {
        let code = GeneticCode::ncbi(6).unwrap();
        assert_eq!(code.stop_codons(), vec![*b"TGA"]);
    }

    #[test]
    fn unknown_code() {
        assert!(matches!(
            GeneticCode::ncbi(7),
            Err(OrfError::UnknownGeneticCode { id: 7 })
        ));
        assert!(GeneticCode::ncbi(0).is_err());
    }

    #[test]
    fn every_table_fits_packed_sets() {
        for code in GeneticCode::all() {
            let starts = code.start_codons();
            let stops = code.stop_codons();
            assert!(!starts.is_empty(), "code {}", code.id);
            assert!(!stops.is_empty(), "code {}", code.id);
            assert!(starts.len() <= 8, "code {}", code.id);
            assert!(stops.len() <= 8, "code {}", code.id);
        }
    }

    #[test]
    fn mold_mitochondrial_has_eight_starts() {
        assert_eq!(GeneticCode::ncbi(4).unwrap().start_codons().len(), 8);
    }
}
