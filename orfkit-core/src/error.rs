use std::fmt;
use std::io;
use thiserror::Error;

/// Which packed codon set a table error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodonKind {
    Start,
    Stop,
}

impl fmt::Display for CodonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodonKind::Start => f.write_str("start"),
            CodonKind::Stop => f.write_str("stop"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OrfError {
    #[error("unknown genetic code: {id}")]
    UnknownGeneticCode { id: u32 },

    #[error("invalid translation table with more than 8 {kind} codons ({count})")]
    TooManyCodons { kind: CodonKind, count: usize },

    #[error("translation table has no {kind} codons")]
    EmptyCodonSet { kind: CodonKind },

    #[error("invalid {kind} codon {codon:?} (expected 3 uppercase DNA bases)")]
    InvalidCodon { kind: CodonKind, codon: String },

    #[error("sequence too short: {len} (need at least one codon)")]
    SequenceTooShort { len: usize },

    #[error("invalid base '{ch}' at position {pos}")]
    InvalidBase { ch: char, pos: usize },

    #[error("invalid location: start {start} > end {end}")]
    InvalidLocation { start: usize, end: usize },

    #[error("location {from}..{to} out of bounds for sequence of length {len}")]
    LocationOutOfBounds { from: usize, to: usize, len: usize },

    #[error("invalid strand: {strand} (must be 0 or 1)")]
    InvalidStrand { strand: i64 },

    #[error("invalid frame mask: {mask:#x} (only bits 0..=2 may be set)")]
    InvalidFrameMask { mask: u32 },

    #[error("invalid frame list {list:?} (expected comma-separated frames 1, 2 or 3)")]
    InvalidFrameList { list: String },

    #[error("invalid start mode: {mode} (must be 0, 1, or 2)")]
    InvalidStartMode { mode: u32 },

    #[error("location id {id} does not name one of {count} records")]
    UnknownRecord { id: u32, count: usize },

    #[error("too many records for 32-bit location ids (record {index})")]
    TooManyRecords { index: usize },

    #[error("could not find Orf information in header")]
    MissingOrfTag,

    #[error("could not parse Orf {tag}")]
    MalformedOrfTag { tag: String },

    #[error("fasta format error at line {line}: {msg}")]
    FastaFormat { msg: &'static str, line: usize },

    #[error("fasta io error: {0}")]
    FastaIo(#[from] io::Error),
}

impl OrfError {
    /// True for per-record rejections the caller is expected to skip.
    /// Everything else points at a broken table, parameter set or input file.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            OrfError::SequenceTooShort { .. } | OrfError::InvalidBase { .. }
        )
    }
}

pub type OrfResult<T> = Result<T, OrfError>;
