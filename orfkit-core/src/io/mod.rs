pub mod fasta;

/// What a batch does with a record whose sequence is rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnError {
    Raise,
    #[default]
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub id: Box<str>,
    pub message: Box<str>,
}
