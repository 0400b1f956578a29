pub mod batch;
pub mod buffer;
pub mod codons;
pub mod finder;
pub mod location;
pub mod params;


pub use batch::{find_orfs_batch, ExtractedOrf, OrfBatch};
pub use codons::CodonSet;
pub use finder::OrfFinder;
pub use location::{parse_orf_header, SequenceLocation, Strand};
pub use params::{FrameMask, OrfFinderConfig, OrfParams, StartMode};
