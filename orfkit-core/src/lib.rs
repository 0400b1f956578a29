#[macro_use]
mod par;

pub mod alphabets;
pub mod error;
pub mod genetic_code;
pub mod io;
pub mod orf;
pub mod seq;
pub mod trace;

pub use error::{OrfError, OrfResult};
pub use orf::{
    find_orfs_batch, parse_orf_header, FrameMask, OrfFinder, OrfFinderConfig, OrfParams,
    SequenceLocation, StartMode, Strand,
};
