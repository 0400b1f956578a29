//! ORF scan tracing for debugging
//!
//! Enable tracing by setting environment variable:
//! - `ORFKIT_TRACE=1`
//!
//! Every emitted ORF, every ORF dropped by the gap/length filters and every
//! rejected input sequence is reported on stderr. Results are unaffected.

use std::sync::OnceLock;

use crate::error::OrfError;
use crate::orf::location::{SequenceLocation, Strand};

static TRACE_ORF: OnceLock<bool> = OnceLock::new();

#[inline(always)]
pub fn trace_enabled() -> bool {
    *TRACE_ORF.get_or_init(|| match std::env::var("ORFKIT_TRACE") {
        Ok(raw) => !raw.is_empty() && raw != "0",
        Err(_) => false,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    TooManyGaps,
    TooLong,
    TooShort,
}

#[inline]
pub fn trace_emitted(loc: &SequenceLocation, length: usize, gaps: usize) {
    if !trace_enabled() {
        return;
    }
    eprintln!(
        "[TRACE_ORF] emit strand={} from={} to={} codons={} gaps={} incomplete_start={} incomplete_end={}",
        loc.strand.as_int(),
        loc.from,
        loc.to,
        length,
        gaps,
        loc.has_incomplete_start,
        loc.has_incomplete_end
    );
}

#[inline]
pub fn trace_dropped(
    reason: DropReason,
    strand: Strand,
    from: usize,
    to: usize,
    length: usize,
    gaps: usize,
) {
    if !trace_enabled() {
        return;
    }
    eprintln!(
        "[TRACE_ORF] drop reason={:?} strand={} from={} to={} codons={} gaps={}",
        reason,
        strand.as_int(),
        from,
        to,
        length,
        gaps
    );
}

#[inline]
pub fn trace_rejected_sequence(err: &OrfError) {
    if !trace_enabled() {
        return;
    }
    eprintln!("[TRACE_ORF] reject sequence: {err}");
}
