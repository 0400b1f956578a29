use crate::alphabets::dna;
use crate::error::{CodonKind, OrfError, OrfResult};
use crate::genetic_code::{Codon, GeneticCode};
use crate::orf::buffer::{SequenceBuffers, CODON, SENTINEL};
use crate::orf::codons::CodonSet;
use crate::orf::location::{SequenceLocation, Strand};
use crate::orf::params::{FrameMask, OrfFinderConfig, OrfParams, StartMode};
use crate::trace::{self, DropReason};

/// Bytes inspected from each codon position: the codon and the one after it.
const WINDOW: usize = 2 * CODON;

/// Scanner state of one reading frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrameState {
    inside_orf: bool,
    has_start_codon: bool,
    gaps: usize,
    length: usize,
    from: usize,
}

impl FrameState {
    /// Every frame starts inside an ORF whose true start may precede the
    /// sequence, so a leading stop still closes a reportable fragment.
    fn leading(offset: usize) -> Self {
        Self {
            inside_orf: true,
            has_start_codon: false,
            gaps: 0,
            length: 0,
            from: offset,
        }
    }

    fn open(&mut self, position: usize, has_start_codon: bool) {
        self.inside_orf = true;
        self.has_start_codon = has_start_codon;
        self.from = position;
        self.gaps = 0;
        self.length = 0;
    }
}

/// Finds open reading frames on both strands of one sequence at a time.
///
/// An instance owns its buffers; `set_sequence` overwrites them, so one
/// instance serves one caller. Parallel work uses one instance per worker.
#[derive(Clone, Debug)]
pub struct OrfFinder {
    starts: CodonSet,
    stops: CodonSet,
    buffers: SequenceBuffers,
}

impl OrfFinder {
    /// Builds a finder for an NCBI genetic code. Fails on an unknown code or a
    /// table that does not fit the packed codon sets.
    pub fn new(config: OrfFinderConfig) -> OrfResult<Self> {
        let code = GeneticCode::ncbi(config.genetic_code)?;
        Self::with_codons(
            &code.orf_start_codons(config.use_all_table_starts),
            &code.stop_codons(),
        )
    }

    pub fn with_codons(starts: &[Codon], stops: &[Codon]) -> OrfResult<Self> {
        let stops = CodonSet::new(CodonKind::Stop, stops)?;
        let starts = CodonSet::new(CodonKind::Start, starts)?;
        Ok(Self {
            starts,
            stops,
            buffers: SequenceBuffers::default(),
        })
    }

    pub fn start_codons(&self) -> &CodonSet {
        &self.starts
    }

    pub fn stop_codons(&self) -> &CodonSet {
        &self.stops
    }

    /// Loads the working sequence, normalizing case and U to T.
    ///
    /// Rejections (`SequenceTooShort`, `InvalidBase`) are recoverable: skip the
    /// record. After a rejection the finder holds no sequence and reports nothing.
    pub fn set_sequence(&mut self, seq: &[u8]) -> OrfResult<()> {
        let res = self.buffers.set(seq);
        if let Err(err) = &res {
            trace::trace_rejected_sequence(err);
        }
        res
    }

    pub fn sequence_len(&self) -> usize {
        self.buffers.len()
    }

    /// The normalized sequence of one strand.
    pub fn strand_sequence(&self, strand: Strand) -> &[u8] {
        self.buffers.strand(strand)
    }

    /// Bases covered by `location`, read from the buffer of its strand.
    pub fn get_sequence(&self, location: &SequenceLocation) -> OrfResult<&[u8]> {
        let buf = self.buffers.strand(location.strand);
        if location.to <= location.from {
            return Err(OrfError::LocationOutOfBounds {
                from: location.from,
                to: location.to,
                len: buf.len(),
            });
        }
        buf.get(location.from..location.to)
            .ok_or(OrfError::LocationOutOfBounds {
                from: location.from,
                to: location.to,
                len: buf.len(),
            })
    }

    /// Scans the selected frames of both strands, forward strand first.
    pub fn find_all(&self, params: &OrfParams) -> Vec<SequenceLocation> {
        let mut out = Vec::new();
        self.find_all_into(params, &mut out);
        out
    }

    /// Like [`find_all`](Self::find_all) but appends to `out`.
    pub fn find_all_into(&self, params: &OrfParams, out: &mut Vec<SequenceLocation>) {
        if !params.forward_frames.is_empty() {
            self.scan_strand(Strand::Plus, params.forward_frames, params, out);
        }
        if !params.reverse_frames.is_empty() {
            self.scan_strand(Strand::Minus, params.reverse_frames, params, out);
        }
    }

    /// Runs the three frame state machines over one strand's padded buffer.
    /// Frame `k` reads codons at positions `k, k + 3, k + 6, ...`.
    fn scan_strand(
        &self,
        strand: Strand,
        frames: FrameMask,
        params: &OrfParams,
        out: &mut Vec<SequenceLocation>,
    ) {
        let len = self.buffers.len();
        if len < CODON {
            return;
        }
        let seq = self.buffers.padded(strand);

        let mut states = [
            FrameState::leading(0),
            FrameState::leading(1),
            FrameState::leading(2),
        ];

        // One pass over the buffer; each block of three positions visits every frame once.
        for block in (0..=len - CODON).step_by(CODON) {
            for (frame, state) in states.iter_mut().enumerate() {
                if !frames.contains(frame) {
                    continue;
                }
                let position = block + frame;
                let window = &seq[position..position + WINDOW];
                let codon = &window[..CODON];
                if is_incomplete(codon) {
                    continue;
                }
                let is_last = is_incomplete(&window[CODON..]);
                let is_start = self.starts.matches(window);

                let should_start = match params.start_mode {
                    StartMode::StartToStop => !state.inside_orf && is_start,
                    StartMode::AnyToStop => !state.inside_orf,
                    StartMode::LastStartToStop => is_start,
                };

                // no room for a new ORF on the last codon
                if should_start && !is_last {
                    state.open(position, is_start);
                } else if state.inside_orf && state.length == 0 {
                    // first codon of the leading fragment
                    state.has_start_codon = is_start;
                }

                if state.inside_orf {
                    state.length += 1;
                    if codon.iter().any(|&b| dna::is_gap_or_n(b)) {
                        state.gaps += 1;
                    }
                }

                let is_stop = self.stops.matches(window);
                if state.inside_orf && (is_stop || is_last) {
                    state.inside_orf = false;

                    // a stop codon ends the range; the last codon is kept
                    let to = if is_last { position + CODON } else { position };
                    // a stop codon right at the start of the fragment
                    if to == state.from {
                        continue;
                    }
                    debug_assert!(to > state.from);

                    if let Some(reason) = drop_reason(state, params) {
                        trace::trace_dropped(
                            reason,
                            strand,
                            state.from,
                            to,
                            state.length,
                            state.gaps,
                        );
                        continue;
                    }

                    let loc = SequenceLocation::new(
                        state.from,
                        to,
                        strand,
                        !state.has_start_codon,
                        !is_stop,
                    );
                    trace::trace_emitted(&loc, state.length, state.gaps);
                    out.push(loc);
                }
            }
        }
    }
}

#[inline]
fn is_incomplete(codon: &[u8]) -> bool {
    codon[0] == SENTINEL || codon[1] == SENTINEL || codon[2] == SENTINEL
}

fn drop_reason(state: &FrameState, params: &OrfParams) -> Option<DropReason> {
    if state.gaps > params.max_gaps {
        Some(DropReason::TooManyGaps)
    } else if state.length > params.max_length {
        Some(DropReason::TooLong)
    } else if state.length <= params.min_length {
        Some(DropReason::TooShort)
    } else {
        None
    }
}
