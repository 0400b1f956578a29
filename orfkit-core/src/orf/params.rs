use crate::error::{OrfError, OrfResult};
use std::fmt;
use std::str::FromStr;

/// Bit set over the three reading frames of one strand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameMask(u32);

impl FrameMask {
    pub const NONE: FrameMask = FrameMask(0);
    pub const FRAME_1: FrameMask = FrameMask(1);
    pub const FRAME_2: FrameMask = FrameMask(2);
    pub const FRAME_3: FrameMask = FrameMask(4);
    pub const ALL: FrameMask = FrameMask(7);

    pub fn new(mask: u32) -> OrfResult<Self> {
        if mask & !Self::ALL.0 != 0 {
            return Err(OrfError::InvalidFrameMask { mask });
        }
        Ok(Self(mask))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether codon phase `frame` (0, 1 or 2) is scanned.
    #[inline]
    pub fn contains(self, frame: usize) -> bool {
        frame < 3 && self.0 & (1 << frame) != 0
    }
}

impl Default for FrameMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::ops::BitOr for FrameMask {
    type Output = FrameMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        FrameMask(self.0 | rhs.0)
    }
}

/// Parses a comma-separated list of 1-based frames such as `"1,2,3"`.
/// An empty string selects no frames.
impl FromStr for FrameMask {
    type Err = OrfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = 0u32;
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part {
                "1" => mask |= Self::FRAME_1.0,
                "2" => mask |= Self::FRAME_2.0,
                "3" => mask |= Self::FRAME_3.0,
                _ => {
                    return Err(OrfError::InvalidFrameList {
                        list: s.to_string(),
                    })
                }
            }
        }
        Ok(Self(mask))
    }
}

impl fmt::Display for FrameMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frames: Vec<String> = (0..3)
            .filter(|&frame| self.contains(frame))
            .map(|frame| (frame + 1).to_string())
            .collect();
        f.write_str(&frames.join(","))
    }
}

/// How an ORF acquires its start boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StartMode {
    /// Open only on a start codon; the longest fragment beginning with a start.
    #[default]
    StartToStop = 0,
    /// Open wherever scanning resumes after a stop.
    AnyToStop = 1,
    /// Every start codon moves the start boundary; reports the last start before the stop.
    LastStartToStop = 2,
}

impl TryFrom<u32> for StartMode {
    type Error = OrfError;

    fn try_from(mode: u32) -> Result<Self, Self::Error> {
        match mode {
            0 => Ok(StartMode::StartToStop),
            1 => Ok(StartMode::AnyToStop),
            2 => Ok(StartMode::LastStartToStop),
            _ => Err(OrfError::InvalidStartMode { mode }),
        }
    }
}

/// Filters and frame selection for one `find_all` call.
///
/// Lengths count codons, including the closing stop codon. `min_length` is an
/// exclusive lower bound and `max_length` an inclusive upper bound. `max_gaps`
/// bounds the number of codons containing `N` or a non-IUPAC byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrfParams {
    pub min_length: usize,
    pub max_length: usize,
    pub max_gaps: usize,
    pub forward_frames: FrameMask,
    pub reverse_frames: FrameMask,
    pub start_mode: StartMode,
}

impl Default for OrfParams {
    fn default() -> Self {
        Self {
            min_length: 30,
            max_length: 32734,
            max_gaps: usize::MAX,
            forward_frames: FrameMask::ALL,
            reverse_frames: FrameMask::ALL,
            start_mode: StartMode::StartToStop,
        }
    }
}

impl OrfParams {
    pub fn with_lengths(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_max_gaps(mut self, max_gaps: usize) -> Self {
        self.max_gaps = max_gaps;
        self
    }

    pub fn with_frames(mut self, forward: FrameMask, reverse: FrameMask) -> Self {
        self.forward_frames = forward;
        self.reverse_frames = reverse;
        self
    }

    pub fn with_start_mode(mut self, start_mode: StartMode) -> Self {
        self.start_mode = start_mode;
        self
    }
}

/// Construction parameters of an [`OrfFinder`](super::OrfFinder).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrfFinderConfig {
    pub genetic_code: u32,
    pub use_all_table_starts: bool,
}

impl Default for OrfFinderConfig {
    fn default() -> Self {
        Self {
            genetic_code: 1,
            use_all_table_starts: false,
        }
    }
}

impl OrfFinderConfig {
    pub fn with_genetic_code(mut self, genetic_code: u32) -> Self {
        self.genetic_code = genetic_code;
        self
    }

    pub fn with_all_table_starts(mut self, use_all_table_starts: bool) -> Self {
        self.use_all_table_starts = use_all_table_starts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_mask_bits() {
        let mask = FrameMask::FRAME_1 | FrameMask::FRAME_3;
        assert!(mask.contains(0));
        assert!(!mask.contains(1));
        assert!(mask.contains(2));
        assert!(!mask.contains(3));
        assert_eq!(mask.bits(), 5);
        assert!(FrameMask::new(8).is_err());
        assert!(FrameMask::NONE.is_empty());
    }

    #[test]
    fn frame_mask_from_list() {
        assert_eq!("1,2,3".parse::<FrameMask>().unwrap(), FrameMask::ALL);
        assert_eq!(" 2 ".parse::<FrameMask>().unwrap(), FrameMask::FRAME_2);
        assert_eq!("".parse::<FrameMask>().unwrap(), FrameMask::NONE);
        assert!("0,1".parse::<FrameMask>().is_err());
        assert!("4".parse::<FrameMask>().is_err());
        assert_eq!((FrameMask::FRAME_1 | FrameMask::FRAME_3).to_string(), "1,3");
    }

    #[test]
    fn start_mode_codes() {
        assert_eq!(StartMode::try_from(0).unwrap(), StartMode::StartToStop);
        assert_eq!(StartMode::try_from(1).unwrap(), StartMode::AnyToStop);
        assert_eq!(StartMode::try_from(2).unwrap(), StartMode::LastStartToStop);
        assert!(StartMode::try_from(3).is_err());
        assert_eq!(StartMode::LastStartToStop as u32, 2);
    }

    #[test]
    fn defaults() {
        let params = OrfParams::default();
        assert_eq!(params.min_length, 30);
        assert_eq!(params.max_length, 32734);
        assert_eq!(params.start_mode, StartMode::StartToStop);
        let config = OrfFinderConfig::default();
        assert_eq!(config.genetic_code, 1);
        assert!(!config.use_all_table_starts);
    }
}
