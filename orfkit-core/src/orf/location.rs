use crate::error::{OrfError, OrfResult};
use memchr::memmem;
use std::fmt;
use std::str::FromStr;

/// Literal prefix of the header tag.
pub const TAG_PREFIX: &str = "[Orf:";

/// Strand a location refers to. The integer codes are part of the header tag format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strand {
    #[default]
    Plus = 0,
    Minus = 1,
}

impl Strand {
    pub fn as_int(self) -> u8 {
        self as u8
    }

    pub fn is_reverse(self) -> bool {
        self == Strand::Minus
    }
}

impl TryFrom<i64> for Strand {
    type Error = OrfError;

    fn try_from(strand: i64) -> Result<Self, Self::Error> {
        match strand {
            0 => Ok(Strand::Plus),
            1 => Ok(Strand::Minus),
            _ => Err(OrfError::InvalidStrand { strand }),
        }
    }
}

/// One ORF as half-open offsets `[from, to)` into its strand's buffer.
/// Minus-strand offsets index the reverse complement, not the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SequenceLocation {
    pub id: u32,
    pub from: usize,
    pub to: usize,
    pub strand: Strand,
    pub has_incomplete_start: bool,
    pub has_incomplete_end: bool,
}

impl SequenceLocation {
    pub fn new(
        from: usize,
        to: usize,
        strand: Strand,
        has_incomplete_start: bool,
        has_incomplete_end: bool,
    ) -> Self {
        Self {
            id: 0,
            from,
            to,
            strand,
            has_incomplete_start,
            has_incomplete_end,
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.to == self.from
    }
}

/// Formats the header tag: `[Orf: id, from, to, strand, incomplete_start, incomplete_end]`.
impl fmt::Display for SequenceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {}, {}, {}, {}, {}]",
            TAG_PREFIX,
            self.id,
            self.from,
            self.to,
            self.strand.as_int(),
            u8::from(self.has_incomplete_start),
            u8::from(self.has_incomplete_end)
        )
    }
}

/// Parses a complete tag; surrounding whitespace is ignored, nothing else is.
impl FromStr for SequenceLocation {
    type Err = OrfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tag(s.trim())
    }
}

/// Finds the first whitespace-delimited field beginning with `[Orf:` and
/// parses the tag it starts. Headers without a tag, or with a broken one,
/// are data-integrity errors.
pub fn parse_orf_header(header: &str) -> OrfResult<SequenceLocation> {
    let bytes = header.as_bytes();
    let start = memmem::find_iter(bytes, TAG_PREFIX.as_bytes())
        .find(|&pos| pos == 0 || bytes[pos - 1].is_ascii_whitespace())
        .ok_or(OrfError::MissingOrfTag)?;

    let rest = &header[start..];
    let tag = match rest.find(']') {
        Some(close) => &rest[..=close],
        None => {
            let field_end = rest
                .find(|c: char| c.is_ascii_whitespace())
                .unwrap_or(rest.len());
            return Err(OrfError::MalformedOrfTag {
                tag: rest[..field_end].to_string(),
            });
        }
    };
    parse_tag(tag)
}

fn parse_tag(tag: &str) -> OrfResult<SequenceLocation> {
    let malformed = || OrfError::MalformedOrfTag {
        tag: tag.to_string(),
    };

    let body = tag
        .strip_prefix(TAG_PREFIX)
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;

    let fields: Vec<&str> = body.split(',').map(str::trim).collect();
    let [id, from, to, strand, incomplete_start, incomplete_end] = fields.as_slice() else {
        return Err(malformed());
    };

    let id: u32 = id.parse().map_err(|_| malformed())?;
    let from: usize = from.parse().map_err(|_| malformed())?;
    let to: usize = to.parse().map_err(|_| malformed())?;
    let strand: i64 = strand.parse().map_err(|_| malformed())?;
    let strand = Strand::try_from(strand).map_err(|_| malformed())?;
    let has_incomplete_start = parse_flag(incomplete_start).ok_or_else(malformed)?;
    let has_incomplete_end = parse_flag(incomplete_end).ok_or_else(malformed)?;

    if to <= from {
        return Err(malformed());
    }

    Ok(SequenceLocation {
        id,
        from,
        to,
        strand,
        has_incomplete_start,
        has_incomplete_end,
    })
}

fn parse_flag(field: &str) -> Option<bool> {
    match field {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}
