use crate::error::{OrfError, OrfResult};
use crate::orf::batch::ExtractedOrf;
use crate::seq::record::SeqRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Bases written per line by the ORF writer.
pub const LINE_WIDTH: usize = 60;

/// Streaming FASTA reader.
///
/// Lines are read as raw bytes: only headers must be UTF-8. Sequence bytes are
/// passed through unchecked (whitespace removed), so a bad base surfaces later
/// as a per-record `InvalidBase` instead of failing the whole file.
pub struct FastaRecords<R> {
    reader: R,
    line_no: usize,
    pending_header: Option<(Vec<u8>, usize)>,
    line: Vec<u8>,
    seq_buf: Vec<u8>,
}

impl<R: BufRead> FastaRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            pending_header: None,
            line: Vec::new(),
            seq_buf: Vec::new(),
        }
    }

    /// Reads the next line into `self.line`; `Ok(false)` at end of input.
    fn read_line(&mut self) -> OrfResult<bool> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        Ok(true)
    }

    fn next_header(&mut self) -> OrfResult<Option<(Vec<u8>, usize)>> {
        if let Some(pending) = self.pending_header.take() {
            return Ok(Some(pending));
        }

        while self.read_line()? {
            if self.line.first() == Some(&b'>') {
                return Ok(Some((self.line.clone(), self.line_no)));
            }
            if !self.line.iter().all(u8::is_ascii_whitespace) {
                return Err(OrfError::FastaFormat {
                    msg: "expected header line starting with '>'",
                    line: self.line_no,
                });
            }
        }
        Ok(None)
    }

    fn next_record(&mut self) -> OrfResult<Option<SeqRecord>> {
        let Some((header_line, header_line_no)) = self.next_header()? else {
            return Ok(None);
        };
        let (id, desc) = parse_header(&header_line, header_line_no)?;

        self.seq_buf.clear();
        while self.read_line()? {
            if self.line.first() == Some(&b'>') {
                self.pending_header = Some((self.line.clone(), self.line_no));
                break;
            }
            self.seq_buf
                .extend(self.line.iter().copied().filter(|b| !b.is_ascii_whitespace()));
        }

        let capacity = self.seq_buf.capacity();
        let seq = std::mem::replace(&mut self.seq_buf, Vec::with_capacity(capacity));
        Ok(Some(SeqRecord { id, desc, seq }))
    }
}

impl<R: BufRead> Iterator for FastaRecords<R> {
    type Item = OrfResult<SeqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

pub fn fasta_records_from_reader<R: BufRead>(reader: R) -> FastaRecords<R> {
    FastaRecords::new(reader)
}

pub fn read_fasta_records_from_reader<R: BufRead>(reader: R) -> OrfResult<Vec<SeqRecord>> {
    fasta_records_from_reader(reader).collect()
}

pub fn read_fasta_records_from_path(path: impl AsRef<Path>) -> OrfResult<Vec<SeqRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    read_fasta_records_from_reader(reader)
}

pub fn read_fasta_records_from_bytes(data: &[u8]) -> OrfResult<Vec<SeqRecord>> {
    let reader = BufReader::new(Cursor::new(data));
    read_fasta_records_from_reader(reader)
}

/// Writes each ORF as `>{record id} [Orf: ...]` followed by its bases.
///
/// `orfs[i].location.id` indexes `records`; an id without a record fails with
/// `UnknownRecord`.
pub fn write_orf_fasta<W: Write>(
    writer: W,
    records: &[SeqRecord],
    orfs: &[ExtractedOrf],
) -> OrfResult<()> {
    let mut writer = BufWriter::new(writer);
    for orf in orfs {
        let record = records
            .get(orf.location.id as usize)
            .ok_or(OrfError::UnknownRecord {
                id: orf.location.id,
                count: records.len(),
            })?;
        writeln!(writer, ">{} {}", record.id(), orf.location)?;
        for line in orf.bases.chunks(LINE_WIDTH) {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_orf_fasta_to_path(
    path: impl AsRef<Path>,
    records: &[SeqRecord],
    orfs: &[ExtractedOrf],
) -> OrfResult<()> {
    let file = File::create(path)?;
    write_orf_fasta(file, records, orfs)
}

fn parse_header(header_line: &[u8], line_no: usize) -> OrfResult<(Box<str>, Option<Box<str>>)> {
    let header = header_line.strip_prefix(b">").ok_or(OrfError::FastaFormat {
        msg: "expected header line starting with '>'",
        line: line_no,
    })?;
    let header = std::str::from_utf8(header).map_err(|_| OrfError::FastaFormat {
        msg: "header is not valid UTF-8",
        line: line_no,
    })?;

    let header = header.trim_end_matches(&['\n', '\r'][..]).trim_start();
    if header.is_empty() {
        return Err(OrfError::FastaFormat {
            msg: "empty header",
            line: line_no,
        });
    }

    let (id, desc) = match header.find(|c: char| c.is_whitespace()) {
        Some(idx) => {
            let id = &header[..idx];
            let desc = header[idx..].trim();
            let desc = if desc.is_empty() { None } else { Some(desc) };
            (id, desc)
        }
        None => (header, None),
    };

    Ok((id.into(), desc.map(|s| s.into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orf::location::{parse_orf_header, SequenceLocation, Strand};

    #[test]
    fn parse_single_record() {
        let data = b">seq1\nACGT\n";
        let records = read_fasta_records_from_bytes(data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "seq1");
        assert_eq!(records[0].desc(), None);
        assert_eq!(records[0].seq(), b"ACGT");
    }

    #[test]
    fn header_with_description() {
        let data = b">seq1 some desc here\nAC\nGT\n";
        let records = read_fasta_records_from_bytes(data).unwrap();
        assert_eq!(records[0].id(), "seq1");
        assert_eq!(records[0].desc(), Some("some desc here"));
        assert_eq!(records[0].seq(), b"ACGT");
    }

    #[test]
    fn multiple_records() {
        let data = b">seq1\nAC\n>seq2\nGT\n";
        let records = read_fasta_records_from_bytes(data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), "seq1");
        assert_eq!(records[1].id(), "seq2");
    }

    #[test]
    fn empty_sequence_allowed() {
        let data = b">seq1\n>seq2\nA\n";
        let records = read_fasta_records_from_bytes(data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].seq(), b"");
        assert_eq!(records[1].seq(), b"A");
    }

    #[test]
    fn invalid_format_before_header() {
        let data = b"ACGT\n>seq1\nAC\n";
        let err = read_fasta_records_from_bytes(data).unwrap_err();
        match err {
            OrfError::FastaFormat { .. } => {}
            other => panic!("expected fasta format error, got {other:?}"),
        }
    }

    #[test]
    fn bases_are_not_validated_on_read() {
        let data = b">seq1\nAC#\n";
        let records = read_fasta_records_from_bytes(data).unwrap();
        assert_eq!(records[0].seq(), b"AC#");
    }

    #[test]
    fn non_utf8_sequence_bytes_are_kept() {
        let data = b">seq1\nATG\xe9AA\r\n>seq2\nATGAAATAG\n";
        let records = read_fasta_records_from_bytes(data).unwrap();
        assert_eq!(records[0].seq(), b"ATG\xe9AA");
        assert_eq!(records[1].seq(), b"ATGAAATAG");
    }

    #[test]
    fn non_utf8_header_is_a_format_error() {
        let data = b">seq\xff1\nACGT\n";
        let err = read_fasta_records_from_bytes(data).unwrap_err();
        assert!(matches!(err, OrfError::FastaFormat { line: 1, .. }));
    }

    #[test]
    fn rejected_bases_skip_only_their_record() {
        use crate::io::OnError;
        use crate::orf::{find_orfs_batch, FrameMask, OrfFinderConfig, OrfParams};

        let data = b">bad\nATG\xe9AATAG\n>good\nATGAAATAG\n";
        let records = read_fasta_records_from_bytes(data).unwrap();
        let params = OrfParams::default()
            .with_lengths(0, 100)
            .with_frames(FrameMask::FRAME_1, FrameMask::NONE);
        let batch =
            find_orfs_batch(&records, OrfFinderConfig::default(), &params, OnError::Skip)
                .unwrap();
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].id.as_ref(), "bad");
        assert_eq!(batch.orfs.len(), 1);
        assert_eq!(batch.orfs[0].location.id, 1);
    }

    #[test]
    fn writes_tagged_orfs() {
        let records = vec![SeqRecord::new("chr1", b"ATGAAATAG".to_vec())];
        let location = SequenceLocation::new(0, 9, Strand::Plus, false, false);
        let orfs = vec![ExtractedOrf {
            location,
            bases: b"ATGAAATAG".to_vec(),
        }];
        let mut out = Vec::new();
        write_orf_fasta(&mut out, &records, &orfs).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, ">chr1 [Orf: 0, 0, 9, 0, 0, 0]\nATGAAATAG\n");

        let written = read_fasta_records_from_bytes(text.as_bytes()).unwrap();
        assert_eq!(written[0].id(), "chr1");
        let header = written[0].desc().unwrap();
        assert_eq!(parse_orf_header(header).unwrap(), location);
    }

    #[test]
    fn wraps_long_orfs() {
        let records = vec![SeqRecord::new("r", Vec::new())];
        let orfs = vec![ExtractedOrf {
            location: SequenceLocation::new(0, 90, Strand::Minus, true, true),
            bases: vec![b'A'; 90],
        }];
        let mut out = Vec::new();
        write_orf_fasta(&mut out, &records, &orfs).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), LINE_WIDTH);
        assert_eq!(lines[2].len(), 30);
    }

    #[test]
    fn unknown_record_id() {
        let orfs = vec![ExtractedOrf {
            location: SequenceLocation::new(0, 3, Strand::Plus, true, true).with_id(4),
            bases: b"AAA".to_vec(),
        }];
        let err = write_orf_fasta(Vec::new(), &[], &orfs).unwrap_err();
        assert!(matches!(err, OrfError::UnknownRecord { id: 4, count: 0 }));
        assert_eq!(err.to_string(), "location id 4 does not name one of 0 records");
    }
}
