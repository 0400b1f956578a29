use crate::error::{OrfError, OrfResult};
use crate::io::{OnError, SkippedRecord};
use crate::orf::finder::OrfFinder;
use crate::orf::location::SequenceLocation;
use crate::orf::params::{OrfFinderConfig, OrfParams};
use crate::seq::record::SeqRecord;

/// An ORF together with its bases, read from the strand it was found on.
/// `location.id` is the index of the source record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedOrf {
    pub location: SequenceLocation,
    pub bases: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrfBatch {
    pub orfs: Vec<ExtractedOrf>,
    pub skipped: Vec<SkippedRecord>,
}

impl OrfBatch {
    pub fn len(&self) -> usize {
        self.orfs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orfs.is_empty()
    }
}

/// Scans every record with its own finder and gathers the ORFs in record order.
///
/// The genetic code is resolved once up front, so a bad table fails before any
/// record is read. Records rejected by `set_sequence` are collected in
/// `skipped` under [`OnError::Skip`]; under [`OnError::Raise`] the first one
/// (by record order) is returned as the error.
pub fn find_orfs_batch(
    records: &[SeqRecord],
    config: OrfFinderConfig,
    params: &OrfParams,
    on_error: OnError,
) -> OrfResult<OrfBatch> {
    let template = OrfFinder::new(config)?;

    let per_record: Vec<OrfResult<Vec<ExtractedOrf>>> = par_map_init!(
        records,
        || template.clone(),
        |finder: &mut OrfFinder, (index, record): (usize, &SeqRecord)| {
            scan_record(finder, index, record, params)
        }
    );

    let mut batch = OrfBatch::default();
    for (index, result) in per_record.into_iter().enumerate() {
        match result {
            Ok(orfs) => batch.orfs.extend(orfs),
            Err(err) if err.is_recoverable() && on_error == OnError::Skip => {
                batch.skipped.push(SkippedRecord {
                    index,
                    id: records[index].id.clone(),
                    message: err.to_string().into(),
                });
            }
            Err(err) => return Err(err),
        }
    }
    Ok(batch)
}

/// Location ids are 32-bit; a record past `u32::MAX` cannot be named.
fn location_id(index: usize) -> OrfResult<u32> {
    u32::try_from(index).map_err(|_| OrfError::TooManyRecords { index })
}

fn scan_record(
    finder: &mut OrfFinder,
    index: usize,
    record: &SeqRecord,
    params: &OrfParams,
) -> OrfResult<Vec<ExtractedOrf>> {
    let id = location_id(index)?;
    finder.set_sequence(record.seq())?;
    finder
        .find_all(params)
        .into_iter()
        .map(|location| {
            let bases = finder.get_sequence(&location)?.to_vec();
            Ok(ExtractedOrf {
                location: location.with_id(id),
                bases,
            })
        })
        .collect()
}
