#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyModule, PyTuple};

use orfkit_core::error::OrfResult;
use orfkit_core::io::fasta;
use orfkit_core::orf::{find_orfs_batch, OrfFinderConfig};

use crate::orf::SequenceLocation;
use crate::utils::{build_params, parse_on_error, to_py_err};

/// Reads a FASTA file and scans every record.
///
/// Returns `(orfs, skipped)`: `orfs` holds `(record_id, SequenceLocation, bases)`
/// tuples whose location `id` is the record's index in the file, `skipped` holds
/// `(index, record_id, message)` for every record rejected under `on_error="skip"`.
#[pyfunction]
#[pyo3(signature = (
    path,
    genetic_code=1,
    use_all_table_starts=false,
    min_length=30,
    max_length=32734,
    max_gaps=None,
    forward_frames=7,
    reverse_frames=7,
    start_mode=0,
    on_error="skip"
))]
#[allow(clippy::too_many_arguments)]
fn find_orfs_in_fasta(
    py: Python<'_>,
    path: &str,
    genetic_code: u32,
    use_all_table_starts: bool,
    min_length: usize,
    max_length: usize,
    max_gaps: Option<usize>,
    forward_frames: u32,
    reverse_frames: u32,
    start_mode: u32,
    on_error: &str,
) -> PyResult<(Vec<PyObject>, Vec<(usize, String, String)>)> {
    let params = build_params(
        min_length,
        max_length,
        max_gaps,
        forward_frames,
        reverse_frames,
        start_mode,
    )?;
    let on_error = parse_on_error(on_error)?;
    let config = OrfFinderConfig::default()
        .with_genetic_code(genetic_code)
        .with_all_table_starts(use_all_table_starts);

    let path = path.to_owned();
    let (records, batch) = py
        .allow_threads(|| -> OrfResult<_> {
            let records = fasta::read_fasta_records_from_path(&path)?;
            let batch = find_orfs_batch(&records, config, &params, on_error)?;
            Ok((records, batch))
        })
        .map_err(to_py_err)?;

    let mut out = Vec::with_capacity(batch.orfs.len());
    for orf in batch.orfs {
        let record_id = records
            .get(orf.location.id as usize)
            .map(|record| record.id())
            .ok_or_else(|| {
                PyValueError::new_err(format!("no record for location id {}", orf.location.id))
            })?;
        let location = Py::new(
            py,
            SequenceLocation {
                inner: orf.location,
            },
        )?;
        let bases = PyBytes::new_bound(py, &orf.bases);
        let item = PyTuple::new_bound(
            py,
            [
                record_id.to_object(py),
                location.to_object(py),
                bases.to_object(py),
            ],
        );
        out.push(item.to_object(py));
    }

    let skipped = batch
        .skipped
        .into_iter()
        .map(|s| (s.index, s.id.into_string(), s.message.into_string()))
        .collect();
    Ok((out, skipped))
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(find_orfs_in_fasta, m)?)?;
    Ok(())
}
