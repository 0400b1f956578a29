use pyo3::exceptions::{PyIOError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyString;

use orfkit_core::error::OrfError;
use orfkit_core::io::OnError;
use orfkit_core::orf::{FrameMask, OrfParams, StartMode};

pub fn extract_seq_bytes(obj: &Bound<'_, PyAny>) -> PyResult<Vec<u8>> {
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(s.to_str()?.as_bytes().to_vec());
    }

    obj.extract::<Vec<u8>>()
        .map_err(|_| PyTypeError::new_err("expected str or bytes-like object"))
}

pub fn to_py_err(err: OrfError) -> PyErr {
    match err {
        OrfError::FastaIo(io) => PyIOError::new_err(io.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

pub fn build_params(
    min_length: usize,
    max_length: usize,
    max_gaps: Option<usize>,
    forward_frames: u32,
    reverse_frames: u32,
    start_mode: u32,
) -> PyResult<OrfParams> {
    let forward = FrameMask::new(forward_frames).map_err(to_py_err)?;
    let reverse = FrameMask::new(reverse_frames).map_err(to_py_err)?;
    let start_mode = StartMode::try_from(start_mode).map_err(to_py_err)?;
    Ok(OrfParams::default()
        .with_lengths(min_length, max_length)
        .with_max_gaps(max_gaps.unwrap_or(usize::MAX))
        .with_frames(forward, reverse)
        .with_start_mode(start_mode))
}

pub fn parse_on_error(on_error: &str) -> PyResult<OnError> {
    match on_error {
        "raise" => Ok(OnError::Raise),
        "skip" => Ok(OnError::Skip),
        _ => Err(PyValueError::new_err("on_error must be 'raise' or 'skip'")),
    }
}
