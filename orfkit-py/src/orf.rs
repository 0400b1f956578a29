use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyModule};

use orfkit_core::orf::{
    parse_orf_header as core_parse_orf_header, OrfFinder as CoreOrfFinder, OrfFinderConfig,
    SequenceLocation as CoreSequenceLocation,
};

use crate::utils::{build_params, extract_seq_bytes, to_py_err};

#[pyclass(frozen)]
#[derive(Clone)]
pub struct SequenceLocation {
    pub(crate) inner: CoreSequenceLocation,
}

#[pymethods]
impl SequenceLocation {
    #[getter]
    fn id(&self) -> u32 {
        self.inner.id
    }

    /// Start offset on the strand buffer (`from` is reserved in Python).
    #[getter]
    fn from_(&self) -> usize {
        self.inner.from
    }

    #[getter]
    fn to(&self) -> usize {
        self.inner.to
    }

    #[getter]
    fn strand(&self) -> u8 {
        self.inner.strand.as_int()
    }

    #[getter]
    fn has_incomplete_start(&self) -> bool {
        self.inner.has_incomplete_start
    }

    #[getter]
    fn has_incomplete_end(&self) -> bool {
        self.inner.has_incomplete_end
    }

    fn header_tag(&self) -> String {
        self.inner.to_string()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    fn __repr__(&self) -> String {
        format!(
            "SequenceLocation(id={}, from_={}, to={}, strand={}, has_incomplete_start={}, has_incomplete_end={})",
            self.inner.id,
            self.inner.from,
            self.inner.to,
            self.inner.strand.as_int(),
            self.inner.has_incomplete_start,
            self.inner.has_incomplete_end
        )
    }
}

#[pyclass]
pub struct OrfFinder {
    inner: CoreOrfFinder,
}

#[pymethods]
impl OrfFinder {
    #[new]
    #[pyo3(signature = (genetic_code=1, use_all_table_starts=false))]
    fn new(genetic_code: u32, use_all_table_starts: bool) -> PyResult<Self> {
        let config = OrfFinderConfig::default()
            .with_genetic_code(genetic_code)
            .with_all_table_starts(use_all_table_starts);
        let inner = CoreOrfFinder::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Returns False for sequences that are too short or contain non-IUPAC bytes.
    fn set_sequence(&mut self, seq: &Bound<'_, PyAny>) -> PyResult<bool> {
        let bytes = extract_seq_bytes(seq)?;
        match self.inner.set_sequence(&bytes) {
            Ok(()) => Ok(true),
            Err(err) if err.is_recoverable() => Ok(false),
            Err(err) => Err(to_py_err(err)),
        }
    }

    fn get_sequence<'py>(
        &self,
        py: Python<'py>,
        location: PyRef<'_, SequenceLocation>,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let bases = self.inner.get_sequence(&location.inner).map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, bases))
    }

    #[getter]
    fn sequence_len(&self) -> usize {
        self.inner.sequence_len()
    }

    #[pyo3(signature = (
        min_length=30,
        max_length=32734,
        max_gaps=None,
        forward_frames=7,
        reverse_frames=7,
        start_mode=0
    ))]
    fn find_all(
        &self,
        min_length: usize,
        max_length: usize,
        max_gaps: Option<usize>,
        forward_frames: u32,
        reverse_frames: u32,
        start_mode: u32,
    ) -> PyResult<Vec<SequenceLocation>> {
        let params = build_params(
            min_length,
            max_length,
            max_gaps,
            forward_frames,
            reverse_frames,
            start_mode,
        )?;
        Ok(self
            .inner
            .find_all(&params)
            .into_iter()
            .map(|inner| SequenceLocation { inner })
            .collect())
    }
}

#[pyfunction]
fn parse_orf_header(line: &str) -> PyResult<SequenceLocation> {
    let inner = core_parse_orf_header(line).map_err(to_py_err)?;
    Ok(SequenceLocation { inner })
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<OrfFinder>()?;
    m.add_class::<SequenceLocation>()?;
    m.add_function(wrap_pyfunction!(parse_orf_header, m)?)?;
    Ok(())
}
