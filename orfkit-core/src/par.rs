/// Parallel map over the enumerated elements of `$slice` with per-worker state.
///
/// `$init` builds the state once per rayon split (once in total without the
/// `parallel` feature); `$f` receives `(&mut state, (index, &item))`.
/// Output order follows `$slice`.
macro_rules! par_map_init {
    ($slice:expr, $init:expr, $f:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
            $slice.par_iter().enumerate().map_init($init, $f).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            let f = $f;
            let mut state = ($init)();
            $slice
                .iter()
                .enumerate()
                .map(|item| f(&mut state, item))
                .collect()
        }
    }};
}
