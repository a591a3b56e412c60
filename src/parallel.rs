//! Parallel iteration abstraction.
//!
//! With the `parallel` feature (default), iteration fans out over rayon's
//! global thread pool; without it, the same pipeline runs sequentially.
//! Indexed parallel iterators keep their input order on `collect`, so
//! callers see identical results either way.

/// Macro for conditionally parallel iteration over owned collections.
///
/// When the `parallel` feature is enabled, uses `into_par_iter()`.
/// Otherwise, uses `into_iter()` for sequential execution.
///
/// ```ignore
/// let doubled: Vec<_> = iter_maybe_parallel!(vec![1, 2, 3]).map(|x| x * 2).collect();
/// ```
#[macro_export]
macro_rules! iter_maybe_parallel {
    ($expr:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::IntoParallelIterator;

            IntoParallelIterator::into_par_iter($expr)
        }
        #[cfg(not(feature = "parallel"))]
        {
            IntoIterator::into_iter($expr)
        }
    }};
}

/// Number of worker threads window scanning can use
pub fn available_workers() -> usize {
    #[cfg(feature = "parallel")]
    {
        rayon::current_num_threads()
    }
    #[cfg(not(feature = "parallel"))]
    {
        1
    }
}
