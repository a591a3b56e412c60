// Seismo Screen Core - batch screening of seismic/vibration series
// Features, spectra and frequency-band classification over fixed windows

// Module declarations
pub mod analysis;
pub mod calibration;
pub mod config;
pub mod error;
pub mod ingest;
pub mod parallel;
pub mod signal;

// Re-exports for convenience
pub use analysis::{SeriesAnalyzer, SeriesReport};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, ErrorCode};
pub use signal::{Signal, Window};

use tracing_subscriber::filter::LevelFilter;

/// Initialize logging for binaries and harnesses
///
/// Logs go to stderr so JSON reports on stdout stay clean. Safe to call more
/// than once; only the first call installs a subscriber.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        log::debug!("Logging initialized at {}", level);
    }
}
