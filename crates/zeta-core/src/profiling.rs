//! Profiling utilities based on the `puffin` crate.
//!
//! With the `profiling` feature disabled the scope macros expand to nothing
//! and the setup functions only log.

#[cfg(feature = "profiling")]
use std::sync::OnceLock;

#[cfg(feature = "profiling")]
pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[doc(hidden)]
#[macro_export]
macro_rules! __zeta_profile_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::__zeta_profile_noop as profile_function;
#[cfg(not(feature = "profiling"))]
pub use crate::__zeta_profile_noop as profile_scope;

use crate::config::BenchmarkMode;

/// Address the puffin HTTP server listens on.
pub const PUFFIN_HTTP_ADDR: &str = "0.0.0.0:8585";

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Record scopes in-process only.
    InProcess,
    /// Send profiling data to puffin_viewer via HTTP.
    PuffinHttp,
}

impl ProfilingBackend {
    /// Backend matching a configured [`BenchmarkMode`], if profiling is on.
    pub fn from_mode(mode: BenchmarkMode) -> Option<Self> {
        match mode {
            BenchmarkMode::Off => None,
            BenchmarkMode::On => Some(ProfilingBackend::InProcess),
            BenchmarkMode::WithWebserver => Some(ProfilingBackend::PuffinHttp),
        }
    }
}

/// Global profiling server instance.
#[cfg(feature = "profiling")]
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Initialize profiling with the specified backend.
///
/// # Example
/// ```no_run
/// use zeta_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
#[cfg(feature = "profiling")]
pub fn init_profiling(backend: ProfilingBackend) {
    puffin::set_scopes_on(true);

    match backend {
        ProfilingBackend::InProcess => {
            tracing::info!("Puffin profiling enabled (in-process)");
        }
        ProfilingBackend::PuffinHttp => match puffin_http::Server::new(PUFFIN_HTTP_ADDR) {
            Ok(server) => {
                tracing::info!("Puffin profiler server started on http://{}", PUFFIN_HTTP_ADDR);

                // Store the server in a static to keep it alive
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => {
                tracing::error!("Failed to start puffin server: {}", e);
            }
        },
    }
}

#[cfg(not(feature = "profiling"))]
pub fn init_profiling(backend: ProfilingBackend) {
    tracing::warn!(
        "profiling backend {:?} requested but the `profiling` feature is disabled",
        backend
    );
}

/// Mark the start of a new frame for profiling.
///
/// Call this once per frame in your main loop to organize profiling data by frame.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
