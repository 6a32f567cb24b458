//! # Sinopia
//!
//! Vue component API surface extraction and test coverage matching.
//!
//! A **sinopia** is the reddish underdrawing a fresco painter sketches on the
//! wall before any colour goes on. This crate draws that underdrawing for a
//! component: which props, events, slots and exposed members it offers, and
//! which of them its test file actually touches.
//!
//! ## Crates
//!
//! - [`carton`] - Shared member lists, tracer and naming helpers
//! - [`croquis`] - Component surface extraction
//! - [`canon`] - Test coverage matching
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//! use sinopia::{Analyzer, MemoryHost};
//!
//! let analyzer = Analyzer::new().with_host(MemoryHost::new());
//! let result = analyzer
//!     .analyze_sources(
//!         Path::new("/app/src/Toggle.vue"),
//!         "<script setup>\ndefineEmits(['on', 'off'])\n</script>",
//!         Path::new("/app/tests/Toggle.spec.ts"),
//!         "expect(mount(Toggle).emitted('on')).toBeTruthy()",
//!     )
//!     .unwrap();
//! assert_eq!(result.coverage.covered_count(), 1);
//! assert_eq!(result.coverage.total(), 2);
//! ```

mod analyzer;
pub mod config;
mod error;

pub use analyzer::{AnalysisResult, Analyzer};
pub use config::{load_config, ConfigError, SinopiaConfig, CONFIG_FILE_NAME};
pub use error::{SinopiaError, SinopiaResult};

/// Shared member lists, tracer and naming helpers.
pub use sinopia_carton as carton;

/// Component surface extraction.
pub use sinopia_croquis as croquis;

/// Test coverage matching.
pub use sinopia_canon as canon;

pub use sinopia_canon::{CoverageEntry, CoverageReport};
pub use sinopia_carton::{MemberList, ResolveMiss, Tracer};
pub use sinopia_croquis::{Category, ComponentSurface, MemoryHost, OsHost};

/// Install a `tracing` subscriber writing to stderr.
///
/// Resolution misses are logged at debug level, so they only show up when
/// `verbose` is set (and the analyzer itself is verbose). Safe to call more
/// than once; only the first call installs anything.
pub fn init_tracing(verbose: bool) {
    use std::sync::Once;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_max_level(level)
            .with_target(false)
            .try_init();
    });
}
