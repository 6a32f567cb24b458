//! The extraction + coverage pipeline.

use std::path::Path;

use serde::Serialize;
use sinopia_canon::{CoverageMatcher, CoverageReport};
use sinopia_carton::{ResolveMiss, Tracer};
use sinopia_croquis::{ComponentSurface, ExtractOptions, ModuleHost, NodeResolver, OsHost, SurfaceExtractor};

use crate::config::{load_config, SinopiaConfig};
use crate::error::{SinopiaError, SinopiaResult};

/// Result of analyzing one component against one test file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub surface: ComponentSurface,
    pub coverage: CoverageReport,
    /// Non-fatal resolution misses hit while extracting the surface.
    #[serde(skip)]
    pub misses: Vec<ResolveMiss>,
}

/// Analyzes components and their tests.
///
/// Holds no per-analysis state: every call gets its own [`Tracer`], so one
/// analyzer can serve many calls.
#[derive(Debug, Clone)]
pub struct Analyzer<H = OsHost> {
    host: H,
    resolver: NodeResolver,
    extract: ExtractOptions,
    matcher: CoverageMatcher,
    verbose: bool,
}

impl Default for Analyzer<OsHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer<OsHost> {
    /// Analyzer over the real file system with default settings.
    pub fn new() -> Self {
        Self {
            host: OsHost,
            resolver: NodeResolver::new(),
            extract: ExtractOptions::default(),
            matcher: CoverageMatcher::default(),
            verbose: false,
        }
    }

    /// Analyzer configured from `sinopia.config.json` in `root`.
    pub fn load(root: &Path) -> SinopiaResult<Self> {
        let config = load_config(root)?;
        Ok(Self::from_config(&config, root))
    }

    pub fn from_config(config: &SinopiaConfig, root: &Path) -> Self {
        Self {
            host: OsHost,
            resolver: config.resolver(root),
            extract: config.extract_options(),
            matcher: CoverageMatcher::new(config.match_options()),
            verbose: config.verbose,
        }
    }
}

impl<H: ModuleHost> Analyzer<H> {
    /// Swap the module host (an in-memory host for unsaved buffers).
    pub fn with_host<H2: ModuleHost>(self, host: H2) -> Analyzer<H2> {
        Analyzer {
            host,
            resolver: self.resolver,
            extract: self.extract,
            matcher: self.matcher,
            verbose: self.verbose,
        }
    }

    pub fn with_resolver(mut self, resolver: NodeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Extract the surface of the component at `component`.
    pub fn extract(&self, component: &Path) -> SinopiaResult<ComponentSurface> {
        let tracer = Tracer::new(self.verbose);
        Ok(self.extractor(&tracer).extract_file(component)?)
    }

    /// Extract the component surface and match it against the test file.
    pub fn analyze(&self, component: &Path, test: &Path) -> SinopiaResult<AnalysisResult> {
        let tracer = Tracer::new(self.verbose);
        let surface = self.extractor(&tracer).extract_file(component)?;
        let test_source = self.read(test)?;
        Ok(self.cover(surface, test, test_source, &tracer))
    }

    /// Like [`Self::analyze`] with both texts already in memory. Imports of
    /// the component are still resolved through the host.
    pub fn analyze_sources(
        &self,
        component: &Path,
        component_source: impl Into<String>,
        test: &Path,
        test_source: impl Into<String>,
    ) -> SinopiaResult<AnalysisResult> {
        let tracer = Tracer::new(self.verbose);
        let surface = self.extractor(&tracer).extract_source(component, component_source)?;
        Ok(self.cover(surface, test, test_source, &tracer))
    }

    fn cover(
        &self,
        surface: ComponentSurface,
        test: &Path,
        test_source: impl Into<String>,
        tracer: &Tracer,
    ) -> AnalysisResult {
        let coverage = self.matcher.match_source(&surface, test, test_source, tracer);
        AnalysisResult {
            surface,
            coverage,
            misses: tracer.misses(),
        }
    }

    fn extractor<'t>(&'t self, tracer: &'t Tracer) -> SurfaceExtractor<'t> {
        SurfaceExtractor::new(&self.host, &self.resolver, tracer).with_options(self.extract.clone())
    }

    fn read(&self, path: &Path) -> SinopiaResult<String> {
        self.host.read_text(path).map_err(|source| SinopiaError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
