//! Component surface extraction.
//!
//! Runs the ranked strategies of every category over one component module
//! and collects the results into a [`ComponentSurface`].

use std::path::Path;

use oxc_allocator::Allocator;
use serde::Serialize;
use sinopia_carton::{CompactString, MemberList, Tracer};

use crate::category::Category;
use crate::error::{ExtractError, ExtractResult};
use crate::host::{ModuleHost, PathResolver};
use crate::imports::collect_imports;
use crate::lookup::{CrossModuleLookup, ModuleScope};
use crate::normalize::Normalizer;
use crate::parse::{parse_program, ModuleSource};
use crate::strategy::{Strategy, StrategyContext};

/// Callees recognized as component-defining functions by default.
pub const DEFAULT_COMPONENT_DEFINERS: &[&str] =
    &["defineComponent", "defineNuxtComponent", "defineCustomElement"];

/// Extraction settings.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Functions whose first argument is a component options object.
    pub component_definers: Vec<CompactString>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            component_definers: DEFAULT_COMPONENT_DEFINERS
                .iter()
                .map(|name| CompactString::new(name))
                .collect(),
        }
    }
}

impl ExtractOptions {
    #[inline]
    pub fn is_component_definer(&self, name: &str) -> bool {
        self.component_definers.iter().any(|definer| definer == name)
    }

    /// Add a project-specific definer (a wrapper around `defineComponent`).
    pub fn with_component_definer(mut self, name: impl Into<CompactString>) -> Self {
        let name = name.into();
        if !self.is_component_definer(&name) {
            self.component_definers.push(name);
        }
        self
    }
}

/// The public API surface of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSurface {
    pub inputs: MemberList,
    pub events: MemberList,
    pub slots: MemberList,
    pub exposed_members: MemberList,
}

impl ComponentSurface {
    pub fn get(&self, category: Category) -> &MemberList {
        match category {
            Category::Inputs => &self.inputs,
            Category::Events => &self.events,
            Category::Slots => &self.slots,
            Category::ExposedMembers => &self.exposed_members,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut MemberList {
        match category {
            Category::Inputs => &mut self.inputs,
            Category::Events => &mut self.events,
            Category::Slots => &mut self.slots,
            Category::ExposedMembers => &mut self.exposed_members,
        }
    }

    /// True when no category declares anything.
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|&category| self.get(category).is_empty())
    }
}

/// One category's members and the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub category: Category,
    pub members: MemberList,
    /// `None` when every strategy came up empty.
    pub strategy: Option<Strategy>,
}

/// Extracts component surfaces, resolving imports through a [`ModuleHost`].
pub struct SurfaceExtractor<'h> {
    host: &'h dyn ModuleHost,
    resolver: &'h dyn PathResolver,
    tracer: &'h Tracer,
    options: ExtractOptions,
}

impl<'h> SurfaceExtractor<'h> {
    pub fn new(host: &'h dyn ModuleHost, resolver: &'h dyn PathResolver, tracer: &'h Tracer) -> Self {
        Self {
            host,
            resolver,
            tracer,
            options: ExtractOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Read and extract the component at `path`.
    pub fn extract_file(&self, path: &Path) -> ExtractResult<ComponentSurface> {
        let raw = self.read_primary(path)?;
        self.extract_source(path, raw)
    }

    /// Extract a component whose text is already in memory. Imports are
    /// still resolved relative to `path`.
    pub fn extract_source(&self, path: &Path, source: impl Into<String>) -> ExtractResult<ComponentSurface> {
        let mut surface = ComponentSurface::default();
        for extraction in self.extract_detailed(path, source)? {
            *surface.get_mut(extraction.category) = extraction.members;
        }
        Ok(surface)
    }

    /// Like [`Self::extract_source`], keeping which strategy answered each
    /// category.
    pub fn extract_detailed(&self, path: &Path, source: impl Into<String>) -> ExtractResult<Vec<Extraction>> {
        let source = ModuleSource::new(path, source.into());
        let allocator = Allocator::default();
        let program = parse_program(&allocator, &source).map_err(|message| ExtractError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        let imports = collect_imports(&program);
        let scope = ModuleScope {
            program: &program,
            imports: &imports,
            path,
        };
        let lookup = CrossModuleLookup::new(self.host, self.resolver, self.tracer);
        let normalizer = Normalizer::new(&lookup);
        let cx = StrategyContext {
            scope: &scope,
            normalizer: &normalizer,
            options: &self.options,
        };

        let extractions = Category::ALL
            .iter()
            .map(|&category| {
                let extraction = run_category(&cx, category);
                self.tracer.step(format_args!(
                    "{}: {} {} via {}",
                    path.display(),
                    extraction.members.len(),
                    category,
                    extraction.strategy.map_or("nothing", Strategy::as_str),
                ));
                extraction
            })
            .collect();
        Ok(extractions)
    }

    fn read_primary(&self, path: &Path) -> ExtractResult<String> {
        self.host.read_text(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn run_category(cx: &StrategyContext<'_, '_>, category: Category) -> Extraction {
    for &strategy in Strategy::ranked(category) {
        let members = strategy.run(cx, category);
        if !members.is_empty() {
            return Extraction {
                category,
                members,
                strategy: Some(strategy),
            };
        }
    }
    Extraction {
        category,
        members: MemberList::new(),
        strategy: None,
    }
}
