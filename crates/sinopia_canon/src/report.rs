//! Coverage reports.

use std::path::Path;

use oxc_allocator::Allocator;
use serde::Serialize;
use sinopia_carton::{CompactString, MemberList, Tracer};
use sinopia_croquis::{parse_program, Category, ComponentSurface, ModuleSource};

use crate::evidence::Evidence;
use crate::options::MatchOptions;

/// Whether one declared member is exercised by the test file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageEntry {
    pub name: CompactString,
    pub covered: bool,
}

/// Per-category coverage, in the order of the component surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub inputs: Vec<CoverageEntry>,
    pub events: Vec<CoverageEntry>,
    pub slots: Vec<CoverageEntry>,
    pub exposed_members: Vec<CoverageEntry>,
}

impl CoverageReport {
    pub fn get(&self, category: Category) -> &[CoverageEntry] {
        match category {
            Category::Inputs => &self.inputs,
            Category::Events => &self.events,
            Category::Slots => &self.slots,
            Category::ExposedMembers => &self.exposed_members,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<CoverageEntry> {
        match category {
            Category::Inputs => &mut self.inputs,
            Category::Events => &mut self.events,
            Category::Slots => &mut self.slots,
            Category::ExposedMembers => &mut self.exposed_members,
        }
    }

    /// A report with every declared member uncovered.
    pub fn uncovered(surface: &ComponentSurface) -> Self {
        Self::build(surface, |_, _| false)
    }

    /// Number of covered members across all categories.
    pub fn covered_count(&self) -> usize {
        self.entries().filter(|entry| entry.covered).count()
    }

    /// Number of declared members across all categories.
    pub fn total(&self) -> usize {
        self.entries().count()
    }

    /// Declared members with no evidence, per category.
    pub fn missing(&self, category: Category) -> impl Iterator<Item = &str> + '_ {
        self.get(category)
            .iter()
            .filter(|entry| !entry.covered)
            .map(|entry| entry.name.as_str())
    }

    fn entries(&self) -> impl Iterator<Item = &CoverageEntry> + '_ {
        Category::ALL.iter().flat_map(move |&category| self.get(category).iter())
    }

    fn build(surface: &ComponentSurface, mut covered: impl FnMut(Category, &str) -> bool) -> Self {
        let mut report = Self::default();
        for category in Category::ALL {
            *report.get_mut(category) = entries(surface.get(category), |name| covered(category, name));
        }
        report
    }
}

fn entries(members: &MemberList, mut covered: impl FnMut(&str) -> bool) -> Vec<CoverageEntry> {
    members
        .iter()
        .map(|name| CoverageEntry {
            name: CompactString::new(name),
            covered: covered(name),
        })
        .collect()
}

/// Matches component surfaces against test files.
#[derive(Debug, Clone, Default)]
pub struct CoverageMatcher {
    options: MatchOptions,
}

impl CoverageMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Compute coverage of `surface` by the test file at `test_path`.
    ///
    /// The test file is not primary input: when it fails to parse, every
    /// member is reported uncovered and a warning goes through `tracer`.
    pub fn match_source(
        &self,
        surface: &ComponentSurface,
        test_path: &Path,
        test_source: impl Into<String>,
        tracer: &Tracer,
    ) -> CoverageReport {
        let source = ModuleSource::new(test_path, test_source.into());
        let allocator = Allocator::default();
        let program = match parse_program(&allocator, &source) {
            Ok(program) => program,
            Err(message) => {
                tracer.warn(format_args!(
                    "{}: test file not parsed, reporting all members uncovered: {}",
                    test_path.display(),
                    message
                ));
                return CoverageReport::uncovered(surface);
            }
        };

        let evidence = Evidence::collect(&program, &self.options);
        let report = CoverageReport::build(surface, |category, name| match category {
            Category::Inputs => evidence.has_input(name),
            Category::Events => evidence.has_event(name),
            Category::Slots => evidence.has_slot(name),
            Category::ExposedMembers => evidence.has_exposed(name),
        });
        tracer.step(format_args!(
            "{}: {}/{} members covered",
            test_path.display(),
            report.covered_count(),
            report.total()
        ));
        report
    }
}

/// Match `surface` against a test source with default options.
pub fn match_coverage(
    surface: &ComponentSurface,
    test_path: &Path,
    test_source: impl Into<String>,
    tracer: &Tracer,
) -> CoverageReport {
    CoverageMatcher::default().match_source(surface, test_path, test_source, tracer)
}
