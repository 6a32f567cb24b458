//! Cross-module export lookup.
//!
//! Given an import binding, loads the source module through the
//! [`ModuleHost`], parses it, and locates the exported declaration. The node
//! only lives as long as the module's arena, so it is handed to a callback
//! together with that module's own [`ModuleScope`] for further chaining.
//!
//! Every lookup re-reads and re-parses the file. Chains are guarded by the
//! set of `(module, export)` pairs currently being resolved, so cyclic
//! re-exports end in a [`MissKind::Cycle`] instead of recursing forever.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPatternKind, Declaration, Expression, ModuleExportName, Program, Statement,
};
use sinopia_carton::{CompactString, MissKind, Tracer};

use crate::ast::{find_local_init, unwrap_expression};
use crate::host::{normalize_path, ModuleHost, PathResolver};
use crate::imports::{collect_imports, ImportBinding, ImportMap, DEFAULT_EXPORT};
use crate::parse::{parse_program, ModuleSource};

/// Identifier-to-identifier hops followed inside one module.
const MAX_LOCAL_HOPS: usize = 16;

/// A parsed module as seen by the extractors.
pub struct ModuleScope<'b, 'a> {
    pub program: &'b Program<'a>,
    pub imports: &'b ImportMap,
    pub path: &'b Path,
}

impl ModuleScope<'_, '_> {
    /// Directory specifiers in this module are resolved against.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

type Found<'f> = dyn FnMut(&Expression<'_>, &ModuleScope<'_, '_>) + 'f;

/// Where a name points within one module.
enum Located<'b, 'a> {
    Node(&'b Expression<'a>),
    Chain { source: &'b str, name: &'b str },
    Unsupported,
    NotFound,
}

/// Resolves exported declarations across module boundaries.
pub struct CrossModuleLookup<'h> {
    host: &'h dyn ModuleHost,
    resolver: &'h dyn PathResolver,
    tracer: &'h Tracer,
    active: RefCell<Vec<(PathBuf, CompactString)>>,
}

impl<'h> CrossModuleLookup<'h> {
    pub fn new(host: &'h dyn ModuleHost, resolver: &'h dyn PathResolver, tracer: &'h Tracer) -> Self {
        Self {
            host,
            resolver,
            tracer,
            active: RefCell::new(Vec::new()),
        }
    }

    #[inline]
    pub fn tracer(&self) -> &'h Tracer {
        self.tracer
    }

    #[inline]
    pub fn host(&self) -> &'h dyn ModuleHost {
        self.host
    }

    /// Resolve `binding` (imported by the module at `importer`) and run `f`
    /// on the exported declaration. Returns `None` on any miss.
    pub fn resolve<R>(
        &self,
        importer: &Path,
        binding: &ImportBinding,
        mut f: impl FnMut(&Expression<'_>, &ModuleScope<'_, '_>) -> R,
    ) -> Option<R> {
        let mut out = None;
        self.resolve_specifier(importer, &binding.source, &binding.imported, &mut |expr, scope| {
            out = Some(f(expr, scope));
        });
        out
    }

    /// Like [`Self::resolve`] but starting from an already-resolved file path.
    pub fn resolve_path<R>(
        &self,
        path: &Path,
        exported: &str,
        mut f: impl FnMut(&Expression<'_>, &ModuleScope<'_, '_>) -> R,
    ) -> Option<R> {
        let mut out = None;
        self.resolve_in_file(path, exported, &mut |expr, scope| {
            out = Some(f(expr, scope));
        });
        out
    }

    fn resolve_specifier(&self, importer: &Path, specifier: &str, exported: &str, f: &mut Found<'_>) -> bool {
        let from_dir = importer.parent().unwrap_or_else(|| Path::new(""));
        let Some(path) = self.resolver.resolve(specifier, from_dir, self.host) else {
            self.tracer.miss(
                MissKind::UnresolvedSpecifier,
                format!("'{}' imported from {}", specifier, importer.display()),
            );
            return false;
        };
        self.resolve_in_file(&path, exported, f)
    }

    fn resolve_in_file(&self, path: &Path, exported: &str, f: &mut Found<'_>) -> bool {
        let path = normalize_path(path);
        if !self.host.exists(&path) {
            self.tracer
                .miss(MissKind::FileNotFound, path.display().to_string());
            return false;
        }

        let key = (path.clone(), CompactString::new(exported));
        if self.active.borrow().contains(&key) {
            self.tracer.miss(
                MissKind::Cycle,
                format!("{}#{}", path.display(), exported),
            );
            return false;
        }

        self.active.borrow_mut().push(key);
        let found = self.search_file(&path, exported, f);
        self.active.borrow_mut().pop();
        found
    }

    fn search_file(&self, path: &Path, exported: &str, f: &mut Found<'_>) -> bool {
        let raw = match self.host.read_text(path) {
            Ok(raw) => raw,
            Err(e) => {
                self.tracer
                    .miss(MissKind::Unreadable, format!("{}: {}", path.display(), e));
                return false;
            }
        };

        let source = ModuleSource::new(path, raw);
        let allocator = Allocator::default();
        let program = match parse_program(&allocator, &source) {
            Ok(program) => program,
            Err(message) => {
                self.tracer
                    .miss(MissKind::ParseFailed, format!("{}: {}", path.display(), message));
                return false;
            }
        };
        let imports = collect_imports(&program);
        let scope = ModuleScope {
            program: &program,
            imports: &imports,
            path,
        };

        match locate_export(&scope, exported) {
            Located::Node(expr) => {
                self.tracer
                    .step(format_args!("found '{}' in {}", exported, path.display()));
                f(expr, &scope);
                true
            }
            Located::Chain { source, name } => self.resolve_specifier(path, source, name, f),
            Located::Unsupported => {
                self.tracer.miss(
                    MissKind::UnsupportedShape,
                    format!("{}#{}", path.display(), exported),
                );
                false
            }
            Located::NotFound => {
                if exported != DEFAULT_EXPORT {
                    for source in star_export_sources(&program) {
                        if self.resolve_specifier(path, source, exported, f) {
                            return true;
                        }
                    }
                }
                self.tracer.miss(
                    MissKind::ExportNotFound,
                    format!("{}#{}", path.display(), exported),
                );
                false
            }
        }
    }
}

/// Find `exported` in the module, in document order, first match wins.
fn locate_export<'b, 'a>(scope: &ModuleScope<'b, 'a>, exported: &str) -> Located<'b, 'a> {
    for stmt in scope.program.body.iter() {
        match stmt {
            Statement::ExportNamedDeclaration(export) => {
                if let Some(Declaration::VariableDeclaration(decl)) = &export.declaration {
                    let declares = decl.declarations.iter().any(|d| {
                        matches!(
                            &d.id.kind,
                            BindingPatternKind::BindingIdentifier(id) if id.name.as_str() == exported
                        )
                    });
                    if declares {
                        return match find_local_init(scope.program, exported) {
                            Some(init) => classify_value(scope, init, 0),
                            None => Located::Unsupported,
                        };
                    }
                }

                for spec in export.specifiers.iter() {
                    if export_name(&spec.exported) != exported {
                        continue;
                    }
                    let local = export_name(&spec.local);
                    return match &export.source {
                        Some(source) => Located::Chain {
                            source: source.value.as_str(),
                            name: local,
                        },
                        None => follow_identifier(scope, local, 0),
                    };
                }
            }
            Statement::ExportDefaultDeclaration(export) if exported == DEFAULT_EXPORT => {
                return match export.declaration.as_expression() {
                    Some(expr) => classify_default(scope, expr),
                    None => Located::Unsupported,
                };
            }
            _ => {}
        }
    }
    Located::NotFound
}

fn export_name<'b>(name: &'b ModuleExportName<'_>) -> &'b str {
    match name {
        ModuleExportName::IdentifierName(id) => id.name.as_str(),
        ModuleExportName::IdentifierReference(id) => id.name.as_str(),
        ModuleExportName::StringLiteral(s) => s.value.as_str(),
    }
}

/// Sources of `export * from '...'` clauses, in document order.
fn star_export_sources<'b>(program: &'b Program<'_>) -> impl Iterator<Item = &'b str> + 'b {
    program.body.iter().filter_map(|stmt| match stmt {
        Statement::ExportAllDeclaration(all) if all.exported.is_none() => {
            Some(all.source.value.as_str())
        }
        _ => None,
    })
}

/// Accept array/object literals (casts unwrapped) and follow identifiers.
fn classify_value<'b, 'a>(
    scope: &ModuleScope<'b, 'a>,
    init: &'b Expression<'a>,
    hops: usize,
) -> Located<'b, 'a> {
    match unwrap_expression(init) {
        Expression::ArrayExpression(_) | Expression::ObjectExpression(_) => Located::Node(init),
        Expression::Identifier(id) => follow_identifier(scope, id.name.as_str(), hops + 1),
        _ => Located::Unsupported,
    }
}

/// Default exports hand back whatever expression they export; identifiers
/// are followed first.
fn classify_default<'b, 'a>(scope: &ModuleScope<'b, 'a>, expr: &'b Expression<'a>) -> Located<'b, 'a> {
    match unwrap_expression(expr) {
        Expression::Identifier(id) => follow_identifier(scope, id.name.as_str(), 1),
        _ => Located::Node(expr),
    }
}

/// Resolve a module-local name: its own initializer first, then its import.
fn follow_identifier<'b, 'a>(scope: &ModuleScope<'b, 'a>, name: &str, hops: usize) -> Located<'b, 'a> {
    if hops > MAX_LOCAL_HOPS {
        return Located::Unsupported;
    }
    if let Some(init) = find_local_init(scope.program, name) {
        return classify_value(scope, init, hops);
    }
    if let Some(binding) = scope.imports.get(name) {
        return Located::Chain {
            source: binding.source.as_str(),
            name: binding.imported.as_str(),
        };
    }
    Located::NotFound
}
