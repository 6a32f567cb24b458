//! Import binding collection.
//!
//! Maps each locally bound name to the module and export it came from.
//! Namespace and side-effect imports bind nothing the extractors can chase,
//! so they are left out.

use oxc_ast::ast::{ImportDeclarationSpecifier, Program, Statement};
use sinopia_carton::{CompactString, FxHashMap};

/// Export name used for default imports and default exports.
pub const DEFAULT_EXPORT: &str = "default";

/// Where a local name comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// Name bound in the importing module.
    pub local: CompactString,
    /// Module specifier as written (`./events`, `@/shared`).
    pub source: CompactString,
    /// Exported name in the source module, or [`DEFAULT_EXPORT`].
    pub imported: CompactString,
}

/// Import bindings of one module, keyed by local name.
#[derive(Debug, Clone, Default)]
pub struct ImportMap {
    bindings: FxHashMap<CompactString, ImportBinding>,
}

impl ImportMap {
    #[inline]
    pub fn get(&self, local: &str) -> Option<&ImportBinding> {
        self.bindings.get(local)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Insert a binding; a later declaration of the same local name wins.
    pub fn insert(&mut self, binding: ImportBinding) {
        self.bindings.insert(binding.local.clone(), binding);
    }
}

/// Collect the import bindings of a module. Never fails.
pub fn collect_imports(program: &Program<'_>) -> ImportMap {
    let mut map = ImportMap::default();

    for stmt in program.body.iter() {
        let Statement::ImportDeclaration(import) = stmt else {
            continue;
        };
        let Some(specifiers) = &import.specifiers else {
            continue;
        };
        let source = CompactString::new(import.source.value.as_str());

        for spec in specifiers.iter() {
            match spec {
                ImportDeclarationSpecifier::ImportSpecifier(s) => {
                    map.insert(ImportBinding {
                        local: CompactString::new(s.local.name.as_str()),
                        source: source.clone(),
                        imported: CompactString::new(s.imported.name().as_str()),
                    });
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    map.insert(ImportBinding {
                        local: CompactString::new(s.local.name.as_str()),
                        source: source.clone(),
                        imported: CompactString::const_new(DEFAULT_EXPORT),
                    });
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => {}
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn collect(src: &str) -> ImportMap {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, src, SourceType::ts()).parse();
        collect_imports(&ret.program)
    }

    #[test]
    fn test_named_renamed_and_default() {
        let map = collect(
            "import Base, { buttonEvents, sizes as buttonSizes } from './base'\n\
             import type { Props } from './types'\n\
             import * as ns from './ns'\n\
             import './side-effect'",
        );

        let base = map.get("Base").unwrap();
        assert_eq!(base.source, "./base");
        assert_eq!(base.imported, DEFAULT_EXPORT);

        let events = map.get("buttonEvents").unwrap();
        assert_eq!(events.imported, "buttonEvents");

        let sizes = map.get("buttonSizes").unwrap();
        assert_eq!(sizes.imported, "sizes");
        assert!(map.get("sizes").is_none());

        assert_eq!(map.get("Props").unwrap().source, "./types");
        assert!(map.get("ns").is_none());
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_last_declaration_wins() {
        let map = collect("import { a } from './one'\nimport { b as a } from './two'");
        let a = map.get("a").unwrap();
        assert_eq!(a.source, "./two");
        assert_eq!(a.imported, "b");
    }

    #[test]
    fn test_no_imports() {
        assert!(collect("export const x = 1").is_empty());
    }
}
