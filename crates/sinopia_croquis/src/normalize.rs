//! Declaration normalization.
//!
//! Turns whatever literal a strategy found (array, object, bare reference,
//! or a type argument) into member names. References are resolved against
//! the module's own bindings first, then through its imports.

use oxc_ast::ast::{
    ArrayExpressionElement, Expression, FormalParameters, ObjectPropertyKind, TSLiteral,
    TSSignature, TSType, TSTypeName,
};
use sinopia_carton::{MemberList, MissKind};

use crate::ast::{cast_type, find_local_init, find_local_type, property_key_name, unwrap_expression, LocalType};
use crate::lookup::{CrossModuleLookup, ModuleScope};

/// Reference hops followed inside one module before giving up.
const MAX_HOPS: usize = 16;

/// Normalizes declarations into [`MemberList`]s.
pub struct Normalizer<'l> {
    lookup: &'l CrossModuleLookup<'l>,
}

impl<'l> Normalizer<'l> {
    pub fn new(lookup: &'l CrossModuleLookup<'l>) -> Self {
        Self { lookup }
    }

    /// Collect the names declared by a value expression.
    pub fn collect(&self, expr: &Expression<'_>, scope: &ModuleScope<'_, '_>, out: &mut MemberList) {
        self.collect_value(expr, scope, out, 0);
    }

    /// Collect the names declared by a type argument.
    pub fn collect_type(&self, ty: &TSType<'_>, scope: &ModuleScope<'_, '_>, out: &mut MemberList) {
        self.collect_type_hops(ty, scope, out, 0);
    }

    /// Collect names from type members: call signatures contribute their
    /// first parameter's string literal type, property and method signatures
    /// their key.
    pub fn collect_signatures(&self, members: &[TSSignature<'_>], out: &mut MemberList) {
        for member in members {
            match member {
                TSSignature::TSCallSignatureDeclaration(call_sig) => {
                    first_param_literals(&call_sig.params, out);
                }
                TSSignature::TSPropertySignature(prop) => {
                    if let Some(name) = property_key_name(&prop.key, prop.computed) {
                        out.push(name);
                    }
                }
                TSSignature::TSMethodSignature(method) => {
                    if let Some(name) = property_key_name(&method.key, method.computed) {
                        out.push(name);
                    }
                }
                _ => {}
            }
        }
    }

    /// Resolve a bare reference: local binding first, then the import chain.
    pub fn collect_reference(&self, name: &str, scope: &ModuleScope<'_, '_>, out: &mut MemberList) {
        self.collect_reference_hops(name, scope, out, 0);
    }

    fn collect_value(
        &self,
        expr: &Expression<'_>,
        scope: &ModuleScope<'_, '_>,
        out: &mut MemberList,
        hops: usize,
    ) {
        match unwrap_expression(expr) {
            Expression::ArrayExpression(arr) => {
                for elem in arr.elements.iter() {
                    match elem {
                        ArrayExpressionElement::StringLiteral(s) => {
                            out.push(s.value.as_str());
                        }
                        ArrayExpressionElement::Identifier(id) => {
                            out.push(id.name.as_str());
                        }
                        ArrayExpressionElement::TemplateLiteral(t) if t.expressions.is_empty() => {
                            if let Some(cooked) = t.quasis.first().and_then(|q| q.value.cooked.as_ref()) {
                                out.push(cooked.as_str());
                            }
                        }
                        ArrayExpressionElement::SpreadElement(spread) => {
                            if let Expression::Identifier(id) = unwrap_expression(&spread.argument) {
                                self.collect_reference_hops(id.name.as_str(), scope, out, hops + 1);
                            }
                        }
                        _ => {}
                    }
                }
            }
            Expression::ObjectExpression(obj) => {
                for prop in obj.properties.iter() {
                    match prop {
                        ObjectPropertyKind::ObjectProperty(p) => {
                            if let Some(name) = property_key_name(&p.key, p.computed) {
                                out.push(name);
                            }
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            if let Expression::Identifier(id) = unwrap_expression(&spread.argument) {
                                self.collect_reference_hops(id.name.as_str(), scope, out, hops + 1);
                            }
                        }
                    }
                }
            }
            Expression::Identifier(id) => {
                let before = out.len();
                self.collect_reference_hops(id.name.as_str(), scope, out, hops + 1);
                if out.len() == before {
                    if let Some(ty) = cast_type(expr) {
                        self.collect_type_hops(ty, scope, out, hops + 1);
                    }
                }
            }
            _ => match cast_type(expr) {
                Some(ty) => self.collect_type_hops(ty, scope, out, hops + 1),
                None => self.lookup.tracer().miss(
                    MissKind::UnsupportedShape,
                    format!("non-literal declaration in {}", scope.path.display()),
                ),
            },
        }
    }

    fn collect_reference_hops(
        &self,
        name: &str,
        scope: &ModuleScope<'_, '_>,
        out: &mut MemberList,
        hops: usize,
    ) {
        if hops > MAX_HOPS {
            self.lookup
                .tracer()
                .miss(MissKind::Cycle, format!("{} in {}", name, scope.path.display()));
            return;
        }

        if let Some(init) = find_local_init(scope.program, name) {
            self.collect_value(init, scope, out, hops);
            return;
        }

        if let Some(binding) = scope.imports.get(name) {
            self.lookup.resolve(scope.path, binding, |expr, nested| {
                self.collect_value(expr, nested, out, 0);
            });
        }
    }

    fn collect_type_hops(
        &self,
        ty: &TSType<'_>,
        scope: &ModuleScope<'_, '_>,
        out: &mut MemberList,
        hops: usize,
    ) {
        if hops > MAX_HOPS {
            return;
        }
        match ty {
            TSType::TSTypeLiteral(lit) => self.collect_signatures(&lit.members, out),
            TSType::TSFunctionType(func) => first_param_literals(&func.params, out),
            TSType::TSIntersectionType(inter) => {
                for ty in inter.types.iter() {
                    self.collect_type_hops(ty, scope, out, hops + 1);
                }
            }
            TSType::TSParenthesizedType(paren) => {
                self.collect_type_hops(&paren.type_annotation, scope, out, hops + 1);
            }
            TSType::TSTypeReference(reference) => {
                let TSTypeName::IdentifierReference(id) = &reference.type_name else {
                    return;
                };
                match find_local_type(scope.program, id.name.as_str()) {
                    Some(LocalType::Interface(members)) => self.collect_signatures(members, out),
                    Some(LocalType::Alias(alias)) => self.collect_type_hops(alias, scope, out, hops + 1),
                    None => {
                        // Wrapper types such as `SlotsType<{ ... }>` carry the
                        // declaration in their first type argument.
                        if let Some(first) = reference
                            .type_parameters
                            .as_ref()
                            .and_then(|args| args.params.first())
                        {
                            self.collect_type_hops(first, scope, out, hops + 1);
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// String literal types of the first parameter (`(e: 'change' | 'input', ...)`).
fn first_param_literals(params: &FormalParameters<'_>, out: &mut MemberList) {
    let Some(first) = params.items.first() else {
        return;
    };
    let Some(annotation) = &first.pattern.type_annotation else {
        return;
    };
    push_string_literals(&annotation.type_annotation, out);
}

fn push_string_literals(ty: &TSType<'_>, out: &mut MemberList) {
    match ty {
        TSType::TSLiteralType(lit) => {
            if let TSLiteral::StringLiteral(s) = &lit.literal {
                out.push(s.value.as_str());
            }
        }
        TSType::TSUnionType(union) => {
            for ty in union.types.iter() {
                push_string_literals(ty, out);
            }
        }
        TSType::TSParenthesizedType(paren) => push_string_literals(&paren.type_annotation, out),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryHost, NodeResolver};
    use crate::imports::collect_imports;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;
    use sinopia_carton::Tracer;
    use std::path::Path;

    /// Normalize the initializer of `const target = ...` in `src`.
    fn normalize(src: &str, host: &MemoryHost) -> (MemberList, Tracer) {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, src, SourceType::ts()).parse();
        assert!(ret.errors.is_empty());
        let imports = collect_imports(&ret.program);
        let scope = ModuleScope {
            program: &ret.program,
            imports: &imports,
            path: Path::new("/src/Comp.ts"),
        };

        let resolver = NodeResolver::new();
        let tracer = Tracer::quiet();
        let mut out = MemberList::new();
        {
            let lookup = CrossModuleLookup::new(host, &resolver, &tracer);
            let normalizer = Normalizer::new(&lookup);
            let init = find_local_init(&ret.program, "target").unwrap();
            normalizer.collect(init, &scope, &mut out);
        }
        (out, tracer)
    }

    #[test]
    fn test_array_and_object_forms_are_equivalent() {
        let host = MemoryHost::new();
        let (array, _) = normalize("const target = ['title', 'count']", &host);
        let (object, _) = normalize("const target = { title: String, count: { type: Number } }", &host);
        assert_eq!(array, object);
        assert_eq!(array.as_slice(), ["title", "count"]);
    }

    #[test]
    fn test_identifier_elements_are_placeholders() {
        let host = MemoryHost::new();
        let (list, _) = normalize("const target = ['a', SOME_EVENT, `tpl`]", &host);
        assert_eq!(list.as_slice(), ["a", "SOME_EVENT", "tpl"]);
    }

    #[test]
    fn test_local_spread_then_import_spread() {
        let host = MemoryHost::new().with_file(
            "/src/shared.ts",
            "export const sharedProps = { size: String, title: String }",
        );
        let src = "import { sharedProps } from './shared'\n\
                   const base = { id: String }\n\
                   const target = { title: String, ...base, ...sharedProps }";
        let (list, tracer) = normalize(src, &host);
        assert_eq!(list.as_slice(), ["title", "id", "size"]);
        assert!(tracer.misses().is_empty());
    }

    #[test]
    fn test_chained_imports_use_target_module_map() {
        let host = MemoryHost::new()
            .with_file(
                "/src/shared/index.ts",
                "import { inner } from './inner'\nexport const outer = { ...inner, b: 1 }",
            )
            .with_file("/src/shared/inner.ts", "export const inner = { a: 1 }");
        let src = "import { outer } from './shared'\nconst target = { ...outer }";
        let (list, _) = normalize(src, &host);
        assert_eq!(list.as_slice(), ["a", "b"]);
    }

    #[test]
    fn test_unresolvable_spread_is_skipped() {
        let host = MemoryHost::new();
        let src = "import { gone } from './gone'\nconst target = { a: 1, ...gone, [dyn]: 2, ...globalThing }";
        let (list, tracer) = normalize(src, &host);
        assert_eq!(list.as_slice(), ["a"]);
        assert!(tracer.has_miss(MissKind::UnresolvedSpecifier));
    }

    #[test]
    fn test_cast_wrapped_literals() {
        let host = MemoryHost::new();
        let (list, _) = normalize("const target = (['x', 'y'] as const) satisfies readonly string[]", &host);
        assert_eq!(list.as_slice(), ["x", "y"]);
    }

    #[test]
    fn test_slots_type_cast() {
        let host = MemoryHost::new();
        let src = "const target = Object as SlotsType<{ default: { item: string }; footer: {} }>";
        let (list, _) = normalize(src, &host);
        assert_eq!(list.as_slice(), ["default", "footer"]);
    }

    #[test]
    fn test_self_referencing_binding_terminates() {
        let host = MemoryHost::new();
        let (list, tracer) = normalize("const target = { a: 1, ...target }", &host);
        assert_eq!(list.as_slice(), ["a"]);
        assert!(tracer.has_miss(MissKind::Cycle));
    }
}
