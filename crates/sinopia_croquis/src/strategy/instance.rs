//! Instance-type derivation.
//!
//! Compiled component declarations (`.d.ts` output, class components) have
//! no options object to read. Their default export is constructable, and
//! the instance it constructs carries `$props` / `$slots` members whose
//! types list the category's members.

use oxc_ast::ast::{
    Argument, Class, ClassElement, Expression, ExportDefaultDeclarationKind, Statement,
    TSSignature, TSType, TSTypeName,
};
use sinopia_carton::MemberList;

use super::StrategyContext;
use crate::ast::{
    callee_identifier, cast_type, find_local_annotation, find_local_init, find_local_type, property_key_name,
    unwrap_expression, LocalType,
};
use crate::category::Category;

/// Members Vue adds to every component's `$props`.
static RESERVED_PROPS: phf::Set<&'static str> = phf::phf_set! {
    "ref",
    "ref_for",
    "ref_key",
    "key",
    "class",
    "style",
    "onVnodeBeforeMount",
    "onVnodeMounted",
    "onVnodeBeforeUpdate",
    "onVnodeUpdated",
    "onVnodeBeforeUnmount",
    "onVnodeUnmounted",
};

/// Property decorators of `vue-property-decorator` that declare a prop.
static PROP_DECORATORS: phf::Set<&'static str> = phf::phf_set! {
    "Prop",
    "Model",
    "PropSync",
};

/// Type-alias hops followed while looking for a constructor.
const MAX_TYPE_HOPS: usize = 8;

/// Whether `name` is one of the members every component instance accepts.
#[inline]
pub(crate) fn is_reserved_prop(name: &str) -> bool {
    RESERVED_PROPS.contains(name)
}

pub(super) fn extract(cx: &StrategyContext<'_, '_>, category: Category) -> MemberList {
    let Some(bag) = category.instance_bag() else {
        return MemberList::new();
    };

    let mut raw = MemberList::new();
    match default_export(cx) {
        Some(DefaultExport::Class(class)) => class_members(cx, class, bag, category, &mut raw),
        Some(DefaultExport::Value(expr)) => value_members(cx, expr, bag, category, &mut raw, 0),
        None => {}
    }

    raw.iter().filter(|name| !is_reserved_prop(name)).collect()
}

enum DefaultExport<'b, 'a> {
    Class(&'b Class<'a>),
    Value(&'b Expression<'a>),
}

fn default_export<'b, 'a>(cx: &'b StrategyContext<'_, 'a>) -> Option<DefaultExport<'b, 'a>> {
    cx.scope.program.body.iter().find_map(|stmt| {
        let Statement::ExportDefaultDeclaration(export) = stmt else {
            return None;
        };
        match &export.declaration {
            ExportDefaultDeclarationKind::ClassDeclaration(class) => Some(DefaultExport::Class(&**class)),
            kind => kind.as_expression().map(DefaultExport::Value),
        }
    })
}

fn value_members<'a>(
    cx: &StrategyContext<'_, 'a>,
    expr: &Expression<'a>,
    bag: &str,
    category: Category,
    out: &mut MemberList,
    hops: usize,
) {
    if hops > MAX_TYPE_HOPS {
        return;
    }
    if let Some(ty) = cast_type(expr) {
        if let Some(instance) = constructed_instance(cx, ty, 0) {
            bag_members(cx, instance, bag, out, 0);
            return;
        }
    }

    match unwrap_expression(expr) {
        Expression::ClassExpression(class) => class_members(cx, class, bag, category, out),
        Expression::Identifier(id) => {
            let name = id.name.as_str();
            if let Some(class) = local_class(cx, name) {
                class_members(cx, class, bag, category, out);
            } else if let Some(init) = find_local_init(cx.scope.program, name) {
                value_members(cx, init, bag, category, out, hops + 1);
            } else if let Some(instance) = find_local_annotation(cx.scope.program, name)
                .and_then(|ty| constructed_instance(cx, ty, 0))
            {
                bag_members(cx, instance, bag, out, 0);
            }
        }
        _ => {}
    }
}

fn local_class<'b, 'a>(cx: &'b StrategyContext<'_, 'a>, name: &str) -> Option<&'b Class<'a>> {
    cx.scope.program.body.iter().find_map(|stmt| match stmt {
        Statement::ClassDeclaration(class)
            if class.id.as_ref().is_some_and(|id| id.name.as_str() == name) =>
        {
            Some(&**class)
        }
        _ => None,
    })
}

/// Instance type produced by `new` on a value of type `ty`.
fn constructed_instance<'b, 'a>(
    cx: &'b StrategyContext<'_, 'a>,
    ty: &'b TSType<'a>,
    hops: usize,
) -> Option<&'b TSType<'a>> {
    if hops > MAX_TYPE_HOPS {
        return None;
    }
    match ty {
        TSType::TSConstructorType(ctor) => Some(&ctor.return_type.type_annotation),
        TSType::TSTypeLiteral(lit) => construct_signature(&lit.members),
        TSType::TSParenthesizedType(paren) => constructed_instance(cx, &paren.type_annotation, hops + 1),
        TSType::TSIntersectionType(inter) => inter
            .types
            .iter()
            .find_map(|ty| constructed_instance(cx, ty, hops + 1)),
        TSType::TSTypeReference(reference) => {
            let TSTypeName::IdentifierReference(id) = &reference.type_name else {
                return None;
            };
            match find_local_type(cx.scope.program, id.name.as_str())? {
                LocalType::Interface(members) => construct_signature(members),
                LocalType::Alias(alias) => constructed_instance(cx, alias, hops + 1),
            }
        }
        _ => None,
    }
}

fn construct_signature<'b, 'a>(members: &'b [TSSignature<'a>]) -> Option<&'b TSType<'a>> {
    members.iter().find_map(|member| match member {
        TSSignature::TSConstructSignatureDeclaration(ctor) => {
            ctor.return_type.as_ref().map(|ret| &ret.type_annotation)
        }
        _ => None,
    })
}

/// Read the members of the `bag` property of an instance type.
fn bag_members(
    cx: &StrategyContext<'_, '_>,
    instance: &TSType<'_>,
    bag: &str,
    out: &mut MemberList,
    hops: usize,
) {
    if hops > MAX_TYPE_HOPS {
        return;
    }
    match instance {
        TSType::TSTypeLiteral(lit) => bag_in_signatures(cx, &lit.members, bag, out),
        TSType::TSParenthesizedType(paren) => bag_members(cx, &paren.type_annotation, bag, out, hops + 1),
        TSType::TSIntersectionType(inter) => {
            for ty in inter.types.iter() {
                bag_members(cx, ty, bag, out, hops + 1);
            }
        }
        TSType::TSTypeReference(reference) => {
            let TSTypeName::IdentifierReference(id) = &reference.type_name else {
                return;
            };
            match find_local_type(cx.scope.program, id.name.as_str()) {
                Some(LocalType::Interface(members)) => bag_in_signatures(cx, members, bag, out),
                Some(LocalType::Alias(alias)) => bag_members(cx, alias, bag, out, hops + 1),
                None => {}
            }
        }
        _ => {}
    }
}

fn bag_in_signatures(cx: &StrategyContext<'_, '_>, members: &[TSSignature<'_>], bag: &str, out: &mut MemberList) {
    for member in members {
        let TSSignature::TSPropertySignature(prop) = member else {
            continue;
        };
        if property_key_name(&prop.key, prop.computed).as_deref() != Some(bag) {
            continue;
        }
        if let Some(annotation) = &prop.type_annotation {
            cx.normalizer.collect_type(&annotation.type_annotation, cx.scope, out);
        }
    }
}

fn class_members(cx: &StrategyContext<'_, '_>, class: &Class<'_>, bag: &str, category: Category, out: &mut MemberList) {
    for element in class.body.body.iter() {
        let ClassElement::PropertyDefinition(prop) = element else {
            continue;
        };
        let Some(key) = property_key_name(&prop.key, prop.computed) else {
            continue;
        };

        if key == bag {
            if let Some(annotation) = &prop.type_annotation {
                cx.normalizer.collect_type(&annotation.type_annotation, cx.scope, out);
            }
            continue;
        }

        if category == Category::Inputs {
            for decorator in prop.decorators.iter() {
                if let Some(name) = decorated_prop_name(&decorator.expression, key.as_str()) {
                    out.push(name);
                }
            }
        }
    }
}

/// Prop name declared by a decorator, if it is a prop decorator.
///
/// `@PropSync('name')` syncs the class property with a differently named
/// prop, so its first argument names the prop.
fn decorated_prop_name(expr: &Expression<'_>, key: &str) -> Option<String> {
    match unwrap_expression(expr) {
        Expression::Identifier(id) if PROP_DECORATORS.contains(id.name.as_str()) => Some(key.to_string()),
        Expression::CallExpression(call) => {
            let callee = callee_identifier(call)?;
            if !PROP_DECORATORS.contains(callee) {
                return None;
            }
            if callee == "PropSync" {
                if let Some(Expression::StringLiteral(s)) =
                    call.arguments.first().and_then(Argument::as_expression).map(unwrap_expression)
                {
                    return Some(s.value.to_string());
                }
            }
            Some(key.to_string())
        }
        _ => None,
    }
}
