//! Small AST helpers shared by the extraction strategies and the matcher.

use oxc_ast::ast::{
    BindingPatternKind, CallExpression, Declaration, Expression, ObjectExpression,
    ObjectPropertyKind, Program, PropertyKey, Statement, TSSignature, TSType, VariableDeclaration,
};
use sinopia_carton::CompactString;

/// Strip parentheses and type-level wrappers (`as`, `satisfies`, `<T>x`, `!`).
pub fn unwrap_expression<'b, 'a>(expr: &'b Expression<'a>) -> &'b Expression<'a> {
    match expr {
        Expression::ParenthesizedExpression(paren) => unwrap_expression(&paren.expression),
        Expression::TSAsExpression(ts_as) => unwrap_expression(&ts_as.expression),
        Expression::TSSatisfiesExpression(ts_satisfies) => {
            unwrap_expression(&ts_satisfies.expression)
        }
        Expression::TSTypeAssertion(assertion) => unwrap_expression(&assertion.expression),
        Expression::TSNonNullExpression(non_null) => unwrap_expression(&non_null.expression),
        _ => expr,
    }
}

/// Like [`unwrap_expression`], also stripping `await`.
pub fn unwrap_await<'b, 'a>(expr: &'b Expression<'a>) -> &'b Expression<'a> {
    match unwrap_expression(expr) {
        Expression::AwaitExpression(await_expr) => unwrap_await(&await_expr.argument),
        other => other,
    }
}

/// The type of the outermost cast around `expr`, if any.
pub fn cast_type<'b, 'a>(expr: &'b Expression<'a>) -> Option<&'b TSType<'a>> {
    match expr {
        Expression::ParenthesizedExpression(paren) => cast_type(&paren.expression),
        Expression::TSAsExpression(ts_as) => Some(&ts_as.type_annotation),
        Expression::TSSatisfiesExpression(ts_satisfies) => Some(&ts_satisfies.type_annotation),
        Expression::TSTypeAssertion(assertion) => Some(&assertion.type_annotation),
        _ => None,
    }
}

/// Static name of a property key. Computed keys only count when they are
/// string literals or expression-free template literals.
pub fn property_key_name(key: &PropertyKey<'_>, computed: bool) -> Option<CompactString> {
    match key {
        PropertyKey::StaticIdentifier(id) if !computed => Some(CompactString::new(id.name.as_str())),
        PropertyKey::StringLiteral(s) => Some(CompactString::new(s.value.as_str())),
        // `f64` display prints integral values without a fraction or an
        // exponent, which matches JS key coercion below 1e21.
        PropertyKey::NumericLiteral(n) if !computed => Some(CompactString::new(n.value.to_string())),
        PropertyKey::TemplateLiteral(t) if t.expressions.is_empty() => t
            .quasis
            .first()
            .and_then(|q| q.value.cooked.as_ref())
            .map(|cooked| CompactString::new(cooked.as_str())),
        _ => None,
    }
}

/// Look up a property with a static key in an object literal.
pub fn object_property<'b, 'a>(
    obj: &'b ObjectExpression<'a>,
    key: &str,
) -> Option<&'b Expression<'a>> {
    obj.properties.iter().find_map(|prop| match prop {
        ObjectPropertyKind::ObjectProperty(p) => {
            let name = property_key_name(&p.key, p.computed)?;
            (name == key).then_some(&p.value)
        }
        ObjectPropertyKind::SpreadProperty(_) => None,
    })
}

/// Name of an identifier callee (`defineProps(...)`).
pub fn callee_identifier<'b>(call: &'b CallExpression<'_>) -> Option<&'b str> {
    match unwrap_expression(&call.callee) {
        Expression::Identifier(id) => Some(id.name.as_str()),
        _ => None,
    }
}

/// Last segment of the callee: the identifier itself or the property of a
/// static member access (`wrapper.setProps` -> `setProps`).
pub fn callee_tail<'b>(call: &'b CallExpression<'_>) -> Option<&'b str> {
    match unwrap_expression(&call.callee) {
        Expression::Identifier(id) => Some(id.name.as_str()),
        Expression::StaticMemberExpression(member) => Some(member.property.name.as_str()),
        _ => None,
    }
}

fn top_level_variables<'b, 'a>(
    program: &'b Program<'a>,
) -> impl Iterator<Item = &'b VariableDeclaration<'a>> + 'b {
    program.body.iter().filter_map(|stmt| match stmt {
        Statement::VariableDeclaration(decl) => Some(&**decl),
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::VariableDeclaration(decl)) => Some(&**decl),
            _ => None,
        },
        _ => None,
    })
}

/// Initializer of the module-level variable `name`, if it has one.
pub fn find_local_init<'b, 'a>(program: &'b Program<'a>, name: &str) -> Option<&'b Expression<'a>> {
    top_level_variables(program)
        .flat_map(|decl| decl.declarations.iter())
        .find_map(|declarator| match &declarator.id.kind {
            BindingPatternKind::BindingIdentifier(id) if id.name.as_str() == name => {
                declarator.init.as_ref()
            }
            _ => None,
        })
}

/// Type annotation of the module-level variable `name`
/// (`declare const _default: T`).
pub fn find_local_annotation<'b, 'a>(program: &'b Program<'a>, name: &str) -> Option<&'b TSType<'a>> {
    top_level_variables(program)
        .flat_map(|decl| decl.declarations.iter())
        .find_map(|declarator| match &declarator.id.kind {
            BindingPatternKind::BindingIdentifier(id) if id.name.as_str() == name => declarator
                .id
                .type_annotation
                .as_ref()
                .map(|annotation| &annotation.type_annotation),
            _ => None,
        })
}

/// A module-level type declaration.
pub enum LocalType<'b, 'a> {
    Interface(&'b [TSSignature<'a>]),
    Alias(&'b TSType<'a>),
}

/// Find a module-level `interface` or `type` alias by name.
pub fn find_local_type<'b, 'a>(program: &'b Program<'a>, name: &str) -> Option<LocalType<'b, 'a>> {
    program.body.iter().find_map(|stmt| {
        let decl = match stmt {
            Statement::TSInterfaceDeclaration(iface) if iface.id.name.as_str() == name => {
                return Some(LocalType::Interface(&iface.body.body));
            }
            Statement::TSTypeAliasDeclaration(alias) if alias.id.name.as_str() == name => {
                return Some(LocalType::Alias(&alias.type_annotation));
            }
            Statement::ExportNamedDeclaration(export) => export.declaration.as_ref()?,
            _ => return None,
        };
        match decl {
            Declaration::TSInterfaceDeclaration(iface) if iface.id.name.as_str() == name => {
                Some(LocalType::Interface(&iface.body.body))
            }
            Declaration::TSTypeAliasDeclaration(alias) if alias.id.name.as_str() == name => {
                Some(LocalType::Alias(&alias.type_annotation))
            }
            _ => None,
        }
    })
}
