//! Exposed-member heuristics for components without `defineExpose`.
//!
//! Two sources are unioned, structural matches first:
//! - `setup(props, { expose })` (or `setup(props, ctx)`) followed by
//!   `expose({ ... })` / `ctx.expose({ ... })`;
//! - an array-valued `expose` option.

use std::ops::ControlFlow;

use oxc_ast::ast::{
    Argument, BindingPattern, BindingPatternKind, Expression, FormalParameters,
};
use oxc_ast::visit::walk;
use oxc_ast::Visit;
use sinopia_carton::{CompactString, FxHashSet, MemberList};

use super::StrategyContext;
use crate::ast::{object_property, property_key_name, unwrap_expression};
use crate::category::Category;
use crate::walk::{for_each_call, for_each_object};

const EXPOSE: &str = "expose";

pub(super) fn extract(cx: &StrategyContext<'_, '_>) -> MemberList {
    let mut found = structural(cx);
    found.extend_from(&array_option(cx));
    found
}

fn structural(cx: &StrategyContext<'_, '_>) -> MemberList {
    let mut context = SetupContextNames::default();
    context.visit_program(cx.scope.program);

    let mut found = MemberList::new();
    if context.is_empty() {
        return found;
    }

    for_each_call(cx.scope.program, |call| {
        let is_expose = match unwrap_expression(&call.callee) {
            Expression::Identifier(id) => context.expose_fns.contains(id.name.as_str()),
            Expression::StaticMemberExpression(member) => {
                member.property.name.as_str() == EXPOSE
                    && matches!(
                        unwrap_expression(&member.object),
                        Expression::Identifier(obj) if context.contexts.contains(obj.name.as_str())
                    )
            }
            _ => false,
        };
        if !is_expose {
            return ControlFlow::Continue(());
        }
        if let Some(arg) = call.arguments.first().and_then(Argument::as_expression) {
            if matches!(unwrap_expression(arg), Expression::ObjectExpression(_)) {
                cx.normalizer.collect(arg, cx.scope, &mut found);
            }
        }
        ControlFlow::Continue(())
    });
    found
}

fn array_option(cx: &StrategyContext<'_, '_>) -> MemberList {
    let key = Category::ExposedMembers.options_key();
    let mut found = MemberList::new();
    for_each_object(cx.scope.program, |obj| {
        if let Some(value) = object_property(obj, key) {
            if matches!(unwrap_expression(value), Expression::ArrayExpression(_)) {
                found.extend_from(&cx.collect(value));
            }
        }
        ControlFlow::Continue(())
    });
    found
}

/// Names a function's second parameter binds to the setup context.
#[derive(Default)]
struct SetupContextNames {
    /// Locals bound to the destructured `expose` function.
    expose_fns: FxHashSet<CompactString>,
    /// Locals bound to the whole context object.
    contexts: FxHashSet<CompactString>,
}

impl SetupContextNames {
    fn is_empty(&self) -> bool {
        self.expose_fns.is_empty() && self.contexts.is_empty()
    }

    fn record(&mut self, pattern: &BindingPattern<'_>) {
        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(id) => {
                self.contexts.insert(CompactString::new(id.name.as_str()));
            }
            BindingPatternKind::ObjectPattern(obj) => {
                for prop in obj.properties.iter() {
                    if property_key_name(&prop.key, prop.computed).as_deref() != Some(EXPOSE) {
                        continue;
                    }
                    if let Some(local) = bound_name(&prop.value) {
                        self.expose_fns.insert(local);
                    }
                }
            }
            BindingPatternKind::AssignmentPattern(assign) => self.record(&assign.left),
            BindingPatternKind::ArrayPattern(_) => {}
        }
    }
}

fn bound_name(pattern: &BindingPattern<'_>) -> Option<CompactString> {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(id) => Some(CompactString::new(id.name.as_str())),
        BindingPatternKind::AssignmentPattern(assign) => bound_name(&assign.left),
        _ => None,
    }
}

impl<'a> Visit<'a> for SetupContextNames {
    fn visit_formal_parameters(&mut self, it: &FormalParameters<'a>) {
        if let Some(second) = it.items.get(1) {
            self.record(&second.pattern);
        }
        walk::walk_formal_parameters(self, it);
    }
}
