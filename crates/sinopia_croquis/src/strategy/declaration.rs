//! Compiler macro declarations (`defineProps`, `defineEmits`, ...).
//!
//! Type arguments take precedence over the runtime argument, matching how
//! the SFC compiler treats `defineProps<T>()`. `defineModel` adds to inputs
//! and events on top of whatever the primary macro declared.

use std::ops::ControlFlow;

use oxc_ast::ast::{Argument, CallExpression, Expression};
use sinopia_carton::{CompactString, MemberList};

use super::StrategyContext;
use crate::ast::{callee_identifier, unwrap_expression};
use crate::category::Category;
use crate::walk::for_each_call;

const DEFINE_MODEL: &str = "defineModel";
const DEFAULT_MODEL: &str = "modelValue";

pub(super) fn extract(cx: &StrategyContext<'_, '_>, category: Category) -> MemberList {
    let macro_name = category.declaration_macro();
    let program = cx.scope.program;

    let mut found = MemberList::new();
    for_each_call(program, |call| {
        if callee_identifier(call) != Some(macro_name) {
            return ControlFlow::Continue(());
        }
        found = declared_members(cx, call);
        if found.is_empty() {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    });

    if matches!(category, Category::Inputs | Category::Events) {
        for_each_call(program, |call| {
            if callee_identifier(call) == Some(DEFINE_MODEL) {
                let model = model_name(call);
                match category {
                    Category::Events => found.push(format!("update:{}", model)),
                    _ => found.push(model),
                };
            }
            ControlFlow::Continue(())
        });
    }

    found
}

fn declared_members(cx: &StrategyContext<'_, '_>, call: &CallExpression<'_>) -> MemberList {
    let mut out = MemberList::new();
    if let Some(type_args) = &call.type_parameters {
        for ty in type_args.params.iter() {
            cx.normalizer.collect_type(ty, cx.scope, &mut out);
        }
    }
    if out.is_empty() {
        if let Some(arg) = call.arguments.first().and_then(Argument::as_expression) {
            cx.normalizer.collect(arg, cx.scope, &mut out);
        }
    }
    out
}

/// `defineModel('title', ...)` -> `title`; no name argument -> `modelValue`.
fn model_name(call: &CallExpression<'_>) -> CompactString {
    call.arguments
        .first()
        .and_then(Argument::as_expression)
        .and_then(|expr| match unwrap_expression(expr) {
            Expression::StringLiteral(s) => Some(CompactString::new(s.value.as_str())),
            _ => None,
        })
        .unwrap_or_else(|| CompactString::const_new(DEFAULT_MODEL))
}
