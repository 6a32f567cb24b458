//! Inline options property (`defineComponent({ props: [...] })`).

use std::ops::ControlFlow;

use sinopia_carton::MemberList;

use super::StrategyContext;
use crate::ast::object_property;
use crate::category::Category;
use crate::walk::{for_each_call, for_each_object};

pub(super) fn extract(cx: &StrategyContext<'_, '_>, category: Category) -> MemberList {
    let key = category.options_key();
    let program = cx.scope.program;

    let mut found = MemberList::new();
    for_each_call(program, |call| {
        let Some(value) = cx.component_options(call).and_then(|obj| object_property(obj, key)) else {
            return ControlFlow::Continue(());
        };
        found = cx.collect(value);
        if found.is_empty() {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    });
    if !found.is_empty() {
        return found;
    }

    // Plain `export default { props: [...] }` and other bare option objects.
    for_each_object(program, |obj| {
        let Some(value) = object_property(obj, key) else {
            return ControlFlow::Continue(());
        };
        found = cx.collect(value);
        if found.is_empty() {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    });
    found
}
