//! Ranked extraction strategies.
//!
//! Each category tries its strategies in rank order and keeps the first
//! non-empty result. Within one strategy, candidates are visited in
//! document order and the first one that normalizes to a non-empty list
//! wins; later candidates are never merged in.

mod declaration;
mod expose;
mod inline;
mod instance;

use oxc_ast::ast::{Argument, CallExpression, Expression, ObjectExpression};
use serde::Serialize;
use sinopia_carton::MemberList;

use crate::ast::{find_local_init, unwrap_expression};
use crate::category::Category;
use crate::lookup::ModuleScope;
use crate::normalize::Normalizer;
use crate::surface::ExtractOptions;

/// A way of finding a category's declaration in a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// The category's key in the component options object.
    InlineOptions,
    /// A `define*` compiler macro call.
    DeclarationCall,
    /// The `$props` / `$slots` member of a constructable default export.
    InstanceType,
    /// `expose(...)` through the setup context, or an `expose: [...]` option.
    ExposeHeuristics,
}

const INPUTS: &[Strategy] = &[Strategy::InlineOptions, Strategy::DeclarationCall, Strategy::InstanceType];
const EVENTS: &[Strategy] = &[Strategy::InlineOptions, Strategy::DeclarationCall];
const SLOTS: &[Strategy] = &[Strategy::InlineOptions, Strategy::DeclarationCall, Strategy::InstanceType];
// `expose: [...]` is read by the heuristics so it unions with `expose(...)` calls.
const EXPOSED: &[Strategy] = &[Strategy::DeclarationCall, Strategy::ExposeHeuristics];

impl Strategy {
    /// Strategies applicable to `category`, best first.
    pub fn ranked(category: Category) -> &'static [Strategy] {
        match category {
            Category::Inputs => INPUTS,
            Category::Events => EVENTS,
            Category::Slots => SLOTS,
            Category::ExposedMembers => EXPOSED,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InlineOptions => "inline-options",
            Self::DeclarationCall => "declaration-call",
            Self::InstanceType => "instance-type",
            Self::ExposeHeuristics => "expose-heuristics",
        }
    }

    pub(crate) fn run(self, cx: &StrategyContext<'_, '_>, category: Category) -> MemberList {
        match self {
            Self::InlineOptions => inline::extract(cx, category),
            Self::DeclarationCall => declaration::extract(cx, category),
            Self::InstanceType => instance::extract(cx, category),
            Self::ExposeHeuristics => expose::extract(cx),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a strategy needs to look at one module.
pub(crate) struct StrategyContext<'c, 'a> {
    pub scope: &'c ModuleScope<'c, 'a>,
    pub normalizer: &'c Normalizer<'c>,
    pub options: &'c ExtractOptions,
}

impl<'c, 'a> StrategyContext<'c, 'a> {
    /// Normalize a value expression in this module.
    pub fn collect(&self, expr: &Expression<'_>) -> MemberList {
        let mut out = MemberList::new();
        self.normalizer.collect(expr, self.scope, &mut out);
        out
    }

    /// Component options object passed to a definer call, if `call` is one.
    ///
    /// Accepts `defineComponent({...})`, the function-signature form
    /// `defineComponent(setup, {...})`, and a local variable holding the
    /// options object.
    pub fn component_options<'n>(&'n self, call: &'n CallExpression<'a>) -> Option<&'n ObjectExpression<'a>> {
        let callee = crate::ast::callee_identifier(call)?;
        if !self.options.is_component_definer(callee) {
            return None;
        }
        call.arguments
            .iter()
            .take(2)
            .find_map(|arg| self.options_object(arg))
    }

    fn options_object<'n>(&'n self, arg: &'n Argument<'a>) -> Option<&'n ObjectExpression<'a>> {
        let expr = arg.as_expression()?;
        match unwrap_expression(expr) {
            Expression::ObjectExpression(obj) => Some(obj),
            Expression::Identifier(id) => {
                let init = find_local_init(self.scope.program, id.name.as_str())?;
                match unwrap_expression(init) {
                    Expression::ObjectExpression(obj) => Some(obj),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
