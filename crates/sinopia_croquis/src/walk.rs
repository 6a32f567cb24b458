//! Pre-order search over a module's syntax tree.
//!
//! Strategies look for "the first call / object literal in document order
//! that yields something", so the finders here stop as soon as the callback
//! breaks.

use std::ops::ControlFlow;

use oxc_ast::ast::{CallExpression, ObjectExpression, Program};
use oxc_ast::visit::walk;
use oxc_ast::Visit;

/// Visit every call expression in document order until `f` breaks.
pub fn for_each_call<'a, F>(program: &Program<'a>, f: F)
where
    F: FnMut(&CallExpression<'a>) -> ControlFlow<()>,
{
    let mut finder = CallFinder { f, done: false };
    finder.visit_program(program);
}

/// Visit every object literal in document order until `f` breaks.
pub fn for_each_object<'a, F>(program: &Program<'a>, f: F)
where
    F: FnMut(&ObjectExpression<'a>) -> ControlFlow<()>,
{
    let mut finder = ObjectFinder { f, done: false };
    finder.visit_program(program);
}

struct CallFinder<F> {
    f: F,
    done: bool,
}

impl<'a, F> Visit<'a> for CallFinder<F>
where
    F: FnMut(&CallExpression<'a>) -> ControlFlow<()>,
{
    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if self.done {
            return;
        }
        if (self.f)(it).is_break() {
            self.done = true;
            return;
        }
        walk::walk_call_expression(self, it);
    }
}

struct ObjectFinder<F> {
    f: F,
    done: bool,
}

impl<'a, F> Visit<'a> for ObjectFinder<F>
where
    F: FnMut(&ObjectExpression<'a>) -> ControlFlow<()>,
{
    fn visit_object_expression(&mut self, it: &ObjectExpression<'a>) {
        if self.done {
            return;
        }
        if (self.f)(it).is_break() {
            self.done = true;
            return;
        }
        walk::walk_object_expression(self, it);
    }
}
