//! Evidence collection over a parsed test file.
//!
//! Two passes: the first learns which local names hold mount options,
//! `emitted()` collections and component instances (`wrapper.vm`); the
//! second reads the evidence itself, so declarations nested inside test
//! callbacks work the same as top-level ones.

use oxc_ast::ast::{
    Argument, BindingPatternKind, CallExpression, ComputedMemberExpression, Expression,
    ObjectExpression, ObjectPropertyKind, Program, StaticMemberExpression, VariableDeclarator,
};
use oxc_ast::visit::walk;
use oxc_ast::Visit;
use sinopia_carton::{camelize, event_from_handler, CompactString, FxHashSet};
use sinopia_croquis::ast::{callee_tail, object_property, property_key_name, unwrap_await, unwrap_expression};

use crate::options::MatchOptions;

/// Option keys holding props in mount options.
static PROPS_KEYS: phf::Set<&'static str> = phf::phf_set! {
    "props",
    "propsData",
};

/// Option keys holding fallthrough attributes, where listeners may live.
static ATTRS_KEYS: phf::Set<&'static str> = phf::phf_set! {
    "attrs",
    "listeners",
};

/// Option keys holding slot content in mount options.
static SLOT_KEYS: phf::Set<&'static str> = phf::phf_set! {
    "slots",
    "scopedSlots",
};

/// Wrapper methods that replace props after mounting.
static PROP_UPDATERS: phf::Set<&'static str> = phf::phf_set! {
    "setProps",
    "rerender",
};

const EMITTED: &str = "emitted";
const VM: &str = "vm";
const EXPECT: &str = "expect";
const TO_HAVE_PROPERTY: &str = "toHaveProperty";

/// Names the test file shows evidence for, per category.
///
/// Inputs and events are stored camelized, so `max-height` and `maxHeight`
/// (or `row-click` and `onRowClick`) meet in the middle.
#[derive(Debug, Default)]
pub struct Evidence {
    inputs: FxHashSet<CompactString>,
    events: FxHashSet<CompactString>,
    slots: FxHashSet<CompactString>,
    exposed: FxHashSet<CompactString>,
}

impl Evidence {
    /// Collect evidence from a parsed test file.
    pub fn collect(program: &Program<'_>, options: &MatchOptions) -> Self {
        let mut bindings = Bindings {
            options,
            mount_option_vars: FxHashSet::default(),
            emitted_vars: FxHashSet::default(),
            vm_vars: FxHashSet::default(),
        };
        bindings.visit_program(program);

        let mut collector = Collector {
            bindings: &bindings,
            evidence: Evidence::default(),
        };
        collector.visit_program(program);
        collector.evidence
    }

    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.contains(&camelize(name))
    }

    pub fn has_event(&self, name: &str) -> bool {
        self.events.contains(&camelize(name))
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.contains(name)
    }

    pub fn has_exposed(&self, name: &str) -> bool {
        self.exposed.contains(name)
    }

    fn add_input(&mut self, name: &str) {
        self.inputs.insert(camelize(name));
    }

    fn add_event(&mut self, name: &str) {
        self.events.insert(camelize(name));
    }
}

/// First pass: what local names stand for.
struct Bindings<'o> {
    options: &'o MatchOptions,
    /// Variables passed as the options argument of a mount call.
    mount_option_vars: FxHashSet<CompactString>,
    /// Variables bound to `wrapper.emitted()`.
    emitted_vars: FxHashSet<CompactString>,
    /// Variables bound to `wrapper.vm`.
    vm_vars: FxHashSet<CompactString>,
}

impl Bindings<'_> {
    fn is_mount_call(&self, call: &CallExpression<'_>) -> bool {
        callee_tail(call).is_some_and(|name| self.options.is_mount_function(name))
    }

    /// `wrapper.emitted()` with no event argument.
    fn is_emitted_collection(&self, expr: &Expression<'_>) -> bool {
        match unwrap_await(expr) {
            Expression::CallExpression(call) => {
                call.arguments.is_empty() && callee_tail(call) == Some(EMITTED)
            }
            Expression::Identifier(id) => self.emitted_vars.contains(id.name.as_str()),
            _ => false,
        }
    }

    /// `wrapper.vm`, or a variable bound to it.
    fn is_instance(&self, expr: &Expression<'_>) -> bool {
        match unwrap_await(expr) {
            Expression::StaticMemberExpression(member) => member.property.name.as_str() == VM,
            Expression::Identifier(id) => self.vm_vars.contains(id.name.as_str()),
            _ => false,
        }
    }
}

impl<'a> Visit<'a> for Bindings<'_> {
    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        if let (BindingPatternKind::BindingIdentifier(id), Some(init)) = (&it.id.kind, &it.init) {
            let name = CompactString::new(id.name.as_str());
            if self.is_emitted_collection(init) {
                self.emitted_vars.insert(name);
            } else if self.is_instance(init) {
                self.vm_vars.insert(name);
            }
        }
        walk::walk_variable_declarator(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if self.is_mount_call(it) {
            if let Some(Expression::Identifier(id)) = it.arguments.get(1).and_then(Argument::as_expression).map(unwrap_expression) {
                self.mount_option_vars.insert(CompactString::new(id.name.as_str()));
            }
        }
        walk::walk_call_expression(self, it);
    }
}

/// Second pass: the evidence.
struct Collector<'b, 'o> {
    bindings: &'b Bindings<'o>,
    evidence: Evidence,
}

impl Collector<'_, '_> {
    fn read_mount_options(&mut self, options: &ObjectExpression<'_>) {
        for prop in options.properties.iter() {
            let ObjectPropertyKind::ObjectProperty(prop) = prop else {
                continue;
            };
            let Some(key) = property_key_name(&prop.key, prop.computed) else {
                continue;
            };
            let Expression::ObjectExpression(value) = unwrap_expression(&prop.value) else {
                continue;
            };

            if PROPS_KEYS.contains(key.as_str()) {
                self.read_props(value);
            } else if ATTRS_KEYS.contains(key.as_str()) {
                self.read_listeners(value);
            } else if SLOT_KEYS.contains(key.as_str()) {
                for name in object_keys(value) {
                    self.evidence.slots.insert(name);
                }
            }
        }
    }

    /// Props, with `onX` listeners counting for event `x`.
    fn read_props(&mut self, props: &ObjectExpression<'_>) {
        for key in object_keys(props) {
            if let Some(event) = event_from_handler(&key) {
                self.evidence.add_event(&event);
            }
            self.evidence.add_input(&key);
        }
    }

    fn read_listeners(&mut self, attrs: &ObjectExpression<'_>) {
        for key in object_keys(attrs) {
            if let Some(event) = event_from_handler(&key) {
                self.evidence.add_event(&event);
            }
        }
    }

    fn read_call(&mut self, call: &CallExpression<'_>) {
        let Some(tail) = callee_tail(call) else {
            return;
        };

        if self.bindings.is_mount_call(call) {
            if let Some(Expression::ObjectExpression(options)) =
                call.arguments.get(1).and_then(Argument::as_expression).map(unwrap_expression)
            {
                self.read_mount_options(options);
            }
            return;
        }

        if PROP_UPDATERS.contains(tail) {
            if let Some(Expression::ObjectExpression(props)) =
                call.arguments.first().and_then(Argument::as_expression).map(unwrap_expression)
            {
                self.read_props(props);
            }
            return;
        }

        match tail {
            EMITTED => {
                if let Some(name) = first_string_argument(call) {
                    self.evidence.add_event(name);
                }
            }
            TO_HAVE_PROPERTY => {
                if self.expects_emitted_collection(call) {
                    if let Some(name) = first_string_argument(call) {
                        self.evidence.add_event(name);
                    }
                }
            }
            _ => {}
        }
    }

    /// `expect(<emitted collection>).toHaveProperty(...)`.
    fn expects_emitted_collection(&self, call: &CallExpression<'_>) -> bool {
        let Expression::StaticMemberExpression(member) = unwrap_expression(&call.callee) else {
            return false;
        };
        let Expression::CallExpression(expect) = unwrap_expression(&member.object) else {
            return false;
        };
        callee_tail(expect) == Some(EXPECT)
            && expect
                .arguments
                .first()
                .and_then(Argument::as_expression)
                .is_some_and(|arg| self.bindings.is_emitted_collection(arg))
    }

    fn read_member(&mut self, object: &Expression<'_>, property: &str) {
        if self.bindings.is_emitted_collection(object) {
            self.evidence.add_event(property);
        } else if self.bindings.is_instance(object) {
            self.evidence.exposed.insert(CompactString::new(property));
        }
    }
}

impl<'a> Visit<'a> for Collector<'_, '_> {
    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        if let (BindingPatternKind::BindingIdentifier(id), Some(init)) = (&it.id.kind, &it.init) {
            if self.bindings.mount_option_vars.contains(id.name.as_str()) {
                if let Expression::ObjectExpression(options) = unwrap_expression(init) {
                    self.read_mount_options(options);
                }
            }
        }
        walk::walk_variable_declarator(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        self.read_call(it);
        walk::walk_call_expression(self, it);
    }

    fn visit_static_member_expression(&mut self, it: &StaticMemberExpression<'a>) {
        self.read_member(&it.object, it.property.name.as_str());
        walk::walk_static_member_expression(self, it);
    }

    fn visit_computed_member_expression(&mut self, it: &ComputedMemberExpression<'a>) {
        if let Expression::StringLiteral(key) = unwrap_expression(&it.expression) {
            self.read_member(&it.object, key.value.as_str());
        }
        walk::walk_computed_member_expression(self, it);
    }
}

fn object_keys<'b>(obj: &'b ObjectExpression<'_>) -> impl Iterator<Item = CompactString> + 'b {
    obj.properties.iter().filter_map(|prop| match prop {
        ObjectPropertyKind::ObjectProperty(p) => property_key_name(&p.key, p.computed),
        ObjectPropertyKind::SpreadProperty(_) => None,
    })
}

fn first_string_argument<'b>(call: &'b CallExpression<'_>) -> Option<&'b str> {
    match call.arguments.first().and_then(Argument::as_expression).map(unwrap_expression) {
        Some(Expression::StringLiteral(s)) => Some(s.value.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn evidence(src: &str) -> Evidence {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, src, SourceType::ts()).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        Evidence::collect(&ret.program, &MatchOptions::default())
    }

    #[test]
    fn test_emitted_forms() {
        let ev = evidence(
            "const wrapper = mount(Comp)\n\
             expect(wrapper.emitted('a')).toBeTruthy()\n\
             expect(wrapper.emitted().b).toHaveLength(1)\n\
             expect(wrapper.emitted()['c-d']).toBeDefined()\n\
             const events = wrapper.emitted()\n\
             expect(events.e).toBeDefined()\n\
             expect(events).toHaveProperty('f')\n\
             expect(wrapper.emitted()).toHaveProperty('g')\n\
             expect(emitted('h')).toBeTruthy()",
        );
        for name in ["a", "b", "c-d", "cD", "e", "f", "g", "h"] {
            assert!(ev.has_event(name), "{name}");
        }
        assert!(!ev.has_event("wrapper"));
    }

    #[test]
    fn test_to_have_property_on_other_values_is_ignored() {
        let ev = evidence("expect(config).toHaveProperty('x')\nexpect(wrapper.emitted()).not.toHaveProperty('y')");
        assert!(!ev.has_event("x"));
        assert!(!ev.has_event("y"));
    }

    #[test]
    fn test_mount_options_inline_and_via_variable() {
        let ev = evidence(
            "it('works', async () => {\n\
               const options = { props: { title: 'Hi', 'max-height': 10, onRowClick: vi.fn() }, slots: { default: 'x' } }\n\
               const wrapper = mount(Comp, options)\n\
               render(Other, { propsData: { count: 1 }, scopedSlots: { item: '<p/>' }, attrs: { onClose: fn } })\n\
               await wrapper.setProps({ disabled: true })\n\
             })",
        );
        for name in ["title", "maxHeight", "count", "disabled"] {
            assert!(ev.has_input(name), "{name}");
        }
        assert!(ev.has_event("row-click"));
        assert!(ev.has_event("close"));
        assert!(ev.has_slot("default"));
        assert!(ev.has_slot("item"));
        assert!(!ev.has_input("options"));
    }

    #[test]
    fn test_instance_access() {
        let ev = evidence(
            "const wrapper = await mountSuspended(Comp)\n\
             wrapper.vm.open()\n\
             expect((wrapper.vm as any).isOpen).toBe(true)\n\
             wrapper.vm['reset']()\n\
             const vm = wrapper.vm\n\
             vm.focus()",
        );
        for name in ["open", "isOpen", "reset", "focus"] {
            assert!(ev.has_exposed(name), "{name}");
        }
        assert!(!ev.has_exposed("vm"));
    }
}
