//! Coverage matching tests.

use std::path::Path;

use sinopia_canon::{match_coverage, CoverageEntry, CoverageMatcher, CoverageReport, MatchOptions};
use sinopia_carton::{MemberList, Tracer};
use sinopia_croquis::{Category, ComponentSurface};

fn list(names: &[&str]) -> MemberList {
    names.iter().copied().collect()
}

fn entries(pairs: &[(&str, bool)]) -> Vec<CoverageEntry> {
    pairs
        .iter()
        .map(|&(name, covered)| CoverageEntry {
            name: name.into(),
            covered,
        })
        .collect()
}

fn run(surface: &ComponentSurface, test: &str) -> CoverageReport {
    match_coverage(surface, Path::new("/project/tests/Comp.spec.ts"), test, &Tracer::quiet())
}

#[test]
fn events_partially_covered() {
    let surface = ComponentSurface {
        events: list(&["change", "submit", "cancel"]),
        ..Default::default()
    };
    let test = r#"
import { mount } from '@vue/test-utils'
import Form from '../src/Form.vue'

describe('Form', () => {
  it('emits change', async () => {
    const wrapper = mount(Form)
    await wrapper.find('input').setValue('x')
    expect(wrapper.emitted('change')).toHaveLength(1)
  })

  it('emits submit', async () => {
    const wrapper = mount(Form)
    await wrapper.find('form').trigger('submit')
    expect(wrapper.emitted()).toHaveProperty('submit')
  })
})
"#;
    let report = run(&surface, test);
    assert_eq!(
        report.events,
        entries(&[("change", true), ("submit", true), ("cancel", false)])
    );
    assert_eq!(report.missing(Category::Events).collect::<Vec<_>>(), ["cancel"]);
}

#[test]
fn inputs_partially_covered() {
    let surface = ComponentSurface {
        inputs: list(&["title", "count"]),
        ..Default::default()
    };
    let test = r#"
it('renders the title', () => {
  const wrapper = mount(Card, { props: { title: 'Hello' } })
  expect(wrapper.text()).toContain('Hello')
})
"#;
    let report = run(&surface, test);
    assert_eq!(report.inputs, entries(&[("title", true), ("count", false)]));
    assert!(report.events.is_empty());
}

#[test]
fn empty_surface_gives_empty_report() {
    let report = run(&ComponentSurface::default(), "mount(Comp, { props: { a: 1 } })");
    assert_eq!(report, CoverageReport::default());
    assert_eq!(report.total(), 0);
}

#[test]
fn report_mirrors_surface_order_and_membership() {
    let surface = ComponentSurface {
        inputs: list(&["b", "a"]),
        slots: list(&["footer", "default"]),
        exposed_members: list(&["open"]),
        ..Default::default()
    };
    let test = r#"
const wrapper = mount(Comp, {
  props: { a: 1, undeclared: true },
  slots: { default: '<p>hi</p>', extra: 'x' },
})
wrapper.vm.open()
"#;
    let report = run(&surface, test);
    assert_eq!(report.inputs, entries(&[("b", false), ("a", true)]));
    assert_eq!(report.slots, entries(&[("footer", false), ("default", true)]));
    assert_eq!(report.exposed_members, entries(&[("open", true)]));
    assert_eq!(report.covered_count(), 3);
    assert_eq!(report.total(), 5);
}

#[test]
fn unparsable_test_file_reports_everything_uncovered() {
    let surface = ComponentSurface {
        inputs: list(&["title"]),
        events: list(&["close"]),
        ..Default::default()
    };
    let report = run(&surface, "mount(Comp, { props: { title: 'x' } ");
    assert_eq!(report.inputs, entries(&[("title", false)]));
    assert_eq!(report.events, entries(&[("close", false)]));
}

#[test]
fn custom_mount_helper() {
    let surface = ComponentSurface {
        inputs: list(&["size"]),
        events: list(&["update:modelValue"]),
        ..Default::default()
    };
    let test = "const w = mountWithPlugins(Comp, { props: { size: 'lg', 'onUpdate:modelValue': fn } })";

    let default_report = run(&surface, test);
    assert_eq!(default_report.covered_count(), 0);

    let matcher = CoverageMatcher::new(MatchOptions::default().with_mount_function("mountWithPlugins"));
    let report = matcher.match_source(&surface, Path::new("/t/Comp.spec.ts"), test, &Tracer::quiet());
    assert_eq!(report.inputs, entries(&[("size", true)]));
    assert_eq!(report.events, entries(&[("update:modelValue", true)]));
}

#[test]
fn report_json_snapshot() {
    let surface = ComponentSurface {
        inputs: list(&["modelValue", "disabled"]),
        events: list(&["update:modelValue", "row-click"]),
        slots: list(&["default"]),
        exposed_members: list(&["focus"]),
    };
    let test = r#"
import { render } from '@testing-library/vue'

test('table', async () => {
  const onRowClick = vi.fn()
  const { rerender } = render(Table, {
    props: { modelValue: [], onRowClick },
    slots: { default: 'cell' },
  })
  await rerender({ disabled: true })
})
"#;
    let report = run(&surface, test);
    let rendered = serde_json::to_string_pretty(&report).unwrap();
    insta::assert_snapshot!("report_json", rendered);
}
