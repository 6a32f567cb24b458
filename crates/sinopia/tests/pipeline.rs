//! End-to-end pipeline tests over on-disk projects.

use std::fs;
use std::path::Path;

use sinopia::carton::MissKind;
use sinopia::croquis::{ExtractError, NodeResolver};
use sinopia::{Analyzer, ConfigError, MemoryHost, SinopiaError, CONFIG_FILE_NAME};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        CONFIG_FILE_NAME,
        r#"{
  "resolve": { "alias": { "@/": "src/" } },
  "coverage": { "mountFunctions": ["mountWithI18n"] }
}"#,
    );
    write(
        root,
        "src/constants/events.ts",
        "export const buttonEvents = ['click', 'hover', 'focus'] as const\n",
    );
    write(
        root,
        "src/constants/index.ts",
        "export { buttonEvents } from './events'\n",
    );
    write(
        root,
        "src/components/BaseButton.vue",
        r#"<template>
  <button @click="$emit('click', $event)"><slot /></button>
</template>

<script lang="ts">
import { defineComponent } from 'vue'
import { buttonEvents } from '@/constants'

export default defineComponent({
  name: 'BaseButton',
  props: {
    label: String,
    size: { type: String, default: 'md' },
    disabled: Boolean,
  },
  emits: buttonEvents,
  slots: Object as SlotsType<{ default: {}; icon: {} }>,
  setup(props, { expose }) {
    const el = ref<HTMLButtonElement>()
    expose({ focus: () => el.value?.focus() })
    return { el }
  },
})
</script>
"#,
    );
    write(
        root,
        "tests/BaseButton.spec.ts",
        r#"import { describe, expect, it } from 'vitest'
import BaseButton from '@/components/BaseButton.vue'

describe('BaseButton', () => {
  it('renders label and icon', () => {
    const wrapper = mountWithI18n(BaseButton, {
      props: { label: 'Save', 'disabled': true },
      slots: { icon: '<i />' },
    })
    expect(wrapper.text()).toContain('Save')
  })

  it('emits click', async () => {
    const wrapper = mountWithI18n(BaseButton)
    await wrapper.trigger('click')
    const emitted = wrapper.emitted()
    expect(emitted.click).toHaveLength(1)
  })

  it('exposes focus', () => {
    const wrapper = mountWithI18n(BaseButton)
    ;(wrapper.vm as any).focus()
  })
})
"#,
    );
    dir
}

#[test]
fn analyzes_component_against_test_file() {
    let dir = project();
    let root = dir.path();
    let analyzer = Analyzer::load(root).unwrap();

    let result = analyzer
        .analyze(
            &root.join("src/components/BaseButton.vue"),
            &root.join("tests/BaseButton.spec.ts"),
        )
        .unwrap();

    assert_eq!(result.surface.events.as_slice(), ["click", "hover", "focus"]);
    assert!(result.misses.is_empty(), "{:?}", result.misses);

    let rendered = serde_json::to_string_pretty(&result).unwrap();
    insta::assert_snapshot!("base_button_analysis", rendered);
}

#[test]
fn extract_only() {
    let dir = project();
    let root = dir.path();
    let surface = Analyzer::load(root)
        .unwrap()
        .extract(&root.join("src/components/BaseButton.vue"))
        .unwrap();
    assert_eq!(surface.inputs.as_slice(), ["label", "size", "disabled"]);
    assert_eq!(surface.slots.as_slice(), ["default", "icon"]);
    assert_eq!(surface.exposed_members.as_slice(), ["focus"]);
}

#[test]
fn in_memory_buffers() {
    let host = MemoryHost::new().with_file(
        "/app/src/events.ts",
        "const base = ['open']\nexport const dialogEvents = [...base, 'close']\n",
    );
    let analyzer = Analyzer::new().with_host(host);
    let result = analyzer
        .analyze_sources(
            Path::new("/app/src/Dialog.vue"),
            "<script setup lang=\"ts\">\nimport { dialogEvents } from './events'\ndefineEmits(dialogEvents)\n</script>",
            Path::new("/app/tests/Dialog.spec.ts"),
            "const w = mount(Dialog)\nexpect(w.emitted('close')).toBeTruthy()",
        )
        .unwrap();

    assert_eq!(result.surface.events.as_slice(), ["open", "close"]);
    let covered: Vec<_> = result.coverage.events.iter().map(|e| (e.name.as_str(), e.covered)).collect();
    assert_eq!(covered, [("open", false), ("close", true)]);
}

#[test]
fn custom_resolver_and_verbose_misses() {
    let host = MemoryHost::new().with_file("/app/shared/sizes.ts", "export const sizes = ['sm', 'lg']\n");
    let analyzer = Analyzer::new()
        .with_host(host)
        .with_resolver(NodeResolver::new().with_alias("~/", "/app/shared"))
        .with_verbose(true);

    let result = analyzer
        .analyze_sources(
            Path::new("/app/src/Chip.vue"),
            "<script setup>\n\
             import { sizes } from '~/sizes'\n\
             import { gone } from '~/gone'\n\
             defineProps([...sizes, ...gone])\n\
             </script>",
            Path::new("/app/tests/Chip.spec.ts"),
            "mount(Chip, { props: { lg: true } })",
        )
        .unwrap();

    assert_eq!(result.surface.inputs.as_slice(), ["sm", "lg"]);
    assert!(result.misses.iter().any(|miss| miss.kind == MissKind::UnresolvedSpecifier));
    let covered: Vec<_> = result.coverage.inputs.iter().map(|e| (e.name.as_str(), e.covered)).collect();
    assert_eq!(covered, [("sm", false), ("lg", true)]);
}

#[test]
fn malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), CONFIG_FILE_NAME, "{ not json");
    let err = Analyzer::load(dir.path()).unwrap_err();
    assert!(matches!(err, SinopiaError::Config(ConfigError::Parse { .. })));
}

#[test]
fn missing_inputs_are_errors() {
    let dir = project();
    let root = dir.path();
    let analyzer = Analyzer::load(root).unwrap();

    let err = analyzer
        .analyze(&root.join("src/components/Nope.vue"), &root.join("tests/BaseButton.spec.ts"))
        .unwrap_err();
    assert!(matches!(err, SinopiaError::Extract(ExtractError::Io { .. })));

    let err = analyzer
        .analyze(&root.join("src/components/BaseButton.vue"), &root.join("tests/Nope.spec.ts"))
        .unwrap_err();
    assert!(matches!(err, SinopiaError::Io { .. }));
}

#[test]
fn unparsable_component_is_an_error() {
    let analyzer = Analyzer::new().with_host(MemoryHost::new());
    let err = analyzer
        .analyze_sources(
            Path::new("/app/src/Broken.vue"),
            "<script setup>\ndefineProps([\n</script>",
            Path::new("/app/tests/Broken.spec.ts"),
            "",
        )
        .unwrap_err();
    assert!(matches!(err, SinopiaError::Extract(ExtractError::Parse { .. })));
}
