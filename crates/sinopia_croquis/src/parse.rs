//! Syntax provider adapter.
//!
//! Turns a file's raw text into an oxc `Program`. `.vue` files are reduced to
//! their script blocks first; everything else is parsed as-is with a source
//! type picked from the extension.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::sfc::extract_scripts;

/// Source text ready for the parser.
#[derive(Debug, Clone)]
pub struct ModuleSource {
    pub text: String,
    pub source_type: SourceType,
}

impl ModuleSource {
    /// Prepare `raw` (the file contents of `path`) for parsing.
    pub fn new(path: &Path, raw: String) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext.eq_ignore_ascii_case("vue") {
            let scripts = extract_scripts(&raw);
            let source_type = source_type_for_lang(scripts.lang());
            return Self {
                text: scripts.module_source(),
                source_type,
            };
        }

        let source_type = SourceType::from_path(path)
            .unwrap_or_else(|_| SourceType::ts())
            .with_module(true);
        Self {
            text: raw,
            source_type,
        }
    }
}

fn source_type_for_lang(lang: &str) -> SourceType {
    match lang {
        "ts" => SourceType::ts(),
        "tsx" => SourceType::tsx(),
        "jsx" => SourceType::jsx(),
        _ => SourceType::mjs(),
    }
}

/// Parse a prepared module. Any syntax error fails the parse.
pub fn parse_program<'a>(
    allocator: &'a Allocator,
    source: &'a ModuleSource,
) -> Result<Program<'a>, String> {
    let ret = Parser::new(allocator, &source.text, source.source_type).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser panicked".to_string());
        return Err(message);
    }

    Ok(ret.program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vue_file_uses_script_lang() {
        let src = "<script setup lang=\"ts\">\nconst a: number = 1\n</script>".to_string();
        let module = ModuleSource::new(Path::new("Comp.vue"), src);
        assert!(module.source_type.is_typescript());
        assert!(module.text.contains("const a: number = 1"));
    }

    #[test]
    fn test_parse_success_and_failure() {
        let allocator = Allocator::default();
        let ok = ModuleSource::new(Path::new("a.ts"), "export const x = ['a'] as const".into());
        assert!(parse_program(&allocator, &ok).is_ok());

        let bad = ModuleSource::new(Path::new("b.ts"), "export const = ;".into());
        assert!(parse_program(&allocator, &bad).is_err());
    }

    #[test]
    fn test_unknown_extension_falls_back_to_typescript() {
        let module = ModuleSource::new(Path::new("events.data"), "export const a: string[] = []".into());
        assert!(module.source_type.is_typescript());
    }
}
