//! Script block extraction for Vue single-file components.
//!
//! Only `<script>` and `<script setup>` matter for the API surface, so this
//! scanner skips everything else at the byte level. The two blocks are
//! joined (plain script first) into one module source.

use memchr::{memchr, memchr3};

const CLOSING_SCRIPT: &[u8] = b"</script>";
const TAG_SCRIPT: &[u8] = b"script";
const COMMENT_OPEN: &[u8] = b"<!--";
const COMMENT_CLOSE: &[u8] = b"-->";

/// One `<script>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock<'a> {
    pub content: &'a str,
    pub lang: Option<&'a str>,
    pub setup: bool,
}

/// Script blocks of an SFC.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfcScripts<'a> {
    pub script: Option<ScriptBlock<'a>>,
    pub script_setup: Option<ScriptBlock<'a>>,
}

impl SfcScripts<'_> {
    /// Language of the combined module (`ts`, `tsx`, `js`, `jsx`).
    pub fn lang(&self) -> &str {
        self.script_setup
            .as_ref()
            .and_then(|b| b.lang)
            .or_else(|| self.script.as_ref().and_then(|b| b.lang))
            .unwrap_or("js")
    }

    /// Concatenated module source: `<script>` then `<script setup>`.
    pub fn module_source(&self) -> String {
        let mut out = String::new();
        for block in [&self.script, &self.script_setup].into_iter().flatten() {
            out.push_str(block.content);
            out.push('\n');
        }
        out
    }
}

/// Find the script blocks of an SFC. Later duplicates of the same kind are
/// ignored; unterminated blocks end the scan.
pub fn extract_scripts(source: &str) -> SfcScripts<'_> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut scripts = SfcScripts::default();
    let mut pos = 0;

    while pos < len {
        let Some(next_lt) = memchr(b'<', &bytes[pos..]) else {
            break;
        };
        pos += next_lt;

        if bytes[pos..].starts_with(COMMENT_OPEN) {
            match find(&bytes[pos + COMMENT_OPEN.len()..], COMMENT_CLOSE) {
                Some(end) => {
                    pos += COMMENT_OPEN.len() + end + COMMENT_CLOSE.len();
                    continue;
                }
                None => break,
            }
        }

        let name_start = pos + 1;
        let name_end = name_start + TAG_SCRIPT.len();
        let is_script = name_end <= len
            && bytes[name_start..name_end].eq_ignore_ascii_case(TAG_SCRIPT)
            && bytes
                .get(name_end)
                .is_some_and(|b| b.is_ascii_whitespace() || *b == b'>');
        if !is_script {
            pos += 1;
            continue;
        }

        let Some(tag_close) = find_tag_end(&bytes[name_end..]) else {
            break;
        };
        let attrs_src = &source[name_end..name_end + tag_close];
        let content_start = name_end + tag_close + 1;

        let Some(content_len) = find_ignore_case(&bytes[content_start..], CLOSING_SCRIPT) else {
            break;
        };
        let content_end = content_start + content_len;

        let block = ScriptBlock {
            content: &source[content_start..content_end],
            lang: attr_value(attrs_src, "lang"),
            setup: has_attr(attrs_src, "setup"),
        };
        if block.setup {
            scripts.script_setup.get_or_insert(block);
        } else {
            scripts.script.get_or_insert(block);
        }

        pos = content_end + CLOSING_SCRIPT.len();
    }

    scripts
}

/// Offset of the `>` closing a start tag, skipping quoted attribute values
/// (`generic="T extends Record<string, any>"`).
fn find_tag_end(bytes: &[u8]) -> Option<usize> {
    let mut pos = 0;
    loop {
        let next = pos + memchr3(b'>', b'"', b'\'', &bytes[pos..])?;
        let quote = bytes[next];
        if quote == b'>' {
            return Some(next);
        }
        pos = next + 1 + memchr(quote, &bytes[next + 1..])? + 1;
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn find_ignore_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

/// Iterate `name[=value]` pairs of a start tag's attribute text.
fn attributes(attrs: &str) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
    let mut rest = attrs.trim_start();
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let name_len = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        rest = rest[name_len..].trim_start();

        let mut value = None;
        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let quote = after_eq.chars().next().filter(|c| *c == '"' || *c == '\'');
            if let Some(q) = quote {
                let body = &after_eq[1..];
                let end = body.find(q).unwrap_or(body.len());
                value = Some(&body[..end]);
                rest = body.get(end + 1..).unwrap_or("").trim_start();
            } else {
                let end = after_eq
                    .find(|c: char| c.is_ascii_whitespace())
                    .unwrap_or(after_eq.len());
                value = Some(&after_eq[..end]);
                rest = after_eq[end..].trim_start();
            }
        } else if name.is_empty() {
            // Stray '/' or similar; skip one char.
            rest = rest.get(1..).unwrap_or("").trim_start();
        }

        Some((name, value))
    })
}

fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    attributes(attrs)
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .and_then(|(_, v)| v)
}

fn has_attr(attrs: &str, name: &str) -> bool {
    attributes(attrs).any(|(n, _)| n.eq_ignore_ascii_case(name))
}
