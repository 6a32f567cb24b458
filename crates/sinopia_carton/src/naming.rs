//! Case conversion helpers for event and prop names.

use compact_str::CompactString;

/// Convert kebab-case to camelCase (`item-click` -> `itemClick`).
///
/// Colons are kept as-is so `update:model-value` becomes `update:modelValue`.
pub fn camelize(s: &str) -> CompactString {
    let mut out = CompactString::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Derive the event name from a listener prop key (`onItemClick` -> `itemClick`).
///
/// Returns `None` unless `key` is `on` followed by an uppercase letter.
pub fn event_from_handler(key: &str) -> Option<CompactString> {
    let rest = key.strip_prefix("on")?;
    let first = rest.chars().next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    let mut out = CompactString::with_capacity(rest.len());
    out.push(first.to_ascii_lowercase());
    out.push_str(&rest[first.len_utf8()..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("item-click"), "itemClick");
        assert_eq!(camelize("update:model-value"), "update:modelValue");
        assert_eq!(camelize("plain"), "plain");
    }

    #[test]
    fn test_event_from_handler() {
        assert_eq!(event_from_handler("onChange").as_deref(), Some("change"));
        assert_eq!(
            event_from_handler("onUpdate:modelValue").as_deref(),
            Some("update:modelValue")
        );
        assert_eq!(event_from_handler("one"), None);
        assert_eq!(event_from_handler("on"), None);
        assert_eq!(event_from_handler("title"), None);
    }
}
