use crate::document::{DefaultValue, Extensions};
use crate::route::ExtensionProperties;
use tracing::warn;

/// The only prefix accepted for vendor extension keys.
pub const EXTENSION_PREFIX: &str = "x-";

/// Picks a type for an ambiguously typed string.
///
/// Integers are tried before booleans, so `"1"` is the integer 1.
pub fn string_auto_type(ambiguous: &str) -> DefaultValue {
    if ambiguous.is_empty() {
        return DefaultValue::Absent;
    }
    if let Ok(i) = ambiguous.parse::<i64>() {
        return DefaultValue::Integer(i);
    }
    if let Some(b) = parse_bool(ambiguous) {
        return DefaultValue::Boolean(b);
    }
    DefaultValue::String(ambiguous.to_string())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Copies the `x-` prefixed entries of `source` into `target`.
pub fn extract_vendor_extensions(target: &mut Extensions, source: &ExtensionProperties) {
    for (key, value) in source {
        if key.starts_with(EXTENSION_PREFIX) {
            target.insert(key.clone(), value.clone());
        } else {
            warn!(key = %key, "dropping vendor extension without the `x-` prefix");
        }
    }
}

/// Lower bounds: missing or negative becomes absent.
pub(crate) fn non_negative(value: Option<i64>) -> Option<u64> {
    value.and_then(|v| u64::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auto_typing_prefers_integers_then_booleans() {
        assert_eq!(string_auto_type("42"), DefaultValue::Integer(42));
        assert_eq!(string_auto_type("-7"), DefaultValue::Integer(-7));
        assert_eq!(string_auto_type("1"), DefaultValue::Integer(1));
        assert_eq!(string_auto_type("true"), DefaultValue::Boolean(true));
        assert_eq!(string_auto_type("F"), DefaultValue::Boolean(false));
        assert_eq!(string_auto_type("abc"), DefaultValue::String("abc".into()));
        assert_eq!(string_auto_type(""), DefaultValue::Absent);
    }

    #[test]
    fn out_of_range_integers_stay_strings() {
        assert_eq!(
            string_auto_type("99999999999999999999"),
            DefaultValue::String("99999999999999999999".into())
        );
    }

    #[test]
    fn only_prefixed_extensions_are_copied() {
        let mut source = ExtensionProperties::new();
        source.insert("x-rate-limit".into(), json!(100));
        source.insert("internal".into(), json!("hidden"));
        source.insert("X-upper".into(), json!(1));

        let mut target = Extensions::new();
        extract_vendor_extensions(&mut target, &source);
        assert_eq!(target.len(), 1);
        assert_eq!(target.get("x-rate-limit"), Some(&json!(100)));
        assert!(!target.contains_key("internal"));
    }

    #[test]
    fn negative_bounds_are_dropped() {
        assert_eq!(non_negative(Some(-1)), None);
        assert_eq!(non_negative(None), None);
        assert_eq!(non_negative(Some(5)), Some(5));
    }
}
