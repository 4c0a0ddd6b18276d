//! Translation bundle coverage: matching keys, required keys, placeholders.

use serde_json::Value;
use std::collections::BTreeSet;

fn locale_codes() -> Vec<String> {
    let mut locales = Vec::new();
    let entries = std::fs::read_dir("i18n").expect("i18n directory should exist");
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            locales.push(stem.to_string());
        }
    }
    locales.sort();
    locales
}

fn load_locale(locale: &str) -> (String, Value) {
    let path = format!("i18n/{locale}.json");
    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {path}"));
    let json: Value =
        serde_json::from_str(&content).unwrap_or_else(|_| panic!("Failed to parse JSON in {path}"));
    (content, json)
}

fn find_nested_key(json: &Value, key: &str) -> bool {
    let parts: Vec<&str> = key.split('.').collect();
    let mut current = json;

    for part in parts {
        match current.get(part) {
            Some(value) => current = value,
            None => return false,
        }
    }

    current.is_string() || current.is_object()
}

fn collect_keys(prefix: &str, value: &Value, out: &mut BTreeSet<String>) {
    if let Value::Object(map) = value {
        for (k, v) in map {
            let next_prefix = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            if v.is_object() {
                collect_keys(&next_prefix, v, out);
            } else {
                out.insert(next_prefix);
            }
        }
    }
}

#[test]
fn locales_have_matching_keys() {
    let locales = locale_codes();
    let (_, base_json) = load_locale("en");
    let mut base_keys = BTreeSet::new();
    collect_keys("", &base_json, &mut base_keys);

    for locale in locales {
        let (_, json) = load_locale(&locale);
        let mut keys = BTreeSet::new();
        collect_keys("", &json, &mut keys);
        for key in &base_keys {
            assert!(
                keys.contains(key),
                "Missing key '{key}' in locale '{locale}'"
            );
        }
    }
}

#[test]
fn required_storefront_keys_exist() {
    let required_keys = [
        "nav.home",
        "nav.categories",
        "nav.offers",
        "nav.request_medicine",
        "nav.other_language",
        "cart.title",
        "cart.place_order",
        "cart.order_placed",
        "category.results",
        "search.found",
        "offers.days_left",
        "otp.resend_in",
        "request.success",
        "dashboard.updated",
        "status.pending",
        "status.approved",
        "status.rejected",
        "status.delivered",
        "errors.login_required",
        "errors.resend_wait",
        "not_found.title",
    ];

    for locale in locale_codes() {
        let (_, json) = load_locale(&locale);
        for key in required_keys {
            assert!(
                find_nested_key(&json, key),
                "Missing key '{key}' in locale '{locale}'"
            );
        }
    }
}

/// Plural forms may drop `{count}`, e.g. Arabic "منتج واحد".
const PLURAL_FORMS: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

fn placeholders(text: &str) -> BTreeSet<&str> {
    text.split('{')
        .skip(1)
        .filter_map(|rest| rest.split_once('}').map(|(name, _)| name))
        .collect()
}

#[test]
fn translations_keep_their_placeholders() {
    let (_, base_json) = load_locale("en");
    let mut base_keys = BTreeSet::new();
    collect_keys("", &base_json, &mut base_keys);
    for locale in locale_codes() {
        let (_, json) = load_locale(&locale);
        for key in &base_keys {
            if PLURAL_FORMS.iter().any(|form| key.ends_with(&format!(".{form}"))) {
                continue;
            }
            let lookup = |root: &Value| {
                key.split('.')
                    .try_fold(root, |node, part| node.get(part))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            };
            let (Some(base), Some(other)) = (lookup(&base_json), lookup(&json)) else {
                continue;
            };
            assert_eq!(
                placeholders(&base),
                placeholders(&other),
                "placeholder mismatch for '{key}' in locale '{locale}'"
            );
        }
    }
}

#[test]
fn locales_have_balanced_templates() {
    for locale in locale_codes() {
        let (content, _json) = load_locale(&locale);
        let open_count = content.matches('{').count();
        let close_count = content.matches('}').count();
        assert_eq!(
            open_count, close_count,
            "Unmatched braces in {locale}: {open_count} open, {close_count} close"
        );
        assert!(
            !content.contains("{{{"),
            "Found triple opening brace in {locale}"
        );
        assert!(
            !content.contains("}}}"),
            "Found triple closing brace in {locale}"
        );
    }
}
