use crate::i18n::bundle::with_bundle;
use pharmacy_core::Language;
use serde_json::Value;
use std::collections::BTreeMap;

#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Intl, Object};

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, part| current.get(part))
}

/// CLDR plural category for `count`.
fn plural_category(lang: Language, count: f64) -> &'static str {
    #[cfg(target_arch = "wasm32")]
    {
        let locales = Array::of1(&wasm_bindgen::JsValue::from_str(lang.locale_tag()));
        let rules = Intl::PluralRules::new(&locales, &Object::new());
        if let Some(selected) = rules.select(count).as_string() {
            return match selected.as_str() {
                "zero" => "zero",
                "one" => "one",
                "two" => "two",
                "few" => "few",
                "many" => "many",
                _ => "other",
            };
        }
    }
    host_plural_category(lang, count)
}

#[allow(clippy::cast_possible_truncation)]
fn host_plural_category(lang: Language, count: f64) -> &'static str {
    if count.fract() != 0.0 {
        return "other";
    }
    let n = count.abs() as i64;
    match lang {
        Language::En => {
            if n == 1 {
                "one"
            } else {
                "other"
            }
        }
        Language::Ar => match (n, n % 100) {
            (0, _) => "zero",
            (1, _) => "one",
            (2, _) => "two",
            (_, 3..=10) => "few",
            (_, 11..=99) => "many",
            _ => "other",
        },
    }
}

fn pick_plural<'a>(map: &'a serde_json::Map<String, Value>, category: &str) -> Option<&'a str> {
    map.get(category)
        .or_else(|| map.get("other"))
        .or_else(|| map.get("_"))
        .and_then(Value::as_str)
}

fn render_value(value: &Value, lang: Language, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let count = args
                .and_then(|m| m.get("count"))
                .and_then(|raw| raw.parse::<f64>().ok());
            let category = count.map_or("other", |n| plural_category(lang, n));
            pick_plural(map, category)?.to_string()
        }
        _ => return None,
    };

    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_value(v, bundle.lang, args))
            .or_else(|| {
                get_nested_value(&bundle.fallback, key)
                    .and_then(|v| render_value(v, bundle.lang, args))
            })
    })
}

/// Translate a key to the active language, falling back to English and
/// then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate with `{name}` placeholders filled from `args`. A `count`
/// argument selects the plural form.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| {
        log::debug!("missing translation: {key}");
        key.to_string()
    })
}

/// [`tr`] with inline arguments.
#[must_use]
pub fn trv(key: &str, args: &[(&str, &str)]) -> String {
    let map: BTreeMap<&str, &str> = args.iter().copied().collect();
    tr(key, Some(&map))
}
