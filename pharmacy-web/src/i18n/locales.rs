use pharmacy_core::Language;
use serde_json::Value;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocaleMeta {
    pub language: Language,
    /// Label on the navbar toggle.
    pub short: &'static str,
    pub name: &'static str,
}

pub const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        language: Language::En,
        short: "EN",
        name: "English",
    },
    LocaleMeta {
        language: Language::Ar,
        short: "AR",
        name: "العربية",
    },
];

const LOCALE_TABLE: &[(Language, &str)] = &[
    (Language::En, include_str!("../../i18n/en.json")),
    (Language::Ar, include_str!("../../i18n/ar.json")),
];

#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

pub fn load_translations(lang: Language) -> Option<Value> {
    let bundle = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))
        .unwrap_or(LOCALE_TABLE[0].1);

    match serde_json::from_str(bundle) {
        Ok(value) => Some(value),
        Err(err) => {
            log::error!("translation bundle {lang} is malformed: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_keys(value: &Value, prefix: &str, out: &mut Vec<String>) {
        match value {
            Value::Object(map) if !map.contains_key("other") => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    leaf_keys(child, &path, out);
                }
            }
            _ => out.push(prefix.to_string()),
        }
    }

    #[test]
    fn both_bundles_parse_and_share_keys() {
        // plural groups count as one key; their categories differ per language
        let en = load_translations(Language::En).expect("en bundle");
        let ar = load_translations(Language::Ar).expect("ar bundle");
        let (mut en_keys, mut ar_keys) = (Vec::new(), Vec::new());
        leaf_keys(&en, "", &mut en_keys);
        leaf_keys(&ar, "", &mut ar_keys);
        en_keys.sort();
        ar_keys.sort();
        assert_eq!(en_keys, ar_keys);
    }

    #[test]
    fn toggle_labels_cover_every_language() {
        assert_eq!(locales().len(), 2);
        assert!(locales().iter().any(|m| m.language == Language::Ar && m.short == "AR"));
    }
}
