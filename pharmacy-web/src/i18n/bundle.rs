use crate::i18n::locales::load_translations;
use pharmacy_core::Language;
use serde_json::Value;
use std::cell::RefCell;
use yew::prelude::*;

pub struct I18nBundle {
    pub lang: Language,
    pub translations: Value,
    pub fallback: Value,
}

impl I18nBundle {
    fn build(lang: Language) -> Self {
        let fallback = load_translations(Language::En).unwrap_or_else(empty);
        let translations = if lang == Language::En {
            fallback.clone()
        } else {
            load_translations(lang).unwrap_or_else(empty)
        };
        Self {
            lang,
            translations,
            fallback,
        }
    }
}

fn empty() -> Value {
    Value::Object(serde_json::Map::new())
}

fn saved_lang() -> Language {
    #[cfg(all(not(test), target_arch = "wasm32"))]
    {
        crate::dom::local_storage()
            .ok()
            .and_then(|storage| {
                storage
                    .get_item(pharmacy_core::constants::KEY_LANGUAGE)
                    .ok()
                    .flatten()
            })
            .and_then(|code| Language::from_code(&code))
            .unwrap_or_default()
    }

    #[cfg(any(test, not(target_arch = "wasm32")))]
    {
        Language::default()
    }
}

thread_local! {
    static CURRENT: RefCell<I18nBundle> = RefCell::new(I18nBundle::build(saved_lang()));
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

/// Switch the active translation bundle.
///
/// In the browser this also updates `<html lang dir>` and persists the
/// choice under the `language` key.
pub fn set_lang(lang: Language) {
    if current_lang() != lang {
        CURRENT.with(|cell| cell.replace(I18nBundle::build(lang)));
    }
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(el) = crate::dom::document().document_element() {
            let _ = el.set_attribute("lang", lang.code());
            let _ = el.set_attribute("dir", if lang.is_rtl() { "rtl" } else { "ltr" });
        }
        match crate::dom::local_storage() {
            Ok(storage) => {
                if let Err(err) =
                    storage.set_item(pharmacy_core::constants::KEY_LANGUAGE, lang.code())
                {
                    log::warn!(
                        "could not persist language: {}",
                        crate::dom::js_error_message(&err)
                    );
                }
            }
            Err(err) => log::warn!(
                "localStorage unavailable: {}",
                crate::dom::js_error_message(&err)
            ),
        }
    }
}

#[must_use]
pub fn current_lang() -> Language {
    with_bundle(|bundle| bundle.lang)
}

#[must_use]
pub fn is_rtl() -> bool {
    current_lang().is_rtl()
}

/// Active language from the nearest provider, so components re-render when
/// it flips. Falls back to the global bundle outside the app shell.
#[hook]
pub fn use_lang() -> Language {
    use_context::<Language>().unwrap_or_else(current_lang)
}
