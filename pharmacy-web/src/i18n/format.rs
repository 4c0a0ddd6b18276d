#[cfg(target_arch = "wasm32")]
use crate::i18n::bundle::with_bundle;
use chrono::{DateTime, NaiveDate, Utc};
#[cfg(target_arch = "wasm32")]
use js_sys::{Date, Function, Intl, Object};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// Format a number using the active locale via Intl.
#[must_use]
pub fn fmt_number(num: f64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        with_bundle(|bundle| {
            let locales = js_sys::Array::of1(&JsValue::from_str(bundle.lang.locale_tag()));
            let nf = Intl::NumberFormat::new(&locales, &Object::new());
            let format_fn: Function = nf.format();
            format_fn
                .call1(&nf, &JsValue::from_f64(num))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_else(|| num.to_string())
        })
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        num.to_string()
    }
}

/// Calendar date in the active locale; ISO `YYYY-MM-DD` off the browser.
#[must_use]
pub fn fmt_date(date: NaiveDate) -> String {
    let iso = date.format("%Y-%m-%d").to_string();
    #[cfg(target_arch = "wasm32")]
    {
        with_bundle(|bundle| {
            let js = Date::new(&JsValue::from_str(&iso));
            js.to_locale_date_string(bundle.lang.locale_tag(), &JsValue::UNDEFINED)
                .as_string()
                .unwrap_or(iso)
        })
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        iso
    }
}

/// Date and time in the active locale; `YYYY-MM-DD HH:MM` UTC off the browser.
#[must_use]
pub fn fmt_datetime(at: DateTime<Utc>) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        with_bundle(|bundle| {
            #[allow(clippy::cast_precision_loss)]
            let js = Date::new(&JsValue::from_f64(at.timestamp_millis() as f64));
            js.to_locale_string(bundle.lang.locale_tag(), &JsValue::UNDEFINED)
                .as_string()
                .unwrap_or_else(|| at.to_rfc3339())
        })
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        at.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn host_fallbacks_are_stable() {
        assert_eq!(fmt_number(12.5), "12.5");
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date");
        assert_eq!(fmt_date(date), "2024-12-31");
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(fmt_datetime(at), "2024-01-15 10:30");
    }
}
