//! Translation bundles for the two storefront languages.
mod bundle;
mod format;
mod locales;
mod render;

pub use bundle::{I18nBundle, current_lang, is_rtl, set_lang, use_lang};
pub use format::{fmt_date, fmt_datetime, fmt_number};
pub use locales::{LocaleMeta, locales};
pub use render::{t, tr, trv};
