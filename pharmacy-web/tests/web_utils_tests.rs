use log::Level;
use pharmacy_core::Language;
use pharmacy_web::i18n;
use pharmacy_web::logger::format_record;
use pharmacy_web::paths::{decode_segment, hotline_href, image_src, tel_href};
use pharmacy_web::router::{Route, guard};
use yew_router::Routable;

#[test]
fn i18n_bundle_switches_and_formats() {
    i18n::set_lang(Language::En);
    assert_eq!(i18n::current_lang(), Language::En);
    assert!(!i18n::is_rtl());
    assert_eq!(
        i18n::trv("nav.welcome", &[("name", "Mona")]),
        "Welcome, Mona"
    );
    assert_eq!(i18n::t("missing.key"), "missing.key");

    i18n::set_lang(Language::Ar);
    assert!(i18n::is_rtl());
    assert_eq!(i18n::t("nav.offers"), "العروض");
    assert_eq!(i18n::trv("search.found", &[("count", "2")]), "نتيجتان");
}

#[test]
fn locale_metadata_lists_both_languages() {
    let metas = i18n::locales();
    assert!(metas.iter().any(|m| m.language == Language::En));
    assert!(metas.iter().any(|m| m.language == Language::Ar && m.language.is_rtl()));
}

#[test]
fn link_helpers_build_hrefs() {
    assert_eq!(tel_href(" 01234567890 "), "tel:01234567890");
    assert!(hotline_href().starts_with("tel:"));
    assert_eq!(
        image_src("https://images.example.com/a.jpg"),
        "https://images.example.com/a.jpg"
    );
    assert!(image_src("images/logo.png").ends_with("/images/logo.png"));
    assert_eq!(decode_segment("cold-%26-flu"), "cold-&-flu");
}

#[test]
fn slugs_with_ampersands_route_to_their_category() {
    let route = Route::recognize("/category/cold-%26-flu").expect("category route");
    let Route::Category { slug } = route else {
        panic!("expected a category route");
    };
    assert_eq!(decode_segment(&slug), "cold-&-flu");
    assert_eq!(guard(&Route::category("cold-&-flu"), None), None);
}

#[test]
fn console_lines_carry_level_and_target() {
    assert_eq!(
        format_record(Level::Warn, "pharmacy_web::service", "slow"),
        "[WARN pharmacy_web::service] slow"
    );
}
