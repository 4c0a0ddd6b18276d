#![cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;
use yew::Renderer;

use pharmacy_core::Language;
use pharmacy_web::app::App;
use pharmacy_web::dom;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document();
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

fn render_app() {
    pharmacy_web::i18n::set_lang(Language::En);
    Renderer::<App>::with_root(ensure_app_root()).render();
}

async fn settle() {
    yew::platform::time::sleep(std::time::Duration::from_millis(50)).await;
}

#[wasm_bindgen_test]
async fn skip_link_points_to_main_landmark() {
    render_app();
    settle().await;
    let doc = dom::document();
    let skip = doc
        .query_selector("a[href='#main']")
        .expect("query skip link")
        .expect("skip link exists");
    let main = doc.get_element_by_id("main").expect("main landmark exists");
    assert_eq!(main.tag_name(), "MAIN");
    assert_eq!(main.get_attribute("role").unwrap_or_default(), "main");
    assert_eq!(skip.get_attribute("href").unwrap_or_default(), "#main");
}

#[wasm_bindgen_test]
async fn language_toggle_flips_lang_and_dir() {
    render_app();
    settle().await;
    let doc = dom::document();
    let toggle: HtmlElement = doc
        .query_selector("[data-testid='lang-toggle']")
        .expect("query toggle")
        .expect("toggle exists")
        .dyn_into()
        .expect("cast to element");
    toggle.click();
    settle().await;

    let html = doc.document_element().expect("document element");
    assert_eq!(html.get_attribute("lang"), Some("ar".into()));
    assert_eq!(html.get_attribute("dir"), Some("rtl".into()));
    let saved = dom::local_storage()
        .expect("storage")
        .get_item(pharmacy_core::constants::KEY_LANGUAGE)
        .expect("read language");
    assert_eq!(saved.as_deref(), Some("ar"));

    toggle.click();
    settle().await;
    assert_eq!(html.get_attribute("lang"), Some("en".into()));
    assert_eq!(html.get_attribute("dir"), Some("ltr".into()));
}
