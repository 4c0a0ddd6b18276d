#![cfg(target_arch = "wasm32")]
use pharmacy_core::KeyValueStore;
use pharmacy_web::storage::BrowserStore;
use wasm_bindgen_test::*;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn browser_store_reads_back_writes() {
    let store = BrowserStore::new().expect("localStorage");
    store.set("pharmacy-test-key", "[1,2,3]").expect("write");
    assert_eq!(
        store.get("pharmacy-test-key").expect("read").as_deref(),
        Some("[1,2,3]")
    );
    store.remove("pharmacy-test-key").expect("remove");
    assert_eq!(store.get("pharmacy-test-key").expect("read"), None);
}
