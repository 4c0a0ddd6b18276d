use crate::app::mounted::{MountFlag, spawn_guarded};
use crate::app::state::{use_api, use_store};
use crate::components::{Notice, NoticeBanner, ProductCard};
use crate::i18n::{t, trv, use_lang};
use crate::router::Route;
use pharmacy_core::{CartItem, Product};
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub query: AttrValue,
    pub on_add: Callback<CartItem>,
}

#[derive(Debug, Clone, PartialEq)]
enum Lookup {
    Loading,
    Done(Vec<Product>),
    Failed(Notice),
}

#[function_component(SearchPage)]
pub fn search_page(p: &Props) -> Html {
    let lang = use_lang();
    let api = use_api();
    let store = use_store();
    let lookup = use_state(|| Lookup::Loading);

    {
        let lookup = lookup.clone();
        use_effect_with(p.query.clone(), move |query| {
            let flag = MountFlag::mounted();
            let q = query.trim().to_string();
            lookup.set(Lookup::Loading);
            log::debug!("searching for {q:?}");
            spawn_guarded(
                flag.clone(),
                async move { api.search(&q).await },
                move |result| {
                    lookup.set(match result {
                        Ok(products) => Lookup::Done(products),
                        Err(err) => Lookup::Failed(Notice::from_error(&err)),
                    });
                },
            );
            move || flag.unmount()
        });
    }

    // Staff price and stock edits live in the store's catalog.
    let lookup = match &*lookup {
        Lookup::Done(products) => Lookup::Done(store.catalog.refreshed(products)),
        other => other.clone(),
    };

    let body = match &lookup {
        Lookup::Loading => html! {
            <div class="loading" role="status" aria-live="polite" data-testid="search-loading">
                <span class="spinner" aria-hidden="true"></span>
                <p>{ t("search.loading") }</p>
            </div>
        },
        Lookup::Failed(notice) => html! { <NoticeBanner notice={Some(notice.clone())} /> },
        Lookup::Done(products) if products.is_empty() => {
            let popular = store.catalog.categories.iter().take(4).map(|category| {
                html! {
                    <Link<Route> to={Route::category(&category.slug)} classes="category-tile">
                        <span aria-hidden="true">{ category.icon.clone() }</span>
                        <h4>{ category.name.pick(lang) }</h4>
                    </Link<Route>>
                }
            });
            html! {
                <section class="empty-state" data-testid="search-empty">
                    <h2>{ t("search.no_results") }</h2>
                    <h3>{ t("search.suggestions") }</h3>
                    <ul>
                        <li>{ t("search.tip_spelling") }</li>
                        <li>{ t("search.tip_keywords") }</li>
                        <li>{ t("search.tip_general") }</li>
                        <li>{ t("search.tip_browse") }</li>
                    </ul>
                    <h3>{ t("search.popular") }</h3>
                    <div class="grid">{ for popular }</div>
                </section>
            }
        }
        Lookup::Done(products) => html! {
            <div class="product-grid">
                { for products.iter().map(|product| html! {
                    <ProductCard key={product.id.clone()} product={product.clone()} on_add={p.on_add.clone()} />
                }) }
            </div>
        },
    };

    let summary = match &lookup {
        Lookup::Done(products) => {
            html! { <p data-testid="result-count">{ trv("search.found", &[("count", products.len().to_string().as_str())]) }</p> }
        }
        _ => Html::default(),
    };

    html! {
        <div class="search-page">
            <header>
                <h1>{ t("search.title") }</h1>
                if !p.query.trim().is_empty() {
                    <p>{ trv("search.searching_for", &[("query", p.query.trim())]) }</p>
                }
                { summary }
            </header>
            { body }
        </div>
    }
}
