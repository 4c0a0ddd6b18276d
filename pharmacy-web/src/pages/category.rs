use crate::app::state::use_store;
use crate::components::{CardLayout, ProductCard};
use crate::i18n::{t, trv, use_lang};
use crate::paths::decode_segment;
use crate::router::Route;
use pharmacy_core::{CartItem, Money, ProductQuery, SortKey};
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub slug: AttrValue,
    pub on_add: Callback<CartItem>,
}

/// Whole pounds typed into a price box; blank or garbage keeps `fallback`.
fn parse_bound(raw: &str, fallback: Money) -> Money {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|pounds| *pounds >= 0)
        .map_or(fallback, Money::from_pounds)
}

fn select_value(e: &Event) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        .map(|select| select.value())
}

fn input_value(e: &Event) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
}

#[function_component(CategoryPage)]
pub fn category_page(p: &Props) -> Html {
    let lang = use_lang();
    let store = use_store();
    let query = use_state(ProductQuery::default);
    let layout = use_state(CardLayout::default);

    {
        let query = query.clone();
        use_effect_with(p.slug.clone(), move |_| query.set(ProductQuery::default()));
    }

    let slug = decode_segment(&p.slug);
    let Some(category) = store.catalog.category_by_slug(&slug) else {
        return html! {
            <section class="empty-state" data-testid="category-missing">
                <h1>{ t("category.not_found") }</h1>
                <Link<Route> to={Route::Home} classes="btn btn-primary">{ t("category.back_home") }</Link<Route>>
            </section>
        };
    };

    let products = query.apply(store.catalog.in_category(&slug), lang);
    let brands = store.catalog.brands_in(&slug);

    let on_sort = {
        let query = query.clone();
        Callback::from(move |e: Event| {
            if let Some(sort) = select_value(&e).as_deref().and_then(SortKey::parse) {
                let mut next = (*query).clone();
                next.sort = sort;
                query.set(next);
            }
        })
    };
    let on_min = {
        let query = query.clone();
        Callback::from(move |e: Event| {
            let mut next = (*query).clone();
            next.min_price = parse_bound(&input_value(&e).unwrap_or_default(), next.min_price);
            query.set(next);
        })
    };
    let on_max = {
        let query = query.clone();
        Callback::from(move |e: Event| {
            let mut next = (*query).clone();
            next.max_price = parse_bound(&input_value(&e).unwrap_or_default(), next.max_price);
            query.set(next);
        })
    };
    let on_stock = {
        let query = query.clone();
        Callback::from(move |_: Event| {
            let mut next = (*query).clone();
            next.in_stock_only = !next.in_stock_only;
            query.set(next);
        })
    };
    let set_layout = |target: CardLayout| {
        let layout = layout.clone();
        Callback::from(move |_| layout.set(target))
    };

    let brand_boxes = brands.iter().map(|brand| {
        let brand = (*brand).to_string();
        let checked = query.brands.contains(&brand);
        let on_change = {
            let query = query.clone();
            let brand = brand.clone();
            Callback::from(move |_: Event| {
                let mut next = (*query).clone();
                next.toggle_brand(&brand);
                query.set(next);
            })
        };
        html! {
            <label key={brand.clone()} class="filter-option">
                <input type="checkbox" checked={checked} onchange={on_change} />
                <span>{ brand }</span>
            </label>
        }
    });

    let sort_options = SortKey::ALL.into_iter().map(|key| {
        html! {
            <option value={key.as_str()} selected={key == query.sort}>{ t(key.label_key()) }</option>
        }
    });

    let count = products.len();
    let cards = products.into_iter().map(|product| {
        html! {
            <ProductCard key={product.id.clone()} product={product.clone()} layout={*layout} on_add={p.on_add.clone()} />
        }
    });
    let grid_class = match *layout {
        CardLayout::Grid => "product-grid",
        CardLayout::List => "product-list",
    };

    html! {
        <div class="category-page">
            <header class="category-page__header">
                <h1>{ format!("{} {}", category.icon, category.name.pick(lang)) }</h1>
                <p data-testid="result-count">{ trv("category.results", &[("count", count.to_string().as_str())]) }</p>
                <div class="category-page__controls">
                    <label for="sort">{ t("category.sort_label") }</label>
                    <select id="sort" onchange={on_sort}>{ for sort_options }</select>
                    <div class="view-toggle" role="group">
                        <button type="button" aria-pressed={(*layout == CardLayout::Grid).to_string()}
                            aria-label={t("category.grid_view")} onclick={set_layout(CardLayout::Grid)}>{"▦"}</button>
                        <button type="button" aria-pressed={(*layout == CardLayout::List).to_string()}
                            aria-label={t("category.list_view")} onclick={set_layout(CardLayout::List)}>{"☰"}</button>
                    </div>
                </div>
            </header>
            <div class="category-page__body">
                <aside class="filters" aria-label={t("category.filters")}>
                    <h2>{ t("category.filters") }</h2>
                    <fieldset>
                        <legend>{ t("category.price_range") }</legend>
                        <label>
                            { t("category.min_price") }
                            <input type="number" min="0" value={query.min_price.amount_text()} onchange={on_min} />
                        </label>
                        <label>
                            { t("category.max_price") }
                            <input type="number" min="0" value={query.max_price.amount_text()} onchange={on_max} />
                        </label>
                    </fieldset>
                    if !brands.is_empty() {
                        <fieldset>
                            <legend>{ t("category.brand") }</legend>
                            { for brand_boxes }
                        </fieldset>
                    }
                    <fieldset>
                        <legend>{ t("category.availability") }</legend>
                        <label class="filter-option">
                            <input type="checkbox" checked={query.in_stock_only} onchange={on_stock} />
                            <span>{ t("category.in_stock_only") }</span>
                        </label>
                    </fieldset>
                </aside>
                if count == 0 {
                    <p class="empty-state">{ t("category.no_matches") }</p>
                } else {
                    <div class={grid_class}>{ for cards }</div>
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_bounds_ignore_bad_input() {
        let fallback = Money::from_pounds(1000);
        assert_eq!(parse_bound("250", fallback), Money::from_pounds(250));
        assert_eq!(parse_bound(" 0 ", fallback), Money::ZERO);
        assert_eq!(parse_bound("", fallback), fallback);
        assert_eq!(parse_bound("-5", fallback), fallback);
        assert_eq!(parse_bound("abc", fallback), fallback);
    }
}
