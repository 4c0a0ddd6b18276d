use crate::app::state::use_store;
use crate::components::field::input_value;
use crate::components::{Notice, NoticeBanner};
use crate::i18n::{t, trv, use_lang};
use pharmacy_core::{Action, Money, PharmacyError, Product};
use yew::prelude::*;

/// Row being edited and the text typed into its price box.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Draft {
    id: String,
    text: String,
}

/// Turn a typed price into the store action that applies it.
fn save_action(id: &str, text: &str) -> Result<Action, PharmacyError> {
    Ok(Action::UpdatePrice {
        id: id.to_string(),
        price: Money::parse_pounds(text)?,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StockSummary {
    total: usize,
    in_stock: usize,
    out_of_stock: usize,
}

impl StockSummary {
    fn of<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        products.into_iter().fold(Self::default(), |mut acc, product| {
            acc.total += 1;
            if product.in_stock {
                acc.in_stock += 1;
            } else {
                acc.out_of_stock += 1;
            }
            acc
        })
    }
}

#[function_component(UpdatePricesPage)]
pub fn update_prices_page() -> Html {
    let lang = use_lang();
    let store = use_store();
    let query = use_state(String::new);
    let draft = use_state(|| None::<Draft>);
    let notice = use_state(|| None::<Notice>);

    let on_search = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| query.set(input_value(&e)))
    };
    let on_draft = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(current) = (*draft).clone() {
                draft.set(Some(Draft {
                    text: input_value(&e),
                    ..current
                }));
            }
        })
    };
    let cancel = {
        let draft = draft.clone();
        Callback::from(move |_| draft.set(None))
    };
    let save = {
        let (store, draft, notice) = (store.clone(), draft.clone(), notice.clone());
        Callback::from(move |_| {
            let Some(current) = (*draft).clone() else {
                return;
            };
            match save_action(&current.id, &current.text) {
                Ok(action) => {
                    store.dispatch(action);
                    draft.set(None);
                    notice.set(Some(Notice::success("prices.saved")));
                }
                Err(err) => notice.set(Some(Notice::from_error(&err))),
            }
        })
    };
    let dismiss = {
        let notice = notice.clone();
        Callback::from(move |()| notice.set(None))
    };

    let book = store.catalog.price_book(&query);
    let summary = StockSummary::of(store.catalog.price_book(""));

    let rows = book.iter().map(|product| {
        let editing = draft.as_ref().filter(|d| d.id == product.id);
        let start = {
            let draft = draft.clone();
            let started = Draft {
                id: product.id.clone(),
                text: product.price.amount_text(),
            };
            Callback::from(move |_| draft.set(Some(started.clone())))
        };
        let toggle = {
            let store = store.clone();
            let id = product.id.clone();
            Callback::from(move |_| store.dispatch(Action::ToggleStock(id.clone())))
        };
        let price_cell = match editing {
            Some(d) => html! {
                <div class="price-edit">
                    <input type="number" min="0" step="0.01" value={d.text.clone()} oninput={on_draft.clone()}
                        aria-label={t("prices.new_price")} />
                    <span>{"EGP"}</span>
                </div>
            },
            None => html! {
                <div class="price-view">
                    <strong>{ product.price.to_string() }</strong>
                    if let Some(original) = product.original_price.filter(|o| *o > product.price) {
                        <s>{ original.to_string() }</s>
                    }
                </div>
            },
        };
        let actions = if editing.is_some() {
            html! {
                <>
                    <button type="button" class="btn btn-success btn-xs" onclick={save.clone()} title={t("prices.save")}>{"✓"}</button>
                    <button type="button" class="btn btn-error btn-xs" onclick={cancel.clone()} title={t("prices.cancel")}>{"✕"}</button>
                </>
            }
        } else {
            html! {
                <button type="button" class="btn btn-ghost btn-xs" onclick={start} title={t("prices.edit")}>{"✎"}</button>
            }
        };
        let (stock_class, stock_key) = if product.in_stock {
            ("badge badge-success", "product.in_stock")
        } else {
            ("badge badge-error", "product.out_of_stock")
        };
        html! {
            <tr key={product.id.clone()} data-testid="price-row">
                <td>
                    <div>{ product.name.pick(lang) }</div>
                    <div class="muted">{ product.name.pick(lang.toggle()) }</div>
                </td>
                <td>{ product.brand.clone() }</td>
                <td>{ product.category.pick(lang) }</td>
                <td>{ price_cell }</td>
                <td>
                    <button type="button" class={stock_class} onclick={toggle}>{ t(stock_key) }</button>
                </td>
                <td>{ actions }</td>
            </tr>
        }
    });

    html! {
        <div class="update-prices">
            <header>
                <h1>{ t("prices.title") }</h1>
                <p>{ t("prices.subtitle") }</p>
            </header>
            <NoticeBanner notice={(*notice).clone()} on_dismiss={dismiss} />
            <label class="search-box">
                <span class="sr-only">{ t("prices.search") }</span>
                <input type="search" value={(*query).clone()} oninput={on_search}
                    placeholder={t("prices.search")} />
            </label>
            <table class="table">
                <thead>
                    <tr>
                        <th>{ t("prices.medicine") }</th>
                        <th>{ t("prices.brand") }</th>
                        <th>{ t("prices.category") }</th>
                        <th>{ t("prices.price") }</th>
                        <th>{ t("prices.stock") }</th>
                        <th>{ t("prices.actions") }</th>
                    </tr>
                </thead>
                <tbody>{ for rows }</tbody>
            </table>
            if book.is_empty() {
                <p class="empty-state">{ t("prices.none_found") }</p>
            }
            <section class="summary" data-testid="price-summary">
                <h2>{ t("prices.summary") }</h2>
                <p>{ trv("prices.total", &[("count", summary.total.to_string().as_str())]) }</p>
                <p>{ trv("prices.in_stock", &[("count", summary.in_stock.to_string().as_str())]) }</p>
                <p>{ trv("prices.out_of_stock", &[("count", summary.out_of_stock.to_string().as_str())]) }</p>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_core::Catalog;

    #[test]
    fn typed_prices_become_update_actions() {
        let action = save_action("omega-3", "42.5").expect("valid price");
        assert_eq!(
            action,
            Action::UpdatePrice {
                id: "omega-3".into(),
                price: Money::parse_pounds("42.50").expect("money"),
            }
        );
        assert!(matches!(save_action("omega-3", "0"), Err(PharmacyError::InvalidPrice)));
        assert!(matches!(save_action("omega-3", "abc"), Err(PharmacyError::InvalidPrice)));
    }

    #[test]
    fn summary_counts_stock() {
        let catalog = Catalog::load_from_static().expect("catalog");
        let summary = StockSummary::of(catalog.price_book(""));
        assert_eq!(summary.total, summary.in_stock + summary.out_of_stock);
        assert!(summary.total > 0);
    }
}
