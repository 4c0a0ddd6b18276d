use crate::components::notice::{Notice, NoticeBanner};
use crate::i18n::{t, use_lang};
use crate::paths::image_src;
use pharmacy_core::{Cart, line_breakdown};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub cart: Cart,
    pub signed_in: bool,
    pub busy: bool,
    #[prop_or_default]
    pub notice: Option<Notice>,
    pub on_close: Callback<()>,
    pub on_set_quantity: Callback<(String, u32)>,
    pub on_remove: Callback<String>,
    pub on_place_order: Callback<()>,
    pub on_clear: Callback<()>,
    #[prop_or_default]
    pub on_dismiss_notice: Option<Callback<()>>,
}

/// Side drawer listing the cart lines with checkout controls.
#[function_component(CartDrawer)]
pub fn cart_drawer(p: &Props) -> Html {
    let lang = use_lang();
    if !p.open {
        return Html::default();
    }

    let close = {
        let cb = p.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_keydown = {
        let cb = p.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                cb.emit(());
            }
        })
    };

    let lines = p
        .cart
        .lines()
        .iter()
        .map(|line| {
            let id = line.id.clone();
            let quantity = line.quantity;
            let decrement = {
                let cb = p.on_set_quantity.clone();
                let id = id.clone();
                Callback::from(move |_| cb.emit((id.clone(), quantity.saturating_sub(1))))
            };
            let increment = {
                let cb = p.on_set_quantity.clone();
                let id = id.clone();
                Callback::from(move |_| cb.emit((id.clone(), quantity + 1)))
            };
            let remove = {
                let cb = p.on_remove.clone();
                let id = id.clone();
                Callback::from(move |_| cb.emit(id.clone()))
            };
            html! {
                <li key={id} class="cart-line" data-testid="cart-line">
                    <img src={image_src(&line.image)} alt={line.name.pick(lang).to_string()} loading="lazy" />
                    <div class="cart-line__info">
                        <h3>{ line.name.pick(lang) }</h3>
                        <p class="cart-line__brand">{ line.brand.clone() }</p>
                        <p class="cart-line__price">{ line_breakdown(line.price, line.quantity) }</p>
                    </div>
                    <div class="cart-line__qty">
                        <button type="button" onclick={decrement} aria-label={t("cart.decrease")}>{"−"}</button>
                        <span data-testid="cart-line-qty">{ line.quantity }</span>
                        <button type="button" onclick={increment} aria-label={t("cart.increase")}>{"+"}</button>
                    </div>
                    <button type="button" class="cart-line__remove" onclick={remove} aria-label={t("cart.remove")}>
                        {"🗑"}
                    </button>
                </li>
            }
        })
        .collect::<Html>();

    let footer = if p.cart.is_empty() {
        Html::default()
    } else {
        let place_order = {
            let cb = p.on_place_order.clone();
            Callback::from(move |_| cb.emit(()))
        };
        let clear = {
            let cb = p.on_clear.clone();
            Callback::from(move |_| cb.emit(()))
        };
        html! {
            <div class="cart-drawer__footer">
                <p class="cart-drawer__total">
                    <span>{ t("cart.total") }</span>
                    <strong data-testid="cart-total">{ p.cart.total().to_string() }</strong>
                </p>
                <button type="button" class="btn btn-primary btn-block" onclick={place_order}
                    disabled={p.busy} aria-busy={p.busy.to_string()} data-testid="place-order">
                    { if p.busy { t("cart.placing") } else { t("cart.place_order") } }
                </button>
                <button type="button" class="btn btn-ghost btn-block" onclick={clear} disabled={p.busy}>
                    { t("cart.clear") }
                </button>
                if !p.signed_in {
                    <p class="cart-drawer__hint">{ t("cart.login_hint") }</p>
                }
            </div>
        }
    };

    html! {
        <div class="drawer-backdrop" onclick={close.clone()} role="presentation">
            <aside class="cart-drawer" role="dialog" aria-modal="true" aria-labelledby="cart-title"
                onkeydown={on_keydown} onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="cart-drawer__header">
                    <h2 id="cart-title">{ t("cart.title") }</h2>
                    <button type="button" onclick={close} aria-label={t("ui.close")}>{"✕"}</button>
                </div>
                <NoticeBanner notice={p.notice.clone()} on_dismiss={p.on_dismiss_notice.clone()} />
                if p.cart.is_empty() {
                    <div class="cart-drawer__empty" data-testid="cart-empty">
                        <p>{"🛒"}</p>
                        <p>{ t("cart.empty") }</p>
                    </div>
                } else {
                    <ul class="cart-drawer__lines">{ lines }</ul>
                }
                { footer }
            </aside>
        </div>
    }
}
