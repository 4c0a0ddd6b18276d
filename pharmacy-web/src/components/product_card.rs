use crate::i18n::{t, trv, use_lang};
use crate::paths::image_src;
use pharmacy_core::{CartItem, Product};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardLayout {
    #[default]
    Grid,
    List,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub product: Product,
    #[prop_or_default]
    pub layout: CardLayout,
    pub on_add: Callback<CartItem>,
}

fn stars(rating: f32) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let full = rating.clamp(0.0, 5.0).round() as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

#[function_component(ProductCard)]
pub fn product_card(p: &Props) -> Html {
    let lang = use_lang();
    let product = &p.product;
    let name = product.name.pick(lang).to_string();

    let add = {
        let cb = p.on_add.clone();
        let item = CartItem::from_product(product);
        Callback::from(move |_| cb.emit(item.clone()))
    };
    let class = match p.layout {
        CardLayout::Grid => "product-card",
        CardLayout::List => "product-card product-card--list",
    };

    html! {
        <article class={class} data-testid="product-card">
            <div class="product-card__media">
                <img src={image_src(&product.image)} alt={name.clone()} loading="lazy" />
                if let Some(percent) = product.discount_percent() {
                    <span class="badge badge-error" data-testid="discount">{ format!("-{percent}%") }</span>
                }
                if !product.in_stock {
                    <span class="product-card__out">{ t("product.out_of_stock") }</span>
                }
            </div>
            <div class="product-card__body">
                <p class="product-card__brand">{ product.brand.clone() }</p>
                <h3>{ name }</h3>
                <p class="product-card__rating" aria-label={trv("product.rating", &[("rating", format!("{:.1}", product.rating).as_str())])}>
                    <span aria-hidden="true">{ stars(product.rating) }</span>
                    <span>{ format!(" ({})", product.reviews) }</span>
                </p>
                <p class="product-card__price">
                    <strong>{ product.price.to_string() }</strong>
                    if let Some(original) = product.original_price.filter(|o| *o > product.price) {
                        <s class="product-card__original">{ original.to_string() }</s>
                    }
                </p>
                <button type="button" class="btn btn-primary" onclick={add} disabled={!product.in_stock}>
                    { if product.in_stock { t("product.add_to_cart") } else { t("product.out_of_stock") } }
                </button>
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_round_to_five_slots() {
        assert_eq!(stars(4.6), "★★★★★");
        assert_eq!(stars(4.2), "★★★★☆");
        assert_eq!(stars(0.0), "☆☆☆☆☆");
    }
}
