use crate::i18n::{fmt_date, t, trv, use_lang};
use crate::paths::image_src;
use crate::router::Route;
use chrono::{DateTime, Utc};
use pharmacy_core::{Offer, OfferBadge, SiteContent};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub content: Rc<SiteContent>,
    pub now: DateTime<Utc>,
}

fn badge_text(offer: &Offer) -> String {
    match offer.badge() {
        OfferBadge::Free => t("offers.free"),
        OfferBadge::Off(discount) => trv("offers.off", &[("discount", discount.as_str())]),
    }
}

/// Category the "Shop Now" button opens; offers for every category go home.
fn shop_route(offer: &Offer) -> Route {
    offer
        .category_slug
        .as_deref()
        .map_or(Route::Home, Route::category)
}

fn offer_card(offer: &Offer, now: DateTime<Utc>, featured: bool) -> Html {
    let lang = crate::i18n::current_lang();
    let days = offer.days_left(now);
    let expired = offer.is_expired(now);
    let class = if featured {
        "offer-card offer-card--featured"
    } else {
        "offer-card"
    };
    html! {
        <article key={offer.id.to_string()} class={class} data-testid="offer-card">
            <div class="offer-card__media">
                <img src={image_src(&offer.image)} alt={offer.title.pick(lang).to_string()} loading="lazy" />
                <span class="badge badge-error">{ badge_text(offer) }</span>
            </div>
            <div class="offer-card__body">
                <span class="offer-card__category">{ offer.category.pick(lang) }</span>
                <h3>{ offer.title.pick(lang) }</h3>
                <p>{ offer.description.pick(lang) }</p>
                <p class="offer-card__valid">
                    { trv("offers.valid_until", &[("date", fmt_date(offer.valid_until).as_str())]) }
                </p>
                if expired {
                    <span class="badge badge-ghost" data-testid="offer-expired">{ t("offers.expired") }</span>
                    <button type="button" class="btn" disabled={true}>{ t("offers.shop_now") }</button>
                } else {
                    <span class="badge badge-success">
                        { trv("offers.days_left", &[("count", days.to_string().as_str())]) }
                    </span>
                    <Link<Route> to={shop_route(offer)} classes="btn btn-primary">{ t("offers.shop_now") }</Link<Route>>
                }
            </div>
        </article>
    }
}

#[function_component(OffersPage)]
pub fn offers_page(p: &Props) -> Html {
    let _lang = use_lang();
    let now = p.now;
    html! {
        <div class="offers-page">
            <header class="page-hero">
                <h1>{ t("offers.title") }</h1>
                <p>{ t("offers.subtitle") }</p>
            </header>
            <section>
                <h2>{"⭐ "}{ t("offers.featured") }</h2>
                <div class="grid" data-testid="featured-offers">
                    { for p.content.featured_offers().map(|offer| offer_card(offer, now, true)) }
                </div>
            </section>
            <section>
                <h2>{ t("offers.all") }</h2>
                <div class="grid" data-testid="regular-offers">
                    { for p.content.regular_offers().map(|offer| offer_card(offer, now, false)) }
                </div>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_without_a_category_shop_everything() {
        let content = SiteContent::load_from_static().expect("embedded content");
        for offer in &content.offers {
            let route = shop_route(offer);
            match offer.category_slug.as_deref() {
                Some(slug) => assert_eq!(route, Route::category(slug)),
                None => assert_eq!(route, Route::Home),
            }
        }
    }
}
