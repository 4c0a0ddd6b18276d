use crate::i18n::{t, trv, use_lang};
use crate::router::Route;
use pharmacy_core::constants::PHARMACY_WHATSAPP;
use pharmacy_core::{Category, SiteContent};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::Link;

const HERO_IMAGE: &str =
    "https://images.pexels.com/photos/356056/pexels-photo-356056.jpeg?auto=compress&cs=tinysrgb&w=800";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub content: Rc<SiteContent>,
    pub categories: Vec<Category>,
}

fn feature_icon(name: &str) -> &'static str {
    match name {
        "shield" => "🛡️",
        "truck" => "🚚",
        "clock" => "⏰",
        "phone" => "📞",
        _ => "✨",
    }
}

#[function_component(HomePage)]
pub fn home_page(p: &Props) -> Html {
    let lang = use_lang();

    let features = p.content.features.iter().map(|feature| {
        html! {
            <div class="feature-card">
                <span class="feature-card__icon" aria-hidden="true">{ feature_icon(&feature.icon) }</span>
                <h3>{ feature.title.pick(lang) }</h3>
                <p>{ feature.description.pick(lang) }</p>
            </div>
        }
    });

    let categories = p.categories.iter().map(|category| {
        html! {
            <Link<Route> to={Route::category(&category.slug)} classes="category-tile">
                <span class="category-tile__icon" aria-hidden="true">{ category.icon.clone() }</span>
                <h3>{ category.name.pick(lang) }</h3>
                <span class="category-tile__count">
                    { trv("home.product_count", &[("count", category.product_count.to_string().as_str())]) }
                </span>
            </Link<Route>>
        }
    });

    let testimonials = p.content.testimonials.iter().map(|testimonial| {
        html! {
            <figure class="testimonial">
                <div class="testimonial__stars" aria-label={trv("product.rating", &[("rating", testimonial.rating.to_string().as_str())])}>
                    { "★".repeat(usize::from(testimonial.rating.min(5))) }
                </div>
                <blockquote>{ format!("\"{}\"", testimonial.text.pick(lang)) }</blockquote>
                <figcaption>{ testimonial.name.pick(lang) }</figcaption>
            </figure>
        }
    });

    html! {
        <div class="home">
            <section class="hero">
                <div>
                    <h1>{ t("home.title") }</h1>
                    <p>{ t("home.subtitle") }</p>
                    <div class="hero__actions">
                        <Link<Route> to={Route::RequestMedicine} classes="btn btn-primary">{ t("home.order_now") }</Link<Route>>
                        <a href={PHARMACY_WHATSAPP} class="btn btn-success" target="_blank" rel="noopener noreferrer">
                            { t("home.whatsapp") }
                        </a>
                    </div>
                </div>
                <img src={HERO_IMAGE} alt={t("home.hero_alt")} />
            </section>

            <section class="home__features">
                <h2>{ t("home.features_title") }</h2>
                <p>{ t("home.features_subtitle") }</p>
                <div class="grid">{ for features }</div>
            </section>

            <section class="home__categories">
                <h2>{ t("home.categories_title") }</h2>
                <p>{ t("home.categories_subtitle") }</p>
                <div class="grid" data-testid="home-categories">{ for categories }</div>
            </section>

            <section class="home__testimonials">
                <h2>{ t("home.testimonials_title") }</h2>
                <div class="grid">{ for testimonials }</div>
            </section>

            <section class="home__cta">
                <h2>{ t("home.cta_title") }</h2>
                <p>{ t("home.cta_subtitle") }</p>
                <Link<Route> to={Route::Signup} classes="btn btn-secondary">{ t("home.create_account") }</Link<Route>>
                <Link<Route> to={Route::RequestMedicine} classes="btn btn-primary">{ t("home.order_now") }</Link<Route>>
            </section>
        </div>
    }
}
