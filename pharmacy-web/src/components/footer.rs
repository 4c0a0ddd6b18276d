use crate::i18n::{t, use_lang};
use crate::router::Route;
use pharmacy_core::Category;
use pharmacy_core::constants::{PHARMACY_EMAIL, PHARMACY_PHONE, PHARMACY_WHATSAPP};
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub categories: Vec<Category>,
}

#[function_component(Footer)]
pub fn footer(p: &Props) -> Html {
    let lang = use_lang();
    html! {
        <footer class="site-footer" role="contentinfo">
            <section>
                <h2>{ t("footer.about_title") }</h2>
                <p>{ t("footer.about") }</p>
            </section>
            <section>
                <h2>{ t("nav.categories") }</h2>
                <ul>
                    { for p.categories.iter().take(6).map(|c| html! {
                        <li key={c.slug.clone()}>
                            <Link<Route> to={Route::category(&c.slug)}>{ c.name.pick(lang) }</Link<Route>>
                        </li>
                    }) }
                </ul>
            </section>
            <section>
                <h2>{ t("footer.contact") }</h2>
                <ul>
                    <li><a href={crate::paths::hotline_href()}>{ PHARMACY_PHONE }</a></li>
                    <li><a href={format!("mailto:{PHARMACY_EMAIL}")}>{ PHARMACY_EMAIL }</a></li>
                    <li><a href={PHARMACY_WHATSAPP} target="_blank" rel="noopener noreferrer">{ t("footer.whatsapp") }</a></li>
                </ul>
            </section>
            <p class="site-footer__copyright">{ t("footer.copyright") }</p>
        </footer>
    }
}
