//! Route to page mapping for the storefront shell.
use crate::app::handlers::AppHandlers;
use crate::pages::{
    CategoryPage, DashboardPage, DoctorRequestsPage, HomePage, LoginPage, NotFound, OffersPage,
    RequestMedicinePage, SearchPage, SignupPage, UpdatePricesPage, VerifyOtpPage,
};
use crate::router::Route;
use chrono::{DateTime, Utc};
use pharmacy_core::{Account, Category, SiteContent};
use std::rc::Rc;
use yew::prelude::*;

/// Everything a page may need from the shell.
pub struct PageCtx<'a> {
    pub user: Option<&'a Account>,
    pub categories: &'a [Category],
    pub content: &'a Rc<SiteContent>,
    pub search_query: &'a str,
    pub now: DateTime<Utc>,
    pub handlers: &'a AppHandlers,
}

/// Render the page for `route`. Gating happens before this is called.
#[must_use]
pub fn render_route(route: &Route, ctx: &PageCtx<'_>) -> Html {
    let h = ctx.handlers;
    match route {
        Route::Home => html! {
            <HomePage content={Rc::clone(ctx.content)} categories={ctx.categories.to_vec()} />
        },
        Route::Category { slug } => html! {
            <CategoryPage slug={AttrValue::from(slug.clone())} on_add={h.add_to_cart.clone()} />
        },
        Route::Search => html! {
            <SearchPage query={AttrValue::from(ctx.search_query.to_string())} on_add={h.add_to_cart.clone()} />
        },
        Route::Offers => html! {
            <OffersPage content={Rc::clone(ctx.content)} now={ctx.now} />
        },
        Route::Login => html! {
            <LoginPage on_signed_in={h.signed_in.clone()} on_navigate={h.go.clone()} />
        },
        Route::Signup => html! { <SignupPage on_navigate={h.go.clone()} /> },
        Route::VerifyOtp => html! {
            <VerifyOtpPage on_signed_in={h.signed_in.clone()} on_navigate={h.go.clone()}
                on_flash={h.flash.clone()} />
        },
        Route::RequestMedicine => html! {
            <RequestMedicinePage user={ctx.user.cloned()} on_navigate={h.go.clone()} />
        },
        Route::Dashboard => match ctx.user {
            Some(user) => html! { <DashboardPage user={user.clone()} /> },
            None => html! { <NotFound /> },
        },
        Route::DoctorRequests => html! { <DoctorRequestsPage /> },
        Route::UpdatePrices => html! { <UpdatePricesPage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
