use crate::app::mounted::{spawn_guarded, use_mount_flag};
use crate::app::state::use_api;
use crate::components::{Modal, Notice, NoticeBanner, StatusBadge};
use crate::i18n::{fmt_datetime, t, trv, use_lang};
use crate::paths::tel_href;
use crate::router::Route;
use pharmacy_core::{
    Account, MedicineRequest, Order, RequestStatus, StatusCounts, Tracked, whatsapp_link,
};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub user: Account,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Requests,
    Orders,
    Customers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Request,
    Order,
}

#[derive(Debug, Clone, PartialEq)]
enum Details {
    Request(MedicineRequest),
    Order(Order),
}

/// Status buttons offered for a record in `status`.
#[must_use]
pub fn row_actions(status: RequestStatus) -> Vec<RequestStatus> {
    RequestStatus::ALL
        .into_iter()
        .filter(|next| status.can_transition_to(*next))
        .collect()
}

/// Records passing the status filter, newest first.
pub fn visible<T: Tracked>(records: &[T], filter: Option<RequestStatus>) -> Vec<&T> {
    records
        .iter()
        .rev()
        .filter(|record| filter.is_none_or(|status| record.status() == status))
        .collect()
}

/// Swap the stored copy of `updated` into `records`.
fn replace<T: Tracked + Clone>(records: &[T], updated: &T) -> Vec<T> {
    records
        .iter()
        .map(|record| {
            if record.id() == updated.id() {
                updated.clone()
            } else {
                record.clone()
            }
        })
        .collect()
}

/// A dashboard list. Updates apply to whatever the list holds when they resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Records<T>(pub Vec<T>);

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordsAction<T> {
    Loaded(Vec<T>),
    Updated(T),
}

impl<T: Tracked + Clone> Reducible for Records<T> {
    type Action = RecordsAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            RecordsAction::Loaded(records) => Rc::new(Self(records)),
            RecordsAction::Updated(record) => Rc::new(Self(replace(&self.0, &record))),
        }
    }
}

const fn action_label(next: RequestStatus) -> &'static str {
    match next {
        RequestStatus::Approved => "dashboard.approve",
        RequestStatus::Rejected => "dashboard.reject",
        RequestStatus::Delivered => "dashboard.mark_delivered",
        RequestStatus::Pending => "status.pending",
    }
}

const fn action_class(next: RequestStatus) -> &'static str {
    match next {
        RequestStatus::Approved => "btn btn-success btn-sm",
        RequestStatus::Rejected => "btn btn-error btn-sm",
        _ => "btn btn-primary btn-sm",
    }
}

fn action_buttons(
    kind: Kind,
    id: &str,
    status: RequestStatus,
    on_transition: &Callback<(Kind, String, RequestStatus)>,
) -> Html {
    row_actions(status)
        .into_iter()
        .map(|next| {
            let cb = on_transition.clone();
            let id = id.to_string();
            html! {
                <button type="button" class={action_class(next)} data-action={next.as_str()}
                    onclick={Callback::from(move |_| cb.emit((kind, id.clone(), next)))}>
                    { t(action_label(next)) }
                </button>
            }
        })
        .collect()
}

fn contact_links(phone: &str) -> Html {
    html! {
        <>
            <a class="btn btn-ghost btn-sm" href={tel_href(phone)} title={t("dashboard.call")}>{"📞 "}{ t("dashboard.call") }</a>
            <a class="btn btn-ghost btn-sm" href={whatsapp_link(phone)} target="_blank" rel="noopener noreferrer">
                { t("dashboard.whatsapp") }
            </a>
        </>
    }
}

fn request_row(
    request: &MedicineRequest,
    on_view: &Callback<Details>,
    on_transition: &Callback<(Kind, String, RequestStatus)>,
) -> Html {
    let view = {
        let cb = on_view.clone();
        let details = Details::Request(request.clone());
        Callback::from(move |_| cb.emit(details.clone()))
    };
    html! {
        <li key={request.id.clone()} class="record-row" data-testid="request-row">
            <div class="record-row__head">
                <h3>{ request.full_name.clone() }</h3>
                <StatusBadge status={request.status} />
            </div>
            <div class="record-row__grid">
                <p><strong>{ t("dashboard.medicine") }</strong>{" "}{ request.medicine_name.clone() }</p>
                <p><strong>{ t("dashboard.quantity") }</strong>{" "}{ request.quantity.clone() }</p>
                <p><strong>{ t("dashboard.phone") }</strong>{" "}{ request.phone_number.clone() }</p>
                <p><strong>{ t("dashboard.governorate") }</strong>{" "}{ request.governorate.clone() }</p>
                <p><strong>{ t("dashboard.city") }</strong>{" "}{ request.city.clone() }</p>
                <p><strong>{ t("dashboard.date") }</strong>{" "}{ fmt_datetime(request.timestamp) }</p>
            </div>
            if !request.notes.is_empty() {
                <p class="record-row__notes"><strong>{ t("dashboard.notes") }</strong>{" "}{ request.notes.clone() }</p>
            }
            <div class="record-row__actions">
                <button type="button" class="btn btn-ghost btn-sm" onclick={view}>{ t("dashboard.view") }</button>
                <a class="btn btn-ghost btn-sm" href={tel_href(&request.phone_number)}>{ t("dashboard.call") }</a>
                { action_buttons(Kind::Request, &request.id, request.status, on_transition) }
            </div>
        </li>
    }
}

fn order_row(
    order: &Order,
    on_view: &Callback<Details>,
    on_transition: &Callback<(Kind, String, RequestStatus)>,
) -> Html {
    let view = {
        let cb = on_view.clone();
        let details = Details::Order(order.clone());
        Callback::from(move |_| cb.emit(details.clone()))
    };
    html! {
        <li key={order.id.clone()} class="record-row" data-testid="order-row">
            <div class="record-row__head">
                <h3>{ format!("#{} · {}", order.id, order.customer_name) }</h3>
                <StatusBadge status={order.status} />
            </div>
            <div class="record-row__grid">
                <p><strong>{ t("dashboard.items") }</strong>{" "}{ order.item_count() }</p>
                <p><strong>{ t("dashboard.total_price") }</strong>{" "}{ order.total_price.to_string() }</p>
                <p><strong>{ t("dashboard.phone") }</strong>{" "}{ order.customer_phone.clone() }</p>
                <p><strong>{ t("dashboard.date") }</strong>{" "}{ fmt_datetime(order.timestamp) }</p>
            </div>
            <div class="record-row__actions">
                <button type="button" class="btn btn-ghost btn-sm" onclick={view}>{ t("dashboard.view") }</button>
                { action_buttons(Kind::Order, &order.id, order.status, on_transition) }
            </div>
        </li>
    }
}

fn details_body(details: &Details) -> Html {
    match details {
        Details::Request(request) => html! {
            <div class="details">
                <section>
                    <h4>{ t("dashboard.customer_info") }</h4>
                    <p><strong>{ t("dashboard.name") }</strong>{" "}{ request.full_name.clone() }</p>
                    <p><strong>{ t("dashboard.phone") }</strong>{" "}{ request.phone_number.clone() }</p>
                </section>
                <section>
                    <h4>{ t("dashboard.medicine_info") }</h4>
                    <p><strong>{ t("dashboard.medicine") }</strong>{" "}{ request.medicine_name.clone() }</p>
                    <p><strong>{ t("dashboard.quantity") }</strong>{" "}{ request.quantity.clone() }</p>
                </section>
                <section>
                    <h4>{ t("dashboard.address") }</h4>
                    <p>{ format!("{}, {}, {}", request.delivery_address, request.city, request.governorate) }</p>
                </section>
                if !request.notes.is_empty() {
                    <section><h4>{ t("dashboard.notes") }</h4><p>{ request.notes.clone() }</p></section>
                }
                if let Some(file) = request.prescription_file.as_ref() {
                    <p>{ trv("dashboard.prescription", &[("name", file.name.as_str())]) }</p>
                }
                <p>{ trv("dashboard.request_date", &[("date", fmt_datetime(request.timestamp).as_str())]) }</p>
                <div class="details__contact">{ contact_links(&request.phone_number) }</div>
            </div>
        },
        Details::Order(order) => html! {
            <div class="details">
                <section>
                    <h4>{ t("dashboard.customer_info") }</h4>
                    <p><strong>{ t("dashboard.name") }</strong>{" "}{ order.customer_name.clone() }</p>
                    <p><strong>{ t("dashboard.phone") }</strong>{" "}{ order.customer_phone.clone() }</p>
                    <p>{ order.customer_email.clone() }</p>
                </section>
                <section>
                    <h4>{ t("dashboard.address") }</h4>
                    <p>{ order.customer_address.clone() }</p>
                </section>
                <ul class="details__lines">
                    { for order.items.iter().map(|line| html! {
                        <li key={line.id.clone()}>
                            { format!("{} × {} = {}", line.name, line.quantity, line.total_price) }
                        </li>
                    }) }
                </ul>
                <p><strong>{ t("dashboard.total_price") }</strong>{" "}{ order.total_price.to_string() }</p>
                <p>{ trv("dashboard.request_date", &[("date", fmt_datetime(order.timestamp).as_str())]) }</p>
                <div class="details__contact">{ contact_links(&order.customer_phone) }</div>
            </div>
        },
    }
}

fn stat_cards(counts: StatusCounts) -> Html {
    let card = |label: String, value: usize, class: &'static str| {
        html! {
            <div class={classes!("stat-card", class)}>
                <p class="stat-card__label">{ label }</p>
                <p class="stat-card__value">{ value }</p>
            </div>
        }
    };
    html! {
        <div class="stats" data-testid="dashboard-stats">
            { card(t("dashboard.total"), counts.total, "stat-card--total") }
            { card(t("status.pending"), counts.pending, "stat-card--pending") }
            { card(t("status.approved"), counts.approved, "stat-card--approved") }
            { card(t("status.delivered"), counts.delivered, "stat-card--delivered") }
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page(p: &Props) -> Html {
    let _lang = use_lang();
    let api = use_api();
    let mounted = use_mount_flag();
    let tab = use_state(|| Tab::Requests);
    let filter = use_state(|| None::<RequestStatus>);
    let requests = use_reducer(Records::<MedicineRequest>::default);
    let orders = use_reducer(Records::<Order>::default);
    let details = use_state(|| None::<Details>);
    let notice = use_state(|| None::<Notice>);

    {
        let (api, mounted) = (api.clone(), mounted.clone());
        let (requests, orders, notice) = (requests.clone(), orders.clone(), notice.clone());
        use_effect_with((), move |()| {
            spawn_guarded(
                mounted,
                async move { (api.medicine_requests().await, api.orders().await) },
                move |(loaded_requests, loaded_orders)| {
                    match loaded_requests {
                        Ok(list) => requests.dispatch(RecordsAction::Loaded(list)),
                        Err(err) => notice.set(Some(Notice::from_error(&err))),
                    }
                    match loaded_orders {
                        Ok(list) => orders.dispatch(RecordsAction::Loaded(list)),
                        Err(err) => notice.set(Some(Notice::from_error(&err))),
                    }
                },
            );
        });
    }

    let on_transition = {
        let (requests, orders, notice) = (requests.clone(), orders.clone(), notice.clone());
        Callback::from(move |(kind, id, next): (Kind, String, RequestStatus)| {
            let api = api.clone();
            let (requests, orders, notice) = (requests.clone(), orders.clone(), notice.clone());
            let updated = Notice::success("dashboard.updated").with("status", t(next.label_key()));
            match kind {
                Kind::Request => spawn_guarded(
                    mounted.clone(),
                    async move { api.set_medicine_request_status(&id, next).await },
                    move |result| match result {
                        Ok(record) => {
                            requests.dispatch(RecordsAction::Updated(record));
                            notice.set(Some(updated));
                        }
                        Err(err) => notice.set(Some(Notice::from_error(&err))),
                    },
                ),
                Kind::Order => spawn_guarded(
                    mounted.clone(),
                    async move { api.set_order_status(&id, next).await },
                    move |result| match result {
                        Ok(record) => {
                            orders.dispatch(RecordsAction::Updated(record));
                            notice.set(Some(updated));
                        }
                        Err(err) => notice.set(Some(Notice::from_error(&err))),
                    },
                ),
            }
        })
    };
    let on_view = {
        let details = details.clone();
        Callback::from(move |selected: Details| details.set(Some(selected)))
    };
    let close_details = {
        let details = details.clone();
        Callback::from(move |()| details.set(None))
    };
    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                filter.set(RequestStatus::parse(&select.value()));
            }
        })
    };
    let dismiss = {
        let notice = notice.clone();
        Callback::from(move |()| notice.set(None))
    };
    let select_tab = |target: Tab| {
        let tab = tab.clone();
        Callback::from(move |_| tab.set(target))
    };

    let counts = match *tab {
        Tab::Orders => StatusCounts::tally(orders.0.iter()),
        _ => StatusCounts::tally(requests.0.iter()),
    };

    let filter_select = html! {
        <label class="status-filter">
            <span class="sr-only">{ t("dashboard.filter") }</span>
            <select onchange={on_filter} aria-label={t("dashboard.filter")}>
                <option value="" selected={filter.is_none()}>{ t("dashboard.filter_all") }</option>
                { for RequestStatus::ALL.into_iter().map(|status| html! {
                    <option value={status.as_str()} selected={*filter == Some(status)}>{ t(status.label_key()) }</option>
                }) }
            </select>
        </label>
    };

    let list = |rows: Vec<Html>| {
        if rows.is_empty() {
            html! { <p class="empty-state">{ t("dashboard.empty") }</p> }
        } else {
            html! { <ul class="records">{ for rows }</ul> }
        }
    };

    let panel = match *tab {
        Tab::Requests => list(
            visible(&requests.0, *filter)
                .into_iter()
                .map(|request| request_row(request, &on_view, &on_transition))
                .collect(),
        ),
        Tab::Orders => list(
            visible(&orders.0, *filter)
                .into_iter()
                .map(|order| order_row(order, &on_view, &on_transition))
                .collect(),
        ),
        Tab::Customers => html! {
            <section class="empty-state">
                <h2>{ t("dashboard.customers_title") }</h2>
                <p>{ t("dashboard.coming_soon") }</p>
            </section>
        },
    };

    let tab_button = |target: Tab, key: &str| {
        let active = *tab == target;
        html! {
            <button type="button" role="tab" aria-selected={active.to_string()}
                class={classes!("tab", active.then_some("tab-active"))} onclick={select_tab(target)}>
                { t(key) }
            </button>
        }
    };

    let details_title = match details.as_ref() {
        Some(Details::Order(order)) => format!("{} #{}", t("dashboard.details"), order.id),
        _ => t("dashboard.details"),
    };

    html! {
        <div class="dashboard">
            <header>
                <h1>{ t("dashboard.title") }</h1>
                <p>{ trv("dashboard.welcome", &[("name", p.user.name())]) }</p>
            </header>
            <NoticeBanner notice={(*notice).clone()} on_dismiss={dismiss} />
            { stat_cards(counts) }
            <nav class="quick-links" aria-label={t("dashboard.quick_links")}>
                if p.user.is_admin() {
                    <Link<Route> to={Route::DoctorRequests} classes="btn btn-secondary">{ t("dashboard.doctor_requests") }</Link<Route>>
                }
                <Link<Route> to={Route::UpdatePrices} classes="btn btn-secondary">{ t("dashboard.update_prices") }</Link<Route>>
            </nav>
            <div role="tablist" class="tabs">
                { tab_button(Tab::Requests, "dashboard.tab_requests") }
                { tab_button(Tab::Orders, "dashboard.tab_orders") }
                { tab_button(Tab::Customers, "dashboard.tab_customers") }
            </div>
            if *tab != Tab::Customers {
                { filter_select }
            }
            { panel }
            <Modal open={details.is_some()} title={details_title} on_close={close_details}>
                { details.as_ref().map(details_body).unwrap_or_default() }
            </Modal>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_core::medicine::sample_requests;

    #[test]
    fn buttons_follow_the_transition_table() {
        assert_eq!(
            row_actions(RequestStatus::Pending),
            vec![RequestStatus::Approved, RequestStatus::Rejected]
        );
        assert_eq!(row_actions(RequestStatus::Approved), vec![RequestStatus::Delivered]);
        assert!(row_actions(RequestStatus::Delivered).is_empty());
        assert!(row_actions(RequestStatus::Rejected).is_empty());
    }

    #[test]
    fn filter_keeps_matching_records_newest_first() {
        let samples = sample_requests().expect("sample requests");
        let all = visible(&samples, None);
        assert_eq!(all.len(), samples.len());
        assert_eq!(all.first().map(|r| r.id()), samples.last().map(|r| r.id()));
        let pending = visible(&samples, Some(RequestStatus::Pending));
        assert!(pending.iter().all(|r| r.status() == RequestStatus::Pending));
    }

    #[test]
    fn replace_swaps_only_the_updated_record() {
        let samples = sample_requests().expect("sample requests");
        let mut changed = samples[0].clone();
        changed.set_status(RequestStatus::Rejected);
        let next = replace(&samples, &changed);
        assert_eq!(next[0].status, RequestStatus::Rejected);
        assert_eq!(next[1..], samples[1..]);
    }

    #[test]
    fn updates_resolving_together_both_land() {
        let samples = sample_requests().expect("sample requests");
        let mut first = samples[0].clone();
        first.set_status(RequestStatus::Rejected);
        let mut second = samples[1].clone();
        second.set_status(RequestStatus::Rejected);

        let list = Rc::new(Records(samples.clone()))
            .reduce(RecordsAction::Updated(first))
            .reduce(RecordsAction::Updated(second));
        assert_eq!(list.0[0].status, RequestStatus::Rejected);
        assert_eq!(list.0[1].status, RequestStatus::Rejected);
        assert_eq!(list.0[2..], samples[2..]);
    }
}
