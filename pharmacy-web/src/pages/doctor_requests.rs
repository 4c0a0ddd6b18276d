use crate::app::mounted::{spawn_guarded, use_mount_flag};
use crate::app::state::use_api;
use crate::components::status_badge::doctor_status_class;
use crate::components::{Modal, Notice, NoticeBanner};
use crate::i18n::{fmt_datetime, t, use_lang};
use crate::paths::tel_href;
use pharmacy_core::{DoctorRequest, DoctorStatus, ReviewSession};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    const fn notice_key(self) -> &'static str {
        match self {
            Self::Approve => "doctors.approved_notice",
            Self::Reject => "doctors.rejected_notice",
        }
    }
}

/// Pending list after `decided` left it.
fn without(pending: &[DoctorRequest], decided: &DoctorRequest) -> Vec<DoctorRequest> {
    pending
        .iter()
        .filter(|request| request.id != decided.id)
        .cloned()
        .collect()
}

fn badge(status: DoctorStatus) -> Html {
    html! { <span class={doctor_status_class(status)}>{ t(status.label_key()) }</span> }
}

fn decision_buttons(id: &str, on_decide: &Callback<(String, Decision)>) -> Html {
    let button = |decision: Decision, class: &'static str, key: &'static str| {
        let cb = on_decide.clone();
        let id = id.to_string();
        html! {
            <button type="button" class={class}
                onclick={Callback::from(move |_| cb.emit((id.clone(), decision)))}>
                { t(key) }
            </button>
        }
    };
    html! {
        <>
            { button(Decision::Approve, "btn btn-success btn-sm", "doctors.approve") }
            { button(Decision::Reject, "btn btn-error btn-sm", "doctors.reject") }
        </>
    }
}

fn request_facts(request: &DoctorRequest) -> Html {
    html! {
        <div class="record-row__grid">
            <p><strong>{ t("doctors.email") }</strong>{" "}{ request.email.clone() }</p>
            <p><strong>{ t("doctors.phone") }</strong>{" "}{ request.phone.clone() }</p>
            <p><strong>{ t("doctors.license") }</strong>{" "}{ request.license_number.clone() }</p>
            <p><strong>{ t("doctors.address") }</strong>{" "}{ request.address.clone() }</p>
            <p><strong>{ t("doctors.request_date") }</strong>{" "}{ fmt_datetime(request.request_date) }</p>
        </div>
    }
}

#[function_component(DoctorRequestsPage)]
pub fn doctor_requests_page() -> Html {
    let _lang = use_lang();
    let api = use_api();
    let mounted = use_mount_flag();
    let pending = use_state(Vec::<DoctorRequest>::new);
    let session = use_state(ReviewSession::default);
    let selected = use_state(|| None::<DoctorRequest>);
    let notice = use_state(|| None::<Notice>);

    {
        let (api, mounted, pending, notice) =
            (api.clone(), mounted.clone(), pending.clone(), notice.clone());
        use_effect_with((), move |()| {
            spawn_guarded(
                mounted,
                async move { api.pending_doctors().await },
                move |result| match result {
                    Ok(list) => pending.set(list),
                    Err(err) => notice.set(Some(Notice::from_error(&err))),
                },
            );
        });
    }

    let on_decide = {
        let (pending, session, selected, notice) =
            (pending.clone(), session.clone(), selected.clone(), notice.clone());
        Callback::from(move |(id, decision): (String, Decision)| {
            selected.set(None);
            let api = api.clone();
            let (pending, session, notice) = (pending.clone(), session.clone(), notice.clone());
            spawn_guarded(
                mounted.clone(),
                async move {
                    match decision {
                        Decision::Approve => api.approve_doctor(&id).await,
                        Decision::Reject => api.reject_doctor(&id).await,
                    }
                },
                move |result| match result {
                    Ok(request) => {
                        log::info!("doctor request {} marked {:?}", request.id, request.status);
                        pending.set(without(&pending, &request));
                        let mut next = (*session).clone();
                        next.record(request);
                        session.set(next);
                        notice.set(Some(Notice::success(decision.notice_key())));
                    }
                    Err(err) => notice.set(Some(Notice::from_error(&err))),
                },
            );
        })
    };
    let dismiss = {
        let notice = notice.clone();
        Callback::from(move |()| notice.set(None))
    };
    let close = {
        let selected = selected.clone();
        Callback::from(move |()| selected.set(None))
    };

    let pending_rows = pending.iter().map(|request| {
        let view = {
            let selected = selected.clone();
            let request = request.clone();
            Callback::from(move |_| selected.set(Some(request.clone())))
        };
        html! {
            <li key={request.id.clone()} class="record-row" data-testid="doctor-row">
                <div class="record-row__head">
                    <h3>{ request.name.clone() }</h3>
                    { badge(request.status) }
                </div>
                { request_facts(request) }
                <div class="record-row__actions">
                    <button type="button" class="btn btn-ghost btn-sm" onclick={view}>{ t("doctors.view") }</button>
                    <a class="btn btn-ghost btn-sm" href={tel_href(&request.phone)}>{ t("doctors.call") }</a>
                    <a class="btn btn-ghost btn-sm" href={format!("mailto:{}", request.email)}>{ t("doctors.send_email") }</a>
                    { decision_buttons(&request.id, &on_decide) }
                </div>
            </li>
        }
    });

    let processed = session.processed().iter().rev().map(|request| {
        html! {
            <li key={request.id.clone()} class="record-row record-row--done">
                <div>
                    <h3>{ request.name.clone() }</h3>
                    <p>{ request.email.clone() }</p>
                </div>
                { badge(request.status) }
            </li>
        }
    });

    let modal_body = selected.as_ref().map(|request| {
        html! {
            <div class="details">
                <h3>{ request.name.clone() }</h3>
                { request_facts(request) }
                <div class="record-row__actions">{ decision_buttons(&request.id, &on_decide) }</div>
            </div>
        }
    });

    html! {
        <div class="doctor-requests">
            <header>
                <h1>{ t("doctors.title") }</h1>
                <p>{ t("doctors.subtitle") }</p>
            </header>
            <NoticeBanner notice={(*notice).clone()} on_dismiss={dismiss} />
            <div class="stats" data-testid="doctor-stats">
                <div class="stat-card stat-card--pending">
                    <p class="stat-card__label">{ t("doctors.pending_count") }</p>
                    <p class="stat-card__value">{ pending.len() }</p>
                </div>
                <div class="stat-card stat-card--approved">
                    <p class="stat-card__label">{ t("status.approved") }</p>
                    <p class="stat-card__value">{ session.count(DoctorStatus::Approved) }</p>
                </div>
                <div class="stat-card stat-card--rejected">
                    <p class="stat-card__label">{ t("status.rejected") }</p>
                    <p class="stat-card__value">{ session.count(DoctorStatus::Rejected) }</p>
                </div>
            </div>
            <section>
                <h2>{ t("doctors.pending_title") }</h2>
                if pending.is_empty() {
                    <p class="empty-state">{ t("doctors.none_pending") }</p>
                } else {
                    <ul class="records">{ for pending_rows }</ul>
                }
            </section>
            if !session.processed().is_empty() {
                <section>
                    <h2>{ t("doctors.processed_title") }</h2>
                    <ul class="records">{ for processed }</ul>
                </section>
            }
            <Modal open={selected.is_some()} title={t("doctors.details")} on_close={close}>
                { modal_body.unwrap_or_default() }
            </Modal>
        </div>
    }
}
