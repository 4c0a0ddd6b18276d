use crate::i18n::{t, use_lang};
use pharmacy_core::{DoctorStatus, RequestStatus};
use yew::prelude::*;

#[must_use]
pub const fn status_class(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "badge badge-warning",
        RequestStatus::Approved => "badge badge-info",
        RequestStatus::Rejected => "badge badge-error",
        RequestStatus::Delivered => "badge badge-success",
    }
}

#[must_use]
pub const fn doctor_status_class(status: DoctorStatus) -> &'static str {
    match status {
        DoctorStatus::Pending => "badge badge-warning",
        DoctorStatus::Approved => "badge badge-success",
        DoctorStatus::Rejected => "badge badge-error",
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub status: RequestStatus,
}

#[function_component(StatusBadge)]
pub fn status_badge(p: &Props) -> Html {
    let _lang = use_lang();
    html! {
        <span class={status_class(p.status)} data-status={p.status.as_str()}>
            { t(p.status.label_key()) }
        </span>
    }
}
