use crate::app::mounted::{spawn_guarded, use_mount_flag};
use crate::app::state::use_api;
use crate::components::field::input_value;
use crate::components::{FormField, Notice, NoticeBanner};
use crate::i18n::{t, trv, use_lang};
use crate::router::Route;
use pharmacy_core::constants::{GOVERNORATES, PHARMACY_WHATSAPP};
use pharmacy_core::{
    Account, Field, FieldErrors, MedicineRequest, MedicineRequestForm, PharmacyError,
    PrescriptionFile,
};
use std::time::Duration;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Pause on the success panel before returning home.
const SUCCESS_PAUSE: Duration = Duration::from_millis(2500);

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub user: Option<Account>,
    pub on_navigate: Callback<Route>,
}

fn apply_input(form: &mut MedicineRequestForm, field: Field, value: String) -> bool {
    let slot = match field {
        Field::FullName => &mut form.full_name,
        Field::PhoneNumber => &mut form.phone_number,
        Field::MedicineName => &mut form.medicine_name,
        Field::Quantity => &mut form.quantity,
        Field::DeliveryAddress => &mut form.delivery_address,
        Field::City => &mut form.city,
        Field::Governorate => &mut form.governorate,
        _ => return false,
    };
    *slot = value;
    true
}

/// Validate the first file of a picker change event.
fn picked_file(e: &Event) -> Option<Result<PrescriptionFile, PharmacyError>> {
    let input = e
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())?;
    let file = input.files()?.get(0)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let size = file.size().max(0.0) as u64;
    let result = PrescriptionFile::accept(&file.name(), &file.type_(), size);
    if result.is_err() {
        input.set_value("");
    }
    Some(result)
}

#[function_component(RequestMedicinePage)]
pub fn request_medicine_page(p: &Props) -> Html {
    let _lang = use_lang();
    let api = use_api();
    let mounted = use_mount_flag();
    let form = {
        let user = p.user.clone();
        use_state(move || MedicineRequestForm::prefilled(user.as_ref()))
    };
    let errors = use_state(FieldErrors::new);
    let file_error = use_state(|| None::<Notice>);
    let notice = use_state(|| None::<Notice>);
    let busy = use_state(|| false);
    let submitted = use_state(|| None::<MedicineRequest>);

    let on_input = {
        let (form, errors) = (form.clone(), errors.clone());
        Callback::from(move |(field, value): (Field, String)| {
            let mut next = (*form).clone();
            if apply_input(&mut next, field, value) {
                let mut cleared = (*errors).clone();
                cleared.clear(field);
                errors.set(cleared);
                form.set(next);
            }
        })
    };
    let on_governorate = {
        let on_input = on_input.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                on_input.emit((Field::Governorate, select.value()));
            }
        })
    };
    let on_notes = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            next.notes = input_value(&e);
            form.set(next);
        })
    };
    let on_file = {
        let (form, file_error) = (form.clone(), file_error.clone());
        Callback::from(move |e: Event| match picked_file(&e) {
            Some(Ok(file)) => {
                log::debug!("prescription {} ({} bytes)", file.name, file.size);
                let mut next = (*form).clone();
                next.prescription = Some(file);
                form.set(next);
                file_error.set(None);
            }
            Some(Err(err)) => file_error.set(Some(Notice::from_error(&err))),
            None => {}
        })
    };
    let remove_file = {
        let form = form.clone();
        Callback::from(move |_| {
            let mut next = (*form).clone();
            next.prescription = None;
            form.set(next);
        })
    };

    let on_submit = {
        let (form, errors, notice, busy, submitted) = (
            form.clone(),
            errors.clone(),
            notice.clone(),
            busy.clone(),
            submitted.clone(),
        );
        let user = p.user.clone();
        let navigate = p.on_navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            if let Err(err) = form.validate() {
                errors.set(err.field_errors().cloned().unwrap_or_default());
                return;
            }
            errors.set(FieldErrors::new());
            notice.set(None);
            busy.set(true);
            let (api, request, user) = (api.clone(), (*form).clone(), user.clone());
            let (errors, notice, busy, submitted, navigate, mounted) = (
                errors.clone(),
                notice.clone(),
                busy.clone(),
                submitted.clone(),
                navigate.clone(),
                mounted.clone(),
            );
            spawn_guarded(
                mounted.clone(),
                async move { api.submit_medicine_request(user.as_ref(), request).await },
                move |result| {
                    busy.set(false);
                    match result {
                        Ok(record) => {
                            submitted.set(Some(record));
                            spawn_guarded(
                                mounted,
                                yew::platform::time::sleep(SUCCESS_PAUSE),
                                move |()| navigate.emit(Route::Home),
                            );
                        }
                        Err(err) => match err.field_errors() {
                            Some(fields) => errors.set(fields.clone()),
                            None => notice.set(Some(Notice::from_error(&err))),
                        },
                    }
                },
            );
        })
    };

    if let Some(record) = (*submitted).clone() {
        return html! {
            <div class="request-page">
                <section class="success-panel" role="status" data-testid="request-success">
                    <p class="success-panel__icon" aria-hidden="true">{"✅"}</p>
                    <h1>{ t("request.success_title") }</h1>
                    <p>{ t("request.success") }</p>
                    <p>{ trv("request.reference", &[("id", record.id.as_str())]) }</p>
                    <p class="success-panel__hint">{ t("request.redirecting") }</p>
                </section>
            </div>
        };
    }

    let governorates = GOVERNORATES.iter().map(|gov| {
        html! {
            <option value={*gov} selected={form.governorate == *gov}>{ *gov }</option>
        }
    });
    let governorate_error = errors.get(Field::Governorate);

    let file_panel = match form.prescription.as_ref() {
        Some(file) => html! {
            <div class="file-chosen" data-testid="file-chosen">
                <span>{"✓ "}{ trv("request.file_chosen", &[("name", file.name.as_str()), ("size", file.size_mb_text().as_str())]) }</span>
                <button type="button" class="btn btn-ghost btn-xs" onclick={remove_file}
                    aria-label={t("request.remove_file")}>{"✕"}</button>
            </div>
        },
        None => html! {
            <label class="file-drop" for="prescription">
                <span aria-hidden="true">{"📄"}</span>
                <span>{ t("request.upload") }</span>
                <small>{ t("request.upload_hint") }</small>
            </label>
        },
    };

    html! {
        <div class="request-page">
            <header>
                <h1>{ t("request.title") }</h1>
                <p>{ t("request.subtitle") }</p>
            </header>
            <NoticeBanner notice={(*notice).clone()} />
            <form onsubmit={on_submit} novalidate={true}>
                <fieldset>
                    <legend>{ t("request.personal") }</legend>
                    <FormField field={Field::FullName} label={t("form.full_name")} value={form.full_name.clone()}
                        error={errors.get(Field::FullName)} placeholder={t("form.full_name_placeholder")}
                        on_input={on_input.clone()} />
                    <FormField field={Field::PhoneNumber} kind="tel" label={t("form.phone")}
                        value={form.phone_number.clone()} error={errors.get(Field::PhoneNumber)}
                        placeholder={t("form.phone_placeholder")} on_input={on_input.clone()} />
                    <FormField field={Field::MedicineName} label={t("form.medicine")}
                        value={form.medicine_name.clone()} error={errors.get(Field::MedicineName)}
                        placeholder={t("form.medicine_placeholder")} on_input={on_input.clone()} />
                    <FormField field={Field::Quantity} label={t("form.quantity")} value={form.quantity.clone()}
                        error={errors.get(Field::Quantity)} placeholder={t("form.quantity_placeholder")}
                        on_input={on_input.clone()} />
                </fieldset>
                <fieldset>
                    <legend>{ t("request.delivery") }</legend>
                    <FormField field={Field::DeliveryAddress} label={t("form.delivery_address")}
                        value={form.delivery_address.clone()} error={errors.get(Field::DeliveryAddress)}
                        placeholder={t("form.delivery_address_placeholder")} multiline={true}
                        on_input={on_input.clone()} />
                    <FormField field={Field::City} label={t("form.city")} value={form.city.clone()}
                        error={errors.get(Field::City)} placeholder={t("form.city_placeholder")}
                        on_input={on_input} />
                    <div class={classes!("form-field", governorate_error.is_some().then_some("form-field--error"))}>
                        <label for="governorate">{ t("form.governorate") }<span aria-hidden="true">{" *"}</span></label>
                        <select id="governorate" name="governorate" onchange={on_governorate}
                            aria-invalid={governorate_error.is_some().to_string()}>
                            <option value="" selected={form.governorate.is_empty()}>{ t("form.governorate_placeholder") }</option>
                            { for governorates }
                        </select>
                        if let Some(key) = governorate_error {
                            <p class="form-field__error" role="alert">{ t(key) }</p>
                        }
                    </div>
                    <div class="form-field">
                        <label for="notes">{ t("form.notes") }</label>
                        <textarea id="notes" name="notes" rows="3" value={form.notes.clone()}
                            oninput={on_notes} placeholder={t("form.notes_placeholder")} />
                    </div>
                </fieldset>
                <fieldset>
                    <legend>{ t("request.prescription") }</legend>
                    <input id="prescription" name="prescription" type="file" class="sr-only"
                        accept=".jpg,.jpeg,.png,.pdf" onchange={on_file} />
                    { file_panel }
                    if let Some(err) = (*file_error).clone() {
                        <p class="form-field__error" role="alert">{ err.text() }</p>
                    }
                </fieldset>
                <button type="submit" class="btn btn-primary btn-block" disabled={*busy} aria-busy={busy.to_string()}>
                    { if *busy { t("request.submitting") } else { t("request.submit") } }
                </button>
            </form>
            <p class="request-page__urgent">
                { t("request.urgent") }{" "}
                <a href={PHARMACY_WHATSAPP} target="_blank" rel="noopener noreferrer">{ PHARMACY_WHATSAPP }</a>
            </p>
        </div>
    }
}
