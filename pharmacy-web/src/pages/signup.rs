use crate::app::mounted::{spawn_guarded, use_mount_flag};
use crate::app::state::use_api;
use crate::components::{FormField, Notice, NoticeBanner};
use crate::i18n::{t, use_lang};
use crate::router::Route;
use pharmacy_core::{Field, FieldErrors, Role, SignupForm};
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_navigate: Callback<Route>,
}

/// Copy an edited field into the form. Returns `false` for fields the
/// signup form does not carry.
fn apply_input(form: &mut SignupForm, field: Field, value: String) -> bool {
    let slot = match field {
        Field::Name => &mut form.name,
        Field::Email => &mut form.email,
        Field::Phone => &mut form.phone,
        Field::Password => &mut form.password,
        Field::ConfirmPassword => &mut form.confirm_password,
        Field::Address => &mut form.address,
        Field::LicenseNumber => &mut form.license_number,
        _ => return false,
    };
    *slot = value;
    true
}

#[function_component(SignupPage)]
pub fn signup_page(p: &Props) -> Html {
    let _lang = use_lang();
    let api = use_api();
    let mounted = use_mount_flag();
    let form = use_state(SignupForm::default);
    let errors = use_state(FieldErrors::new);
    let notice = use_state(|| None::<Notice>);
    let busy = use_state(|| false);

    let on_input = {
        let form = form.clone();
        let errors = errors.clone();
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

    let select_role = |role: Role| {
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |_| {
            let mut next = (*form).clone();
            next.role = role;
            if role != Role::Doctor {
                next.license_number.clear();
                let mut cleared = (*errors).clone();
                cleared.clear(Field::LicenseNumber);
                errors.set(cleared);
            }
            form.set(next);
        })
    };

    let on_submit = {
        let (form, errors, notice, busy) = (form.clone(), errors.clone(), notice.clone(), busy.clone());
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
            let submitted = (*form).clone();
            let api = api.clone();
            let (errors, notice, busy, navigate) =
                (errors.clone(), notice.clone(), busy.clone(), navigate.clone());
            spawn_guarded(
                mounted.clone(),
                async move { api.start_signup(&submitted).await },
                move |result| {
                    busy.set(false);
                    match result {
                        Ok(outcome) => {
                            log::info!("verification code sent to {}", outcome.email);
                            navigate.emit(Route::VerifyOtp);
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

    let is_doctor = form.role == Role::Doctor;
    let role_option = |role: Role| {
        let active = form.role == role;
        html! {
            <label class={classes!("role-option", active.then_some("role-option--active"))}>
                <input type="radio" name="role" value={role.as_str()} checked={active}
                    onchange={select_role(role)} />
                <span>{ t(role.label_key()) }</span>
            </label>
        }
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{ t("signup.title") }</h1>
                <p>
                    { t("login.or") }{" "}
                    <Link<Route> to={Route::Login}>{ t("signup.have_account") }</Link<Route>>
                </p>
                <NoticeBanner notice={(*notice).clone()} />
                <form onsubmit={on_submit} novalidate={true}>
                    <fieldset class="role-select">
                        <legend>{ t("signup.role") }</legend>
                        { role_option(Role::Customer) }
                        { role_option(Role::Doctor) }
                    </fieldset>
                    <FormField field={Field::Name} label={t("form.full_name")} value={form.name.clone()}
                        error={errors.get(Field::Name)} placeholder={t("form.full_name_placeholder")}
                        on_input={on_input.clone()} />
                    <FormField field={Field::Email} kind="email" label={t("form.email")} value={form.email.clone()}
                        error={errors.get(Field::Email)} placeholder={t("form.email_placeholder")}
                        on_input={on_input.clone()} />
                    <FormField field={Field::Phone} kind="tel" label={t("form.phone")} value={form.phone.clone()}
                        error={errors.get(Field::Phone)} placeholder={t("form.phone_placeholder")}
                        on_input={on_input.clone()} />
                    if is_doctor {
                        <FormField field={Field::LicenseNumber} label={t("form.license")}
                            value={form.license_number.clone()} error={errors.get(Field::LicenseNumber)}
                            placeholder={t("form.license_placeholder")} on_input={on_input.clone()} />
                    }
                    <FormField field={Field::Address} label={t("form.address")} value={form.address.clone()}
                        multiline={true} required={false} placeholder={t("form.address_placeholder")}
                        on_input={on_input.clone()} />
                    <FormField field={Field::Password} kind="password" label={t("form.password")}
                        value={form.password.clone()} error={errors.get(Field::Password)}
                        placeholder={t("form.password_placeholder")} on_input={on_input.clone()} />
                    <FormField field={Field::ConfirmPassword} kind="password" label={t("form.confirm_password")}
                        value={form.confirm_password.clone()} error={errors.get(Field::ConfirmPassword)}
                        placeholder={t("form.confirm_password_placeholder")} on_input={on_input} />
                    <button type="submit" class="btn btn-primary btn-block" disabled={*busy} aria-busy={busy.to_string()}>
                        { if *busy { t("signup.submitting") } else { t("signup.submit") } }
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_land_in_their_form_slot() {
        let mut form = SignupForm::default();
        assert!(apply_input(&mut form, Field::LicenseNumber, "EG-1".into()));
        assert!(apply_input(&mut form, Field::ConfirmPassword, "secret1".into()));
        assert_eq!(form.license_number, "EG-1");
        assert_eq!(form.confirm_password, "secret1");
        assert!(!apply_input(&mut form, Field::City, "Cairo".into()));
    }
}
