use crate::app::mounted::{spawn_guarded, use_mount_flag};
use crate::app::routing::landing_route;
use crate::app::state::use_api;
use crate::components::{FormField, Notice, NoticeBanner};
use crate::i18n::{t, use_lang};
use crate::router::Route;
use pharmacy_core::constants::DEMO_PASSWORD;
use pharmacy_core::{Account, Field, FieldErrors, LoginForm, Role};
use yew::prelude::*;
use yew_router::prelude::Link;

const ROLES: [Role; 3] = [Role::Customer, Role::Doctor, Role::Admin];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_signed_in: Callback<Account>,
    pub on_navigate: Callback<Route>,
}

#[function_component(LoginPage)]
pub fn login_page(p: &Props) -> Html {
    let _lang = use_lang();
    let api = use_api();
    let mounted = use_mount_flag();
    let form = use_state(LoginForm::default);
    let errors = use_state(FieldErrors::new);
    let notice = use_state(|| None::<Notice>);
    let busy = use_state(|| false);
    let show_password = use_state(|| false);

    let on_input = {
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |(field, value): (Field, String)| {
            let mut next = (*form).clone();
            match field {
                Field::Email => next.email = value,
                Field::Password => next.password = value,
                _ => return,
            }
            let mut cleared = (*errors).clone();
            cleared.clear(field);
            errors.set(cleared);
            form.set(next);
        })
    };

    let select_role = |role: Role| {
        let form = form.clone();
        Callback::from(move |_| {
            let mut next = (*form).clone();
            next.role = role;
            form.set(next);
        })
    };

    let on_submit = {
        let (form, errors, notice, busy) = (form.clone(), errors.clone(), notice.clone(), busy.clone());
        let (signed_in, navigate) = (p.on_signed_in.clone(), p.on_navigate.clone());
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
            let (errors, notice, busy) = (errors.clone(), notice.clone(), busy.clone());
            let (signed_in, navigate) = (signed_in.clone(), navigate.clone());
            spawn_guarded(
                mounted.clone(),
                async move { api.login(&submitted).await },
                move |result| {
                    busy.set(false);
                    match result {
                        Ok(account) => {
                            log::info!("signed in as {}", account.role());
                            let target = landing_route(&account);
                            signed_in.emit(account);
                            navigate.emit(target);
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

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_| show_password.set(!*show_password))
    };

    let tabs = ROLES.iter().map(|role| {
        let active = form.role == *role;
        html! {
            <button type="button" role="tab" aria-selected={active.to_string()}
                class={classes!("tab", active.then_some("tab-active"))}
                onclick={select_role(*role)}>
                { t(role.label_key()) }
            </button>
        }
    });

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{ t("login.title") }</h1>
                <p>
                    { t("login.or") }{" "}
                    <Link<Route> to={Route::Signup}>{ t("login.create_account") }</Link<Route>>
                </p>
                <NoticeBanner notice={(*notice).clone()} />
                <div role="tablist" aria-label={t("login.role")} class="tabs">{ for tabs }</div>
                <form onsubmit={on_submit} novalidate={true}>
                    <FormField field={Field::Email} kind="email" label={t("form.email")}
                        value={form.email.clone()} error={errors.get(Field::Email)}
                        placeholder={t("form.email_placeholder")} on_input={on_input.clone()} />
                    <FormField field={Field::Password}
                        kind={if *show_password { "text" } else { "password" }}
                        label={t("form.password")} value={form.password.clone()}
                        error={errors.get(Field::Password)}
                        placeholder={t("form.password_placeholder")} on_input={on_input} />
                    <button type="button" class="btn btn-link btn-xs" onclick={toggle_password}>
                        { if *show_password { t("form.hide_password") } else { t("form.show_password") } }
                    </button>
                    <button type="submit" class="btn btn-primary btn-block" disabled={*busy} aria-busy={busy.to_string()}>
                        { if *busy { t("login.submitting") } else { t("login.submit") } }
                    </button>
                </form>
                <aside class="demo-box">
                    <h2>{ t("login.demo_title") }</h2>
                    { for ROLES.iter().map(|role| html! {
                        <p><strong>{ t(role.label_key()) }{": "}</strong>{ format!("{}@example.com / {DEMO_PASSWORD}", role.as_str()) }</p>
                    }) }
                    <p class="demo-box__note">{ t("login.demo_doctor_note") }</p>
                </aside>
            </div>
        </div>
    }
}
