use crate::app::mounted::{spawn_guarded, use_mount_flag};
use crate::app::routing::{otp_entry_redirect, verified_route};
use crate::app::state::use_api;
use crate::components::{Notice, NoticeBanner};
use crate::i18n::{t, trv, use_lang};
use crate::router::Route;
use pharmacy_core::{Account, OtpCountdown, VerifyOutcome, otp};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_signed_in: Callback<Account>,
    pub on_navigate: Callback<Route>,
    pub on_flash: Callback<Notice>,
}

pub enum Tick {
    Second,
    Reset,
}

/// Resend countdown driven by a one-second timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown(pub OtpCountdown);

impl Reducible for Countdown {
    type Action = Tick;

    fn reduce(self: Rc<Self>, action: Tick) -> Rc<Self> {
        match action {
            Tick::Second if self.0.can_resend() => self,
            Tick::Second => Rc::new(Self(self.0.tick())),
            Tick::Reset => Rc::new(Self(OtpCountdown::new())),
        }
    }
}

/// Notice shown after a successful verification.
fn outcome_notice(outcome: &VerifyOutcome) -> Notice {
    match outcome {
        VerifyOutcome::LoggedIn(_) => Notice::success("otp.welcome"),
        VerifyOutcome::AwaitingApproval(_) => Notice::success("otp.awaiting_approval"),
    }
}

#[function_component(VerifyOtpPage)]
pub fn verify_otp_page(p: &Props) -> Html {
    let _lang = use_lang();
    let api = use_api();
    let mounted = use_mount_flag();
    let email = use_state(|| None::<String>);
    let code = use_state(String::new);
    let error = use_state(|| None::<Notice>);
    let info = use_state(|| None::<Notice>);
    let busy = use_state(|| false);
    let countdown = use_reducer(Countdown::default);

    {
        let (api, email, navigate, mounted) =
            (api.clone(), email.clone(), p.on_navigate.clone(), mounted.clone());
        use_effect_with((), move |()| {
            spawn_guarded(
                mounted,
                async move { api.signup_email().await },
                move |result| {
                    let found = result.unwrap_or_else(|err| {
                        log::warn!("could not read the pending signup: {err}");
                        None
                    });
                    match otp_entry_redirect(found.as_deref()) {
                        Some(route) => navigate.emit(route),
                        None => email.set(found),
                    }
                },
            );
        });
    }

    {
        let countdown = countdown.dispatcher();
        let mounted = mounted.clone();
        use_effect_with((), move |()| {
            yew::platform::spawn_local(async move {
                while mounted.is_mounted() {
                    yew::platform::time::sleep(Duration::from_secs(1)).await;
                    if mounted.is_mounted() {
                        countdown.dispatch(Tick::Second);
                    }
                }
            });
        });
    }

    let on_input = {
        let (code, error) = (code.clone(), error.clone());
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                let digits = otp::sanitize_input(&input.value());
                input.set_value(&digits);
                code.set(digits);
                error.set(None);
            }
        })
    };

    let on_submit = {
        let (api, code, error, busy, mounted) =
            (api.clone(), code.clone(), error.clone(), busy.clone(), mounted.clone());
        let (signed_in, navigate, flash) =
            (p.on_signed_in.clone(), p.on_navigate.clone(), p.on_flash.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            if let Err(err) = otp::check_length(&code) {
                error.set(Some(Notice::from_error(&err)));
                return;
            }
            busy.set(true);
            let entered = (*code).clone();
            let api = api.clone();
            let (error, busy) = (error.clone(), busy.clone());
            let (signed_in, navigate, flash) = (signed_in.clone(), navigate.clone(), flash.clone());
            spawn_guarded(
                mounted.clone(),
                async move { api.verify_otp(&entered).await },
                move |result| {
                    busy.set(false);
                    match result {
                        Ok(outcome) => {
                            flash.emit(outcome_notice(&outcome));
                            let target = verified_route(&outcome);
                            if let VerifyOutcome::LoggedIn(account) = outcome {
                                signed_in.emit(account);
                            }
                            navigate.emit(target);
                        }
                        Err(err) => {
                            log::debug!("verification rejected: {err}");
                            error.set(Some(Notice::from_error(&err)));
                        }
                    }
                },
            );
        })
    };

    let on_resend = {
        let (api, error, info, mounted) = (api, error.clone(), info.clone(), mounted);
        let countdown = countdown.clone();
        Callback::from(move |_| {
            if let Err(err) = countdown.0.ensure_resend() {
                error.set(Some(Notice::from_error(&err)));
                return;
            }
            let api = api.clone();
            let (error, info, countdown) = (error.clone(), info.clone(), countdown.dispatcher());
            spawn_guarded(
                mounted.clone(),
                async move { api.resend_otp().await },
                move |result| match result {
                    Ok(()) => {
                        countdown.dispatch(Tick::Reset);
                        error.set(None);
                        info.set(Some(Notice::success("otp.resent")));
                    }
                    Err(err) => error.set(Some(Notice::from_error(&err))),
                },
            );
        })
    };

    let Some(address) = (*email).clone() else {
        return html! {
            <div class="auth-page" role="status"><p>{ t("ui.loading") }</p></div>
        };
    };

    let remaining = countdown.0;
    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{"📧 "}{ t("otp.title") }</h1>
                <p>{ trv("otp.sent_to", &[("email", address.as_str())]) }</p>
                <NoticeBanner notice={(*info).clone()} />
                <form onsubmit={on_submit}>
                    <label for="otp">{ t("otp.label") }</label>
                    <input id="otp" name="otp" class="otp-input" inputmode="numeric"
                        autocomplete="one-time-code" maxlength="6" placeholder="000000"
                        value={(*code).clone()} oninput={on_input}
                        aria-invalid={error.is_some().to_string()} />
                    if let Some(notice) = (*error).clone() {
                        <p class="form-field__error" role="alert">{ notice.text() }</p>
                    }
                    if remaining.can_resend() {
                        <button type="button" class="btn btn-link" onclick={on_resend}>{ t("otp.resend") }</button>
                    } else {
                        <p class="otp-timer" data-testid="otp-timer">
                            { trv("otp.resend_in", &[("time", remaining.format().as_str())]) }
                        </p>
                    }
                    <button type="submit" class="btn btn-primary btn-block"
                        disabled={*busy || code.len() != pharmacy_core::constants::OTP_LEN}>
                        { if *busy { t("otp.verifying") } else { t("otp.verify") } }
                    </button>
                </form>
                <Link<Route> to={Route::Signup}>{ t("otp.back") }</Link<Route>>
                <p class="otp-hint">{ t("otp.testing_hint") }</p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_stops_at_zero_and_resets() {
        let mut state = Rc::new(Countdown::default());
        assert_eq!(state.0.format(), "5:00");
        state = state.reduce(Tick::Second);
        assert_eq!(state.0.format(), "4:59");
        for _ in 0..400 {
            state = state.reduce(Tick::Second);
        }
        assert!(state.0.can_resend());
        state = state.reduce(Tick::Reset);
        assert_eq!(state.0.remaining(), 300);
    }

    #[test]
    fn doctors_are_told_to_wait() {
        let request = pharmacy_core::DoctorRequest {
            id: "r1".into(),
            name: "Dr. Salma".into(),
            email: "salma@example.com".into(),
            phone: "01011112222".into(),
            address: String::new(),
            license_number: "EG-9".into(),
            status: pharmacy_core::DoctorStatus::Pending,
            request_date: chrono::Utc::now(),
        };
        let notice = outcome_notice(&VerifyOutcome::AwaitingApproval(request));
        assert_eq!(notice.key, "otp.awaiting_approval");
    }
}
