//! Success and error banners shown after an action.
use crate::i18n::trv;
use pharmacy_core::PharmacyError;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Info,
}

impl Tone {
    const fn class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Error => "alert alert-error",
            Self::Info => "alert alert-info",
        }
    }
}

/// A translation key plus its arguments, rendered in the active language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub key: &'static str,
    pub args: Vec<(&'static str, String)>,
}

impl Notice {
    #[must_use]
    pub const fn success(key: &'static str) -> Self {
        Self {
            tone: Tone::Success,
            key,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub const fn error(key: &'static str) -> Self {
        Self {
            tone: Tone::Error,
            key,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_error(err: &PharmacyError) -> Self {
        match err {
            PharmacyError::ResendTooEarly { remaining_secs } => {
                Self::error(err.message_key()).with("seconds", remaining_secs.to_string())
            }
            _ => Self::error(err.message_key()),
        }
    }

    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.args.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn text(&self) -> String {
        let args: Vec<(&str, &str)> = self
            .args
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        trv(self.key, &args)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub notice: Option<Notice>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(props: &Props) -> Html {
    let _lang = crate::i18n::use_lang();
    let Some(notice) = props.notice.as_ref() else {
        return Html::default();
    };
    let role = if notice.tone == Tone::Error {
        "alert"
    } else {
        "status"
    };
    let dismiss = props.on_dismiss.clone().map(|cb| {
        html! {
            <button type="button" class="btn btn-ghost btn-xs" aria-label={crate::i18n::t("ui.dismiss")}
                onclick={Callback::from(move |_| cb.emit(()))}>{"×"}</button>
        }
    });
    html! {
        <div class={notice.tone.class()} role={role} data-testid="notice">
            <span>{ notice.text() }</span>
            { dismiss.unwrap_or_default() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_their_translation_keys() {
        let notice = Notice::from_error(&PharmacyError::EmptyCart);
        assert_eq!(notice.tone, Tone::Error);
        assert_eq!(notice.key, "errors.cart_empty");
        let wait = Notice::from_error(&PharmacyError::ResendTooEarly { remaining_secs: 42 });
        assert_eq!(wait.args, vec![("seconds", "42".to_string())]);
    }
}
