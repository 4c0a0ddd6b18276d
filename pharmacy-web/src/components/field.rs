use crate::i18n::t;
use pharmacy_core::Field;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub field: Field,
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_input: Callback<(Field, String)>,
    #[prop_or(AttrValue::Static("text"))]
    pub kind: AttrValue,
    /// Translation key of the inline error.
    #[prop_or_default]
    pub error: Option<&'static str>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub multiline: bool,
    #[prop_or(true)]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

/// Read the current value of an input or textarea event target.
pub fn input_value(e: &InputEvent) -> String {
    let Some(target) = e.target() else {
        return String::new();
    };
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return input.value();
    }
    target
        .dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(web_sys::HtmlTextAreaElement::value)
        .unwrap_or_default()
}

/// Labelled input with its validation message underneath.
#[function_component(FormField)]
pub fn form_field(p: &Props) -> Html {
    let id = p.field.as_str();
    let error_id = format!("{id}-error");
    let oninput = {
        let cb = p.on_input.clone();
        let field = p.field;
        Callback::from(move |e: InputEvent| cb.emit((field, input_value(&e))))
    };
    let invalid = p.error.is_some();
    let described = invalid.then(|| error_id.clone());

    let control = if p.multiline {
        html! {
            <textarea id={id} name={id} value={p.value.clone()} oninput={oninput}
                rows="3" placeholder={p.placeholder.clone()} required={p.required}
                disabled={p.disabled} aria-invalid={invalid.to_string()}
                aria-describedby={described.clone()} />
        }
    } else {
        html! {
            <input id={id} name={id} type={p.kind.clone()} value={p.value.clone()} oninput={oninput}
                placeholder={p.placeholder.clone()} required={p.required}
                disabled={p.disabled} aria-invalid={invalid.to_string()}
                aria-describedby={described} />
        }
    };

    html! {
        <div class={classes!("form-field", invalid.then_some("form-field--error"))}>
            <label for={id}>
                { p.label.clone() }
                if p.required { <span aria-hidden="true">{" *"}</span> }
            </label>
            { control }
            if let Some(key) = p.error {
                <p id={error_id} class="form-field__error" role="alert">{ t(key) }</p>
            }
        </div>
    }
}
