//! DOM side of form submission: reading controls and re-triggering submit.

use contracts::system::forms::{FormControl, FormSubmission};
use wasm_bindgen::JsCast;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// Snapshot every named, enabled control of `form`.
pub fn collect_submission(form: &HtmlFormElement) -> FormSubmission {
    let elements = form.elements();
    let controls = (0..elements.length())
        .filter_map(|i| elements.item(i))
        .filter_map(|element| {
            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                input_control(
                    &input.type_(),
                    input.name(),
                    input.value(),
                    input.disabled(),
                    input.checked(),
                )
            } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
                Some(FormControl {
                    name: select.name(),
                    value: select.value(),
                    disabled: select.disabled(),
                })
            } else {
                element
                    .dyn_ref::<HtmlTextAreaElement>()
                    .map(|textarea| FormControl {
                        name: textarea.name(),
                        value: textarea.value(),
                        disabled: textarea.disabled(),
                    })
            }
        });
    FormSubmission::from_controls(controls)
}

/// Map an `<input>` to a control, or `None` if the browser would not submit
/// it as form data (buttons, files, unchecked boxes).
pub fn input_control(
    input_type: &str,
    name: String,
    value: String,
    disabled: bool,
    checked: bool,
) -> Option<FormControl> {
    match input_type.to_ascii_lowercase().as_str() {
        "submit" | "button" | "reset" | "image" | "file" => None,
        "checkbox" | "radio" if !checked => None,
        _ => Some(FormControl {
            name,
            value,
            disabled,
        }),
    }
}

/// Whether a keydown in a field should submit the field's form.
///
/// Only fields listed in `submit_on_enter` react. Enter during IME
/// composition only confirms the composed text.
pub fn should_submit_on_key(enter_submits: bool, key: &str, is_composing: bool) -> bool {
    enter_submits && key == "Enter" && !is_composing
}

/// Fire the form's submit event the same way the submit button does.
pub fn request_submit(form: &HtmlFormElement) {
    if let Err(e) = form.request_submit() {
        log::error!("requestSubmit failed on #{}: {:?}", form.id(), e);
    }
}
