use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TextInputProps {
    pub label: AttrValue,
    #[prop_or(AttrValue::from("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub value: String,
    /// Validation message shown under the field.
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub on_input: Callback<String>,
}

#[function_component(TextInput)]
pub fn text_input(props: &TextInputProps) -> Html {
    let on_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };

    html! {
        <div class={classes!("form-field", props.error.is_some().then_some("form-field-error"))}>
            <label class="form-label">{ &props.label }</label>
            <input
                type={props.input_type.clone()}
                class="form-input"
                placeholder={props.placeholder.clone()}
                value={props.value.clone()}
                oninput={on_input}
            />
            if let Some(message) = &props.error {
                <div class="form-helper-text">{ message }</div>
            }
        </div>
    }
}
