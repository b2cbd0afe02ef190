//! Segmented one-time-code input.
//!
//! Presents `length` single-character cells as one controlled string value.
//! All editing decisions come from `otp_core::segment`; this component only
//! wires DOM events to those transitions and applies the resulting caret
//! moves to its cell handles.

use std::rc::Rc;

use otp_core::segment::{self, Backspace, FocusMove, NavKey};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, FocusEvent, HtmlInputElement, InputEvent, KeyboardEvent, Node};
use yew::prelude::*;

/// Presentation overrides for one cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellConfig {
    pub placeholder: Option<AttrValue>,
    pub class: Classes,
}

/// Per-cell configuration: one uniform config, or a function of the index.
#[derive(Clone)]
pub enum CellProps {
    Uniform(CellConfig),
    PerCell(Rc<dyn Fn(usize) -> CellConfig>),
}

impl CellProps {
    fn resolve(&self, index: usize) -> CellConfig {
        match self {
            CellProps::Uniform(config) => config.clone(),
            CellProps::PerCell(provider) => provider(index),
        }
    }
}

impl Default for CellProps {
    fn default() -> Self {
        CellProps::Uniform(CellConfig::default())
    }
}

impl From<CellConfig> for CellProps {
    fn from(config: CellConfig) -> Self {
        CellProps::Uniform(config)
    }
}

impl PartialEq for CellProps {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellProps::Uniform(a), CellProps::Uniform(b)) => a == b,
            (CellProps::PerCell(a), CellProps::PerCell(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct OtpInputProps {
    /// Current code value; externally controlled and may be reset at any time.
    #[prop_or_default]
    pub value: String,
    #[prop_or(4)]
    pub length: usize,
    #[prop_or_default]
    pub auto_focus: bool,
    /// Per-character predicate; rejected characters are dropped silently.
    #[prop_or_default]
    pub validate_char: Option<Callback<(char, usize), bool>>,
    #[prop_or_default]
    pub on_change: Callback<String>,
    /// Fired when and only when an edit freshly reaches completion.
    #[prop_or_default]
    pub on_complete: Callback<String>,
    /// Fired when focus leaves the widget: (final_value, is_complete).
    #[prop_or_default]
    pub on_blur: Callback<(String, bool)>,
    #[prop_or_default]
    pub cell_props: CellProps,
    #[prop_or_default]
    pub class: Classes,
}

fn check_char(validate: &Option<Callback<(char, usize), bool>>, c: char, i: usize) -> bool {
    validate.as_ref().map_or(true, |cb| cb.emit((c, i)))
}

#[function_component(OtpInput)]
pub fn otp_input(props: &OtpInputProps) -> Html {
    let length = props.length.max(1);

    // index-addressed cell handles, recreated only when the length changes
    let cell_refs = use_memo(length, |len| {
        (0..*len).map(|_| NodeRef::default()).collect::<Vec<NodeRef>>()
    });

    // a prefilled complete value reports completion once on mount
    {
        let on_complete = props.on_complete.clone();
        let initial = props.value.clone();
        use_effect_with(length, move |len| {
            if let Some(final_value) = segment::completion(&initial, *len) {
                on_complete.emit(final_value);
            }
            || ()
        });
    }

    let apply_focus = {
        let cell_refs = cell_refs.clone();
        Rc::new(move |focus: Option<FocusMove>| {
            let Some(focus) = focus else { return };
            if let Some(input) = cell_refs
                .get(focus.index())
                .and_then(NodeRef::cast::<HtmlInputElement>)
            {
                let _ = input.focus();
                if matches!(focus, FocusMove::Select(_)) {
                    input.select();
                }
            }
        })
    };

    let on_cell_input = |index: usize| {
        let value = props.value.clone();
        let validate_char = props.validate_char.clone();
        let on_change = props.on_change.clone();
        let on_complete = props.on_complete.clone();
        let apply_focus = apply_focus.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let edit = segment::insert(&value, length, index, &input.value(), |c, i| {
                check_char(&validate_char, c, i)
            });

            // the vdom diff will not reset the element when the rendered
            // character is unchanged, so clear rejected input here
            let character = segment::cell(&edit.value, index)
                .map(String::from)
                .unwrap_or_default();
            input.set_value(&character);

            on_change.emit(edit.value.clone());
            if let Some(final_value) = edit.completed {
                on_complete.emit(final_value);
            }
            apply_focus(edit.focus);
        })
    };

    let on_cell_keydown = |index: usize| {
        let value = props.value.clone();
        let on_change = props.on_change.clone();
        let apply_focus = apply_focus.clone();
        Callback::from(move |e: KeyboardEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let key = e.key();

            // re-typing the cell's character is a pure caret advance
            if !input.value().is_empty() && input.value() == key {
                e.prevent_default();
                apply_focus(segment::advance(&value, index, length));
                return;
            }

            match key.as_str() {
                "Backspace" => {
                    let caret_at_start = input.selection_start().ok().flatten() == Some(0)
                        && input.selection_end().ok().flatten() == Some(0);
                    match segment::backspace(&value, length, index, caret_at_start) {
                        Backspace::MoveBack { focus } => {
                            e.prevent_default();
                            apply_focus(focus);
                        }
                        Backspace::Clear {
                            value: new_value,
                            focus,
                        } => {
                            e.prevent_default();
                            on_change.emit(new_value);
                            apply_focus(focus);
                        }
                        Backspace::Native => {}
                    }
                }
                "ArrowLeft" => {
                    e.prevent_default();
                    apply_focus(segment::navigate(NavKey::Left, index, length));
                }
                "ArrowRight" => {
                    e.prevent_default();
                    apply_focus(segment::navigate(NavKey::Right, index, length));
                }
                "Home" => {
                    e.prevent_default();
                    apply_focus(segment::navigate(NavKey::Home, index, length));
                }
                "End" => {
                    e.prevent_default();
                    apply_focus(segment::navigate(NavKey::End, index, length));
                }
                _ => {}
            }
        })
    };

    let on_cell_paste = |index: usize| {
        let value = props.value.clone();
        let validate_char = props.validate_char.clone();
        let on_change = props.on_change.clone();
        let on_complete = props.on_complete.clone();
        let apply_focus = apply_focus.clone();
        Callback::from(move |e: Event| {
            e.prevent_default();
            let Some(clipboard) = e
                .dyn_ref::<ClipboardEvent>()
                .and_then(|e| e.clipboard_data())
            else {
                return;
            };
            let pasted = clipboard.get_data("text/plain").unwrap_or_default();

            let edit = segment::paste(&value, length, index, &pasted, |c, i| {
                check_char(&validate_char, c, i)
            });
            on_change.emit(edit.value.clone());
            if let Some(final_value) = edit.completed {
                on_complete.emit(final_value);
            }
            apply_focus(edit.focus);
        })
    };

    let on_cell_focus = Callback::from(|e: FocusEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.select();
    });

    let on_cell_blur = {
        let value = props.value.clone();
        let on_blur = props.on_blur.clone();
        let cell_refs = cell_refs.clone();
        Callback::from(move |e: FocusEvent| {
            let related = e.related_target();
            let still_inside = related.as_ref().map_or(false, |target| {
                cell_refs.iter().any(|cell| {
                    cell.get()
                        .map_or(false, |node| target.dyn_ref::<Node>() == Some(&node))
                })
            });

            if !still_inside {
                let (final_value, is_complete) = segment::blur(&value, length);
                on_blur.emit((final_value, is_complete));
            }
        })
    };

    html! {
        <div class={classes!("otp-input", props.class.clone())}>
            { for (0..length).map(|index| {
                let config = props.cell_props.resolve(index);
                let character = segment::cell(&props.value, index)
                    .map(String::from)
                    .unwrap_or_default();

                html! {
                    <input
                        key={format!("otp-{}", index)}
                        ref={cell_refs[index].clone()}
                        type="text"
                        class={classes!("otp-input-cell", config.class)}
                        value={character}
                        placeholder={config.placeholder}
                        autocomplete="one-time-code"
                        autofocus={props.auto_focus && index == 0}
                        oninput={on_cell_input(index)}
                        onkeydown={on_cell_keydown(index)}
                        onpaste={on_cell_paste(index)}
                        onfocus={on_cell_focus.clone()}
                        onblur={on_cell_blur.clone()}
                    />
                }
            })}
        </div>
    }
}
