//! Modal dialog shared by every page.
//!
//! The [`DialogType`] decides the action row: a form dialog wraps its children
//! in a `<form>` and submits through `on_confirm`, a confirmation dialog asks
//! before `on_confirm` runs, and a blank dialog only closes.

use crate::components::styled_button::StyledButton;
use common::ui::{DialogType, StyleType};
use yew::{html, Callback, Component, Context, Html, MouseEvent, Properties, SubmitEvent};

#[derive(Properties, PartialEq)]
pub struct DialogProps {
    pub dialog_type: DialogType,
    pub title: String,
    pub open: bool,
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub confirm_label: Option<String>,
    #[prop_or_default]
    pub on_confirm: Callback<()>,
    #[prop_or_default]
    pub on_close: Callback<()>,
}

pub struct Dialog;

impl Component for Dialog {
    type Message = ();
    type Properties = DialogProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Dialog
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        if !props.open {
            return html! {};
        }

        let close = {
            let on_close = props.on_close.clone();
            Callback::from(move |_: MouseEvent| on_close.emit(()))
        };
        let dialog_type = props.dialog_type;
        let dismiss_label = if dialog_type.has_submit() || dialog_type.has_confirm() {
            "Cancel"
        } else {
            "Close"
        };
        let default_confirm = if dialog_type.has_submit() { "Save" } else { "Confirm" };
        let confirm_label = props
            .confirm_label
            .clone()
            .unwrap_or_else(|| default_confirm.to_string());
        let primary = if dialog_type.has_submit() {
            html! {
                <StyledButton label={confirm_label} style={dialog_type.primary_style()} submit=true />
            }
        } else if dialog_type.has_confirm() {
            let on_confirm = props.on_confirm.clone();
            html! {
                <StyledButton
                    label={confirm_label}
                    style={dialog_type.primary_style()}
                    onclick={Callback::from(move |_: MouseEvent| on_confirm.emit(()))}
                />
            }
        } else {
            html! {}
        };
        let actions = html! {
            <div class="dialog-actions">
                <StyledButton label={dismiss_label} style={StyleType::Normal} onclick={close.clone()} />
                { primary }
            </div>
        };

        let body = if dialog_type.has_submit() {
            let on_confirm = props.on_confirm.clone();
            let onsubmit = Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                on_confirm.emit(());
            });
            html! {
                <form class="dialog-form" {onsubmit}>
                    { props.children.clone() }
                    { actions }
                </form>
            }
        } else {
            html! {
                <>
                    <div class="dialog-content">{ props.children.clone() }</div>
                    { actions }
                </>
            }
        };

        html! {
            <div class="dialog-backdrop">
                <div class="dialog">
                    <div class="dialog-header">
                        <h2>{ props.title.clone() }</h2>
                        <button class="icon-btn" title="Close" onclick={close}>
                            <i class="material-icons">{"close"}</i>
                        </button>
                    </div>
                    { body }
                </div>
            </div>
        }
    }
}
