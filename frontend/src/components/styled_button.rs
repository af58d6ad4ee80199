use common::ui::StyleType;
use yew::{classes, html, Callback, Component, Context, Html, MouseEvent, Properties};

#[derive(Properties, PartialEq)]
pub struct StyledButtonProps {
    pub label: String,
    #[prop_or_default]
    pub style: StyleType,
    /// Material icon name shown before the label.
    #[prop_or_default]
    pub icon: Option<String>,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub submit: bool,
}

/// A button whose colors follow its [`StyleType`].
pub struct StyledButton;

impl Component for StyledButton {
    type Message = ();
    type Properties = StyledButtonProps;

    fn create(_ctx: &Context<Self>) -> Self {
        StyledButton
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let button_type = if props.submit { "submit" } else { "button" };
        html! {
            <button
                type={button_type}
                class={classes!("btn", props.style.css_class())}
                onclick={props.onclick.clone()}
            >
                if let Some(icon) = &props.icon {
                    <i class="material-icons">{ icon.clone() }</i>
                }
                <span class="btn-label">{ props.label.clone() }</span>
            </button>
        }
    }
}
