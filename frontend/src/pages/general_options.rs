use super::{request, runtime_config};
use crate::components::styled_button::StyledButton;
use crate::components::toast::show_toast;
use crate::fetch::{base_url_fetch, FetchHandle, FetchResult};
use common::config::RuntimeConfig;
use common::fetch::{FetchOptions, Method};
use common::model::general_option::GeneralOption;
use common::ui::StyleType;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const PATH: &str = "data/options";

pub enum Msg {
    Loaded(FetchResult<Vec<GeneralOption>>),
    Edit(usize, String),
    Save,
    Saved(Result<(), String>),
}

/// Service-wide key/value settings, edited in place and saved together.
pub struct GeneralOptionsPage {
    config: RuntimeConfig,
    list: FetchHandle<Vec<GeneralOption>>,
    options: Vec<GeneralOption>,
    dirty: bool,
    saving: bool,
    error: Option<String>,
}

impl Component for GeneralOptionsPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = runtime_config(ctx.link());
        let list = base_url_fetch(&config, PATH, FetchOptions::new(), ctx.link().callback(Msg::Loaded));
        Self {
            config,
            list,
            options: Vec::new(),
            dirty: false,
            saving: false,
            error: None,
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.list.execute();
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(options)) => {
                self.options = options;
                self.dirty = false;
                self.error = None;
                true
            }
            Msg::Loaded(Err(e)) => {
                self.error = Some(e.to_string());
                true
            }
            Msg::Edit(index, value) => {
                if let Some(option) = self.options.get_mut(index) {
                    option.value = value;
                    self.dirty = true;
                }
                true
            }
            Msg::Save => {
                if self.saving {
                    return false;
                }
                self.saving = true;
                let config = self.config.clone();
                let options = self.options.clone();
                ctx.link().send_future(async move {
                    let result = async {
                        let opts = FetchOptions::new()
                            .method(Method::Put)
                            .json(&options)
                            .map_err(|e| e.to_string())?;
                        request(&config, PATH, opts).await.map(|_| ())
                    }
                    .await;
                    Msg::Saved(result)
                });
                true
            }
            Msg::Saved(result) => {
                self.saving = false;
                match result {
                    Ok(()) => {
                        show_toast("General options updated", StyleType::Success);
                        self.list.execute();
                    }
                    Err(e) => show_toast(&format!("Error: {}", e), StyleType::Danger),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        if let Some(error) = &self.error {
            return html! {
                <section class="page">
                    <h1>{"General options"}</h1>
                    <p class={StyleType::Danger.css_class()}>{ format!("Could not load options: {}", error) }</p>
                </section>
            };
        }

        let fields = self.options.iter().enumerate().map(|(index, option)| {
            let oninput = link.callback(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                Msg::Edit(index, input.value())
            });
            html! {
                <label key={option.key.clone()}>
                    { option.key.replace('_', " ") }
                    <input value={option.value.clone()} {oninput} />
                </label>
            }
        });

        let save_label = if self.saving { "Saving..." } else { "Save" };
        let save_style = if self.dirty { StyleType::Success } else { StyleType::Normal };

        html! {
            <section class="page">
                <header class="page-header">
                    <h1>{"General options"}</h1>
                    <StyledButton
                        label={save_label.to_string()}
                        icon={"save".to_string()}
                        style={save_style}
                        onclick={link.callback(|_| Msg::Save)}
                    />
                </header>
                <div class="options-form">{ for fields }</div>
            </section>
        }
    }
}
