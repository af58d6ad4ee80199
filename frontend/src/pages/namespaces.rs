use super::{request, runtime_config};
use crate::components::dialog::Dialog;
use crate::components::form::{field_value, reset};
use crate::components::styled_button::StyledButton;
use crate::components::toast::show_toast;
use crate::fetch::{base_url_fetch, FetchHandle, FetchResult};
use common::config::RuntimeConfig;
use common::fetch::{FetchOptions, Method};
use common::model::namespace::Namespace;
use common::ui::{DialogType, StyleType};
use uuid::Uuid;
use yew::prelude::*;

const PATH: &str = "data/namespaces";

pub enum Msg {
    Loaded(FetchResult<Vec<Namespace>>),
    OpenCreate,
    AskDelete(Namespace),
    CloseDialog,
    Submit,
    ConfirmDelete,
    Saved(Result<(), String>),
}

pub struct NamespacesPage {
    config: RuntimeConfig,
    list: FetchHandle<Vec<Namespace>>,
    namespaces: Option<Vec<Namespace>>,
    error: Option<String>,
    dialog: Option<DialogType>,
    pending_delete: Option<Namespace>,
    name_ref: NodeRef,
    url_ref: NodeRef,
}

impl Component for NamespacesPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = runtime_config(ctx.link());
        let list = base_url_fetch(&config, PATH, FetchOptions::new(), ctx.link().callback(Msg::Loaded));
        Self {
            config,
            list,
            namespaces: None,
            error: None,
            dialog: None,
            pending_delete: None,
            name_ref: NodeRef::default(),
            url_ref: NodeRef::default(),
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.list.execute();
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(namespaces)) => {
                self.namespaces = Some(namespaces);
                self.error = None;
                true
            }
            Msg::Loaded(Err(e)) => {
                self.error = Some(e.to_string());
                true
            }
            Msg::OpenCreate => {
                self.dialog = Some(DialogType::Form);
                true
            }
            Msg::AskDelete(namespace) => {
                self.pending_delete = Some(namespace);
                self.dialog = Some(DialogType::Confirmation);
                true
            }
            Msg::CloseDialog => {
                self.dialog = None;
                self.pending_delete = None;
                true
            }
            Msg::Submit => {
                let namespace = Namespace {
                    uuid: Uuid::nil(),
                    name: field_value(&self.name_ref),
                    url: field_value(&self.url_ref),
                };
                if namespace.name.is_empty() {
                    show_toast("A namespace needs a name", StyleType::Warning);
                    return false;
                }
                let config = self.config.clone();
                ctx.link().send_future(async move {
                    let result = async {
                        let opts = FetchOptions::new()
                            .method(Method::Post)
                            .json(&namespace)
                            .map_err(|e| e.to_string())?;
                        request(&config, PATH, opts).await.map(|_| ())
                    }
                    .await;
                    Msg::Saved(result)
                });
                false
            }
            Msg::ConfirmDelete => {
                let Some(namespace) = self.pending_delete.take() else {
                    return false;
                };
                let config = self.config.clone();
                ctx.link().send_future(async move {
                    let path = format!("{}/{}", PATH, namespace.uuid);
                    let opts = FetchOptions::new().method(Method::Delete);
                    Msg::Saved(request(&config, &path, opts).await.map(|_| ()))
                });
                false
            }
            Msg::Saved(result) => {
                match result {
                    Ok(()) => {
                        show_toast("Namespaces updated", StyleType::Success);
                        reset(&self.name_ref);
                        reset(&self.url_ref);
                        self.dialog = None;
                        self.list.execute();
                    }
                    Err(e) => {
                        show_toast(&format!("Error: {}", e), StyleType::Danger);
                        if self.dialog == Some(DialogType::Confirmation) {
                            self.dialog = None;
                        }
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let content = match (&self.namespaces, &self.error) {
            (_, Some(error)) => html! {
                <p class={StyleType::Danger.css_class()}>{ format!("Could not load namespaces: {}", error) }</p>
            },
            (None, None) => html! { <p class="muted">{"Loading namespaces..."}</p> },
            (Some(namespaces), None) if namespaces.is_empty() => {
                html! { <p class="muted">{"No namespaces defined yet."}</p> }
            }
            (Some(namespaces), None) => html! {
                <ul class="card-list">
                    { for namespaces.iter().map(|namespace| {
                        let target = namespace.clone();
                        html! {
                            <li key={namespace.uuid.to_string()} class="card">
                                <div>
                                    <strong>{ namespace.name.clone() }</strong>
                                    <a href={namespace.url.clone()} target="_blank">{ namespace.url.clone() }</a>
                                </div>
                                <StyledButton
                                    label="Delete"
                                    icon={"delete".to_string()}
                                    style={StyleType::Danger}
                                    onclick={link.callback(move |_| Msg::AskDelete(target.clone()))}
                                />
                            </li>
                        }
                    }) }
                </ul>
            },
        };

        html! {
            <section class="page">
                <header class="page-header">
                    <h1>{"Namespaces"}</h1>
                    <StyledButton
                        label="New namespace"
                        icon={"add".to_string()}
                        style={StyleType::Info}
                        onclick={link.callback(|_| Msg::OpenCreate)}
                    />
                </header>
                { content }

                <Dialog
                    dialog_type={DialogType::Form}
                    title="New namespace"
                    open={self.dialog == Some(DialogType::Form)}
                    on_confirm={link.callback(|_| Msg::Submit)}
                    on_close={link.callback(|_| Msg::CloseDialog)}
                >
                    <label>{"Name"}<input ref={self.name_ref.clone()} required=true /></label>
                    <label>{"URL"}<input ref={self.url_ref.clone()} type="url" /></label>
                </Dialog>

                <Dialog
                    dialog_type={DialogType::Confirmation}
                    title="Delete namespace"
                    confirm_label={"Delete".to_string()}
                    open={self.dialog == Some(DialogType::Confirmation)}
                    on_confirm={link.callback(|_| Msg::ConfirmDelete)}
                    on_close={link.callback(|_| Msg::CloseDialog)}
                >
                    <p>
                        { format!(
                            "Delete namespace \"{}\"?",
                            self.pending_delete.as_ref().map(|n| n.name.as_str()).unwrap_or_default()
                        ) }
                    </p>
                </Dialog>
            </section>
        }
    }
}
