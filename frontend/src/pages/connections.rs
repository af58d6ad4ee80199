use super::{request, runtime_config};
use crate::components::dialog::Dialog;
use crate::components::form::{field_value, reset};
use crate::components::styled_button::StyledButton;
use crate::components::toast::show_toast;
use crate::fetch::{base_url_fetch, FetchHandle, FetchResult};
use common::config::RuntimeConfig;
use common::fetch::{FetchOptions, Method};
use common::model::connection::Connection;
use common::ui::{DialogType, StyleType};
use uuid::Uuid;
use yew::prelude::*;

const PATH: &str = "data/connections";

pub enum Msg {
    Loaded(FetchResult<Vec<Connection>>),
    OpenCreate,
    AskDelete(Connection),
    CloseDialog,
    Submit,
    ConfirmDelete,
    Saved(Result<(), String>),
}

#[derive(Default)]
struct ConnectionForm {
    name: NodeRef,
    host: NodeRef,
    port: NodeRef,
    role: NodeRef,
    password: NodeRef,
    database_name: NodeRef,
}

impl ConnectionForm {
    fn read(&self) -> Result<Connection, String> {
        let port = field_value(&self.port);
        let port = port
            .parse::<u16>()
            .map_err(|_| format!("Port must be a number between 0 and 65535, got {:?}", port))?;
        let name = field_value(&self.name);
        if name.is_empty() {
            return Err("A connection needs a name".to_string());
        }

        Ok(Connection {
            uuid: Uuid::nil(),
            name,
            host: field_value(&self.host),
            port,
            role: field_value(&self.role),
            password: field_value(&self.password),
            database_name: field_value(&self.database_name),
        })
    }

    fn clear(&self) {
        for node in [&self.name, &self.host, &self.port, &self.role, &self.password, &self.database_name] {
            reset(node);
        }
    }
}

/// Lists the configured PostgreSQL connections and lets the user add or remove them.
pub struct ConnectionsPage {
    config: RuntimeConfig,
    list: FetchHandle<Vec<Connection>>,
    connections: Vec<Connection>,
    loading: bool,
    error: Option<String>,
    dialog: Option<DialogType>,
    pending_delete: Option<Connection>,
    form: ConnectionForm,
}

impl Component for ConnectionsPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = runtime_config(ctx.link());
        let list = base_url_fetch(&config, PATH, FetchOptions::new(), ctx.link().callback(Msg::Loaded));
        Self {
            config,
            list,
            connections: Vec::new(),
            loading: true,
            error: None,
            dialog: None,
            pending_delete: None,
            form: ConnectionForm::default(),
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.list.execute();
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(connections) => {
                        self.connections = connections;
                        self.error = None;
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
                true
            }
            Msg::OpenCreate => {
                self.dialog = Some(DialogType::Form);
                true
            }
            Msg::AskDelete(connection) => {
                self.pending_delete = Some(connection);
                self.dialog = Some(DialogType::Confirmation);
                true
            }
            Msg::CloseDialog => {
                self.dialog = None;
                self.pending_delete = None;
                true
            }
            Msg::Submit => {
                let connection = match self.form.read() {
                    Ok(connection) => connection,
                    Err(e) => {
                        show_toast(&e, StyleType::Warning);
                        return false;
                    }
                };
                let config = self.config.clone();
                ctx.link().send_future(async move {
                    let result = async {
                        let opts = FetchOptions::new()
                            .method(Method::Post)
                            .json(&connection)
                            .map_err(|e| e.to_string())?;
                        request(&config, PATH, opts).await.map(|_| ())
                    }
                    .await;
                    Msg::Saved(result)
                });
                false
            }
            Msg::ConfirmDelete => {
                let Some(connection) = self.pending_delete.take() else {
                    return false;
                };
                let config = self.config.clone();
                ctx.link().send_future(async move {
                    let path = format!("{}/{}", PATH, connection.uuid);
                    let opts = FetchOptions::new().method(Method::Delete);
                    Msg::Saved(request(&config, &path, opts).await.map(|_| ()))
                });
                false
            }
            Msg::Saved(Ok(())) => {
                show_toast("Connections updated", StyleType::Success);
                self.form.clear();
                self.dialog = None;
                self.list.execute();
                true
            }
            Msg::Saved(Err(e)) => {
                show_toast(&format!("Error: {}", e), StyleType::Danger);
                if self.dialog == Some(DialogType::Confirmation) {
                    self.dialog = None;
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let rows = self.connections.iter().map(|connection| {
            let target = connection.clone();
            html! {
                <tr key={connection.uuid.to_string()}>
                    <td>{ connection.name.clone() }</td>
                    <td>{ format!("{}:{}", connection.host, connection.port) }</td>
                    <td>{ connection.database_name.clone() }</td>
                    <td>{ connection.role.clone() }</td>
                    <td>
                        <StyledButton
                            label="Delete"
                            icon={"delete".to_string()}
                            style={StyleType::Danger}
                            onclick={link.callback(move |_| Msg::AskDelete(target.clone()))}
                        />
                    </td>
                </tr>
            }
        });

        html! {
            <section class="page">
                <header class="page-header">
                    <h1>{"Connections"}</h1>
                    <StyledButton
                        label="New connection"
                        icon={"add".to_string()}
                        style={StyleType::Info}
                        onclick={link.callback(|_| Msg::OpenCreate)}
                    />
                </header>

                if self.loading {
                    <p class="muted">{"Loading connections..."}</p>
                } else if let Some(error) = &self.error {
                    <p class={StyleType::Danger.css_class()}>{ format!("Could not load connections: {}", error) }</p>
                } else if self.connections.is_empty() {
                    <p class="muted">{"No connections configured yet."}</p>
                } else {
                    <table class="data-table">
                        <thead>
                            <tr><th>{"Name"}</th><th>{"Address"}</th><th>{"Database"}</th><th>{"Role"}</th><th></th></tr>
                        </thead>
                        <tbody>{ for rows }</tbody>
                    </table>
                }

                <Dialog
                    dialog_type={DialogType::Form}
                    title="New connection"
                    open={self.dialog == Some(DialogType::Form)}
                    on_confirm={link.callback(|_| Msg::Submit)}
                    on_close={link.callback(|_| Msg::CloseDialog)}
                >
                    <label>{"Name"}<input ref={self.form.name.clone()} required=true /></label>
                    <label>{"Host"}<input ref={self.form.host.clone()} placeholder="localhost" /></label>
                    <label>{"Port"}<input ref={self.form.port.clone()} type="number" value="5432" /></label>
                    <label>{"Role"}<input ref={self.form.role.clone()} /></label>
                    <label>{"Password"}<input ref={self.form.password.clone()} type="password" /></label>
                    <label>{"Database"}<input ref={self.form.database_name.clone()} /></label>
                </Dialog>

                <Dialog
                    dialog_type={DialogType::Confirmation}
                    title="Delete connection"
                    confirm_label={"Delete".to_string()}
                    open={self.dialog == Some(DialogType::Confirmation)}
                    on_confirm={link.callback(|_| Msg::ConfirmDelete)}
                    on_close={link.callback(|_| Msg::CloseDialog)}
                >
                    <p>
                        { format!(
                            "Delete connection \"{}\"? Every collection read from it is deleted as well.",
                            self.pending_delete.as_ref().map(|c| c.name.as_str()).unwrap_or_default()
                        ) }
                    </p>
                </Dialog>
            </section>
        }
    }
}
