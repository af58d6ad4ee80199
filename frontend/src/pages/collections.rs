use super::{request, runtime_config};
use crate::components::dialog::Dialog;
use crate::components::form::{field_value, list_value, optional_value, reset};
use crate::components::styled_button::StyledButton;
use crate::components::toast::show_toast;
use crate::fetch::{base_url_fetch, FetchHandle, FetchResult};
use common::config::RuntimeConfig;
use common::fetch::{FetchOptions, Method};
use common::model::collection::{Collection, CollectionDetail, CRS84};
use common::model::connection::Connection;
use common::model::license::LicenseTitle;
use common::ui::{DialogType, StyleType};
use yew::prelude::*;

const PATH: &str = "data/collections";

pub enum Msg {
    Loaded(FetchResult<Vec<Collection>>),
    ConnectionsLoaded(FetchResult<Vec<Connection>>),
    LicensesLoaded(FetchResult<Vec<LicenseTitle>>),
    OpenCreate,
    ShowDetail(Collection),
    DetailLoaded(FetchResult<CollectionDetail>),
    AskDelete(Collection),
    CloseDialog,
    Submit,
    ConfirmDelete,
    Saved(Result<(), String>),
}

#[derive(Default)]
struct CollectionForm {
    id: NodeRef,
    title: NodeRef,
    description: NodeRef,
    connection: NodeRef,
    url: NodeRef,
    license: NodeRef,
    crs: NodeRef,
    storage_crs: NodeRef,
}

impl CollectionForm {
    fn read(&self) -> Result<Collection, String> {
        let id = field_value(&self.id);
        let title = field_value(&self.title);
        let connection = field_value(&self.connection);
        if id.is_empty() || title.is_empty() {
            return Err("A collection needs an id and a title".to_string());
        }
        if connection.is_empty() {
            return Err("Pick the connection the collection is read from".to_string());
        }

        let mut collection = Collection::new(id, title, connection);
        collection.description = field_value(&self.description);
        collection.url = field_value(&self.url);
        collection.license = optional_value(&self.license);
        let crs = list_value(&self.crs);
        if !crs.is_empty() {
            collection.crs = crs;
        }
        if let Some(storage_crs) = optional_value(&self.storage_crs) {
            collection.storage_crs = storage_crs;
        }
        Ok(collection)
    }

    fn clear(&self) {
        for node in [
            &self.id,
            &self.title,
            &self.description,
            &self.url,
            &self.crs,
            &self.storage_crs,
        ] {
            reset(node);
        }
    }
}

/// Published collections, with a detail view and create/delete dialogs.
pub struct CollectionsPage {
    config: RuntimeConfig,
    list: FetchHandle<Vec<Collection>>,
    connection_list: FetchHandle<Vec<Connection>>,
    license_list: FetchHandle<Vec<LicenseTitle>>,
    collections: Vec<Collection>,
    connections: Vec<Connection>,
    licenses: Vec<LicenseTitle>,
    detail: Option<CollectionDetail>,
    loading: bool,
    error: Option<String>,
    dialog: Option<DialogType>,
    pending_delete: Option<Collection>,
    form: CollectionForm,
}

impl Component for CollectionsPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = runtime_config(ctx.link());
        let link = ctx.link();
        Self {
            list: base_url_fetch(&config, PATH, FetchOptions::new(), link.callback(Msg::Loaded)),
            connection_list: base_url_fetch(
                &config,
                "data/connections",
                FetchOptions::new(),
                link.callback(Msg::ConnectionsLoaded),
            ),
            license_list: base_url_fetch(
                &config,
                "data/collections/licenses",
                FetchOptions::new(),
                link.callback(Msg::LicensesLoaded),
            ),
            config,
            collections: Vec::new(),
            connections: Vec::new(),
            licenses: Vec::new(),
            detail: None,
            loading: true,
            error: None,
            dialog: None,
            pending_delete: None,
            form: CollectionForm::default(),
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.list.execute();
            self.connection_list.execute();
            self.license_list.execute();
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(collections) => {
                        self.collections = collections;
                        self.error = None;
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
                true
            }
            Msg::ConnectionsLoaded(result) => {
                self.connections = result.unwrap_or_default();
                true
            }
            Msg::LicensesLoaded(result) => {
                self.licenses = result.unwrap_or_default();
                true
            }
            Msg::OpenCreate => {
                if self.connections.is_empty() {
                    show_toast("Add a connection before creating collections", StyleType::Warning);
                    return false;
                }
                self.dialog = Some(DialogType::Form);
                true
            }
            Msg::ShowDetail(collection) => {
                // eager: the dialog opens while the request is in flight
                let path = format!("{}/{}", PATH, collection.uuid);
                self.detail = Some(CollectionDetail::from(collection));
                base_url_fetch(
                    &self.config,
                    &path,
                    FetchOptions::new().lazy(false),
                    ctx.link().callback(Msg::DetailLoaded),
                );
                self.dialog = Some(DialogType::Blank);
                true
            }
            Msg::DetailLoaded(Ok(detail)) => {
                // responses for an earlier, already closed detail view are dropped
                if !is_shown(self.detail.as_ref(), &detail) {
                    return false;
                }
                self.detail = Some(detail);
                true
            }
            Msg::DetailLoaded(Err(e)) => {
                show_toast(&format!("Could not load collection: {}", e), StyleType::Danger);
                false
            }
            Msg::AskDelete(collection) => {
                self.pending_delete = Some(collection);
                self.dialog = Some(DialogType::Confirmation);
                true
            }
            Msg::CloseDialog => {
                self.dialog = None;
                self.pending_delete = None;
                self.detail = None;
                true
            }
            Msg::Submit => {
                let collection = match self.form.read() {
                    Ok(collection) => collection,
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
                            .json(&collection)
                            .map_err(|e| e.to_string())?;
                        request(&config, PATH, opts).await.map(|_| ())
                    }
                    .await;
                    Msg::Saved(result)
                });
                false
            }
            Msg::ConfirmDelete => {
                let Some(collection) = self.pending_delete.take() else {
                    return false;
                };
                let config = self.config.clone();
                ctx.link().send_future(async move {
                    let path = format!("{}/{}", PATH, collection.uuid);
                    let opts = FetchOptions::new().method(Method::Delete);
                    Msg::Saved(request(&config, &path, opts).await.map(|_| ()))
                });
                false
            }
            Msg::Saved(Ok(())) => {
                show_toast("Collections updated", StyleType::Success);
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
        let rows = self.collections.iter().map(|collection| {
            let shown = collection.clone();
            let target = collection.clone();
            html! {
                <tr key={collection.uuid.to_string()}>
                    <td>{ collection.id.clone() }</td>
                    <td>{ collection.title.clone() }</td>
                    <td>{ collection.connection.clone() }</td>
                    <td>{ collection.license.clone().unwrap_or_else(|| "-".to_string()) }</td>
                    <td class="row-actions">
                        <StyledButton
                            label="Details"
                            icon={"info".to_string()}
                            style={StyleType::Info}
                            onclick={link.callback(move |_| Msg::ShowDetail(shown.clone()))}
                        />
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
                    <h1>{"Collections"}</h1>
                    <StyledButton
                        label="New collection"
                        icon={"add".to_string()}
                        style={StyleType::Info}
                        onclick={link.callback(|_| Msg::OpenCreate)}
                    />
                </header>

                if self.loading {
                    <p class="muted">{"Loading collections..."}</p>
                } else if let Some(error) = &self.error {
                    <p class={StyleType::Danger.css_class()}>{ format!("Could not load collections: {}", error) }</p>
                } else if self.collections.is_empty() {
                    <p class="muted">{"No collections published yet."}</p>
                } else {
                    <table class="data-table">
                        <thead>
                            <tr><th>{"Id"}</th><th>{"Title"}</th><th>{"Connection"}</th><th>{"License"}</th><th></th></tr>
                        </thead>
                        <tbody>{ for rows }</tbody>
                    </table>
                }

                <Dialog
                    dialog_type={DialogType::Form}
                    title="New collection"
                    open={self.dialog == Some(DialogType::Form)}
                    on_confirm={link.callback(|_| Msg::Submit)}
                    on_close={link.callback(|_| Msg::CloseDialog)}
                >
                    <label>{"Id"}<input ref={self.form.id.clone()} required=true /></label>
                    <label>{"Title"}<input ref={self.form.title.clone()} required=true /></label>
                    <label>{"Description"}<textarea ref={self.form.description.clone()} /></label>
                    <label>{"Connection"}
                        <select ref={self.form.connection.clone()}>
                            { for self.connections.iter().map(|c| html! {
                                <option value={c.name.clone()}>{ c.name.clone() }</option>
                            }) }
                        </select>
                    </label>
                    <label>{"URL"}<input ref={self.form.url.clone()} type="url" /></label>
                    <label>{"License"}
                        <select ref={self.form.license.clone()}>
                            <option value="">{"No license"}</option>
                            { for self.licenses.iter().map(|l| html! {
                                <option value={l.title.clone()}>{ l.title.clone() }</option>
                            }) }
                        </select>
                    </label>
                    <label>{"CRS (comma separated)"}<input ref={self.form.crs.clone()} placeholder={CRS84} /></label>
                    <label>{"Storage CRS"}<input ref={self.form.storage_crs.clone()} placeholder={CRS84} /></label>
                </Dialog>

                <Dialog
                    dialog_type={DialogType::Blank}
                    title="Collection details"
                    open={self.dialog == Some(DialogType::Blank)}
                    on_close={link.callback(|_| Msg::CloseDialog)}
                >
                    { self.detail.as_ref().map(view_detail).unwrap_or_default() }
                </Dialog>

                <Dialog
                    dialog_type={DialogType::Confirmation}
                    title="Delete collection"
                    confirm_label={"Delete".to_string()}
                    open={self.dialog == Some(DialogType::Confirmation)}
                    on_confirm={link.callback(|_| Msg::ConfirmDelete)}
                    on_close={link.callback(|_| Msg::CloseDialog)}
                >
                    <p>
                        { format!(
                            "Delete collection \"{}\"?",
                            self.pending_delete.as_ref().map(|c| c.title.as_str()).unwrap_or_default()
                        ) }
                    </p>
                </Dialog>
            </section>
        }
    }
}

/// Whether `loaded` belongs to the collection the detail dialog is showing.
fn is_shown(shown: Option<&CollectionDetail>, loaded: &CollectionDetail) -> bool {
    shown.is_some_and(|shown| shown.summary.uuid == loaded.summary.uuid)
}

fn view_detail(detail: &CollectionDetail) -> Html {
    let extent = detail.extent.clone().unwrap_or_default();
    let bbox = extent
        .spatial
        .as_ref()
        .map(|spatial| {
            spatial
                .bbox
                .iter()
                .map(|[x, y]| format!("[{}, {}]", x, y))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_else(|| "-".to_string());
    let interval = extent
        .temporal
        .as_ref()
        .map(|temporal| {
            temporal
                .interval
                .iter()
                .map(|[start, end]| {
                    format!(
                        "{} .. {}",
                        start.as_deref().unwrap_or(".."),
                        end.as_deref().unwrap_or("..")
                    )
                })
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_else(|| "-".to_string());

    html! {
        <dl class="detail-list">
            <dt>{"Id"}</dt><dd>{ detail.summary.id.clone() }</dd>
            <dt>{"Title"}</dt><dd>{ detail.summary.title.clone() }</dd>
            <dt>{"Description"}</dt><dd>{ detail.summary.description.clone() }</dd>
            <dt>{"Connection"}</dt><dd>{ detail.summary.connection.clone() }</dd>
            <dt>{"URL"}</dt><dd>{ detail.summary.url.clone() }</dd>
            <dt>{"License"}</dt><dd>{ detail.license.clone().unwrap_or_else(|| "-".to_string()) }</dd>
            <dt>{"Bounding box"}</dt><dd>{ bbox }</dd>
            <dt>{"Interval"}</dt><dd>{ interval }</dd>
            <dt>{"CRS"}</dt><dd>{ detail.crs.join(", ") }</dd>
            <dt>{"Storage CRS"}</dt><dd>{ detail.storage_crs.clone() }</dd>
            <dt>{"Date/time field"}</dt>
            <dd>{ detail.selected_date_time_field.clone().unwrap_or_else(|| "-".to_string()) }</dd>
        </dl>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn detail(id: &str) -> CollectionDetail {
        let mut collection = Collection::new(id, id, "main");
        collection.uuid = Uuid::new_v4();
        CollectionDetail::from(collection)
    }

    #[test]
    fn late_detail_of_another_collection_is_ignored() {
        let rivers = detail("rivers");
        let lakes = detail("lakes");

        assert!(is_shown(Some(&lakes), &lakes));
        assert!(!is_shown(Some(&lakes), &rivers));
        assert!(!is_shown(None, &rivers));
    }
}
