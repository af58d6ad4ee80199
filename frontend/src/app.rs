use crate::pages::collections::CollectionsPage;
use crate::pages::connections::ConnectionsPage;
use crate::pages::general_options::GeneralOptionsPage;
use crate::pages::namespaces::NamespacesPage;
use crate::runtime;
use common::config::RuntimeConfig;
use yew::{classes, html, Component, Context, ContextProvider, Html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Collections,
    Connections,
    Namespaces,
    Options,
}

impl Section {
    const ALL: [Section; 4] = [
        Section::Collections,
        Section::Connections,
        Section::Namespaces,
        Section::Options,
    ];

    fn slug(self) -> &'static str {
        match self {
            Section::Collections => "collections",
            Section::Connections => "connections",
            Section::Namespaces => "namespaces",
            Section::Options => "options",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Section::Collections => "Collections",
            Section::Connections => "Connections",
            Section::Namespaces => "Namespaces",
            Section::Options => "General options",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Section::Collections => "layers",
            Section::Connections => "storage",
            Section::Namespaces => "label",
            Section::Options => "settings",
        }
    }

    fn from_hash(hash: &str) -> Option<Section> {
        let slug = hash.trim_start_matches('#');
        Section::ALL.into_iter().find(|section| section.slug() == slug)
    }
}

pub enum Msg {
    SetSection(Section),
}

pub struct App {
    config: RuntimeConfig,
    section: Section,
}

fn current_hash() -> Option<String> {
    web_sys::window().and_then(|window| window.location().hash().ok())
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = runtime::runtime_config();
        gloo_console::log!(format!("Dashboard API at {}", config.server_base_url));
        let section = current_hash()
            .as_deref()
            .and_then(Section::from_hash)
            .unwrap_or(Section::Collections);
        Self { config, section }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetSection(section) => {
                if section == self.section {
                    return false;
                }
                self.section = section;
                if let Some(window) = web_sys::window() {
                    if window.location().set_hash(section.slug()).is_err() {
                        gloo_console::warn!("Could not update the location hash");
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let nav = Section::ALL.into_iter().map(|section| {
            let active = (section == self.section).then_some("active");
            html! {
                <li key={section.slug()}>
                    <a
                        href={format!("#{}", section.slug())}
                        class={classes!("nav-link", active)}
                        onclick={link.callback(move |_| Msg::SetSection(section))}
                    >
                        <i class="material-icons">{ section.icon() }</i>
                        <span>{ section.label() }</span>
                    </a>
                </li>
            }
        });

        let page = match self.section {
            Section::Collections => html! { <CollectionsPage /> },
            Section::Connections => html! { <ConnectionsPage /> },
            Section::Namespaces => html! { <NamespacesPage /> },
            Section::Options => html! { <GeneralOptionsPage /> },
        };

        html! {
            <ContextProvider<RuntimeConfig> context={self.config.clone()}>
                <div class="layout">
                    <nav class="sidebar">
                        <h2 class="brand">{"Dashboard"}</h2>
                        <ul>{ for nav }</ul>
                    </nav>
                    <main class="content">{ page }</main>
                </div>
            </ContextProvider<RuntimeConfig>>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_resolve_from_their_hash() {
        for section in Section::ALL {
            assert_eq!(Section::from_hash(&format!("#{}", section.slug())), Some(section));
        }
        assert_eq!(Section::from_hash("#unknown"), None);
        assert_eq!(Section::from_hash(""), None);
    }
}
