use crate::app::App;

mod app;
mod components;
mod fetch;
mod pages;
mod runtime;

fn main() {
    yew::Renderer::<App>::new().render();
}
