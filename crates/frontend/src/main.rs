mod components;
mod controller;
mod coords;
mod pages;
mod tables;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/location/:id")]
    LocationView { id: u32 },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::explorer::Explorer { focus: None::<u32> }
    }
}

#[component]
fn LocationView(id: u32) -> Element {
    rsx! {
        pages::explorer::Explorer { focus: Some(id) }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
