use dioxus::prelude::*;
use ui::Navbar;

use crate::Route;

/// Layout shared by every page: the navigation shell above the routed view.
#[component]
pub fn Shell() -> Element {
    rsx! {
        Navbar {}
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}
