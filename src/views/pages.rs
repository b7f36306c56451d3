use crate::views::{hooks, vertical_layout, Nav};
use maud::{html, Markup};

/// The page shown while bills are being fetched.
pub fn loading_page(nav: &Nav) -> Markup {
    html! {
        div class="layout" {
            (vertical_layout(nav))
            div class="content" id="loading" {
                "Loading..."
            }
        }
    }
}

/// The page shown when the store fails. `error` is displayed as is.
pub fn error_page(nav: &Nav, error: &str) -> Markup {
    html! {
        div class="layout" {
            (vertical_layout(nav))
            div class="content" {
                div class="content-header" {
                    div class="content-title" { "Erreur" }
                }
                div data-testid=(hooks::ERROR_MESSAGE) {
                    (error)
                }
            }
        }
    }
}
