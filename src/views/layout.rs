use crate::views::hooks;
use crate::{Route, Session};
use maud::{html, Markup};

/// The class that marks the navigation icon of the current route.
pub const ACTIVE_ICON: &str = "active-icon";

/// The navigation icons of the vertical layout.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Icon {
    /// Leads to the bills list.
    Window,
    /// Leads to the new-bill form.
    Mail,
}

impl Icon {
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::Bills => Icon::Window,
            Route::NewBill => Icon::Mail,
        }
    }
}

/// What the vertical layout shows: whether the employee icons are present, and which one is
/// active.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Nav {
    icons: bool,
    active: Option<Icon>,
}

impl Nav {
    /// Employees get the icons, other users get an empty navbar.
    pub fn for_session(session: &Session) -> Self {
        Self {
            icons: session.is_employee(),
            active: None,
        }
    }

    pub fn with_active(mut self, icon: Icon) -> Self {
        self.active = Some(icon);
        self
    }

    fn is_active(&self, icon: Icon) -> bool {
        self.active == Some(icon)
    }
}

pub fn vertical_layout(nav: &Nav) -> Markup {
    let window_class = nav.is_active(Icon::Window).then_some(ACTIVE_ICON);
    let mail_class = nav.is_active(Icon::Mail).then_some(ACTIVE_ICON);
    html! {
        div class="vertical-navbar" {
            div class="layout-title" { "Billed" }
            @if nav.icons {
                div id="layout-icon1" data-testid=(hooks::ICON_WINDOW) class=[window_class] {
                    span class="icon" title="Mes notes de frais" { "▤" }
                }
                div id="layout-icon2" data-testid=(hooks::ICON_MAIL) class=[mail_class] {
                    span class="icon" title="Nouvelle note de frais" { "✉" }
                }
            }
        }
    }
}
