//! Maps routes to pages and keeps track of what is displayed.
//!
//! The router is the app shell's navigation callback: controllers receive a closure that queues a
//! route on a channel, and the router renders the queued routes once the controller's handler has
//! returned.

use crate::containers::{BillList, NewBill, SubmitOutcome};
use crate::views::{bills_ui, BillsView, Icon, Nav};
use crate::{Result, Route, Session, Store};
use anyhow::bail;
use maud::{html, Markup};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

enum Screen {
    Blank,
    NewBill(NewBill),
    Bills { list: BillList, view: BillsView },
}

pub struct Router {
    session: Session,
    store: Option<Arc<dyn Store>>,
    screen: Screen,
    sender: UnboundedSender<Route>,
    receiver: UnboundedReceiver<Route>,
}

impl Router {
    /// Create a router that displays nothing until `on_navigate` is called.
    pub fn new(session: Session, store: Option<Arc<dyn Store>>) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            session,
            store,
            screen: Screen::Blank,
            sender,
            receiver,
        }
    }

    /// The route that is displayed.
    pub fn route(&self) -> Option<Route> {
        match &self.screen {
            Screen::Blank => None,
            Screen::NewBill(_) => Some(Route::NewBill),
            Screen::Bills { .. } => Some(Route::Bills),
        }
    }

    /// The navigation icon marked as active.
    pub fn active_icon(&self) -> Option<Icon> {
        self.route().map(Icon::for_route)
    }

    /// The bills page state, when the bills route is displayed.
    pub fn bills_view(&self) -> Option<&BillsView> {
        match &self.screen {
            Screen::Bills { view, .. } => Some(view),
            _ => None,
        }
    }

    /// The new-bill controller, when the new-bill route is displayed.
    pub fn new_bill(&mut self) -> Option<&mut NewBill> {
        match &mut self.screen {
            Screen::NewBill(controller) => Some(controller),
            _ => None,
        }
    }

    /// Renders what is displayed.
    pub fn render(&self) -> Markup {
        let nav = self.nav();
        html! {
            div id="root" {
                @match &self.screen {
                    Screen::Blank => {},
                    Screen::NewBill(controller) => (controller.render(&nav)),
                    Screen::Bills { view, .. } => (bills_ui(&nav, view)),
                }
            }
        }
    }

    /// Replaces the displayed page with the one for `route` and marks its icon as active.
    pub async fn on_navigate(&mut self, route: Route) {
        self.show(route).await;
        self.follow_navigation().await;
    }

    /// Submits the displayed new-bill form. When the store fails, the bills page shows the error.
    /// A form that cannot be sent stays displayed with what was typed.
    ///
    /// # Errors
    /// - Returns an error if the new-bill form is not displayed.
    /// - Returns the error of the submission, after the error page has been displayed.
    pub async fn submit_new_bill(&mut self) -> Result<SubmitOutcome> {
        let Screen::NewBill(controller) = &mut self.screen else {
            bail!("The new bill form is not displayed");
        };
        match controller.handle_submit().await {
            Ok(outcome) => {
                self.follow_navigation().await;
                Ok(outcome)
            }
            Err(e) => {
                self.show_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Clicks the "new bill" button of the bills page.
    ///
    /// # Errors
    /// Returns an error if the bills page is not displayed.
    pub async fn click_new_bill(&mut self) -> Result<()> {
        let Screen::Bills { list, .. } = &mut self.screen else {
            bail!("The bills page is not displayed");
        };
        list.handle_click_new_bill();
        self.follow_navigation().await;
        Ok(())
    }

    fn nav(&self) -> Nav {
        let nav = Nav::for_session(&self.session);
        match self.active_icon() {
            Some(icon) => nav.with_active(icon),
            None => nav,
        }
    }

    /// A navigation callback for controllers.
    fn navigator(&self) -> impl FnMut(Route) + Send + 'static {
        let sender = self.sender.clone();
        move |route| {
            if let Err(e) = sender.send(route) {
                warn!("Navigation to {} was dropped: {e}", e.0);
            }
        }
    }

    async fn show(&mut self, route: Route) {
        info!("Navigating to {route}");
        match route {
            Route::NewBill => {
                let controller =
                    NewBill::new(self.session.clone(), self.store.clone(), self.navigator());
                self.screen = Screen::NewBill(controller);
            }
            Route::Bills => {
                let list = BillList::new(self.store.clone(), self.navigator());
                self.screen = Screen::Bills {
                    list,
                    view: BillsView::Loading,
                };
                self.load_bills().await;
            }
        }
    }

    /// Replaces the loading page with the bills or the error that prevented listing them.
    async fn load_bills(&mut self) {
        let Screen::Bills { list, view } = &mut self.screen else {
            return;
        };
        *view = match list.get_bills().await {
            Ok(bills) => BillsView::Data(bills),
            Err(e) => BillsView::Error(e.to_string()),
        };
    }

    fn show_error(&mut self, error: String) {
        debug!("Displaying error '{error}'");
        let list = BillList::new(self.store.clone(), self.navigator());
        self.screen = Screen::Bills {
            list,
            view: BillsView::Error(error),
        };
    }

    /// Displays the routes that controllers asked for.
    async fn follow_navigation(&mut self) {
        while let Ok(route) = self.receiver.try_recv() {
            self.show(route).await;
        }
    }
}
