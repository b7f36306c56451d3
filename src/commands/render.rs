use crate::api::{store, Mode};
use crate::commands::{Out, Page};
use crate::router::Router;
use crate::views::BillsView;
use crate::{Config, Result, Route};

/// Renders the page of `route` for the connected user.
///
/// A store error while listing bills is not an error of the command: the page displays it.
pub async fn render(config: &Config, mode: Mode, route: Route) -> Result<Out<Page>> {
    let session = config.session().await?;
    let store = store(config, &session, mode)?;
    let mut router = Router::new(session, Some(store));
    router.on_navigate(route).await;

    let message = match router.bills_view() {
        Some(BillsView::Data(bills)) => format!("Rendered {route} with {} bills", bills.len()),
        Some(BillsView::Error(error)) => {
            format!("Rendered {route}, the bills could not be listed: {error}")
        }
        _ => format!("Rendered {route}"),
    };
    let page = Page::new(router.route(), router.render().into_string());
    Ok(Out::new(message, page))
}

/// Renders the bills list.
pub async fn bills(config: &Config, mode: Mode) -> Result<Out<Page>> {
    render(config, mode, Route::Bills).await
}
