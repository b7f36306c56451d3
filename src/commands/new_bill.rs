use crate::api::{store, Mode};
use crate::args::NewBillArgs;
use crate::commands::{Out, Page};
use crate::containers::SubmitOutcome;
use crate::model::{SelectedFile, EXPENSE_TYPES};
use crate::router::Router;
use crate::views::Field;
use crate::{Config, Result, Route};
use anyhow::{bail, ensure, Context};
use tracing::debug;

/// Fills in the new bill form of the connected user with `args`, selects the receipt and submits
/// the form.
///
/// # Errors
/// - Returns an error if the expense type is unknown or the receipt cannot be read.
/// - Returns an error if the receipt is not a jpg, jpeg or png image or the amount is not a number.
/// - Returns the store's error unchanged when it fails to save the bill.
pub async fn new_bill(config: &Config, mode: Mode, args: &NewBillArgs) -> Result<Out<Page>> {
    if let Some(expense_type) = args.expense_type() {
        ensure!(
            EXPENSE_TYPES.contains(&expense_type),
            "Unknown expense type '{expense_type}', expected one of: {}",
            EXPENSE_TYPES.join(", ")
        );
    }
    let file = SelectedFile::load(args.file(), args.mime_type())
        .await
        .with_context(|| format!("Unable to read the receipt '{}'", args.file().display()))?;

    let session = config.session().await?;
    let store = store(config, &session, mode)?;
    let mut router = Router::new(session, Some(store));
    router.on_navigate(Route::NewBill).await;

    let Some(controller) = router.new_bill() else {
        bail!("The new bill form could not be displayed");
    };
    controller.set_value(Field::ExpenseType, args.expense_type().unwrap_or_default());
    controller.set_value(Field::ExpenseName, args.name());
    controller.set_value(Field::Amount, args.amount());
    controller.set_value(Field::Date, args.date());
    controller.set_value(Field::Vat, args.vat());
    controller.set_value(Field::Pct, args.pct());
    controller.set_value(Field::Commentary, args.commentary());
    controller.handle_change_file(vec![file]);
    debug!("Submitting {:?}", controller.form());

    let bill = match router.submit_new_bill().await? {
        SubmitOutcome::Saved(bill) => bill,
        SubmitOutcome::MissingReceipt => {
            let error = router
                .new_bill()
                .map(|controller| controller.form().error_message().to_string())
                .unwrap_or_default();
            bail!("The receipt '{}' was refused: {error}", args.file().display());
        }
        SubmitOutcome::Invalid(message) => bail!("The bill was not sent: {message}"),
    };

    let message = format!(
        "Sent bill {} '{}' of {}",
        bill.id().unwrap_or_default(),
        bill.name,
        bill.amount
    );
    let page = Page::new(router.route(), router.render().into_string());
    Ok(Out::new(message, page))
}
