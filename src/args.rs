//! These structs provide the CLI interface for the billed CLI.

use crate::{Route, UserType};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// billed: A command-line front end for the Billed expense reports app.
///
/// Employees use Billed to send their expense reports ("notes de frais") along with a picture of
/// the receipt, and to follow the status of the reports they have sent. This program renders the
/// app's pages to HTML and submits new bills to the bills API.
///
/// Set BILLED_IN_TEST_MODE to a non-empty value to work against an in-memory store instead of the
/// bills API.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory, the configuration file and the session of the connected user.
    ///
    /// This is the first command you should run. By default the home directory is $HOME/billed,
    /// pass --billed-home to put it somewhere else.
    Init(InitArgs),
    /// Print the page listing the connected user's bills as HTML.
    Bills,
    /// Print the page of a route as HTML, e.g. "#employee/bill/new".
    Render(RenderArgs),
    /// Fill in the new bill form, attach a receipt and send it.
    NewBill(Box<NewBillArgs>),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the billed configuration and session are held. Defaults to ~/billed
    #[arg(long, env = "BILLED_HOME", default_value_t = default_billed_home())]
    billed_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn billed_home(&self) -> &DisplayPath {
        &self.billed_home
    }
}

/// (Not shown): Args for the `billed init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The email address of the connected user.
    #[arg(long)]
    email: String,

    /// The kind of user: "employee" or "admin".
    #[arg(long, default_value_t = UserType::Employee)]
    user_type: UserType,

    /// The base URL of the bills API.
    #[arg(long, default_value = crate::config::DEFAULT_API_URL)]
    api_url: String,

    /// The token sent to the bills API as a bearer token.
    #[arg(long)]
    jwt: Option<String>,
}

impl InitArgs {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn jwt(&self) -> Option<&str> {
        self.jwt.as_deref()
    }
}

/// (Not shown): Args for the `billed render` command.
#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    /// The route to render: "#employee/bills" or "#employee/bill/new".
    route: Route,
}

impl RenderArgs {
    pub fn route(&self) -> Route {
        self.route
    }
}

/// (Not shown): Args for the `billed new-bill` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct NewBillArgs {
    /// The expense category, e.g. "Transports". Defaults to the first category.
    #[arg(long = "type")]
    expense_type: Option<String>,

    /// What the expense was for, e.g. "Vol Paris Londres".
    #[arg(long)]
    name: String,

    /// The amount including taxes, in euros.
    #[arg(long)]
    amount: String,

    /// The date of the expense, formatted YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// The amount of VAT, in euros.
    #[arg(long, default_value = "")]
    vat: String,

    /// The VAT rate in percent. Defaults to 20.
    #[arg(long, default_value = "")]
    pct: String,

    #[arg(long, default_value = "")]
    commentary: String,

    /// The picture of the receipt. Only jpg, jpeg and png are accepted.
    #[arg(long)]
    file: PathBuf,

    /// The MIME type of the receipt. Guessed from the file extension when omitted.
    #[arg(long)]
    mime_type: Option<String>,
}

impl NewBillArgs {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            date: date.into(),
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn with_expense_type(mut self, expense_type: impl Into<String>) -> Self {
        self.expense_type = Some(expense_type.into());
        self
    }

    pub fn with_vat(mut self, vat: impl Into<String>, pct: impl Into<String>) -> Self {
        self.vat = vat.into();
        self.pct = pct.into();
        self
    }

    pub fn with_commentary(mut self, commentary: impl Into<String>) -> Self {
        self.commentary = commentary.into();
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn expense_type(&self) -> Option<&str> {
        self.expense_type.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn vat(&self) -> &str {
        &self.vat
    }

    pub fn pct(&self) -> &str {
        &self.pct
    }

    pub fn commentary(&self) -> &str {
        &self.commentary
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

fn default_billed_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("billed"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --billed-home or BILLED_HOME instead of relying on the default \
                billed home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("billed")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_new_bill() {
        let args = Args::try_parse_from([
            "billed",
            "--billed-home",
            "/tmp/billed",
            "new-bill",
            "--type",
            "Transports",
            "--name",
            "Vol Paris Londres",
            "--amount",
            "348",
            "--date",
            "2022-02-02",
            "--file",
            "receipt.png",
        ])
        .unwrap();
        assert_eq!(args.common().billed_home().path(), Path::new("/tmp/billed"));
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        let Command::NewBill(new_bill) = args.command() else {
            panic!("expected new-bill");
        };
        assert_eq!(new_bill.expense_type(), Some("Transports"));
        assert_eq!(new_bill.amount(), "348");
        assert_eq!(new_bill.pct(), "");
        assert!(new_bill.mime_type().is_none());
    }

    #[test]
    fn test_parse_render_route() {
        let args = Args::try_parse_from(["billed", "render", "#employee/bill/new"]).unwrap();
        let Command::Render(render) = args.command() else {
            panic!("expected render");
        };
        assert_eq!(render.route(), Route::NewBill);
        assert!(Args::try_parse_from(["billed", "render", "#admin/dashboard"]).is_err());
    }

    #[test]
    fn test_parse_init_defaults() {
        let args = Args::try_parse_from(["billed", "init", "--email", "a@a"]).unwrap();
        let Command::Init(init) = args.command() else {
            panic!("expected init");
        };
        assert_eq!(init.user_type(), UserType::Employee);
        assert_eq!(init.api_url(), "http://localhost:5678");
        assert!(init.jwt().is_none());
    }

    #[test]
    fn test_parse_init_user_type() {
        let args = Args::try_parse_from([
            "billed",
            "init",
            "--email",
            "admin@test.tld",
            "--user-type",
            "admin",
            "--jwt",
            "token",
        ])
        .unwrap();
        let Command::Init(init) = args.command() else {
            panic!("expected init");
        };
        assert_eq!(init.user_type(), UserType::Admin);
        assert_eq!(init.jwt(), Some("token"));

        let args =
            Args::try_parse_from(["billed", "init", "--email", "a@a", "--user-type", "Employee"])
                .unwrap();
        let Command::Init(init) = args.command() else {
            panic!("expected init");
        };
        assert_eq!(init.user_type(), UserType::Employee);
        assert!(
            Args::try_parse_from(["billed", "init", "--email", "a@a", "--user-type", "manager"])
                .is_err()
        );
    }
}
