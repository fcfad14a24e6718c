//! Interactive shell: one line per command, read from stdin.
//!
//! Errors from a single command are printed and the loop continues; only an
//! I/O failure on stdin or stdout ends the session early.

use arcfunmi::app::{App, AuthOutcome};
use arcfunmi::feed::{Category, FeedTab, ParseSelectionError};
use arcfunmi::forms::{AuthForm, AuthMode};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::CliError;

pub const HELP: &str = "\
commands:
  login <email> <password>
  signup <first> <last> <email> <password> <profession...>
  logout
  open <path>
  tab <feed|trending|following>
  category <all|architecture|engineering|construction|design|planning>
  whoami
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Login { email: String, password: String },
    SignUp { first_name: String, last_name: String, email: String, password: String, profession: String },
    Logout,
    Open(String),
    Tab(FeedTab),
    Category(Category),
    WhoAmI,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error(transparent)]
    Selection(#[from] ParseSelectionError),
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("login", [email, password]) => {
            ShellCommand::Login { email: (*email).to_owned(), password: (*password).to_owned() }
        }
        ("login", _) => return Err(ShellError::Usage("login <email> <password>")),
        ("signup", [first, last, email, password, profession @ ..]) if !profession.is_empty() => ShellCommand::SignUp {
            first_name: (*first).to_owned(),
            last_name: (*last).to_owned(),
            email: (*email).to_owned(),
            password: (*password).to_owned(),
            profession: profession.join(" "),
        },
        ("signup", _) => return Err(ShellError::Usage("signup <first> <last> <email> <password> <profession...>")),
        ("logout", []) => ShellCommand::Logout,
        ("open", [path]) => ShellCommand::Open((*path).to_owned()),
        ("open", _) => return Err(ShellError::Usage("open <path>")),
        ("tab", [tab]) => ShellCommand::Tab(tab.parse()?),
        ("tab", _) => return Err(ShellError::Usage("tab <feed|trending|following>")),
        ("category", name @ [_, ..]) => ShellCommand::Category(name.join(" ").parse()?),
        ("category", _) => return Err(ShellError::Usage("category <name>")),
        ("whoami", []) => ShellCommand::WhoAmI,
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "exit", []) => ShellCommand::Quit,
        (other, _) => return Err(ShellError::Unknown(other.to_owned())),
    };
    Ok(Some(command))
}

pub(crate) async fn run(app: &mut App) -> Result<(), CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");
    while let Some(line) = lines.next_line().await? {
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        if let Err(e) = execute(app, command).await {
            eprintln!("error: {e}");
        }
    }
    Ok(())
}

async fn execute(app: &mut App, command: ShellCommand) -> Result<(), CliError> {
    match command {
        ShellCommand::Login { email, password } => {
            if let AuthOutcome::SignedIn(page) = app.submit_auth(&AuthForm::login(email, password)).await? {
                print!("{page}");
            }
        }
        ShellCommand::SignUp { first_name, last_name, email, password, profession } => {
            let form = AuthForm {
                mode: AuthMode::SignUp,
                first_name,
                last_name,
                email,
                confirm_password: password.clone(),
                password,
                profession,
                agree_to_terms: true,
            };
            match app.submit_auth(&form).await? {
                AuthOutcome::SignedIn(page) => print!("{page}"),
                AuthOutcome::ConfirmationRequired => return Err(CliError::ConfirmationRequired),
            }
        }
        ShellCommand::Logout => {
            let (page, error) = app.sign_out().await;
            print!("{page}");
            if let Some(error) = error {
                return Err(CliError::SignOut(error));
            }
        }
        ShellCommand::Open(path) => print!("{}", app.open(&path).await),
        ShellCommand::Tab(tab) => print!("{}", app.select_tab(tab).await),
        ShellCommand::Category(category) => print!("{}", app.select_category(category).await),
        ShellCommand::WhoAmI => {
            let session = app.session();
            match (&session.profile, session.user_id()) {
                (Some(profile), _) => println!("{} <{}> [{}]", profile.display_name(), profile.email, session.auth_state.as_str()),
                (None, Some(user_id)) => println!("{user_id} [{}]", session.auth_state.as_str()),
                (None, None) => println!("not signed in"),
            }
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
