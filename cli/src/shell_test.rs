use super::*;

#[test]
fn blank_lines_are_skipped() {
    assert_eq!(parse("   ").unwrap(), None);
    assert_eq!(parse("").unwrap(), None);
}

#[test]
fn login_takes_email_and_password() {
    assert_eq!(
        parse("login a@b.com validpass1").unwrap(),
        Some(ShellCommand::Login { email: "a@b.com".into(), password: "validpass1".into() })
    );
    assert_eq!(parse("login a@b.com").unwrap_err(), ShellError::Usage("login <email> <password>"));
}

#[test]
fn signup_joins_multi_word_profession() {
    let Some(ShellCommand::SignUp { profession, first_name, .. }) =
        parse("signup Ada Obi ada@b.com validpass1 Urban Planner").unwrap()
    else {
        panic!("expected signup");
    };
    assert_eq!(profession, "Urban Planner");
    assert_eq!(first_name, "Ada");
    assert!(matches!(parse("signup Ada Obi ada@b.com validpass1"), Err(ShellError::Usage(_))));
}

#[test]
fn selections_parse() {
    assert_eq!(parse("tab Trending").unwrap(), Some(ShellCommand::Tab(FeedTab::Trending)));
    assert_eq!(parse("category design").unwrap(), Some(ShellCommand::Category(Category::Design)));
    assert!(matches!(parse("tab popular"), Err(ShellError::Selection(_))));
}

#[test]
fn simple_commands() {
    assert_eq!(parse("logout").unwrap(), Some(ShellCommand::Logout));
    assert_eq!(parse("open /dashboard").unwrap(), Some(ShellCommand::Open("/dashboard".into())));
    assert_eq!(parse("WHOAMI").unwrap(), Some(ShellCommand::WhoAmI));
    assert_eq!(parse("exit").unwrap(), Some(ShellCommand::Quit));
    assert_eq!(parse("help me").unwrap(), Some(ShellCommand::Help));
}

#[test]
fn unknown_commands_are_reported() {
    assert_eq!(parse("dance").unwrap_err(), ShellError::Unknown("dance".into()));
    assert_eq!(parse("logout now").unwrap_err(), ShellError::Unknown("logout".into()));
}
