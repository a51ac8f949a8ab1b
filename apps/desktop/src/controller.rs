//! Line commands from the terminal and their dispatch into the state core.

use std::str::FromStr;

use client_core::{FieldEdit, FriendsApp};
use rust_decimal::Decimal;
use shared::{
    domain::{FriendId, Payer},
    error::{ErrorCode, LedgerError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    ToggleAddFriend,
    Name(String),
    Image(String),
    Submit,
    Select(FriendRef),
    Bill(Option<Decimal>),
    Paid(Decimal),
    Payer(Payer),
    Split,
    Help,
    Quit,
}

/// A friend picked either by 1-based list position or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRef {
    Position(usize),
    Id(FriendId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Input,
    Validation,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Parse,
    SelectFriend,
    SplitBill,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn input(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Input,
            context: UiErrorContext::Parse,
            message: message.into(),
        }
    }

    pub fn from_ledger(context: UiErrorContext, err: &LedgerError) -> Self {
        let category = match err.code() {
            ErrorCode::NotFound => UiErrorCategory::NotFound,
            ErrorCode::Validation => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// What the loop should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Notice(String),
    Redraw,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list                 redraw the friend list
  add                  open/close the add-friend form
  name <text>          edit the new friend's name
  image <url>          edit the new friend's image url
  submit               add the friend from the form
  select <n|id>        select or deselect a friend
  bill <amount|->      set or clear the bill value
  paid <amount>        set your expense
  payer user|friend    who is paying the bill
  split                apply the split to the selected friend
  help                 show this text
  quit                 exit";

impl FromStr for Command {
    type Err = UiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "add" => Ok(Command::ToggleAddFriend),
            "name" => Ok(Command::Name(rest.to_string())),
            "image" => Ok(Command::Image(rest.to_string())),
            "submit" => Ok(Command::Submit),
            "select" => parse_friend_ref(rest).map(Command::Select),
            "bill" if rest.is_empty() || rest == "-" => Ok(Command::Bill(None)),
            "bill" => parse_amount(rest).map(|bill| Command::Bill(Some(bill))),
            "paid" => parse_amount(rest).map(Command::Paid),
            "payer" => match rest.to_ascii_lowercase().as_str() {
                "user" | "you" | "me" => Ok(Command::Payer(Payer::User)),
                "friend" => Ok(Command::Payer(Payer::Friend)),
                other => Err(UiError::input(format!(
                    "unknown payer '{other}'; expected user or friend"
                ))),
            },
            "split" => Ok(Command::Split),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(UiError::input(format!("unknown command '{other}'; try help"))),
        }
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, UiError> {
    Decimal::from_str(raw).map_err(|_| UiError::input(format!("'{raw}' is not a number")))
}

fn parse_friend_ref(raw: &str) -> Result<FriendRef, UiError> {
    if let Ok(position) = raw.parse::<usize>() {
        return Ok(FriendRef::Position(position));
    }
    raw.parse::<FriendId>()
        .map(FriendRef::Id)
        .map_err(|_| UiError::input(format!("'{raw}' is neither a list position nor a friend id")))
}

fn resolve(app: &FriendsApp, friend: FriendRef) -> Result<FriendId, UiError> {
    match friend {
        FriendRef::Id(id) => Ok(id),
        FriendRef::Position(position) => position
            .checked_sub(1)
            .and_then(|index| app.friends().get(index))
            .map(|friend| friend.id())
            .ok_or_else(|| {
                UiError::input(format!(
                    "no friend at position {position}; the list has {}",
                    app.friends().len()
                ))
            }),
    }
}

fn edit_notice(edit: FieldEdit, rejected: &str) -> Outcome {
    match edit {
        FieldEdit::Applied => Outcome::Continue,
        FieldEdit::Rejected => Outcome::Notice(rejected.to_string()),
    }
}

pub fn apply(app: &mut FriendsApp, command: Command) -> Result<Outcome, UiError> {
    let split_err = |err: LedgerError| UiError::from_ledger(UiErrorContext::SplitBill, &err);

    match command {
        Command::List => Ok(Outcome::Redraw),
        Command::Help => Ok(Outcome::Help),
        Command::Quit => Ok(Outcome::Quit),
        Command::ToggleAddFriend => {
            app.toggle_add_friend_form();
            Ok(Outcome::Continue)
        }
        Command::Name(name) => {
            app.edit_friend_name(name);
            Ok(Outcome::Continue)
        }
        Command::Image(image) => {
            app.edit_friend_image(image);
            Ok(Outcome::Continue)
        }
        Command::Submit => {
            app.submit_add_friend();
            Ok(Outcome::Continue)
        }
        Command::Select(friend) => {
            let id = resolve(app, friend)?;
            app.select_friend(id)
                .map_err(|err| UiError::from_ledger(UiErrorContext::SelectFriend, &err))?;
            Ok(Outcome::Continue)
        }
        Command::Bill(bill) => {
            let edit = app.set_bill_total(bill).map_err(split_err)?;
            Ok(edit_notice(edit, "bill unchanged"))
        }
        Command::Paid(paid) => {
            let edit = app.set_paid_by_user(paid).map_err(split_err)?;
            Ok(edit_notice(edit, "your expense cannot exceed the bill; kept the previous value"))
        }
        Command::Payer(payer) => {
            let edit = app.set_payer(payer).map_err(split_err)?;
            Ok(edit_notice(edit, "payer unchanged"))
        }
        Command::Split => {
            app.split_bill().map_err(split_err)?;
            Ok(Outcome::Continue)
        }
    }
}
