use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::{AddressBook, BookError, Record, UPCOMING_WINDOW_DAYS};

// Errors from a single command.
// The Display text of each variant is exactly what the user sees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command.")]
    Unknown(String),

    #[error("Invalid command format.")]
    MissingArgs,

    #[error("That user is not found")]
    UserNotFound(String),

    #[error("There is no contact with name {0}")]
    NoContact(String),

    // Malformed or duplicate phones and birthdays all look like bad input.
    #[error("Invalid command format.")]
    Book(#[from] BookError),
}

// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hello,
    Add { name: String, phone: String },
    Change { name: String, old: String, new: String },
    Phone { name: String },
    All,
    AddBirthday { name: String, birthday: String },
    ShowBirthday { name: String },
    Birthdays,
    Exit,
}

// Commands are a case-insensitive keyword followed by whitespace separated
// arguments. Extra arguments are ignored.
impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(cmd) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };
        let mut arg = || {
            words
                .next()
                .map(str::to_string)
                .ok_or(CommandError::MissingArgs)
        };
        let cmd = cmd.to_lowercase();
        Ok(match cmd.as_str() {
            "hello" => Command::Hello,
            "add" => Command::Add {
                name: arg()?,
                phone: arg()?,
            },
            "change" => Command::Change {
                name: arg()?,
                old: arg()?,
                new: arg()?,
            },
            "phone" => Command::Phone { name: arg()? },
            "all" => Command::All,
            "add-birthday" => Command::AddBirthday {
                name: arg()?,
                birthday: arg()?,
            },
            "show-birthday" => Command::ShowBirthday { name: arg()? },
            "birthdays" => Command::Birthdays,
            "close" | "exit" => Command::Exit,
            other => return Err(CommandError::Unknown(other.to_string())),
        })
    }
}

// What the loop should do after a line has been handled.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Exit,
}

// Session holds the address book for one interactive run.
#[derive(Debug)]
pub struct Session {
    pub book: AddressBook,
    pub birthday_window: u64,
}

impl Session {
    pub fn new(book: AddressBook) -> Self {
        Self {
            book,
            birthday_window: UPCOMING_WINDOW_DAYS,
        }
    }

    // Handle one line of input. Errors become messages; they never end the session.
    pub fn handle(&mut self, line: &str, today: NaiveDate) -> Reply {
        log::trace!("Handling {line:?}");
        let res = line
            .parse::<Command>()
            .and_then(|cmd| self.execute(cmd, today));
        match res {
            Ok(reply) => reply,
            Err(err) => {
                log::debug!("Command {line:?} failed: {err:?}");
                Reply::Message(err.to_string())
            }
        }
    }

    pub fn execute(&mut self, cmd: Command, today: NaiveDate) -> Result<Reply, CommandError> {
        let msg = match cmd {
            Command::Exit => return Ok(Reply::Exit),
            Command::Hello => "How can I help you?".to_string(),
            Command::Add { name, phone } => self.add_contact(name, &phone)?,
            Command::Change { name, old, new } => self.change_contact(&name, &old, &new)?,
            Command::Phone { name } => self.show_phone(&name)?,
            Command::All => self.show_all(),
            Command::AddBirthday { name, birthday } => self.add_birthday(&name, &birthday)?,
            Command::ShowBirthday { name } => self.show_birthday(&name)?,
            Command::Birthdays => self.birthdays(today),
        };
        Ok(Reply::Message(msg))
    }

    fn add_contact(&mut self, name: String, phone: &str) -> Result<String, CommandError> {
        if let Some(rec) = self.book.find_mut(&name) {
            rec.add_phone(phone)?;
            return Ok("Contact updated.".into());
        }
        let mut rec = Record::new(name)?;
        rec.add_phone(phone)?;
        self.book.add_record(rec);
        Ok("Contact added.".into())
    }

    fn change_contact(&mut self, name: &str, old: &str, new: &str) -> Result<String, CommandError> {
        let rec = self
            .book
            .find_mut(name)
            .ok_or_else(|| CommandError::UserNotFound(name.into()))?;
        rec.edit_phone(old, new)?;
        Ok(rec.to_string())
    }

    fn show_phone(&self, name: &str) -> Result<String, CommandError> {
        let rec = self
            .book
            .find(name)
            .ok_or_else(|| CommandError::UserNotFound(name.into()))?;
        Ok(rec.to_string())
    }

    fn show_all(&self) -> String {
        if self.book.is_empty() {
            return "Contact list is empty".into();
        }
        self.book
            .iter()
            .map(|rec| format!("{}: {rec}", rec.name()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn add_birthday(&mut self, name: &str, birthday: &str) -> Result<String, CommandError> {
        let rec = self
            .book
            .find_mut(name)
            .ok_or_else(|| CommandError::NoContact(name.into()))?;
        rec.add_birthday(birthday)?;
        Ok("Birthday added.".into())
    }

    fn show_birthday(&self, name: &str) -> Result<String, CommandError> {
        let rec = self
            .book
            .find(name)
            .ok_or_else(|| CommandError::NoContact(name.into()))?;
        Ok(match rec.birthday() {
            Some(b) => b.to_string(),
            None => format!("There is no birthday added for {name}"),
        })
    }

    fn birthdays(&self, today: NaiveDate) -> String {
        let upcoming = self
            .book
            .upcoming_birthdays_within(today, self.birthday_window);
        if upcoming.is_empty() {
            return "There is no upcoming birthdays".into();
        }
        tabled::Table::new(upcoming).to_string()
    }
}
