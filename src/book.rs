use anyhow::{Context, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{birthday::DATE_FORMAT, BookError, Data, Record};

// How many days ahead `upcoming_birthdays` looks by default.
pub const UPCOMING_WINDOW_DAYS: u64 = 7;

// A birthday coming up soon, and the day to congratulate on.
// Weekend birthdays are congratulated on the following Monday.
#[derive(Debug, Clone, PartialEq, Eq, tabled::Tabled)]
pub struct UpcomingBirthday {
    pub name: String,
    #[tabled(display_with = "ddmmyyyy")]
    pub birthday: NaiveDate,
    #[tabled(display_with = "ddmmyyyy")]
    pub congratulation_date: NaiveDate,
}

fn ddmmyyyy(d: &NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

// AddressBook owns every Record, keyed by the record's name.
// Records are kept in the order they were first added.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(from = "Vec<Record>", into = "Vec<Record>")]
pub struct AddressBook {
    records: IndexMap<String, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    // Insert `record` under its name.
    // An existing record with the same name is replaced in place.
    pub fn add_record(&mut self, record: Record) {
        let name = record.name().to_string();
        log::debug!("Adding record {name}");
        if self.records.insert(name, record).is_some() {
            log::debug!("Replaced an existing record");
        }
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    pub fn delete(&mut self, name: &str) -> Result<Record, BookError> {
        let rec = self
            .records
            .shift_remove(name)
            .ok_or_else(|| BookError::NotFound(format!("Record {name}")))?;
        log::debug!("Deleted record {name}");
        Ok(rec)
    }

    // Birthdays falling within a week of `today`, inclusive.
    pub fn upcoming_birthdays(&self, today: NaiveDate) -> Vec<UpcomingBirthday> {
        self.upcoming_birthdays_within(today, UPCOMING_WINDOW_DAYS)
    }

    // Birthdays whose next occurrence is between `today` and `today + days`,
    // inclusive, in address book order.
    pub fn upcoming_birthdays_within(&self, today: NaiveDate, days: u64) -> Vec<UpcomingBirthday> {
        let last = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        self.records
            .values()
            .filter_map(|rec| {
                let birthday = rec.birthday()?;
                let Some(next) = birthday.next_occurrence(today) else {
                    log::warn!("No anniversary of {birthday} after {today}");
                    return None;
                };
                if next > last {
                    return None;
                }
                log::trace!("{} has a birthday on {next}", rec.name());
                Some(UpcomingBirthday {
                    name: rec.name().to_string(),
                    birthday: birthday.date(),
                    congratulation_date: congratulation_date(next),
                })
            })
            .collect()
    }
}

// Shift a weekend date forward to the following Monday.
fn congratulation_date(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => {
            let shift = 7 - date.weekday().num_days_from_monday();
            date.checked_add_days(Days::new(shift.into())).unwrap_or(date)
        }
        _ => date,
    }
}

impl From<Vec<Record>> for AddressBook {
    fn from(records: Vec<Record>) -> Self {
        let mut book = AddressBook::new();
        for rec in records {
            book.add_record(rec);
        }
        book
    }
}

impl From<AddressBook> for Vec<Record> {
    fn from(book: AddressBook) -> Self {
        book.records.into_values().collect()
    }
}

impl Data for AddressBook {
    const FILE: &'static str = "addressbook.json";

    fn load(r: impl std::io::BufRead) -> Result<Self> {
        let book: AddressBook = serde_json::from_reader(r).context("Parsing address book")?;
        log::debug!("Loaded {} records", book.len());
        Ok(book)
    }

    fn save(&self, w: &mut impl std::io::Write) -> Result<()> {
        log::debug!("Saving {} records", self.len());
        serde_json::to_writer_pretty(&mut *w, self)?;
        writeln!(w)?;
        Ok(())
    }
}
