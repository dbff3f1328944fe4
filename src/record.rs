use serde::{Deserialize, Serialize};

use crate::{Birthday, BookError, Phone};

// Record is a single contact: a name, the phones it can be reached at,
// and optionally a birthday.
// The name is the record's key in an AddressBook and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(try_from = "StoredRecord")]
pub struct Record {
    name: String,
    // Kept in insertion order for display.
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
}

// The stored form of a Record, checked on the way in.
#[derive(Deserialize)]
struct StoredRecord {
    name: String,
    #[serde(default)]
    phones: Vec<Phone>,
    #[serde(default)]
    birthday: Option<Birthday>,
}

impl TryFrom<StoredRecord> for Record {
    type Error = BookError;

    fn try_from(value: StoredRecord) -> Result<Self, Self::Error> {
        let mut rec = Record::new(value.name)?;
        for phone in value.phones {
            if rec.phones.contains(&phone) {
                return Err(BookError::DuplicatePhone(phone.into()));
            }
            rec.phones.push(phone);
        }
        rec.birthday = value.birthday;
        Ok(rec)
    }
}

impl Record {
    pub fn new(name: impl Into<String>) -> Result<Self, BookError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BookError::InvalidFormat("Contact name is empty".into()));
        }
        Ok(Self {
            name,
            phones: vec![],
            birthday: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn add_phone(&mut self, phone: &str) -> Result<(), BookError> {
        let phone: Phone = phone.parse()?;
        if self.phones.contains(&phone) {
            return Err(BookError::DuplicatePhone(phone.into()));
        }
        log::debug!("Adding phone {phone} to {}", self.name);
        self.phones.push(phone);
        Ok(())
    }

    // Replace `old` with `new`, keeping its position.
    // Fails if `new` is malformed, if `old` is not one of this record's
    // phones, or if `new` already belongs to this record under another entry.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<(), BookError> {
        let new: Phone = new.parse()?;
        let Some(idx) = self.phones.iter().position(|p| p == old) else {
            return Err(BookError::NotFound(format!("Phone {old} of {}", self.name)));
        };
        if self.phones[idx] != new && self.phones.contains(&new) {
            return Err(BookError::DuplicatePhone(new.into()));
        }
        log::debug!("Replacing phone {old} with {new} for {}", self.name);
        self.phones[idx] = new;
        Ok(())
    }

    // Removing a phone the record does not have is not an error.
    pub fn remove_phone(&mut self, phone: &str) {
        self.phones.retain(|p| p != phone);
    }

    pub fn find_phone(&self, phone: &str) -> Option<&Phone> {
        self.phones.iter().find(|p| *p == phone)
    }

    // Set the birthday from a DD.MM.YYYY string.
    // Re-submitting the stored date is rejected; a different date replaces it.
    pub fn add_birthday(&mut self, birthday: &str) -> Result<(), BookError> {
        let birthday: Birthday = birthday.parse()?;
        if self.birthday == Some(birthday) {
            return Err(BookError::DuplicateBirthday(birthday.to_string()));
        }
        log::debug!("Setting birthday of {} to {birthday}", self.name);
        self.birthday = Some(birthday);
        Ok(())
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phones = self
            .phones
            .iter()
            .map(Phone::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Contact name: {}, phones: {phones}.", self.name)
    }
}
