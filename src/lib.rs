pub mod birthday;
pub mod book;
pub mod command;
pub mod config;
pub mod data;
pub mod error;
pub mod phone;
pub mod record;

pub use birthday::*;
pub use book::*;
pub use command::*;
pub use config::*;
pub use data::*;
pub use error::*;
pub use phone::*;
pub use record::*;

use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::PathBuf;

pub const APP_NAME: &'static str = env!("CARGO_PKG_NAME");

// Database is where the address book lives between sessions.
// Each Data type is a single file under the root directory:
// - $root/ (typically XDG_DATA_HOME/addrbook)
//   - addressbook.json
#[derive(Debug)]
pub struct Database {
    dir: PathBuf,
}

impl Database {
    // Create a new database at the given root directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Database> {
        Ok(Database { dir: dir.into() })
    }

    pub fn path<T: Data>(&self) -> PathBuf {
        self.dir.join(T::FILE)
    }

    // Replace the stored item with `data`.
    // The new content is written next to the old file and then renamed over it,
    // so an interrupted save leaves the previous snapshot intact.
    pub fn save<T: Data>(&self, data: &T) -> Result<()> {
        let path = self.path::<T>();
        log::debug!("Saving to {path:?}");
        fs::create_dir_all(
            path.parent()
                .ok_or_else(|| anyhow!("No parent path: {path:?}"))?,
        )?;
        let tmp = path.with_extension("tmp");
        let file = fs::File::create(&tmp).with_context(|| format!("Open {tmp:?}"))?;
        let mut writer = BufWriter::new(&file);
        data.save(&mut writer)?;
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp, &path).with_context(|| format!("Rename {tmp:?} to {path:?}"))?;
        Ok(())
    }

    // Load the stored item, or None if nothing has been saved yet.
    pub fn load<T: Data>(&self) -> Result<Option<T>> {
        let path = self.path::<T>();
        log::debug!("Loading {path:?}");
        let file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                bail!("Failed to open '{path:?}': {e}")
            }
        };
        let reader = BufReader::new(file);
        let data = T::load(reader).with_context(|| format!("Loading {path:?}"))?;
        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn setup() -> (Database, tempfile::TempDir) {
        let _ = env_logger::try_init();
        let tmp = tempfile::tempdir().unwrap();
        let data = Database::new(tmp.path().join("addrbook")).unwrap();
        (data, tmp)
    }

    fn sample() -> AddressBook {
        let mut john = Record::new("John").unwrap();
        john.add_phone("1111111111").unwrap();
        john.add_phone("2222222222").unwrap();
        john.add_birthday("12.06.1990").unwrap();
        let mut jane = Record::new("Jane").unwrap();
        jane.add_phone("3333333333").unwrap();

        let mut book = AddressBook::new();
        book.add_record(john);
        book.add_record(jane);
        book
    }

    #[test]
    fn test_load_book_not_exists() {
        let (data, _tmp) = setup();
        let actual = data.load::<AddressBook>().unwrap();
        assert!(actual.is_none());
    }

    #[test]
    fn test_save_load_book() {
        let (data, _tmp) = setup();
        let book = sample();
        data.save(&book).unwrap();
        let actual: AddressBook = data.load().unwrap().unwrap();
        assert_eq!(actual, book);
    }

    #[test]
    fn test_save_overwrites() {
        let (data, _tmp) = setup();
        data.save(&sample()).unwrap();
        let mut book = sample();
        book.delete("John").unwrap();
        data.save(&book).unwrap();
        let actual: AddressBook = data.load().unwrap().unwrap();
        assert_eq!(actual, book);
        assert!(!data.path::<AddressBook>().with_extension("tmp").exists());
    }

    #[test]
    fn test_save_book_format() {
        let (data, _tmp) = setup();
        data.save(&sample()).unwrap();
        let res = fs::read_to_string(data.path::<AddressBook>()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&res).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "name": "John",
                    "phones": ["1111111111", "2222222222"],
                    "birthday": "12.06.1990",
                },
                {
                    "name": "Jane",
                    "phones": ["3333333333"],
                    "birthday": null,
                },
            ])
        );
    }

    #[test]
    fn test_load_corrupt_book() {
        let (data, _tmp) = setup();
        let path = data.path::<AddressBook>();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        assert!(data.load::<AddressBook>().is_err());
    }
}
