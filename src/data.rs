use anyhow::Result;

// A type that can be stored in the Database.
pub trait Data: Sized {
    // The name of the file, relative to the database root, holding this type.
    const FILE: &'static str;

    // Load an item from a reader.
    fn load(r: impl std::io::BufRead) -> Result<Self>;

    // Save an item to a writer.
    fn save(&self, w: &mut impl std::io::Write) -> Result<()>;
}
