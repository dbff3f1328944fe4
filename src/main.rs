use addrbook::{AddressBook, Config, Database, Reply, Session, APP_NAME, CONFIG_FILE};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};

// Interactive address book. Type `hello` to start and `exit` to save and quit.
#[derive(Parser)]
#[command(version, about)]
struct Cli {}

fn main() -> Result<()> {
    env_logger::init();
    let _ = Cli::parse();

    let dirs = xdg::BaseDirectories::with_prefix(APP_NAME)?;
    let config = match dirs.find_config_file(CONFIG_FILE) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    log::debug!("Using {config:?}");

    let data = Database::new(
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| dirs.get_data_home()),
    )?;
    let book: AddressBook = data.load()?.unwrap_or_default();
    let mut session = Session::new(book);
    session.birthday_window = config.birthday_window;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut buf = Vec::new();
    println!("Welcome to the assistant bot!");
    loop {
        print!("Enter a command: ");
        stdout.flush()?;
        buf.clear();
        if input.read_until(b'\n', &mut buf).context("Reading command")? == 0 {
            log::debug!("End of input");
            println!();
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(['\n', '\r']),
            Err(e) => {
                log::warn!("Ignoring input that is not UTF-8: {e}");
                println!("Invalid command.");
                continue;
            }
        };
        let today = chrono::Local::now().date_naive();
        match session.handle(line, today) {
            Reply::Message(msg) => println!("{msg}"),
            Reply::Exit => break,
        }
    }

    println!("Good bye!");
    data.save(&session.book)
}
