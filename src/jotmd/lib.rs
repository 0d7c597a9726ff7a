pub mod args;
pub mod date;
pub mod entry;
pub mod errors;
pub mod utils;
pub mod yearfile;

use clap::Parser;
use args::Cli;
use date::{Clock, SystemClock};
use entry::Entry;
use errors::Result;
use yearfile::{Appended, NoteWriter};

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let appended = add_note(&cli, &SystemClock)?;
    if !cli.quiet {
        utils::pretty_line("Appended",
                           &format!(" {} line(s) to {}\n", appended.lines, appended.path.display()),
                           utils::stdout_is_tty())?;
    }
    Ok(())
}

/// resolve the date and notes dir from `cli` and write one entry
pub fn add_note<C: Clock + ?Sized>(cli: &Cli, clock: &C) -> Result<Appended> {
    // an invalid date fails before anything touches the disk
    let date = date::resolve_date(cli.date.as_deref(), clock)?;
    let notes_dir = utils::expand_home(&cli.notes_dir)?;
    let entry = Entry::new(&cli.message, cli.tags.as_slice());

    let writer = NoteWriter::new(notes_dir);
    log::debug!("writing {} line(s) for {} under {}",
                entry.lines().len(), date, writer.notes_dir().display());
    writer.append(&date, &entry)
}
