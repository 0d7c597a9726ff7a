use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "jotmd")]
#[command(version)]
#[command(about = "Append date-scoped markdown notes into <YEAR>.md files.", long_about = None)]
pub struct Cli {
    /// The note message text
    pub message: String,

    /// Tag to prefix or group the note by (repeatable). Ticket-like tags
    /// (e.g. DT-1234) nest the message under "* DT-1234"; other tags
    /// (e.g. CHRIS) render as "* CHRIS: message"
    #[arg(short, long = "tag", value_name = "TAG", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Backdate in YYYY-MM-DD, MM/DD/YYYY, or MMDDYYYY. Default: today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Directory where <YEAR>.md lives
    #[arg(short, long, value_name = "PATH", default_value = "notes")]
    pub notes_dir: String,

    /// More log output on stderr (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not print the confirmation line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["jotmd", "hello"]).unwrap();
        assert_eq!(cli.message, "hello");
        assert!(cli.tags.is_empty());
        assert_eq!(cli.date, None);
        assert_eq!(cli.notes_dir, "notes");
        assert_eq!(cli.log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn repeated_tags_keep_order() {
        let cli = Cli::try_parse_from(["jotmd", "msg", "-t", "CHRIS", "--tag", "DT-1234",
                                       "-d", "08142025", "-n", "/tmp/j", "-vv"])
            .unwrap();
        assert_eq!(cli.tags, vec!["CHRIS", "DT-1234"]);
        assert_eq!(cli.date.as_deref(), Some("08142025"));
        assert_eq!(cli.notes_dir, "/tmp/j");
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn message_is_required() {
        assert!(Cli::try_parse_from(["jotmd"]).is_err());
    }
}
