use std::io::{stdout, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crossterm::{
    style::{Attribute, SetAttribute},
    execute,
    tty::IsTty,
};

use crate::specific_fail_str;
use crate::errors::{Error, Result};

pub fn stdout_is_tty() -> bool {
    stdout().is_tty()
}

/// print `bold` followed by `plain`, only bolding when attached to a terminal
pub fn pretty_line(bold: &str, plain: &str, tty: bool) -> Result<()> {
    let mut stdout = stdout();
    if tty {
        execute!(stdout, SetAttribute(Attribute::Bold))?;
    }
    print!("{}", bold);
    if tty {
        execute!(stdout, SetAttribute(Attribute::Reset))?;
    }
    print!("{}", plain);
    stdout.flush()?;
    Ok(())
}

/// expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    let rest = if path == "~" {
        ""
    } else if let Some(r) = path.strip_prefix("~/") {
        r
    } else {
        return Ok(PathBuf::from(path));
    };
    match dirs::home_dir() {
        Some(home) => Ok(if rest.is_empty() { home } else { home.join(rest) }),
        None => specific_fail_str!("failed to find your home directory"),
    }
}

/// modification time of `path` in nanoseconds, used to detect concurrent writers
pub fn file_fingerprint<P: AsRef<Path>>(path: P) -> Result<u128> {
    let path = path.as_ref();
    let metadata = path.metadata().map_err(|e| Error::file_system(e, "stat", path))?;
    let modified = metadata.modified().map_err(|e| Error::file_system(e, "stat", path))?;
    let since_epoch = modified.duration_since(UNIX_EPOCH)?;
    Ok(since_epoch.as_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_home("notes").unwrap(), PathBuf::from("notes"));
        assert_eq!(expand_home("/var/notes").unwrap(), PathBuf::from("/var/notes"));
        assert_eq!(expand_home("~notes").unwrap(), PathBuf::from("~notes"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~").unwrap(), home);
            assert_eq!(expand_home("~/journal").unwrap(), home.join("journal"));
        }
    }

    #[test]
    fn fingerprint_of_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(file_fingerprint(dir.path().join("nope.md")).is_err());
    }

    #[test]
    fn fingerprint_is_stable_without_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2025.md");
        fs::write(&path, "# 01/01/2025\n").unwrap();
        assert_eq!(file_fingerprint(&path).unwrap(), file_fingerprint(&path).unwrap());
    }
}
