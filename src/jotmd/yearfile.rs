// std lib imports
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;

// jotmd imports
use crate::date::NoteDate;
use crate::entry::Entry;
use crate::errors::{Error, Result};
use crate::utils::file_fingerprint;

/// any date section header, e.g. `# 08/14/2025`
static DATE_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#\s+\d{2}/\d{2}/\d{4}\s*$").expect("valid date header regex")
});

/// What a single append did to the notes directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Appended {
    pub path: PathBuf,
    pub lines: usize,
    pub created_file: bool,
    pub created_section: bool,
}

/// Writes entries into `<notes_dir>/<year>.md`, one date section per day.
pub struct NoteWriter {
    notes_dir: PathBuf,
}

impl NoteWriter {
    pub fn new<P: Into<PathBuf>>(notes_dir: P) -> NoteWriter {
        NoteWriter { notes_dir: notes_dir.into() }
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn year_path(&self, date: &NoteDate) -> PathBuf {
        self.notes_dir.join(format!("{}.md", date.year()))
    }

    /// create the notes directory (and parents) if it is missing
    pub fn ensure_dir(&self) -> Result<()> {
        if self.notes_dir.exists() {
            if !self.notes_dir.is_dir() {
                return Err(Error::file_system(io::Error::other("not a directory"),
                                              "use notes directory",
                                              &self.notes_dir));
            }
            return Ok(());
        }
        fs::create_dir_all(&self.notes_dir)
            .map_err(|e| Error::file_system(e, "create", &self.notes_dir))?;
        log::info!("created notes directory {}", self.notes_dir.display());
        Ok(())
    }

    /// file `entry` under `date`, creating the year file and date section as needed
    pub fn append(&self, date: &NoteDate, entry: &Entry) -> Result<Appended> {
        self.ensure_dir()?;
        let path = self.year_path(date);
        let header = date.header();
        let lines = entry.lines();

        if !path.exists() {
            let content = section(&header, &lines, "\n");
            self.create_year_file(&path, &content)?;
            log::info!("created {} with section {}", path.display(), header);
            return Ok(Appended {
                path: path,
                lines: lines.len(),
                created_file: true,
                created_section: true,
            });
        }

        let fingerprint = file_fingerprint(&path)?;
        let content = fs::read_to_string(&path).map_err(|e| Error::file_system(e, "read", &path))?;
        let (updated, created_section) = insert_entry(&content, &header, &lines);
        self.replace_year_file(&path, &updated, fingerprint)?;

        if created_section {
            log::info!("appended section {} to {}", header, path.display());
        } else {
            log::info!("appended {} line(s) under {} in {}", lines.len(), header, path.display());
        }
        Ok(Appended {
            path: path,
            lines: lines.len(),
            created_file: false,
            created_section: created_section,
        })
    }

    fn create_year_file(&self, path: &Path, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => Error::concurrent_modification(path),
                _ => Error::file_system(e, "create", path),
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| Error::file_system(e, "write", path))?;
        Ok(())
    }

    /// write `content` beside the year file and rename it over, unless the file
    /// changed since it was read. A symlinked year file is written through.
    fn replace_year_file(&self, path: &Path, content: &str, fingerprint: u128) -> Result<()> {
        let target = fs::canonicalize(path).map_err(|e| Error::file_system(e, "resolve", path))?;
        let dir = target.parent().unwrap_or(self.notes_dir.as_path());
        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| Error::file_system(e, "create temporary file in", dir))?;
        if let Err(e) = tmp.write_all(content.as_bytes()) {
            return Err(Error::file_system(e, "write", tmp.path()));
        }

        let perms = fs::metadata(&target)
            .map_err(|e| Error::file_system(e, "stat", &target))?
            .permissions();
        tmp.as_file()
            .set_permissions(perms)
            .map_err(|e| Error::file_system(e, "set permissions on", tmp.path()))?;

        check_unchanged(&target, fingerprint)?;
        tmp.persist(&target).map_err(|e| Error::file_system(e.error, "write", &target))?;
        Ok(())
    }
}

fn check_unchanged(path: &Path, fingerprint: u128) -> Result<()> {
    let current = file_fingerprint(path)?;
    log::debug!("fingerprint of {}: read {} now {}", path.display(), fingerprint, current);
    if current != fingerprint {
        return Err(Error::concurrent_modification(path));
    }
    Ok(())
}

/// header line followed by the entry lines, each ended by `eol`
fn section(header: &str, lines: &[String], eol: &str) -> String {
    let mut s = format!("# {}{}", header, eol);
    for l in lines {
        s.push_str(l);
        s.push_str(eol);
    }
    s
}

/// line ending to use after `seg`: its own, or the file's when `seg` has none
fn line_ending(seg: &str, content: &str) -> &'static str {
    let crlf = if seg.ends_with('\n') {
        seg.ends_with("\r\n")
    } else {
        content.contains("\r\n")
    };
    if crlf { "\r\n" } else { "\n" }
}

fn is_header_for(line: &str, header: &str) -> bool {
    let line = line.trim_end_matches(['\n', '\r']);
    match line.strip_prefix('#') {
        Some(rest) => rest.starts_with(char::is_whitespace) && rest.trim() == header,
        None => false,
    }
}

/// Insert `lines` into the section for `header`, or append a new section at the end.
///
/// Returns the new content and whether a section was created. Bytes outside the
/// insertion point are left as they were.
pub fn insert_entry(content: &str, header: &str, lines: &[String]) -> (String, bool) {
    if content.is_empty() {
        return (section(header, lines, "\n"), true);
    }

    let segs: Vec<&str> = content.split_inclusive('\n').collect();
    let start = match segs.iter().position(|l| is_header_for(l, header)) {
        Some(i) => i,
        None => {
            let last = segs[segs.len() - 1];
            let eol = line_ending(last, content);
            let mut out = String::with_capacity(content.len() + 64);
            out.push_str(content);
            if !last.ends_with('\n') {
                out.push_str(eol);
            }
            out.push_str(eol);
            out.push_str(&section(header, lines, eol));
            return (out, true);
        }
    };

    let end = segs[start + 1..]
        .iter()
        .position(|l| DATE_HEADER_RE.is_match(l.trim_end_matches(['\n', '\r'])))
        .map(|p| start + 1 + p)
        .unwrap_or(segs.len());
    // trailing blank lines separate sections, new entries go above them
    let last = (start..end)
        .rev()
        .find(|&i| !segs[i].trim().is_empty())
        .unwrap_or(start);
    let offset: usize = segs[..=last].iter().map(|l| l.len()).sum();

    let eol = line_ending(segs[last], content);
    let mut insert = String::new();
    if !segs[last].ends_with('\n') {
        insert.push_str(eol);
    }
    for l in lines {
        insert.push_str(l);
        insert.push_str(eol);
    }

    let mut out = String::with_capacity(content.len() + insert.len());
    out.push_str(&content[..offset]);
    out.push_str(&insert);
    out.push_str(&content[offset..]);
    (out, false)
}
