use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// ticket shaped tags, e.g. `DT-1234` or `ABCD-12`
static TICKET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{2,}-[0-9]+$").expect("valid ticket regex")
});

/// indentation of the message line under a ticket bullet
pub static TICKET_INDENT: &'static str = "    ";

/// A normalized (trimmed, uppercased) tag.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Tag {
    /// rendered as a parent bullet with the message nested below
    Ticket(String),
    /// rendered inline as `* TAG: message`
    Plain(String),
}

impl Tag {
    /// normalize and classify a raw tag; blank tags yield `None`
    pub fn parse(raw: &str) -> Option<Tag> {
        let t = raw.trim();
        if t.is_empty() {
            return None;
        }
        let t = t.to_uppercase();
        if TICKET_RE.is_match(&t) {
            Some(Tag::Ticket(t))
        } else {
            Some(Tag::Plain(t))
        }
    }

    pub fn is_ticket(&self) -> bool {
        matches!(*self, Tag::Ticket(_))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tag::Ticket(ref t) | Tag::Plain(ref t) => write!(f, "{}", t),
        }
    }
}

/// One journal entry: a message and the tags it is filed under.
#[derive(Clone, Debug)]
pub struct Entry {
    pub message: String,
    pub tags: Vec<Tag>,
}

impl Entry {
    pub fn new<S: AsRef<str>>(message: &str, raw_tags: &[S]) -> Entry {
        let tags: Vec<Tag> = raw_tags.iter().filter_map(|t| Tag::parse(t.as_ref())).collect();
        for t in tags.iter() {
            log::debug!("tag '{}' classified as {}", t, if t.is_ticket() { "ticket" } else { "plain" });
        }
        Entry {
            message: message.trim().to_string(),
            tags: tags,
        }
    }

    /// render the markdown lines for this entry, in tag order
    pub fn lines(&self) -> Vec<String> {
        if self.tags.is_empty() {
            return vec![bullet(&self.message)];
        }

        let mut lines = Vec::with_capacity(self.tags.len() * 2);
        for tag in self.tags.iter() {
            match *tag {
                Tag::Plain(ref t) => lines.push(bullet(&format!("{}: {}", t, self.message))),
                Tag::Ticket(ref t) => {
                    lines.push(bullet(t));
                    lines.push(format!("{}{}", TICKET_INDENT, bullet(&self.message)));
                }
            }
        }
        lines
    }
}

fn bullet(text: &str) -> String {
    format!("* {}", text).trim_end().to_string()
}
