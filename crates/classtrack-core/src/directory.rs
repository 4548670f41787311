//! Staff and room directories used to enrich timetable entries.
//!
//! The portal only mentions teachers and rooms by short code inside a free
//! text title line, e.g. `"11 MATHS (Maths) - MC1 - JSM"`. A code matches
//! only as a whole word, so `MC1` is not found inside `MC10`.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A staff member as listed by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Display code, e.g. `JSM`.
    pub code: String,
    /// Full name.
    pub name: String,
}

/// A teaching location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub code: String,
    pub name: String,
}

/// Lookup tables for names mentioned in title lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Directory {
    pub fn new(staff: Vec<StaffMember>, rooms: Vec<Room>) -> Self {
        Self { staff, rooms }
    }

    /// Full name of the first staff member whose code appears in `line`.
    pub fn resolve_teacher(&self, line: &str) -> Option<&str> {
        self.staff
            .iter()
            .find(|member| contains_word(line, &member.code))
            .map(|member| member.name.as_str())
    }

    /// Name of the first room whose code or name appears in `line`.
    pub fn resolve_room(&self, line: &str) -> Option<&str> {
        self.rooms
            .iter()
            .find(|room| contains_word(line, &room.code) || contains_word(line, &room.name))
            .map(|room| room.name.as_str())
    }

    /// `"<room> | <teacher>"` from whichever parts resolve.
    pub fn describe(&self, line: &str) -> Option<String> {
        let parts: Vec<&str> = [self.resolve_room(line), self.resolve_teacher(line)]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// True if `word` occurs in `haystack` bounded by non-word characters or
/// the ends of the text.
pub fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    Regex::new(&format!(r"(^|\W){}(\W|$)", regex::escape(word)))
        .is_ok_and(|pattern| pattern.is_match(haystack))
}
