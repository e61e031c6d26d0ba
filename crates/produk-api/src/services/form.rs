//! Flat multipart key space
//!
//! A multipart submission is an ordered multimap: a key may legitimately
//! repeat, and repeated structured fields arrive as bracket-indexed flat keys
//! (`gambar[0][path]`, `gambar[1][caption]`). `FormBag` captures the whole key
//! space so the assembler can reconstruct indexed groups without scattering
//! key-matching logic across call sites.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use produk_processing::UploadedFile;
use regex::Regex;

/// `name[index]` shape of a bracket-indexed key, compiled once.
fn indexed_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([^\[\]]+)\[(\d+)\]").expect("indexed key pattern is valid")
    })
}

/// The index under `group` that `key` addresses, if any. Group names match
/// exactly: `gambar` never matches `gambar_lama`.
fn group_index(key: &str, group: &str) -> Option<u64> {
    let caps = indexed_key_pattern().captures(key)?;
    if &caps[1] != group {
        return None;
    }
    caps[2].parse().ok()
}

#[derive(Debug, Clone)]
pub enum FormValue {
    Text(String),
    File(UploadedFile),
}

#[derive(Debug, Default)]
pub struct FormBag {
    entries: Vec<(String, FormValue)>,
}

impl FormBag {
    pub fn push(&mut self, key: String, value: FormValue) {
        self.entries.push((key, value));
    }

    /// First text value under `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|(k, v)| match v {
            FormValue::Text(s) if k == key => Some(s.as_str()),
            _ => None,
        })
    }

    /// First file value under `key`. Blank parts (the zero-byte, no-filename
    /// placeholder a browser sends for an unfilled file input) read as absent.
    pub fn file(&self, key: &str) -> Option<&UploadedFile> {
        self.entries.iter().find_map(|(k, v)| match v {
            FormValue::File(f) if k == key && !f.is_blank() => Some(f),
            _ => None,
        })
    }

    /// Distinct indices observed for a bracket-indexed group, in ascending
    /// numeric order. Transport key order is not guaranteed and never matters:
    /// indices are used for ordering only, so gaps are fine and the output is
    /// a dense sequence.
    pub fn group_indices(&self, group: &str) -> Vec<u64> {
        let mut indices = BTreeSet::new();
        for (key, _) in &self.entries {
            if let Some(idx) = group_index(key, group) {
                indices.insert(idx);
            }
        }
        indices.into_iter().collect()
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.entries
            .iter()
            .any(|(key, _)| group_index(key, group).is_some())
    }
}
