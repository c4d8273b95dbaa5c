use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9_.+-]+@[a-z0-9-]+\.[a-z0-9.-]+").unwrap()
});

// Ten digits starting with 0, not the tail of a longer number.
// Single separators ("0372.309.220", "021 307 2500") are allowed between digits.
static TEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])(0(?:[^0-9]?[0-9]){9})").unwrap()
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub email: BTreeSet<String>,
    pub tel: BTreeSet<String>,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.tel.is_empty()
    }
}

pub fn extract_contacts(text: &str) -> Contact {
    let text = text.trim().to_lowercase();

    let email = EMAIL_RE
        .find_iter(&text)
        .map(|m| m.as_str().trim_end_matches('.').to_string())
        .collect();

    let tel = TEL_RE
        .captures_iter(&text)
        .map(|c| c[1].to_string())
        .collect();

    Contact { email, tel }
}
