use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::normalize::strip_diacritics;

/// Everything after "pentru"/"privind" is free-form justification.
static CONNECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pentru|privind").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PublicationType {
    Lege,
    Hg,
    Og,
    Oug,
    Om,
    Other,
}

impl PublicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationType::Lege => "LEGE",
            PublicationType::Hg => "HG",
            PublicationType::Og => "OG",
            PublicationType::Oug => "OUG",
            PublicationType::Om => "OM",
            PublicationType::Other => "OTHER",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "LEGE" => Some(PublicationType::Lege),
            "HG" => Some(PublicationType::Hg),
            "OG" => Some(PublicationType::Og),
            "OUG" => Some(PublicationType::Oug),
            "OM" => Some(PublicationType::Om),
            "OTHER" => Some(PublicationType::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered: a longer phrase must come before any shorter one it contains.
pub const TYPE_RULES: &[(&str, PublicationType)] = &[
    ("lege", PublicationType::Lege),
    ("hotarare de guvern", PublicationType::Hg),
    ("hotarare a guvernului", PublicationType::Hg),
    ("hotarare", PublicationType::Hg),
    ("hg", PublicationType::Hg),
    ("ordonanta de guvern", PublicationType::Og),
    ("ordonanta de urgenta", PublicationType::Oug),
    ("ordin de ministru", PublicationType::Om),
    ("ordinul", PublicationType::Om),
    ("ordin", PublicationType::Om),
    ("ordonanta", PublicationType::Og),
];

/// Best-guess type of an initiative from its description: first rule whose
/// search string occurs in the text wins, `Other` when none does.
pub fn guess_type(text: &str, rules: &[(&str, PublicationType)]) -> PublicationType {
    let text = strip_diacritics(text).to_lowercase();
    rules
        .iter()
        .find(|(search, _)| text.contains(search))
        .map(|(_, kind)| *kind)
        .unwrap_or(PublicationType::Other)
}

/// Classify a title using only the part before the first connector word.
pub fn classify_title(title: &str, rules: &[(&str, PublicationType)]) -> PublicationType {
    let text = strip_diacritics(title).to_lowercase();
    let head = match CONNECTOR_RE.find(&text) {
        Some(m) => &text[..m.start()],
        None => text.as_str(),
    };
    guess_type(head, rules)
}
