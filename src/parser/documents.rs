use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub label: String,
    pub url: String,
}

/// Pair anchor texts with anchor hrefs by position.
///
/// The two lists are extracted independently, so an anchor with no text of
/// its own (an icon-only link) shifts every following label onto the wrong
/// URL. Whitespace-only text inside an anchor does not count as a label, so
/// an icon link padded with spaces or newlines is label-less too. When
/// lengths differ the tail of the longer list is dropped.
pub fn link_documents<S: AsRef<str>>(labels: &[S], urls: &[S]) -> Vec<Document> {
    labels
        .iter()
        .zip(urls)
        .map(|(label, url)| Document {
            label: label.as_ref().trim().to_string(),
            url: url.as_ref().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(label: &str, url: &str) -> Document {
        Document {
            label: label.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn pairs_by_position() {
        let docs = link_documents(&["Proiect", "Referat"], &["u1.pdf", "u2.pdf"]);
        assert_eq!(docs, vec![doc("Proiect", "u1.pdf"), doc("Referat", "u2.pdf")]);
    }

    #[test]
    fn extra_label_dropped() {
        let docs = link_documents(&["A", "B", "C"], &["u1", "u2"]);
        assert_eq!(docs, vec![doc("A", "u1"), doc("B", "u2")]);
    }

    #[test]
    fn extra_url_dropped() {
        let docs = link_documents(&["A"], &["u1", "u2"]);
        assert_eq!(docs, vec![doc("A", "u1")]);
    }

    #[test]
    fn icon_only_link_misaligns_following_pairs() {
        // Known limitation: the first anchor has no text, so "Referat" lands
        // on the first url and "Nota" on the second.
        let labels = ["Referat", "Nota"];
        let urls = ["proiect.pdf", "referat.pdf", "nota.pdf"];
        let docs = link_documents(&labels, &urls);
        assert_eq!(docs, vec![doc("Referat", "proiect.pdf"), doc("Nota", "referat.pdf")]);
    }

    #[test]
    fn serialized_label_is_type() {
        let json = serde_json::to_string(&doc("Proiect", "u.pdf")).unwrap();
        assert_eq!(json, r#"{"type":"Proiect","url":"u.pdf"}"#);
    }
}
