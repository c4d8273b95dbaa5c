use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::classify::{classify_title, PublicationType, TYPE_RULES};
use super::contacts::{extract_contacts, Contact};
use super::dates::extract_dates;
use super::documents::{link_documents, Document};
use super::listing::ListingBlock;
use super::normalize::strip_diacritics;
use super::ExtractError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Publication {
    pub institution: String,
    pub identifier: String,
    #[serde(rename = "type")]
    pub publication_type: PublicationType,
    pub date: Option<NaiveDate>,
    pub title: String,
    pub description: String,
    pub documents: Vec<Document>,
    pub contact: Contact,
    pub feedback_days: u32,
    pub max_feedback_date: Option<NaiveDate>,
}

/// Dedup key: the page url plus a digest of the raw title.
pub fn identify(title: &str, url: &str) -> String {
    let digest = Sha256::digest(title.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("{} : {}", url, hex)
}

/// Build one publication out of a listing block. Fails as a whole when the
/// block has no title or no feedback window.
pub fn assemble(
    block: &ListingBlock,
    page_url: &str,
    institution: &str,
) -> Result<Publication, ExtractError> {
    let raw_title = block
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ExtractError::MissingTitle)?;
    let title = strip_diacritics(raw_title);
    let publication_type = classify_title(&title, TYPE_RULES);

    let body_text = block.body_text.to_lowercase();
    let description = strip_diacritics(&body_text);
    let dates = extract_dates(&description)?;
    let contact = extract_contacts(&description);
    let documents = link_documents(&block.doc_labels, &block.doc_urls);

    Ok(Publication {
        institution: institution.to_string(),
        identifier: identify(raw_title, page_url),
        publication_type,
        date: dates.date,
        title,
        description,
        documents,
        contact,
        feedback_days: dates.feedback_days,
        max_feedback_date: dates.max_feedback_date,
    })
}
