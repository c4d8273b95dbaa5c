pub mod classify;
pub mod contacts;
pub mod dates;
pub mod documents;
pub mod listing;
pub mod normalize;
pub mod record;

use listing::ListingPage;
use record::Publication;

use crate::pagination::PageInfo;

/// Block-level extraction failure. Fatal for that block only.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no feedback window (\"termen ... N zile\") in body text")]
    MissingFeedbackDays,
    #[error("block has no title")]
    MissingTitle,
}

pub struct ExtractedPage {
    pub publications: Vec<Result<Publication, ExtractError>>,
    pub page_info: Option<PageInfo>,
}

/// Two-pass pipeline: html → listing blocks → publications.
pub fn process_page(html: &str, page_url: &str, institution: &str) -> ExtractedPage {
    let ListingPage { blocks, page_info } = listing::parse_listing(html, page_url);
    let publications = blocks
        .iter()
        .map(|b| record::assemble(b, page_url, institution))
        .collect();

    ExtractedPage {
        publications,
        page_info,
    }
}
