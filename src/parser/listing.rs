use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::pagination::PageInfo;

static PANEL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".panel").unwrap());
static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.panel-title").unwrap());
static BODY_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.panel-body").unwrap());
static PDF_LINK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href*=".pdf"]"#).unwrap());
static PAGINATION_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".pt-cv-pagination").unwrap());

/// One listing entry as found on the page, before any interpretation.
#[derive(Debug, Clone, Default)]
pub struct ListingBlock {
    pub title: Option<String>,
    pub body_text: String,
    pub doc_labels: Vec<String>,
    pub doc_urls: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ListingPage {
    pub blocks: Vec<ListingBlock>,
    pub page_info: Option<PageInfo>,
}

pub fn parse_listing(html: &str, page_url: &str) -> ListingPage {
    let doc = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    let blocks = doc
        .select(&PANEL_SEL)
        .map(|panel| read_block(panel, base.as_ref()))
        .collect();

    ListingPage {
        blocks,
        page_info: read_page_info(&doc),
    }
}

fn read_block(panel: ElementRef, base: Option<&Url>) -> ListingBlock {
    let title = panel
        .select(&TITLE_SEL)
        .next()
        .map(|a| a.text().collect::<String>().trim().to_string());

    let mut body_text = String::new();
    let mut doc_labels = Vec::new();
    let mut doc_urls = Vec::new();

    for body in panel.select(&BODY_SEL) {
        body_text.extend(body.text());

        // Labels and hrefs are gathered separately; an anchor without a text
        // node of its own contributes a url but no label.
        for a in body.select(&PDF_LINK_SEL) {
            doc_labels.extend(
                a.children()
                    .filter_map(|n| n.value().as_text())
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            );
            if let Some(href) = a.value().attr("href") {
                doc_urls.push(resolve(base, href));
            }
        }
    }

    ListingBlock {
        title,
        body_text,
        doc_labels,
        doc_urls,
    }
}

fn resolve(base: Option<&Url>, href: &str) -> String {
    base.and_then(|b| b.join(href.trim()).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| href.to_string())
}

fn read_page_info(doc: &Html) -> Option<PageInfo> {
    let el = doc.select(&PAGINATION_SEL).next()?;
    let attr = |name: &str| -> Option<u32> { el.value().attr(name)?.trim().parse().ok() };
    Some(PageInfo {
        current: attr("data-currentpage")?,
        total: attr("data-totalpages")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "http://www.ms.ro/acte-normative-in-transparenta/?vpage=2";

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn listing_fixture_blocks() {
        let page = parse_listing(&fixture("listing"), PAGE_URL);
        assert_eq!(page.blocks.len(), 4);

        let first = &page.blocks[0];
        assert_eq!(
            first.title.as_deref(),
            Some("Proiect de Hotărâre de Guvern privind aprobarea Normelor metodologice")
        );
        assert!(first.body_text.contains("de la 05-03-2020"));
        assert_eq!(first.doc_labels, vec!["Proiect HG", "Nota de fundamentare"]);
        assert_eq!(
            first.doc_urls,
            vec![
                "http://www.ms.ro/wp-content/uploads/2020/03/proiect-hg.pdf",
                "http://www.ms.ro/wp-content/uploads/2020/03/nota.pdf",
            ]
        );
    }

    #[test]
    fn icon_only_anchor_has_url_but_no_label() {
        let page = parse_listing(&fixture("listing"), PAGE_URL);
        let third = &page.blocks[2];
        assert_eq!(third.doc_labels.len(), 1);
        assert_eq!(third.doc_urls.len(), 2);
    }

    #[test]
    fn whitespace_only_anchor_text_is_not_a_label() {
        let html = r#"<div class="panel"><a class="panel-title">Proiect</a>
            <div class="panel-body">termen 10 zile
            <a href="/a.pdf">
                <img src="pdf.png">
            </a>
            <a href="/b.pdf"> Referat </a></div></div>"#;
        let page = parse_listing(html, PAGE_URL);
        let block = &page.blocks[0];
        assert_eq!(block.doc_labels, vec!["Referat"]);
        assert_eq!(
            block.doc_urls,
            vec!["http://www.ms.ro/a.pdf", "http://www.ms.ro/b.pdf"]
        );
    }

    #[test]
    fn non_pdf_links_are_ignored() {
        let page = parse_listing(&fixture("listing"), PAGE_URL);
        let second = &page.blocks[1];
        assert!(second.doc_urls.iter().all(|u| u.ends_with(".pdf")));
        assert_eq!(second.doc_urls.len(), 1);
    }

    #[test]
    fn page_info() {
        let page = parse_listing(&fixture("listing"), PAGE_URL);
        assert_eq!(page.page_info, Some(PageInfo { current: 2, total: 5 }));
    }

    #[test]
    fn missing_pagination_and_title() {
        let html = r#"<div class="panel"><div class="panel-body">termen 10 zile</div></div>"#;
        let page = parse_listing(html, PAGE_URL);
        assert_eq!(page.page_info, None);
        assert_eq!(page.blocks.len(), 1);
        assert!(page.blocks[0].title.is_none());
    }
}
