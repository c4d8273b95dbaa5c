use url::Url;

/// Page counters as advertised by the listing's pagination widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pagination {
    HasNext { page: u32, url: String },
    Done,
}

impl PageInfo {
    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    /// Decide where to go after the page at `url`. The next url is the
    /// current one with the `param` query value set to `current + 1`.
    pub fn step(&self, url: &str, param: &str) -> Pagination {
        if !self.has_next() {
            return Pagination::Done;
        }
        let page = self.current + 1;
        Pagination::HasNext {
            page,
            url: with_page(url, param, page),
        }
    }
}

/// Set (or append) the page query parameter. Every other query segment is
/// kept byte for byte, encoding and bare keys included. Urls that do not
/// parse fall back to swapping the page number text.
pub fn with_page(url: &str, param: &str, page: u32) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return substitute_page_number(url, page);
    };

    let page_segment = format!("{}={}", param, page);
    let mut found = false;
    let mut segments: Vec<String> = parsed
        .query()
        .filter(|q| !q.is_empty())
        .map(|q| {
            q.split('&')
                .map(|seg| {
                    let key = seg.split_once('=').map_or(seg, |(k, _)| k);
                    if key == param {
                        found = true;
                        page_segment.clone()
                    } else {
                        seg.to_string()
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    if !found {
        segments.push(page_segment);
    }
    parsed.set_query(Some(&segments.join("&")));
    parsed.to_string()
}

fn substitute_page_number(url: &str, next: u32) -> String {
    let current = next.saturating_sub(1).to_string();
    match url.rfind(&current) {
        Some(pos) => format!("{}{}{}", &url[..pos], next, &url[pos + current.len()..]),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = "http://www.ms.ro/acte-normative-in-transparenta/?vpage=2";

    #[test]
    fn has_next_until_last_page() {
        let info = PageInfo { current: 2, total: 5 };
        assert!(info.has_next());
        assert_eq!(
            info.step(INDEX, "vpage"),
            Pagination::HasNext {
                page: 3,
                url: "http://www.ms.ro/acte-normative-in-transparenta/?vpage=3".to_string(),
            }
        );
    }

    #[test]
    fn done_on_last_page() {
        let info = PageInfo { current: 5, total: 5 };
        assert!(!info.has_next());
        assert_eq!(info.step(INDEX, "vpage"), Pagination::Done);
    }

    #[test]
    fn done_past_last_page() {
        let info = PageInfo { current: 7, total: 5 };
        assert_eq!(info.step(INDEX, "vpage"), Pagination::Done);
    }

    #[test]
    fn page_number_elsewhere_in_url_untouched() {
        // literal substitution would have rewritten the "2" in the year too
        let url = "http://www.ms.ro/2022/anunturi/?vpage=2&an=2022";
        assert_eq!(
            with_page(url, "vpage", 3),
            "http://www.ms.ro/2022/anunturi/?vpage=3&an=2022"
        );
    }

    #[test]
    fn sibling_params_keep_their_encoding() {
        assert_eq!(
            with_page("http://www.ms.ro/acte/?vpage=2&q=a%20b&flag", "vpage", 3),
            "http://www.ms.ro/acte/?vpage=3&q=a%20b&flag"
        );
        assert_eq!(
            with_page("http://www.ms.ro/acte/?q=a%20b&flag", "vpage", 2),
            "http://www.ms.ro/acte/?q=a%20b&flag&vpage=2"
        );
    }

    #[test]
    fn missing_param_is_appended() {
        assert_eq!(
            with_page("http://www.ms.ro/acte-normative-in-transparenta/", "vpage", 2),
            "http://www.ms.ro/acte-normative-in-transparenta/?vpage=2"
        );
    }

    #[test]
    fn unparseable_url_falls_back_to_text_swap() {
        assert_eq!(with_page("listing?vpage=4", "vpage", 5), "listing?vpage=5");
    }
}
