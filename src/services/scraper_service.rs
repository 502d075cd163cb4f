use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use reqwest::header::CONTENT_TYPE;
use scraper::{ElementRef, Html, Selector};

use crate::errors::ScrapeError;

/// Regions tried in order; the first one present in the document wins.
const CONTENT_REGIONS: [&str; 3] = ["main", "article", "body"];

/// Elements whose text is never shown to a reader.
const HIDDEN_TAGS: [&str; 6] = ["script", "style", "noscript", "template", "head", "svg"];

/// Fetches the reference page and reduces it to plain text.
pub struct ScraperService {
    client: reqwest::Client,
}

impl ScraperService {
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("refchat-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScrapeError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Single GET of `url`, then main-content extraction.
    ///
    /// Network failures and non-2xx statuses come back as `Err`; they are
    /// logged here and never panic.
    pub async fn fetch_reference_content(&self, url: &str) -> Result<String, ScrapeError> {
        log::info!("Fetching reference content from {}", url);

        match self.fetch_html(url).await {
            Ok(html) => match extract_main_text(&html) {
                Some(text) => {
                    log::info!(
                        "Reference content extracted successfully ({} characters)",
                        text.chars().count()
                    );
                    Ok(text)
                }
                None => {
                    log::error!("Reference page at {} has no readable text", url);
                    Err(ScrapeError::EmptyContent)
                }
            },
            Err(e) => {
                log::error!("Failed to fetch reference page {}: {}", url, e);
                Err(e)
            }
        }
    }

    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let header_charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_param);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScrapeError::Body(e.to_string()))?;

        Ok(decode_html(&bytes, header_charset.as_deref()))
    }
}

/// Decodes a page body. The header charset wins, then the document's own
/// `<meta>` declaration, then UTF-8.
pub fn decode_html(bytes: &[u8], header_charset: Option<&str>) -> String {
    let label = header_charset
        .map(str::to_string)
        .or_else(|| meta_charset(bytes));

    let encoding = label
        .and_then(|l| Encoding::for_label(l.as_bytes()))
        .unwrap_or(UTF_8);
    if encoding != UTF_8 {
        log::debug!("Decoding reference page as {}", encoding.name());
    }

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("Reference page had bytes invalid for {}", encoding.name());
    }
    text.into_owned()
}

/// Charset declared by `<meta charset>` or `<meta http-equiv="Content-Type">`.
fn meta_charset(bytes: &[u8]) -> Option<String> {
    let doc = Html::parse_document(&String::from_utf8_lossy(bytes));
    let sel = Selector::parse("meta").ok()?;

    doc.select(&sel).find_map(|meta| {
        let el = meta.value();
        if let Some(charset) = el.attr("charset") {
            return Some(charset.trim().to_string());
        }
        match el.attr("http-equiv") {
            Some(equiv) if equiv.eq_ignore_ascii_case("content-type") => {
                el.attr("content").and_then(charset_param)
            }
            _ => None,
        }
    })
}

/// `charset` parameter of a `Content-Type` value, unquoted.
fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches(&['"', '\''][..]);
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

/// Picks `<main>`, else `<article>`, else `<body>` and returns its visible
/// text, one trimmed fragment per line. `None` when nothing readable is left.
pub fn extract_main_text(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    let region = CONTENT_REGIONS.iter().find_map(|tag| {
        let sel = Selector::parse(tag).ok()?;
        doc.select(&sel).next()
    })?;

    let mut fragments = Vec::new();
    collect_visible_text(region, &mut fragments);

    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join("\n"))
    }
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            if !HIDDEN_TAGS.contains(&child_el.value().name()) {
                collect_visible_text(child_el, out);
            }
        } else if let Some(text) = child.value().as_text() {
            let fragment = normalize_whitespace(text);
            if !fragment.is_empty() {
                out.push(fragment);
            }
        }
    }
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
