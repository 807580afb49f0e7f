//! Status page scraping.
//!
//! Everything that depends on the layout of the status page lives here, so a
//! site redesign shows up as a [`ParseError`] from one function.

use crate::domain::model::{CaseStatus, StatusBlock};
use crate::utils::error::ParseError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static RESULTS_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.rows.text-center").expect("valid selector"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid selector"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));
static SITE_ERRORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#formErrorMessages").expect("valid selector"));

static FORM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Form ([^,]+),").expect("valid regex"));
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:As of|On) ([A-Z][a-z]+ \d{1,2}, \d{4}),").expect("valid regex")
});

/// Pull the results block out of a raw status page.
pub fn parse_status_page(html: &str) -> Result<StatusBlock, ParseError> {
    let doc = Html::parse_document(html);

    let block = doc
        .select(&RESULTS_BLOCK)
        .next()
        .ok_or_else(|| ParseError::MissingStatusBlock {
            site_message: doc.select(&SITE_ERRORS).next().and_then(element_text),
        })?;

    let summary = block
        .select(&HEADING)
        .next()
        .map(|h| element_text(h).unwrap_or_default())
        .ok_or(ParseError::MissingElement { element: "h1" })?;
    let description = block
        .select(&PARAGRAPH)
        .next()
        .map(|p| element_text(p).unwrap_or_default())
        .ok_or(ParseError::MissingElement { element: "p" })?;

    Ok(StatusBlock {
        summary,
        description,
    })
}

/// Form number mentioned in the description, e.g. `I-765`.
pub fn extract_form(description: &str) -> Option<String> {
    FORM_RE
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Date of the last case action, e.g. `March 3, 2021`.
pub fn extract_last_update(description: &str) -> Option<String> {
    DATE_RE
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

impl From<StatusBlock> for CaseStatus {
    fn from(block: StatusBlock) -> Self {
        Self {
            form: extract_form(&block.description),
            last_update: extract_last_update(&block.description),
            summary: block.summary,
            description: block.description,
        }
    }
}

/// Collapsed visible text of an element, `None` when it is blank.
fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
