use std::collections::BTreeSet;
use std::num::IntErrorKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Invalid page number or range: '{term}'")]
    Parse { term: String },

    #[error("Page range {term} is reversed (first page is after last page)")]
    Reversed { term: String },

    #[error("{} {term} is out of bounds (1-{total})", term_label(.term))]
    OutOfBounds { term: String, total: u32 },

    #[error("No pages specified")]
    EmptySelection,
}

fn term_label(term: &str) -> &'static str {
    if term.contains('-') {
        "Page range"
    } else {
        "Page"
    }
}

/// A single comma-separated term, still 1-indexed as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    pub start: u64,
    pub end: Option<u64>,
}

/// Parse one page number. Numbers too large for any document saturate so
/// they fail the bounds check instead of the syntax check.
fn parse_page_number(token: &str) -> Option<u64> {
    match token.trim().parse::<u64>() {
        Ok(n) => Some(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}

impl PageRange {
    /// Parse a term like "5" or "2-7"
    pub fn parse(s: &str) -> Result<Self, RangeError> {
        let s = s.trim();
        let parse_err = || RangeError::Parse { term: s.to_string() };

        if let Some((start_str, end_str)) = s.split_once('-') {
            // "1-2-3" has a second hyphen in end_str and fails to parse below
            let start = parse_page_number(start_str).ok_or_else(parse_err)?;
            let end = parse_page_number(end_str).ok_or_else(parse_err)?;
            Ok(PageRange {
                start,
                end: Some(end),
            })
        } else {
            let page = parse_page_number(s).ok_or_else(parse_err)?;
            Ok(PageRange {
                start: page,
                end: None,
            })
        }
    }

    /// Expand into zero-indexed page positions, checked against `total_pages`.
    ///
    /// `term` is the text reported back to the user on failure.
    pub fn expand(
        &self,
        term: &str,
        total_pages: u32,
    ) -> Result<std::ops::RangeInclusive<u32>, RangeError> {
        let total = u64::from(total_pages);
        let end = self.end.unwrap_or(self.start);

        if self.start == 0 || self.start > total || end == 0 || end > total {
            return Err(RangeError::OutOfBounds {
                term: term.to_string(),
                total: total_pages,
            });
        }

        if self.start > end {
            return Err(RangeError::Reversed {
                term: term.to_string(),
            });
        }

        // both bounds are now within u32
        Ok(self.start as u32 - 1..=end as u32 - 1)
    }
}

/// Set of zero-indexed page positions within a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    pub fn all(total_pages: u32) -> Self {
        PageSelection {
            pages: (0..total_pages).collect(),
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        self.pages.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Zero-indexed positions in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }

    /// 1-based page numbers in ascending order, as lopdf numbers pages
    pub fn page_numbers(&self) -> Vec<u32> {
        self.iter().map(|index| index + 1).collect()
    }
}

impl FromIterator<u32> for PageSelection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        PageSelection {
            pages: iter.into_iter().collect(),
        }
    }
}

/// Resolve a page range expression like "1,3,5-7" against a document with
/// `total_pages` pages.
///
/// An absent expression, or "all" in any letter case, selects every page.
pub fn resolve(expression: Option<&str>, total_pages: u32) -> Result<PageSelection, RangeError> {
    let expression = match expression {
        Some(e) if !e.trim().eq_ignore_ascii_case("all") => e,
        _ => return Ok(PageSelection::all(total_pages)),
    };

    let mut pages = BTreeSet::new();
    for part in expression.split(',') {
        let term = part.trim();
        let range = PageRange::parse(term)?;
        pages.extend(range.expand(term, total_pages)?);
    }

    Ok(PageSelection { pages })
}
