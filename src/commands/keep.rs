use crate::commands::{display_name, ensure_pdf};
use crate::page_range::{resolve, RangeError};
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: Option<&str>, output: Q) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    ensure_pdf(input)?;
    let pages = match pages {
        Some(p) if !p.trim().is_empty() => p,
        _ => return Err(RangeError::EmptySelection.into()),
    };

    let mut doc = PdfDocument::open(input)?;
    let total_pages = doc.page_count();

    let selection = resolve(Some(pages), total_pages)?;
    if selection.is_empty() {
        return Err(RangeError::EmptySelection.into());
    }

    println!(
        "Keeping {} of {} page(s) from {}...",
        selection.len(),
        total_pages,
        display_name(input)
    );
    for page_num in selection.page_numbers() {
        println!("  Keeping page {}", page_num);
    }

    doc.keep_pages(&selection)?;

    println!("Writing to: {}", output.display());
    doc.save(output)?;

    println!(
        "Extracted {} page(s) to {}",
        selection.len(),
        output.display()
    );

    Ok(())
}
