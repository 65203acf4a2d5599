use crate::commands::{display_name, ensure_pdf};
use crate::error::InputError;
use crate::page_range::resolve;
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

/// Clockwise angles a page may be turned by.
pub const ANGLES: [i64; 3] = [90, 180, 270];

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    angle: i64,
    pages: Option<&str>,
) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    ensure_pdf(input)?;
    if !ANGLES.contains(&angle) {
        return Err(InputError::InvalidAngle(angle).into());
    }

    let mut doc = PdfDocument::open(input)?;
    let selection = resolve(pages, doc.page_count())?;
    log::debug!("rotating pages {:?}", selection.page_numbers());

    println!(
        "Rotating {} page(s) by {} degrees in {}...",
        selection.len(),
        angle,
        display_name(input)
    );

    for page_num in doc.rotate_pages(&selection, angle)? {
        println!("  Rotated page {}", page_num);
    }

    println!("Writing rotated PDF to: {}", output.display());
    doc.save(output)?;

    println!("Successfully rotated PDF!");

    Ok(())
}
