use crate::commands::ensure_pdf;
use crate::error::InputError;
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(inputs: &[P], output: Q) -> Result<()> {
    let output = output.as_ref();

    if inputs.len() < 2 {
        return Err(InputError::TooFewInputs(inputs.len()).into());
    }
    for input in inputs {
        ensure_pdf(input)?;
    }

    println!("Merging {} PDF files...", inputs.len());
    let mut documents = Vec::with_capacity(inputs.len());
    for input in inputs {
        println!("  Adding: {}", input.as_ref().display());
        documents.push(PdfDocument::open(input)?);
    }

    let mut merged = PdfDocument::merge(documents)?;
    let total_pages = merged.page_count();

    println!("Writing merged PDF to: {}", output.display());
    merged.save(output)?;

    println!(
        "Merged {} files ({} pages) into {}",
        inputs.len(),
        total_pages,
        output.display()
    );

    Ok(())
}
