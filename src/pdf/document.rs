use anyhow::{Context, Result};
use lopdf::{dictionary, Document, Object, ObjectId};
use std::collections::HashSet;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::page_range::PageSelection;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        log::debug!(
            "loaded {} ({} objects, {} pages)",
            path_str,
            doc.objects.len(),
            doc.get_pages().len()
        );
        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs in document order
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Effective clockwise rotation of a page in degrees, honouring a
    /// `/Rotate` inherited from the page tree.
    pub fn page_rotation(&self, page_id: ObjectId) -> i64 {
        let value = match inherited_attribute(&self.doc, page_id, b"Rotate") {
            Some(Object::Reference(id)) => self.doc.get_object(id).ok().cloned(),
            other => other,
        };
        value
            .and_then(|v| v.as_float().ok())
            .map(|degrees| degrees.round() as i64)
            .unwrap_or(0)
    }

    /// Rotate the selected pages clockwise by `angle` degrees, on top of any
    /// rotation they already carry. Returns the 1-based numbers of the
    /// rotated pages in document order.
    pub fn rotate_pages(&mut self, selection: &PageSelection, angle: i64) -> Result<Vec<u32>> {
        let mut rotated = Vec::new();

        for (page_num, page_id) in self.page_ids() {
            if !selection.contains(page_num - 1) {
                continue;
            }

            let current = self.page_rotation(page_id);
            let new_rotation = (current + angle).rem_euclid(360);
            log::debug!("page {}: rotation {} -> {}", page_num, current, new_rotation);

            self.doc
                .get_dictionary_mut(page_id)
                .with_context(|| format!("Page {} of {} is not a dictionary", page_num, self.path))?
                .set("Rotate", Object::Integer(new_rotation));
            rotated.push(page_num);
        }

        Ok(rotated)
    }

    /// Remove every page outside `selection`, leaving the kept pages in
    /// ascending order.
    pub fn keep_pages(&mut self, selection: &PageSelection) -> Result<()> {
        debug_assert!(selection.iter().all(|index| index < self.page_count()));

        let pages_to_delete: Vec<u32> = self
            .page_ids()
            .iter()
            .filter(|(num, _)| !selection.contains(num - 1))
            .map(|(num, _)| *num)
            .collect();

        if !pages_to_delete.is_empty() {
            self.doc.delete_pages(&pages_to_delete);
            let pruned = self.doc.prune_objects();
            log::debug!(
                "deleted {} page(s), pruned {} unreachable object(s)",
                pages_to_delete.len(),
                pruned.len()
            );
        }

        Ok(())
    }

    /// Concatenate the pages of `documents`, in order, into a new document.
    pub fn merge(documents: Vec<PdfDocument>) -> Result<PdfDocument> {
        let mut merged = Document::with_version("1.5");
        let mut kids: Vec<ObjectId> = Vec::new();

        for source in documents {
            let mut doc = source.doc;
            doc.renumber_objects_with(merged.max_id + 1);

            for (_, page_id) in doc.get_pages() {
                flatten_inherited_attributes(&mut doc, page_id).with_context(|| {
                    format!("Failed to read page tree of {}", source.path)
                })?;
                kids.push(page_id);
            }

            let top_id = doc.objects.keys().map(|(id, _)| *id).max().unwrap_or(0);
            merged.max_id = merged.max_id.max(top_id);
            log::debug!(
                "appending {} object(s) from {}",
                doc.objects.len(),
                source.path
            );
            merged.objects.extend(doc.objects);
        }

        let pages_id = merged.new_object_id();
        for &kid in &kids {
            merged
                .get_dictionary_mut(kid)
                .context("Merged page is not a dictionary")?
                .set("Parent", Object::Reference(pages_id));
        }

        let kid_refs: Vec<Object> = kids.iter().map(|id| Object::Reference(*id)).collect();
        merged.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kid_refs,
                "Count" => kids.len() as i64,
            }),
        );

        let catalog_id = merged.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        merged.trailer.set("Root", Object::Reference(catalog_id));

        // the source catalogs and page-tree nodes are no longer referenced
        let pruned = merged.prune_objects();
        log::debug!("pruned {} unreachable object(s)", pruned.len());

        Ok(PdfDocument {
            doc: merged,
            path: "merged document".to_string(),
        })
    }

    /// Save to a file.
    ///
    /// The document is written to a temporary file next to `path` and
    /// renamed into place once fully serialized.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(".pdfkeep-").suffix(".pdf");
        // created with 0666 so the umask applies, as for a plain create
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }

        let mut tmp = builder
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create output in {}", dir.display()))?;

        // overwriting keeps the existing file's permissions
        if let Ok(existing) = std::fs::metadata(path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
        }

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            self.doc
                .save_to(&mut writer)
                .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
            writer
                .flush()
                .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
        }

        tmp.persist(path)
            .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

/// Look up `key` on a page, walking up through its `/Parent` chain.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut visited = HashSet::new();
    let mut current = Some(page_id);

    while let Some(id) = current {
        // malformed files can loop
        if !visited.insert(id) {
            break;
        }
        let dict = doc.get_dictionary(id).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}

/// Copy inheritable attributes onto the page itself so it no longer depends
/// on its original page tree.
fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let inherited: Vec<(&[u8], Object)> = INHERITABLE_ATTRIBUTES
        .iter()
        .filter_map(|key| inherited_attribute(doc, page_id, key).map(|value| (*key, value)))
        .collect();

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in inherited {
        if !page.has(key) {
            page.set(key, value);
        }
    }

    Ok(())
}
