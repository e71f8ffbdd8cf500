pub mod block;
pub mod config;
pub mod docx;
pub mod editor;
mod error;
pub mod hierarchy;
pub mod model;
pub mod numbering;
pub mod pagination;
pub mod render;
pub mod structure;

pub use block::{
    Advisor, Block, BlockId, BlockKind, Document, DocumentMetadata, Heading, HeadingLevel,
    TocEntry,
};
pub use config::ExportOptions;
pub use docx::{DocxEncoder, Encoder};
pub use editor::DocumentEditor;
pub use error::Error;
pub use hierarchy::{HierarchyWarning, validate_hierarchy};
pub use numbering::number_headings;
pub use pagination::estimate_pages;
pub use structure::{DocumentStructure, synthesize};

use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_FILE_STEM: &str = "documento";

/// `<title>.docx`, with characters that are not valid in file names replaced.
pub fn export_file_name(metadata: &DocumentMetadata) -> String {
    let stem: String = metadata
        .title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() {
        format!("{DEFAULT_FILE_STEM}.docx")
    } else {
        format!("{stem}.docx")
    }
}

/// Synthesize, render and encode `document`.
///
/// Metadata problems are reported as [`Error::Validation`] before the encoder
/// is called. Any encoder failure comes back as a single [`Error::Export`].
pub fn export_document<E: Encoder + ?Sized>(
    document: &Document,
    options: &ExportOptions,
    encoder: &E,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let structure = structure::synthesize_with(&document.blocks, &options.pagination());
    for warning in validate_hierarchy(&structure.blocks) {
        log::warn!("{warning}");
    }
    let formatted = render::render(
        &document.metadata,
        &structure.blocks,
        &structure.table_of_contents,
        options,
    )?;
    let t_render = t0.elapsed();

    let bytes = encoder.encode(&formatted).map_err(|e| {
        log::error!("Encoding \"{}\" failed: {e}", document.metadata.title);
        Error::Export(e.to_string())
    })?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, encode={:.1}ms, total={:.1}ms ({} blocks, output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        structure.blocks.len(),
        bytes.len(),
    );

    Ok(bytes)
}

/// Export to DOCX on disk. When `output` is a directory the file is named
/// after the document title. Returns the path written.
///
/// Nothing is left behind at `output` if encoding or writing fails.
pub fn export_to_path(
    document: &Document,
    options: &ExportOptions,
    output: &Path,
) -> Result<PathBuf, Error> {
    let path = if output.is_dir() {
        output.join(export_file_name(&document.metadata))
    } else {
        output.to_path_buf()
    };

    let bytes = export_document(document, options, &DocxEncoder::new())?;

    let t0 = Instant::now();
    let partial = path.with_extension("docx.partial");
    if let Err(e) = std::fs::write(&partial, &bytes).and_then(|()| std::fs::rename(&partial, &path)) {
        let _ = std::fs::remove_file(&partial);
        return Err(Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, path.display()),
        )));
    }
    log::info!(
        "Wrote {} in {:.1}ms",
        path.display(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(path)
}
