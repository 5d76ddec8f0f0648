use crate::app::ports::HttpClientPort;
use crate::error::Result;
use crate::types::CollectedImage;
use metrics::counter;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use tracing::{info, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// How archive entries are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveNaming {
    /// `image_<n>.jpg` by position among collected images. Rows without an
    /// image shift every later number, so `n` may not match the spreadsheet row.
    #[default]
    Sequential,
    /// `image_<row>.jpg` by source row.
    Row,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Create the archive file up front so a bad path is reported before any fetch.
pub fn create_archive_file(path: &Path) -> Result<File> {
    let file = File::create(path)?;
    info!("Image archive will be written to {}", path.display());
    Ok(file)
}

/// Download each image and store it in a zip written to `out`.
/// Failed downloads are logged and left out.
pub async fn build_image_archive<W: Write + Seek>(
    images: &[CollectedImage],
    http: &dyn HttpClientPort,
    naming: ArchiveNaming,
    out: W,
) -> Result<ArchiveSummary> {
    let mut zip = ZipWriter::new(out);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut summary = ArchiveSummary::default();

    for (i, image) in images.iter().enumerate() {
        let n = match naming {
            ArchiveNaming::Sequential => i + 1,
            ArchiveNaming::Row => image.row,
        };
        let bytes = match http.get(&image.url).await {
            Ok(resp) => resp.bytes,
            Err(e) => {
                warn!("Skipping image for row {} ({}): {}", image.row, image.url, e);
                counter!("equipment_archive_images_skipped_total").increment(1);
                summary.skipped += 1;
                continue;
            }
        };
        zip.start_file(format!("image_{n}.jpg"), options)?;
        zip.write_all(&bytes)?;
        summary.written += 1;
    }

    zip.finish()?;
    info!(
        "Image archive complete: {} written, {} skipped",
        summary.written, summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScraperError;

    #[test]
    fn archive_file_in_missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_archive_file(&dir.path().join("absent").join("images.zip")).unwrap_err();
        assert!(matches!(err, ScraperError::Io(_)));
        assert!(create_archive_file(&dir.path().join("images.zip")).is_ok());
    }
}
