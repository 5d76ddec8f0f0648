use crate::error::Result;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read listing URLs from headerless CSV: first column only, blank cells skipped.
pub fn read_urls<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut urls = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(url) = record.get(0).map(str::trim).filter(|s| !s.is_empty()) {
            urls.push(url.to_string());
        }
    }
    debug!("Read {} URLs", urls.len());
    Ok(urls)
}

pub fn read_urls_from_path(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    read_urls(file)
}
