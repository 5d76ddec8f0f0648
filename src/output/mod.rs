//! Spreadsheet and image archive assembly.

pub mod archive;
pub mod spreadsheet;

pub use archive::{build_image_archive, create_archive_file, ArchiveNaming, ArchiveSummary};
pub use spreadsheet::{template_output_path, write_csv, write_xlsx, write_xlsx_from_template};
