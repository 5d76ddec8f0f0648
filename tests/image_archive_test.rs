mod common;

use common::{og_page, urls, FakeHttp};
use equipment_scraper::output::{build_image_archive, write_csv, ArchiveNaming};
use equipment_scraper::pipeline::BatchDriver;
use equipment_scraper::registry::RecipeRegistry;
use equipment_scraper::sites::SiteId;
use equipment_scraper::types::{BatchResult, Field, ImageMode};
use std::io::Cursor;

const LISTINGS: [&str; 5] = [
    "https://wausau.example.com/lot/1",
    "https://wausau.example.com/lot/2",
    "https://wausau.example.com/lot/3",
    "https://wausau.example.com/lot/4",
    "https://wausau.example.com/lot/5",
];

/// Five listings; the third has no image markup.
fn fixture() -> FakeHttp {
    let mut http = FakeHttp::new();
    for (i, url) in LISTINGS.iter().enumerate() {
        let n = i + 1;
        let image_url = format!("https://img.example.com/{n}.jpg");
        let image = (n != 3).then_some(image_url.as_str());
        http = http
            .with(url, og_page(&format!("201{n} Kubota KX0{n}, {n}00 Hours"), image))
            .with(&image_url, format!("jpeg-bytes-{n}"));
    }
    http
}

async fn collect(http: &FakeHttp) -> BatchResult {
    let recipe = RecipeRegistry::new().resolve(SiteId::Wausau).unwrap();
    BatchDriver::new(http, SiteId::Wausau, recipe, ImageMode::Collect)
        .run(&urls(&LISTINGS), None)
        .await
}

fn entry_names(bytes: Vec<u8>) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[tokio::test]
async fn missing_image_compacts_the_archive() {
    let http = fixture();
    let result = collect(&http).await;

    assert!(!result.schema.contains(&Field::Image));
    assert_eq!(result.records.len(), 5);
    let rows: Vec<usize> = result.images.iter().map(|i| i.row).collect();
    assert_eq!(rows, vec![1, 2, 4, 5]);

    let mut buf = Cursor::new(Vec::new());
    let summary = build_image_archive(&result.images, &http, ArchiveNaming::Sequential, &mut buf)
        .await
        .unwrap();
    assert_eq!(summary.written, 4);
    assert_eq!(summary.skipped, 0);

    // image_3.jpg holds row 4's picture: numbering follows collection order
    let names = entry_names(buf.into_inner());
    assert_eq!(names, vec!["image_1.jpg", "image_2.jpg", "image_3.jpg", "image_4.jpg"]);

    let mut csv = Vec::new();
    write_csv(&result.schema, &result.records, &mut csv).unwrap();
    let text = String::from_utf8(csv).unwrap();
    assert_eq!(text.lines().count(), 6);
    assert!(text.lines().nth(3).unwrap().starts_with("2013 Kubota KX03"));
}

#[tokio::test]
async fn row_naming_keeps_spreadsheet_alignment() {
    let http = fixture();
    let result = collect(&http).await;

    let mut buf = Cursor::new(Vec::new());
    build_image_archive(&result.images, &http, ArchiveNaming::Row, &mut buf)
        .await
        .unwrap();

    let names = entry_names(buf.into_inner());
    assert_eq!(names, vec!["image_1.jpg", "image_2.jpg", "image_4.jpg", "image_5.jpg"]);
}

#[tokio::test]
async fn failed_download_is_skipped() {
    let http = fixture();
    let mut result = collect(&http).await;
    result.images[1].url = "https://img.example.com/gone.jpg".to_string();

    let mut buf = Cursor::new(Vec::new());
    let summary = build_image_archive(&result.images, &http, ArchiveNaming::Sequential, &mut buf)
        .await
        .unwrap();

    assert_eq!(summary.written, 3);
    assert_eq!(summary.skipped, 1);
    let names = entry_names(buf.into_inner());
    assert_eq!(names, vec!["image_1.jpg", "image_3.jpg", "image_4.jpg"]);
}
