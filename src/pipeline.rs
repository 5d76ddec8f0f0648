use crate::app::ports::{HttpClientPort, Progress};
use crate::error::ScraperError;
use crate::extract::{Page, Recipe};
use crate::sites::SiteId;
use crate::types::{BatchResult, CollectedImage, EquipmentRecord, ImageMode, ItemFailure};
use metrics::counter;
use tracing::{debug, info, instrument, warn};

/// Runs one recipe over a list of listing URLs, one at a time.
pub struct BatchDriver<'a> {
    http: &'a dyn HttpClientPort,
    site: SiteId,
    recipe: &'static Recipe,
    mode: ImageMode,
}

impl<'a> BatchDriver<'a> {
    /// `site` labels logs and metrics; aliases sharing a recipe stay distinct.
    pub fn new(
        http: &'a dyn HttpClientPort,
        site: SiteId,
        recipe: &'static Recipe,
        mode: ImageMode,
    ) -> Self {
        Self {
            http,
            site,
            recipe,
            mode,
        }
    }

    /// Fetch, parse and extract every URL in order.
    ///
    /// A URL that cannot be fetched yields an empty placeholder record and an
    /// [`ItemFailure`]; the batch always runs to completion. `progress` receives
    /// `(i + 1) / n` after every item, ending at exactly 1.0.
    #[instrument(skip_all, fields(site = %self.site, recipe = self.recipe.key, urls = urls.len()))]
    pub async fn run(
        &self,
        urls: &[String],
        mut progress: Option<&mut dyn Progress>,
    ) -> BatchResult {
        let schema = self.recipe.schema(self.mode);
        let total = urls.len();
        let mut result = BatchResult {
            schema: schema.clone(),
            ..BatchResult::default()
        };

        info!("Starting batch of {} URLs with recipe {}", total, self.recipe.name);

        for (i, url) in urls.iter().enumerate() {
            let row = i + 1;
            match self.process(url).await {
                Ok((record, image_url)) => {
                    if self.mode == ImageMode::Collect {
                        match image_url {
                            Some(url) => {
                                counter!("equipment_images_collected_total", "site" => self.site.label())
                                    .increment(1);
                                result.images.push(CollectedImage { row, url });
                            }
                            None => debug!("No image found for row {}", row),
                        }
                    }
                    result.records.push(record);
                }
                Err(e) => {
                    warn!("Row {} ({}) failed: {}", row, url, e);
                    counter!("equipment_url_failures_total", "site" => self.site.label())
                        .increment(1);
                    result.records.push(EquipmentRecord::empty(&schema));
                    result.failures.push(ItemFailure {
                        row,
                        url: url.clone(),
                        error: e.to_string(),
                    });
                }
            }
            counter!("equipment_urls_processed_total", "site" => self.site.label()).increment(1);

            if let Some(sink) = progress.as_deref_mut() {
                sink.update(row as f64 / total as f64);
            }
        }

        info!(
            "Batch finished: {} rows, {} failures, {} images",
            result.records.len(),
            result.failures.len(),
            result.images.len()
        );
        result
    }

    async fn process(
        &self,
        url: &str,
    ) -> Result<(EquipmentRecord, Option<String>), ScraperError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ScraperError::Fetch {
                url: String::new(),
                message: "empty URL".to_string(),
            });
        }
        let response = self.http.get(url).await?;
        // Parsing happens after the await; the parsed document is not Send
        let page = Page::parse(&response.bytes, url);
        let extraction = self.recipe.extract(&page, self.mode);
        debug!("Extracted row from {}", page.url());
        Ok((extraction.record, extraction.image_url))
    }
}
