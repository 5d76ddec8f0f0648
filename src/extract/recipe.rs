use super::document::{slice_chars, Page};
use super::measure::{compose, find_hours, find_miles, find_number, normalize};
use super::segment::{join_ymm, year_make_model};
use crate::types::{EquipmentRecord, Field, ImageMode};

/// Where a recipe reads the listing title from.
#[derive(Debug, Clone, Copy)]
pub enum TitleSource {
    None,
    /// `<title>` text, cut at `split_on`, then trimmed of fixed-width site boilerplate.
    TitleTag {
        split_on: Option<char>,
        skip_front: usize,
        trim_back: usize,
    },
    Meta { property: &'static str },
    /// First `delimiter`-separated segment of a meta tag's content.
    MetaFirstSegment {
        property: &'static str,
        delimiter: char,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum YmmSource {
    None,
    /// Segment the extracted title.
    SegmentTitle,
    /// `<b>` labelled values.
    Labels {
        year: &'static str,
        make: &'static str,
        model: &'static str,
    },
    /// `<title>` text after `skip_front` chars, split on `delimiter`; needs three parts.
    TitleParts {
        skip_front: usize,
        delimiter: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum MeasureSource {
    None,
    Labels {
        hours: &'static str,
        miles: &'static str,
    },
    /// Regex search over the title and, optionally, a meta tag's content.
    Text { meta: Option<&'static str> },
    /// Miles from the line of a meta tag's content that contains `marker`.
    MetaLine {
        property: &'static str,
        marker: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum ImageSource {
    None,
    Element {
        selector: &'static str,
        attr: &'static str,
    },
    Meta { property: &'static str },
    ScriptThumbnail,
    Gallery {
        selector: &'static str,
        skip_marker: &'static str,
    },
}

/// A site-specific extraction strategy expressed as data.
#[derive(Debug)]
pub struct Recipe {
    pub key: &'static str,
    pub name: &'static str,
    pub fields: &'static [Field],
    pub title: TitleSource,
    pub ymm: YmmSource,
    pub measure: MeasureSource,
    pub image: ImageSource,
}

/// Output of one recipe invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub record: EquipmentRecord,
    /// Absolute image URL, whether or not it was placed in the record.
    pub image_url: Option<String>,
}

impl Recipe {
    /// Columns emitted under `mode`; `Collect` drops the image column.
    pub fn schema(&self, mode: ImageMode) -> Vec<Field> {
        self.fields
            .iter()
            .copied()
            .filter(|f| mode == ImageMode::Formula || *f != Field::Image)
            .collect()
    }

    /// Apply this recipe to a page. Markup misses become empty strings, never errors.
    pub fn extract(&self, page: &Page, mode: ImageMode) -> Extraction {
        let schema = self.schema(mode);
        let mut record = EquipmentRecord::empty(&schema);

        let title = self.title(page);
        if record.contains(Field::Title) {
            record.set(Field::Title, title.clone());
        }
        if record.contains(Field::YearMakeModel) {
            record.set(Field::YearMakeModel, self.year_make_model(page, &title));
        }
        if record.contains(Field::HoursMiles) {
            record.set(Field::HoursMiles, self.hours_miles(page, &title));
        }

        let image_url = self.image(page).map(|src| page.absolute(&src));
        if record.contains(Field::Image) {
            if let Some(url) = &image_url {
                record.set(Field::Image, image_formula(url));
            }
        }

        Extraction { record, image_url }
    }

    fn title(&self, page: &Page) -> String {
        match self.title {
            TitleSource::None => String::new(),
            TitleSource::TitleTag {
                split_on,
                skip_front,
                trim_back,
            } => page
                .title_text()
                .map(|t| {
                    let head = match split_on {
                        Some(d) => t.split(d).next().unwrap_or("").to_string(),
                        None => t,
                    };
                    slice_chars(&head, skip_front, trim_back).trim().to_string()
                })
                .unwrap_or_default(),
            TitleSource::Meta { property } => page
                .meta_content(property)
                .map(|c| c.trim().to_string())
                .unwrap_or_default(),
            TitleSource::MetaFirstSegment {
                property,
                delimiter,
            } => page
                .meta_content(property)
                .and_then(|c| c.split(delimiter).next().map(|s| s.trim().to_string()))
                .unwrap_or_default(),
        }
    }

    fn year_make_model(&self, page: &Page, title: &str) -> String {
        match self.ymm {
            YmmSource::None => String::new(),
            YmmSource::SegmentTitle => year_make_model(title),
            YmmSource::Labels { year, make, model } => {
                let value = |label| page.labelled_value(label).unwrap_or_default();
                join_ymm(&value(year), &value(make), &value(model))
            }
            YmmSource::TitleParts {
                skip_front,
                delimiter,
            } => {
                let text = page
                    .title_text()
                    .map(|t| slice_chars(&t, skip_front, 0))
                    .unwrap_or_default();
                let parts: Vec<&str> = text.split(delimiter).collect();
                if parts.len() >= 3 {
                    join_ymm(parts[0], parts[1], parts[2])
                } else {
                    String::new()
                }
            }
        }
    }

    fn hours_miles(&self, page: &Page, title: &str) -> String {
        match self.measure {
            MeasureSource::None => String::new(),
            MeasureSource::Labels { hours, miles } => {
                let hours = page.labelled_value(hours).and_then(|v| find_number(&v));
                let miles = page.labelled_value(miles).and_then(|v| find_number(&v));
                compose(hours.as_deref(), miles.as_deref())
            }
            MeasureSource::Text { meta } => {
                let mut text = title.to_string();
                if let Some(content) = meta.and_then(|p| page.meta_content(p)) {
                    text.push('\n');
                    text.push_str(&content);
                }
                compose(find_hours(&text).as_deref(), find_miles(&text).as_deref())
            }
            MeasureSource::MetaLine { property, marker } => {
                let miles = page.meta_content(property).and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.contains(marker))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|v| v.trim().to_string())
                        .filter(|v| !v.is_empty())
                });
                match miles {
                    Some(m) => normalize(&format!("{m} MILES")),
                    None => String::new(),
                }
            }
        }
    }

    fn image(&self, page: &Page) -> Option<String> {
        match self.image {
            ImageSource::None => None,
            ImageSource::Element { selector, attr } => page.attr(selector, attr),
            ImageSource::Meta { property } => page
                .meta_content(property)
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            ImageSource::ScriptThumbnail => page.script_thumbnail(),
            ImageSource::Gallery {
                selector,
                skip_marker,
            } => page.gallery_image(selector, skip_marker),
        }
    }
}

/// Spreadsheet cell that renders `url` as an embedded image.
pub fn image_formula(url: &str) -> String {
    format!("=IMAGE(\"{url}\")")
}
