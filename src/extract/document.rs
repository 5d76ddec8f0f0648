//! Lookups over a parsed listing page. Every query returns `None` on a markup miss.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::debug;

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static B_TAG: Lazy<Selector> = Lazy::new(|| Selector::parse("b").expect("valid selector"));
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("valid selector"));
static SCRIPT: Lazy<Selector> = Lazy::new(|| Selector::parse("script").expect("valid selector"));
static NEXT_DATA: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script#__NEXT_DATA__").expect("valid selector"));

// Matches both `thumbnail: "..."` (JS object) and `"thumbnail":"..."` (JSON)
static THUMBNAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""?thumbnail"?\s*:\s*"([^"]+)""#).expect("valid thumbnail regex")
});

const NEXT_DATA_IMAGE_KEYS: [&str; 2] = ["thumbnail", "imageUrl"];

/// A fetched listing page and the URL it came from.
pub struct Page {
    html: Html,
    url: String,
}

impl Page {
    pub fn parse(bytes: &[u8], url: &str) -> Self {
        let body = String::from_utf8_lossy(bytes);
        Self {
            html: Html::parse_document(&body),
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).next(),
            Err(e) => {
                debug!("Invalid selector {:?}: {:?}", selector, e);
                None
            }
        }
    }

    /// Trimmed text of the first `<title>`.
    pub fn title_text(&self) -> Option<String> {
        self.html
            .select(&TITLE)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string())
    }

    /// `content` of `<meta property=..>` or `<meta name=..>`.
    pub fn meta_content(&self, property: &str) -> Option<String> {
        let selector = format!(r#"meta[property="{property}"], meta[name="{property}"]"#);
        self.select_first(&selector)
            .and_then(|m| m.value().attr("content"))
            .map(str::to_string)
    }

    /// Attribute of the first element matching `selector`.
    pub fn attr(&self, selector: &str, attr: &str) -> Option<String> {
        self.select_first(selector)
            .and_then(|e| e.value().attr(attr))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Text following a `<b>` label, e.g. `<b>Hours:</b> 1,234`.
    pub fn labelled_value(&self, label: &str) -> Option<String> {
        let tag = self
            .html
            .select(&B_TAG)
            .find(|b| b.text().collect::<String>().trim() == label)?;
        let sibling = tag.next_sibling()?;
        let text = match sibling.value().as_text() {
            Some(t) => t.trim().to_string(),
            None => ElementRef::wrap(sibling)?.text().collect(),
        };
        let text = text.trim().to_string();
        (!text.is_empty()).then_some(text)
    }

    /// Image URL from a `thumbnail` key in inline scripts, falling back to
    /// the embedded `__NEXT_DATA__` document.
    pub fn script_thumbnail(&self) -> Option<String> {
        let scripts: String = self
            .html
            .select(&SCRIPT)
            .flat_map(|s| s.text())
            .collect::<Vec<_>>()
            .join("\n");
        THUMBNAIL
            .captures(&scripts)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().replace("\\/", "/"))
            .or_else(|| self.next_data_image())
    }

    fn next_data_image(&self) -> Option<String> {
        let raw: String = self.html.select(&NEXT_DATA).next()?.text().collect();
        let data: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                debug!("Unparseable __NEXT_DATA__ on {}: {}", self.url, e);
                return None;
            }
        };
        find_image_value(&data)
    }

    /// First gallery image whose markup does not mention `skip_marker`.
    pub fn gallery_image(&self, selector: &str, skip_marker: &str) -> Option<String> {
        let sel = Selector::parse(selector).ok()?;
        self.html
            .select(&sel)
            .find(|div| !div.html().contains(skip_marker))
            .and_then(|div| {
                div.select(&IMG)
                    .find_map(|img| img.value().attr("src").map(str::to_string))
                    .or_else(|| last_quoted_value(&div.html()))
            })
            .filter(|v| !v.trim().is_empty())
    }

    /// Resolve protocol- or root-relative image references against the page URL.
    pub fn absolute(&self, reference: &str) -> String {
        let reference = reference.trim();
        if Url::parse(reference).is_ok() {
            return reference.to_string();
        }
        Url::parse(&self.url)
            .and_then(|base| base.join(reference))
            .map(|u| u.to_string())
            .unwrap_or_else(|_| reference.to_string())
    }
}

fn last_quoted_value(markup: &str) -> Option<String> {
    let parts: Vec<&str> = markup.split('"').collect();
    (parts.len() >= 3).then(|| parts[parts.len() - 2].to_string())
}

fn find_image_value(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => {
            for key in NEXT_DATA_IMAGE_KEYS {
                if let Some(Value::String(s)) = map.get(key) {
                    if !s.is_empty() {
                        return Some(s.clone());
                    }
                }
            }
            map.values().find_map(find_image_value)
        }
        Value::Array(items) => items.iter().find_map(find_image_value),
        _ => None,
    }
}

/// Character-based slice dropping `skip_front` leading and `trim_back` trailing characters.
/// Too-short input yields an empty string.
pub fn slice_chars(s: &str, skip_front: usize, trim_back: usize) -> String {
    let count = s.chars().count();
    if skip_front + trim_back >= count {
        return String::new();
    }
    s.chars().skip(skip_front).take(count - skip_front - trim_back).collect()
}
