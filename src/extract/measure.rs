//! Hours/miles search and the shared normalization pass.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// A number is only taken when it does not continue an earlier number
static MEASUREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^|[^\d.,])(\d[\d,]*(?:\.\d+)?)\s*(hours|hour|hrs|hr|miles|mile)\b")
        .expect("valid measurement regex")
});

static HOURS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^\d.,])(\d[\d,]*(?:\.\d+)?)\s*(?:hours|hour|hrs|hr)\b")
        .expect("valid hours regex")
});

static MILES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^\d.,])(\d[\d,]*(?:\.\d+)?)\s*(?:miles|mile)\b")
        .expect("valid miles regex")
});

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("valid number regex"));

/// First number followed by an hours unit.
pub fn find_hours(text: &str) -> Option<String> {
    first_capture(&HOURS, text)
}

/// First number followed by a miles unit.
pub fn find_miles(text: &str) -> Option<String> {
    first_capture(&MILES, text)
}

/// First bare number in a labelled value such as `"1,234 hrs"`.
pub fn find_number(text: &str) -> Option<String> {
    NUMBER
        .find(text)
        .map(|m| m.as_str().trim_end_matches(',').to_string())
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_end_matches(',').to_string())
}

/// Render the `Hours/Miles` cell from optional values.
pub fn compose(hours: Option<&str>, miles: Option<&str>) -> String {
    let hours = hours.map(str::trim).filter(|s| !s.is_empty());
    let miles = miles.map(str::trim).filter(|s| !s.is_empty());
    let composed = match (hours, miles) {
        (Some(h), Some(m)) => format!("{h} HOURS, {m} MILES"),
        (Some(h), None) => format!("{h} HOURS"),
        (None, Some(m)) => format!("{m} MILES"),
        (None, None) => String::new(),
    };
    normalize(&composed)
}

/// Rewrite every `<number> <unit>` as a rounded, comma-grouped integer with an
/// upper-case `HOURS`/`MILES` unit. Text around the measurements is kept.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    MEASUREMENT
        .replace_all(s, |caps: &Captures| {
            let digits: String = caps[2].chars().filter(|c| *c != ',').collect();
            let value = digits.parse::<f64>().map(f64::round).unwrap_or(0.0);
            let unit = if caps[3].to_ascii_lowercase().starts_with('h') {
                "HOURS"
            } else {
                "MILES"
            };
            format!("{}{} {}", &caps[1], group_thousands(value as u64), unit)
        })
        .into_owned()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_units_in_free_text() {
        let text = "2018 John Deere 8345R, 1200 Hours, runs well";
        assert_eq!(find_hours(text).as_deref(), Some("1200"));
        assert_eq!(find_miles(text), None);
        assert_eq!(find_miles("Odometer 123,456 mi, 98,000 Miles").as_deref(), Some("98,000"));
        assert_eq!(find_hours("4,512 hrs.").as_deref(), Some("4,512"));
    }

    #[test]
    fn labelled_value_number() {
        assert_eq!(find_number("1,234 hrs").as_deref(), Some("1,234"));
        assert_eq!(find_number("N/A"), None);
    }

    #[test]
    fn compose_covers_every_combination() {
        assert_eq!(compose(Some("1200"), Some("45000")), "1,200 HOURS, 45,000 MILES");
        assert_eq!(compose(Some("450"), None), "450 HOURS");
        assert_eq!(compose(None, Some("98,000")), "98,000 MILES");
        assert_eq!(compose(None, Some("  ")), "");
        assert_eq!(compose(None, None), "");
    }

    #[test]
    fn normalize_rounds_and_groups() {
        assert_eq!(normalize("1234.6 HOURS"), "1,235 HOURS");
        assert_eq!(normalize("1,2,34 hrs"), "1,234 HOURS");
        assert_eq!(normalize("1000000 miles"), "1,000,000 MILES");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("no numbers here"), "no numbers here");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "",
            "1,200 HOURS",
            "1200 Hours, 450 Miles",
            "0.5 hr",
            "1.2.3 hours",
            "a1200hours and 7 mile",
            "99999999999999999999999 hours",
            "5,1200 hours",
            "1 hours-2 hours",
            "1200, hours",
            "N/A HOURS",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
