/// Split a listing title into `(year, make, model)`.
///
/// Token 0 is the year only when it is all ASCII digits; token 1 is always the make.
/// The model is everything after the make, or after the last repeat of the make
/// when the title names it twice ("2019 Kubota Kubota SVL75").
/// Never fails: short or empty titles produce empty parts.
pub fn segment(title: &str) -> (String, String, String) {
    let tokens: Vec<&str> = title.split_whitespace().collect();

    let year = tokens
        .first()
        .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
        .map(|t| t.to_string())
        .unwrap_or_default();

    let make = tokens.get(1).map(|t| t.to_string()).unwrap_or_default();

    let rest = tokens.get(2..).unwrap_or(&[]);
    let model_start = rest
        .iter()
        .rposition(|t| !make.is_empty() && t.eq_ignore_ascii_case(&make))
        .map(|i| i + 1)
        .unwrap_or(0);
    let model = rest[model_start..].join(" ");

    (year, make, model)
}

/// Join non-empty parts with single spaces.
pub fn join_ymm(year: &str, make: &str, model: &str) -> String {
    [year, make, model]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `segment` followed by `join_ymm`.
pub fn year_make_model(title: &str) -> String {
    let (year, make, model) = segment(title);
    join_ymm(&year, &make, &model)
}
