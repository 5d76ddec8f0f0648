//! Built-in site recipes. Offsets and selectors are fixed per site family.

use super::recipe::{ImageSource, MeasureSource, Recipe, TitleSource, YmmSource};
use crate::constants::{
    ASSITER_RECIPE, FASTLINE_RECIPE, KERR_GROUP_RECIPE, PROXI_BID_RECIPE, WAUSAU_RECIPE,
};
use crate::types::Field;

/// `<title>` carries fixed-width boilerplate on both ends ("Used - ... Fastline").
pub static FASTLINE: Recipe = Recipe {
    key: FASTLINE_RECIPE,
    name: "Fastline",
    fields: &[Field::Title, Field::YearMakeModel, Field::HoursMiles, Field::Image],
    title: TitleSource::TitleTag {
        split_on: None,
        skip_front: 7,
        trim_back: 8,
    },
    ymm: YmmSource::Labels {
        year: "Year:",
        make: "Make:",
        model: "Model:",
    },
    measure: MeasureSource::Labels {
        hours: "Hours:",
        miles: "Mileage:",
    },
    image: ImageSource::Element {
        selector: r#"div.item[data-index="0"] img"#,
        attr: "src",
    },
};

pub static PROXI_BID: Recipe = Recipe {
    key: PROXI_BID_RECIPE,
    name: "Proxi_Bid",
    fields: &[Field::Title, Field::YearMakeModel, Field::HoursMiles, Field::Image],
    title: TitleSource::TitleTag {
        split_on: Some('|'),
        skip_front: 7,
        trim_back: 0,
    },
    ymm: YmmSource::SegmentTitle,
    measure: MeasureSource::Text {
        meta: Some("og:description"),
    },
    image: ImageSource::ScriptThumbnail,
};

pub static ASSITER: Recipe = Recipe {
    key: ASSITER_RECIPE,
    name: "Assiter",
    fields: &[Field::YearMakeModel, Field::HoursMiles, Field::Image],
    title: TitleSource::None,
    ymm: YmmSource::TitleParts {
        skip_front: 22,
        delimiter: "  ",
    },
    measure: MeasureSource::MetaLine {
        property: "og:description",
        marker: "Odo Reads",
    },
    image: ImageSource::Gallery {
        selector: "div.image-gallery-image",
        skip_marker: "play-button",
    },
};

/// Shared by the Kerr, Mowrey, Witcher and Ritchason dealer sites.
pub static KERR_GROUP: Recipe = Recipe {
    key: KERR_GROUP_RECIPE,
    name: "Kerr/Mowrey/Witcher/Ritchason",
    fields: &[Field::Title, Field::YearMakeModel, Field::Image],
    title: TitleSource::Meta { property: "og:title" },
    ymm: YmmSource::SegmentTitle,
    measure: MeasureSource::None,
    image: ImageSource::Meta { property: "og:image" },
};

pub static WAUSAU: Recipe = Recipe {
    key: WAUSAU_RECIPE,
    name: "Wausau",
    fields: &[Field::Title, Field::YearMakeModel, Field::HoursMiles, Field::Image],
    title: TitleSource::MetaFirstSegment {
        property: "og:description",
        delimiter: ',',
    },
    ymm: YmmSource::SegmentTitle,
    measure: MeasureSource::Text {
        meta: Some("og:description"),
    },
    image: ImageSource::Meta { property: "og:image" },
};

pub static ALL: [&Recipe; 5] = [&FASTLINE, &PROXI_BID, &ASSITER, &KERR_GROUP, &WAUSAU];
