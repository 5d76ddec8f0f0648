/// Site identifier labels as shown to the user.
/// Several labels share a recipe, see `sites::SiteId::recipe_key`.
pub const FASTLINE_SITE: &str = "Fastline";
pub const PROXI_BID_SITE: &str = "Proxi_Bid";
pub const ASSITER_SITE: &str = "Assiter";
pub const KERR_SITE: &str = "Kerr";
pub const MOWREY_SITE: &str = "Mowrey";
pub const WITCHER_SITE: &str = "Witcher";
pub const WAUSAU_SITE: &str = "Wausau";
pub const QUARRICK_SITE: &str = "Quarrick";
pub const SUPERIOR_ENERGY_SITE: &str = "Superior Energy";
pub const RITCHASON_SITE: &str = "Ritchason";

// Recipe keys (one per distinct page shape)
pub const FASTLINE_RECIPE: &str = "fastline";
pub const PROXI_BID_RECIPE: &str = "proxi_bid";
pub const ASSITER_RECIPE: &str = "assiter";
pub const KERR_GROUP_RECIPE: &str = "kerr_group";
pub const WAUSAU_RECIPE: &str = "wausau";

// Spreadsheet column headers
pub const TITLE_COLUMN: &str = "Title";
pub const YEAR_MAKE_MODEL_COLUMN: &str = "Year/Make/Model";
pub const HOURS_MILES_COLUMN: &str = "Hours/Miles";
pub const IMAGE_COLUMN: &str = "Image";

pub const DEFAULT_CONFIG_PATH: &str = "scraper.toml";
pub const CONFIG_PATH_ENV: &str = "EQUIPMENT_SCRAPER_CONFIG";
pub const DEFAULT_OUTPUT_FILE: &str = "scraped_equipment.xlsx";
pub const DEFAULT_SHEET_NAME: &str = "Scraped Data";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; equipment-scraper/0.1)";
