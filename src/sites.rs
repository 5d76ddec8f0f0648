use crate::constants::*;
use crate::error::ScraperError;
use std::fmt;
use std::str::FromStr;

/// The closed set of site identifiers a batch can be run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteId {
    Fastline,
    ProxiBid,
    Assiter,
    Kerr,
    Mowrey,
    Witcher,
    Wausau,
    Quarrick,
    SuperiorEnergy,
    Ritchason,
}

impl SiteId {
    pub const ALL: [SiteId; 10] = [
        SiteId::Fastline,
        SiteId::ProxiBid,
        SiteId::Assiter,
        SiteId::Kerr,
        SiteId::Mowrey,
        SiteId::Witcher,
        SiteId::Wausau,
        SiteId::Quarrick,
        SiteId::SuperiorEnergy,
        SiteId::Ritchason,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SiteId::Fastline => FASTLINE_SITE,
            SiteId::ProxiBid => PROXI_BID_SITE,
            SiteId::Assiter => ASSITER_SITE,
            SiteId::Kerr => KERR_SITE,
            SiteId::Mowrey => MOWREY_SITE,
            SiteId::Witcher => WITCHER_SITE,
            SiteId::Wausau => WAUSAU_SITE,
            SiteId::Quarrick => QUARRICK_SITE,
            SiteId::SuperiorEnergy => SUPERIOR_ENERGY_SITE,
            SiteId::Ritchason => RITCHASON_SITE,
        }
    }

    /// Key of the recipe this identifier resolves to.
    pub fn recipe_key(self) -> &'static str {
        match self {
            SiteId::Fastline => FASTLINE_RECIPE,
            SiteId::ProxiBid | SiteId::Quarrick | SiteId::SuperiorEnergy => PROXI_BID_RECIPE,
            SiteId::Assiter => ASSITER_RECIPE,
            SiteId::Kerr | SiteId::Mowrey | SiteId::Witcher | SiteId::Ritchason => {
                KERR_GROUP_RECIPE
            }
            SiteId::Wausau => WAUSAU_RECIPE,
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SiteId {
    type Err = ScraperError;

    /// Accepts the display label, case-insensitively, with `_`, `-` and spaces interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = canonical(s);
        SiteId::ALL
            .into_iter()
            .find(|site| canonical(site.label()) == wanted)
            .ok_or_else(|| ScraperError::UnknownSite(s.trim().to_string()))
    }
}

fn canonical(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_label() {
        for site in SiteId::ALL {
            assert_eq!(site.label().parse::<SiteId>().unwrap(), site);
        }
    }

    #[test]
    fn parsing_is_lenient_about_case_and_separators() {
        assert_eq!("proxi-bid".parse::<SiteId>().unwrap(), SiteId::ProxiBid);
        assert_eq!("superior_energy".parse::<SiteId>().unwrap(), SiteId::SuperiorEnergy);
        assert_eq!(" WAUSAU ".parse::<SiteId>().unwrap(), SiteId::Wausau);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let err = "Craigslist".parse::<SiteId>().unwrap_err();
        assert!(matches!(err, ScraperError::UnknownSite(ref s) if s == "Craigslist"));
    }

    #[test]
    fn aliases_share_recipes() {
        assert_eq!(SiteId::Kerr.recipe_key(), SiteId::Ritchason.recipe_key());
        assert_eq!(SiteId::Mowrey.recipe_key(), SiteId::Witcher.recipe_key());
        assert_eq!(SiteId::Quarrick.recipe_key(), PROXI_BID_RECIPE);
        assert_eq!(SiteId::SuperiorEnergy.recipe_key(), PROXI_BID_RECIPE);
        assert_ne!(SiteId::Wausau.recipe_key(), SiteId::Kerr.recipe_key());
    }
}
