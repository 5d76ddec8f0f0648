use std::collections::HashMap;

use crate::error::{Result, ScraperError};
use crate::extract::{recipes, Recipe};
use crate::sites::SiteId;

/// Lookup from site identifier to extraction recipe
pub struct RecipeRegistry {
    recipes: HashMap<&'static str, &'static Recipe>,
}

impl RecipeRegistry {
    /// Create a registry holding every built-in recipe
    pub fn new() -> Self {
        let recipes = recipes::ALL.iter().map(|r| (r.key, *r)).collect();
        Self { recipes }
    }

    /// Recipe for a site; aliases resolve to the same `&'static Recipe`
    pub fn resolve(&self, site: SiteId) -> Result<&'static Recipe> {
        self.recipes
            .get(site.recipe_key())
            .copied()
            .ok_or_else(|| {
                ScraperError::Config(format!(
                    "No recipe registered for site {} ({})",
                    site,
                    site.recipe_key()
                ))
            })
    }

    /// Parse a user-supplied label and resolve it
    pub fn resolve_label(&self, label: &str) -> Result<(SiteId, &'static Recipe)> {
        let site: SiteId = label.parse()?;
        Ok((site, self.resolve(site)?))
    }

    /// Every site identifier with the recipe it maps to
    pub fn list_sites(&self) -> Vec<(SiteId, &'static Recipe)> {
        SiteId::ALL
            .into_iter()
            .filter_map(|site| self.resolve(site).ok().map(|r| (site, r)))
            .collect()
    }
}

impl Default for RecipeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
