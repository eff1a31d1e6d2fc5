//! The user's production plan.
//!
//! [`ProductionPlan`] is owned by whatever drives the calculator (the CLI,
//! the wasm bindings, a UI). The calculator never holds on to it; callers
//! pass [`ProductionPlan::entries`] as a snapshot on every recomputation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{clamp_rate, ItemId, RecipeId, SelectedProduction};

/// Ordered list of selected productions, at most one per recipe.
///
/// # Example
///
/// ```
/// use endfield_reverse::models::{ItemId, RecipeId};
/// use endfield_reverse::plan::ProductionPlan;
///
/// let mut plan = ProductionPlan::new();
/// plan.add_production(RecipeId::FurnaceCrystalShell1, ItemId::CrystalShell, 10.0);
/// plan.add_production(RecipeId::FurnaceCrystalShell1, ItemId::CrystalShell, 25.0);
///
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan.entries()[0].rate, 25.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<SelectedProduction>", into = "Vec<SelectedProduction>")]
pub struct ProductionPlan {
    entries: Vec<SelectedProduction>,
}

impl ProductionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a production, or overwrites the rate if the recipe is already
    /// selected. The rate is clamped to be non-negative.
    pub fn add_production(&mut self, recipe_id: RecipeId, item_id: ItemId, rate: f64) {
        let rate = clamp_rate(rate);
        match self.entries.iter_mut().find(|p| p.recipe_id == recipe_id) {
            Some(existing) => existing.rate = rate,
            None => self.entries.push(SelectedProduction {
                recipe_id,
                item_id,
                rate,
            }),
        }
    }

    /// Changes the rate of a selected recipe. Unknown recipes are ignored.
    pub fn update_rate(&mut self, recipe_id: RecipeId, rate: f64) {
        let rate = clamp_rate(rate);
        if let Some(existing) = self.entries.iter_mut().find(|p| p.recipe_id == recipe_id) {
            existing.rate = rate;
        }
    }

    /// Removes a recipe from the plan. Removing an absent recipe is a no-op.
    pub fn remove(&mut self, recipe_id: RecipeId) {
        self.entries.retain(|p| p.recipe_id != recipe_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The current snapshot, in selection order.
    pub fn entries(&self) -> &[SelectedProduction] {
        &self.entries
    }

    pub fn contains(&self, recipe_id: RecipeId) -> bool {
        self.entries.iter().any(|p| p.recipe_id == recipe_id)
    }

    /// Recipes currently selected, for excluding them from the available list.
    pub fn selected_recipe_ids(&self) -> BTreeSet<RecipeId> {
        self.entries.iter().map(|p| p.recipe_id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<SelectedProduction>> for ProductionPlan {
    /// Rebuilds a plan through [`ProductionPlan::add_production`], so
    /// duplicates collapse (last rate wins) and rates are clamped.
    fn from(entries: Vec<SelectedProduction>) -> Self {
        let mut plan = ProductionPlan::new();
        for p in entries {
            plan.add_production(p.recipe_id, p.item_id, p.rate);
        }
        plan
    }
}

impl From<ProductionPlan> for Vec<SelectedProduction> {
    fn from(plan: ProductionPlan) -> Self {
        plan.entries
    }
}
