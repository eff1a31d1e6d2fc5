//! Resource allocation and facility sizing for endfield-reverse.
//!
//! Every function here is a pure function of its arguments: the catalog,
//! a snapshot of the ore rates and a snapshot of the plan. Nothing is cached
//! between calls; callers re-run the chain whenever their inputs change.
//!
//! The chain is:
//!
//! 1. [`compute_consumption`] and [`compute_remaining`] (the ledger)
//! 2. [`reachable_items_given_plan`] and [`selected_ceilings`] (reachability)
//! 3. [`facility_requirements`] and [`facility_summary`] (sizing)
//!
//! [`recompute`] runs all of it at once.

use std::collections::BTreeSet;

use tracing::debug;

use crate::data::Catalog;
use crate::models::{
    clamp_rate, AvailableItem, Consumption, FacilityRequirement, FacilitySummary, ItemId,
    OreKind, OreRates, PlanView, Recipe, RecipeId, SelectedCeiling, SelectedProduction,
};
use crate::plan::ProductionPlan;

// ============================================================================
// Resource ledger
// ============================================================================

/// Computes how much of each input item a plan draws per minute.
///
/// A plan entry at `rate` output/minute runs its recipe
/// `rate / first_output.amount` times a minute, and each run consumes every
/// input's `amount`. Draws on the same item from different entries add up.
///
/// Entries whose recipe is not in the catalog are skipped.
pub fn compute_consumption(catalog: &Catalog, plan: &[SelectedProduction]) -> Consumption {
    let mut consumption = Consumption::new();

    for production in plan {
        let Some(recipe) = catalog.recipe(production.recipe_id) else {
            debug!(recipe = %production.recipe_id, "skipping unknown recipe in plan");
            continue;
        };
        let Some(executions) = executions_per_minute(recipe, clamp_rate(production.rate))
        else {
            continue;
        };

        for input in &recipe.inputs {
            *consumption.entry(input.item_id).or_insert(0.0) += executions * input.amount as f64;
        }
    }

    consumption
}

/// Recipe runs per minute needed to output `rate` units of the first output.
///
/// `None` if the recipe produces nothing to scale by.
fn executions_per_minute(recipe: &Recipe, rate: f64) -> Option<f64> {
    match recipe.primary_output() {
        Some(output) if output.amount > 0 => Some(rate / output.amount as f64),
        _ => None,
    }
}

/// Subtracts consumption from the raw ore rates, flooring each result at zero.
///
/// Ores without a consumption entry pass through unchanged; consumption of
/// non-ore items is ignored.
///
/// # Example
///
/// ```
/// use endfield_reverse::calculator::compute_remaining;
/// use endfield_reverse::models::{Consumption, ItemId, OreKind, OreRates};
///
/// let rates = OreRates::new().with(OreKind::Originium, 10.0).with(OreKind::Iron, 5.0);
/// let mut consumption = Consumption::new();
/// consumption.insert(ItemId::OriginiumOre, 4.0);
/// consumption.insert(ItemId::IronOre, 8.0);
///
/// let remaining = compute_remaining(&rates, &consumption);
/// assert_eq!(remaining.get(OreKind::Originium), 6.0);
/// assert_eq!(remaining.get(OreKind::Iron), 0.0);
/// ```
pub fn compute_remaining(raw_rates: &OreRates, consumption: &Consumption) -> OreRates {
    raw_rates
        .iter()
        .map(|(ore, rate)| {
            let used = consumption.get(&ore.item()).copied().map(clamp_rate);
            match used {
                Some(used) => (ore, (rate - used).max(0.0)),
                None => (ore, rate),
            }
        })
        .collect()
}

// ============================================================================
// Reachability
// ============================================================================

/// Lists the recipes that turn `ore_item_id` straight into something else.
///
/// Only recipes with exactly one input qualify. Results are in catalog order.
pub fn direct_recipes_from(catalog: &Catalog, ore_item_id: ItemId) -> Vec<&Recipe> {
    catalog
        .recipes()
        .iter()
        .filter(|recipe| recipe.is_direct_from(ore_item_id))
        .collect()
}

/// Material-limited output ceiling for a single-input recipe.
///
/// Returns `(ore_rate / input_amount) * output_amount`, or `0.0` when
/// there is no ore (or no usable input amount).
///
/// `_crafting_time` does not affect the result. This figure is bounded by
/// material, not by how many facilities are built; facility throughput is
/// what [`required_facility_count`] accounts for. The parameter is kept so
/// callers pass the whole recipe shape.
///
/// # Example
///
/// ```
/// use endfield_reverse::calculator::max_production_rate;
///
/// assert_eq!(max_production_rate(10.0, 1, 2.0, 1), 10.0);
/// assert_eq!(max_production_rate(10.0, 2, 2.0, 1), 5.0);
/// assert_eq!(max_production_rate(10.0, 1, 2.0, 2), 20.0);
/// assert_eq!(max_production_rate(0.0, 1, 2.0, 1), 0.0);
/// ```
pub fn max_production_rate(
    ore_rate: f64,
    input_amount: u32,
    _crafting_time: f64,
    output_amount: u32,
) -> f64 {
    let ore_rate = clamp_rate(ore_rate);
    if ore_rate <= 0.0 || input_amount == 0 {
        return 0.0;
    }

    let executions_per_minute = ore_rate / input_amount as f64;
    executions_per_minute * output_amount as f64
}

/// Lists every item that can be made directly from the given ore rates.
///
/// Ores are visited in [`OreKind`] order and their direct recipes in catalog
/// order. Two recipes that make the same item show up as two entries.
pub fn reachable_items(catalog: &Catalog, raw_rates: &OreRates) -> Vec<AvailableItem> {
    let mut available = Vec::new();

    for (ore, rate) in raw_rates.iter() {
        let rate = clamp_rate(rate);
        if rate <= 0.0 {
            continue;
        }

        for recipe in direct_recipes_from(catalog, ore.item()) {
            let (Some(input), Some(output)) = (recipe.inputs.first(), recipe.primary_output())
            else {
                continue;
            };
            available.push(AvailableItem {
                item_id: output.item_id,
                recipe_id: recipe.id,
                max_rate: max_production_rate(
                    rate,
                    input.amount,
                    recipe.crafting_time,
                    output.amount,
                ),
            });
        }
    }

    available
}

/// Lists what can still be added to a plan.
///
/// Runs [`reachable_items`] on what the plan leaves over and drops any entry
/// whose recipe is in `excluded_recipe_ids` (normally the recipes already
/// selected).
pub fn reachable_items_given_plan(
    catalog: &Catalog,
    raw_rates: &OreRates,
    plan: &[SelectedProduction],
    excluded_recipe_ids: &BTreeSet<RecipeId>,
) -> Vec<AvailableItem> {
    let consumption = compute_consumption(catalog, plan);
    let remaining = compute_remaining(raw_rates, &consumption);

    reachable_items(catalog, &remaining)
        .into_iter()
        .filter(|item| !excluded_recipe_ids.contains(&item.recipe_id))
        .collect()
}

/// Live ceiling for a recipe that is already in the plan.
///
/// `consumption_excluding_this` must be the draw of every *other* plan
/// entry. Using the full plan consumption would make the ceiling shrink as
/// the entry's own rate grows.
///
/// Returns `0.0` if the recipe is unknown, has no input, its first input is
/// not a raw ore, or no ore is left for it.
pub fn max_rate_for_selected(
    catalog: &Catalog,
    recipe_id: RecipeId,
    raw_rates: &OreRates,
    consumption_excluding_this: &Consumption,
) -> f64 {
    let Some(recipe) = catalog.recipe(recipe_id) else {
        return 0.0;
    };
    let (Some(input), Some(output)) = (recipe.inputs.first(), recipe.primary_output()) else {
        return 0.0;
    };
    let Some(ore) = OreKind::from_item(input.item_id) else {
        return 0.0;
    };

    let remaining = compute_remaining(raw_rates, consumption_excluding_this);
    let ore_rate = remaining.get(ore);
    if ore_rate <= 0.0 {
        return 0.0;
    }

    max_production_rate(ore_rate, input.amount, recipe.crafting_time, output.amount)
}

/// Live ceilings for every plan entry, in plan order.
///
/// Each ceiling accounts for the draw of every other entry but not the
/// entry's own.
pub fn selected_ceilings(
    catalog: &Catalog,
    raw_rates: &OreRates,
    plan: &[SelectedProduction],
) -> Vec<SelectedCeiling> {
    plan.iter()
        .map(|production| {
            let others: Vec<SelectedProduction> = plan
                .iter()
                .filter(|other| other.recipe_id != production.recipe_id)
                .copied()
                .collect();
            let others_consumption = compute_consumption(catalog, &others);
            SelectedCeiling {
                recipe_id: production.recipe_id,
                max_rate: max_rate_for_selected(
                    catalog,
                    production.recipe_id,
                    raw_rates,
                    &others_consumption,
                ),
            }
        })
        .collect()
}

// ============================================================================
// Facility sizing
// ============================================================================

/// Units per minute one facility sustains running a recipe back to back.
///
/// # Arguments
///
/// * `crafting_time` - Seconds per execution; must be positive, which the catalog guarantees
/// * `output_amount` - Units produced per execution
///
/// # Returns
///
/// The per-facility output rate in units/minute.
///
/// # Example
///
/// ```
/// use endfield_reverse::calculator::facility_throughput;
///
/// assert_eq!(facility_throughput(2.0, 1), 30.0);
/// assert_eq!(facility_throughput(2.0, 2), 60.0);
/// assert_eq!(facility_throughput(4.0, 1), 15.0);
/// ```
pub fn facility_throughput(crafting_time: f64, output_amount: u32) -> f64 {
    (60.0 / crafting_time) * output_amount as f64
}

/// Facilities needed to output at least `desired_rate` units per minute.
///
/// Rounds up: a partial facility still has to be built.
///
/// # Arguments
///
/// * `desired_rate` - Target output in units/minute; negative or non-finite reads as zero
/// * `crafting_time` - Seconds per execution
/// * `output_amount` - Units produced per execution
///
/// # Returns
///
/// The facility count, `0` for a zero rate or a recipe that outputs nothing.
/// Counts saturate at `u64::MAX`, which is only reached for rates above
/// roughly `1.8e19` times the per-facility throughput.
///
/// # Example
///
/// ```
/// use endfield_reverse::calculator::required_facility_count;
///
/// assert_eq!(required_facility_count(30.0, 2.0, 1), 1);
/// assert_eq!(required_facility_count(31.0, 2.0, 1), 2);
/// assert_eq!(required_facility_count(60.0, 2.0, 1), 2);
/// assert_eq!(required_facility_count(0.0, 2.0, 1), 0);
/// ```
pub fn required_facility_count(desired_rate: f64, crafting_time: f64, output_amount: u32) -> u64 {
    let desired_rate = clamp_rate(desired_rate);
    if desired_rate <= 0.0 {
        return 0;
    }

    let throughput = facility_throughput(crafting_time, output_amount);
    if !throughput.is_finite() || throughput <= 0.0 {
        return 0;
    }

    (desired_rate / throughput).ceil() as u64
}

/// Sizes the facilities for every plan entry with a positive rate.
///
/// # Arguments
///
/// * `catalog` - The catalog the plan's recipes are resolved against
/// * `plan` - Snapshot of the selected productions
///
/// # Returns
///
/// One [`FacilityRequirement`] per resolvable entry with a positive rate, in
/// plan order. Entries with an unknown recipe are dropped.
pub fn facility_requirements(
    catalog: &Catalog,
    plan: &[SelectedProduction],
) -> Vec<FacilityRequirement> {
    plan.iter()
        .filter_map(|production| {
            let rate = clamp_rate(production.rate);
            if rate <= 0.0 {
                return None;
            }
            let Some(recipe) = catalog.recipe(production.recipe_id) else {
                debug!(recipe = %production.recipe_id, "skipping unknown recipe in plan");
                return None;
            };
            let output_amount = recipe.primary_output().map_or(0, |o| o.amount);

            Some(FacilityRequirement {
                facility_id: recipe.facility_id,
                recipe_id: recipe.id,
                item_id: production.item_id,
                rate,
                required_count: required_facility_count(rate, recipe.crafting_time, output_amount),
            })
        })
        .collect()
}

/// Totals required facilities per facility type.
///
/// # Arguments
///
/// * `requirements` - Per-entry requirements, usually from [`facility_requirements`]
///
/// # Returns
///
/// One [`FacilitySummary`] per facility type in first-seen order. Totals
/// saturate instead of overflowing.
pub fn facility_summary(requirements: &[FacilityRequirement]) -> Vec<FacilitySummary> {
    let mut summary: Vec<FacilitySummary> = Vec::new();

    for requirement in requirements {
        match summary
            .iter_mut()
            .find(|s| s.facility_id == requirement.facility_id)
        {
            Some(existing) => {
                existing.total_count =
                    existing.total_count.saturating_add(requirement.required_count);
            }
            None => summary.push(FacilitySummary {
                facility_id: requirement.facility_id,
                total_count: requirement.required_count,
            }),
        }
    }

    summary
}

// ============================================================================
// Full recomputation
// ============================================================================

/// Runs the whole derivation chain for one snapshot of rates and plan.
///
/// Recipes already in the plan are left out of `available`.
pub fn recompute(catalog: &Catalog, raw_rates: &OreRates, plan: &ProductionPlan) -> PlanView {
    let entries = plan.entries();
    let consumption = compute_consumption(catalog, entries);
    let remaining = compute_remaining(raw_rates, &consumption);
    let available =
        reachable_items_given_plan(catalog, raw_rates, entries, &plan.selected_recipe_ids());
    let requirements = facility_requirements(catalog, entries);
    let summary = facility_summary(&requirements);

    PlanView {
        consumption,
        remaining,
        available,
        ceilings: selected_ceilings(catalog, raw_rates, entries),
        requirements,
        summary,
    }
}
