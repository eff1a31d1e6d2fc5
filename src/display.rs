//! Display and formatting utilities for endfield-reverse.
//!
//! This module provides functions for printing a recomputed [`PlanView`]
//! to the terminal. Only catalog identifiers are printed; localized labels
//! belong to whatever front end sits on top.

use crate::models::{AvailableItem, OreKind, OreRates, PlanView};

/// Formats a per-minute rate.
///
/// Whole numbers print without decimals, anything else with up to two.
///
/// # Example
///
/// ```
/// use endfield_reverse::display::format_rate;
///
/// assert_eq!(format_rate(30.0), "30/min");
/// assert_eq!(format_rate(12.5), "12.5/min");
/// assert_eq!(format_rate(1.0 / 3.0), "0.33/min");
/// ```
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{:.0}/min", rate)
    } else {
        let text = format!("{:.2}", rate);
        let text = text.trim_end_matches('0').trim_end_matches('.');
        format!("{}/min", text)
    }
}

/// Prints raw and remaining ore rates side by side.
pub fn display_ore_rates(raw: &OreRates, remaining: &OreRates) {
    println!("[ORE]");
    println!("----------------------------------------------------------------");
    println!("{:<28} {:>16} {:>16}", "Ore", "Gathered", "Remaining");
    println!("----------------------------------------------------------------");
    for ore in OreKind::ALL {
        println!(
            "{:<28} {:>16} {:>16}",
            ore.as_str(),
            format_rate(raw.get(*ore)),
            format_rate(remaining.get(*ore))
        );
    }
    println!();
}

/// Prints the items that can still be added to the plan.
pub fn display_available_items(available: &[AvailableItem]) {
    println!("[AVAILABLE ITEMS]");
    println!("----------------------------------------------------------------");

    if available.is_empty() {
        println!("  No items can be produced from the remaining ore.");
        println!();
        return;
    }

    println!("{:<28} {:<34} {:>12}", "Item", "Recipe", "Max rate");
    println!("----------------------------------------------------------------");
    for item in available {
        println!(
            "{:<28} {:<34} {:>12}",
            item.item_id.as_str(),
            item.recipe_id.as_str(),
            format_rate(item.max_rate)
        );
    }
    println!();
}

/// Prints the plan: per-entry facility needs, live ceilings and the
/// per-facility totals.
pub fn display_plan(view: &PlanView) {
    println!("[PRODUCTION PLAN]");
    println!("----------------------------------------------------------------");

    if view.requirements.is_empty() {
        println!("  Nothing selected.");
        println!();
        return;
    }

    println!(
        "{:<28} {:>12} {:>12} {:<28} {:>6}",
        "Item", "Rate", "Max", "Facility", "Count"
    );
    println!("----------------------------------------------------------------");
    for req in &view.requirements {
        let ceiling = view
            .ceilings
            .iter()
            .find(|c| c.recipe_id == req.recipe_id)
            .map(|c| format_rate(c.max_rate))
            .unwrap_or_else(|| "N/A".to_string());
        let over = if view
            .ceilings
            .iter()
            .any(|c| c.recipe_id == req.recipe_id && req.rate > c.max_rate)
        {
            " [!]"
        } else {
            ""
        };
        println!(
            "{:<28} {:>12} {:>12} {:<28} {:>6}{}",
            req.item_id.as_str(),
            format_rate(req.rate),
            ceiling,
            req.facility_id.as_str(),
            req.required_count,
            over
        );
    }

    println!();
    println!("[FACILITY SUMMARY]");
    println!("----------------------------------------------------------------");
    for entry in &view.summary {
        println!("  {:<34} x{}", entry.facility_id.as_str(), entry.total_count);
    }
    println!();
}
