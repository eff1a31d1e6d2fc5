//! WebAssembly bindings for endfield-reverse.
//!
//! This module provides JavaScript-accessible functions for the planner.
//! Everything crosses the boundary as JSON strings.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::calculator::recompute;
use crate::data::{embedded_catalog, Catalog};
use crate::models::{Facility, Item, OreRates, PlanView, Recipe, SelectedProduction};
use crate::plan::ProductionPlan;

/// JavaScript-friendly input for a recomputation.
///
/// `ore_rates` is keyed by ore item id, e.g. `{"item_originium_ore": 10}`.
#[derive(Debug, Clone, Deserialize)]
pub struct JsCalculateInput {
    #[serde(default)]
    pub ore_rates: OreRates,
    #[serde(default)]
    pub plan: Vec<SelectedProduction>,
}

/// JavaScript-friendly recomputation result.
#[derive(Debug, Clone, Serialize)]
pub struct JsCalculateResult {
    pub success: bool,
    pub error: Option<String>,
    pub view: Option<PlanView>,
}

impl JsCalculateResult {
    fn failure(message: String) -> Self {
        report_error(&message);
        JsCalculateResult {
            success: false,
            error: Some(message),
            view: None,
        }
    }
}

/// Sends an error to the browser console, or to the log off-wasm.
fn report_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("{}", message);
}

/// JavaScript-friendly dump of the catalog tables.
#[derive(Debug, Clone, Serialize)]
pub struct JsCatalog {
    pub items: Vec<Item>,
    pub recipes: Vec<Recipe>,
    pub facilities: Vec<Facility>,
}

impl From<&Catalog> for JsCatalog {
    fn from(catalog: &Catalog) -> Self {
        JsCatalog {
            items: catalog.items().to_vec(),
            recipes: catalog.recipes().to_vec(),
            facilities: catalog.facilities().to_vec(),
        }
    }
}

/// Recomputes the plan view for the given ore rates and plan.
///
/// Takes a JSON string input and returns a JSON string result. The plan
/// goes through [`ProductionPlan`] first, so duplicate recipes collapse and
/// negative rates are clamped exactly as they would be in the UI store.
#[wasm_bindgen]
pub fn calculate(input_json: &str) -> String {
    let input: JsCalculateInput = match serde_json::from_str(input_json) {
        Ok(i) => i,
        Err(e) => {
            return serde_json::to_string(&JsCalculateResult::failure(format!(
                "Invalid input: {}",
                e
            )))
            .unwrap_or_default();
        }
    };

    let catalog = match embedded_catalog() {
        Ok(c) => c,
        Err(e) => {
            return serde_json::to_string(&JsCalculateResult::failure(format!(
                "Invalid catalog: {}",
                e
            )))
            .unwrap_or_default();
        }
    };

    let plan = ProductionPlan::from(input.plan);
    let view = recompute(&catalog, &input.ore_rates, &plan);

    serde_json::to_string(&JsCalculateResult {
        success: true,
        error: None,
        view: Some(view),
    })
    .unwrap_or_default()
}

/// Returns the built-in catalog as JSON.
#[wasm_bindgen]
pub fn get_catalog() -> String {
    match embedded_catalog() {
        Ok(catalog) => serde_json::to_string(&JsCatalog::from(&catalog)).unwrap_or_default(),
        Err(e) => {
            report_error(&e.to_string());
            String::from("null")
        }
    }
}

/// Get the version of the planner.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
