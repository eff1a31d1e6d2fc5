//! # endfield-reverse
//!
//! A command-line tool and library for planning production backwards from
//! raw ore in Arknights: Endfield.
//!
//! Given how much ore a player gathers per minute, this crate works out:
//!
//! - Which items can be made directly from that ore, and how fast at most
//! - How much ore a chosen production plan draws, and what is left over
//! - How high each selected production can go given everything else selected
//! - How many facilities of each type the plan needs
//!
//! ## Modules
//!
//! - [`models`] - Catalog identifiers, catalog records and derived view records
//! - [`data`] - CSV catalog loading and validation
//! - [`calculator`] - Resource ledger, reachability and facility sizing
//! - [`plan`] - The user's editable production plan
//! - [`display`] - Output formatting and display utilities
//! - [`wasm`] - JSON bindings for the web front end
//!
//! ## Example Usage
//!
//! ```
//! use endfield_reverse::{
//!     calculator::{facility_requirements, facility_summary, reachable_items},
//!     data::embedded_catalog,
//!     models::{FacilityId, ItemId, OreKind, OreRates, RecipeId},
//!     plan::ProductionPlan,
//! };
//!
//! let catalog = embedded_catalog().unwrap();
//! let rates = OreRates::new().with(OreKind::Originium, 10.0);
//!
//! // Everything originium ore can be turned into directly
//! let available = reachable_items(&catalog, &rates);
//! assert!(available.iter().any(|a| a.item_id == ItemId::CrystalShell && a.max_rate == 10.0));
//!
//! // 31 crystal shells a minute need two furnaces
//! let mut plan = ProductionPlan::new();
//! plan.add_production(RecipeId::FurnaceCrystalShell1, ItemId::CrystalShell, 31.0);
//! let requirements = facility_requirements(&catalog, plan.entries());
//! let summary = facility_summary(&requirements);
//! assert_eq!(summary[0].facility_id, FacilityId::Furnace);
//! assert_eq!(summary[0].total_count, 2);
//! ```
//!
//! ## Scope
//!
//! Only direct conversions from ore are considered reachable: a recipe must
//! have exactly one input and that input must be a raw ore. Rates always
//! scale by a recipe's first output.

pub mod calculator;
pub mod data;
pub mod display;
pub mod models;
pub mod plan;
pub mod wasm;
