//! Data models and structures for endfield-reverse.
//!
//! This module contains the catalog identifiers, the static catalog records
//! (items, recipes, facilities), the user-facing plan entry and the derived
//! view records handed to presentation layers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a string does not name a known catalog identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{id}'")]
pub struct UnknownIdError {
    /// Which identifier family was being parsed (e.g. "item")
    pub kind: &'static str,
    /// The offending string
    pub id: String,
}

/// Declares a closed identifier enum with a stable string form.
///
/// The string form is what the catalog tables, the CLI and the JSON
/// bindings use; the enum is what the calculator works with.
macro_rules! catalog_id {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            /// Every identifier, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// The stable string form of this identifier.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $text => Ok($name::$variant), )+
                    other => Err(UnknownIdError {
                        kind: $kind,
                        id: other.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

catalog_id! {
    /// Identifies an item in the catalog.
    ItemId ("item") {
        OriginiumOre => "item_originium_ore",
        QuartzSand => "item_quartz_sand",
        IronOre => "item_iron_ore",
        CrystalShell => "item_crystal_shell",
        OriginiumPowder => "item_originium_powder",
        QuartzGlass => "item_quartz_glass",
        QuartzPowder => "item_quartz_powder",
        IronNugget => "item_iron_nugget",
        IronPowder => "item_iron_powder",
        GlassBottle => "item_glass_bottle",
        IronBottle => "item_iron_bottle",
        GlassComponent => "item_glass_cmpt",
        IronComponent => "item_iron_cmpt",
        ProcBattery1 => "item_proc_battery_1",
        OriginiumEnrichedPowder => "item_originium_enr_powder",
        MossSeed => "item_plant_moss_seed_1",
        Moss => "item_plant_moss_1",
        CarbonMaterial => "item_carbon_material",
    }
}

catalog_id! {
    /// Identifies a recipe in the catalog.
    RecipeId ("recipe") {
        FurnaceCrystalShell1 => "furnance_crystal_shell_1",
        GrinderOriginiumPowder1 => "grinder_originium_powder_1",
        FurnaceQuartzGlass1 => "furnance_quartz_glass_1",
        GrinderQuartzPowder1 => "grinder_quartz_powder_1",
        FurnaceIronNugget1 => "furnance_iron_nugget_1",
        GrinderIronPowder1 => "grinder_iron_powder_1",
        FurnaceCrystalShell2 => "furnance_crystal_shell_2",
        ShaperGlassBottle1 => "shaper_glass_bottle_1",
        ShaperIronBottle1 => "shaper_iron_bottle_1",
        CmptMcGlassComponent1 => "cmpt_mc_glass_cmpt_1",
        CmptMcIronComponent1 => "cmpt_mc_iron_cmpt_1",
        ToolsAsmProcBattery1 => "tools_asm_mc_proc_battery_1",
        MixPoolOriginiumEnrichedPowder1 => "mix_pool_originium_enr_powder_1",
        PlanterMoss1 => "planter_plant_moss_1",
        SeedColMossSeed1 => "seedcol_plant_moss_seed_1",
        FurnaceCarbon1 => "furnance_carbon_1",
    }
}

catalog_id! {
    /// Identifies a facility type in the catalog.
    FacilityId ("facility") {
        FittingUnit => "item_port_cmpt_mc_1",
        Dismantler => "item_port_dismantler_1",
        FillingUnit => "item_port_filling_pd_mc_1",
        Furnace => "item_port_furnance_1",
        Grinder => "item_port_grinder_1",
        MixPool => "item_port_mix_pool_1",
        Planter => "item_port_planter_1",
        SeedCollector => "item_port_seedcol_1",
        Shaper => "item_port_shaper_1",
        Thickener => "item_port_thickener_1",
        PackagingUnit => "item_port_tools_asm_mc_1",
        Winder => "item_port_winder_1",
        XiraniteOven => "item_port_xiranite_oven_1",
    }
}

catalog_id! {
    /// A raw ore the player gathers at a user-supplied rate.
    ///
    /// The string form of each kind is the catalog id of the ore item, so
    /// ore-keyed and item-keyed mappings line up.
    OreKind ("ore") {
        Originium => "item_originium_ore",
        Quartz => "item_quartz_sand",
        Iron => "item_iron_ore",
    }
}

impl OreKind {
    /// The catalog item this ore kind stands for.
    pub fn item(self) -> ItemId {
        match self {
            OreKind::Originium => ItemId::OriginiumOre,
            OreKind::Quartz => ItemId::QuartzSand,
            OreKind::Iron => ItemId::IronOre,
        }
    }

    /// Returns the ore kind for an item, or `None` if the item is not a raw ore.
    pub fn from_item(item: ItemId) -> Option<OreKind> {
        OreKind::ALL.iter().copied().find(|ore| ore.item() == item)
    }
}

// ============================================================================
// Catalog records
// ============================================================================

/// An item in the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Catalog identifier
    pub id: ItemId,
    /// Production-depth rank (raw ores and first refinements are tier 1)
    pub tier: u32,
    /// Whether the item is a sensible end-target for a plan
    pub as_target: bool,
}

/// One `(item, amount)` pair of a recipe's inputs or outputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecipeItem {
    pub item_id: ItemId,
    pub amount: u32,
}

/// A conversion rule executed by one facility type.
///
/// # Example
///
/// ```
/// use endfield_reverse::models::{FacilityId, ItemId, Recipe, RecipeId, RecipeItem};
///
/// let recipe = Recipe {
///     id: RecipeId::FurnaceCrystalShell1,
///     inputs: vec![RecipeItem { item_id: ItemId::OriginiumOre, amount: 1 }],
///     outputs: vec![RecipeItem { item_id: ItemId::CrystalShell, amount: 1 }],
///     facility_id: FacilityId::Furnace,
///     crafting_time: 2.0,
/// };
///
/// assert!(recipe.is_direct_from(ItemId::OriginiumOre));
/// assert_eq!(recipe.primary_output().map(|o| o.item_id), Some(ItemId::CrystalShell));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    /// Catalog identifier
    pub id: RecipeId,
    /// Items consumed per execution, in catalog order
    pub inputs: Vec<RecipeItem>,
    /// Items produced per execution, in catalog order
    pub outputs: Vec<RecipeItem>,
    /// Facility type that executes this recipe
    pub facility_id: FacilityId,
    /// Seconds per execution, always positive in a loaded catalog
    pub crafting_time: f64,
}

impl Recipe {
    /// The output used for every rate computation.
    ///
    /// Recipes may list several outputs, but only the first one scales rates.
    pub fn primary_output(&self) -> Option<&RecipeItem> {
        self.outputs.first()
    }

    /// Returns `true` if this recipe has exactly one input and it is `item`.
    pub fn is_direct_from(&self, item: ItemId) -> bool {
        matches!(self.inputs.as_slice(), [only] if only.item_id == item)
    }
}

/// A facility type in the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facility {
    pub id: FacilityId,
    /// Power drawn by one running instance
    pub power_consumption: u32,
    pub tier: u32,
}

// ============================================================================
// Plan input
// ============================================================================

/// A commitment to produce `item_id` via `recipe_id` at `rate` units/minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedProduction {
    pub recipe_id: RecipeId,
    pub item_id: ItemId,
    /// Units per minute, never negative
    pub rate: f64,
}

/// Raw-ore gathering rates in units/minute.
///
/// Rates are clamped to be finite and non-negative on the way in, so every
/// stored rate is safe to feed into the calculator. Kinds that were never set
/// read as `0.0` but are not listed by [`OreRates::iter`].
///
/// # Example
///
/// ```
/// use endfield_reverse::models::{OreKind, OreRates};
///
/// let mut rates = OreRates::new();
/// rates.set(OreKind::Originium, 10.0);
/// rates.set(OreKind::Iron, -4.0);
///
/// assert_eq!(rates.get(OreKind::Originium), 10.0);
/// assert_eq!(rates.get(OreKind::Iron), 0.0);
/// assert_eq!(rates.get(OreKind::Quartz), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<OreKind, f64>")]
pub struct OreRates(BTreeMap<OreKind, f64>);

impl OreRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rate for `ore`, clamping negative or non-finite values to zero.
    pub fn set(&mut self, ore: OreKind, rate: f64) {
        self.0.insert(ore, clamp_rate(rate));
    }

    /// Builder-style [`OreRates::set`].
    pub fn with(mut self, ore: OreKind, rate: f64) -> Self {
        self.set(ore, rate);
        self
    }

    pub fn get(&self, ore: OreKind) -> f64 {
        self.0.get(&ore).copied().unwrap_or(0.0)
    }

    /// Iterates over the ore kinds that have a rate, in [`OreKind`] order.
    pub fn iter(&self) -> impl Iterator<Item = (OreKind, f64)> + '_ {
        self.0.iter().map(|(ore, rate)| (*ore, *rate))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<OreKind, f64>> for OreRates {
    fn from(map: BTreeMap<OreKind, f64>) -> Self {
        map.into_iter()
            .fold(OreRates::new(), |rates, (ore, rate)| rates.with(ore, rate))
    }
}

impl FromIterator<(OreKind, f64)> for OreRates {
    fn from_iter<I: IntoIterator<Item = (OreKind, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(OreRates::new(), |rates, (ore, rate)| rates.with(ore, rate))
    }
}

/// Clamps a rate to a finite, non-negative number.
///
/// Applied wherever a rate enters the crate (plan edits, ore rates and every
/// calculator entry point) so a stray NaN or negative rate never reaches the
/// arithmetic.
pub fn clamp_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        0.0
    }
}

/// Per-item consumption in units/minute.
pub type Consumption = BTreeMap<ItemId, f64>;

// ============================================================================
// Derived view records
// ============================================================================

/// An item that can be produced from currently available raw ore.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvailableItem {
    pub item_id: ItemId,
    pub recipe_id: RecipeId,
    /// Material-limited ceiling in units/minute
    pub max_rate: f64,
}

/// The live rate ceiling of an already-selected production.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectedCeiling {
    pub recipe_id: RecipeId,
    pub max_rate: f64,
}

/// Facilities needed to sustain one plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FacilityRequirement {
    pub facility_id: FacilityId,
    pub recipe_id: RecipeId,
    pub item_id: ItemId,
    pub rate: f64,
    pub required_count: u64,
}

/// Total facilities of one type across a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacilitySummary {
    pub facility_id: FacilityId,
    pub total_count: u64,
}

/// Everything a presentation layer shows for one plan snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanView {
    /// Ore drawn by the plan, keyed by input item
    pub consumption: Consumption,
    /// Ore left after the plan's draw
    pub remaining: OreRates,
    /// Items that can still be added, excluding recipes already in the plan
    pub available: Vec<AvailableItem>,
    /// Live ceilings for every plan entry, in plan order
    pub ceilings: Vec<SelectedCeiling>,
    pub requirements: Vec<FacilityRequirement>,
    pub summary: Vec<FacilitySummary>,
}

// ============================================================================
// CSV Row Structures
// ============================================================================

/// CSV row structure for `items.csv`.
#[derive(Debug, Deserialize)]
pub struct ItemRow {
    pub id: ItemId,
    pub tier: u32,
    /// Empty means `false`
    pub as_target: Option<bool>,
}

/// CSV row structure for `facilities.csv`.
#[derive(Debug, Deserialize)]
pub struct FacilityRow {
    pub id: FacilityId,
    pub power_consumption: u32,
    pub tier: u32,
}

/// CSV row structure for `recipes.csv`.
///
/// List columns are `;`-separated and paired by position, so the n-th entry
/// of `input_amounts` belongs to the n-th entry of `inputs`.
#[derive(Debug, Deserialize)]
pub struct RecipeRow {
    pub id: RecipeId,
    pub inputs: String,
    pub input_amounts: String,
    pub outputs: String,
    pub output_amounts: String,
    pub facility: String,
    pub crafting_time: f64,
}
