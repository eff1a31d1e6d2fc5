//! Catalog loading functionality for endfield-reverse.
//!
//! The static catalog lives in three CSV tables (`items.csv`,
//! `facilities.csv`, `recipes.csv`). They are compiled into the crate with
//! `include_str!` and can also be read from a directory, which is handy when
//! iterating on game data without rebuilding.
//!
//! Every load path ends in [`Catalog::new`], which checks referential
//! integrity, so the calculator can trust any `Catalog` it is handed.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use crate::models::{
    Facility, FacilityId, FacilityRow, Item, ItemId, ItemRow, Recipe, RecipeId, RecipeItem,
    RecipeRow,
};

const ITEMS_CSV: &str = include_str!("../data/items.csv");
const FACILITIES_CSV: &str = include_str!("../data/facilities.csv");
const RECIPES_CSV: &str = include_str!("../data/recipes.csv");

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A table could not be read from disk.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A table is not valid CSV or a column has the wrong type.
    #[error("invalid CSV in {table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A list column names an identifier the crate does not know.
    #[error("unknown {kind} '{id}' in {table}")]
    UnknownId {
        table: &'static str,
        kind: &'static str,
        id: String,
    },

    /// The item and amount lists of a recipe have different lengths.
    #[error("recipe '{recipe}' has mismatched item and amount lists")]
    AmountMismatch { recipe: RecipeId },

    /// An amount column entry is not a non-negative integer.
    #[error("recipe '{recipe}' has invalid amount '{value}'")]
    InvalidAmount { recipe: RecipeId, value: String },

    /// The same identifier appears twice in a table.
    #[error("duplicate id '{id}' in {table}")]
    DuplicateId { table: &'static str, id: String },

    /// A recipe produces nothing.
    #[error("recipe '{recipe}' has no outputs")]
    NoOutputs { recipe: RecipeId },

    /// A recipe's crafting time is zero, negative, infinite or not a number.
    #[error("recipe '{recipe}' has non-positive crafting time {value}")]
    NonPositiveCraftingTime { recipe: RecipeId, value: f64 },

    /// A recipe refers to an item or facility missing from the catalog tables.
    #[error("recipe '{recipe}' refers to {kind} '{id}' which is not in the catalog")]
    MissingReference {
        recipe: RecipeId,
        kind: &'static str,
        id: String,
    },
}

/// The immutable item, recipe and facility tables.
///
/// Order is preserved from the source tables and is the order every
/// catalog-order operation (such as direct recipe lookup) reports in.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    recipes: Vec<Recipe>,
    facilities: Vec<Facility>,
}

impl Catalog {
    /// Builds a catalog, rejecting tables that break referential integrity.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if an id is duplicated, a recipe refers to
    /// an item or facility not present in the tables, a recipe has no
    /// outputs, or a crafting time is not strictly positive.
    pub fn new(
        items: Vec<Item>,
        recipes: Vec<Recipe>,
        facilities: Vec<Facility>,
    ) -> Result<Self, CatalogError> {
        check_unique("items.csv", items.iter().map(|i| i.id))?;
        check_unique("facilities.csv", facilities.iter().map(|f| f.id))?;
        check_unique("recipes.csv", recipes.iter().map(|r| r.id))?;

        let item_ids: HashSet<ItemId> = items.iter().map(|i| i.id).collect();
        let facility_ids: HashSet<FacilityId> = facilities.iter().map(|f| f.id).collect();

        for recipe in &recipes {
            if recipe.outputs.is_empty() {
                return Err(CatalogError::NoOutputs { recipe: recipe.id });
            }
            if !recipe.crafting_time.is_finite() || recipe.crafting_time <= 0.0 {
                return Err(CatalogError::NonPositiveCraftingTime {
                    recipe: recipe.id,
                    value: recipe.crafting_time,
                });
            }
            for entry in recipe.inputs.iter().chain(&recipe.outputs) {
                if !item_ids.contains(&entry.item_id) {
                    return Err(CatalogError::MissingReference {
                        recipe: recipe.id,
                        kind: "item",
                        id: entry.item_id.to_string(),
                    });
                }
            }
            if !facility_ids.contains(&recipe.facility_id) {
                return Err(CatalogError::MissingReference {
                    recipe: recipe.id,
                    kind: "facility",
                    id: recipe.facility_id.to_string(),
                });
            }
        }

        Ok(Catalog {
            items,
            recipes,
            facilities,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn facility(&self, id: FacilityId) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.id == id)
    }
}

fn check_unique<T>(table: &'static str, ids: impl Iterator<Item = T>) -> Result<(), CatalogError>
where
    T: Copy + Eq + std::hash::Hash + std::fmt::Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Splits a `;`-separated list column, dropping empty entries.
fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(';').map(str::trim).filter(|part| !part.is_empty())
}

/// Pairs an item list column with its amount column.
fn parse_recipe_items(
    recipe: RecipeId,
    items: &str,
    amounts: &str,
) -> Result<Vec<RecipeItem>, CatalogError> {
    let ids = split_list(items)
        .map(|id| {
            id.parse::<ItemId>().map_err(|e| CatalogError::UnknownId {
                table: "recipes.csv",
                kind: e.kind,
                id: e.id,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let amounts = split_list(amounts)
        .map(|value| {
            value.parse::<u32>().map_err(|_| CatalogError::InvalidAmount {
                recipe,
                value: value.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if ids.len() != amounts.len() {
        return Err(CatalogError::AmountMismatch { recipe });
    }

    Ok(ids
        .into_iter()
        .zip(amounts)
        .map(|(item_id, amount)| RecipeItem { item_id, amount })
        .collect())
}

/// Parses item rows from CSV text.
///
/// # Arguments
///
/// * `reader` - Source of the `items.csv` table
///
/// # Returns
///
/// A vector of [`Item`] in table order, or an error if a row cannot be parsed.
///
/// # CSV Format
///
/// Expected columns: `id, tier, as_target`
pub fn parse_items<R: Read>(reader: R) -> Result<Vec<Item>, CatalogError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut items = Vec::new();
    for result in rdr.deserialize() {
        let row: ItemRow = result.map_err(|source| CatalogError::Csv {
            table: "items.csv",
            source,
        })?;
        items.push(Item {
            id: row.id,
            tier: row.tier,
            as_target: row.as_target.unwrap_or(false),
        });
    }
    Ok(items)
}

/// Parses facility rows from CSV text.
///
/// # Arguments
///
/// * `reader` - Source of the `facilities.csv` table
///
/// # Returns
///
/// A vector of [`Facility`] in table order, or an error if a row cannot be parsed.
///
/// # CSV Format
///
/// Expected columns: `id, power_consumption, tier`
pub fn parse_facilities<R: Read>(reader: R) -> Result<Vec<Facility>, CatalogError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut facilities = Vec::new();
    for result in rdr.deserialize() {
        let row: FacilityRow = result.map_err(|source| CatalogError::Csv {
            table: "facilities.csv",
            source,
        })?;
        facilities.push(Facility {
            id: row.id,
            power_consumption: row.power_consumption,
            tier: row.tier,
        });
    }
    Ok(facilities)
}

/// Parses recipe rows from CSV text.
///
/// # Arguments
///
/// * `reader` - Source of the `recipes.csv` table
///
/// # Returns
///
/// A vector of [`Recipe`] in table order, or an error if a row cannot be
/// parsed or names an unknown item or facility.
///
/// # CSV Format
///
/// Expected columns: `id, inputs, input_amounts, outputs, output_amounts, facility, crafting_time`
///
/// # Notes
///
/// `inputs`/`outputs` hold `;`-separated item ids and the amount columns
/// hold the matching `;`-separated counts.
pub fn parse_recipes<R: Read>(reader: R) -> Result<Vec<Recipe>, CatalogError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut recipes = Vec::new();
    for result in rdr.deserialize() {
        let row: RecipeRow = result.map_err(|source| CatalogError::Csv {
            table: "recipes.csv",
            source,
        })?;
        let facility_id =
            row.facility
                .parse::<FacilityId>()
                .map_err(|e| CatalogError::UnknownId {
                    table: "recipes.csv",
                    kind: e.kind,
                    id: e.id,
                })?;
        recipes.push(Recipe {
            id: row.id,
            inputs: parse_recipe_items(row.id, &row.inputs, &row.input_amounts)?,
            outputs: parse_recipe_items(row.id, &row.outputs, &row.output_amounts)?,
            facility_id,
            crafting_time: row.crafting_time,
        });
    }
    Ok(recipes)
}

/// Loads and validates a catalog from a directory holding the three tables.
///
/// # Arguments
///
/// * `data_dir` - Directory containing `items.csv`, `facilities.csv` and `recipes.csv`
///
/// # Returns
///
/// The validated [`Catalog`], or a [`CatalogError`] if a table is missing,
/// malformed or breaks referential integrity.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use endfield_reverse::data::load_catalog;
///
/// let catalog = load_catalog(Path::new("data")).unwrap();
/// println!("Loaded {} recipes", catalog.recipes().len());
/// ```
pub fn load_catalog(data_dir: &Path) -> Result<Catalog, CatalogError> {
    let items = parse_items(File::open(data_dir.join("items.csv"))?)?;
    let facilities = parse_facilities(File::open(data_dir.join("facilities.csv"))?)?;
    let recipes = parse_recipes(File::open(data_dir.join("recipes.csv"))?)?;

    let catalog = Catalog::new(items, recipes, facilities)?;
    info!(
        dir = %data_dir.display(),
        items = catalog.items().len(),
        recipes = catalog.recipes().len(),
        facilities = catalog.facilities().len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Loads the catalog compiled into the crate.
///
/// This only fails if the bundled tables are broken, which the crate's
/// tests rule out.
pub fn embedded_catalog() -> Result<Catalog, CatalogError> {
    let catalog = Catalog::new(
        parse_items(ITEMS_CSV.as_bytes())?,
        parse_recipes(RECIPES_CSV.as_bytes())?,
        parse_facilities(FACILITIES_CSV.as_bytes())?,
    )?;
    info!(
        items = catalog.items().len(),
        recipes = catalog.recipes().len(),
        facilities = catalog.facilities().len(),
        "loaded embedded catalog"
    );
    Ok(catalog)
}
