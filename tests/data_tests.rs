//! Tests for catalog loading and validation.

use std::path::Path;

use endfield_reverse::data::{
    embedded_catalog, load_catalog, parse_facilities, parse_items, parse_recipes, Catalog,
    CatalogError,
};
use endfield_reverse::models::{
    Facility, FacilityId, Item, ItemId, Recipe, RecipeId, RecipeItem,
};

fn ore_item(id: ItemId) -> Item {
    Item { id, tier: 1, as_target: false }
}

fn furnace() -> Facility {
    Facility { id: FacilityId::Furnace, power_consumption: 5, tier: 1 }
}

fn shell_recipe(crafting_time: f64) -> Recipe {
    Recipe {
        id: RecipeId::FurnaceCrystalShell1,
        inputs: vec![RecipeItem { item_id: ItemId::OriginiumOre, amount: 1 }],
        outputs: vec![RecipeItem { item_id: ItemId::CrystalShell, amount: 1 }],
        facility_id: FacilityId::Furnace,
        crafting_time,
    }
}

#[test]
fn test_embedded_catalog_loads() {
    let catalog = embedded_catalog().expect("Failed to load embedded catalog");

    assert!(!catalog.items().is_empty(), "Should load at least some items");
    assert!(!catalog.recipes().is_empty(), "Should load at least some recipes");
    assert_eq!(catalog.facilities().len(), FacilityId::ALL.len());
}

#[test]
fn test_load_catalog_from_directory() {
    let data_dir = Path::new("data");
    if !data_dir.exists() {
        return;
    }

    let from_disk = load_catalog(data_dir).expect("Failed to load data");
    let embedded = embedded_catalog().unwrap();
    assert_eq!(from_disk.recipes(), embedded.recipes());
    assert_eq!(from_disk.items(), embedded.items());
}

#[test]
fn test_load_catalog_missing_directory() {
    let err = load_catalog(Path::new("definitely/not/here")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn test_embedded_recipes_are_valid() {
    let catalog = embedded_catalog().unwrap();

    for recipe in catalog.recipes() {
        assert!(recipe.crafting_time > 0.0, "{} crafting time", recipe.id);
        assert!(!recipe.outputs.is_empty(), "{} has outputs", recipe.id);
        assert!(catalog.facility(recipe.facility_id).is_some());
        for entry in recipe.inputs.iter().chain(&recipe.outputs) {
            assert!(catalog.item(entry.item_id).is_some(), "{} in {}", entry.item_id, recipe.id);
        }
    }
}

#[test]
fn test_every_ore_has_a_direct_recipe() {
    let catalog = embedded_catalog().unwrap();

    for ore in [ItemId::OriginiumOre, ItemId::QuartzSand, ItemId::IronOre] {
        assert!(
            catalog.recipes().iter().any(|r| r.is_direct_from(ore)),
            "no direct recipe from {}",
            ore
        );
    }
}

#[test]
fn test_embedded_ids_cover_enums() {
    let catalog = embedded_catalog().unwrap();

    for id in ItemId::ALL {
        assert!(catalog.item(*id).is_some(), "item {} missing", id);
    }
    for id in RecipeId::ALL {
        assert!(catalog.recipe(*id).is_some(), "recipe {} missing", id);
    }
}

#[test]
fn test_parse_items_optional_target_flag() {
    let csv = "id,tier,as_target\nitem_originium_ore,1,\nitem_iron_bottle,2,true\n";
    let items = parse_items(csv.as_bytes()).unwrap();

    assert_eq!(items.len(), 2);
    assert!(!items[0].as_target);
    assert!(items[1].as_target);
    assert_eq!(items[1].tier, 2);
}

#[test]
fn test_parse_items_unknown_id() {
    let csv = "id,tier,as_target\nitem_unobtainium,1,\n";
    let err = parse_items(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, CatalogError::Csv { table: "items.csv", .. }));
}

#[test]
fn test_parse_facilities() {
    let csv = "id,power_consumption,tier\nitem_port_grinder_1,5,1\n";
    let facilities = parse_facilities(csv.as_bytes()).unwrap();
    assert_eq!(
        facilities,
        vec![Facility { id: FacilityId::Grinder, power_consumption: 5, tier: 1 }]
    );
}

#[test]
fn test_parse_recipes_multi_input() {
    let csv = "id,inputs,input_amounts,outputs,output_amounts,facility,crafting_time\n\
               mix_pool_originium_enr_powder_1,item_originium_ore;item_quartz_powder,2;1,item_originium_enr_powder,1,item_port_mix_pool_1,4\n";
    let recipes = parse_recipes(csv.as_bytes()).unwrap();

    assert_eq!(recipes.len(), 1);
    let recipe = &recipes[0];
    assert_eq!(recipe.inputs.len(), 2);
    assert_eq!(recipe.inputs[0], RecipeItem { item_id: ItemId::OriginiumOre, amount: 2 });
    assert_eq!(recipe.facility_id, FacilityId::MixPool);
    assert_eq!(recipe.crafting_time, 4.0);
    assert!(!recipe.is_direct_from(ItemId::OriginiumOre));
}

#[test]
fn test_parse_recipes_unknown_facility() {
    let csv = "id,inputs,input_amounts,outputs,output_amounts,facility,crafting_time\n\
               furnance_crystal_shell_1,item_originium_ore,1,item_crystal_shell,1,item_port_nowhere,2\n";
    let err = parse_recipes(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, CatalogError::UnknownId { kind: "facility", .. }));
}

#[test]
fn test_catalog_rejects_non_positive_crafting_time() {
    for time in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        let err = Catalog::new(
            vec![ore_item(ItemId::OriginiumOre), ore_item(ItemId::CrystalShell)],
            vec![shell_recipe(time)],
            vec![furnace()],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::NonPositiveCraftingTime { .. }));
    }
}

#[test]
fn test_catalog_rejects_infinite_crafting_time_from_csv() {
    let csv = "id,inputs,input_amounts,outputs,output_amounts,facility,crafting_time\n\
               furnance_crystal_shell_1,item_originium_ore,1,item_crystal_shell,1,item_port_furnance_1,inf\n";
    let recipes = parse_recipes(csv.as_bytes()).unwrap();
    assert!(recipes[0].crafting_time.is_infinite());

    let err = Catalog::new(
        vec![ore_item(ItemId::OriginiumOre), ore_item(ItemId::CrystalShell)],
        recipes,
        vec![furnace()],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NonPositiveCraftingTime { recipe: RecipeId::FurnaceCrystalShell1, .. }
    ));
}

#[test]
fn test_catalog_rejects_missing_item() {
    let err = Catalog::new(
        vec![ore_item(ItemId::OriginiumOre)],
        vec![shell_recipe(2.0)],
        vec![furnace()],
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::MissingReference { kind: "item", .. }));
}

#[test]
fn test_catalog_rejects_missing_facility() {
    let err = Catalog::new(
        vec![ore_item(ItemId::OriginiumOre), ore_item(ItemId::CrystalShell)],
        vec![shell_recipe(2.0)],
        vec![],
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::MissingReference { kind: "facility", .. }));
}

#[test]
fn test_catalog_rejects_duplicates() {
    let err = Catalog::new(
        vec![ore_item(ItemId::OriginiumOre), ore_item(ItemId::CrystalShell)],
        vec![shell_recipe(2.0), shell_recipe(3.0)],
        vec![furnace()],
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId { table: "recipes.csv", .. }));
}

#[test]
fn test_catalog_rejects_recipe_without_outputs() {
    let mut recipe = shell_recipe(2.0);
    recipe.outputs.clear();
    let err = Catalog::new(
        vec![ore_item(ItemId::OriginiumOre), ore_item(ItemId::CrystalShell)],
        vec![recipe],
        vec![furnace()],
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::NoOutputs { .. }));
}
