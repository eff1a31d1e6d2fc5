//! Tests for the JSON bindings, run natively.

use endfield_reverse::wasm::{calculate, get_catalog, get_version};
use serde_json::Value;

#[test]
fn test_calculate_returns_view() {
    let input = r#"{
        "ore_rates": {"item_originium_ore": 10},
        "plan": [
            {"recipe_id": "furnance_crystal_shell_1", "item_id": "item_crystal_shell", "rate": 4}
        ]
    }"#;

    let result: Value = serde_json::from_str(&calculate(input)).unwrap();
    assert_eq!(result["success"], true);
    assert!(result["error"].is_null());

    let view = &result["view"];
    assert_eq!(view["consumption"]["item_originium_ore"], 4.0);
    assert_eq!(view["remaining"]["item_originium_ore"], 6.0);
    assert_eq!(view["available"].as_array().unwrap().len(), 1);
    assert_eq!(view["available"][0]["recipe_id"], "grinder_originium_powder_1");
    assert_eq!(view["ceilings"][0]["max_rate"], 10.0);
    assert_eq!(view["summary"][0]["facility_id"], "item_port_furnance_1");
    assert_eq!(view["summary"][0]["total_count"], 1);
}

#[test]
fn test_calculate_with_defaults() {
    let result: Value = serde_json::from_str(&calculate("{}")).unwrap();
    assert_eq!(result["success"], true);
    assert!(result["view"]["available"].as_array().unwrap().is_empty());
}

#[test]
fn test_calculate_rejects_unknown_recipe() {
    let input = r#"{"plan": [{"recipe_id": "nope", "item_id": "item_crystal_shell", "rate": 1}]}"#;

    let result: Value = serde_json::from_str(&calculate(input)).unwrap();
    assert_eq!(result["success"], false);
    assert!(result["error"].as_str().unwrap().contains("Invalid input"));
    assert!(result["view"].is_null());
}

#[test]
fn test_get_catalog() {
    let catalog: Value = serde_json::from_str(&get_catalog()).unwrap();
    assert!(!catalog["items"].as_array().unwrap().is_empty());
    assert_eq!(catalog["facilities"].as_array().unwrap().len(), 13);
    assert_eq!(catalog["recipes"][0]["id"], "furnance_crystal_shell_1");
}

#[test]
fn test_get_version() {
    assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
}
