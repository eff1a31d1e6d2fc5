//! Property-based tests for the calculator's numeric laws.

use endfield_reverse::calculator::{
    compute_remaining, facility_throughput, max_production_rate, required_facility_count,
};
use endfield_reverse::models::{Consumption, ItemId, OreKind, OreRates};
use proptest::prelude::*;

fn arb_rates() -> impl Strategy<Value = OreRates> {
    (0.0..1_000.0f64, 0.0..1_000.0f64, 0.0..1_000.0f64).prop_map(|(o, q, i)| {
        OreRates::new()
            .with(OreKind::Originium, o)
            .with(OreKind::Quartz, q)
            .with(OreKind::Iron, i)
    })
}

fn arb_consumption() -> impl Strategy<Value = Consumption> {
    proptest::collection::btree_map(
        prop_oneof![
            Just(ItemId::OriginiumOre),
            Just(ItemId::QuartzSand),
            Just(ItemId::IronOre),
            Just(ItemId::QuartzPowder),
        ],
        0.0..2_000.0f64,
        0..4,
    )
}

proptest! {
    #[test]
    fn max_rate_is_ore_ratio(
        ore_rate in 0.0..10_000.0f64,
        input in 1u32..20,
        output in 0u32..20,
        time in 0.1..600.0f64,
    ) {
        let expected = (ore_rate / input as f64) * output as f64;
        prop_assert_eq!(max_production_rate(ore_rate, input, time, output), expected);
    }

    #[test]
    fn max_rate_without_ore_is_zero(input in 1u32..20, output in 0u32..20, time in 0.1..600.0f64) {
        prop_assert_eq!(max_production_rate(0.0, input, time, output), 0.0);
    }

    #[test]
    fn facility_count_never_under_provisions(
        rate in 0.0..10_000.0f64,
        time in 0.5..120.0f64,
        output in 1u32..10,
    ) {
        let count = required_facility_count(rate, time, output);
        let capacity = count as f64 * facility_throughput(time, output);
        // Relative slack for the division/multiplication round trip
        prop_assert!(capacity >= rate * (1.0 - 1e-12));
    }

    #[test]
    fn facility_count_covers_large_rates(
        rate in 1e9..1e15f64,
        time in 0.5..120.0f64,
        output in 1u32..10,
    ) {
        let count = required_facility_count(rate, time, output);
        let capacity = count as f64 * facility_throughput(time, output);
        prop_assert!(capacity >= rate * (1.0 - 1e-12));
    }

    #[test]
    fn facility_count_is_monotonic(
        a in 0.0..10_000.0f64,
        b in 0.0..10_000.0f64,
        time in 0.5..120.0f64,
        output in 1u32..10,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            required_facility_count(low, time, output) <= required_facility_count(high, time, output)
        );
    }

    #[test]
    fn zero_rate_needs_no_facilities(time in 0.5..120.0f64, output in 0u32..10) {
        prop_assert_eq!(required_facility_count(0.0, time, output), 0);
    }

    #[test]
    fn remaining_with_empty_consumption_is_identity(rates in arb_rates()) {
        prop_assert_eq!(compute_remaining(&rates, &Consumption::new()), rates);
    }

    #[test]
    fn remaining_is_never_negative(rates in arb_rates(), consumption in arb_consumption()) {
        let remaining = compute_remaining(&rates, &consumption);
        for (_, rate) in remaining.iter() {
            prop_assert!(rate >= 0.0);
        }
    }

    #[test]
    fn remaining_never_exceeds_raw(rates in arb_rates(), consumption in arb_consumption()) {
        let remaining = compute_remaining(&rates, &consumption);
        for ore in OreKind::ALL {
            prop_assert!(remaining.get(*ore) <= rates.get(*ore));
        }
    }
}
