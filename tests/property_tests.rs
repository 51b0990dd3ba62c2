mod common;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use realty_engine::domain::amortization::{AmortizationInput, compute};
use realty_engine::domain::money::Money;
use realty_engine::domain::property::{LocationKey, PropertyType};
use realty_engine::domain::query::{
    AreaRange, BedroomFilter, FilterCriteria, PriceRange, SortKey, filter, query, sort,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SORT_KEYS: [SortKey; 5] = [
    SortKey::Featured,
    SortKey::PriceAsc,
    SortKey::PriceDesc,
    SortKey::AreaDesc,
    SortKey::Newest,
];

fn random_criteria(rng: &mut StdRng) -> FilterCriteria {
    let price_ranges = [PriceRange::UpTo500k, PriceRange::From500kTo1m, PriceRange::Above1m];
    let types = [
        PropertyType::Casa,
        PropertyType::Apartamento,
        PropertyType::Cobertura,
        PropertyType::Studio,
    ];

    let min = Decimal::from(rng.gen_range(0..=300u32));
    let max = min + Decimal::from(rng.gen_range(0..=300u32));

    FilterCriteria {
        location: rng
            .gen_bool(0.3)
            .then(|| LocationKey::new(["centro", "jardins", "beira-mar"][rng.gen_range(0..3)])),
        property_type: rng.gen_bool(0.3).then(|| types[rng.gen_range(0..types.len())]),
        price_range: rng
            .gen_bool(0.4)
            .then(|| price_ranges[rng.gen_range(0..price_ranges.len())]),
        bedrooms: rng.gen_bool(0.3).then(|| {
            let n = rng.gen_range(1..=4);
            if n == 4 {
                BedroomFilter::AtLeast(4)
            } else {
                BedroomFilter::Exactly(n)
            }
        }),
        area: rng
            .gen_bool(0.5)
            .then(|| AreaRange::new(min, max).unwrap()),
        garage: rng.gen_bool(0.3),
        pool: rng.gen_bool(0.2),
        furnished: rng.gen_bool(0.2),
        balcony: rng.gen_bool(0.2),
    }
}

#[test]
fn test_filtering_is_idempotent_and_conjunctive() {
    let catalog = common::random_catalog(7, 19);
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..200 {
        let criteria = random_criteria(&mut rng);
        let once = filter(&catalog, &criteria);
        let twice = filter(&once, &criteria);
        assert_eq!(once, twice);

        for property in &catalog {
            let kept = once.iter().any(|p| p.id == property.id);
            assert_eq!(kept, criteria.matches(property));
        }
    }
}

#[test]
fn test_unconstrained_filter_keeps_everything() {
    let catalog = common::random_catalog(3, 15);
    assert_eq!(filter(&catalog, &FilterCriteria::default()), catalog);
}

#[test]
fn test_sorting_is_a_fixed_point() {
    let catalog = common::random_catalog(21, 19);
    for key in SORT_KEYS {
        let once = sort(&catalog, key);
        assert_eq!(sort(&once, key), once, "re-sorting by {key} changed the order");
        assert_eq!(once.len(), catalog.len());
    }
}

#[test]
fn test_featured_sort_preserves_group_order() {
    let catalog = common::random_catalog(5, 19);
    let sorted = sort(&catalog, SortKey::Featured);

    let featured_count = catalog.iter().filter(|p| p.featured).count();
    assert!(sorted[..featured_count].iter().all(|p| p.featured));
    assert!(sorted[featured_count..].iter().all(|p| !p.featured));

    let original_featured: Vec<u32> = catalog.iter().filter(|p| p.featured).map(|p| p.id).collect();
    let sorted_featured: Vec<u32> = sorted[..featured_count].iter().map(|p| p.id).collect();
    assert_eq!(sorted_featured, original_featured);

    let original_rest: Vec<u32> = catalog.iter().filter(|p| !p.featured).map(|p| p.id).collect();
    let sorted_rest: Vec<u32> = sorted[featured_count..].iter().map(|p| p.id).collect();
    assert_eq!(sorted_rest, original_rest);
}

#[test]
fn test_price_ties_keep_catalog_order() {
    let mut catalog = common::random_catalog(9, 10);
    for property in &mut catalog {
        property.price = 750_000;
    }
    let ids: Vec<u32> = sort(&catalog, SortKey::PriceAsc).iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
}

#[test]
fn test_query_does_not_mutate_input() {
    let catalog = common::random_catalog(13, 12);
    let snapshot = catalog.clone();
    let _ = query(&catalog, &FilterCriteria::default(), SortKey::PriceDesc);
    assert_eq!(catalog, snapshot);
}

#[test]
fn test_amortization_identities_hold() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let value = Decimal::from(rng.gen_range(100_000..=3_000_000u64));
        let down = value * Decimal::from(rng.gen_range(0..=90u32)) / dec!(100);
        let years = rng.gen_range(10..=35u32);
        let rate = Decimal::from(rng.gen_range(1..=200u32)) / dec!(10);

        let input = AmortizationInput::new(Money::new(value), Money::new(down), years, rate).unwrap();
        let result = compute(&input).unwrap();
        let payments = Decimal::from(years * 12);

        assert_eq!(result.financed_amount.value(), value - down);
        assert_eq!(
            result.total_paid.value(),
            result.monthly_payment.value() * payments + down
        );
        assert_eq!(result.total_interest.value(), result.total_paid.value() - value);
        if down < value {
            assert!(result.total_interest > Money::ZERO);
        }
    }
}

#[test]
fn test_zero_rate_repays_exactly_the_financed_amount() {
    for (value, down, years) in [(360_000u64, 0u64, 30u32), (500_000, 20_000, 10), (240_000, 0, 20)] {
        let input = AmortizationInput::new(
            Money::from_units(value),
            Money::from_units(down),
            years,
            Decimal::ZERO,
        )
        .unwrap();
        let result = compute(&input).unwrap();
        assert_eq!(
            result.monthly_payment.value() * Decimal::from(years * 12),
            result.financed_amount.value()
        );
    }
}

#[test]
fn test_raising_down_payment_lowers_payment_and_interest() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..50 {
        let value = Decimal::from(rng.gen_range(200_000..=2_000_000u64));
        let years = rng.gen_range(10..=35u32);
        let rate = Decimal::from(rng.gen_range(1..=150u32)) / dec!(10);

        let mut previous: Option<(Money, Money)> = None;
        for share in [10u32, 20, 35, 50, 80] {
            let down = value * Decimal::from(share) / dec!(100);
            let input = AmortizationInput::new(Money::new(value), Money::new(down), years, rate).unwrap();
            let result = compute(&input).unwrap();

            if let Some((payment, interest)) = previous {
                assert!(result.monthly_payment < payment);
                assert!(result.total_interest < interest);
            }
            previous = Some((result.monthly_payment, result.total_interest));
        }
    }
}
