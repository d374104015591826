//! End-to-end tests: catalog → normalization → matching → shopping list.

use foodshare_catalog::{CatalogError, CatalogSource, CatalogStore, StaticSource};
use foodshare_core::config::ShoppingConfig;
use foodshare_shopping::{ProductResult, ProductSearch};
use foodshare_telemetry::{metrics, HISTOGRAM_WINDOW};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

fn scenario_catalog() -> Vec<Value> {
    vec![
        json!({
            "id": "1",
            "name": "aceite oliva virgen extra",
            "category": "aceite",
            "thumbnail": "t1",
            "price": 4.50
        }),
        json!({
            "id": "2",
            "name": "huevos frescos",
            "category": "huevos",
            "thumbnail": "t2",
            "price": 2.10
        }),
    ]
}

fn search_over(records: Vec<Value>) -> ProductSearch {
    let store = Arc::new(CatalogStore::new(StaticSource::new(records)));
    store.load(false);
    ProductSearch::new(store)
}

#[test]
fn test_recipe_scenario() {
    let search = search_over(scenario_catalog());

    let results = search.search(&["aceite de oliva", "3 huevos", "sal al gusto"]);

    assert_eq!(
        results,
        vec![
            ProductResult {
                name: "Aceite Oliva Virgen Extra".to_string(),
                img_url: "t1".to_string(),
                price: 4.50,
            },
            ProductResult {
                name: "Huevos Frescos".to_string(),
                img_url: "t2".to_string(),
                price: 2.10,
            },
            ProductResult {
                name: "sal al gusto (no encontrado)".to_string(),
                img_url: String::new(),
                price: 0.0,
            },
        ]
    );
}

#[test]
fn test_empty_ingredient_list() {
    let search = search_over(scenario_catalog());
    let empty: [&str; 0] = [];
    assert!(search.search(&empty).is_empty());
}

#[test]
fn test_unloaded_store_matches_nothing() {
    let store = Arc::new(CatalogStore::new(StaticSource::new(scenario_catalog())));
    let search = ProductSearch::new(store);

    let results = search.search(&["huevos"]);
    assert_eq!(results[0].name, "huevos (no encontrado)");
}

#[test]
fn test_dedup_keeps_first_occurrence() {
    let search = search_over(scenario_catalog());

    let alone = search.search(&["huevos"]);
    let with_duplicate = search.search(&["huevos", "aceite de oliva", "2 huevos frescos"]);

    assert_eq!(with_duplicate.len(), 2);
    assert_eq!(with_duplicate[0], alone[0]);
    assert_eq!(with_duplicate[1].name, "Aceite Oliva Virgen Extra");
}

#[test]
fn test_search_is_deterministic() {
    let search = search_over(scenario_catalog());
    let ingredients = ["1/2 taza de aceite", "huevo", "pimienta negra", "3 huevos"];

    assert_eq!(search.search(&ingredients), search.search(&ingredients));
}

#[test]
fn test_stopword_only_ingredient_still_queried() {
    let search = search_over(scenario_catalog());
    let lookup = search.lookup("2 tazas");
    assert_eq!(lookup.query, "2 tazas");
    assert_eq!(search.search(&["2 tazas"])[0].name, "2 tazas (no encontrado)");
}

#[test]
fn test_from_config_loads_catalog_file() {
    let mut catalog = tempfile::NamedTempFile::new().unwrap();
    write!(catalog, "{}", Value::Array(scenario_catalog())).unwrap();

    let mut config = ShoppingConfig::default();
    config.catalog.path = catalog.path().display().to_string();
    config.output.not_found_marker = "not found".to_string();
    config.normalizer.extra_stopwords = vec!["pizca".to_string(), "Sal".to_string()];

    let search = ProductSearch::from_config(&config).unwrap();
    assert_eq!(search.store().current().len(), 2);

    let results = search.search(&["3 huevos", "pimienta"]);
    assert_eq!(results[0].price, 2.10);
    assert_eq!(results[1].name, "pimienta (not found)");
}

#[test]
fn test_from_config_missing_catalog_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ShoppingConfig::default();
    config.catalog.path = dir.path().join("productos.json").display().to_string();

    let search = ProductSearch::from_config(&config).unwrap();
    let results = search.search(&["huevos", "aceite"]);

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.price == 0.0 && r.img_url.is_empty()));
}

#[test]
fn test_from_config_rejects_invalid_weights() {
    let mut config = ShoppingConfig::default();
    config.matching.partial_length_ratio = 10.0;
    config.matching.long_length_ratio = 2.0;

    let err = ProductSearch::from_config(&config).unwrap_err();
    assert_eq!(err.code, foodshare_core::ErrorCode::InvalidWeights);
}

#[test]
fn test_search_latency_history_is_bounded() {
    let search = search_over(scenario_catalog());
    let calls = HISTOGRAM_WINDOW + 50;
    for _ in 0..calls {
        search.search(&["pan"]);
    }

    let stats = metrics().histogram_stats("shopping.search").unwrap();
    assert!(stats.count >= calls as u64);
    assert_eq!(stats.retained, HISTOGRAM_WINDOW);
}

/// Same products on every fetch, thumbnails tagged with the fetch round.
struct RoundTaggedSource {
    rounds: AtomicUsize,
}

impl CatalogSource for RoundTaggedSource {
    fn describe(&self) -> String {
        "round-tagged".to_string()
    }

    fn fetch(&self) -> Result<Vec<Value>, CatalogError> {
        let round = self.rounds.fetch_add(1, Ordering::SeqCst);
        Ok(["leche", "pan", "arroz", "azucar", "harina"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                json!({
                    "id": i.to_string(),
                    "name": name,
                    "thumbnail": format!("r{round}"),
                    "price": 1.0
                })
            })
            .collect())
    }
}

#[test]
fn test_search_during_reload_uses_one_snapshot() {
    let store = Arc::new(CatalogStore::new(RoundTaggedSource {
        rounds: AtomicUsize::new(0),
    }));
    store.load(false);
    let search = Arc::new(ProductSearch::new(Arc::clone(&store)));

    let reloader = {
        let search = Arc::clone(&search);
        thread::spawn(move || {
            for _ in 0..50 {
                search.reload();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let search = Arc::clone(&search);
            thread::spawn(move || {
                for _ in 0..50 {
                    let results = search.search(&["leche", "pan", "arroz", "azucar", "harina"]);
                    assert_eq!(results.len(), 5);
                    let round = &results[0].img_url;
                    assert!(results.iter().all(|r| &r.img_url == round), "{results:?}");
                }
            })
        })
        .collect();

    reloader.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

proptest! {
    #[test]
    fn prop_empty_catalog_yields_placeholders(
        ingredients in proptest::collection::vec("[a-z0-9 ]{1,20}", 1..10)
    ) {
        let search = search_over(Vec::new());
        let results = search.search(&ingredients);

        prop_assert_eq!(results.len(), ingredients.len());
        for (result, ingredient) in results.iter().zip(&ingredients) {
            prop_assert_eq!(result.price, 0.0);
            prop_assert!(result.img_url.is_empty());
            prop_assert_eq!(&result.name, &format!("{ingredient} (no encontrado)"));
        }
    }

    #[test]
    fn prop_empty_list_for_any_catalog(size in 0usize..20) {
        let records = (0..size)
            .map(|i| json!({"id": i, "name": format!("producto {i}"), "price": i}))
            .collect();
        let search = search_over(records);
        let empty: Vec<String> = Vec::new();
        prop_assert!(search.search(&empty).is_empty());
    }

    #[test]
    fn prop_output_never_longer_than_input(
        ingredients in proptest::collection::vec("[a-z ]{1,16}", 0..8)
    ) {
        let search = search_over(scenario_catalog());
        let results = search.search(&ingredients);
        prop_assert!(results.len() <= ingredients.len());
        prop_assert_eq!(search.search(&ingredients), results);
    }
}
