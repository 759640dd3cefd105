mod common;

use common::{assert_close, seed_food, test_db};
use macromicro::catalog::{self, MACRO_NUTRIENTS, MACRO_PREFIXES};

#[tokio::test]
async fn search_matches_name_and_category_case_insensitively() {
    let db = test_db().await;
    seed_food(
        &db,
        "001",
        "Pasta di semola",
        "Cereali e derivati",
        &[
            ("Energia (kcal)", "353"),
            ("Proteine (g)", "10,9"),
            ("Carboidrati disponibili (g)", "79.1"),
            ("Lipidi (g)", "1.4"),
        ],
    )
    .await;
    seed_food(&db, "002", "Riso brillato", "Cereali e derivati", &[]).await;
    seed_food(&db, "003", "Tonno fresco", "Pesci", &[]).await;

    let by_name = catalog::search(&db, "PASTA").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].code, "001");
    assert_close(by_name[0].kcal, 353.0);
    assert_close(by_name[0].protein_g, 10.9);
    assert_close(by_name[0].carbohydrate_g, 79.1);
    assert_close(by_name[0].fat_g, 1.4);

    let by_category = catalog::search(&db, "cereali").await.unwrap();
    let names: Vec<&str> = by_category.iter().map(|r| r.name.as_str()).collect();
    // ordered by name ascending
    assert_eq!(names, vec!["Pasta di semola", "Riso brillato"]);

    // missing macro rows normalize to zero
    assert_eq!(by_category[1].kcal, 0.0);
}

#[tokio::test]
async fn search_caps_results_at_twenty() {
    let db = test_db().await;
    for i in 0..25 {
        seed_food(&db, &format!("{i:03}"), &format!("Mela {i:02}"), "Frutta", &[]).await;
    }

    let results = catalog::search(&db, "mela").await.unwrap();
    assert_eq!(results.len(), 20);
}

#[tokio::test]
async fn search_without_matches_is_empty() {
    let db = test_db().await;
    seed_food(&db, "001", "Pasta di semola", "Cereali", &[]).await;

    assert!(catalog::search(&db, "zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn lookup_filters_to_the_requested_set() {
    let db = test_db().await;
    seed_food(
        &db,
        "001",
        "Spinaci",
        "Verdure",
        &[
            ("Energia (kcal)", "23"),
            ("Proteine (g)", "2.9"),
            ("Ferro (mg)", "2.7"),
        ],
    )
    .await;

    let rows = catalog::lookup_nutrients(&db, "001", &MACRO_NUTRIENTS)
        .await
        .unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.nutrient.as_str()).collect();
    assert_eq!(names, vec!["Energia (kcal)", "Proteine (g)"]);

    let rows = catalog::lookup_nutrients(&db, "001", &["Ferro (mg)"])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].per_100g.as_deref(), Some("2.7"));
}

#[tokio::test]
async fn lookup_on_unknown_food_is_empty_not_an_error() {
    let db = test_db().await;

    let rows = catalog::lookup_nutrients(&db, "nope", &MACRO_NUTRIENTS)
        .await
        .unwrap();
    assert!(rows.is_empty());

    let rows = catalog::lookup_nutrients_excluding(&db, "nope", &MACRO_PREFIXES)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn lookup_excluding_drops_whole_name_families() {
    let db = test_db().await;
    seed_food(
        &db,
        "001",
        "Spinaci",
        "Verdure",
        &[
            ("Energia (kcal)", "23"),
            ("Energia (kJ)", "97"),
            ("Proteine (g)", "2.9"),
            ("Lipidi (g)", "0.4"),
            ("Carboidrati disponibili (g)", "1.4"),
            ("Carboidrati solubili (g)", "0.4"),
            ("Ferro (mg)", "2.7"),
        ],
    )
    .await;

    let rows = catalog::lookup_nutrients_excluding(&db, "001", &MACRO_PREFIXES)
        .await
        .unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.nutrient.as_str()).collect();
    assert_eq!(names, vec!["Ferro (mg)"]);
}
