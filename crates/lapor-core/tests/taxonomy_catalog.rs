//! Contract checks for the builtin nonconformity catalog.

use lapor_core::{LaporError, Taxonomy};

#[test]
fn builtin_catalog_is_valid_and_nonempty() {
    let taxonomy = Taxonomy::builtin();
    assert!(!taxonomy.categories().is_empty());
    for category in taxonomy.categories() {
        assert!(!category.name.is_empty());
        assert!(!category.subcategories.is_empty());
    }
}

#[test]
fn category_names_are_unique() {
    let taxonomy = Taxonomy::builtin();
    let mut names: Vec<_> = taxonomy.categories().iter().map(|c| &c.name).collect();
    let before = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), before);
}

#[test]
fn listing_is_deterministic_across_calls() {
    let taxonomy = Taxonomy::builtin();
    let first: Vec<_> = taxonomy.categories().to_vec();
    let second: Vec<_> = taxonomy.categories().to_vec();
    assert_eq!(first, second);
}

#[test]
fn waste_category_lists_its_exact_finding() {
    let taxonomy = Taxonomy::builtin();
    let subs = taxonomy.subcategories_of("Pengelolaan Sampah").unwrap();
    assert_eq!(subs, ["[ENV] Sampah dibuang tidak pada tempat sampah"]);
}

#[test]
fn unknown_category_fails_lookup() {
    let taxonomy = Taxonomy::builtin();
    let err = taxonomy.subcategories_of("NoSuchCategory").unwrap_err();
    assert!(matches!(
        err,
        LaporError::CategoryNotFound(name) if name == "NoSuchCategory"
    ));
}

#[test]
fn catalog_can_be_revised_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taxonomy.json");
    std::fs::write(
        &path,
        r#"{
            "schema_version": 2,
            "categories": [
                {"name": "Kebisingan", "subcategories": ["[ENV] Tingkat kebisingan melebihi baku mutu"]}
            ]
        }"#,
    )
    .unwrap();

    let taxonomy = Taxonomy::from_path(&path).unwrap();
    assert_eq!(taxonomy.schema_version, 2);
    assert!(taxonomy.contains("Kebisingan"));
    assert!(!taxonomy.contains("Pengelolaan Sampah"));
}

#[test]
fn digest_pins_the_catalog_revision() {
    let taxonomy = Taxonomy::builtin();
    let first = taxonomy.digest().unwrap();
    let second = taxonomy.digest().unwrap();
    assert_eq!(first, second);

    let revised = Taxonomy::from_json(
        r#"{
            "schema_version": 1,
            "categories": [{"name": "Kebisingan", "subcategories": ["x"]}]
        }"#,
    )
    .unwrap();
    assert_ne!(first, revised.digest().unwrap());
}
