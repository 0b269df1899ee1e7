use revlens_core::load_catalog_from_str;

use super::{products_for_brand, resolve_products};

const CATALOG_YAML: &str = r"
categories:
  - name: smartphones
    products:
      - name: Phone A
        brand: Acme
        release_year: 2022
        keywords: [Phone A review]
      - name: Phone B
        brand: Acme
        release_year: 2023
        keywords: [Phone B review]
      - name: Rival X
        brand: Rival
        keywords: [Rival X review]
  - name: saas_crm
    products:
      - name: Acme CRM
        brand: Acme
        keywords: [Acme CRM review]
";

#[test]
fn brand_lookup_spans_categories_and_ignores_case() {
    let catalog = load_catalog_from_str(CATALOG_YAML).expect("valid catalog");
    let products = products_for_brand(&catalog, "acme").expect("brand products");
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Phone A", "Phone B", "Acme CRM"]);
}

#[test]
fn unknown_brand_is_an_error() {
    let catalog = load_catalog_from_str(CATALOG_YAML).expect("valid catalog");
    assert!(products_for_brand(&catalog, "Nokia").is_err());
}

#[test]
fn resolves_products_in_the_order_given() {
    let catalog = load_catalog_from_str(CATALOG_YAML).expect("valid catalog");
    let products = resolve_products(
        &catalog,
        &["Rival X".to_owned(), "Phone A".to_owned()],
    )
    .expect("products");
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Rival X", "Phone A"]);
}

#[test]
fn any_missing_product_fails_the_whole_resolution() {
    let catalog = load_catalog_from_str(CATALOG_YAML).expect("valid catalog");
    assert!(resolve_products(&catalog, &["Phone A".to_owned(), "Ghost".to_owned()]).is_err());
}
