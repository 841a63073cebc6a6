/// Catalog manifest, relative to the asset root.
pub const CATALOG_MANIFEST_PATH: &str = "catalog/catalog.json";
