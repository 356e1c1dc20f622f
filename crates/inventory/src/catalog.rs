//! Catalog: registered products and the uniqueness rules for location names.

use std::collections::HashSet;

use serde::Serialize;

use stockflow_core::{DomainError, DomainResult, Entity, LocationKind, LocationName, Sku};

/// A registered product type. The name is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub name: String,
    pub sku: Sku,
}

impl Entity for Product {
    type Id = Sku;

    fn id(&self) -> &Self::Id {
        &self.sku
    }
}

/// Registry of known SKUs and location names.
///
/// Names are unique per kind only: a receiving area and a storage area may
/// share a name. Location order lives in the ledger.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    skus: HashSet<Sku>,
    location_keys: HashSet<(LocationKind, LocationName)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_product(&mut self, name: String, sku: Sku) -> DomainResult<&Product> {
        if self.skus.contains(&sku) {
            return Err(DomainError::already_exists(format!("Product sku {sku}")));
        }

        self.skus.insert(sku.clone());
        self.products.push(Product { name, sku });
        Ok(&self.products[self.products.len() - 1])
    }

    pub fn register_location(&mut self, kind: LocationKind, name: LocationName) -> DomainResult<()> {
        if !self.location_keys.insert((kind, name.clone())) {
            return Err(DomainError::already_exists(format!("{kind} area {name}")));
        }
        Ok(())
    }

    pub fn product(&self, sku: &Sku) -> Option<&Product> {
        self.products.iter().find(|p| &p.sku == sku)
    }

    /// Products in registration order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_sku_is_rejected() {
        let mut catalog = Catalog::new();
        catalog.register_product("foobar".into(), Sku::new("A123")).unwrap();

        let err = catalog
            .register_product("other".into(), Sku::new("A123"))
            .unwrap_err();
        assert_eq!(err, DomainError::AlreadyExists("Product sku A123".into()));
        assert_eq!(catalog.products().len(), 1);
        assert_eq!(catalog.product(&Sku::new("A123")).unwrap().name, "foobar");
    }

    #[test]
    fn location_names_are_unique_per_kind_only() {
        let mut catalog = Catalog::new();
        catalog
            .register_location(LocationKind::Receiving, LocationName::new("DOCK"))
            .unwrap();
        catalog
            .register_location(LocationKind::Storage, LocationName::new("DOCK"))
            .unwrap();

        let err = catalog
            .register_location(LocationKind::Storage, LocationName::new("DOCK"))
            .unwrap_err();
        assert_eq!(err.code(), "already_exists");
        assert_eq!(err.to_string(), "Storage area DOCK already exists");
    }

    #[test]
    fn empty_identifiers_are_accepted() {
        let mut catalog = Catalog::new();
        assert!(catalog.register_product(String::new(), Sku::new("")).is_ok());
        assert!(
            catalog
                .register_location(LocationKind::Storage, LocationName::new(""))
                .is_ok()
        );
    }

    #[test]
    fn products_keep_registration_order() {
        let mut catalog = Catalog::new();
        for sku in ["B2", "A1", "C3"] {
            catalog.register_product(format!("p-{sku}"), Sku::new(sku)).unwrap();
        }
        let skus: Vec<_> = catalog.products().iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["B2", "A1", "C3"]);
    }
}
