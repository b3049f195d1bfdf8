//! Catalog resolution: title, brand, identifiers, images, package dimensions.

use crate::report::model::{CatalogFacts, Dimensions};
use crate::spapi::client::CatalogProvider;
use crate::spapi::models::{CatalogItem, ValueUnit};
use crate::units;
use anyhow::Result;
use tracing::{debug, warn};

const ATTRIBUTE_FACETS: &[&str] = &["summaries", "identifiers", "attributes"];
const IMAGE_FACETS: &[&str] = &["images"];

/// Resolves catalog facts for an identifier.
///
/// Issues two provider calls: attributes and images, separately, because the
/// provider does not reliably return both facets in one fetch. A failed or
/// empty image fetch leaves the image absent and resolution continues; a
/// failed attributes fetch fails the whole section.
pub async fn resolve(provider: &dyn CatalogProvider, asin: &str) -> Result<CatalogFacts> {
    let item = provider.catalog_item(asin, ATTRIBUTE_FACETS).await?;

    let mut facts = facts_from_item(&item);

    facts.image_url = match provider.catalog_item(asin, IMAGE_FACETS).await {
        Ok(images) => first_image_link(&images),
        Err(e) => {
            warn!("Could not fetch images for {}: {}", asin, e);
            None
        }
    };

    Ok(facts)
}

/// Extracts title, brand, EAN, dimensions and weight from an attributes fetch.
pub fn facts_from_item(item: &CatalogItem) -> CatalogFacts {
    let summary = item.summaries.first();

    let ean = item
        .identifiers
        .iter()
        .flat_map(|group| group.identifiers.iter())
        .find(|id| id.identifier_type == "EAN")
        .map(|id| id.identifier.clone());

    let (dimensions, weight_grams) = match &item.attributes {
        Some(attrs) => {
            let dimensions =
                attrs.item_package_dimensions.first().and_then(|dims| {
                    normalize_dimensions(
                        dims.length.as_ref(),
                        dims.width.as_ref(),
                        dims.height.as_ref(),
                    )
                });
            let weight = attrs
                .item_package_weight
                .first()
                .map(|w| units::to_grams(w.value, w.unit.as_deref().unwrap_or("")));
            (dimensions, weight)
        }
        None => (None, None),
    };

    if dimensions.is_none() {
        debug!("No complete package dimensions available");
    }

    CatalogFacts {
        title: summary.and_then(|s| s.item_name.clone()),
        brand: summary.and_then(|s| s.brand_name.clone()),
        ean,
        image_url: None,
        dimensions,
        weight_grams,
    }
}

/// Converts all three axes to centimeters; a composed result exists only when
/// every axis converted.
fn normalize_dimensions(
    length: Option<&ValueUnit>,
    width: Option<&ValueUnit>,
    height: Option<&ValueUnit>,
) -> Option<Dimensions> {
    let axis = |vu: Option<&ValueUnit>| {
        vu.map(|v| units::to_centimeters(v.value, v.unit.as_deref().unwrap_or("")))
    };

    Some(Dimensions {
        length_cm: axis(length)?,
        width_cm: axis(width)?,
        height_cm: axis(height)?,
    })
}

fn first_image_link(item: &CatalogItem) -> Option<String> {
    item.images.first().and_then(|group| group.images.first()).map(|img| img.link.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockCatalogProvider {
        attributes_json: String,
        images_json: Option<String>,
    }

    #[async_trait]
    impl CatalogProvider for MockCatalogProvider {
        async fn catalog_item(&self, _asin: &str, included_data: &[&str]) -> Result<CatalogItem> {
            if included_data == IMAGE_FACETS {
                match &self.images_json {
                    Some(json) => Ok(serde_json::from_str(json)?),
                    None => anyhow::bail!("Simulated image fetch failure"),
                }
            } else {
                Ok(serde_json::from_str(&self.attributes_json)?)
            }
        }
    }

    fn full_attributes_json() -> String {
        r#"{
            "summaries": [{"itemName": "Widget Deluxe", "brandName": "Acme"}],
            "identifiers": [{"identifiers": [
                {"identifierType": "UPC", "identifier": "012345678905"},
                {"identifierType": "EAN", "identifier": "4006381333931"}
            ]}],
            "attributes": {
                "item_package_dimensions": [{
                    "length": {"value": 10.0, "unit": "inches"},
                    "width": {"value": 4.0, "unit": "inches"},
                    "height": {"value": 2.0, "unit": "inches"}
                }],
                "item_package_weight": [{"value": 2.0, "unit": "pounds"}]
            }
        }"#
        .to_string()
    }

    fn images_json() -> String {
        r#"{"images": [{"images": [{"link": "https://img.example/1.jpg"}]}]}"#.to_string()
    }

    #[tokio::test]
    async fn test_resolve_full() {
        let provider = MockCatalogProvider {
            attributes_json: full_attributes_json(),
            images_json: Some(images_json()),
        };

        let facts = resolve(&provider, "B08N5WRWNW").await.unwrap();

        assert_eq!(facts.title.as_deref(), Some("Widget Deluxe"));
        assert_eq!(facts.brand.as_deref(), Some("Acme"));
        assert_eq!(facts.ean.as_deref(), Some("4006381333931"));
        assert_eq!(facts.image_url.as_deref(), Some("https://img.example/1.jpg"));

        let dims = facts.dimensions.unwrap();
        assert!((dims.length_cm - 25.4).abs() < 1e-9);
        assert!((dims.width_cm - 10.16).abs() < 1e-9);
        assert!((dims.height_cm - 5.08).abs() < 1e-9);

        let weight = facts.weight_grams.unwrap();
        assert!((weight - 907.184).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_image_failure_is_non_fatal() {
        let provider =
            MockCatalogProvider { attributes_json: full_attributes_json(), images_json: None };

        let facts = resolve(&provider, "B08N5WRWNW").await.unwrap();
        assert!(facts.image_url.is_none());
        assert_eq!(facts.title.as_deref(), Some("Widget Deluxe"));
    }

    #[tokio::test]
    async fn test_missing_image_data_is_absent() {
        let provider = MockCatalogProvider {
            attributes_json: full_attributes_json(),
            images_json: Some("{}".to_string()),
        };

        let facts = resolve(&provider, "B08N5WRWNW").await.unwrap();
        assert!(facts.image_url.is_none());
    }

    #[test]
    fn test_ean_not_found_is_absent() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"identifiers": [{"identifiers": [
                {"identifierType": "UPC", "identifier": "012345678905"}
            ]}]}"#,
        )
        .unwrap();

        let facts = facts_from_item(&item);
        assert!(facts.ean.is_none());
    }

    #[test]
    fn test_dimensions_require_all_axes() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"attributes": {"item_package_dimensions": [{
                "length": {"value": 10.0, "unit": "inches"},
                "width": {"value": 4.0, "unit": "inches"}
            }]}}"#,
        )
        .unwrap();

        let facts = facts_from_item(&item);
        assert!(facts.dimensions.is_none());
    }

    #[test]
    fn test_weight_unknown_unit_passes_through() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"attributes": {"item_package_weight": [{"value": 850.0}]}}"#,
        )
        .unwrap();

        let facts = facts_from_item(&item);
        assert_eq!(facts.weight_grams, Some(850.0));
    }

    #[test]
    fn test_empty_item() {
        let facts = facts_from_item(&CatalogItem::default());
        assert!(facts.title.is_none());
        assert!(facts.brand.is_none());
        assert!(facts.ean.is_none());
        assert!(facts.dimensions.is_none());
        assert!(facts.weight_grams.is_none());
    }
}
