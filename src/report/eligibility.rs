//! Sellability check via the listings-restrictions provider.

use crate::report::model::Eligibility;
use crate::spapi::client::RestrictionsProvider;
use crate::spapi::models::RestrictionsPayload;
use anyhow::Result;
use tracing::debug;

/// Only new-condition restrictions are checked; used-condition restrictions
/// are out of scope.
const CONDITION_TYPE: &str = "new_new";

/// Checks whether the seller may list this identifier.
///
/// The caller maps a provider failure to sellable-unknown; this function
/// only reduces a successful response.
pub async fn check(
    provider: &dyn RestrictionsProvider,
    asin: &str,
    seller_id: &str,
) -> Result<Eligibility> {
    let payload = provider.listing_restrictions(asin, seller_id, CONDITION_TYPE).await?;
    Ok(reduce(&payload))
}

/// Reduces restriction groups to a sellable flag plus a flattened,
/// order-preserving reason list (duplicates allowed).
pub fn reduce(payload: &RestrictionsPayload) -> Eligibility {
    let sellable = payload.restrictions.is_empty();

    let reasons: Vec<String> = payload
        .restrictions
        .iter()
        .flat_map(|group| group.reasons.iter())
        .filter_map(|reason| reason.message.clone())
        .collect();

    debug!("Sellable: {}, restriction reasons: {}", sellable, reasons.len());

    Eligibility { sellable, reasons }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockRestrictionsProvider {
        json: String,
        fail: bool,
    }

    #[async_trait]
    impl RestrictionsProvider for MockRestrictionsProvider {
        async fn listing_restrictions(
            &self,
            _asin: &str,
            _seller_id: &str,
            condition_type: &str,
        ) -> Result<RestrictionsPayload> {
            assert_eq!(condition_type, "new_new");
            if self.fail {
                anyhow::bail!("Simulated provider failure")
            }
            Ok(serde_json::from_str(&self.json)?)
        }
    }

    #[tokio::test]
    async fn test_no_restrictions_is_sellable() {
        let provider =
            MockRestrictionsProvider { json: r#"{"restrictions": []}"#.to_string(), fail: false };

        let eligibility = check(&provider, "B08N5WRWNW", "SELLER123").await.unwrap();
        assert!(eligibility.sellable);
        assert!(eligibility.reasons.is_empty());
    }

    #[tokio::test]
    async fn test_restrictions_flatten_in_order() {
        let provider = MockRestrictionsProvider {
            json: r#"{"restrictions": [
                {"reasons": [{"message": "Approval required"}, {"message": "Brand gated"}]},
                {"reasons": [{"message": "Approval required"}]}
            ]}"#
            .to_string(),
            fail: false,
        };

        let eligibility = check(&provider, "B08N5WRWNW", "SELLER123").await.unwrap();
        assert!(!eligibility.sellable);
        // Order-preserving, duplicates allowed.
        assert_eq!(
            eligibility.reasons,
            vec!["Approval required", "Brand gated", "Approval required"]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let provider = MockRestrictionsProvider { json: String::new(), fail: true };

        let result = check(&provider, "B08N5WRWNW", "SELLER123").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_reduce_skips_empty_messages() {
        let payload: RestrictionsPayload = serde_json::from_str(
            r#"{"restrictions": [{"reasons": [{"message": "Gated"}, {}]}]}"#,
        )
        .unwrap();

        let eligibility = reduce(&payload);
        assert!(!eligibility.sellable);
        assert_eq!(eligibility.reasons, vec!["Gated"]);
    }

    #[test]
    fn test_reduce_restriction_without_reasons() {
        let payload: RestrictionsPayload =
            serde_json::from_str(r#"{"restrictions": [{"reasons": []}]}"#).unwrap();

        // A restriction with no reasons still blocks selling.
        let eligibility = reduce(&payload);
        assert!(!eligibility.sellable);
        assert!(eligibility.reasons.is_empty());
    }
}
