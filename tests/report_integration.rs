//! End-to-end report pipeline tests: real `SpApiClient` against wiremock,
//! plus the failure-containment contract through the assembler.

use amz_intel::benchmark::BenchmarkTables;
use amz_intel::commands::ReportCommand;
use amz_intel::config::{Config, OutputFormat};
use amz_intel::rates::{ExchangeRateCache, RateProvider};
use amz_intel::spapi::client::SpApiClient;
use amz_intel::spapi::credentials::{CredentialBundle, CredentialStore};
use amz_intel::spapi::marketplaces::Marketplace;
use amz_intel::spapi::models::RatesPayload;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FixedRates;

#[async_trait]
impl RateProvider for FixedRates {
    async fn latest(&self, base: &str) -> Result<RatesPayload> {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), 1.25);
        Ok(RatesPayload { base: base.to_string(), rates })
    }
}

fn test_bundle() -> CredentialBundle {
    CredentialBundle {
        refresh_token: "rt".to_string(),
        lwa_app_id: "app".to_string(),
        lwa_client_secret: "secret".to_string(),
        seller_id: "SELLER123".to_string(),
    }
}

fn test_command(target_currency: Option<&str>) -> ReportCommand {
    let config = Config {
        format: OutputFormat::Json,
        target_currency: target_currency.map(|c| c.to_string()),
        ..Config::default()
    };

    ReportCommand::new(
        config,
        CredentialStore::new(),
        ExchangeRateCache::new(Arc::new(FixedRates), Duration::from_secs(3600)),
        BenchmarkTables::empty(),
    )
}

fn test_client(server: &MockServer) -> SpApiClient {
    SpApiClient::with_urls(
        Marketplace::Us,
        test_bundle(),
        Duration::from_secs(5),
        Some(server.uri()),
        Some(format!("{}/auth/o2/token", server.uri())),
    )
    .unwrap()
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/o2/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"access_token": "token-abc", "expires_in": 3600}"#),
        )
        .mount(server)
        .await;
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/catalog/2022-04-01/items/B08N5WRWNW"))
        .and(query_param("includedData", "summaries,identifiers,attributes"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "summaries": [{"itemName": "Widget Deluxe", "brandName": "Acme"}],
                "identifiers": [{"identifiers": [
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
            }"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/catalog/2022-04-01/items/B08N5WRWNW"))
        .and(query_param("includedData", "images"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"images": [{"images": [{"link": "https://img.example/1.jpg"}]}]}"#,
        ))
        .mount(server)
        .await;
}

async fn mount_offers(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products/pricing/v0/items/B08N5WRWNW/offers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"payload": {"Offers": [
                {"ListingPrice": {"Amount": 17.0, "CurrencyCode": "USD"},
                 "Shipping": {"Amount": 3.5, "CurrencyCode": "USD"},
                 "IsFulfilledByAmazon": false},
                {"ListingPrice": {"Amount": 20.0, "CurrencyCode": "USD"},
                 "IsFulfilledByAmazon": true, "IsBuyBoxWinner": true}
            ]}}"#,
        ))
        .mount(server)
        .await;
}

async fn mount_restrictions(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/listings/2021-08-01/restrictions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"restrictions": []}"#))
        .mount(server)
        .await;
}

async fn mount_fees(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/products/fees/v0/items/B08N5WRWNW/feesEstimate"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"payload": {"FeesEstimateResult": {
                "Status": "Success",
                "FeesEstimate": {
                    "TotalFeesEstimate": {"Amount": 5.5, "CurrencyCode": "USD"},
                    "FeeDetailList": [
                        {"FeeType": "ReferralFee",
                         "FeeAmount": {"Amount": 2.5, "CurrencyCode": "USD"}},
                        {"FeeType": "FBAFees",
                         "FeeAmount": {"Amount": 3.0, "CurrencyCode": "USD"}}
                    ]
                }
            }}}"#,
        ))
        .mount(server)
        .await;
}

async fn run_report(cmd: &ReportCommand, server: &MockServer) -> serde_json::Value {
    let client = test_client(server);
    let output = cmd
        .execute_with_providers(
            &client,
            Marketplace::Us,
            "SELLER123",
            &["B08N5WRWNW".to_string()],
        )
        .await
        .unwrap();

    serde_json::from_str(&output).unwrap()
}

#[tokio::test]
async fn full_pipeline_over_http() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_catalog(&server).await;
    mount_offers(&server).await;
    mount_restrictions(&server).await;
    mount_fees(&server).await;

    let cmd = test_command(None);
    let report = run_report(&cmd, &server).await;

    assert_eq!(report["asin"], "B08N5WRWNW");
    assert_eq!(report["marketplace"], "US");
    assert_eq!(report["title"], "Widget Deluxe");
    assert_eq!(report["brand"], "Acme");
    assert_eq!(report["ean"], "4006381333931");
    assert_eq!(report["image_url"], "https://img.example/1.jpg");
    assert_eq!(report["dimensions_display"], "25.40 x 10.16 x 5.08 cm");
    assert_eq!(report["sellable"], true);

    // Sorted ascending by effective price, buy-box first at 20.0.
    let offers = report["offers"].as_array().unwrap();
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0]["effective_price"], 20.0);
    assert_eq!(offers[1]["effective_price"], 20.5);
    assert_eq!(report["reference_price"], 20.0);

    assert_eq!(report["fees"]["total_fees"], 5.5);
    assert_eq!(report["fees"]["net_profit"], 14.5);
}

#[tokio::test]
async fn catalog_failure_degrades_only_that_section() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    // No catalog mock: those calls come back 404.
    mount_offers(&server).await;
    mount_restrictions(&server).await;
    mount_fees(&server).await;

    let cmd = test_command(None);
    let report = run_report(&cmd, &server).await;

    // Catalog section fields are null...
    assert!(report["title"].is_null());
    assert!(report["brand"].is_null());
    assert!(report["ean"].is_null());
    assert!(report["dimensions"].is_null());
    assert!(report["weight_grams"].is_null());

    // ...while the rest of the report is intact and the request succeeded.
    assert_eq!(report["sellable"], true);
    assert_eq!(report["offers"].as_array().unwrap().len(), 2);
    assert_eq!(report["reference_price"], 20.0);
    assert_eq!(report["fees"]["net_profit"], 14.5);
}

#[tokio::test]
async fn restrictions_failure_leaves_sellable_unknown() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_catalog(&server).await;
    mount_offers(&server).await;
    mount_fees(&server).await;

    Mock::given(method("GET"))
        .and(path("/listings/2021-08-01/restrictions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let cmd = test_command(None);
    let report = run_report(&cmd, &server).await;

    // Unknown, not unsellable.
    assert!(report["sellable"].is_null());
    assert_eq!(report["restriction_reasons"].as_array().unwrap().len(), 0);
    assert_eq!(report["reference_price"], 20.0);
}

#[tokio::test]
async fn converted_figures_attached_for_target_currency() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_catalog(&server).await;
    mount_offers(&server).await;
    mount_restrictions(&server).await;
    mount_fees(&server).await;

    let cmd = test_command(Some("EUR"));
    let report = run_report(&cmd, &server).await;

    let converted = &report["converted"];
    assert_eq!(converted["currency"], "EUR");
    // Table base EUR with USD at 1.25: 20 USD -> 16 EUR, and every present
    // monetary field converts, fee components included.
    assert_eq!(converted["reference_price"], 16.0);
    assert_eq!(converted["referral_fee"], 2.0);
    assert_eq!(converted["fulfillment_fee"], 2.4);
    assert_eq!(converted["total_fees"], 4.4);
    assert_eq!(converted["net_profit"], 11.6);
}
