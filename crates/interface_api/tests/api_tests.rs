//! End-to-end HTTP tests over the full in-memory stack
//!
//! Each test spins up the real router with real services wired against the
//! in-memory document store, then drives it through `axum_test::TestServer`
//! exactly the way a client would.

use std::sync::Arc;

use axum_test::TestServer;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use uuid::Uuid;

use domain_claims::ClaimService;
use domain_pricing::{PlanBook, PricingCatalog};
use domain_warranty::{PaymentGatewayPort, WarrantyService};
use infra_store::{
    MemoryActivityLog, MemoryClaimStore, MemoryStore, MemoryWarrantyStore, StaticGateway,
    TrustedCallbackGateway,
};
use interface_api::auth::{create_token, roles};
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};

const TEST_SECRET: &str = "api-test-secret";

const PRIMARY_IMEI: &str = "356938035643809";
const SECONDARY_IMEI: &str = "490154203237518";

fn test_config() -> ApiConfig {
    ApiConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..ApiConfig::default()
    }
}

fn app_state(gateway: Arc<dyn PaymentGatewayPort>) -> AppState {
    let config = test_config();
    let timezone = config
        .business_timezone()
        .expect("test timezone must parse");

    let store = Arc::new(MemoryStore::new());
    let warranty_store = Arc::new(MemoryWarrantyStore::new(store.clone()));
    let claim_store = Arc::new(MemoryClaimStore::new(store.clone()));
    let activity_log = Arc::new(MemoryActivityLog::new(store.clone()));
    let plans = Arc::new(PlanBook::standard());

    let warranty_service = Arc::new(WarrantyService::new(
        warranty_store.clone(),
        gateway,
        activity_log.clone(),
        plans.clone(),
        timezone,
    ));
    let claim_service = Arc::new(ClaimService::new(
        claim_store,
        warranty_store,
        activity_log.clone(),
    ));

    AppState {
        warranty: warranty_service,
        claims: claim_service,
        plans,
        catalog: PricingCatalog::standard(),
        activity: activity_log,
        health: store,
        config,
    }
}

fn server() -> TestServer {
    let state = app_state(Arc::new(TrustedCallbackGateway::new()));
    TestServer::new(create_router(state)).expect("test server should start")
}

fn declining_server(reason: &str) -> TestServer {
    let state = app_state(Arc::new(StaticGateway::declining(reason)));
    TestServer::new(create_router(state)).expect("test server should start")
}

fn token_for(role: &str) -> String {
    create_token(&Uuid::new_v4().to_string(), role, TEST_SECRET, 3600)
        .expect("token creation should succeed")
}

fn admin_token() -> String {
    token_for(roles::ADMIN)
}

fn owner_token() -> String {
    token_for(roles::SHOP_OWNER)
}

fn checker_token() -> String {
    token_for(roles::PHONE_CHECKER)
}

fn inspection_body(imei: &str) -> Value {
    json!({
        "imei": imei,
        "make": "Samsung",
        "model": "Galaxy S21",
        "device_price": "22500.00",
        "grade": "A",
        "condition": {
            "screen": "flawless",
            "body": "scratched",
            "battery_health_percent": 92,
            "all_functions_ok": true,
            "notes": null
        }
    })
}

fn decimal_field(value: &Value, field: &str) -> Decimal {
    value[field]
        .as_str()
        .unwrap_or_else(|| panic!("{field} should serialize as a string"))
        .parse()
        .unwrap_or_else(|_| panic!("{field} should parse as a decimal"))
}

/// Submits an inspection for the given IMEI and returns the report JSON
async fn submit_inspection(server: &TestServer, imei: &str) -> Value {
    let response = server
        .post("/api/v1/inspections")
        .authorization_bearer(checker_token())
        .json(&inspection_body(imei))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Looks up the standard grade-A twelve-month plan covering the test device
async fn covering_plan_id(server: &TestServer) -> String {
    let response = server
        .get("/api/v1/plans")
        .authorization_bearer(owner_token())
        .await;
    response.assert_status_ok();
    let plans = response.json::<Vec<Value>>();
    let plan = plans
        .iter()
        .find(|p| p["sku"] == "DG-B04-A-12M")
        .expect("standard plan book should carry the covering sku");
    plan["id"].as_str().expect("plan id is a uuid").to_string()
}

/// Drives a report through submit, purchase start, and payment confirmation
///
/// Returns the report id, the customer id used for the purchase, and the
/// issued warranty JSON.
async fn full_purchase(server: &TestServer) -> (String, String, Value) {
    let report = submit_inspection(server, PRIMARY_IMEI).await;
    let report_id = report["id"].as_str().expect("report id").to_string();
    let plan_id = covering_plan_id(server).await;
    let customer_id = Uuid::new_v4().to_string();

    let intent_response = server
        .post(&format!("/api/v1/inspections/{report_id}/purchase"))
        .authorization_bearer(owner_token())
        .json(&json!({ "plan_id": plan_id, "customer_id": customer_id }))
        .await;
    intent_response.assert_status_ok();
    let intent = intent_response.json::<Value>();
    assert_eq!(decimal_field(&intent, "amount"), dec!(899));

    let order_id = intent["order_id"].as_str().expect("order id").to_string();
    let confirm_response = server
        .post(&format!("/api/v1/inspections/{report_id}/purchase/confirm"))
        .authorization_bearer(owner_token())
        .json(&json!({ "order_id": order_id, "payment_id": "PAY-API-0001" }))
        .await;
    confirm_response.assert_status_ok();
    let warranty = confirm_response.json::<Value>();

    (report_id, customer_id, warranty)
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn health_endpoint_is_public() {
        let server = server();

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn readiness_probes_the_store() {
        let server = server();

        let response = server.get("/health/ready").await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["status"], "ready");
    }
}

mod auth_tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let server = server();

        let response = server.get("/api/v1/inspections").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let server = server();

        let response = server
            .get("/api/v1/inspections")
            .authorization_bearer("not-a-real-token")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_with_unknown_role_is_unauthorized() {
        let server = server();
        let token = create_token(&Uuid::new_v4().to_string(), "auditor", TEST_SECRET, 3600)
            .expect("token creation should succeed");

        let response = server
            .get("/api/v1/inspections")
            .authorization_bearer(token)
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn role_gates_return_forbidden() {
        let server = server();

        // Phone checkers cannot file claims
        let response = server
            .post("/api/v1/claims")
            .authorization_bearer(checker_token())
            .json(&json!({
                "report_id": Uuid::new_v4().to_string(),
                "customer_id": Uuid::new_v4().to_string(),
                "issue_description": "Screen cracked"
            }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }
}

mod pricing_tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn plan_book_lists_ninety_plans() {
        let server = server();

        let response = server
            .get("/api/v1/plans")
            .authorization_bearer(owner_token())
            .await;
        response.assert_status_ok();
        let plans = response.json::<Vec<Value>>();
        assert_eq!(plans.len(), 90);
    }

    #[tokio::test]
    async fn plan_listing_filters_by_grade() {
        let server = server();

        let response = server
            .get("/api/v1/plans")
            .add_query_param("grade", "B")
            .authorization_bearer(owner_token())
            .await;
        response.assert_status_ok();
        let plans = response.json::<Vec<Value>>();
        assert_eq!(plans.len(), 30);
        assert!(plans.iter().all(|p| p["grade"] == "B"));
    }

    #[tokio::test]
    async fn unknown_grade_is_rejected() {
        let server = server();

        let response = server
            .get("/api/v1/plans")
            .add_query_param("grade", "D")
            .authorization_bearer(owner_token())
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn quote_matches_the_anchor_plan() {
        let server = server();

        let response = server
            .get("/api/v1/plans/quote")
            .add_query_param("device_price", "24999")
            .add_query_param("grade", "A")
            .add_query_param("term_months", "12")
            .authorization_bearer(owner_token())
            .await;
        response.assert_status_ok();
        let quote = response.json::<Value>();
        assert_eq!(decimal_field(&quote, "price"), dec!(899));
        assert_eq!(decimal_field(&quote, "daily_price"), dec!(2.46));
        assert_eq!(quote["grade"], "A");
        assert_eq!(quote["currency"], "INR");
    }

    #[tokio::test]
    async fn every_price_gets_a_quote() {
        let server = server();

        // Far above the last bounded band; the open-ended tier picks it up
        let response = server
            .get("/api/v1/plans/quote")
            .add_query_param("device_price", "999999")
            .authorization_bearer(owner_token())
            .await;
        response.assert_status_ok();
        let quote = response.json::<Value>();
        assert_eq!(decimal_field(&quote, "price"), dec!(2999));
        assert_eq!(quote["term_months"], 12);
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let server = server();

        let response = server
            .get("/api/v1/plans/quote")
            .add_query_param("device_price", "-5")
            .authorization_bearer(owner_token())
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unsupported_term_is_rejected() {
        let server = server();

        let response = server
            .get("/api/v1/plans/quote")
            .add_query_param("device_price", "24999")
            .add_query_param("term_months", "9")
            .authorization_bearer(owner_token())
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod warranty_flow_tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn submission_requires_the_phone_checker_role() {
        let server = server();

        let response = server
            .post("/api/v1/inspections")
            .authorization_bearer(owner_token())
            .json(&inspection_body(PRIMARY_IMEI))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn full_lifecycle_reaches_activated() {
        let server = server();

        let report = submit_inspection(&server, PRIMARY_IMEI).await;
        assert_eq!(report["status"], "not-purchased");
        assert_eq!(report["effective_status"], "not-purchased");
        assert_eq!(report["fine_status"], "Not-Fined");

        let (report_id, _, warranty) = {
            // Keep driving the same report through the purchase flow
            let report_id = report["id"].as_str().expect("report id").to_string();
            let plan_id = covering_plan_id(&server).await;
            let customer_id = Uuid::new_v4().to_string();

            let intent = server
                .post(&format!("/api/v1/inspections/{report_id}/purchase"))
                .authorization_bearer(owner_token())
                .json(&json!({ "plan_id": plan_id, "customer_id": customer_id }))
                .await;
            intent.assert_status_ok();
            let intent = intent.json::<Value>();

            // Started purchases show as processing until payment settles
            let processing = server
                .get(&format!("/api/v1/inspections/{report_id}"))
                .authorization_bearer(owner_token())
                .await;
            processing.assert_status_ok();
            assert_eq!(processing.json::<Value>()["status"], "processing");

            let order_id = intent["order_id"].as_str().expect("order id").to_string();
            let confirm = server
                .post(&format!("/api/v1/inspections/{report_id}/purchase/confirm"))
                .authorization_bearer(owner_token())
                .json(&json!({ "order_id": order_id, "payment_id": "PAY-API-0001" }))
                .await;
            confirm.assert_status_ok();
            (report_id, customer_id, confirm.json::<Value>())
        };

        assert_eq!(warranty["standing"], "active");
        assert!(warranty["days_remaining"].as_i64().unwrap_or(0) >= 365);
        assert_eq!(warranty["claim_status"], "no-claim");
        assert_eq!(warranty["plan_sku"], "DG-B04-A-12M");
        assert_eq!(decimal_field(&warranty, "price"), dec!(899));

        let purchased = server
            .get(&format!("/api/v1/inspections/{report_id}"))
            .authorization_bearer(owner_token())
            .await;
        purchased.assert_status_ok();
        let purchased = purchased.json::<Value>();
        assert_eq!(purchased["status"], "purchased");
        assert_eq!(purchased["effective_status"], "purchased");
        assert_eq!(purchased["warranty_id"], warranty["id"]);

        let activated = server
            .post(&format!("/api/v1/inspections/{report_id}/activate"))
            .authorization_bearer(admin_token())
            .await;
        activated.assert_status_ok();
        assert_eq!(activated.json::<Value>()["status"], "activated");

        let coverage = server
            .get(&format!("/api/v1/inspections/{report_id}/warranty"))
            .authorization_bearer(owner_token())
            .await;
        coverage.assert_status_ok();
        assert_eq!(coverage.json::<Value>()["id"], warranty["id"]);
    }

    #[tokio::test]
    async fn duplicate_imei_conflicts() {
        let server = server();

        submit_inspection(&server, PRIMARY_IMEI).await;
        let response = server
            .post("/api/v1/inspections")
            .authorization_bearer(checker_token())
            .json(&inspection_body(PRIMARY_IMEI))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_report_is_not_found() {
        let server = server();

        let response = server
            .get(&format!("/api/v1/inspections/{}", Uuid::new_v4()))
            .authorization_bearer(owner_token())
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lookup_by_imei_finds_the_report() {
        let server = server();

        let report = submit_inspection(&server, PRIMARY_IMEI).await;
        let response = server
            .get(&format!("/api/v1/inspections/imei/{PRIMARY_IMEI}"))
            .authorization_bearer(owner_token())
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["id"], report["id"]);
    }

    #[tokio::test]
    async fn malformed_imei_is_rejected() {
        let server = server();

        let response = server
            .post("/api/v1/inspections")
            .authorization_bearer(checker_token())
            .json(&inspection_body("123"))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn fresh_report_can_be_deleted() {
        let server = server();

        let report = submit_inspection(&server, PRIMARY_IMEI).await;
        let report_id = report["id"].as_str().expect("report id");

        let response = server
            .delete(&format!("/api/v1/inspections/{report_id}"))
            .authorization_bearer(admin_token())
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let lookup = server
            .get(&format!("/api/v1/inspections/{report_id}"))
            .authorization_bearer(owner_token())
            .await;
        lookup.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_after_purchase_conflicts() {
        let server = server();

        let (report_id, _, _) = full_purchase(&server).await;
        let response = server
            .delete(&format!("/api/v1/inspections/{report_id}"))
            .authorization_bearer(admin_token())
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn activation_requires_admin() {
        let server = server();

        let (report_id, _, _) = full_purchase(&server).await;
        let response = server
            .post(&format!("/api/v1/inspections/{report_id}/activate"))
            .authorization_bearer(owner_token())
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn mismatched_plan_is_rejected() {
        let server = server();

        let report = submit_inspection(&server, PRIMARY_IMEI).await;
        let report_id = report["id"].as_str().expect("report id");

        // A grade-B plan cannot cover a grade-A report
        let plans = server
            .get("/api/v1/plans")
            .authorization_bearer(owner_token())
            .await
            .json::<Vec<Value>>();
        let wrong_plan = plans
            .iter()
            .find(|p| p["sku"] == "DG-B04-B-12M")
            .expect("grade-B sku present");

        let response = server
            .post(&format!("/api/v1/inspections/{report_id}/purchase"))
            .authorization_bearer(owner_token())
            .json(&json!({
                "plan_id": wrong_plan["id"],
                "customer_id": Uuid::new_v4().to_string()
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn confirm_with_wrong_order_conflicts() {
        let server = server();

        let report = submit_inspection(&server, PRIMARY_IMEI).await;
        let report_id = report["id"].as_str().expect("report id");
        let plan_id = covering_plan_id(&server).await;

        let intent = server
            .post(&format!("/api/v1/inspections/{report_id}/purchase"))
            .authorization_bearer(owner_token())
            .json(&json!({
                "plan_id": plan_id,
                "customer_id": Uuid::new_v4().to_string()
            }))
            .await;
        intent.assert_status_ok();

        let response = server
            .post(&format!("/api/v1/inspections/{report_id}/purchase/confirm"))
            .authorization_bearer(owner_token())
            .json(&json!({ "order_id": "ORD-WRONG", "payment_id": "PAY-API-0001" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn declined_payment_keeps_the_report_processing() {
        let server = declining_server("insufficient funds");

        let report = submit_inspection(&server, PRIMARY_IMEI).await;
        let report_id = report["id"].as_str().expect("report id");
        let plan_id = covering_plan_id(&server).await;

        let intent = server
            .post(&format!("/api/v1/inspections/{report_id}/purchase"))
            .authorization_bearer(owner_token())
            .json(&json!({
                "plan_id": plan_id,
                "customer_id": Uuid::new_v4().to_string()
            }))
            .await;
        intent.assert_status_ok();
        let intent = intent.json::<Value>();

        let order_id = intent["order_id"].as_str().expect("order id");
        let response = server
            .post(&format!("/api/v1/inspections/{report_id}/purchase/confirm"))
            .authorization_bearer(owner_token())
            .json(&json!({ "order_id": order_id, "payment_id": "PAY-API-0001" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // The purchase can be retried; nothing was committed
        let lookup = server
            .get(&format!("/api/v1/inspections/{report_id}"))
            .authorization_bearer(owner_token())
            .await;
        lookup.assert_status_ok();
        let body = lookup.json::<Value>();
        assert_eq!(body["status"], "processing");
        assert_eq!(body["warranty_id"], Value::Null);
    }

    #[tokio::test]
    async fn fines_are_admin_only() {
        let server = server();

        let report = submit_inspection(&server, PRIMARY_IMEI).await;
        let report_id = report["id"].as_str().expect("report id");
        let body = json!({ "reason": "Inspection photos do not match the device" });

        let denied = server
            .post(&format!("/api/v1/inspections/{report_id}/fine"))
            .authorization_bearer(owner_token())
            .json(&body)
            .await;
        denied.assert_status(StatusCode::FORBIDDEN);

        let fined = server
            .post(&format!("/api/v1/inspections/{report_id}/fine"))
            .authorization_bearer(admin_token())
            .json(&body)
            .await;
        fined.assert_status_ok();
        assert_eq!(fined.json::<Value>()["fine_status"], "Fined");
    }
}

mod claim_flow_tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn claim_lifecycle_reaches_approved() {
        let server = server();
        let (report_id, customer_id, _) = full_purchase(&server).await;

        let submitted = server
            .post("/api/v1/claims")
            .authorization_bearer(owner_token())
            .json(&json!({
                "report_id": report_id,
                "customer_id": customer_id,
                "issue_description": "Display flickers after a drop"
            }))
            .await;
        submitted.assert_status(StatusCode::CREATED);
        let claim = submitted.json::<Value>();
        assert_eq!(claim["status"], "Submitted");
        assert!(claim["claim_number"]
            .as_str()
            .expect("claim number")
            .starts_with("CLM-"));
        let claim_id = claim["id"].as_str().expect("claim id");

        let processing = server
            .put(&format!("/api/v1/claims/{claim_id}/status"))
            .authorization_bearer(admin_token())
            .json(&json!({ "status": "Processing" }))
            .await;
        processing.assert_status_ok();
        assert_eq!(processing.json::<Value>()["status"], "Processing");

        let approved = server
            .put(&format!("/api/v1/claims/{claim_id}/status"))
            .authorization_bearer(admin_token())
            .json(&json!({ "status": "Approved", "note": "Replaced the digitizer" }))
            .await;
        approved.assert_status_ok();
        let approved = approved.json::<Value>();
        assert_eq!(approved["status"], "Approved");
        assert_eq!(approved["decision_note"], "Replaced the digitizer");
        assert!(approved["decided_by"].is_string());
        assert!(approved["decided_at"].is_string());

        // The coverage records the settlement
        let warranty = server
            .get(&format!("/api/v1/inspections/{report_id}/warranty"))
            .authorization_bearer(owner_token())
            .await;
        warranty.assert_status_ok();
        let warranty = warranty.json::<Value>();
        assert_eq!(warranty["claim_status"], "settled");
        assert_eq!(warranty["claim_id"].as_str(), Some(claim_id));
    }

    #[tokio::test]
    async fn second_claim_on_settled_coverage_conflicts() {
        let server = server();
        let (report_id, customer_id, _) = full_purchase(&server).await;

        let first = server
            .post("/api/v1/claims")
            .authorization_bearer(owner_token())
            .json(&json!({
                "report_id": report_id,
                "customer_id": customer_id,
                "issue_description": "Display flickers after a drop"
            }))
            .await;
        first.assert_status(StatusCode::CREATED);
        let claim_id = first.json::<Value>()["id"]
            .as_str()
            .expect("claim id")
            .to_string();

        server
            .put(&format!("/api/v1/claims/{claim_id}/status"))
            .authorization_bearer(admin_token())
            .json(&json!({ "status": "Approved" }))
            .await
            .assert_status_ok();

        let second = server
            .post("/api/v1/claims")
            .authorization_bearer(owner_token())
            .json(&json!({
                "report_id": report_id,
                "customer_id": customer_id,
                "issue_description": "Battery drains overnight"
            }))
            .await;
        second.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn open_claim_blocks_another_submission() {
        let server = server();
        let (report_id, customer_id, _) = full_purchase(&server).await;

        let body = json!({
            "report_id": report_id,
            "customer_id": customer_id,
            "issue_description": "Display flickers after a drop"
        });

        server
            .post("/api/v1/claims")
            .authorization_bearer(owner_token())
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);

        let second = server
            .post("/api/v1/claims")
            .authorization_bearer(owner_token())
            .json(&body)
            .await;
        second.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn decisions_require_admin() {
        let server = server();
        let (report_id, customer_id, _) = full_purchase(&server).await;

        let submitted = server
            .post("/api/v1/claims")
            .authorization_bearer(owner_token())
            .json(&json!({
                "report_id": report_id,
                "customer_id": customer_id,
                "issue_description": "Display flickers after a drop"
            }))
            .await;
        let claim_id = submitted.json::<Value>()["id"]
            .as_str()
            .expect("claim id")
            .to_string();

        let response = server
            .put(&format!("/api/v1/claims/{claim_id}/status"))
            .authorization_bearer(owner_token())
            .json(&json!({ "status": "Approved" }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn terminal_claims_reject_further_decisions() {
        let server = server();
        let (report_id, customer_id, _) = full_purchase(&server).await;

        let submitted = server
            .post("/api/v1/claims")
            .authorization_bearer(owner_token())
            .json(&json!({
                "report_id": report_id,
                "customer_id": customer_id,
                "issue_description": "Display flickers after a drop"
            }))
            .await;
        let claim_id = submitted.json::<Value>()["id"]
            .as_str()
            .expect("claim id")
            .to_string();

        server
            .put(&format!("/api/v1/claims/{claim_id}/status"))
            .authorization_bearer(admin_token())
            .json(&json!({ "status": "Rejected", "note": "Damage predates the coverage" }))
            .await
            .assert_status_ok();

        let response = server
            .put(&format!("/api/v1/claims/{claim_id}/status"))
            .authorization_bearer(admin_token())
            .json(&json!({ "status": "Approved" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn claims_from_the_wrong_customer_are_rejected() {
        let server = server();
        let (report_id, _, _) = full_purchase(&server).await;

        let response = server
            .post("/api/v1/claims")
            .authorization_bearer(owner_token())
            .json(&json!({
                "report_id": report_id,
                "customer_id": Uuid::new_v4().to_string(),
                "issue_description": "Display flickers after a drop"
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn claim_listing_filters_by_status() {
        let server = server();
        let (report_id, customer_id, _) = full_purchase(&server).await;

        let submitted = server
            .post("/api/v1/claims")
            .authorization_bearer(owner_token())
            .json(&json!({
                "report_id": report_id,
                "customer_id": customer_id,
                "issue_description": "Display flickers after a drop"
            }))
            .await;
        submitted.assert_status(StatusCode::CREATED);
        let claim_id = submitted.json::<Value>()["id"]
            .as_str()
            .expect("claim id")
            .to_string();

        let open = server
            .get("/api/v1/claims")
            .add_query_param("status", "Submitted")
            .authorization_bearer(owner_token())
            .await;
        open.assert_status_ok();
        assert_eq!(open.json::<Vec<Value>>().len(), 1);

        server
            .put(&format!("/api/v1/claims/{claim_id}/status"))
            .authorization_bearer(admin_token())
            .json(&json!({ "status": "Approved" }))
            .await
            .assert_status_ok();

        let still_open = server
            .get("/api/v1/claims")
            .add_query_param("status", "Submitted")
            .authorization_bearer(owner_token())
            .await;
        still_open.assert_status_ok();
        assert_eq!(still_open.json::<Vec<Value>>().len(), 0);

        let approved = server
            .get("/api/v1/claims")
            .add_query_param("status", "Approved")
            .authorization_bearer(owner_token())
            .await;
        approved.assert_status_ok();
        let approved = approved.json::<Vec<Value>>();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0]["id"].as_str(), Some(claim_id.as_str()));
    }
}

mod activity_tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn activity_feed_is_admin_only() {
        let server = server();

        let response = server
            .get("/api/v1/activity")
            .authorization_bearer(owner_token())
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn activity_feed_lists_newest_first() {
        let server = server();

        let report = submit_inspection(&server, PRIMARY_IMEI).await;
        let report_id = report["id"].as_str().expect("report id");
        let plan_id = covering_plan_id(&server).await;

        server
            .post(&format!("/api/v1/inspections/{report_id}/purchase"))
            .authorization_bearer(owner_token())
            .json(&json!({
                "plan_id": plan_id,
                "customer_id": Uuid::new_v4().to_string()
            }))
            .await
            .assert_status_ok();

        let response = server
            .get("/api/v1/activity")
            .authorization_bearer(admin_token())
            .await;
        response.assert_status_ok();
        let feed = response.json::<Vec<Value>>();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0]["action"], "purchase_started");
        assert_eq!(feed[1]["action"], "inspection_submitted");
        assert_eq!(feed[1]["imei"], PRIMARY_IMEI);
    }

    #[tokio::test]
    async fn fine_appears_in_the_activity_feed() {
        let server = server();

        let report = submit_inspection(&server, SECONDARY_IMEI).await;
        let report_id = report["id"].as_str().expect("report id");

        server
            .post(&format!("/api/v1/inspections/{report_id}/fine"))
            .authorization_bearer(admin_token())
            .json(&json!({ "reason": "Device photos reused from another listing" }))
            .await
            .assert_status_ok();

        let response = server
            .get("/api/v1/activity")
            .add_query_param("limit", "1")
            .authorization_bearer(admin_token())
            .await;
        response.assert_status_ok();
        let feed = response.json::<Vec<Value>>();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0]["action"], "fine_issued");
        assert_eq!(feed[0]["resulting_status"], "Fined");
    }
}
