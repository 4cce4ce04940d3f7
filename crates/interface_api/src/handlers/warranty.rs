//! Warranty lifecycle handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Actor, CustomerId, Money, PlanId, ReportId};
use domain_warranty::{InspectionReport, PaymentReference};

use crate::dto::warranty::{
    ConfirmPurchaseRequest, IssueFineRequest, PurchaseIntentResponse, ReportResponse,
    StartPurchaseRequest, SubmitInspectionRequest, WarrantyResponse,
};
use crate::error::ApiError;
use crate::AppState;

/// Submits a new inspection report
pub async fn submit_inspection(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<SubmitInspectionRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), ApiError> {
    request.validate()?;
    let input = request.into_input()?;
    let report = state.warranty.submit_inspection(&actor, input).await?;

    Ok((StatusCode::CREATED, Json(ReportResponse::from_report(&report))))
}

/// Lists all inspection reports, newest first
pub async fn list_inspections(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportResponse>>, ApiError> {
    let reports = state.warranty.list_reports().await?;
    let mut responses = Vec::with_capacity(reports.len());
    for report in &reports {
        responses.push(report_response(&state, report).await?);
    }

    Ok(Json(responses))
}

/// Fetches a single inspection report
pub async fn get_inspection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportResponse>, ApiError> {
    let report = state.warranty.report(ReportId::from_uuid(id)).await?;
    Ok(Json(report_response(&state, &report).await?))
}

/// Fetches an inspection report by device IMEI
pub async fn get_inspection_by_imei(
    State(state): State<AppState>,
    Path(imei): Path<String>,
) -> Result<Json<ReportResponse>, ApiError> {
    let report = state.warranty.report_by_imei(&imei).await?;
    Ok(Json(report_response(&state, &report).await?))
}

/// Deletes an inspection report that has no warranty activity
pub async fn delete_inspection(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .warranty
        .delete_inspection(&actor, ReportId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Starts a warranty purchase and returns the payment order
pub async fn start_purchase(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<StartPurchaseRequest>,
) -> Result<Json<PurchaseIntentResponse>, ApiError> {
    let intent = state
        .warranty
        .start_purchase(
            &actor,
            ReportId::from_uuid(id),
            PlanId::from_uuid(request.plan_id),
            CustomerId::from_uuid(request.customer_id),
        )
        .await?;

    Ok(Json(PurchaseIntentResponse::from(intent)))
}

/// Completes a purchase once the payment gateway has settled the order
pub async fn confirm_purchase(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<ConfirmPurchaseRequest>,
) -> Result<Json<WarrantyResponse>, ApiError> {
    let payment = PaymentReference::new(request.order_id, request.payment_id);
    let warranty = state
        .warranty
        .complete_purchase(&actor, ReportId::from_uuid(id), payment)
        .await?;

    Ok(Json(WarrantyResponse::from_warranty(&warranty, Utc::now())))
}

/// Activates a purchased warranty
pub async fn activate_warranty(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportResponse>, ApiError> {
    let report = state
        .warranty
        .activate_warranty(&actor, ReportId::from_uuid(id))
        .await?;

    Ok(Json(report_response(&state, &report).await?))
}

/// Issues a fine against an inspection report
pub async fn issue_fine(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<IssueFineRequest>,
) -> Result<Json<ReportResponse>, ApiError> {
    request.validate()?;
    let amount = request.amount.map(Money::inr);
    let report = state
        .warranty
        .issue_fine(&actor, ReportId::from_uuid(id), request.reason, amount)
        .await?;

    Ok(Json(report_response(&state, &report).await?))
}

/// Fetches the warranty issued for an inspection report
pub async fn get_warranty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WarrantyResponse>, ApiError> {
    let warranty = state
        .warranty
        .warranty_for_report(ReportId::from_uuid(id))
        .await?;

    Ok(Json(WarrantyResponse::from_warranty(&warranty, Utc::now())))
}

/// Builds a report response, folding in coverage expiry when one exists
async fn report_response(
    state: &AppState,
    report: &InspectionReport,
) -> Result<ReportResponse, ApiError> {
    if report.has_warranty() {
        let warranty = state.warranty.warranty_for_report(report.id()).await?;
        Ok(ReportResponse::with_coverage(report, &warranty, Utc::now()))
    } else {
        Ok(ReportResponse::from_report(report))
    }
}
