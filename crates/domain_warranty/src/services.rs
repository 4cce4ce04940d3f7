//! Warranty domain service
//!
//! The WarrantyService orchestrates the inspection and purchase lifecycle
//! against the store, the payment gateway and the activity log. Role checks
//! run before any read or write; every successful mutation appends exactly
//! one activity record, and a failed append never fails the operation.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use core_kernel::{
    ActivityLogPort, ActivityRecord, Actor, CoveragePeriod, CustomerId, Money, PlanId, ReportId,
    Role, Timezone, WarrantyId,
};
use domain_pricing::{Grade, PlanBook};

use crate::error::WarrantyError;
use crate::events::WarrantyEvent;
use crate::imei::Imei;
use crate::ports::{PaymentGatewayPort, PaymentVerdict, WarrantyStore};
use crate::report::{ConditionReport, InspectionReport, InspectionReportBuilder, WarrantyStatus};
use crate::warranty::{IssuedWarranty, PaymentReference};

/// Input for submitting a new inspection report
#[derive(Debug, Clone)]
pub struct NewInspection {
    /// Device IMEI as captured by the inspector
    pub imei: String,
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Market price of the device
    pub price: Money,
    /// Assigned grade, if the device has been graded
    pub grade: Option<Grade>,
    /// Inspection findings
    pub condition: ConditionReport,
}

/// A started purchase awaiting payment confirmation
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseIntent {
    /// Report the purchase is for
    pub report_id: ReportId,
    /// Selected plan
    pub plan_id: PlanId,
    /// Order to pay against at the gateway
    pub order_id: String,
    /// Amount payable
    pub amount: Money,
}

/// Orchestrates the warranty lifecycle
pub struct WarrantyService {
    store: Arc<dyn WarrantyStore>,
    gateway: Arc<dyn PaymentGatewayPort>,
    activity: Arc<dyn ActivityLogPort>,
    plans: Arc<PlanBook>,
    timezone: Timezone,
}

impl WarrantyService {
    /// Creates a new warranty service
    pub fn new(
        store: Arc<dyn WarrantyStore>,
        gateway: Arc<dyn PaymentGatewayPort>,
        activity: Arc<dyn ActivityLogPort>,
        plans: Arc<PlanBook>,
        timezone: Timezone,
    ) -> Self {
        Self {
            store,
            gateway,
            activity,
            plans,
            timezone,
        }
    }

    /// Submits a new inspection report
    ///
    /// Requires the phone-checker role. The report is keyed by IMEI; a second
    /// report for the same device is rejected.
    pub async fn submit_inspection(
        &self,
        actor: &Actor,
        input: NewInspection,
    ) -> Result<InspectionReport, WarrantyError> {
        require_role(actor, Role::PhoneChecker)?;

        let imei = Imei::parse(input.imei)?;
        let mut builder = InspectionReportBuilder::new()
            .imei(imei.clone())
            .device(input.make, input.model, input.price)
            .condition(input.condition)
            .checked_by(actor.user_id);
        if let Some(grade) = input.grade {
            builder = builder.grade(grade);
        }

        let mut report = builder.build()?;
        let events = report.take_events();

        let saved = self.store.insert_report(report).await.map_err(|err| {
            if err.is_conflict() {
                WarrantyError::DuplicateImei(imei.to_string())
            } else {
                WarrantyError::from(err)
            }
        })?;

        info!(report_id = %saved.id(), imei = %saved.imei(), "inspection report submitted");
        self.record_activity(actor, &saved, &events).await;

        Ok(saved)
    }

    /// Starts a warranty purchase for a report
    ///
    /// Requires the shop-owner role. Returns the order the customer must pay
    /// at the gateway before the purchase can be completed.
    pub async fn start_purchase(
        &self,
        actor: &Actor,
        report_id: ReportId,
        plan_id: PlanId,
        customer_id: CustomerId,
    ) -> Result<PurchaseIntent, WarrantyError> {
        require_role(actor, Role::ShopOwner)?;

        let mut report = self.store.get_report(report_id).await?;
        let plan = self.plans.get(plan_id)?;
        let order_id = generate_order_id();

        report.start_purchase(plan, customer_id, order_id.clone())?;
        let events = report.take_events();
        let saved = self.store.update_report(report).await?;

        info!(
            report_id = %saved.id(),
            plan_id = %plan.id,
            order_id = %order_id,
            "warranty purchase started"
        );
        self.record_activity(actor, &saved, &events).await;

        Ok(PurchaseIntent {
            report_id: saved.id(),
            plan_id: plan.id,
            order_id,
            amount: plan.price,
        })
    }

    /// Completes a pending purchase after the customer has paid
    ///
    /// Requires the shop-owner role. The payment reference must match the
    /// pending order; the gateway confirms the capture before the warranty is
    /// issued. The report transition and the new warranty are committed as
    /// one atomic write.
    pub async fn complete_purchase(
        &self,
        actor: &Actor,
        report_id: ReportId,
        payment: PaymentReference,
    ) -> Result<IssuedWarranty, WarrantyError> {
        require_role(actor, Role::ShopOwner)?;

        let mut report = self.store.get_report(report_id).await?;
        let (plan_id, customer_id, amount) = match report.status() {
            WarrantyStatus::Processing {
                plan_id,
                customer_id,
                order_id,
                amount,
                ..
            } => {
                if payment.order_id != *order_id {
                    return Err(WarrantyError::PendingOrderMismatch);
                }
                (*plan_id, *customer_id, *amount)
            }
            other => {
                return Err(WarrantyError::InvalidStatusTransition {
                    from: other.name().to_string(),
                    to: "purchased".to_string(),
                })
            }
        };

        let verdict = self
            .gateway
            .confirm(&payment)
            .await
            .map_err(WarrantyError::PaymentGateway)?;
        let confirmed_at = match verdict {
            PaymentVerdict::Captured { confirmed_at } => confirmed_at,
            PaymentVerdict::Declined { reason } => {
                info!(report_id = %report.id(), reason = %reason, "payment declined");
                return Err(WarrantyError::PaymentDeclined(reason));
            }
        };

        let plan = self.plans.get(plan_id)?;
        let period =
            CoveragePeriod::starting(confirmed_at, plan.warranty_months(), &self.timezone)?;
        let warranty = IssuedWarranty::issue(
            report.id(),
            report.imei().clone(),
            customer_id,
            plan,
            amount,
            payment,
            period,
        );

        report.confirm_purchase(warranty.id())?;
        let events = report.take_events();

        let (saved_report, saved_warranty) =
            self.store.commit_purchase(report, warranty).await?;

        info!(
            report_id = %saved_report.id(),
            warranty_id = %saved_warranty.id(),
            expires_at = %saved_warranty.expires_at(),
            "warranty purchased"
        );
        self.record_activity(actor, &saved_report, &events).await;

        Ok(saved_warranty)
    }

    /// Activates a purchased warranty
    ///
    /// Requires the admin role.
    pub async fn activate_warranty(
        &self,
        actor: &Actor,
        report_id: ReportId,
    ) -> Result<InspectionReport, WarrantyError> {
        require_role(actor, Role::Admin)?;

        let mut report = self.store.get_report(report_id).await?;
        report.activate()?;
        let events = report.take_events();
        let saved = self.store.update_report(report).await?;

        info!(report_id = %saved.id(), "warranty activated");
        self.record_activity(actor, &saved, &events).await;

        Ok(saved)
    }

    /// Records a fine against a report
    ///
    /// Requires the admin role.
    pub async fn issue_fine(
        &self,
        actor: &Actor,
        report_id: ReportId,
        reason: String,
        amount: Option<Money>,
    ) -> Result<InspectionReport, WarrantyError> {
        require_role(actor, Role::Admin)?;

        let mut report = self.store.get_report(report_id).await?;
        report.issue_fine(reason, amount)?;
        let events = report.take_events();
        let saved = self.store.update_report(report).await?;

        info!(report_id = %saved.id(), "fine issued");
        self.record_activity(actor, &saved, &events).await;

        Ok(saved)
    }

    /// Deletes an inspection report
    ///
    /// Requires the admin role. Only legal while no warranty purchase has
    /// been started.
    pub async fn delete_inspection(
        &self,
        actor: &Actor,
        report_id: ReportId,
    ) -> Result<(), WarrantyError> {
        require_role(actor, Role::Admin)?;

        let report = self.store.get_report(report_id).await?;
        if !report.is_deletable() {
            return Err(WarrantyError::InvalidStatusTransition {
                from: report.status().name().to_string(),
                to: "deleted".to_string(),
            });
        }

        self.store.delete_report(report_id).await?;
        info!(report_id = %report_id, "inspection report deleted");

        Ok(())
    }

    /// Fetches a report by ID
    pub async fn report(&self, report_id: ReportId) -> Result<InspectionReport, WarrantyError> {
        Ok(self.store.get_report(report_id).await?)
    }

    /// Fetches a report by device IMEI
    pub async fn report_by_imei(&self, imei: &str) -> Result<InspectionReport, WarrantyError> {
        let imei = Imei::parse(imei)?;
        Ok(self.store.get_report_by_imei(&imei).await?)
    }

    /// Lists all reports
    pub async fn list_reports(&self) -> Result<Vec<InspectionReport>, WarrantyError> {
        Ok(self.store.list_reports().await?)
    }

    /// Fetches a warranty by ID
    pub async fn warranty(&self, warranty_id: WarrantyId) -> Result<IssuedWarranty, WarrantyError> {
        Ok(self.store.get_warranty(warranty_id).await?)
    }

    /// Fetches the warranty issued for a report
    pub async fn warranty_for_report(
        &self,
        report_id: ReportId,
    ) -> Result<IssuedWarranty, WarrantyError> {
        Ok(self.store.get_warranty_for_report(report_id).await?)
    }

    /// Converts drained domain events into activity records
    ///
    /// Append failures are logged and swallowed; the audit trail never fails
    /// a completed operation.
    async fn record_activity(
        &self,
        actor: &Actor,
        report: &InspectionReport,
        events: &[WarrantyEvent],
    ) {
        for event in events {
            let record = ActivityRecord::new(actor, event.activity_action(), report.id())
                .with_imei(report.imei().as_str());
            let record = match event {
                WarrantyEvent::PurchaseStarted { customer_id, .. }
                | WarrantyEvent::WarrantyPurchased { customer_id, .. } => record
                    .with_customer(*customer_id)
                    .with_status(report.status().name()),
                WarrantyEvent::FineIssued { .. } => {
                    record.with_status(report.fine_status().name())
                }
                _ => record.with_status(report.status().name()),
            };

            if let Err(err) = self.activity.append(record).await {
                warn!(
                    error = %err,
                    event = event.event_type(),
                    "failed to append activity record"
                );
            }
        }
    }
}

fn require_role(actor: &Actor, role: Role) -> Result<(), WarrantyError> {
    if actor.can_act_as(role) {
        Ok(())
    } else {
        Err(WarrantyError::Forbidden { required: role })
    }
}

/// Generates a gateway order identifier
///
/// Format: ORD-{YEAR}{MONTH}-{SEQUENCE}
fn generate_order_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = Utc::now();
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!(
        "ORD-{}{:02}-{:06}",
        now.format("%Y"),
        now.format("%m"),
        (duration.as_nanos() % 1_000_000) as u32
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_format() {
        let order_id = generate_order_id();
        assert!(order_id.starts_with("ORD-"));
        assert_eq!(order_id.len(), "ORD-".len() + 6 + 1 + 6);
    }

    #[test]
    fn test_require_role_allows_admin_everywhere() {
        let admin = Actor::admin(core_kernel::UserId::new_v7());
        assert!(require_role(&admin, Role::PhoneChecker).is_ok());
        assert!(require_role(&admin, Role::ShopOwner).is_ok());
    }

    #[test]
    fn test_require_role_rejects_other_roles() {
        let checker = Actor::phone_checker(core_kernel::UserId::new_v7());
        let result = require_role(&checker, Role::ShopOwner);
        assert!(matches!(
            result,
            Err(WarrantyError::Forbidden {
                required: Role::ShopOwner
            })
        ));
    }
}
