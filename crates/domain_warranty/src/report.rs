//! Inspection Report Aggregate Root
//!
//! The InspectionReport is the main consistency boundary for the warranty
//! purchase lifecycle. Every device enters the platform through an inspection,
//! and the warranty status recorded on the report only ever moves forward.
//!
//! # Invariants
//!
//! - Warranty status moves forward only: not-purchased -> processing ->
//!   purchased -> activated
//! - A rejected transition leaves the report completely untouched
//! - A report whose warranty has been purchased can no longer be deleted
//! - Coverage expiry is derived at read time and never stored on the report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, Money, PlanId, ReportId, UserId, WarrantyId};
use domain_pricing::{Grade, WarrantyPlan};

use crate::error::WarrantyError;
use crate::events::WarrantyEvent;
use crate::imei::Imei;

/// Warranty lifecycle states recorded on an inspection report
///
/// Each state carries the data that became known when it was entered, so a
/// report is always self-describing: a processing report knows its pending
/// order, a purchased report knows its warranty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WarrantyStatus {
    /// No purchase has been attempted
    NotPurchased,

    /// A purchase was started and payment is pending
    Processing {
        /// Plan selected for the purchase
        plan_id: PlanId,
        /// Customer buying the warranty
        customer_id: CustomerId,
        /// Order handed to the payment gateway
        order_id: String,
        /// Amount payable for the plan
        amount: Money,
        /// When the purchase was started
        started_at: DateTime<Utc>,
    },

    /// Payment confirmed and warranty issued
    Purchased {
        /// Warranty issued for this report
        warranty_id: WarrantyId,
        /// When payment was confirmed
        purchased_at: DateTime<Utc>,
    },

    /// Warranty activated on the device; terminal state
    Activated {
        /// Warranty issued for this report
        warranty_id: WarrantyId,
        /// When the warranty was activated
        activated_at: DateTime<Utc>,
    },
}

impl WarrantyStatus {
    /// Returns the wire name of the status
    pub fn name(&self) -> &'static str {
        match self {
            WarrantyStatus::NotPurchased => "not-purchased",
            WarrantyStatus::Processing { .. } => "processing",
            WarrantyStatus::Purchased { .. } => "purchased",
            WarrantyStatus::Activated { .. } => "activated",
        }
    }
}

/// Fine recorded against a report for a mis-graded or misrepresented device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FineStatus {
    /// No fine recorded
    #[serde(rename = "Not-Fined")]
    NotFined,

    /// A fine has been issued
    Fined {
        /// Why the fine was issued
        reason: String,
        /// Fine amount, when one was set
        amount: Option<Money>,
        /// When the fine was issued
        fined_at: DateTime<Utc>,
    },
}

impl FineStatus {
    /// Returns the wire name of the fine status
    pub fn name(&self) -> &'static str {
        match self {
            FineStatus::NotFined => "Not-Fined",
            FineStatus::Fined { .. } => "Fined",
        }
    }

    /// Checks whether a fine has been issued
    pub fn is_fined(&self) -> bool {
        matches!(self, FineStatus::Fined { .. })
    }
}

/// The inspected device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetails {
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Market price of the device, used for tier resolution
    pub price: Money,
}

/// Condition of a single device surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceCondition {
    /// No visible damage
    Flawless,
    /// Light scratches
    Scratched,
    /// Cracked glass or housing
    Cracked,
}

/// Physical and functional findings from the inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionReport {
    /// Screen condition
    pub screen: SurfaceCondition,
    /// Body condition
    pub body: SurfaceCondition,
    /// Battery health, 0-100
    pub battery_health_percent: u8,
    /// Whether all functional checks passed
    pub all_functions_ok: bool,
    /// Free-form inspector notes
    pub notes: Option<String>,
}

/// The InspectionReport aggregate root
///
/// # State Machine
///
/// The warranty lifecycle is modeled as a state machine. Valid transitions:
/// - NotPurchased -> Processing (via start_purchase)
/// - Processing -> Purchased (via confirm_purchase)
/// - Purchased -> Activated (via activate)
///
/// Activated is terminal. Deletion is only allowed while NotPurchased.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionReport {
    /// Unique report identifier
    id: ReportId,
    /// Device IMEI; at most one report exists per IMEI
    imei: Imei,
    /// Device details
    device: DeviceDetails,
    /// Assigned device grade; required before purchase
    grade: Option<Grade>,
    /// Inspection findings
    condition: ConditionReport,
    /// Inspector who checked the device
    checked_by: UserId,
    /// Current warranty lifecycle state
    status: WarrantyStatus,
    /// Fine recorded against the report
    fine_status: FineStatus,
    /// Domain events to be published
    #[serde(skip)]
    events: Vec<WarrantyEvent>,
    /// Version for optimistic concurrency
    version: u32,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl InspectionReport {
    /// Returns the report ID
    pub fn id(&self) -> ReportId {
        self.id
    }

    /// Returns the device IMEI
    pub fn imei(&self) -> &Imei {
        &self.imei
    }

    /// Returns the device details
    pub fn device(&self) -> &DeviceDetails {
        &self.device
    }

    /// Returns the assigned grade, if any
    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    /// Returns the inspection findings
    pub fn condition(&self) -> &ConditionReport {
        &self.condition
    }

    /// Returns the inspector who checked the device
    pub fn checked_by(&self) -> UserId {
        self.checked_by
    }

    /// Returns the current warranty status
    pub fn status(&self) -> &WarrantyStatus {
        &self.status
    }

    /// Returns the fine status
    pub fn fine_status(&self) -> &FineStatus {
        &self.fine_status
    }

    /// Returns the optimistic-concurrency version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns the creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<WarrantyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advances the version; stores call this when persisting an update
    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    /// Returns the issued warranty ID once a purchase is complete
    pub fn warranty_id(&self) -> Option<WarrantyId> {
        match &self.status {
            WarrantyStatus::Purchased { warranty_id, .. }
            | WarrantyStatus::Activated { warranty_id, .. } => Some(*warranty_id),
            _ => None,
        }
    }

    /// Checks whether a warranty has been purchased for this report
    pub fn has_warranty(&self) -> bool {
        self.warranty_id().is_some()
    }

    /// Checks whether the report may still be deleted
    pub fn is_deletable(&self) -> bool {
        matches!(self.status, WarrantyStatus::NotPurchased)
    }

    /// Starts a warranty purchase (NotPurchased -> Processing)
    ///
    /// # Arguments
    ///
    /// * `plan` - The selected warranty plan
    /// * `customer_id` - The customer buying the warranty
    /// * `order_id` - Order handed to the payment gateway
    ///
    /// # Errors
    ///
    /// Returns error if the report has no grade, the plan does not match the
    /// device, or a purchase is already under way.
    pub fn start_purchase(
        &mut self,
        plan: &WarrantyPlan,
        customer_id: CustomerId,
        order_id: impl Into<String>,
    ) -> Result<(), WarrantyError> {
        match &self.status {
            WarrantyStatus::NotPurchased => {
                let grade = self.grade.ok_or(WarrantyError::MissingGrade)?;
                if plan.grade != grade {
                    return Err(WarrantyError::PlanMismatch(format!(
                        "plan is for grade {}, report is graded {}",
                        plan.grade, grade
                    )));
                }
                if !plan.covers_price(self.device.price.amount()) {
                    return Err(WarrantyError::PlanMismatch(format!(
                        "device price {} is outside the plan band {}",
                        self.device.price,
                        plan.band.label()
                    )));
                }

                let now = Utc::now();
                let order_id = order_id.into();

                self.status = WarrantyStatus::Processing {
                    plan_id: plan.id,
                    customer_id,
                    order_id: order_id.clone(),
                    amount: plan.price,
                    started_at: now,
                };
                self.updated_at = now;

                self.events.push(WarrantyEvent::PurchaseStarted {
                    report_id: self.id,
                    plan_id: plan.id,
                    customer_id,
                    order_id,
                    timestamp: now,
                });

                Ok(())
            }
            other => Err(WarrantyError::InvalidStatusTransition {
                from: other.name().to_string(),
                to: "processing".to_string(),
            }),
        }
    }

    /// Confirms the pending purchase (Processing -> Purchased)
    ///
    /// # Arguments
    ///
    /// * `warranty_id` - The warranty issued for this report
    ///
    /// # Errors
    ///
    /// Returns error if no purchase is pending
    pub fn confirm_purchase(&mut self, warranty_id: WarrantyId) -> Result<(), WarrantyError> {
        match &self.status {
            WarrantyStatus::Processing { customer_id, .. } => {
                let customer_id = *customer_id;
                let now = Utc::now();

                self.status = WarrantyStatus::Purchased {
                    warranty_id,
                    purchased_at: now,
                };
                self.updated_at = now;

                self.events.push(WarrantyEvent::WarrantyPurchased {
                    report_id: self.id,
                    warranty_id,
                    customer_id,
                    timestamp: now,
                });

                Ok(())
            }
            other => Err(WarrantyError::InvalidStatusTransition {
                from: other.name().to_string(),
                to: "purchased".to_string(),
            }),
        }
    }

    /// Activates the purchased warranty (Purchased -> Activated)
    ///
    /// # Errors
    ///
    /// Returns error unless the report is in the purchased state
    pub fn activate(&mut self) -> Result<(), WarrantyError> {
        match &self.status {
            WarrantyStatus::Purchased { warranty_id, .. } => {
                let warranty_id = *warranty_id;
                let now = Utc::now();

                self.status = WarrantyStatus::Activated {
                    warranty_id,
                    activated_at: now,
                };
                self.updated_at = now;

                self.events.push(WarrantyEvent::WarrantyActivated {
                    report_id: self.id,
                    warranty_id,
                    timestamp: now,
                });

                Ok(())
            }
            other => Err(WarrantyError::InvalidStatusTransition {
                from: other.name().to_string(),
                to: "activated".to_string(),
            }),
        }
    }

    /// Records a fine against the report
    ///
    /// # Errors
    ///
    /// Returns error if the report is already fined
    pub fn issue_fine(
        &mut self,
        reason: impl Into<String>,
        amount: Option<Money>,
    ) -> Result<(), WarrantyError> {
        if self.fine_status.is_fined() {
            return Err(WarrantyError::validation("Report is already fined"));
        }

        let now = Utc::now();
        let reason = reason.into();

        self.fine_status = FineStatus::Fined {
            reason: reason.clone(),
            amount,
            fined_at: now,
        };
        self.updated_at = now;

        self.events.push(WarrantyEvent::FineIssued {
            report_id: self.id,
            reason,
            timestamp: now,
        });

        Ok(())
    }
}

/// Builder for creating new inspection reports
///
/// # Example
///
/// ```rust,ignore
/// let report = InspectionReportBuilder::new()
///     .imei(imei)
///     .device("Samsung", "Galaxy S21", price)
///     .grade(Grade::A)
///     .condition(condition)
///     .checked_by(inspector_id)
///     .build()?;
/// ```
pub struct InspectionReportBuilder {
    imei: Option<Imei>,
    make: Option<String>,
    model: Option<String>,
    price: Option<Money>,
    grade: Option<Grade>,
    condition: Option<ConditionReport>,
    checked_by: Option<UserId>,
}

impl InspectionReportBuilder {
    /// Creates a new builder with no fields set
    pub fn new() -> Self {
        Self {
            imei: None,
            make: None,
            model: None,
            price: None,
            grade: None,
            condition: None,
            checked_by: None,
        }
    }

    /// Sets the device IMEI
    pub fn imei(mut self, imei: Imei) -> Self {
        self.imei = Some(imei);
        self
    }

    /// Sets the device make, model and price
    pub fn device(mut self, make: impl Into<String>, model: impl Into<String>, price: Money) -> Self {
        self.make = Some(make.into());
        self.model = Some(model.into());
        self.price = Some(price);
        self
    }

    /// Sets the assigned device grade
    pub fn grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self
    }

    /// Sets the inspection findings
    pub fn condition(mut self, condition: ConditionReport) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Sets the inspector
    pub fn checked_by(mut self, user_id: UserId) -> Self {
        self.checked_by = Some(user_id);
        self
    }

    /// Builds the report
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or out of range
    pub fn build(self) -> Result<InspectionReport, WarrantyError> {
        let imei = self
            .imei
            .ok_or_else(|| WarrantyError::validation("imei is required"))?;
        let make = self
            .make
            .ok_or_else(|| WarrantyError::validation("device make is required"))?;
        let model = self
            .model
            .ok_or_else(|| WarrantyError::validation("device model is required"))?;
        let price = self
            .price
            .ok_or_else(|| WarrantyError::validation("device price is required"))?;
        let condition = self
            .condition
            .ok_or_else(|| WarrantyError::validation("condition report is required"))?;
        let checked_by = self
            .checked_by
            .ok_or_else(|| WarrantyError::validation("checked_by is required"))?;

        if price.is_negative() {
            return Err(WarrantyError::validation("device price cannot be negative"));
        }
        if condition.battery_health_percent > 100 {
            return Err(WarrantyError::validation(
                "battery health must be between 0 and 100",
            ));
        }

        let now = Utc::now();
        let report_id = ReportId::new_v7();

        Ok(InspectionReport {
            id: report_id,
            imei: imei.clone(),
            device: DeviceDetails {
                make,
                model,
                price,
            },
            grade: self.grade,
            condition,
            checked_by,
            status: WarrantyStatus::NotPurchased,
            fine_status: FineStatus::NotFined,
            events: vec![WarrantyEvent::InspectionSubmitted {
                report_id,
                imei: imei.into(),
                checked_by,
                timestamp: now,
            }],
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Default for InspectionReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
