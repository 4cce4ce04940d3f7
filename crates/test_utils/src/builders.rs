//! Test Data Builders
//!
//! Provides builder patterns for constructing domain aggregates with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.
//!
//! Every builder returns aggregates with their pending events drained, so the
//! result reads as already-persisted state and can be seeded straight into a
//! store double.

use chrono::{DateTime, Utc};
use core_kernel::{CoveragePeriod, CustomerId, Money, ReportId, Timezone, UserId, WarrantyId};
use domain_claims::{Claim, ClaimStatus};
use domain_pricing::{Grade, PlanBook};
use domain_warranty::{
    ConditionReport, Imei, InspectionReport, InspectionReportBuilder, IssuedWarranty,
    PaymentReference,
};
use std::sync::Arc;

use crate::fixtures::{ConditionFixtures, DeviceFixtures, IdFixtures, MoneyFixtures, PlanFixtures};

/// Builder for constructing test inspection reports
pub struct TestReportBuilder {
    imei: Imei,
    make: String,
    model: String,
    price: Money,
    grade: Option<Grade>,
    condition: ConditionReport,
    checked_by: UserId,
}

impl Default for TestReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestReportBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            imei: DeviceFixtures::imei(),
            make: DeviceFixtures::make().to_string(),
            model: DeviceFixtures::model().to_string(),
            price: MoneyFixtures::inr_device_price(),
            grade: Some(Grade::A),
            condition: ConditionFixtures::clean(),
            checked_by: IdFixtures::checker_id(),
        }
    }

    /// Sets the device IMEI
    pub fn with_imei(mut self, imei: Imei) -> Self {
        self.imei = imei;
        self
    }

    /// Sets the device make and model
    pub fn with_device(mut self, make: impl Into<String>, model: impl Into<String>) -> Self {
        self.make = make.into();
        self.model = model.into();
        self
    }

    /// Sets the device market price
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    /// Sets the assigned grade
    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self
    }

    /// Leaves the device ungraded
    pub fn ungraded(mut self) -> Self {
        self.grade = None;
        self
    }

    /// Sets the inspection findings
    pub fn with_condition(mut self, condition: ConditionReport) -> Self {
        self.condition = condition;
        self
    }

    /// Sets the inspector
    pub fn with_checked_by(mut self, user_id: UserId) -> Self {
        self.checked_by = user_id;
        self
    }

    /// Builds the report
    pub fn build(self) -> InspectionReport {
        let mut builder = InspectionReportBuilder::new()
            .imei(self.imei)
            .device(self.make, self.model, self.price)
            .condition(self.condition)
            .checked_by(self.checked_by);
        if let Some(grade) = self.grade {
            builder = builder.grade(grade);
        }
        let mut report = builder.build().expect("test report defaults are valid");
        report.take_events();
        report
    }
}

/// A report and its issued warranty, linked like persisted coverage
#[derive(Debug, Clone)]
pub struct TestCoverage {
    pub report: InspectionReport,
    pub warranty: IssuedWarranty,
}

/// Builder for constructing purchased coverage
///
/// Drives a fresh report through start, payment, and confirmation, producing
/// a `Purchased` (optionally `Activated`) report together with its warranty.
/// The device price must fall inside the chosen plan's band.
pub struct TestCoverageBuilder {
    customer_id: CustomerId,
    imei: Imei,
    device_price: Money,
    plan_sku: String,
    plans: Arc<PlanBook>,
    issued_at: DateTime<Utc>,
    activated: bool,
    order_id: String,
    payment_id: String,
}

impl Default for TestCoverageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCoverageBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            customer_id: IdFixtures::customer_id(),
            imei: DeviceFixtures::imei(),
            device_price: MoneyFixtures::inr_device_price(),
            plan_sku: PlanFixtures::standard_sku().to_string(),
            plans: PlanFixtures::plan_book(),
            issued_at: Utc::now(),
            activated: false,
            order_id: DeviceFixtures::order_id().to_string(),
            payment_id: DeviceFixtures::payment_id().to_string(),
        }
    }

    /// Sets the covered customer
    pub fn with_customer_id(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = customer_id;
        self
    }

    /// Sets the device IMEI
    pub fn with_imei(mut self, imei: Imei) -> Self {
        self.imei = imei;
        self
    }

    /// Sets the device market price
    pub fn with_device_price(mut self, price: Money) -> Self {
        self.device_price = price;
        self
    }

    /// Sets the plan SKU to purchase
    pub fn with_plan_sku(mut self, sku: impl Into<String>) -> Self {
        self.plan_sku = sku.into();
        self
    }

    /// Sets the plan book to resolve SKUs against
    pub fn with_plan_book(mut self, plans: Arc<PlanBook>) -> Self {
        self.plans = plans;
        self
    }

    /// Sets when the warranty was issued
    pub fn with_issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = issued_at;
        self
    }

    /// Activates the warranty after purchase
    pub fn activated(mut self) -> Self {
        self.activated = true;
        self
    }

    /// Sets the order reference
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = order_id.into();
        self
    }

    /// Builds the coverage pair
    pub fn build(self) -> TestCoverage {
        let plan = self
            .plans
            .find_sku(&self.plan_sku)
            .unwrap_or_else(|| panic!("unknown plan SKU {}", self.plan_sku))
            .clone();

        let mut report = TestReportBuilder::new()
            .with_imei(self.imei.clone())
            .with_price(self.device_price)
            .with_grade(plan.grade)
            .build();

        report
            .start_purchase(&plan, self.customer_id, self.order_id.clone())
            .expect("coverage builder starts from a fresh report");

        let period =
            CoveragePeriod::starting(self.issued_at, plan.warranty_months(), &Timezone::default())
                .expect("plan terms are valid month counts");
        let warranty = IssuedWarranty::issue(
            report.id(),
            self.imei,
            self.customer_id,
            &plan,
            plan.price,
            PaymentReference::new(self.order_id, self.payment_id),
            period,
        );

        report
            .confirm_purchase(warranty.id())
            .expect("processing report accepts confirmation");
        if self.activated {
            report.activate().expect("purchased report accepts activation");
        }
        report.take_events();

        TestCoverage { report, warranty }
    }
}

/// Builder for constructing test claims
pub struct TestClaimBuilder {
    report_id: ReportId,
    warranty_id: WarrantyId,
    imei: Imei,
    customer_id: CustomerId,
    filed_by: UserId,
    issue_description: String,
    status: ClaimStatus,
    decided_by: UserId,
    decision_note: Option<String>,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            report_id: IdFixtures::report_id(),
            warranty_id: IdFixtures::warranty_id(),
            imei: DeviceFixtures::imei(),
            customer_id: IdFixtures::customer_id(),
            filed_by: IdFixtures::owner_id(),
            issue_description: DeviceFixtures::claim_issue().to_string(),
            status: ClaimStatus::Submitted,
            decided_by: IdFixtures::admin_id(),
            decision_note: None,
        }
    }

    /// Links the claim to an existing coverage pair
    pub fn for_coverage(mut self, coverage: &TestCoverage) -> Self {
        self.report_id = coverage.report.id();
        self.warranty_id = coverage.warranty.id();
        self.imei = coverage.warranty.imei().clone();
        self.customer_id = coverage.warranty.customer_id();
        self
    }

    /// Sets the covered report
    pub fn with_report_id(mut self, report_id: ReportId) -> Self {
        self.report_id = report_id;
        self
    }

    /// Sets the warranty under claim
    pub fn with_warranty_id(mut self, warranty_id: WarrantyId) -> Self {
        self.warranty_id = warranty_id;
        self
    }

    /// Sets the claiming customer
    pub fn with_customer_id(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = customer_id;
        self
    }

    /// Sets who filed the claim
    pub fn with_filed_by(mut self, user_id: UserId) -> Self {
        self.filed_by = user_id;
        self
    }

    /// Sets the issue description
    pub fn with_issue(mut self, description: impl Into<String>) -> Self {
        self.issue_description = description.into();
        self
    }

    /// Drives the claim to the given status after filing
    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets who decided the claim, for non-initial statuses
    pub fn with_decided_by(mut self, user_id: UserId) -> Self {
        self.decided_by = user_id;
        self
    }

    /// Sets the decision note
    pub fn with_decision_note(mut self, note: impl Into<String>) -> Self {
        self.decision_note = Some(note.into());
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        let mut claim = Claim::submit(
            self.report_id,
            self.warranty_id,
            self.imei,
            self.customer_id,
            self.filed_by,
            self.issue_description,
        )
        .expect("claim builder defaults are valid");

        if self.status != ClaimStatus::Submitted {
            claim
                .transition_to(self.status, self.decided_by, self.decision_note)
                .expect("submitted claims accept any first decision");
        }
        claim.take_events();
        claim
    }
}
