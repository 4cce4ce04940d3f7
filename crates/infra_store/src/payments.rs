//! Payment gateway adapters
//!
//! The platform's payment provider verifies payments upstream and hands the
//! API a signed callback; the gateway adapter here only checks that a
//! reference has the shape the provider emits. A malformed reference is a
//! decline rather than an error, since the purchase flow treats declines as
//! business outcomes and keeps the report in processing.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use core_kernel::{DomainPort, PortError};
use domain_warranty::{PaymentGatewayPort, PaymentReference, PaymentVerdict};

const MAX_REFERENCE_LEN: usize = 64;

fn reference_ok(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REFERENCE_LEN
        && value.bytes().all(|b| b.is_ascii_graphic())
}

/// Gateway adapter for verified provider callbacks
#[derive(Debug, Clone, Default)]
pub struct TrustedCallbackGateway;

impl TrustedCallbackGateway {
    /// Creates a new callback gateway
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for TrustedCallbackGateway {}

#[async_trait]
impl PaymentGatewayPort for TrustedCallbackGateway {
    async fn confirm(&self, reference: &PaymentReference) -> Result<PaymentVerdict, PortError> {
        if !reference_ok(&reference.order_id) || !reference_ok(&reference.payment_id) {
            debug!(order_id = %reference.order_id, "Declining malformed payment reference");
            return Ok(PaymentVerdict::Declined {
                reason: "malformed payment reference".to_string(),
            });
        }

        debug!(order_id = %reference.order_id, payment_id = %reference.payment_id, "Payment captured");
        Ok(PaymentVerdict::Captured {
            confirmed_at: Utc::now(),
        })
    }
}

/// Gateway with a scripted verdict, for tests and demos
#[derive(Debug, Clone)]
pub struct StaticGateway {
    outcome: StaticOutcome,
}

#[derive(Debug, Clone)]
enum StaticOutcome {
    Captured,
    Declined(String),
    Unavailable(String),
}

impl StaticGateway {
    /// Captures every payment
    pub fn capturing() -> Self {
        Self {
            outcome: StaticOutcome::Captured,
        }
    }

    /// Declines every payment with the given reason
    pub fn declining(reason: impl Into<String>) -> Self {
        Self {
            outcome: StaticOutcome::Declined(reason.into()),
        }
    }

    /// Fails every confirmation with a service-unavailable error
    pub fn unavailable(service: impl Into<String>) -> Self {
        Self {
            outcome: StaticOutcome::Unavailable(service.into()),
        }
    }
}

impl DomainPort for StaticGateway {}

#[async_trait]
impl PaymentGatewayPort for StaticGateway {
    async fn confirm(&self, _reference: &PaymentReference) -> Result<PaymentVerdict, PortError> {
        match &self.outcome {
            StaticOutcome::Captured => Ok(PaymentVerdict::Captured {
                confirmed_at: Utc::now(),
            }),
            StaticOutcome::Declined(reason) => Ok(PaymentVerdict::Declined {
                reason: reason.clone(),
            }),
            StaticOutcome::Unavailable(service) => {
                Err(PortError::service_unavailable(service.clone()))
            }
        }
    }
}
