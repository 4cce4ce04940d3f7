//! Activity feed DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{ActivityAction, ActivityRecord};

/// Query parameters for the activity feed
#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub limit: Option<usize>,
}

/// A single activity record as exposed over the API
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub actor_role: String,
    pub action: ActivityAction,
    pub imei: Option<String>,
    pub customer_id: Option<Uuid>,
    pub entity: String,
    pub resulting_status: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl From<&ActivityRecord> for ActivityResponse {
    fn from(record: &ActivityRecord) -> Self {
        Self {
            id: *record.id.as_uuid(),
            actor_id: *record.actor_id.as_uuid(),
            actor_role: record.actor_role.as_str().to_string(),
            action: record.action,
            imei: record.imei.clone(),
            customer_id: record.customer_id.map(|id| *id.as_uuid()),
            entity: record.entity.clone(),
            resulting_status: record.resulting_status.clone(),
            recorded_at: record.recorded_at,
        }
    }
}
