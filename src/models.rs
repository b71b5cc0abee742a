use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============ Database Models ============

/// Represents a contact record ("lead") keyed by phone number.
///
/// This is the central entity for storing prospective-customer information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    /// Surrogate identifier, assigned by the store on first insert.
    pub id: i64,
    /// Canonical contact identifier; unique across all leads.
    pub phone: String,
    /// Name of the lead.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Lifecycle tag; defaults to `"new"`, mutated by external workflow logic.
    pub status: String,
    /// Channel attribution (e.g. `"organic"`, `"landing_page"`).
    pub source: String,
    /// Campaign active in the session at the time of first insert.
    pub campaign: Option<String>,
    /// Whether explicit consent was affirmed on the most recent write.
    pub consent: bool,
    /// Timestamp of first insert; never updated.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last successful write touching this lead.
    pub last_contact: DateTime<Utc>,
    /// Arbitrary structured payload attached to the lead.
    pub metadata: Option<serde_json::Value>,
}

/// Represents an immutable audit entry describing an event that happened to a lead.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Interaction {
    /// Surrogate identifier.
    pub id: i64,
    /// The lead this interaction belongs to.
    pub lead_id: i64,
    /// Short tag (e.g. `"lead_added"`, `"message_sent"`).
    pub interaction_type: String,
    /// Free-text detail.
    pub content: Option<String>,
    /// Timestamp of creation; immutable.
    pub timestamp: DateTime<Utc>,
}

// ============ Intake Payload ============

/// Loosely-structured payload accepted by the intake pipeline.
///
/// Only `phone` is required; every other field is optional or defaulted so
/// channel adapters can hand over whatever they captured.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLead {
    /// Phone number (unique identifier for the lead).
    pub phone: String,
    /// Name of the lead.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Channel attribution.
    #[serde(default = "default_source")]
    pub source: String,
    /// Additional structured metadata.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    /// Whether the contact affirmed explicit consent in this submission.
    #[serde(default)]
    pub consent: bool,
}

impl NewLead {
    /// Payload for the given phone with every other field at its default.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            name: None,
            email: None,
            source: default_source(),
            metadata: None,
            consent: false,
        }
    }
}

fn default_source() -> String {
    "organic".to_string()
}
