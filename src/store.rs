use crate::errors::{LeadError, ResultExt};
use crate::models::{Interaction, Lead, NewLead};
use crate::validator::LeadValidator;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

/// Persistence service for leads and their interaction audit trail.
///
/// One instance per session. The campaign field is session state: it is
/// stamped onto leads at first insert and has no effect on rows already
/// persisted.
pub struct LeadStore {
    pool: SqlitePool,
    validator: LeadValidator,
    current_campaign: Option<String>,
}

/// Raw `leads` row as stored; metadata still in its serialized form.
#[derive(FromRow)]
struct LeadRow {
    id: i64,
    phone: String,
    name: Option<String>,
    email: Option<String>,
    status: String,
    source: String,
    campaign: Option<String>,
    consent: bool,
    created_at: DateTime<Utc>,
    last_contact: DateTime<Utc>,
    metadata: Option<String>,
}

impl LeadRow {
    fn into_lead(self) -> Result<Lead, LeadError> {
        let metadata = self
            .metadata
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Lead {
            id: self.id,
            phone: self.phone,
            name: self.name,
            email: self.email,
            status: self.status,
            source: self.source,
            campaign: self.campaign,
            consent: self.consent,
            created_at: self.created_at,
            last_contact: self.last_contact,
            metadata,
        })
    }
}

impl LeadStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            validator: LeadValidator::new(),
            current_campaign: None,
        }
    }

    /// Set the campaign stamped onto leads inserted from now on.
    ///
    /// No persistence effect until the next insert; already-stored leads
    /// keep the campaign they were created under.
    pub fn set_campaign(&mut self, name: impl Into<String>) {
        let name = name.into();
        tracing::info!("Campaign set: {}", name);
        self.current_campaign = Some(name);
    }

    pub fn current_campaign(&self) -> Option<&str> {
        self.current_campaign.as_deref()
    }

    /// Validate and persist one lead submission.
    ///
    /// Keyed by phone: the first submission inserts a fresh row, a repeat
    /// submission merge-updates `name`, `email`, `consent`, `last_contact`
    /// and `metadata` while `id`, `created_at`, `status`, `source` and
    /// `campaign` stay untouched. Every successful write appends a
    /// `lead_added` interaction in the same transaction.
    ///
    /// Returns the id of the affected lead.
    pub async fn add_lead(&self, lead: &NewLead) -> Result<i64, LeadError> {
        self.validator
            .validate(&lead.phone, lead.email.as_deref(), lead.consent)?;

        match self.upsert_with_audit(lead).await {
            Ok(lead_id) => {
                tracing::info!("Lead stored: {} (lead_id: {})", lead.phone, lead_id);
                Ok(lead_id)
            }
            Err(e) => {
                // Metadata content stays out of the log
                tracing::error!("Failed to store lead {}: {}", lead.phone, e);
                Err(e)
            }
        }
    }

    /// Upsert plus `lead_added` audit entry, as one transaction.
    async fn upsert_with_audit(&self, lead: &NewLead) -> Result<i64, LeadError> {
        let metadata = lead
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await.context("begin lead upsert")?;

        let lead_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO leads (phone, name, email, source, campaign, consent, created_at, last_contact, metadata)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7, ?8)
            ON CONFLICT(phone) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                consent = excluded.consent,
                last_contact = excluded.last_contact,
                metadata = excluded.metadata
            RETURNING id
            "#,
        )
        .bind(&lead.phone)
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.source)
        .bind(self.current_campaign.as_deref())
        .bind(lead.consent)
        .bind(now)
        .bind(&metadata)
        .fetch_one(&mut *tx)
        .await
        .context(format!("upsert lead {}", lead.phone))?;

        append_interaction(
            &mut tx,
            lead_id,
            "lead_added",
            Some("Lead added to the system"),
            now,
        )
        .await?;

        tx.commit()
            .await
            .context(format!("commit lead upsert for {}", lead.phone))?;

        Ok(lead_id)
    }

    /// Exact-match lookup by phone.
    ///
    /// Returns `Ok(None)` when no lead with that phone exists; a returned
    /// record is always fully populated, with metadata deserialized back to
    /// its structured form.
    pub async fn get_lead(&self, phone: &str) -> Result<Option<Lead>, LeadError> {
        let row = sqlx::query_as::<_, LeadRow>(
            r#"
            SELECT id, phone, name, email, status, source, campaign, consent,
                   created_at, last_contact, metadata
            FROM leads
            WHERE phone = ?1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .context(format!("fetch lead {}", phone))?;

        row.map(LeadRow::into_lead).transpose()
    }

    /// Append an interaction to an existing lead and refresh its
    /// `last_contact`.
    ///
    /// Usable by workflow callers for follow-up events (`"message_sent"`,
    /// `"status_changed"`, ...). Fails with `NotFound` when `lead_id` does
    /// not reference an existing lead.
    pub async fn log_interaction(
        &self,
        lead_id: i64,
        interaction_type: &str,
        content: Option<&str>,
    ) -> Result<i64, LeadError> {
        let result: Result<i64, LeadError> = async {
            let mut tx = self.pool.begin().await.context("begin interaction log")?;
            let id =
                append_interaction(&mut tx, lead_id, interaction_type, content, Utc::now()).await?;
            tx.commit()
                .await
                .context(format!("commit interaction for lead {}", lead_id))?;
            Ok(id)
        }
        .await;

        match result {
            Ok(id) => {
                tracing::debug!(
                    "Interaction logged: {} (lead_id: {}, interaction_id: {})",
                    interaction_type,
                    lead_id,
                    id
                );
                Ok(id)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to log {} interaction for lead {}: {}",
                    interaction_type,
                    lead_id,
                    e
                );
                Err(e)
            }
        }
    }

    /// Audit-trail read-back for one lead, in insertion order.
    pub async fn interactions_for(&self, lead_id: i64) -> Result<Vec<Interaction>, LeadError> {
        sqlx::query_as::<_, Interaction>(
            r#"
            SELECT id, lead_id, interaction_type, content, timestamp
            FROM interactions
            WHERE lead_id = ?1
            ORDER BY id
            "#,
        )
        .bind(lead_id)
        .fetch_all(&self.pool)
        .await
        .context(format!("fetch interactions for lead {}", lead_id))
    }

    /// Release the underlying storage handle.
    ///
    /// Subsequent operations on this store fail with a database error
    /// instead of touching a stale handle.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Lead store closed");
    }
}

/// Insert one interaction row and re-stamp the owning lead's `last_contact`
/// with the interaction timestamp, inside the caller's transaction.
async fn append_interaction(
    tx: &mut Transaction<'_, Sqlite>,
    lead_id: i64,
    interaction_type: &str,
    content: Option<&str>,
    at: DateTime<Utc>,
) -> Result<i64, LeadError> {
    let touched = sqlx::query("UPDATE leads SET last_contact = ?1 WHERE id = ?2")
        .bind(at)
        .bind(lead_id)
        .execute(&mut **tx)
        .await
        .context(format!("refresh last_contact for lead {}", lead_id))?;

    if touched.rows_affected() == 0 {
        return Err(LeadError::NotFound(format!(
            "lead {} does not exist",
            lead_id
        )));
    }

    sqlx::query_scalar(
        r#"
        INSERT INTO interactions (lead_id, interaction_type, content, timestamp)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id
        "#,
    )
    .bind(lead_id)
    .bind(interaction_type)
    .bind(content)
    .bind(at)
    .fetch_one(&mut **tx)
    .await
    .context(format!(
        "append {} interaction for lead {}",
        interaction_type, lead_id
    ))
}
