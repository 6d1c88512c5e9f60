use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use super::{collect_chain, OfferingSnapshot, OfferingStore};
use crate::models::{Bundle, Location, Offering, PricingWindow, TicketTier};
use crate::pricing::settlement::MAX_HIERARCHY_DEPTH;
use crate::pricing::CommissionLevel;
use crate::utils::error::AppError;

const OFFERING_COLUMNS: &str = "id, kind, organizer_id, title, description, location, start_time, \
     end_time, is_published, tickets_visible, payment_configured";

#[derive(Debug, FromRow)]
struct OfferingRow {
    id: Uuid,
    kind: String,
    organizer_id: Uuid,
    title: String,
    description: Option<String>,
    location: Json<Location>,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    is_published: bool,
    tickets_visible: bool,
    payment_configured: bool,
}

impl TryFrom<OfferingRow> for Offering {
    type Error = AppError;

    fn try_from(row: OfferingRow) -> Result<Self, Self::Error> {
        Ok(Offering {
            id: row.id,
            kind: row.kind.parse().map_err(AppError::InternalServerError)?,
            organizer_id: row.organizer_id,
            title: row.title,
            description: row.description,
            location: row.location.0,
            start_time: row.start_time,
            end_time: row.end_time,
            is_published: row.is_published,
            tickets_visible: row.tickets_visible,
            payment_configured: row.payment_configured,
        })
    }
}

#[derive(Debug, FromRow)]
struct TierRow {
    id: Uuid,
    offering_id: Uuid,
    name: String,
    description: Option<String>,
    base_price: i64,
    quantity: i32,
    sold: i32,
    is_active: bool,
}

#[derive(Debug, FromRow)]
struct WindowRow {
    tier_id: Uuid,
    name: String,
    price: i64,
    available_from: DateTime<Utc>,
    available_until: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct ChainRow {
    id: Uuid,
    commission_bps: i32,
}

/// Postgres-backed store. Every read runs in a read-only repeatable-read
/// transaction so counters across tables come from the same snapshot.
#[derive(Clone)]
pub struct PgOfferingStore {
    pool: PgPool,
}

impl PgOfferingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>, AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Loads tiers (with windows) and bundles for `offerings` and pairs them up,
    /// keeping the order of `offerings`.
    async fn attach_children(
        tx: &mut Transaction<'static, Postgres>,
        offerings: Vec<Offering>,
    ) -> Result<Vec<OfferingSnapshot>, AppError> {
        let ids: Vec<Uuid> = offerings.iter().map(|offering| offering.id).collect();

        let tier_rows: Vec<TierRow> = sqlx::query_as(
            "SELECT id, offering_id, name, description, base_price, quantity, sold, is_active \
             FROM ticket_tiers WHERE offering_id = ANY($1) ORDER BY position, created_at",
        )
        .bind(&ids)
        .fetch_all(&mut **tx)
        .await?;

        let tier_ids: Vec<Uuid> = tier_rows.iter().map(|row| row.id).collect();
        let window_rows: Vec<WindowRow> = sqlx::query_as(
            "SELECT tier_id, name, price, available_from, available_until \
             FROM pricing_windows WHERE tier_id = ANY($1) ORDER BY position",
        )
        .bind(&tier_ids)
        .fetch_all(&mut **tx)
        .await?;

        let bundle_rows: Vec<Bundle> = sqlx::query_as(
            "SELECT id, offering_id, name, description, total_quantity, sold, regular_price, \
             bundle_price, savings, sale_start, sale_end, is_active \
             FROM bundles WHERE offering_id = ANY($1) ORDER BY position",
        )
        .bind(&ids)
        .fetch_all(&mut **tx)
        .await?;

        let mut windows: HashMap<Uuid, Vec<PricingWindow>> = HashMap::new();
        for row in window_rows {
            windows.entry(row.tier_id).or_default().push(PricingWindow {
                name: row.name,
                price: row.price,
                available_from: row.available_from,
                available_until: row.available_until,
            });
        }

        let mut tiers: HashMap<Uuid, Vec<TicketTier>> = HashMap::new();
        for row in tier_rows {
            tiers.entry(row.offering_id).or_default().push(TicketTier {
                pricing_windows: windows.remove(&row.id).unwrap_or_default(),
                id: row.id,
                offering_id: row.offering_id,
                name: row.name,
                description: row.description,
                base_price: row.base_price,
                quantity: row.quantity,
                sold: row.sold,
                is_active: row.is_active,
            });
        }

        let mut bundles: HashMap<Uuid, Vec<Bundle>> = HashMap::new();
        for bundle in bundle_rows {
            bundles.entry(bundle.offering_id).or_default().push(bundle);
        }

        Ok(offerings
            .into_iter()
            .map(|offering| OfferingSnapshot {
                tiers: tiers.remove(&offering.id).unwrap_or_default(),
                bundles: bundles.remove(&offering.id).unwrap_or_default(),
                offering,
            })
            .collect())
    }
}

#[async_trait]
impl OfferingStore for PgOfferingStore {
    async fn offering_snapshot(&self, id: Uuid) -> Result<Option<OfferingSnapshot>, AppError> {
        let mut tx = self.begin_snapshot().await?;

        let row: Option<OfferingRow> =
            sqlx::query_as(&format!("SELECT {OFFERING_COLUMNS} FROM offerings WHERE id = $1"))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let snapshot = Self::attach_children(&mut tx, vec![Offering::try_from(row)?])
            .await?
            .pop();
        tx.commit().await?;

        Ok(snapshot)
    }

    async fn published_class_snapshots(&self) -> Result<Vec<OfferingSnapshot>, AppError> {
        let mut tx = self.begin_snapshot().await?;

        let rows: Vec<OfferingRow> = sqlx::query_as(&format!(
            "SELECT {OFFERING_COLUMNS} FROM offerings \
             WHERE kind = 'class' AND is_published ORDER BY start_time, id"
        ))
        .fetch_all(&mut *tx)
        .await?;

        let offerings = rows
            .into_iter()
            .map(Offering::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let snapshots = Self::attach_children(&mut tx, offerings).await?;
        tx.commit().await?;

        tracing::debug!(count = snapshots.len(), "Loaded published classes");
        Ok(snapshots)
    }

    async fn commission_chain(
        &self,
        offering_id: Uuid,
        invite_code: &str,
    ) -> Result<Option<Vec<CommissionLevel>>, AppError> {
        let rows: Vec<ChainRow> = sqlx::query_as(
            "WITH RECURSIVE chain AS ( \
                 SELECT id, parent_id, commission_bps, 1 AS depth \
                 FROM staff_members WHERE offering_id = $1 AND invite_code = $2 \
               UNION ALL \
                 SELECT s.id, s.parent_id, s.commission_bps, c.depth + 1 \
                 FROM staff_members s JOIN chain c ON s.id = c.parent_id \
                 WHERE s.offering_id = $1 AND c.depth < $3 \
             ) \
             SELECT id, commission_bps FROM chain ORDER BY depth",
        )
        .bind(offering_id)
        .bind(invite_code)
        .bind(MAX_HIERARCHY_DEPTH as i32)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let levels = rows
            .into_iter()
            .map(|row| {
                let rate_bps = u32::try_from(row.commission_bps).map_err(|_| {
                    AppError::InternalServerError(format!(
                        "staff member {} has negative commission",
                        row.id
                    ))
                })?;
                Ok(CommissionLevel {
                    staff_id: row.id,
                    rate_bps,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Some(collect_chain(levels)))
    }
}
