use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{FromQueryResult, QueryOrder, QuerySelect};
use serde::Serialize;

/// One continuous interval an employee spent in one zone.
///
/// `exit_at` is NULL while the session is open; `duration_minutes` stays 0
/// until close. Invariant: at most one open session per employee. Closed rows
/// are never mutated again and only disappear via an org-scoped purge.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "zone_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub employee_id: i64,
    /// Denormalized from the employee for fast org-scoped aggregation.
    pub organization_id: i64,
    /// Canonical zone label as configured, never the raw scan text.
    pub zone: String,
    pub entry_at: DateTime<Utc>,
    pub exit_at: Option<DateTime<Utc>>,
    pub duration_minutes: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id",
        on_delete = "Cascade"
    )]
    Organization,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Per-zone totals over closed sessions, one row per zone.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ZoneAggregate {
    pub zone: String,
    pub total_minutes: f64,
    pub visit_count: i64,
}

impl Model {
    /// The employee's open session, if any. Unambiguous by invariant.
    pub async fn find_open(db: &DbConn, employee_id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .filter(Column::ExitAt.is_null())
            .one(db)
            .await
    }

    /// Open a new session with no exit timestamp and zero duration.
    pub async fn open(
        db: &DbConn,
        employee_id: i64,
        organization_id: i64,
        zone: &str,
        entry_at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let session = ActiveModel {
            employee_id: Set(employee_id),
            organization_id: Set(organization_id),
            zone: Set(zone.to_owned()),
            entry_at: Set(entry_at),
            exit_at: Set(None),
            duration_minutes: Set(0.0),
            ..Default::default()
        };
        session.insert(db).await
    }

    /// Close a session: set the exit timestamp and derive the duration in
    /// fractional minutes. Closing an already-closed session is a no-op that
    /// returns the row unchanged, so durations are never double-counted.
    pub async fn close(
        db: &DbConn,
        session: Model,
        exit_at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        if session.exit_at.is_some() {
            return Ok(session);
        }

        let duration_minutes =
            (exit_at - session.entry_at).num_milliseconds() as f64 / 60_000.0;

        let mut active: ActiveModel = session.into();
        active.exit_at = Set(Some(exit_at));
        active.duration_minutes = Set(duration_minutes);
        active.update(db).await
    }

    /// Per-zone totals for an organization, excluding the given labels
    /// (the entry/exit zones in practice), descending by total duration.
    pub async fn aggregate_for_organization(
        db: &DbConn,
        organization_id: i64,
        exclude: &[String],
    ) -> Result<Vec<ZoneAggregate>, DbErr> {
        Self::aggregate(db, Column::OrganizationId.eq(organization_id), exclude).await
    }

    /// Per-zone totals for a single employee.
    pub async fn aggregate_for_employee(
        db: &DbConn,
        employee_id: i64,
        exclude: &[String],
    ) -> Result<Vec<ZoneAggregate>, DbErr> {
        Self::aggregate(db, Column::EmployeeId.eq(employee_id), exclude).await
    }

    async fn aggregate(
        db: &DbConn,
        scope: SimpleExpr,
        exclude: &[String],
    ) -> Result<Vec<ZoneAggregate>, DbErr> {
        Entity::find()
            .select_only()
            .column(Column::Zone)
            .column_as(Column::DurationMinutes.sum(), "total_minutes")
            .column_as(Column::Id.count(), "visit_count")
            .filter(scope)
            .filter(Column::ExitAt.is_not_null())
            .filter(Column::Zone.is_not_in(exclude.iter().cloned()))
            .group_by(Column::Zone)
            .order_by_desc(Expr::cust("total_minutes"))
            .into_model::<ZoneAggregate>()
            .all(db)
            .await
    }

    /// Delete every session of the organization. Irreversible.
    pub async fn purge_for_organization(
        db: &DbConn,
        organization_id: i64,
    ) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::OrganizationId.eq(organization_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
