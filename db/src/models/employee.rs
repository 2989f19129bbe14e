use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, QuerySelect};
use serde::Serialize;

/// Directory projection of an employee: identity, display name and the
/// current-zone pointer the live dashboard reads.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Immutable after creation.
    pub organization_id: i64,
    /// Stable external identifier, unique per organization.
    pub employee_number: String,
    pub name: String,
    pub email: String,
    /// NULL means "not in any zone"; see [`Presence`].
    pub current_zone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id",
        on_delete = "Cascade"
    )]
    Organization,
    #[sea_orm(has_many = "super::zone_session::Entity")]
    ZoneSessions,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::zone_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ZoneSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Tagged presence state, materialized in the nullable `current_zone` column.
///
/// Replaces the string sentinel the zone-enforcement logic would otherwise
/// compare against: "no zone" is a variant, not a magic value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    NoActiveZone,
    InZone(String),
}

impl Presence {
    pub fn from_column(value: Option<String>) -> Self {
        match value {
            Some(zone) if !zone.is_empty() => Presence::InZone(zone),
            _ => Presence::NoActiveZone,
        }
    }

    pub fn into_column(self) -> Option<String> {
        match self {
            Presence::NoActiveZone => None,
            Presence::InZone(zone) => Some(zone),
        }
    }

    pub fn zone(&self) -> Option<&str> {
        match self {
            Presence::NoActiveZone => None,
            Presence::InZone(zone) => Some(zone),
        }
    }
}

impl Model {
    pub fn presence(&self) -> Presence {
        Presence::from_column(self.current_zone.clone())
    }

    pub async fn create(
        db: &DbConn,
        organization_id: i64,
        employee_number: &str,
        name: &str,
        email: &str,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let employee = ActiveModel {
            organization_id: Set(organization_id),
            employee_number: Set(employee_number.to_owned()),
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            current_zone: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        employee.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// All employees of an organization, ordered for stable roster output.
    pub async fn find_for_organization(
        db: &DbConn,
        organization_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::OrganizationId.eq(organization_id))
            .order_by_asc(Column::Name)
            .all(db)
            .await
    }

    /// Point the employee's presence at a new state.
    pub async fn set_presence(
        db: &DbConn,
        id: i64,
        presence: &Presence,
    ) -> Result<Model, DbErr> {
        let employee = ActiveModel {
            id: Set(id),
            current_zone: Set(presence.clone().into_column()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        employee.update(db).await
    }

    /// Fast presence read without loading the full row.
    pub async fn load_presence(db: &DbConn, id: i64) -> Result<Option<Presence>, DbErr> {
        let row: Option<Option<String>> = Entity::find_by_id(id)
            .select_only()
            .column(Column::CurrentZone)
            .into_tuple()
            .one(db)
            .await?;
        Ok(row.map(Presence::from_column))
    }
}
