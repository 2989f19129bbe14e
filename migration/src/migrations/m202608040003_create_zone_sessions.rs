use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608040003_create_zone_sessions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("zone_sessions"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("employee_id"))
                            .big_integer()
                            .not_null(),
                    )
                    // denormalized for org-scoped aggregation and purge
                    .col(
                        ColumnDef::new(Alias::new("organization_id"))
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("zone")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("entry_at"))
                            .timestamp()
                            .not_null(),
                    )
                    // NULL while the session is open
                    .col(ColumnDef::new(Alias::new("exit_at")).timestamp().null())
                    .col(
                        ColumnDef::new(Alias::new("duration_minutes"))
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_zone_sessions_employee")
                            .from(Alias::new("zone_sessions"), Alias::new("employee_id"))
                            .to(Alias::new("employees"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_zone_sessions_organization")
                            .from(Alias::new("zone_sessions"), Alias::new("organization_id"))
                            .to(Alias::new("organizations"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // open-session lookup: (employee_id, exit_at)
        manager
            .create_index(
                Index::create()
                    .name("idx_zone_sessions_employee_exit")
                    .table(Alias::new("zone_sessions"))
                    .col(Alias::new("employee_id"))
                    .col(Alias::new("exit_at"))
                    .to_owned(),
            )
            .await?;

        // org-scoped analytics and purge
        manager
            .create_index(
                Index::create()
                    .name("idx_zone_sessions_organization")
                    .table(Alias::new("zone_sessions"))
                    .col(Alias::new("organization_id"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("zone_sessions")).to_owned())
            .await
    }
}
