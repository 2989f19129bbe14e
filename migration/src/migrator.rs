use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202608040001_create_organizations::Migration),
            Box::new(migrations::m202608040002_create_employees::Migration),
            Box::new(migrations::m202608040003_create_zone_sessions::Migration),
            Box::new(migrations::m202608040004_create_announcements::Migration),
        ]
    }
}
