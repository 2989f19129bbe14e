pub mod m202608040001_create_organizations;
pub mod m202608040002_create_employees;
pub mod m202608040003_create_zone_sessions;
pub mod m202608040004_create_announcements;
