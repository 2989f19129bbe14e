/// One topic per organization; the organization id is the grouping key for
/// all presence fan-out.
pub fn organization_presence_topic(organization_id: i64) -> String {
    format!("presence:org:{organization_id}")
}
