use serde::{Deserialize, Serialize};

/// A bookable asset such as a room or a piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: i64,
    pub name: Option<String>,
    /// Scheduling granularity in minutes
    pub interval_minutes: u32,
}

impl Resource {
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| format!("#{}", self.id))
    }
}
