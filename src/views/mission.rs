//! MissionListTable row view.

use crate::error::Result;
use crate::registry::Row;

#[derive(Clone, Copy, Debug)]
pub struct MissionEntry<'r>(Row<'r>);

impl<'r> MissionEntry<'r> {
    pub fn from_row(row: Row<'r>) -> Self {
        Self(row)
    }

    pub fn id(&self) -> &'r str {
        self.0.id()
    }

    /// The operation the mission belongs to.
    pub fn operation_mission_id(&self) -> Result<&'r str> {
        self.0.str_field("_OperationMissionId")
    }

    pub fn mission_comments(&self) -> Result<&'r str> {
        self.0.str_field("_MissionComments")
    }
}
