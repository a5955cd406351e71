use crate::error::Result;
use crate::registry::Row;

/// A row of any `localized_text_*` table.
#[derive(Clone, Copy, Debug)]
pub struct TextRow<'r>(Row<'r>);

impl<'r> TextRow<'r> {
    pub fn from_row(row: Row<'r>) -> Self {
        Self(row)
    }

    pub fn row(&self) -> Row<'r> {
        self.0
    }

    pub fn id(&self) -> &'r str {
        self.0.id()
    }

    pub fn text(&self) -> Result<&'r str> {
        self.0.str_field("_Text")
    }
}
