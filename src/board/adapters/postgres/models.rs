//! Diesel row models for board persistence.

use super::schema::board_columns;
use crate::board::domain::Column;
use diesel::prelude::*;

/// Row shape shared by column inserts and queries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Sort position.
    pub column_order: i32,
}

impl From<&Column> for ColumnRow {
    fn from(column: &Column) -> Self {
        Self {
            id: column.id().as_str().to_owned(),
            title: column.title().to_owned(),
            column_order: column.order(),
        }
    }
}
