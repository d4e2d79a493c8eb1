use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Reads a unix-epoch seconds column.
pub fn epoch_column(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(column)?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Integer,
            format!("timestamp out of range: {secs}").into(),
        )
    })
}

pub fn optional_epoch_column(row: &Row, column: &str) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let secs: Option<i64> = row.get(column)?;
    match secs {
        Some(secs) => DateTime::from_timestamp(secs, 0).map(Some).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                Type::Integer,
                format!("timestamp out of range: {secs}").into(),
            )
        }),
        None => Ok(None),
    }
}

/// Parses an enum stored as text, reporting unknown values as a conversion failure.
pub fn parse_text_column<T>(
    row: &Row,
    column: &str,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(column)?;
    parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            format!("unexpected {column} value: {raw}").into(),
        )
    })
}
