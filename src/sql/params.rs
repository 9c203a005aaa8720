//! Typed values that sqlx can bind, built from entity fields.

use chrono::{DateTime, Utc};
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};
use std::cmp::Ordering;

/// Column types used by the grid tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlType {
    Bool,
    Int4,
    Int8,
    Varchar,
    Timestamptz,
}

impl SqlType {
    /// Type as written in DDL.
    pub fn ddl(self) -> &'static str {
        match self {
            SqlType::Bool => "BOOLEAN",
            SqlType::Int4 => "INTEGER",
            SqlType::Int8 => "BIGINT",
            SqlType::Varchar => "VARCHAR(255)",
            SqlType::Timestamptz => "TIMESTAMPTZ",
        }
    }

    fn type_info(self) -> PgTypeInfo {
        match self {
            SqlType::Bool => <bool as Type<Postgres>>::type_info(),
            SqlType::Int4 => <i32 as Type<Postgres>>::type_info(),
            SqlType::Int8 => <i64 as Type<Postgres>>::type_info(),
            SqlType::Varchar => <String as Type<Postgres>>::type_info(),
            SqlType::Timestamptz => <DateTime<Utc> as Type<Postgres>>::type_info(),
        }
    }
}

/// A value bound to a PostgreSQL query. NULL keeps its column type so the server
/// never has to guess a parameter type.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null(SqlType),
    Bool(bool),
    I32(i32),
    I64(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    pub fn sql_type(&self) -> SqlType {
        match self {
            SqlValue::Null(t) => *t,
            SqlValue::Bool(_) => SqlType::Bool,
            SqlValue::I32(_) => SqlType::Int4,
            SqlValue::I64(_) => SqlType::Int8,
            SqlValue::Text(_) => SqlType::Varchar,
            SqlValue::Timestamp(_) => SqlType::Timestamptz,
        }
    }

    /// Ordering used by the local store: same-typed values compare naturally, NULLs last
    /// (PostgreSQL's default for ascending order).
    pub fn sort_cmp(&self, other: &SqlValue) -> Ordering {
        match (self, other) {
            (SqlValue::Null(_), SqlValue::Null(_)) => Ordering::Equal,
            (SqlValue::Null(_), _) => Ordering::Greater,
            (_, SqlValue::Null(_)) => Ordering::Less,
            (SqlValue::Bool(a), SqlValue::Bool(b)) => a.cmp(b),
            (SqlValue::I32(a), SqlValue::I32(b)) => a.cmp(b),
            (SqlValue::I64(a), SqlValue::I64(b)) => a.cmp(b),
            (SqlValue::Text(a), SqlValue::Text(b)) => a.cmp(b),
            (SqlValue::Timestamp(a), SqlValue::Timestamp(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::I32(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

macro_rules! nullable {
    ($t:ty, $sql:expr) => {
        impl From<Option<$t>> for SqlValue {
            fn from(v: Option<$t>) -> Self {
                v.map_or(SqlValue::Null($sql), SqlValue::from)
            }
        }
    };
}

nullable!(bool, SqlType::Bool);
nullable!(i32, SqlType::Int4);
nullable!(i64, SqlType::Int8);
nullable!(String, SqlType::Varchar);
nullable!(DateTime<Utc>, SqlType::Timestamptz);

impl<'q> Encode<'q, Postgres> for SqlValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            SqlValue::Null(_) => IsNull::Yes,
            SqlValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf)?,
            SqlValue::I32(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            SqlValue::I64(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            SqlValue::Text(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf)?,
            SqlValue::Timestamp(t) => <DateTime<Utc> as Encode<Postgres>>::encode_by_ref(t, buf)?,
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(self.sql_type().type_info())
    }
}

impl Type<Postgres> for SqlValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(_ty: &PgTypeInfo) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_keep_their_type_when_null() {
        assert_eq!(SqlValue::from(None::<i32>), SqlValue::Null(SqlType::Int4));
        assert_eq!(SqlValue::from(Some("a".to_string())), SqlValue::Text("a".into()));
        assert_eq!(SqlValue::from(None::<bool>).sql_type(), SqlType::Bool);
    }

    #[test]
    fn nulls_sort_last() {
        let null = SqlValue::Null(SqlType::Int8);
        assert_eq!(null.sort_cmp(&SqlValue::I64(1)), Ordering::Greater);
        assert_eq!(SqlValue::I64(1).sort_cmp(&null), Ordering::Less);
        assert_eq!(SqlValue::Text("a".into()).sort_cmp(&SqlValue::Text("b".into())), Ordering::Less);
    }
}
