use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumProperty, EnumString, IntoEnumIterator};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Final grade recorded on an enrollment, stored as its short code
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    EnumProperty,
)]
pub enum Grade {
    #[strum(serialize = "A", props(full = "excellent"))]
    A,
    #[strum(serialize = "B", props(full = "good"))]
    B,
    #[strum(serialize = "C", props(full = "satisfactory"))]
    C,
    #[strum(serialize = "D", props(full = "poor"))]
    D,
    #[strum(serialize = "F", props(full = "fail"))]
    F,
    #[strum(serialize = "P", props(full = "pass"))]
    Pass,
    #[strum(serialize = "I", props(full = "incomplete"))]
    Incomplete,
    #[strum(serialize = "W", props(full = "withdrawn"))]
    Withdrawn,
}

impl Grade {
    /// Longest code a grade column has to hold
    pub const MAX_CODE_LEN: u32 = 2;

    pub fn code(&self) -> &str {
        self.as_ref()
    }

    pub fn as_full_str(&self) -> &'static str {
        self.get_str("full").unwrap_or_default()
    }

    pub fn all() -> Vec<Grade> {
        Grade::iter().collect()
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for Grade {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "Grade".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::String(sea_orm::sea_query::StringLen::N(
            Self::MAX_CODE_LEN,
        ))
    }
}

#[cfg(feature = "database")]
impl From<Grade> for Value {
    fn from(grade: Grade) -> Self {
        Value::String(Some(Box::new(grade.code().to_owned())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for Grade {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        // Trait call keeps `TryGetError::Null` so `Option<Grade>` reads NULL as `None`
        let val = <String as sea_orm::TryGetable>::try_get_by(res, index)?;

        val.parse().map_err(|_| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Unknown grade code: {val}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for Grade {
    fn null() -> Value {
        Value::String(None)
    }
}
