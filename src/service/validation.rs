//! Request validation from table descriptors: required properties and VARCHAR length.

use crate::case::to_camel_case;
use crate::error::AppError;
use crate::repository::table::EntityTable;
use crate::sql::SqlType;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const MAX_VARCHAR: usize = 255;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationRule {
    pub required: bool,
    pub max_length: Option<usize>,
}

/// Rules keyed by camelCase property, derived from `T::COLUMNS`.
pub fn rules_for<T: EntityTable>() -> HashMap<String, ValidationRule> {
    T::COLUMNS
        .iter()
        .filter(|c| c.required || c.sql_type == SqlType::Varchar)
        .map(|c| {
            let rule = ValidationRule {
                required: c.required,
                max_length: (c.sql_type == SqlType::Varchar).then_some(MAX_VARCHAR),
            };
            (to_camel_case(c.name), rule)
        })
        .collect()
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against per-property rules. All required properties must be present and non-null.
    pub fn validate(body: &Map<String, Value>, rules: &HashMap<String, ValidationRule>) -> Result<(), AppError> {
        for (property, rule) in rules {
            let val = body.get(property);
            if rule.required && val.map_or(true, Value::is_null) {
                return Err(AppError::Validation(format!("{} is required", property)));
            }
            if let Some(v) = val {
                validate_field(property, v, rule)?;
            }
        }
        Ok(())
    }

    /// Validate only the properties present in body (for PATCH). Absent required properties are allowed,
    /// explicit nulls are ignored because PATCH skips them.
    pub fn validate_partial(
        body: &Map<String, Value>,
        rules: &HashMap<String, ValidationRule>,
    ) -> Result<(), AppError> {
        for (property, v) in body {
            if let Some(rule) = rules.get(property) {
                validate_field(property, v, rule)?;
            }
        }
        Ok(())
    }
}

fn validate_field(property: &str, v: &Value, rule: &ValidationRule) -> Result<(), AppError> {
    if let (Some(max), Some(s)) = (rule.max_length, v.as_str()) {
        if s.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                property, max
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GridColumn, GridConfiguration};
    use serde_json::json;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn rules_come_from_columns() {
        let rules = rules_for::<GridConfiguration>();
        assert!(rules["gridName"].required);
        assert_eq!(rules["sortingMode"].max_length, Some(MAX_VARCHAR));
        assert!(!rules.contains_key("pageSize"));
    }

    #[test]
    fn null_required_property_is_rejected() {
        let rules = rules_for::<GridColumn>();
        let err = RequestValidator::validate(&object(json!({ "dataField": null })), &rules).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "dataField is required"));
    }

    #[test]
    fn long_strings_are_rejected() {
        let rules = rules_for::<GridColumn>();
        let body = object(json!({ "dataField": "a", "caption": "x".repeat(256) }));
        assert!(RequestValidator::validate(&body, &rules).is_err());
        assert!(RequestValidator::validate_partial(&body, &rules).is_err());
    }

    #[test]
    fn partial_allows_missing_required() {
        let rules = rules_for::<GridColumn>();
        assert!(RequestValidator::validate_partial(&object(json!({ "caption": "Amount" })), &rules).is_ok());
    }
}
