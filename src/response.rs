//! Response header helpers: mutation alerts and pagination.

use crate::error::{AppError, AppResult};
use crate::pagination::{link_header, PageRequest};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

pub const TOTAL_COUNT: &str = "x-total-count";

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| AppError::Internal(format!("invalid header value '{}': {}", value, e)))
}

/// `X-{app}-alert: {app}.{entity}.{action}` and `X-{app}-params: {param}`.
pub fn alert(app_name: &str, entity_name: &str, action: &str, param: &str) -> AppResult<HeaderMap> {
    let key = format!("{}.{}.{}", app_name, entity_name, action);
    tracing::info!(alert = %key, param = %param, "entity {}", action);
    let name = |suffix: &str| {
        HeaderName::try_from(format!("x-{}-{}", app_name.to_lowercase(), suffix))
            .map_err(|e| AppError::Internal(format!("invalid header name for app '{}': {}", app_name, e)))
    };
    let mut headers = HeaderMap::new();
    headers.insert(name("alert")?, header_value(&key)?);
    headers.insert(name("params")?, header_value(param)?);
    Ok(headers)
}

pub fn entity_creation_alert(app_name: &str, entity_name: &str, id: i64) -> AppResult<HeaderMap> {
    alert(app_name, entity_name, "created", &id.to_string())
}

pub fn entity_update_alert(app_name: &str, entity_name: &str, id: i64) -> AppResult<HeaderMap> {
    alert(app_name, entity_name, "updated", &id.to_string())
}

pub fn entity_deletion_alert(app_name: &str, entity_name: &str, id: i64) -> AppResult<HeaderMap> {
    alert(app_name, entity_name, "deleted", &id.to_string())
}

/// `X-Total-Count` and `Link` for one page of a list served at `path`.
pub fn pagination(path: &str, query: &[(String, String)], page: &PageRequest, total: i64) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(TOTAL_COUNT), HeaderValue::from(total));
    headers.insert(header::LINK, header_value(&link_header(path, query, page, total))?);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_headers_use_app_prefix() {
        let headers = entity_creation_alert("gmodule", "gmoduleGridColumn", 4).unwrap();
        assert_eq!(headers["x-gmodule-alert"], "gmodule.gmoduleGridColumn.created");
        assert_eq!(headers["x-gmodule-params"], "4");
    }

    #[test]
    fn invalid_app_name_is_internal_error() {
        let err = entity_deletion_alert("bad name", "x", 1).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn pagination_sets_total_and_link() {
        let headers = pagination("/api/grid-columns", &[], &PageRequest::default(), 3).unwrap();
        assert_eq!(headers[TOTAL_COUNT], "3");
        assert!(headers[header::LINK].to_str().unwrap().contains("rel=\"first\""));
    }
}
