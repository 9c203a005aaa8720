//! Paging parameters and the `Link` / `X-Total-Count` headers of list responses.

use crate::error::{AppError, AppResult};
use crate::repository::Fetch;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// Parsed list query: `page`, `size`, repeated `sort=prop[,asc|desc]`, `eagerload`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: PageRequest,
    pub fetch: Fetch,
}

impl ListQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> AppResult<Self> {
        let mut page = PageRequest::default();
        let mut fetch = Fetch::Eager;
        for (key, value) in pairs {
            match key.as_str() {
                "page" => page.page = parse_number(key, value)?,
                "size" => page.size = parse_number::<u32>(key, value)?.clamp(1, MAX_PAGE_SIZE),
                "sort" => page.sort.extend(parse_sort(value)?),
                "eagerload" => {
                    fetch = match value.trim().to_ascii_lowercase().as_str() {
                        "" | "true" | "1" | "yes" | "on" => Fetch::Eager,
                        "false" | "0" | "no" | "off" => Fetch::Lazy,
                        _ => return Err(AppError::BadRequest(format!("invalid eagerload '{}'", value))),
                    }
                }
                _ => {}
            }
        }
        Ok(ListQuery { page, fetch })
    }
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> AppResult<N> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid {} '{}'", key, value)))
}

fn parse_sort(value: &str) -> AppResult<Option<SortOrder>> {
    let mut parts = value.split(',').map(str::trim);
    let property = match parts.next() {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => return Ok(None),
    };
    let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
        None | Some("asc") | Some("") => Direction::Asc,
        Some("desc") => Direction::Desc,
        Some(other) => return Err(AppError::BadRequest(format!("invalid sort direction '{}'", other))),
    };
    Ok(Some(SortOrder { property, direction }))
}

/// `Link` header value for a page of `total` rows served at `path` with `query` parameters.
pub fn link_header(path: &str, query: &[(String, String)], page: &PageRequest, total: i64) -> String {
    let size = i64::from(page.size);
    let current = i64::from(page.page);
    let total_pages = (total + size - 1) / size;
    let last = (total_pages - 1).max(0);

    let mut links = Vec::new();
    if current < last {
        links.push(link(path, query, current + 1, size, "next"));
    }
    if current > 0 {
        links.push(link(path, query, current - 1, size, "prev"));
    }
    links.push(link(path, query, last, size, "last"));
    links.push(link(path, query, 0, size, "first"));
    links.join(",")
}

/// Query parameters other than `page` and `size` are carried over, percent-encoded.
fn link(path: &str, query: &[(String, String)], page: i64, size: i64, rel: &str) -> String {
    let params = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter().filter(|(k, _)| k != "page" && k != "size"))
        .append_pair("page", &page.to_string())
        .append_pair("size", &size.to_string())
        .finish();
    format!("<{}?{}>; rel=\"{}\"", path, params, rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_apply_when_query_is_empty() {
        let q = ListQuery::from_pairs(&[]).unwrap();
        assert_eq!(q.page, PageRequest::default());
        assert_eq!(q.fetch, Fetch::Eager);
    }

    #[test]
    fn parses_repeated_sort_and_clamps_size() {
        let q = ListQuery::from_pairs(&pairs(&[
            ("page", "2"),
            ("size", "5000"),
            ("sort", "gridName,desc"),
            ("sort", "id"),
            ("eagerload", "false"),
        ]))
        .unwrap();
        assert_eq!(q.page.page, 2);
        assert_eq!(q.page.size, MAX_PAGE_SIZE);
        assert_eq!(q.page.sort.len(), 2);
        assert_eq!(q.page.sort[0].direction, Direction::Desc);
        assert_eq!(q.page.sort[1].property, "id");
        assert_eq!(q.page.sort[1].direction, Direction::Asc);
        assert_eq!(q.fetch, Fetch::Lazy);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(ListQuery::from_pairs(&pairs(&[("page", "x")])).is_err());
        assert!(ListQuery::from_pairs(&pairs(&[("sort", "id,sideways")])).is_err());
    }

    #[test]
    fn middle_page_links_in_every_direction() {
        let page = PageRequest {
            page: 1,
            size: 10,
            sort: Vec::new(),
        };
        let query = pairs(&[("sort", "id,desc"), ("page", "1")]);
        let link = link_header("/api/grid-columns", &query, &page, 35);
        assert_eq!(
            link,
            "</api/grid-columns?sort=id%2Cdesc&page=2&size=10>; rel=\"next\",\
             </api/grid-columns?sort=id%2Cdesc&page=0&size=10>; rel=\"prev\",\
             </api/grid-columns?sort=id%2Cdesc&page=3&size=10>; rel=\"last\",\
             </api/grid-columns?sort=id%2Cdesc&page=0&size=10>; rel=\"first\""
        );
    }

    #[test]
    fn link_values_are_percent_encoded() {
        let query = pairs(&[("note", "a&b"), ("lang", "\n"), ("q", "x y")]);
        let link = link_header("/api/x", &query, &PageRequest::default(), 1);
        assert_eq!(
            link,
            "</api/x?note=a%26b&lang=%0A&q=x+y&page=0&size=20>; rel=\"last\",\
             </api/x?note=a%26b&lang=%0A&q=x+y&page=0&size=20>; rel=\"first\""
        );
        assert!(axum::http::HeaderValue::from_str(&link).is_ok());
    }

    #[test]
    fn eagerload_accepts_boolean_aliases() {
        for value in ["TRUE", "1", "yes", "On", ""] {
            let q = ListQuery::from_pairs(&pairs(&[("eagerload", value)])).unwrap();
            assert_eq!(q.fetch, Fetch::Eager, "eagerload={}", value);
        }
        for value in ["False", "0", "no", "OFF"] {
            let q = ListQuery::from_pairs(&pairs(&[("eagerload", value)])).unwrap();
            assert_eq!(q.fetch, Fetch::Lazy, "eagerload={}", value);
        }
        assert!(ListQuery::from_pairs(&pairs(&[("eagerload", "maybe")])).is_err());
    }

    #[test]
    fn empty_collection_links_first_and_last_only() {
        let link = link_header("/api/x", &[], &PageRequest::default(), 0);
        assert_eq!(
            link,
            "</api/x?page=0&size=20>; rel=\"last\",</api/x?page=0&size=20>; rel=\"first\""
        );
    }
}
