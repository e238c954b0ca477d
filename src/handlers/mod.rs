//! Request handlers module

use serde::Deserialize;

pub mod auth;
pub mod building;
pub mod dorm;
pub mod role;
pub mod student;
pub mod user;

/// `?page=1&size=10&name=...` shared by every paged listing
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default)]
    pub name: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// `?id=...`
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 10);
        assert!(query.name.is_none());
    }
}
