use serde::Serialize;

use crate::listsync::{FilterKey, ListQuery};

/// The wire shape of a list request: ordered filters, ordered sortings and
/// page-bounded pagination, passed as GraphQL variables.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListParam {
    pub filters: Vec<Filter>,
    pub sortings: Vec<Sorting>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Filter {
    pub name: String,
    pub operator: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Sorting {
    pub name: String,
    pub desc: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Filter {
    pub fn eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operator: "eq".to_string(),
            value: value.into(),
        }
    }
}

impl From<&ListQuery> for Pagination {
    fn from(query: &ListQuery) -> Self {
        Self {
            page: query.page,
            limit: query.page_size,
        }
    }
}

impl From<&ListQuery> for ListParam {
    fn from(query: &ListQuery) -> Self {
        let filters = match &query.filter {
            FilterKey::Group(id) => vec![Filter::eq("group_id", id.to_string())],
            FilterKey::Provider(provider) => vec![Filter::eq("provider", provider.clone())],
            // Favorites go to their own endpoint, not a generic filter.
            FilterKey::All | FilterKey::Favorites => Vec::new(),
        };
        Self {
            filters,
            sortings: vec![Sorting {
                name: query.sort_field.clone(),
                desc: query.sort_descending,
            }],
            pagination: Pagination::from(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn query(filter: FilterKey) -> ListQuery {
        ListQuery {
            filter,
            page: 2,
            page_size: 30,
            sort_field: "name".to_string(),
            sort_descending: true,
        }
    }

    #[test]
    fn group_filter_serializes_to_wire_contract() {
        let id = Uuid::from_u128(7);
        let param = ListParam::from(&query(FilterKey::Group(id)));

        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({
                "filters": [{ "name": "group_id", "operator": "eq", "value": id.to_string() }],
                "sortings": [{ "name": "name", "desc": true }],
                "pagination": { "page": 2, "limit": 30 },
            })
        );
    }

    #[test]
    fn all_and_favorites_carry_no_filters() {
        assert!(ListParam::from(&query(FilterKey::All)).filters.is_empty());
        assert!(ListParam::from(&query(FilterKey::Favorites)).filters.is_empty());
    }
}
