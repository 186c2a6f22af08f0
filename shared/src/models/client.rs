//! Client Model

use serde::{Deserialize, Serialize};

/// Workshop client (vehicle owner)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: i64,
    #[serde(alias = "nombre")]
    pub name: String,
    /// Phone / email as entered at the front desk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
}

/// Query for `GET /clients`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for ClientQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            per_page: 10,
        }
    }
}

impl ClientQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}
