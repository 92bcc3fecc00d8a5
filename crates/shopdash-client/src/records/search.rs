//! Free-text filtering for the list commands.

use crate::records::{Product, Purchase, Sale, Salesperson};

/// A lowercased search term. Blank input yields no query, so an empty
/// `--search` lists everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| Self(term.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        record
            .search_fields()
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&self.0))
    }
}

/// The text fields a list command searches, absent optional fields as `None`.
pub trait Searchable {
    fn search_fields(&self) -> Vec<Option<&str>>;
}

impl Searchable for Sale {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.product_name.as_str()),
            Some(self.category.as_str()),
            self.salesperson_name.as_deref(),
        ]
    }
}

impl Searchable for Purchase {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.product_name.as_str())]
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), Some(self.category.as_str())]
    }
}

impl Searchable for Salesperson {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), self.email.as_deref(), self.phone.as_deref()]
    }
}

/// Keeps the rows matching `query`; no query keeps them all.
pub fn retain_matching<T: Searchable>(rows: &mut Vec<T>, query: Option<&SearchQuery>) {
    if let Some(query) = query {
        rows.retain(|row| query.matches(row));
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{SearchQuery, retain_matching};
    use crate::records::{Purchase, Salesperson};

    fn purchase(product_name: &str) -> Purchase {
        Purchase {
            id: format!("pur_{product_name}"),
            date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .and_then(|date| date.and_hms_opt(9, 0, 0))
                .unwrap_or_default(),
            product_name: product_name.to_string(),
            amount: 100,
        }
    }

    #[test]
    fn blank_terms_are_not_queries() {
        assert_eq!(SearchQuery::parse(None), None);
        assert_eq!(SearchQuery::parse(Some("   ")), None);
        assert_eq!(
            SearchQuery::parse(Some(" Hemp ")).map(|query| query.as_str().to_string()),
            Some("hemp".to_string())
        );
    }

    #[test]
    fn matching_ignores_case() {
        let mut rows = vec![purchase("Hemp Extract"), purchase("Bottles")];
        let query = SearchQuery::parse(Some("hEMP"));
        retain_matching(&mut rows, query.as_ref());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "Hemp Extract");

        let mut untouched = vec![purchase("Hemp Extract"), purchase("Bottles")];
        retain_matching(&mut untouched, None);
        assert_eq!(untouched.len(), 2);
    }

    #[test]
    fn missing_optional_fields_never_match() {
        let person = Salesperson {
            id: "sp_01".to_string(),
            name: "Sato".to_string(),
            email: None,
            phone: Some("090-1234-5678".to_string()),
            is_active: true,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert!(SearchQuery::parse(Some("1234")).is_some_and(|query| query.matches(&person)));
        assert!(!SearchQuery::parse(Some("example.com")).is_some_and(|query| query.matches(&person)));
    }
}
