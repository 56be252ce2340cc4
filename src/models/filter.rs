use mongodb::bson::{doc, Document};

use crate::errors::Errors;
use crate::models::customer::Customer;

/// Query predicate over the `customers` collection.
///
/// Rendered to a BSON document for MongoDB and evaluated directly by the
/// in-memory repository, so both backends agree on what matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerFilter {
    All,
    /// Case-insensitive literal substring of `first_name`.
    FirstNameContains(String),
    TypeIs(String),
    StateIs(String),
    /// `age` strictly greater than the value.
    AgeAbove(i64),
}

impl CustomerFilter {
    /// An absent or empty keyword matches every customer.
    pub fn by_keyword(keyword: Option<&str>) -> Self {
        match keyword {
            Some(keyword) if !keyword.is_empty() => {
                CustomerFilter::FirstNameContains(keyword.to_string())
            }
            _ => CustomerFilter::All,
        }
    }

    pub fn by_age(age: &str) -> Result<Self, Errors> {
        match age.trim().parse::<i64>() {
            Ok(age) => Ok(CustomerFilter::AgeAbove(age)),
            Err(_) => Err(Errors::new(&[("age", "must be an integer")])),
        }
    }

    pub fn to_document(&self) -> Document {
        match self {
            CustomerFilter::All => Document::new(),
            CustomerFilter::FirstNameContains(keyword) => doc! {
                "first_name": { "$regex": regex::escape(keyword), "$options": "i" }
            },
            CustomerFilter::TypeIs(customer_type) => doc! { "type": customer_type.as_str() },
            CustomerFilter::StateIs(state) => doc! { "state": state.as_str() },
            CustomerFilter::AgeAbove(age) => doc! { "age": { "$gt": *age } },
        }
    }

    pub fn matches(&self, customer: &Customer) -> bool {
        match self {
            CustomerFilter::All => true,
            CustomerFilter::FirstNameContains(keyword) => customer
                .first_name
                .as_deref()
                .map(|name| name.to_lowercase().contains(&keyword.to_lowercase()))
                .unwrap_or(false),
            CustomerFilter::TypeIs(customer_type) => {
                customer.customer_type.as_deref() == Some(customer_type.as_str())
            }
            CustomerFilter::StateIs(state) => customer.state.as_deref() == Some(state.as_str()),
            CustomerFilter::AgeAbove(age) => customer.age.map(|a| a > *age).unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(first_name: &str, customer_type: &str, state: &str, age: i64) -> Customer {
        Customer {
            first_name: Some(first_name.to_string()),
            customer_type: Some(customer_type.to_string()),
            state: Some(state.to_string()),
            age: Some(age),
            ..Default::default()
        }
    }

    #[test]
    fn empty_keyword_matches_everything() {
        assert_eq!(CustomerFilter::by_keyword(None), CustomerFilter::All);
        assert_eq!(CustomerFilter::by_keyword(Some("")), CustomerFilter::All);
        assert_eq!(CustomerFilter::All.to_document(), Document::new());
    }

    #[test]
    fn keyword_renders_case_insensitive_regex() {
        let filter = CustomerFilter::by_keyword(Some("an"));

        assert_eq!(
            filter.to_document(),
            doc! { "first_name": { "$regex": "an", "$options": "i" } }
        );
    }

    #[test]
    fn keyword_metacharacters_are_escaped() {
        let filter = CustomerFilter::by_keyword(Some("a.b*"));

        assert_eq!(
            filter.to_document(),
            doc! { "first_name": { "$regex": "a\\.b\\*", "$options": "i" } }
        );
        assert!(!filter.matches(&customer("axbb", "regular", "CA", 20)));
        assert!(filter.matches(&customer("Xa.b*", "regular", "CA", 20)));
    }

    #[test]
    fn keyword_matches_any_letter_case() {
        let filter = CustomerFilter::by_keyword(Some("an"));

        assert!(filter.matches(&customer("Anna", "vip", "CA", 30)));
        assert!(filter.matches(&customer("JOANNE", "vip", "CA", 30)));
        assert!(!filter.matches(&customer("Bob", "vip", "CA", 30)));
        assert!(!filter.matches(&Customer::default()));
    }

    #[test]
    fn type_and_state_are_exact() {
        let vip = CustomerFilter::TypeIs("vip".to_string());
        let ca = CustomerFilter::StateIs("CA".to_string());

        assert_eq!(vip.to_document(), doc! { "type": "vip" });
        assert_eq!(ca.to_document(), doc! { "state": "CA" });
        assert!(vip.matches(&customer("Anna", "vip", "CA", 30)));
        assert!(!vip.matches(&customer("Anna", "vip-gold", "CA", 30)));
        assert!(!ca.matches(&customer("Anna", "vip", "ca", 30)));
    }

    #[test]
    fn age_is_strictly_greater() {
        let filter = CustomerFilter::by_age("30").unwrap();

        assert_eq!(filter.to_document(), doc! { "age": { "$gt": 30_i64 } });
        assert!(filter.matches(&customer("Anna", "vip", "CA", 31)));
        assert!(!filter.matches(&customer("Anna", "vip", "CA", 30)));
        assert!(!filter.matches(&Customer::default()));
    }

    #[test]
    fn non_integer_age_is_rejected() {
        assert!(CustomerFilter::by_age("thirty").is_err());
        assert!(CustomerFilter::by_age("30.5").is_err());
    }
}
