//! Motivational factors and the closed catalog they belong to.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::BankDefect;
use crate::domain::foundation::ValidationError;

/// Name of a motivational factor (e.g. "Perfectionism").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorName(String);

impl FactorName {
    /// Creates a factor name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("factor"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed, ordered set of factors a bank measures.
///
/// # Invariants
///
/// - At least one factor
/// - No duplicate names
/// - Order is canonical and used as the ranking tie-break
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FactorCatalog {
    factors: Vec<FactorName>,
}

impl FactorCatalog {
    /// Builds a catalog from names in canonical order.
    pub fn new<I, S>(names: I) -> Result<Self, BankDefect>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut factors = Vec::new();
        let mut seen = HashSet::new();

        for name in names {
            let factor = FactorName::new(name).map_err(|_| BankDefect::BlankFactor)?;
            if !seen.insert(factor.clone()) {
                return Err(BankDefect::DuplicateFactor(factor));
            }
            factors.push(factor);
        }

        if factors.is_empty() {
            return Err(BankDefect::EmptyCatalog);
        }

        Ok(Self { factors })
    }

    /// Returns the canonical position of a factor.
    pub fn position(&self, factor: &FactorName) -> Option<usize> {
        self.factors.iter().position(|f| f == factor)
    }

    /// Looks up a factor by its name.
    pub fn find(&self, name: &str) -> Option<&FactorName> {
        self.factors.iter().find(|f| f.as_str() == name)
    }

    pub fn contains(&self, factor: &FactorName) -> bool {
        self.position(factor).is_some()
    }

    /// Iterates factors in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &FactorName> {
        self.factors.iter()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_name_trims_whitespace() {
        let name = FactorName::new("  Learning ").unwrap();
        assert_eq!(name.as_str(), "Learning");
    }

    #[test]
    fn factor_name_rejects_blank() {
        assert!(FactorName::new("   ").is_err());
    }

    #[test]
    fn catalog_preserves_canonical_order() {
        let catalog = FactorCatalog::new(["Security", "Learning", "Balance"]).unwrap();
        let names: Vec<_> = catalog.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, vec!["Security", "Learning", "Balance"]);
        assert_eq!(catalog.position(&FactorName::new("Balance").unwrap()), Some(2));
    }

    #[test]
    fn catalog_rejects_duplicates() {
        let result = FactorCatalog::new(["Security", "Learning", "Security"]);
        assert_eq!(
            result,
            Err(BankDefect::DuplicateFactor(FactorName::new("Security").unwrap()))
        );
    }

    #[test]
    fn catalog_rejects_empty() {
        let result = FactorCatalog::new(Vec::<String>::new());
        assert_eq!(result, Err(BankDefect::EmptyCatalog));
    }

    #[test]
    fn catalog_rejects_blank_names() {
        assert_eq!(FactorCatalog::new(["Security", ""]), Err(BankDefect::BlankFactor));
    }

    #[test]
    fn find_returns_none_for_unknown_name() {
        let catalog = FactorCatalog::new(["Security"]).unwrap();
        assert!(catalog.find("Security").is_some());
        assert!(catalog.find("Variety").is_none());
    }
}
