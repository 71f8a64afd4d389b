//! Serializable representation of where a machine currently is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered path of state names from the outermost active state down to the
/// active leaf, e.g. `["ServingCustomer", "Authentication"]`.
///
/// This is the only persisted form of a machine's position. It serializes as
/// a plain JSON array of strings.
///
/// # Example
///
/// ```rust
/// use composite_fsm::core::ActiveConfiguration;
///
/// let path = ActiveConfiguration::from(vec!["ServingCustomer", "Authentication"]);
///
/// assert_eq!(path.leaf(), Some("Authentication"));
/// assert_eq!(path.to_string(), "ServingCustomer/Authentication");
/// assert_eq!(
///     serde_json::to_string(&path).unwrap(),
///     r#"["ServingCustomer","Authentication"]"#
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveConfiguration(Vec<String>);

impl ActiveConfiguration {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Outermost active state.
    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Innermost active state.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Check whether a state with this name is part of the path.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> From<Vec<S>> for ActiveConfiguration {
    fn from(names: Vec<S>) -> Self {
        Self(names.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveConfiguration {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a ActiveConfiguration {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl PartialEq<[&str]> for ActiveConfiguration {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for ActiveConfiguration {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}

impl fmt::Display for ActiveConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}
