use std::fmt;

use crate::utils::hash::fingerprint;

/// Composite cache identity: an operation name plus its parameters,
/// e.g. `["candidateTasks", "<application id>"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Append one parameter segment
    pub fn with(mut self, part: impl ToString) -> Self {
        self.0.push(part.to_string());
        self
    }

    /// Segment-wise prefix match, so `["applicants"]` covers `["applicants", id]`
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn fingerprint(&self) -> String {
        fingerprint(&self.to_string())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching_is_segment_wise() {
        let key = QueryKey::new("candidateTasks").with("42");

        assert!(key.starts_with(&QueryKey::new("candidateTasks")));
        assert!(key.starts_with(&key));
        assert!(!key.starts_with(&QueryKey::new("candidate")));
        assert!(!QueryKey::new("candidateTasks").starts_with(&key));
    }

    #[test]
    fn test_display_and_fingerprint() {
        let key = QueryKey::new("internships").with("open");
        assert_eq!(key.to_string(), "internships/open");
        assert_eq!(key.fingerprint(), QueryKey::new("internships").with("open").fingerprint());
    }
}
