use bson::Bson;

/// A single match condition against one stored field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Equals { field: &'static str, value: Bson },
    NotEquals { field: &'static str, value: Bson },
    /// Case-insensitive literal substring match.
    ContainsCi { field: &'static str, needle: String },
    /// Matches when any of the nested conditions match.
    AnyOf(Vec<Condition>),
}

impl Condition {
    pub fn equals(field: &'static str, value: impl Into<Bson>) -> Self {
        Condition::Equals { field, value: value.into() }
    }

    pub fn not_equals(field: &'static str, value: impl Into<Bson>) -> Self {
        Condition::NotEquals { field, value: value.into() }
    }

    pub fn contains_ci(field: &'static str, needle: impl Into<String>) -> Self {
        Condition::ContainsCi { field, needle: needle.into() }
    }

    /// The same substring matched against each of `fields`, OR-ed together.
    pub fn search(fields: &[&'static str], needle: &str) -> Self {
        Condition::AnyOf(
            fields
                .iter()
                .map(|field| Condition::contains_ci(*field, needle))
                .collect(),
        )
    }
}

/// Conjunction of conditions. An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn and_if(self, condition: Option<Condition>) -> Self {
        match condition {
            Some(condition) => self.and(condition),
            None => self,
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Query parameter value, or `None` when it is absent or blank.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Builds the list filter shared by every resource: one optional exact-match
/// field, a substring match on `email`, and a free-text `search` across
/// `search_fields`.
pub fn list_filter(
    exact: (&'static str, Option<&str>),
    email: Option<&str>,
    search: Option<&str>,
    search_fields: &[&'static str],
) -> Filter {
    let (exact_field, exact_value) = exact;
    Filter::new()
        .and_if(present(exact_value).map(|v| Condition::equals(exact_field, v)))
        .and_if(present(email).map(|v| Condition::contains_ci("email", v)))
        .and_if(present(search).map(|v| Condition::search(search_fields, v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[&str] = &["fullName", "email", "message"];

    #[test]
    fn test_no_params_gives_empty_filter() {
        let filter = list_filter(("subject", None), None, None, FIELDS);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_blank_params_are_ignored() {
        let filter = list_filter(("subject", Some("")), Some(""), Some(""), FIELDS);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_all_params_combined() {
        let filter = list_filter(("subject", Some("claim")), Some("gmail"), Some("foo"), FIELDS);
        assert_eq!(
            filter.conditions(),
            &[
                Condition::equals("subject", "claim"),
                Condition::contains_ci("email", "gmail"),
                Condition::AnyOf(vec![
                    Condition::contains_ci("fullName", "foo"),
                    Condition::contains_ci("email", "foo"),
                    Condition::contains_ci("message", "foo"),
                ]),
            ]
        );
    }
}
