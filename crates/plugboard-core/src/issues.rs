use std::collections::BTreeMap;

///
/// Issues
///
/// Side-channel collector for record-content contract violations, keyed by
/// the path of the offending node. Collecting instead of failing lets a
/// load (or a downstream compile) surface every problem in one pass while
/// still producing an editable graph.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Issues {
    entries: BTreeMap<String, Vec<String>>,
}

impl Issues {
    /// Create an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Record one issue against a node path.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.entries.entry(path.into()).or_default().push(message.into());
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded messages across all paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Iterate recorded issues in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }

    /// Fold another collector into this one, preserving message order.
    pub fn merge(&mut self, other: Self) {
        for (path, messages) in other.entries {
            self.entries.entry(path).or_default().extend(messages);
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_accumulate_by_path() {
        let mut issues = Issues::new();
        issues.add("managed_objects.cache", "unknown object scope 'banana'");
        issues.add("managed_objects.cache", "second message");
        issues.add("functions.process", "first");

        assert_eq!(issues.len(), 3);
        let paths: Vec<&str> = issues.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["functions.process", "managed_objects.cache"]);
    }

    #[test]
    fn merge_appends_messages() {
        let mut a = Issues::new();
        a.add("x", "one");
        let mut b = Issues::new();
        b.add("x", "two");
        b.add("y", "three");

        a.merge(b);

        assert_eq!(a.len(), 3);
        let (_, messages) = a.iter().next().expect("issue entry should exist");
        assert_eq!(messages, ["one", "two"]);
    }
}
