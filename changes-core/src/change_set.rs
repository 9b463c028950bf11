/// Ordered set of file paths with changes still pending for the current plan.
///
/// Order comes from the plan snapshot and is kept as-is: rejecting a file
/// removes it from the sequence without re-sorting the rest. Paths are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanChangeSet {
    sorted_paths: Vec<String>,
}

impl PlanChangeSet {
    /// Builds a change set from a plan snapshot.
    ///
    /// Repeated paths keep their first position; later duplicates are dropped.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sorted_paths: Vec<String> = Vec::new();
        for path in paths {
            let path = path.into();
            if !sorted_paths.contains(&path) {
                sorted_paths.push(path);
            }
        }
        Self { sorted_paths }
    }

    /// True when no file has a pending change.
    pub fn is_empty(&self) -> bool {
        self.sorted_paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sorted_paths.len()
    }

    /// All pending paths in display order.
    pub fn paths(&self) -> &[String] {
        &self.sorted_paths
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.sorted_paths.get(index).map(String::as_str)
    }

    /// Removes `path`, keeping the relative order of the remaining entries.
    ///
    /// Returns `false` (and changes nothing) when the path is not present.
    pub fn remove_path(&mut self, path: &str) -> bool {
        match self.sorted_paths.iter().position(|p| p == path) {
            Some(idx) => {
                self.sorted_paths.remove(idx);
                true
            }
            None => false,
        }
    }
}
