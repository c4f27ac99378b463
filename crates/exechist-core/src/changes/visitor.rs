/// How a single output location changed between two executions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

/// A change to one location of one output property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange<'a> {
    pub property_name: &'a str,
    pub path: &'a str,
    pub kind: ChangeKind,
}

/// Receives changes while two snapshot sets are walked.
pub trait ChangeVisitor {
    /// Handle one change. Return `false` to stop the walk.
    fn visit_change(&mut self, change: &FileChange<'_>) -> bool;
}

/// Stops at the first change and remembers that it saw one
#[derive(Debug, Default)]
pub struct ChangeDetectorVisitor {
    any_changes: bool,
}

impl ChangeDetectorVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_any_changes(&self) -> bool {
        self.any_changes
    }
}

impl ChangeVisitor for ChangeDetectorVisitor {
    fn visit_change(&mut self, _change: &FileChange<'_>) -> bool {
        self.any_changes = true;
        false
    }
}
