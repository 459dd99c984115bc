use super::model::Mark;

/// Marks inherited by inline content, outermost first.
///
/// The stack is never mutated once built: [`MarkStack::with`] returns a new
/// stack, so sibling inline branches that each add a mark cannot observe
/// one another's additions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkStack {
    marks: Vec<Mark>,
}

impl MarkStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this stack with `mark` appended as the innermost mark
    pub fn with(&self, mark: Mark) -> Self {
        let mut marks = Vec::with_capacity(self.marks.len() + 1);
        marks.extend(self.marks.iter().cloned());
        marks.push(mark);
        Self { marks }
    }

    /// Owned copy of the marks, for attaching to a text node
    pub fn to_vec(&self) -> Vec<Mark> {
        self.marks.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }
}
