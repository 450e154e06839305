//! Ordered annotation list with append/undo/clear as its only mutators.

use super::annotation::Annotation;

/// Container for all committed annotations in the current editing session.
///
/// Order is both paint order (first = bottom layer, last = top layer) and undo
/// order (last appended = first removed). There is deliberately no way to edit
/// an annotation in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationList {
    annotations: Vec<Annotation>,
}

impl AnnotationList {
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an annotation on top of the existing ones.
    pub fn append(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Attempts to add an annotation, enforcing a maximum count when `max` > 0.
    ///
    /// Returns `true` if the annotation was added, `false` if the limit would be exceeded.
    pub fn try_append(&mut self, annotation: Annotation, max: usize) -> bool {
        if max == 0 || self.annotations.len() < max {
            self.annotations.push(annotation);
            true
        } else {
            false
        }
    }

    /// Removes and returns the most recently added annotation, if any.
    pub fn undo(&mut self) -> Option<Annotation> {
        self.annotations.pop()
    }

    /// Removes every annotation.
    pub fn clear(&mut self) {
        self.annotations.clear();
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Highest id present in the list.
    pub fn max_id(&self) -> Option<u64> {
        self.annotations.iter().map(|a| a.id).max()
    }
}

impl From<Vec<Annotation>> for AnnotationList {
    fn from(annotations: Vec<Annotation>) -> Self {
        Self { annotations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Color, Shape};
    use crate::geometry::Point;

    fn line(id: u64) -> Annotation {
        Annotation::new(
            id,
            Shape::Arrow {
                start: Point::new(0.0, 0.0),
                end: Point::new(id as f64, 1.0),
            },
            Color::new(1.0, 0.0, 0.0, 1.0),
            2,
        )
    }

    #[test]
    fn undo_removes_suffix_in_reverse_order() {
        let mut list = AnnotationList::new();
        for id in 1..=5 {
            list.append(line(id));
        }
        let before = list.as_slice().to_vec();

        for k in 0..=5 {
            let mut copy = list.clone();
            for _ in 0..k {
                copy.undo();
            }
            assert_eq!(copy.as_slice(), &before[..5 - k]);
        }
    }

    #[test]
    fn undo_on_empty_is_noop() {
        let mut list = AnnotationList::new();
        assert!(list.undo().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn clear_always_empties() {
        let mut list = AnnotationList::from(vec![line(1), line(2)]);
        list.clear();
        assert!(list.is_empty());
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn try_append_respects_limit() {
        let mut list = AnnotationList::new();
        assert!(list.try_append(line(1), 1));
        assert!(!list.try_append(line(2), 1));
        assert!(list.try_append(line(3), 0));
        assert_eq!(list.len(), 2);
        assert_eq!(list.max_id(), Some(3));
    }
}
