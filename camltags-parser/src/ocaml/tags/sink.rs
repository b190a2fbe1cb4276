//! Tag sinks
//!
//! The automaton pushes every confirmed tag into a sink and never looks at it again.

use super::Tag;

/// Receiver of confirmed declarations.
pub trait TagSink {
    fn emit(&mut self, tag: Tag);
}

impl TagSink for Vec<Tag> {
    fn emit(&mut self, tag: Tag) {
        self.push(tag);
    }
}

impl<S: TagSink + ?Sized> TagSink for &mut S {
    fn emit(&mut self, tag: Tag) {
        (**self).emit(tag);
    }
}

/// Adapts a closure into a sink, for streaming tags out as they are found.
pub struct FnSink<F>(pub F);

impl<F: FnMut(Tag)> TagSink for FnSink<F> {
    fn emit(&mut self, tag: Tag) {
        (self.0)(tag);
    }
}
