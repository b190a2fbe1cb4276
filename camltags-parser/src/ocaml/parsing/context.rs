//! Context stack
//!
//! A bounded stack of scope frames. Frames are ordered outermost first; the innermost frame is
//! the last one. Each frame remembers the state to resume once it is popped and, when it has a
//! name, its fully qualified scope name.
//!
//! Qualified names are computed on push: the nearest frame below with a non-empty name gives the
//! prefix, joined with the separator of that frame's role. Frames pushed without a name never
//! take part in this chain, they only mark where to resume.
//!
//! Pushes past the capacity are refused and counted instead of growing the stack, so input
//! nested deeper than the capacity degrades to truncated scopes.

use super::state::State;
use crate::ocaml::tags::Kind;

/// Default number of frames the stack accepts
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// A true declaration boundary, target of [`ContextStack::pop_strong`]
    Strong,
    /// A transient sub-expression frame
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Module,
    Class,
    Type,
    Value,
    Function,
    Method,
    Block,
    Match,
}

impl Role {
    /// Character placed between this frame's name and the names nested in it
    pub fn separator(self) -> char {
        match self {
            Role::Module | Role::Function | Role::Value | Role::Method => '/',
            Role::Type => '.',
            Role::Class => '#',
            Role::Block => ' ',
            Role::Match => '|',
        }
    }

    /// Kind reported as the scope of declarations found inside a frame with this role
    pub fn scope_kind(self) -> Option<Kind> {
        match self {
            Role::Function => Some(Kind::Function),
            Role::Method => Some(Kind::Method),
            Role::Value => Some(Kind::ValueSignature),
            Role::Module => Some(Kind::Module),
            Role::Type => Some(Kind::Type),
            Role::Class => Some(Kind::Class),
            Role::Block | Role::Match => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub strength: Strength,
    pub role: Role,
    pub resume: State,
    /// Qualified name, empty for resumption markers
    pub name: String,
}

impl Frame {
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ContextStack {
    frames: Vec<Frame>,
    capacity: usize,
    refused: usize,
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ContextStack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
            refused: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of pushes refused because the stack was full
    pub fn refused(&self) -> usize {
        self.refused
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    fn nearest_named_index(&self) -> Option<usize> {
        self.frames.iter().rposition(Frame::is_named)
    }

    /// Innermost frame carrying a name; it is the scope of anything declared now.
    pub fn nearest_named(&self) -> Option<&Frame> {
        self.nearest_named_index().map(|i| &self.frames[i])
    }

    /// Append a frame. Returns false when the stack is full and the frame was dropped.
    pub fn push(
        &mut self,
        strength: Strength,
        role: Role,
        resume: State,
        name: Option<&str>,
    ) -> bool {
        if self.frames.len() >= self.capacity {
            self.refused += 1;
            return false;
        }

        let name = match name.filter(|name| !name.is_empty()) {
            None => String::new(),
            Some(own) => match self.nearest_named() {
                Some(parent) => format!("{}{}{}", parent.name, parent.role.separator(), own),
                None => own.to_string(),
            },
        };

        self.frames.push(Frame {
            strength,
            role,
            resume,
            name,
        });
        true
    }

    /// Strong frame for a declaration boundary, resuming at the top level.
    pub fn push_strong(&mut self, role: Role, name: Option<&str>) -> bool {
        self.push(Strength::Strong, role, State::TopLevel, name)
    }

    pub fn push_soft(&mut self, resume: State, role: Role, name: Option<&str>) -> bool {
        self.push(Strength::Soft, role, resume, name)
    }

    /// Nameless soft frame, a pure resumption marker.
    pub fn push_empty(&mut self, resume: State) -> bool {
        self.push(Strength::Soft, Role::Value, resume, None)
    }

    /// Drop everything from the innermost named frame up, returning the state it resumes.
    pub fn pop_to_nearest_named(&mut self) -> State {
        match self.nearest_named_index() {
            Some(i) => {
                let resume = self.frames[i].resume;
                self.frames.truncate(i);
                resume
            }
            None => {
                self.frames.clear();
                State::TopLevel
            }
        }
    }

    /// Drop exactly one frame whatever it holds.
    pub fn pop_soft(&mut self) -> State {
        match self.frames.pop() {
            Some(frame) => frame.resume,
            None => State::TopLevel,
        }
    }

    /// Drop everything from the innermost strong frame up.
    ///
    /// Also returns the role of that frame, or `None` when there was no strong frame and the
    /// stack was emptied.
    pub fn pop_strong(&mut self) -> (State, Option<Role>) {
        match self
            .frames
            .iter()
            .rposition(|frame| frame.strength == Strength::Strong)
        {
            Some(i) => {
                let (resume, role) = (self.frames[i].resume, self.frames[i].role);
                self.frames.truncate(i);
                (resume, Some(role))
            }
            None => {
                self.frames.clear();
                (State::TopLevel, None)
            }
        }
    }

    /// Drop everything above the innermost match frame and return the state it resumes.
    ///
    /// The match frame itself is kept, so the next alternative is still inside it. Leaves the
    /// stack alone when no match frame exists.
    pub fn jump_to_nearest_match(&mut self) -> Option<State> {
        let i = self
            .frames
            .iter()
            .rposition(|frame| frame.role == Role::Match)?;
        self.frames.truncate(i + 1);
        Some(self.frames[i].resume)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.refused = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(stack: &ContextStack) -> Vec<&str> {
        stack.frames().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_qualified_names_follow_named_ancestors() {
        let mut stack = ContextStack::default();
        stack.push_strong(Role::Module, Some("M"));
        stack.push_empty(State::Expression);
        stack.push_strong(Role::Type, Some("t"));
        stack.push_soft(State::BodyEntry, Role::Function, Some("f"));

        assert_eq!(names(&stack), vec!["M", "", "M/t", "M/t.f"]);
        assert_eq!(stack.nearest_named().map(|f| f.role), Some(Role::Function));
    }

    #[test]
    fn test_class_and_match_separators() {
        let mut stack = ContextStack::default();
        stack.push_strong(Role::Class, Some("c"));
        stack.push_strong(Role::Method, Some("m"));
        assert_eq!(stack.nearest_named().unwrap().name, "c#m");

        let mut stack = ContextStack::default();
        stack.push_soft(State::MatchPattern, Role::Match, Some("p"));
        stack.push_soft(State::Expression, Role::Value, Some("x"));
        assert_eq!(stack.nearest_named().unwrap().name, "p|x");
    }

    #[test]
    fn test_empty_name_is_a_marker() {
        let mut stack = ContextStack::default();
        stack.push_strong(Role::Module, Some(""));
        stack.push_strong(Role::Function, Some("f"));
        assert_eq!(names(&stack), vec!["", "f"]);
    }

    #[test]
    fn test_pop_to_nearest_named() {
        let mut stack = ContextStack::default();
        stack.push_strong(Role::Function, Some("f"));
        stack.push_soft(State::BodyEntry, Role::Value, Some("x"));
        stack.push_empty(State::Expression);
        stack.push_empty(State::Expression);

        assert_eq!(stack.pop_to_nearest_named(), State::BodyEntry);
        assert_eq!(names(&stack), vec!["f"]);

        assert_eq!(stack.pop_to_nearest_named(), State::TopLevel);
        assert!(stack.is_empty());
        assert_eq!(stack.pop_to_nearest_named(), State::TopLevel);
    }

    #[test]
    fn test_pop_soft_on_empty_stack() {
        let mut stack = ContextStack::default();
        assert_eq!(stack.pop_soft(), State::TopLevel);
        stack.push_empty(State::Expression);
        assert_eq!(stack.pop_soft(), State::Expression);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_strong_reports_role() {
        let mut stack = ContextStack::default();
        stack.push_strong(Role::Module, Some("M"));
        stack.push_strong(Role::Function, Some("f"));
        stack.push_empty(State::Expression);

        assert_eq!(stack.pop_strong(), (State::TopLevel, Some(Role::Function)));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop_strong(), (State::TopLevel, Some(Role::Module)));
        assert_eq!(stack.pop_strong(), (State::TopLevel, None));
    }

    #[test]
    fn test_jump_to_nearest_match_keeps_the_match() {
        let mut stack = ContextStack::default();
        stack.push_strong(Role::Function, Some("f"));
        stack.push_soft(State::MatchPattern, Role::Match, None);
        stack.push_empty(State::MatchPattern);
        stack.push_empty(State::Expression);

        assert_eq!(stack.jump_to_nearest_match(), Some(State::MatchPattern));
        assert_eq!(stack.len(), 2);

        let mut stack = ContextStack::default();
        stack.push_empty(State::Expression);
        assert_eq!(stack.jump_to_nearest_match(), None);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_push_past_capacity_is_refused() {
        let mut stack = ContextStack::with_capacity(2);
        assert!(stack.push_strong(Role::Module, Some("A")));
        assert!(stack.push_strong(Role::Module, Some("B")));
        assert!(!stack.push_strong(Role::Module, Some("C")));
        assert!(!stack.push_empty(State::Expression));

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.refused(), 2);
        assert_eq!(stack.nearest_named().unwrap().name, "A/B");
    }
}
