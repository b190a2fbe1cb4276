//! Fluent assertions over extracted tags

use crate::ocaml::tags::{Kind, Tag};

fn summarize(tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| format!("{}:{}", tag.kind.letter(), tag.qualified_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct TagsAssertion<'a> {
    pub(crate) tags: &'a [Tag],
}

impl<'a> TagsAssertion<'a> {
    /// Assert the number of tags
    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.tags.len(),
            expected,
            "Expected {} tags, found {}: [{}]",
            expected,
            self.tags.len(),
            summarize(self.tags)
        );
        self
    }

    /// Assert on the tag at `index`
    pub fn tag<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TagAssertion<'a>) -> TagAssertion<'a>,
    {
        assert!(
            index < self.tags.len(),
            "Tag index {} out of bounds ({} tags: [{}])",
            index,
            self.tags.len(),
            summarize(self.tags)
        );
        assertion(TagAssertion {
            tag: &self.tags[index],
            context: format!("tags[{}]", index),
        });
        self
    }

    /// Assert on the first tag whose qualified name is `qualified`
    pub fn find<F>(self, qualified: &str, assertion: F) -> Self
    where
        F: FnOnce(TagAssertion<'a>) -> TagAssertion<'a>,
    {
        let tag = self
            .tags
            .iter()
            .find(|tag| tag.qualified_name() == qualified)
            .unwrap_or_else(|| {
                panic!(
                    "No tag named {}: [{}]",
                    qualified,
                    summarize(self.tags)
                )
            });
        assertion(TagAssertion {
            tag,
            context: qualified.to_string(),
        });
        self
    }

    /// Assert the exact sequence of kind letters and qualified names
    pub fn sequence(self, expected: &[(char, &str)]) -> Self {
        let actual: Vec<(char, String)> = self
            .tags
            .iter()
            .map(|tag| (tag.kind.letter(), tag.qualified_name()))
            .collect();
        let expected: Vec<(char, String)> = expected
            .iter()
            .map(|(letter, name)| (*letter, name.to_string()))
            .collect();
        assert_eq!(actual, expected, "Tag sequence differs");
        self
    }

    /// Assert no tag has this plain name
    pub fn none_named(self, name: &str) -> Self {
        assert!(
            self.tags.iter().all(|tag| tag.name != name),
            "Expected no tag named {}: [{}]",
            name,
            summarize(self.tags)
        );
        self
    }

    /// Assert how many tags have `kind`
    pub fn kind_count(self, kind: Kind, expected: usize) -> Self {
        let actual = self.tags.iter().filter(|tag| tag.kind == kind).count();
        assert_eq!(
            actual,
            expected,
            "Expected {} {} tags, found {}: [{}]",
            expected,
            kind,
            actual,
            summarize(self.tags)
        );
        self
    }
}

pub struct TagAssertion<'a> {
    tag: &'a Tag,
    context: String,
}

impl<'a> TagAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.tag.name, expected,
            "{}: expected name {}, found {}",
            self.context, expected, self.tag.name
        );
        self
    }

    pub fn kind(self, expected: Kind) -> Self {
        assert_eq!(
            self.tag.kind, expected,
            "{}: expected kind {}, found {}",
            self.context, expected, self.tag.kind
        );
        self
    }

    /// 1-based line
    pub fn line(self, expected: usize) -> Self {
        assert_eq!(
            self.tag.line, expected,
            "{}: expected line {}, found {}",
            self.context, expected, self.tag.line
        );
        self
    }

    pub fn column(self, expected: usize) -> Self {
        assert_eq!(
            self.tag.column, expected,
            "{}: expected column {}, found {}",
            self.context, expected, self.tag.column
        );
        self
    }

    pub fn scope(self, kind: Kind, name: &str) -> Self {
        assert_eq!(
            self.tag.scope_kind(),
            Some(kind),
            "{}: expected scope kind {}, found {:?}",
            self.context,
            kind,
            self.tag.scope_kind()
        );
        assert_eq!(
            self.tag.scope_name(),
            Some(name),
            "{}: expected scope {}, found {:?}",
            self.context,
            name,
            self.tag.scope_name()
        );
        self
    }

    pub fn no_scope(self) -> Self {
        assert!(
            self.tag.scope.is_none(),
            "{}: expected no scope, found {:?}",
            self.context,
            self.tag.scope
        );
        self
    }

    pub fn qualified(self, expected: &str) -> Self {
        assert_eq!(
            self.tag.qualified_name(),
            expected,
            "{}: expected qualified name {}",
            self.context,
            expected
        );
        self
    }
}
