use crate::Triple;

/// An ordered collection of triples, typically one record's worth.
///
/// Selection never reorders: every query yields triples in the order they
/// were inserted, which for parsed records is document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleSet {
    triples: Vec<Triple>,
}

impl TripleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn push(&mut self, triple: impl Into<Triple>) {
        self.triples.push(triple.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    /// Select every triple whose subject and predicate both satisfy the
    /// given tests.
    ///
    /// ```
    /// use pgmirror_rdf::TripleSet;
    ///
    /// let set: TripleSet = [("a", "p", "1"), ("b", "p", "2"), ("a", "q", "3")].into_iter().collect();
    /// let objects: Vec<_> = set.select(|s| s == "a", |_| true).map(|t| t.object.as_str()).collect();
    /// assert_eq!(objects, ["1", "3"]);
    /// ```
    pub fn select<'a, S, P>(&'a self, subject: S, predicate: P) -> impl Iterator<Item = &'a Triple> + 'a
    where
        S: Fn(&str) -> bool + 'a,
        P: Fn(&str) -> bool + 'a,
    {
        self.triples.iter().filter(move |t| subject(&t.subject) && predicate(&t.predicate))
    }

    /// The first triple about `subject` whose predicate satisfies `predicate`.
    pub fn first(&self, subject: &str, predicate: impl Fn(&str) -> bool) -> Option<&Triple> {
        self.triples.iter().find(|t| t.subject == subject && predicate(&t.predicate))
    }

    /// Objects of all triples about `subject` whose predicate satisfies
    /// `predicate`.
    pub fn objects<'a, P>(&'a self, subject: &'a str, predicate: P) -> impl Iterator<Item = &'a str> + 'a
    where
        P: Fn(&str) -> bool + 'a,
    {
        self.select(move |s| s == subject, predicate).map(|t| t.object.as_str())
    }

    /// The first subject (in document order) satisfying `test`.
    pub fn find_subject(&self, test: impl Fn(&str) -> bool) -> Option<&str> {
        self.triples.iter().map(|t| t.subject.as_str()).find(|s| test(s))
    }
}

impl<T: Into<Triple>> FromIterator<T> for TripleSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: Into<Triple>> Extend<T> for TripleSet {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.triples.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for TripleSet {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;
    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a TripleSet {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;
    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
