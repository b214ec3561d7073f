use std::fmt::{Display, Formatter, Result as FmtResult};

/// A single subject–predicate–object statement.
///
/// All three positions are plain strings; no typed literals are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl<S: Into<String>, P: Into<String>, O: Into<String>> From<(S, P, O)> for Triple {
    fn from((subject, predicate, object): (S, P, O)) -> Self {
        Self::new(subject, predicate, object)
    }
}

impl Display for Triple {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {} {:?}", self.subject, self.predicate, self.object)
    }
}
