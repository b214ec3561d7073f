use pgmirror_rdf::vocab::AGENTS;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A person or organisation credited as a creator of a book.
///
/// Records refer to creators by address, e.g. Thomas Jefferson is
/// `http://www.gutenberg.org/2009/agents/1638`; the id is the numeric tail
/// of that address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Creator {
    pub id: u64,
    pub name: String,
    /// Negative for years BCE
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub webpage: Option<String>,
}
impl Creator {
    /// The agent address this creator was resolved from.
    pub fn address(&self) -> String {
        format!("{AGENTS}{}", self.id)
    }
}

impl Display for Creator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (self.birth_year, self.death_year) {
            (None, None) => write!(f, "{}", self.name),
            (birth, death) => {
                let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_else(|| "?".to_string());
                write!(f, "{} ({}-{})", self.name, year(birth), year(death))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Creator;
    use rstest::rstest;

    fn jefferson(birth_year: Option<i32>, death_year: Option<i32>) -> Creator {
        Creator {
            id: 1638,
            name: "Jefferson, Thomas".to_string(),
            birth_year,
            death_year,
            webpage: None,
        }
    }

    #[test]
    fn address_is_derived_from_id() {
        assert_eq!(jefferson(None, None).address(), "http://www.gutenberg.org/2009/agents/1638");
    }

    #[rstest]
    #[case(None, None, "Jefferson, Thomas")]
    #[case(Some(1743), Some(1826), "Jefferson, Thomas (1743-1826)")]
    #[case(Some(1743), None, "Jefferson, Thomas (1743-?)")]
    fn display(#[case] birth: Option<i32>, #[case] death: Option<i32>, #[case] expected: &str) {
        assert_eq!(jefferson(birth, death).to_string(), expected);
    }
}
