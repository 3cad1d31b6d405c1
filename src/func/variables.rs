use std::collections::BTreeSet;
use std::fmt;

/// Retrieve the name of variables to display terms and expressions
pub trait VariableNamer {
    /// The name of a variable, if it exists
    fn name(&self, uid: usize) -> Option<&str>;

    fn format_name(&self, f: &mut fmt::Formatter, uid: usize) -> fmt::Result {
        match self.name(uid) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "_{}", uid),
        }
    }
}

/// Ordered list of variable names.
///
/// The position of a variable in this list is its position in terms: the first variable
/// is the most significant bit of minterm indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Variables {
    names: Vec<String>,
}

impl Variables {
    /// Collect distinct names, sorted as strings (i.e. "x10" comes before "x2").
    pub fn from_names<I, S>(names: I) -> Variables
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        Variables {
            names: names.into_iter().collect(),
        }
    }

    /// Generic names for a given number of variables.
    ///
    /// Indices are padded with zeros so that the string order matches the numeric order.
    pub fn indexed(width: usize) -> Variables {
        let digits = width.saturating_sub(1).to_string().len();
        Variables {
            names: (0..width).map(|i| format!("x{:0>w$}", i, w = digits)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Find a variable by name if it exists.
    pub fn get_handle(&self, name: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).ok()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl VariableNamer for Variables {
    fn name(&self, uid: usize) -> Option<&str> {
        self.names.get(uid).map(String::as_str)
    }
}

impl fmt::Display for Variables {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_names() {
        let vars = Variables::from_names(vec!["x2", "x10", "x0", "x2"]);
        assert_eq!(vars.names(), &["x0", "x10", "x2"]);
        assert_eq!(vars.get_handle("x2"), Some(2));
        assert_eq!(vars.get_handle("x3"), None);
        assert_eq!(vars.name(1), Some("x10"));
        assert_eq!(vars.name(3), None);
    }

    #[test]
    fn test_indexed_names() {
        assert_eq!(Variables::indexed(3).names(), &["x0", "x1", "x2"]);
        let vars = Variables::indexed(12);
        assert_eq!(vars.name(0), Some("x00"));
        assert_eq!(vars.name(11), Some("x11"));
        // string order matches positions
        assert_eq!(Variables::from_names(vars.names().to_vec()), vars);
        assert!(Variables::indexed(0).is_empty());
    }
}
