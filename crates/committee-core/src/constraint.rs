//! Constraint identification.

use std::fmt;

/// Package under which all committee constraints are registered.
pub const CONSTRAINT_PACKAGE: &str = "committee";

/// Reference to a constraint for identification in score explanations.
///
/// # Example
///
/// ```
/// use committee_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("committee", "Veto");
/// assert_eq!(cr.full_name(), "committee/Veto");
///
/// let simple = ConstraintRef::new("", "Veto");
/// assert_eq!(simple.full_name(), "Veto");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintRef {
    /// Package containing the constraint.
    pub package: String,
    /// Name of the constraint, as shown to users.
    pub name: String,
}

impl ConstraintRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Creates a reference inside [`CONSTRAINT_PACKAGE`].
    pub fn committee(name: impl Into<String>) -> Self {
        Self::new(CONSTRAINT_PACKAGE, name)
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

impl fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_committee_package() {
        let cr = ConstraintRef::committee("Self conflict");
        assert_eq!(cr.full_name(), "committee/Self conflict");
        assert_eq!(cr.to_string(), "Self conflict");
    }

    #[test]
    fn test_empty_package() {
        let cr = ConstraintRef::new("", "Simple");
        assert_eq!(cr.full_name(), "Simple");
    }
}
