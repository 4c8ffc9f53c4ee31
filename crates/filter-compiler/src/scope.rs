//! Lexical scope for predicate compilation: the stack of bound lambda
//! parameters, outermost first.

/// Classification of a path's root identifier against the scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// Rooted at the outermost bound name: a field on the queried record
    Param,
    /// Rooted at an inner `some()` binding: a field on the enclosing
    /// lambda's own element
    Local,
    /// Unmatched root: an externally captured reference
    Captured,
}

/// Ordered bound names, outermost first. Entering a nested `some()`
/// callback creates a new frame; frames are never mutated in place, so
/// sibling recursive calls cannot leak bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    names: Vec<String>,
}

impl Scope {
    pub fn root(name: &str) -> Self {
        Scope {
            names: vec![name.to_string()],
        }
    }

    /// Copy-and-append a new innermost binding
    pub fn child(&self, name: &str) -> Self {
        let mut names = self.names.clone();
        names.push(name.to_string());
        Scope { names }
    }

    pub fn classify(&self, root: &str) -> RootKind {
        if self.names.first().map(String::as_str) == Some(root) {
            RootKind::Param
        } else if self.names.iter().skip(1).any(|name| name == root) {
            RootKind::Local
        } else {
            RootKind::Captured
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_roots() {
        let scope = Scope::root("a").child("b");

        assert_eq!(scope.classify("a"), RootKind::Param);
        assert_eq!(scope.classify("b"), RootKind::Local);
        assert_eq!(scope.classify("ids"), RootKind::Captured);
    }

    #[test]
    fn test_child_does_not_leak_into_siblings() {
        let outer = Scope::root("a");
        let first = outer.child("b");
        let second = outer.child("c");

        assert_eq!(first.classify("c"), RootKind::Captured);
        assert_eq!(second.classify("b"), RootKind::Captured);
        assert_eq!(outer.classify("b"), RootKind::Captured);
    }

    #[test]
    fn test_shadowed_outer_parameter_stays_param() {
        let scope = Scope::root("a").child("a");
        assert_eq!(scope.classify("a"), RootKind::Param);
    }
}
