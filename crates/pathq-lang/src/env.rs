//! Persistent variable environment.
//!
//! Each binding is a frame pointing at its parent, so extending an
//! environment never disturbs the one it was built from. Closures keep the
//! environment they were created in alive by sharing frames.

use std::fmt;
use std::rc::Rc;

use crate::value::Value;

#[derive(Clone, Default)]
pub struct Env {
    head: Option<Rc<Frame>>,
}

struct Frame {
    name: String,
    value: Value,
    parent: Env,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    /// A child environment where `name` is bound to `value`.
    ///
    /// Shadows any outer binding of the same name.
    pub fn bind(&self, name: impl Into<String>, value: Value) -> Env {
        Env {
            head: Some(Rc::new(Frame {
                name: name.into(),
                value,
                parent: self.clone(),
            })),
        }
    }

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let mut current = self.head.as_deref();
        while let Some(frame) = current {
            if frame.name == name {
                return Some(&frame.value);
            }
            current = frame.parent.head.as_deref();
        }
        None
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Visible names, innermost first, shadowed ones skipped.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let mut current = self.head.as_deref();
        while let Some(frame) = current {
            if !names.contains(&frame.name.as_str()) {
                names.push(&frame.name);
            }
            current = frame.parent.head.as_deref();
        }
        names
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
