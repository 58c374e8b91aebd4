//! Regular expression syntax tree.

use std::fmt;

/// A regular expression over string symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Regex {
    /// The empty language.
    Empty,
    /// The language containing only the empty string.
    Epsilon,
    Symbol(String),
    Concat(Box<Regex>, Box<Regex>),
    Union(Box<Regex>, Box<Regex>),
    Star(Box<Regex>),
}

impl Regex {
    pub fn symbol(name: impl Into<String>) -> Self {
        Regex::Symbol(name.into())
    }

    pub fn concat(self, other: Regex) -> Self {
        Regex::Concat(Box::new(self), Box::new(other))
    }

    pub fn union(self, other: Regex) -> Self {
        Regex::Union(Box::new(self), Box::new(other))
    }

    pub fn star(self) -> Self {
        Regex::Star(Box::new(self))
    }

    /// Concatenation of a sequence; the empty sequence is ε.
    pub fn sequence(items: impl IntoIterator<Item = Regex>) -> Self {
        items
            .into_iter()
            .reduce(Regex::concat)
            .unwrap_or(Regex::Epsilon)
    }

    /// Union of alternatives; no alternatives is the empty language.
    pub fn alternatives(items: impl IntoIterator<Item = Regex>) -> Self {
        items
            .into_iter()
            .reduce(Regex::union)
            .unwrap_or(Regex::Empty)
    }

    /// Symbols occurring anywhere in the expression, in first-seen order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Regex::Empty | Regex::Epsilon => {}
            Regex::Symbol(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Regex::Concat(a, b) | Regex::Union(a, b) => {
                a.collect_symbols(out);
                b.collect_symbols(out);
            }
            Regex::Star(inner) => inner.collect_symbols(out),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Regex::Union(..) => 0,
            Regex::Concat(..) => 1,
            Regex::Star(..) => 2,
            Regex::Empty | Regex::Epsilon | Regex::Symbol(_) => 3,
        }
    }

    fn fmt_child(&self, child: &Regex, min: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if child.precedence() < min {
            write!(f, "({child})")
        } else {
            write!(f, "{child}")
        }
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regex::Empty => Ok(()),
            Regex::Epsilon => f.write_str("$"),
            Regex::Symbol(name) => f.write_str(name),
            Regex::Concat(a, b) => {
                self.fmt_child(a, 1, f)?;
                f.write_str(" ")?;
                self.fmt_child(b, 2, f)
            }
            Regex::Union(a, b) => {
                self.fmt_child(a, 0, f)?;
                f.write_str(" | ")?;
                self.fmt_child(b, 1, f)
            }
            Regex::Star(inner) => {
                self.fmt_child(inner, 3, f)?;
                f.write_str("*")
            }
        }
    }
}
