//! Runtime values.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use pathq_core::Automaton;

use crate::ast::Lambda;
use crate::env::Env;

/// Set element and automaton state.
///
/// Ordered so sets print deterministically: integers, then strings, then
/// tuples.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Atom {
    Int(i64),
    Str(String),
    Tuple(Vec<Atom>),
}

impl Atom {
    pub fn pair(a: Atom, b: Atom) -> Self {
        Atom::Tuple(vec![a, b])
    }

    /// Graph vertex ids that read as integers become `Int`.
    pub fn vertex(id: &str) -> Self {
        id.parse().map_or_else(|_| Atom::Str(id.to_owned()), Atom::Int)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Int(n) => write!(f, "{n}"),
            Atom::Str(s) => write!(f, "{s:?}"),
            Atom::Tuple(items) => {
                f.write_str("(")?;
                write_list(f, items)?;
                f.write_str(")")
            }
        }
    }
}

/// A lambda together with the environment it was created in.
#[derive(Debug, Clone)]
pub struct Closure {
    pub lambda: Rc<Lambda>,
    pub env: Env,
}

#[derive(Debug, Clone)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    Set(BTreeSet<Atom>),
    /// A set element seen on its own, e.g. a lambda argument taken from
    /// `getEdges`.
    Tuple(Vec<Atom>),
    Automaton(Automaton<Atom>),
    Lambda(Closure),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
            Value::Set(_) => ValueKind::Set,
            Value::Tuple(_) => ValueKind::Tuple,
            Value::Automaton(_) => ValueKind::Automaton,
            Value::Lambda(_) => ValueKind::Lambda,
        }
    }

    /// The value as a set element, if it can be one.
    pub fn to_atom(&self) -> Option<Atom> {
        match self {
            Value::Int(n) => Some(Atom::Int(*n)),
            Value::Str(s) => Some(Atom::Str(s.clone())),
            Value::Tuple(items) => Some(Atom::Tuple(items.clone())),
            Value::Bool(_) | Value::Set(_) | Value::Automaton(_) | Value::Lambda(_) => None,
        }
    }
}

impl From<Atom> for Value {
    fn from(atom: Atom) -> Self {
        match atom {
            Atom::Int(n) => Value::Int(n),
            Atom::Str(s) => Value::Str(s),
            Atom::Tuple(items) => Value::Tuple(items),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Set(items) => write_set(f, items),
            Value::Tuple(items) => fmt::Display::fmt(&Atom::Tuple(items.clone()), f),
            Value::Automaton(fa) => write_automaton(f, fa),
            Value::Lambda(closure) => write!(f, "<lambda ({})>", closure.lambda.param),
        }
    }
}

fn write_list<'a>(f: &mut fmt::Formatter<'_>, items: impl IntoIterator<Item = &'a Atom>) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_set<'a>(f: &mut fmt::Formatter<'_>, items: impl IntoIterator<Item = &'a Atom>) -> fmt::Result {
    f.write_str("{")?;
    write_list(f, items)?;
    f.write_str("}")
}

/// Sorted, so equal automata print identically.
fn write_automaton(f: &mut fmt::Formatter<'_>, fa: &Automaton<Atom>) -> fmt::Result {
    let states: BTreeSet<&Atom> = fa.states().iter().collect();
    let start: BTreeSet<&Atom> = fa.start_states().iter().collect();
    let finals: BTreeSet<&Atom> = fa.final_states().iter().collect();
    let edges: BTreeSet<Atom> = fa
        .transitions()
        .map(|t| {
            Atom::Tuple(vec![
                t.from.clone(),
                Atom::Str(t.label.clone()),
                t.to.clone(),
            ])
        })
        .collect();

    f.write_str("automaton { states: ")?;
    write_set(f, states)?;
    f.write_str(", start: ")?;
    write_set(f, start)?;
    f.write_str(", final: ")?;
    write_set(f, finals)?;
    f.write_str(", edges: ")?;
    write_set(f, &edges)?;
    f.write_str(" }")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Str,
    Int,
    Bool,
    Set,
    Tuple,
    Automaton,
    Lambda,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Str => "string",
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::Set => "set",
            ValueKind::Tuple => "tuple",
            ValueKind::Automaton => "automaton",
            ValueKind::Lambda => "lambda",
        })
    }
}
