//! Context-free grammars and their weak Chomsky normal form.
//!
//! `Grammar` holds productions as written. `WeakCnf` is the restricted form
//! the CFPQ solvers consume: every rule is `A -> ε`, `A -> t` or `A -> B C`,
//! with variables interned to dense `VarId`s.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexSet;

use crate::{Error, Result};

/// Default start symbol.
pub const DEFAULT_START: &str = "S";

/// Symbol occurring in a production body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GrammarSymbol {
    Variable(String),
    Terminal(String),
}

impl GrammarSymbol {
    pub fn name(&self) -> &str {
        match self {
            GrammarSymbol::Variable(name) | GrammarSymbol::Terminal(name) => name,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, GrammarSymbol::Variable(_))
    }
}

/// `head -> body`; an empty body is ε.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Production {
    pub head: String,
    pub body: Vec<GrammarSymbol>,
}

impl Production {
    pub fn new(head: impl Into<String>, body: Vec<GrammarSymbol>) -> Self {
        Self {
            head: head.into(),
            body,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }

    /// `A -> B` with a single variable body.
    pub fn is_unit(&self) -> bool {
        matches!(self.body.as_slice(), [GrammarSymbol::Variable(_)])
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.head, BodyDisplay(&self.body))
    }
}

struct BodyDisplay<'a>(&'a [GrammarSymbol]);

impl fmt::Display for BodyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("epsilon");
        }
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(symbol.name())?;
        }
        Ok(())
    }
}

/// A context-free grammar with an explicit start symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start: String,
    productions: Vec<Production>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new(DEFAULT_START)
    }
}

impl Grammar {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            productions: Vec::new(),
        }
    }

    pub fn with_productions(start: impl Into<String>, productions: Vec<Production>) -> Self {
        Self {
            start: start.into(),
            productions,
        }
    }

    /// Add a production unless an identical one exists.
    pub fn add_production(&mut self, production: Production) {
        if !self.productions.contains(&production) {
            self.productions.push(production);
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn set_start(&mut self, start: impl Into<String>) {
        self.start = start.into();
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Heads plus every variable occurring in a body.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut variables = BTreeSet::new();
        for p in &self.productions {
            variables.insert(p.head.as_str());
            for symbol in &p.body {
                if let GrammarSymbol::Variable(name) = symbol {
                    variables.insert(name.as_str());
                }
            }
        }
        variables
    }

    pub fn terminals(&self) -> BTreeSet<&str> {
        self.productions
            .iter()
            .flat_map(|p| &p.body)
            .filter_map(|symbol| match symbol {
                GrammarSymbol::Terminal(name) => Some(name.as_str()),
                GrammarSymbol::Variable(_) => None,
            })
            .collect()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.productions {
            writeln!(f, "{p}")?;
        }
        Ok(())
    }
}

/// Interned grammar variable.
///
/// Ids are dense, assigned in first-seen order by the owning `WeakCnf`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct VarId(u32);

impl VarId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Use only with ids obtained from the same grammar.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// A weak-CNF rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    /// `A -> ε`
    Epsilon { head: VarId },
    /// `A -> t`
    Terminal { head: VarId, terminal: String },
    /// `A -> B C`
    Binary { head: VarId, left: VarId, right: VarId },
}

impl Rule {
    pub fn head(&self) -> VarId {
        match self {
            Rule::Epsilon { head } | Rule::Terminal { head, .. } | Rule::Binary { head, .. } => {
                *head
            }
        }
    }
}

/// Grammar in weak Chomsky normal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeakCnf {
    start: String,
    variables: IndexSet<String>,
    terminals: BTreeSet<String>,
    rules: IndexSet<Rule>,
}

impl WeakCnf {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            variables: IndexSet::new(),
            terminals: BTreeSet::new(),
            rules: IndexSet::new(),
        }
    }

    /// Check that every production already has weak-CNF shape and intern it.
    ///
    /// Fails with `MalformedGrammar` naming the first offending production.
    pub fn from_grammar(grammar: &Grammar) -> Result<Self> {
        let mut cnf = Self::new(grammar.start());
        for p in grammar.productions() {
            match p.body.as_slice() {
                [] => cnf.add_epsilon(&p.head),
                [GrammarSymbol::Terminal(t)] => cnf.add_terminal(&p.head, t),
                [GrammarSymbol::Variable(l), GrammarSymbol::Variable(r)] => {
                    cnf.add_binary(&p.head, l, r)
                }
                body => {
                    return Err(Error::MalformedGrammar {
                        head: p.head.clone(),
                        body: BodyDisplay(body).to_string(),
                    });
                }
            }
        }
        Ok(cnf)
    }

    /// Intern a variable name.
    pub fn intern(&mut self, name: &str) -> VarId {
        if let Some(index) = self.variables.get_index_of(name) {
            return VarId(index as u32);
        }
        let (index, _) = self.variables.insert_full(name.to_owned());
        VarId(index as u32)
    }

    pub fn add_epsilon(&mut self, head: &str) {
        let head = self.intern(head);
        self.rules.insert(Rule::Epsilon { head });
    }

    pub fn add_terminal(&mut self, head: &str, terminal: &str) {
        let head = self.intern(head);
        self.terminals.insert(terminal.to_owned());
        self.rules.insert(Rule::Terminal {
            head,
            terminal: terminal.to_owned(),
        });
    }

    pub fn add_binary(&mut self, head: &str, left: &str, right: &str) {
        let head = self.intern(head);
        let left = self.intern(left);
        let right = self.intern(right);
        self.rules.insert(Rule::Binary { head, left, right });
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// Id of the start symbol, if it occurs in any rule.
    pub fn start_id(&self) -> Option<VarId> {
        self.var_id(&self.start)
    }

    pub fn var_id(&self, name: &str) -> Option<VarId> {
        self.variables
            .get_index_of(name)
            .map(|index| VarId(index as u32))
    }

    /// Resolve a variable id back to its name.
    ///
    /// # Panics
    /// Panics if the id was not created by this grammar.
    pub fn name(&self, id: VarId) -> &str {
        &self.variables[id.index()]
    }

    pub fn try_name(&self, id: VarId) -> Option<&str> {
        self.variables.get_index(id.index()).map(String::as_str)
    }

    pub fn variables(&self) -> impl Iterator<Item = (VarId, &str)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, name)| (VarId(i as u32), name.as_str()))
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn terminals(&self) -> &BTreeSet<String> {
        &self.terminals
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Back to a plain grammar with named symbols.
    pub fn to_grammar(&self) -> Grammar {
        let mut grammar = Grammar::new(self.start.clone());
        for rule in &self.rules {
            let head = self.name(rule.head()).to_owned();
            let body = match rule {
                Rule::Epsilon { .. } => vec![],
                Rule::Terminal { terminal, .. } => vec![GrammarSymbol::Terminal(terminal.clone())],
                Rule::Binary { left, right, .. } => vec![
                    GrammarSymbol::Variable(self.name(*left).to_owned()),
                    GrammarSymbol::Variable(self.name(*right).to_owned()),
                ],
            };
            grammar.add_production(Production::new(head, body));
        }
        grammar
    }
}

impl fmt::Display for WeakCnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_grammar(), f)
    }
}
