//! Reduction of arbitrary context-free grammars to weak Chomsky normal form.
//!
//! Passes run in order:
//! 1. unit productions `A -> B` are replaced by the non-unit bodies of `B`
//! 2. non-generating symbols, then unreachable ones, are removed
//! 3. terminals in bodies of length two or more are lifted into fresh variables
//! 4. long bodies are split into chains of binary rules
//!
//! ε-productions survive untouched, which is what separates weak CNF from
//! strict CNF. Fresh variable names contain `#`, which the grammar lexer
//! never produces, and are additionally checked against every existing name.

use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use pathq_core::{Grammar, GrammarSymbol, Production, WeakCnf};

use crate::Result;

/// Normalize `grammar` to weak CNF.
///
/// The language generated from the start symbol is preserved. A grammar
/// whose start symbol generates nothing normalizes to a rule-less `WeakCnf`.
pub fn to_weak_cnf(grammar: &Grammar) -> Result<WeakCnf> {
    let mut names = FreshNames::new(grammar);

    let productions = eliminate_units(grammar.productions());
    let productions = remove_useless(grammar.start(), productions);
    let productions = lift_terminals(productions, &mut names);
    let productions = binarize(productions, &mut names);

    let normalized = Grammar::with_productions(grammar.start(), productions.into_iter().collect());
    let cnf = WeakCnf::from_grammar(&normalized)?;
    tracing::debug!(
        input = grammar.productions().len(),
        rules = cnf.rule_count(),
        variables = cnf.variable_count(),
        "normalized grammar to weak CNF"
    );
    Ok(cnf)
}

struct FreshNames {
    taken: HashSet<String>,
}

impl FreshNames {
    fn new(grammar: &Grammar) -> Self {
        let mut taken: HashSet<String> = grammar.variables().into_iter().map(str::to_owned).collect();
        taken.extend(grammar.terminals().into_iter().map(str::to_owned));
        taken.insert(grammar.start().to_owned());
        Self { taken }
    }

    fn fresh(&mut self, base: String) -> String {
        let mut name = base.clone();
        let mut suffix = 0;
        while self.taken.contains(&name) {
            suffix += 1;
            name = format!("{base}'{suffix}");
        }
        self.taken.insert(name.clone());
        name
    }
}

fn variables_in_order(productions: &[Production]) -> IndexSet<&str> {
    let mut variables = IndexSet::new();
    for p in productions {
        variables.insert(p.head.as_str());
        for symbol in &p.body {
            if let GrammarSymbol::Variable(name) = symbol {
                variables.insert(name.as_str());
            }
        }
    }
    variables
}

fn eliminate_units(productions: &[Production]) -> IndexSet<Production> {
    let mut unit_successors: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut bodies: IndexMap<&str, Vec<&Production>> = IndexMap::new();
    for p in productions {
        match p.body.as_slice() {
            [GrammarSymbol::Variable(target)] => {
                unit_successors.entry(&p.head).or_default().push(target)
            }
            _ => bodies.entry(&p.head).or_default().push(p),
        }
    }

    let mut result = IndexSet::new();
    for variable in variables_in_order(productions) {
        // Every B with variable =>* B through unit productions, itself included.
        let mut reached = IndexSet::new();
        let mut stack = vec![variable];
        while let Some(current) = stack.pop() {
            if !reached.insert(current) {
                continue;
            }
            if let Some(next) = unit_successors.get(current) {
                stack.extend(next.iter().copied());
            }
        }
        for target in reached {
            for p in bodies.get(target).into_iter().flatten() {
                result.insert(Production::new(variable, p.body.clone()));
            }
        }
    }
    result
}

fn remove_useless(start: &str, productions: IndexSet<Production>) -> IndexSet<Production> {
    let mut generating: HashSet<&str> = HashSet::new();
    loop {
        let before = generating.len();
        for p in &productions {
            let all_generate = p.body.iter().all(|symbol| match symbol {
                GrammarSymbol::Terminal(_) => true,
                GrammarSymbol::Variable(name) => generating.contains(name.as_str()),
            });
            if all_generate {
                generating.insert(&p.head);
            }
        }
        if generating.len() == before {
            break;
        }
    }

    let generating_only: Vec<&Production> = productions
        .iter()
        .filter(|p| {
            generating.contains(p.head.as_str())
                && p.body.iter().all(|symbol| match symbol {
                    GrammarSymbol::Terminal(_) => true,
                    GrammarSymbol::Variable(name) => generating.contains(name.as_str()),
                })
        })
        .collect();

    let mut reachable: HashSet<&str> = HashSet::new();
    let mut stack = vec![start];
    while let Some(variable) = stack.pop() {
        if !reachable.insert(variable) {
            continue;
        }
        for p in generating_only.iter().filter(|p| p.head == variable) {
            for symbol in &p.body {
                if let GrammarSymbol::Variable(name) = symbol {
                    stack.push(name);
                }
            }
        }
    }

    generating_only
        .into_iter()
        .filter(|p| reachable.contains(p.head.as_str()))
        .cloned()
        .collect()
}

fn lift_terminals(productions: IndexSet<Production>, names: &mut FreshNames) -> IndexSet<Production> {
    let mut lifted: IndexMap<String, String> = IndexMap::new();
    let mut result = IndexSet::new();
    for p in productions {
        if p.body.len() < 2 {
            result.insert(p);
            continue;
        }
        let body = p
            .body
            .into_iter()
            .map(|symbol| match symbol {
                GrammarSymbol::Terminal(terminal) => {
                    let variable = lifted
                        .entry(terminal.clone())
                        .or_insert_with(|| names.fresh(format!("{terminal}#T")));
                    GrammarSymbol::Variable(variable.clone())
                }
                variable => variable,
            })
            .collect();
        result.insert(Production::new(p.head, body));
    }
    for (terminal, variable) in lifted {
        result.insert(Production::new(variable, vec![GrammarSymbol::Terminal(terminal)]));
    }
    result
}

fn binarize(productions: IndexSet<Production>, names: &mut FreshNames) -> IndexSet<Production> {
    let mut result = IndexSet::new();
    for p in productions {
        if p.body.len() <= 2 {
            result.insert(p);
            continue;
        }
        let mut head = p.head.clone();
        let mut rest = p.body.as_slice();
        let mut link = 0;
        while rest.len() > 2 {
            link += 1;
            let next = names.fresh(format!("{}#{link}", p.head));
            result.insert(Production::new(
                head,
                vec![rest[0].clone(), GrammarSymbol::Variable(next.clone())],
            ));
            head = next;
            rest = &rest[1..];
        }
        result.insert(Production::new(head, rest.to_vec()));
    }
    result
}
