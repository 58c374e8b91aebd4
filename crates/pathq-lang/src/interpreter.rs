//! Tree-walking evaluator.
//!
//! Statements thread the environment explicitly: `bind` returns the
//! extended environment, `print` writes to the output sink and returns it
//! unchanged. Expressions are pure apart from `load` reading files.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use pathq_core::{Automaton, load_graph};
use pathq_engine::intersect_automata;
use rowan::TextRange;

use crate::ast::{BinaryOp, Builtin, Expr, ExprKind, Program, Stmt};
use crate::env::Env;
use crate::error::EvalError;
use crate::value::{Atom, Closure, Value};

type EvalResult<T> = std::result::Result<T, EvalError>;

/// Runs programs, printing to `out`.
pub struct Interpreter<W> {
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute every statement in order, starting from `env`.
    pub fn run(&mut self, program: &Program, env: Env) -> EvalResult<Env> {
        tracing::info!(statements = program.stmts.len(), "running script");
        program
            .stmts
            .iter()
            .try_fold(env, |env, stmt| self.exec(stmt, env))
    }

    pub fn exec(&mut self, stmt: &Stmt, env: Env) -> EvalResult<Env> {
        match stmt {
            Stmt::Bind { name, value, .. } => {
                let value = eval(value, &env)?;
                tracing::debug!(name = %name, kind = %value.kind(), "bind");
                Ok(env.bind(name.clone(), value))
            }
            Stmt::Print { value, span } => {
                let value = eval(value, &env)?;
                writeln!(self.out, "{value}").map_err(|err| EvalError::Output {
                    message: err.to_string(),
                    span: *span,
                })?;
                Ok(env)
            }
        }
    }
}

/// Evaluate an expression.
pub fn eval(expr: &Expr, env: &Env) -> EvalResult<Value> {
    match &expr.kind {
        ExprKind::Str(s) => Ok(Value::Str(s.clone())),
        ExprKind::Int(n) => Ok(Value::Int(*n)),
        ExprKind::Bool(b) => Ok(Value::Bool(*b)),
        ExprKind::Set(items) => {
            let mut set = BTreeSet::new();
            for item in items {
                let value = eval(item, env)?;
                set.insert(to_atom(&value, item.span)?);
            }
            Ok(Value::Set(set))
        }
        ExprKind::Var(name) => env
            .lookup(name)
            .cloned()
            .ok_or_else(|| EvalError::UnboundVariable {
                name: name.clone(),
                span: expr.span,
            }),
        ExprKind::Binary { op, lhs, rhs } => {
            let left = eval(lhs, env)?;
            let right = eval(rhs, env)?;
            binary(*op, left, right, expr.span)
        }
        ExprKind::Call { builtin, args } => call(*builtin, args, env, expr.span),
        ExprKind::Lambda(lambda) => Ok(Value::Lambda(Closure {
            lambda: lambda.clone(),
            env: env.clone(),
        })),
    }
}

fn mismatch(span: TextRange, message: impl Into<String>) -> EvalError {
    EvalError::TypeMismatch {
        message: message.into(),
        span,
    }
}

fn core_error(span: TextRange) -> impl FnOnce(pathq_core::Error) -> EvalError {
    move |error| EvalError::Core { error, span }
}

fn to_atom(value: &Value, span: TextRange) -> EvalResult<Atom> {
    value.to_atom().ok_or_else(|| {
        mismatch(
            span,
            format!("set elements are ints, strings or tuples, found {}", value.kind()),
        )
    })
}

fn is_automaton_like(value: &Value) -> bool {
    matches!(value, Value::Automaton(_) | Value::Str(_))
}

/// An automaton value, compiling strings as regexes.
fn to_automaton(value: Value, span: TextRange) -> EvalResult<Automaton<Atom>> {
    match value {
        Value::Automaton(fa) => Ok(fa),
        Value::Str(regex) => {
            let dfa = pathq_compiler::compile_regex(&regex)
                .map_err(|error| EvalError::Compile { error, span })?;
            Ok(dfa.map_states(|&s| Atom::Int(s as i64)))
        }
        other => Err(mismatch(
            span,
            format!("expected automaton or regex string, found {}", other.kind()),
        )),
    }
}

fn binary(op: BinaryOp, left: Value, right: Value, span: TextRange) -> EvalResult<Value> {
    let undefined = |left: &Value, right: &Value| {
        mismatch(
            span,
            format!(
                "`{}` is not defined for {} and {}",
                op.symbol(),
                left.kind(),
                right.kind()
            ),
        )
    };

    match op {
        BinaryOp::Intersect => match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a && b)),
            (Value::Set(mut a), Value::Set(b)) => {
                a.extend(b);
                Ok(Value::Set(a))
            }
            (left, right) if is_automaton_like(&left) && is_automaton_like(&right) => {
                let a = to_automaton(left, span)?;
                let b = to_automaton(right, span)?;
                let product = intersect_automata(&a, &b).map_err(core_error(span))?;
                Ok(Value::Automaton(
                    product.map_states(|(x, y)| Atom::pair(x.clone(), y.clone())),
                ))
            }
            (left, right) => Err(undefined(&left, &right)),
        },
        BinaryOp::Concat => match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a || b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            (Value::Set(a), Value::Set(b)) => Ok(Value::Set(a.intersection(&b).cloned().collect())),
            (left, right) if is_automaton_like(&left) && is_automaton_like(&right) => {
                let a = to_automaton(left, span)?;
                let b = to_automaton(right, span)?;
                Ok(Value::Automaton(
                    a.concat(&b).map_states(|&s| Atom::Int(s as i64)),
                ))
            }
            (left, right) => Err(undefined(&left, &right)),
        },
        BinaryOp::Eq | BinaryOp::Ne => {
            let equal = match (&left, &right) {
                (Value::Str(a), Value::Str(b)) => a == b,
                (Value::Int(a), Value::Int(b)) => a == b,
                (Value::Bool(a), Value::Bool(b)) => a == b,
                (Value::Set(a), Value::Set(b)) => a == b,
                (Value::Tuple(a), Value::Tuple(b)) => a == b,
                (Value::Automaton(a), Value::Automaton(b)) => a == b,
                _ => return Err(undefined(&left, &right)),
            };
            Ok(Value::Bool(equal == (op == BinaryOp::Eq)))
        }
        BinaryOp::In => match (&left, &right) {
            (element, Value::Set(set)) => {
                let atom = to_atom(element, span)?;
                Ok(Value::Bool(set.contains(&atom)))
            }
            _ => Err(undefined(&left, &right)),
        },
    }
}

fn call(builtin: Builtin, args: &[Expr], env: &Env, span: TextRange) -> EvalResult<Value> {
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(eval(arg, env)?);
    }
    let arg_span = |i: usize| args.get(i).map_or(span, |a| a.span);
    let mut values = values.into_iter();
    let mut next = || {
        values.next().ok_or_else(|| {
            mismatch(span, format!("`{}` is missing an argument", builtin.name()))
        })
    };

    match builtin {
        Builtin::Load => {
            let path = match next()? {
                Value::Str(path) => path,
                other => {
                    return Err(mismatch(
                        arg_span(0),
                        format!("`load` takes a path string, found {}", other.kind()),
                    ));
                }
            };
            load(&path, span)
        }
        Builtin::SetStart | Builtin::SetFinal | Builtin::AddStart | Builtin::AddFinal => {
            let mut fa = to_automaton(next()?, arg_span(0))?;
            let states = expect_set(next()?, arg_span(1), builtin)?;
            match builtin {
                Builtin::SetStart => fa.set_starts(states),
                Builtin::SetFinal => fa.set_finals(states),
                Builtin::AddStart => states.into_iter().for_each(|s| fa.add_start(s)),
                _ => states.into_iter().for_each(|s| fa.add_final(s)),
            }
            Ok(Value::Automaton(fa))
        }
        Builtin::GetStart => {
            let fa = to_automaton(next()?, arg_span(0))?;
            Ok(Value::Set(fa.start_states().iter().cloned().collect()))
        }
        Builtin::GetFinal => {
            let fa = to_automaton(next()?, arg_span(0))?;
            Ok(Value::Set(fa.final_states().iter().cloned().collect()))
        }
        Builtin::GetVertices => {
            let fa = to_automaton(next()?, arg_span(0))?;
            Ok(Value::Set(fa.states().iter().cloned().collect()))
        }
        Builtin::GetEdges => {
            let fa = to_automaton(next()?, arg_span(0))?;
            let edges = fa
                .transitions()
                .map(|t| {
                    Atom::Tuple(vec![
                        t.from.clone(),
                        Atom::Str(t.label.clone()),
                        t.to.clone(),
                    ])
                })
                .collect();
            Ok(Value::Set(edges))
        }
        Builtin::GetLabels => {
            let fa = to_automaton(next()?, arg_span(0))?;
            Ok(Value::Set(
                fa.alphabet().iter().cloned().map(Atom::Str).collect(),
            ))
        }
        Builtin::GetReachable => {
            let fa = to_automaton(next()?, arg_span(0))?;
            Ok(Value::Set(fa.reachable_states().into_iter().collect()))
        }
        Builtin::Map | Builtin::Filter => {
            let closure = match next()? {
                Value::Lambda(closure) => closure,
                other => {
                    return Err(mismatch(
                        arg_span(0),
                        format!("`{}` takes a lambda first, found {}", builtin.name(), other.kind()),
                    ));
                }
            };
            let set = expect_set(next()?, arg_span(1), builtin)?;
            let mut result = BTreeSet::new();
            for atom in set {
                let applied = apply(&closure, Value::from(atom.clone()))?;
                let body_span = closure.lambda.body.span;
                if builtin == Builtin::Map {
                    result.insert(to_atom(&applied, body_span)?);
                    continue;
                }
                match applied {
                    Value::Bool(true) => {
                        result.insert(atom);
                    }
                    Value::Bool(false) => {}
                    other => {
                        return Err(mismatch(
                            body_span,
                            format!("`filter` predicate must return bool, found {}", other.kind()),
                        ));
                    }
                }
            }
            Ok(Value::Set(result))
        }
    }
}

fn expect_set(value: Value, span: TextRange, builtin: Builtin) -> EvalResult<BTreeSet<Atom>> {
    match value {
        Value::Set(set) => Ok(set),
        other => Err(mismatch(
            span,
            format!("`{}` takes a set, found {}", builtin.name(), other.kind()),
        )),
    }
}

/// Evaluate the lambda body with its parameter bound over the captured
/// environment.
fn apply(closure: &Closure, argument: Value) -> EvalResult<Value> {
    let env = closure.env.bind(closure.lambda.param.clone(), argument);
    eval(&closure.lambda.body, &env)
}

fn load(path: &str, span: TextRange) -> EvalResult<Value> {
    let graph = load_graph(Path::new(path)).map_err(|err| EvalError::Io {
        message: err.to_string(),
        span,
    })?;
    tracing::debug!(
        path,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    let fa = graph.to_automaton(None, None);
    Ok(Value::Automaton(fa.map_states(|v| Atom::vertex(v))))
}
