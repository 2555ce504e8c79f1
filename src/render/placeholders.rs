use tera::ast::{Expr, ExprVal, FunctionCall, Node};

use crate::answers::AnswersMap;
use crate::error::{Result, ScaffoldError};

/// Context names Tera provides on its own.
const TERA_BUILTINS: &[&str] = &["__tera_context"];

/// Answer names a parsed template reads, in order of first appearance.
///
/// Names bound inside the template (`for` variables, `loop`, `set`, macro arguments) are
/// left out, as are names only tested with `is defined` or guarded by a `default` filter.
pub fn referenced_answers(ast: &[Node]) -> Vec<String> {
    let mut out = Vec::new();
    let mut bound: Vec<String> = TERA_BUILTINS.iter().map(|s| s.to_string()).collect();
    collect_nodes(ast, &mut bound, &mut out);
    out
}

/// Fail on the first answer `ast` reads that `answers` does not hold.
pub fn check_placeholders(ast: &[Node], answers: &AnswersMap, file: &str) -> Result<()> {
    match referenced_answers(ast)
        .into_iter()
        .find(|token| !answers.contains_key(token))
    {
        Some(token) => Err(ScaffoldError::MissingAnswer {
            token,
            file: file.to_string(),
        }),
        None => Ok(()),
    }
}

fn collect_nodes(nodes: &[Node], bound: &mut Vec<String>, out: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::VariableBlock(_, expr) => collect_expr(expr, bound, out),
            Node::Set(_, set) => {
                collect_expr(&set.value, bound, out);
                bound.push(set.key.clone());
            }
            Node::If(cond, _) => {
                for (_, expr, body) in &cond.conditions {
                    collect_expr(expr, bound, out);
                    collect_nodes(body, bound, out);
                }
                if let Some((_, body)) = &cond.otherwise {
                    collect_nodes(body, bound, out);
                }
            }
            Node::Forloop(_, forloop, _) => {
                collect_expr(&forloop.container, bound, out);

                let mut inner = bound.clone();
                inner.push("loop".to_string());
                inner.push(forloop.value.clone());
                inner.extend(forloop.key.clone());
                collect_nodes(&forloop.body, &mut inner, out);

                if let Some(body) = &forloop.empty_body {
                    collect_nodes(body, &mut bound.clone(), out);
                }
            }
            Node::FilterSection(_, section, _) => {
                collect_call(&section.filter, bound, out);
                collect_nodes(&section.body, bound, out);
            }
            Node::Block(_, block, _) => collect_nodes(&block.body, bound, out),
            Node::MacroDefinition(_, def, _) => {
                let mut inner = bound.clone();
                inner.extend(def.args.keys().cloned());
                collect_nodes(&def.body, &mut inner, out);
            }
            Node::Super
            | Node::Text(_)
            | Node::Extends(..)
            | Node::Include(..)
            | Node::ImportMacro(..)
            | Node::Raw(..)
            | Node::Break(_)
            | Node::Continue(_)
            | Node::Comment(..) => {}
        }
    }
}

fn collect_expr(expr: &Expr, bound: &[String], out: &mut Vec<String>) {
    if !expr.has_default_filter() {
        collect_val(&expr.val, bound, out);
    }
    for filter in &expr.filters {
        collect_call(filter, bound, out);
    }
}

fn collect_call(call: &FunctionCall, bound: &[String], out: &mut Vec<String>) {
    for arg in call.args.values() {
        collect_expr(arg, bound, out);
    }
}

fn collect_val(val: &ExprVal, bound: &[String], out: &mut Vec<String>) {
    match val {
        ExprVal::Ident(ident) => push_ident(ident, bound, out),
        ExprVal::Math(math) => {
            collect_expr(&math.lhs, bound, out);
            collect_expr(&math.rhs, bound, out);
        }
        ExprVal::Logic(logic) => {
            collect_expr(&logic.lhs, bound, out);
            collect_expr(&logic.rhs, bound, out);
        }
        ExprVal::Test(test) => {
            if test.name != "defined" && test.name != "undefined" {
                push_ident(&test.ident, bound, out);
            }
            for arg in &test.args {
                collect_expr(arg, bound, out);
            }
        }
        ExprVal::MacroCall(call) => {
            for arg in call.args.values() {
                collect_expr(arg, bound, out);
            }
        }
        ExprVal::FunctionCall(call) => collect_call(call, bound, out),
        ExprVal::Array(items) => {
            for item in items {
                collect_expr(item, bound, out);
            }
        }
        ExprVal::StringConcat(concat) => {
            for value in &concat.values {
                collect_val(value, bound, out);
            }
        }
        ExprVal::In(within) => {
            collect_expr(&within.lhs, bound, out);
            collect_expr(&within.rhs, bound, out);
        }
        ExprVal::String(_) | ExprVal::Int(_) | ExprVal::Float(_) | ExprVal::Bool(_) => {}
    }
}

/// `owner.name` and `items[0]` read the answer `owner` and `items`.
fn push_ident(ident: &str, bound: &[String], out: &mut Vec<String>) {
    let root = ident.split(['.', '[']).next().unwrap_or(ident);
    if root.is_empty() || bound.iter().any(|b| b == root) || out.iter().any(|o| o == root) {
        return;
    }
    out.push(root.to_string());
}
