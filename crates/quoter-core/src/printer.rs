//! Renders a call expression as source text of the generated program.

use quoter_syntax::literal::{render_char, render_string};

use crate::config::QuoterOptions;
use crate::expr::{Array, Call, Expr, Invocation, Literal, Member};

const INDENT: &str = "    ";
const FACTORY_CLASS: &str = "SyntaxFactory";

pub struct Printer<'o> {
    options: &'o QuoterOptions,
}

impl<'o> Printer<'o> {
    pub fn new(options: &'o QuoterOptions) -> Self {
        Self { options }
    }

    pub fn print(&self, expr: &Expr) -> String {
        let mut out = String::new();
        self.expr(expr, 0, &mut out);
        out
    }

    fn expr(&self, expr: &Expr, depth: usize, out: &mut String) {
        match expr {
            Expr::Literal(literal) => out.push_str(&print_literal(literal)),
            Expr::Member(Member::Kind(kind)) => {
                out.push_str("SyntaxKind.");
                out.push_str(kind.name());
            }
            Expr::Member(Member::Constant(name)) => {
                self.prefix(out);
                out.push_str(name);
            }
            Expr::Call(call) => self.call(call, depth, out),
            Expr::Array(array) => self.array(array, depth, out),
        }
    }

    fn call(&self, call: &Call, depth: usize, out: &mut String) {
        self.prefix(out);
        self.invocation(&call.head, depth, out);
        for method in &call.chain {
            out.push('\n');
            indent(depth, out);
            out.push('.');
            self.invocation(method, depth, out);
        }
    }

    fn invocation(&self, invocation: &Invocation, depth: usize, out: &mut String) {
        out.push_str(&invocation.name);
        if let Some(ty) = invocation.type_argument {
            out.push('<');
            out.push_str(&ty.type_name());
            out.push('>');
        }
        self.arguments(&invocation.args, ('(', ')'), depth, out);
    }

    fn array(&self, array: &Array, depth: usize, out: &mut String) {
        out.push_str("new ");
        out.push_str(&array.element.type_name());
        out.push_str("[]");
        self.arguments(&array.items, ('{', '}'), depth, out);
    }

    /// A lone literal or kind stays on the line; anything else gets one line
    /// per argument, one level deeper.
    fn arguments(&self, args: &[Expr], (open, close): (char, char), depth: usize, out: &mut String) {
        match args {
            [] => {
                out.push(open);
                out.push(close);
            }
            [arg] if arg.is_inline() => {
                out.push(open);
                self.expr(arg, depth, out);
                out.push(close);
            }
            _ => {
                if self.options.open_parenthesis_on_new_line {
                    out.push('\n');
                    indent(depth, out);
                }
                out.push(open);
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    out.push('\n');
                    indent(depth + 1, out);
                    self.expr(arg, depth + 1, out);
                }
                if self.options.closing_parenthesis_on_new_line {
                    out.push('\n');
                    indent(depth, out);
                }
                out.push(close);
            }
        }
    }

    fn prefix(&self, out: &mut String) {
        if !self.options.shorten_with_static_import {
            out.push_str(FACTORY_CLASS);
            out.push('.');
        }
    }
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn print_literal(literal: &Literal) -> String {
    match literal {
        Literal::Str(text) => render_string(text),
        Literal::LineSeparator => "Environment.NewLine".to_string(),
        Literal::Number(text) => print_number(text),
        Literal::Char(value) => render_char(*value),
        Literal::Bool(value) => value.to_string(),
        Literal::Null => "null".to_string(),
        Literal::Default(ty) => format!("default({ty})"),
    }
}

/// Non-finite doubles have no literal form in the generated program.
fn print_number(text: &str) -> String {
    match text.parse::<f64>() {
        Ok(value) if value.is_nan() => "double.NaN".to_string(),
        Ok(value) if value == f64::INFINITY => "double.PositiveInfinity".to_string(),
        Ok(value) if value == f64::NEG_INFINITY => "double.NegativeInfinity".to_string(),
        _ => text.to_string(),
    }
}
