//! Source printer
//!
//! Serializes a `Program` back to TypeScript, or to JavaScript when type
//! annotations are switched off. Layout is normalized: four-space indent,
//! one statement per line, explicit semicolons. Parentheses are emitted
//! only where operator precedence requires them.

use crate::ast::*;
use crate::lexer::QuoteStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Keep `: T` annotations on declarations, parameters and returns
    pub type_annotations: bool,
    pub indent_width: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            type_annotations: true,
            indent_width: 4,
        }
    }
}

impl PrintOptions {
    /// Options for emitting plain JavaScript
    pub fn javascript() -> Self {
        Self {
            type_annotations: false,
            ..Self::default()
        }
    }
}

pub struct Printer {
    options: PrintOptions,
    output: String,
    indent: usize,
}

impl Printer {
    pub fn new(options: PrintOptions) -> Self {
        Self {
            options,
            output: String::new(),
            indent: 0,
        }
    }

    pub fn print_program(mut self, program: &Program) -> String {
        for stmt in &program.statements {
            self.print_statement(stmt);
            self.output.push('\n');
        }
        self.output
    }

    /// Print a single expression with no surrounding context
    pub fn print_expression(mut self, expr: &Expression) -> String {
        self.expression(expr, 0);
        self.output
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_indent(&mut self) {
        let width = self.indent * self.options.indent_width;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    fn write_annotation(&mut self, annotation: Option<&str>) {
        if !self.options.type_annotations {
            return;
        }
        if let Some(ty) = annotation {
            self.write(": ");
            self.write(ty);
        }
    }

    fn print_statement(&mut self, stmt: &Statement) {
        self.write_indent();
        self.statement_inline(stmt);
    }

    /// Print a statement starting at the current column
    fn statement_inline(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::Import(import) => self.import(import),
            StatementKind::Variable(decl) => {
                self.variable_declaration(decl);
                self.write(";");
            }
            StatementKind::Function(func) => self.function(func),
            StatementKind::Export(inner) => {
                self.write("export ");
                self.statement_inline(inner);
            }
            StatementKind::Expression(expr) => {
                self.expression(expr, 0);
                self.write(";");
            }
            StatementKind::Return(value) => {
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.expression(value, 0);
                }
                self.write(";");
            }
            StatementKind::If {
                condition,
                then_stmt,
                else_stmt,
            } => {
                self.write("if (");
                self.expression(condition, 0);
                self.write(")");
                self.body(then_stmt);

                if let Some(else_stmt) = else_stmt {
                    if matches!(then_stmt.kind, StatementKind::Block(_)) {
                        self.write(" else");
                    } else {
                        self.write("\n");
                        self.write_indent();
                        self.write("else");
                    }
                    if matches!(else_stmt.kind, StatementKind::If { .. }) {
                        self.write(" ");
                        self.statement_inline(else_stmt);
                    } else {
                        self.body(else_stmt);
                    }
                }
            }
            StatementKind::While { condition, body } => {
                self.write("while (");
                self.expression(condition, 0);
                self.write(")");
                self.body(body);
            }
            StatementKind::For {
                init,
                condition,
                update,
                body,
            } => {
                self.write("for (");
                match init.as_deref().map(|s| &s.kind) {
                    Some(StatementKind::Variable(decl)) => self.variable_declaration(decl),
                    Some(StatementKind::Expression(expr)) => self.expression(expr, 0),
                    _ => {}
                }
                self.write(";");
                if let Some(condition) = condition {
                    self.write(" ");
                    self.expression(condition, 0);
                }
                self.write(";");
                if let Some(update) = update {
                    self.write(" ");
                    self.expression(update, 0);
                }
                self.write(")");
                self.body(body);
            }
            StatementKind::Block(statements) => self.block(statements),
            StatementKind::Empty => self.write(";"),
        }
    }

    /// Body of a control statement: blocks stay on the header line
    fn body(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::Block(statements) => {
                self.write(" ");
                self.block(statements);
            }
            _ => {
                self.write("\n");
                self.indent += 1;
                self.print_statement(stmt);
                self.indent -= 1;
            }
        }
    }

    fn block(&mut self, statements: &[Statement]) {
        if statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{\n");
        self.indent += 1;
        for stmt in statements {
            self.print_statement(stmt);
            self.write("\n");
        }
        self.indent -= 1;
        self.write_indent();
        self.write("}");
    }

    fn import(&mut self, import: &ImportDeclaration) {
        self.write("import ");

        let mut clauses = Vec::new();
        if let Some(default) = &import.default_binding {
            clauses.push(default.clone());
        }
        if let Some(namespace) = &import.namespace_binding {
            clauses.push(format!("* as {}", namespace));
        }
        if !import.named.is_empty() {
            let specifiers: Vec<String> = import
                .named
                .iter()
                .map(|s| {
                    if s.imported == s.local {
                        s.local.clone()
                    } else {
                        format!("{} as {}", s.imported, s.local)
                    }
                })
                .collect();
            clauses.push(format!("{{ {} }}", specifiers.join(", ")));
        }

        if !clauses.is_empty() {
            self.write(&clauses.join(", "));
            self.write(" from ");
        }
        self.write(&string_literal(&import.module, import.quote, import.raw_module.as_deref()));
        self.write(";");
    }

    fn variable_declaration(&mut self, decl: &VariableDeclaration) {
        self.write(decl.keyword.as_str());
        self.write(" ");
        for (i, declarator) in decl.declarators.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&declarator.name);
            self.write_annotation(declarator.type_annotation.as_deref());
            if let Some(init) = &declarator.initializer {
                self.write(" = ");
                self.expression(init, precedence::ASSIGNMENT);
            }
        }
    }

    fn function(&mut self, func: &FunctionDeclaration) {
        self.write("function ");
        self.write(&func.name);
        self.write("(");
        for (i, param) in func.parameters.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&param.name);
            self.write_annotation(param.type_annotation.as_deref());
        }
        self.write(")");
        self.write_annotation(func.return_type.as_deref());
        self.write(" ");
        self.block(&func.body);
    }

    /// Print `expr`, parenthesized if it binds looser than `min_precedence`
    fn expression(&mut self, expr: &Expression, min_precedence: u8) {
        let wrap = expression_precedence(expr) < min_precedence;
        if wrap {
            self.write("(");
        }
        self.expression_unwrapped(expr);
        if wrap {
            self.write(")");
        }
    }

    fn expression_unwrapped(&mut self, expr: &Expression) {
        match &expr.kind {
            ExpressionKind::NumericLiteral(raw) => self.write(raw),
            ExpressionKind::StringLiteral { value, quote, raw } => {
                self.write(&string_literal(value, *quote, raw.as_deref()));
            }
            ExpressionKind::BooleanLiteral(value) => self.write(if *value { "true" } else { "false" }),
            ExpressionKind::NullLiteral => self.write("null"),
            ExpressionKind::Identifier(name) => self.write(name),

            ExpressionKind::Binary { op, left, right } => {
                let prec = op.precedence();
                let (left_min, right_min) = if op.is_assignment() {
                    (precedence::MEMBER, precedence::ASSIGNMENT)
                } else if op.is_right_associative() {
                    // `-2 ** 2` is a syntax error, the base must be postfix or tighter
                    (precedence::POSTFIX, prec)
                } else if *op == BinaryOp::NullishCoalescing {
                    // `??` cannot mix with unparenthesized `&&` or `||`
                    (precedence::BIT_OR, precedence::BIT_OR)
                } else {
                    (prec, prec + 1)
                };
                self.expression(left, left_min);
                self.write(" ");
                self.write(op.symbol());
                self.write(" ");
                self.expression(right, right_min);
            }

            ExpressionKind::Unary { op, operand } if op.is_postfix() => {
                self.expression(operand, precedence::POSTFIX);
                self.write(op.symbol());
            }

            ExpressionKind::Unary { op, operand } => {
                self.write(op.symbol());
                if needs_space_after_prefix(*op, operand) {
                    self.write(" ");
                }
                self.expression(operand, precedence::UNARY);
            }

            ExpressionKind::Call { callee, arguments } => {
                self.expression(callee, precedence::MEMBER);
                self.arguments(arguments);
            }

            ExpressionKind::New { callee, arguments } => {
                self.write("new ");
                // Any call in the constructor chain would take over the argument list
                if contains_call(callee) {
                    self.write("(");
                    self.expression(callee, 0);
                    self.write(")");
                } else {
                    self.expression(callee, precedence::MEMBER);
                }
                self.arguments(arguments);
            }

            ExpressionKind::Member { object, property } => {
                if matches!(object.kind, ExpressionKind::NumericLiteral(_)) {
                    self.write("(");
                    self.expression_unwrapped(object);
                    self.write(")");
                } else {
                    self.expression(object, precedence::MEMBER);
                }
                self.write(".");
                self.write(property);
            }

            ExpressionKind::Index { object, index } => {
                self.expression(object, precedence::MEMBER);
                self.write("[");
                self.expression(index, 0);
                self.write("]");
            }

            ExpressionKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                self.expression(condition, precedence::NULLISH);
                self.write(" ? ");
                self.expression(then_expr, precedence::ASSIGNMENT);
                self.write(" : ");
                self.expression(else_expr, precedence::ASSIGNMENT);
            }

            ExpressionKind::Array(elements) => {
                self.write("[");
                self.expression_list(elements);
                self.write("]");
            }
        }
    }

    fn arguments(&mut self, arguments: &[Expression]) {
        self.write("(");
        self.expression_list(arguments);
        self.write(")");
    }

    fn expression_list(&mut self, expressions: &[Expression]) {
        for (i, expr) in expressions.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.expression(expr, precedence::ASSIGNMENT);
        }
    }
}

/// How tightly an expression binds when it appears as an operand
pub fn expression_precedence(expr: &Expression) -> u8 {
    match &expr.kind {
        ExpressionKind::Binary { op, .. } => op.precedence(),
        ExpressionKind::Conditional { .. } => precedence::CONDITIONAL,
        ExpressionKind::Unary { op, .. } if op.is_postfix() => precedence::POSTFIX,
        ExpressionKind::Unary { .. } => precedence::UNARY,
        ExpressionKind::Call { .. } | ExpressionKind::New { .. } => precedence::MEMBER,
        ExpressionKind::Member { .. } | ExpressionKind::Index { .. } => precedence::MEMBER,
        ExpressionKind::NumericLiteral(_)
        | ExpressionKind::StringLiteral { .. }
        | ExpressionKind::BooleanLiteral(_)
        | ExpressionKind::NullLiteral
        | ExpressionKind::Identifier(_)
        | ExpressionKind::Array(_) => precedence::PRIMARY,
    }
}

fn needs_space_after_prefix(op: UnaryOp, operand: &Expression) -> bool {
    match (op, &operand.kind) {
        (UnaryOp::Typeof, _) => true,
        (UnaryOp::Minus, ExpressionKind::Unary { op: inner, .. }) => {
            matches!(inner, UnaryOp::Minus | UnaryOp::PreDecrement)
        }
        (UnaryOp::Plus, ExpressionKind::Unary { op: inner, .. }) => {
            matches!(inner, UnaryOp::Plus | UnaryOp::PreIncrement)
        }
        _ => false,
    }
}

fn contains_call(expr: &Expression) -> bool {
    match &expr.kind {
        ExpressionKind::Call { .. } => true,
        ExpressionKind::Member { object, .. } | ExpressionKind::Index { object, .. } => {
            contains_call(object)
        }
        _ => false,
    }
}

/// Source text as written when known, otherwise `value` escaped
fn string_literal(value: &str, quote: QuoteStyle, raw: Option<&str>) -> String {
    let q = quote.as_char();
    if let Some(raw) = raw {
        return format!("{q}{raw}{q}");
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push(q);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04x}", ch as u32)),
            c if c.is_control() && (c as u32) < 0x100 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}
