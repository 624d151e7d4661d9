//! Line-oriented host console over a [`Runtime`].
//!
//! Each line is one command followed by literal arguments, e.g.
//! `set x 42`, `add $x 8`, `define greet name = hello`, `call greet "Ada"`.

use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, LemonError, Result},
    operators::BinaryOp,
    runtime::Runtime,
    stdlib,
    value::Value,
};

const COMMANDS: &str =
    "set, const, get, push, pop, depth, add, sub, mul, div, if, define, call, funcs, doc, log";

pub struct Repl {
    runtime: Runtime,
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

impl Repl {
    pub fn new() -> Self {
        Self::with_runtime(Runtime::new())
    }

    pub fn with_runtime(runtime: Runtime) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().map_err(|err| {
            LemonError::from(std::io::Error::new(std::io::ErrorKind::Other, err))
        })?;
        loop {
            match editor.readline("lemon> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == ":quit" || trimmed == ":exit" {
                        break;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(trimmed).ok();
                    match self.execute_line(trimmed) {
                        Ok(Some(value)) => println!("{value}"),
                        Ok(None) => {}
                        Err(err) => stdlib::error(&err.to_string()),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    return Err(LemonError::from(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        err,
                    )));
                }
            }
        }
        Ok(())
    }

    /// Runs every line of `source`, handing each produced value to `emit` as
    /// soon as its line completes. Stops at the first failing line; the error
    /// is wrapped in `LemonError::Script` with its 1-based line number.
    pub fn execute_script(&mut self, source: &str, mut emit: impl FnMut(&Value)) -> Result<()> {
        for (idx, line) in source.lines().enumerate() {
            match self.execute_line(line) {
                Ok(Some(value)) => emit(&value),
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(line = idx + 1, "script aborted");
                    return Err(LemonError::Script {
                        line: idx + 1,
                        source: Box::new(err),
                    });
                }
            }
        }
        Ok(())
    }

    /// Blank lines and `#` comments produce `None`.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<Value>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        let tokens = tokenize(trimmed)?;
        let Some((command, args)) = tokens.split_first() else {
            return Ok(None);
        };
        let command = command.text();
        match command {
            "set" | "const" => {
                let (name, value, type_tag) = match args {
                    [name, value] => (name, self.literal(value)?, None),
                    [name, value, type_tag] => {
                        (name, self.literal(value)?, Some(type_tag.text()))
                    }
                    _ => return Err(usage(command, "NAME VALUE [TYPE]")),
                };
                let type_tag = type_tag.unwrap_or(value.type_name());
                let is_const = command == "const";
                let accepted = self
                    .runtime
                    .set_variable(name.text(), value, type_tag, is_const);
                Ok(Some(Value::bool(accepted)))
            }
            "get" => match args {
                [name] => self.lookup(name.text()).map(Some),
                _ => Err(usage(command, "NAME")),
            },
            "push" => {
                self.runtime.push_scope();
                Ok(None)
            }
            "pop" => {
                self.runtime.pop_scope();
                Ok(None)
            }
            "depth" => Ok(Some(Value::int(self.runtime.scope_depth() as i64))),
            "add" | "sub" | "mul" | "div" => {
                let op = match command {
                    "add" => BinaryOp::Add,
                    "sub" => BinaryOp::Sub,
                    "mul" => BinaryOp::Mul,
                    _ => BinaryOp::Div,
                };
                match args {
                    [left, right] => {
                        let left = self.literal(left)?;
                        let right = self.literal(right)?;
                        self.runtime.binary(op, &left, &right).map(Some)
                    }
                    _ => Err(usage(command, "LEFT RIGHT")),
                }
            }
            "if" => {
                let (condition, then_value, else_value) = match args {
                    [condition, then_value] => {
                        (self.literal(condition)?, self.literal(then_value)?, None)
                    }
                    [condition, then_value, else_value] => (
                        self.literal(condition)?,
                        self.literal(then_value)?,
                        Some(self.literal(else_value)?),
                    ),
                    _ => return Err(usage(command, "CONDITION THEN [ELSE]")),
                };
                let mut then_branch =
                    |_: &mut Runtime| -> Result<Value> { Ok(then_value.clone()) };
                let result = match else_value {
                    Some(else_value) => {
                        let mut else_branch =
                            |_: &mut Runtime| -> Result<Value> { Ok(else_value.clone()) };
                        self.runtime.execute_if(
                            &condition,
                            &mut then_branch,
                            Some(&mut else_branch),
                        )?
                    }
                    None => self.runtime.execute_if(&condition, &mut then_branch, None)?,
                };
                Ok(Some(result))
            }
            "define" => {
                let Some(split) = args.iter().position(|token| token.is_bare("=")) else {
                    return Err(usage(command, "NAME [PARAMS...] = BODY"));
                };
                let (signature, body) = (&args[..split], &args[split + 1..]);
                let Some((name, params)) = signature.split_first() else {
                    return Err(usage(command, "NAME [PARAMS...] = BODY"));
                };
                let params: Vec<&str> = params.iter().map(Token::text).collect();
                let body: Vec<&str> = body.iter().map(Token::text).collect();
                stdlib::define_function(
                    &mut self.runtime,
                    name.text(),
                    &params,
                    "string",
                    "",
                    &body.join(" "),
                );
                Ok(None)
            }
            "call" => {
                let Some((name, rest)) = args.split_first() else {
                    return Err(usage(command, "NAME [ARGS...]"));
                };
                let values = rest
                    .iter()
                    .map(|token| self.literal(token))
                    .collect::<Result<Vec<_>>>()?;
                self.runtime.execute_function(name.text(), &values).map(Some)
            }
            "funcs" => {
                let names: Vec<&str> = self.runtime.registry().names().collect();
                Ok(Some(Value::string(names.join(" "))))
            }
            "doc" => match args {
                [name] => {
                    let metadata = self
                        .runtime
                        .get_metadata(name.text())
                        .ok_or_else(|| LemonError::FunctionNotFound(name.text().to_string()))?;
                    let mut text = format!(
                        "{}({})",
                        metadata.name,
                        metadata.parameter_names.join(", ")
                    );
                    if !metadata.return_type.is_empty() {
                        text.push_str(&format!(" -> {}", metadata.return_type));
                    }
                    if !metadata.documentation.is_empty() {
                        text.push_str(&format!(": {}", metadata.documentation));
                    }
                    Ok(Some(Value::string(text)))
                }
                _ => Err(usage(command, "NAME")),
            },
            "log" => {
                let words: Vec<&str> = args.iter().map(Token::text).collect();
                stdlib::log(&words.join(" "));
                Ok(None)
            }
            other => Err(Diagnostic::new(
                DiagnosticKind::Console,
                format!("unknown command `{other}`"),
            )
            .with_note(format!("available commands: {COMMANDS}"))
            .into()),
        }
    }

    fn lookup(&self, name: &str) -> Result<Value> {
        self.runtime.get_variable(name).ok_or_else(|| {
            Diagnostic::new(
                DiagnosticKind::Console,
                format!("undefined variable `{name}`"),
            )
            .into()
        })
    }

    /// `true`/`false`, integers, decimals and `$name` lookups; anything else
    /// (and any quoted token) is a string, including `nan` and `inf`.
    fn literal(&self, token: &Token) -> Result<Value> {
        let text = match token {
            Token::Quoted(text) => return Ok(Value::string(text.clone())),
            Token::Bare(text) => text.as_str(),
        };
        if let Some(name) = text.strip_prefix('$') {
            return self.lookup(name);
        }
        Ok(match text {
            "true" => Value::bool(true),
            "false" => Value::bool(false),
            _ => {
                if let Ok(n) = text.parse::<i64>() {
                    Value::int(n)
                } else if let Some(f) = parse_decimal(text) {
                    Value::float(f)
                } else {
                    Value::string(text)
                }
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Bare(String),
    Quoted(String),
}

impl Token {
    fn text(&self) -> &str {
        match self {
            Token::Bare(text) | Token::Quoted(text) => text,
        }
    }

    fn is_bare(&self, expected: &str) -> bool {
        matches!(self, Token::Bare(text) if text == expected)
    }
}

/// Splits on whitespace; double quotes group a token that may hold spaces.
fn tokenize(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        if ch == '"' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            while let Some(ch) = chars.next() {
                match ch {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some(other) => text.push(other),
                        None => break,
                    },
                    other => text.push(other),
                }
            }
            if !closed {
                return Err(Diagnostic::new(
                    DiagnosticKind::Console,
                    "unterminated string literal",
                )
                .into());
            }
            tokens.push(Token::Quoted(text));
        } else {
            let mut text = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                text.push(ch);
                chars.next();
            }
            tokens.push(Token::Bare(text));
        }
    }
    Ok(tokens)
}

/// Decimal text only: digits with an optional sign, point and exponent.
fn parse_decimal(text: &str) -> Option<f64> {
    let numeric = text.chars().any(|ch| ch.is_ascii_digit())
        && text
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '+' | '-' | 'e' | 'E'));
    if numeric {
        text.parse().ok()
    } else {
        None
    }
}

fn usage(command: &str, arguments: &str) -> LemonError {
    Diagnostic::new(
        DiagnosticKind::Console,
        format!("usage: {command} {arguments}"),
    )
    .into()
}
