//! Turtle serialization boundary.
//!
//! Reads and writes the Turtle subset this system produces: `@prefix`
//! directives, prefixed names, absolute `<IRI>`s, `a` for `rdf:type`,
//! string / boolean / integer literals, and `;` / `,` grouping. The core
//! never calls into this module; loading and saving graphs is owned by the
//! command surface.

use super::ns::{self, Namespace};
use super::store::Graph;
use super::term::{Literal, Term, Triple, Uri};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Serialize a graph, grouping triples by subject in store order.
pub fn to_turtle(graph: &Graph) -> String {
    let mut out = String::new();
    for namespace in ns::all() {
        let _ = writeln!(out, "@prefix {}: <{}> .", namespace.prefix(), namespace.base());
    }
    out.push('\n');

    let mut by_subject: IndexMap<&Uri, Vec<&Triple>> = IndexMap::new();
    for triple in graph.iter() {
        by_subject.entry(&triple.subject).or_default().push(triple);
    }

    for (subject, triples) in by_subject {
        let _ = write!(out, "{}", format_uri(subject));
        for (i, triple) in triples.iter().enumerate() {
            let verb = if triple.predicate.as_str() == RDF_TYPE {
                "a".to_string()
            } else {
                format_uri(&triple.predicate)
            };
            let object = format_term(&triple.object);
            if i == 0 {
                let _ = write!(out, " {verb} {object}");
            } else {
                let _ = write!(out, " ;\n    {verb} {object}");
            }
        }
        out.push_str(" .\n");
    }
    out
}

pub fn write_file(graph: &Graph, path: &Path) -> Result<()> {
    fs::write(path, to_turtle(graph))?;
    Ok(())
}

fn format_uri(uri: &Uri) -> String {
    for namespace in ns::all() {
        if let Some(local) = namespace.strip(uri) {
            if is_pname_local(local) {
                return format!("{}:{}", namespace.prefix(), local);
            }
        }
    }
    format!("<{}>", uri)
}

fn format_term(term: &Term) -> String {
    match term {
        Term::Uri(u) => format_uri(u),
        Term::Literal(Literal::Str(s)) => format!("\"{}\"", escape_string(s)),
        Term::Literal(Literal::Bool(b)) => b.to_string(),
        Term::Literal(Literal::Int(i)) => i.to_string(),
    }
}

fn is_pname_local(local: &str) -> bool {
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Parse Turtle text into a graph. `source` names the input in errors.
pub fn parse(text: &str, source: &str) -> Result<Graph> {
    Parser::new(text, source).parse()
}

pub fn read_file(path: &Path) -> Result<Graph> {
    let text = fs::read_to_string(path)?;
    parse(&text, &path.display().to_string())
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    IriRef(String),
    Pname { prefix: String, local: String },
    Str(String),
    Int(i64),
    Bool(bool),
    A,
    PrefixDecl,
    Dot,
    Semicolon,
    Comma,
    DoubleCaret,
}

struct Parser<'a> {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    source: &'a str,
    prefixes: HashMap<String, String>,
}

impl<'a> Parser<'a> {
    fn new(text: &str, source: &'a str) -> Self {
        let tokens = lex(text);
        // Known namespaces are pre-bound; @prefix directives override them.
        let prefixes = ns::all()
            .iter()
            .map(|n: &Namespace| (n.prefix().to_string(), n.base().to_string()))
            .collect();
        Self {
            tokens,
            pos: 0,
            source,
            prefixes,
        }
    }

    fn parse(mut self) -> Result<Graph> {
        let mut graph = Graph::new();
        while let Some((token, line)) = self.peek() {
            match token {
                Token::PrefixDecl => self.prefix_directive()?,
                Token::IriRef(_) | Token::Pname { .. } => self.triples(&mut graph)?,
                other => {
                    return Err(self.error(line, format!("unexpected {other:?}")));
                }
            }
        }
        Ok(graph)
    }

    fn prefix_directive(&mut self) -> Result<()> {
        self.advance(); // @prefix
        let (token, line) = self.next("prefix name")?;
        let prefix = match token {
            Token::Pname { prefix, local } if local.is_empty() => prefix,
            other => return Err(self.error(line, format!("expected prefix name, found {other:?}"))),
        };
        let (token, line) = self.next("namespace IRI")?;
        let base = match token {
            Token::IriRef(iri) => iri,
            other => return Err(self.error(line, format!("expected IRI, found {other:?}"))),
        };
        self.expect_dot()?;
        self.prefixes.insert(prefix, base);
        Ok(())
    }

    fn triples(&mut self, graph: &mut Graph) -> Result<()> {
        let subject = self.iri("subject")?;
        loop {
            let predicate = self.verb()?;
            loop {
                let object = self.object()?;
                graph.insert(Triple::new(subject.clone(), predicate.clone(), object));
                match self.peek() {
                    Some((Token::Comma, _)) => {
                        self.advance();
                    }
                    _ => break,
                }
            }
            match self.next("';' or '.'")? {
                (Token::Semicolon, _) => {
                    // Tolerate a trailing ';' before the closing '.'.
                    if let Some((Token::Dot, _)) = self.peek() {
                        self.advance();
                        return Ok(());
                    }
                }
                (Token::Dot, _) => return Ok(()),
                (other, line) => {
                    return Err(self.error(line, format!("expected ';' or '.', found {other:?}")));
                }
            }
        }
    }

    fn verb(&mut self) -> Result<Uri> {
        match self.peek() {
            Some((Token::A, _)) => {
                self.advance();
                Ok(Uri::new(RDF_TYPE))
            }
            _ => self.iri("predicate"),
        }
    }

    fn object(&mut self) -> Result<Term> {
        let (token, line) = self.next("object")?;
        match token {
            Token::IriRef(iri) => Ok(Term::Uri(Uri::new(iri))),
            Token::Pname { prefix, local } => {
                Ok(Term::Uri(self.resolve(&prefix, &local, line)?))
            }
            Token::Bool(b) => Ok(Term::Literal(Literal::Bool(b))),
            Token::Int(i) => Ok(Term::Literal(Literal::Int(i))),
            Token::Str(lexical) => {
                if let Some((Token::DoubleCaret, _)) = self.peek() {
                    self.advance();
                    let datatype = self.iri("datatype")?;
                    self.typed_literal(&lexical, &datatype, line)
                } else {
                    Ok(Term::Literal(Literal::Str(lexical)))
                }
            }
            other => Err(self.error(line, format!("expected object, found {other:?}"))),
        }
    }

    fn typed_literal(&self, lexical: &str, datatype: &Uri, line: usize) -> Result<Term> {
        match datatype.as_str() {
            XSD_INTEGER => lexical
                .parse::<i64>()
                .map(|i| Term::Literal(Literal::Int(i)))
                .map_err(|_| self.error(line, format!("invalid integer literal {lexical:?}"))),
            XSD_BOOLEAN => match lexical {
                "true" | "1" => Ok(Term::Literal(Literal::Bool(true))),
                "false" | "0" => Ok(Term::Literal(Literal::Bool(false))),
                _ => Err(self.error(line, format!("invalid boolean literal {lexical:?}"))),
            },
            _ => Ok(Term::Literal(Literal::Str(lexical.to_string()))),
        }
    }

    fn iri(&mut self, what: &str) -> Result<Uri> {
        let (token, line) = self.next(what)?;
        match token {
            Token::IriRef(iri) => Ok(Uri::new(iri)),
            Token::Pname { prefix, local } => self.resolve(&prefix, &local, line),
            other => Err(self.error(line, format!("expected {what}, found {other:?}"))),
        }
    }

    fn resolve(&self, prefix: &str, local: &str, line: usize) -> Result<Uri> {
        match self.prefixes.get(prefix) {
            Some(base) => Ok(Uri::new(format!("{base}{local}"))),
            None => Err(self.error(line, format!("undeclared prefix {prefix:?}"))),
        }
    }

    fn expect_dot(&mut self) -> Result<()> {
        match self.next("'.'")? {
            (Token::Dot, _) => Ok(()),
            (other, line) => Err(self.error(line, format!("expected '.', found {other:?}"))),
        }
    }

    fn peek(&self) -> Option<(Token, usize)> {
        self.tokens.get(self.pos).cloned()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn next(&mut self, what: &str) -> Result<(Token, usize)> {
        match self.tokens.get(self.pos).cloned() {
            Some(entry) => {
                self.pos += 1;
                Ok(entry)
            }
            None => {
                let line = self.tokens.last().map(|(_, l)| *l).unwrap_or(1);
                Err(self.error(line, format!("unexpected end of input, expected {what}")))
            }
        }
    }

    fn error(&self, line: usize, message: String) -> Error {
        Error::Parse {
            source_name: self.source.to_string(),
            line,
            message,
        }
    }
}

fn lex(text: &str) -> Vec<(Token, usize)> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1usize;

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                // Comment to end of line.
                for c in chars.by_ref() {
                    if c == '\n' {
                        line += 1;
                        break;
                    }
                }
            }
            '<' => {
                chars.next();
                let mut iri = String::new();
                for c in chars.by_ref() {
                    if c == '>' {
                        break;
                    }
                    iri.push(c);
                }
                tokens.push((Token::IriRef(iri), line));
            }
            '"' => {
                chars.next();
                let mut value = String::new();
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        '\\' => match chars.next() {
                            Some('n') => value.push('\n'),
                            Some('r') => value.push('\r'),
                            Some('t') => value.push('\t'),
                            Some(other) => value.push(other),
                            None => break,
                        },
                        '\n' => {
                            line += 1;
                            value.push(c);
                        }
                        _ => value.push(c),
                    }
                }
                tokens.push((Token::Str(value), line));
            }
            '.' => {
                chars.next();
                tokens.push((Token::Dot, line));
            }
            ';' => {
                chars.next();
                tokens.push((Token::Semicolon, line));
            }
            ',' => {
                chars.next();
                tokens.push((Token::Comma, line));
            }
            '^' => {
                chars.next();
                if chars.peek() == Some(&'^') {
                    chars.next();
                    tokens.push((Token::DoubleCaret, line));
                }
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || matches!(c, ';' | ',' | '<' | '"' | '^') {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                // A bare word may carry the statement terminator.
                let mut trailing_dot = false;
                if word.len() > 1 && word.ends_with('.') && !word[..word.len() - 1].contains(':') {
                    word.pop();
                    trailing_dot = true;
                }
                tokens.push((word_token(&word), line));
                if trailing_dot {
                    tokens.push((Token::Dot, line));
                }
            }
        }
    }
    tokens
}

fn word_token(word: &str) -> Token {
    match word {
        "a" => Token::A,
        "@prefix" | "PREFIX" => Token::PrefixDecl,
        "true" => Token::Bool(true),
        "false" => Token::Bool(false),
        _ => {
            if let Ok(i) = word.parse::<i64>() {
                Token::Int(i)
            } else if let Some((prefix, local)) = word.split_once(':') {
                Token::Pname {
                    prefix: prefix.to_string(),
                    local: local.to_string(),
                }
            } else {
                // An unresolvable bare word; surfaces as a parse error at
                // the grammar level with its line number.
                Token::Pname {
                    prefix: word.to_string(),
                    local: String::new(),
                }
            }
        }
    }
}
