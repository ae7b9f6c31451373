//! Rendering state threaded through every render call.

use crate::ast::Value;

use super::dialect::{Dialect, DialectProfile, ParamStyle};

/// Collects bind values during parameterized rendering and hands back the
/// placeholder text to print in their place.
#[derive(Debug, Clone)]
pub struct Parameterizer {
    style: ParamStyle,
    values: Vec<Value>,
}

impl Parameterizer {
    pub fn new(style: ParamStyle) -> Self {
        Self {
            style,
            values: Vec::new(),
        }
    }

    pub fn style(&self) -> ParamStyle {
        self.style
    }

    /// Registers a value and returns its placeholder. Values are numbered in
    /// the order the renderer encounters them.
    pub fn push(&mut self, value: Value) -> String {
        self.values.push(value);
        let n = self.values.len();
        match self.style {
            ParamStyle::Positional => "?".to_string(),
            ParamStyle::Numbered => format!("${n}"),
            ParamStyle::Named => format!(":p{n}"),
        }
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Per-render state: the active dialect, its capability profile and the
/// optional parameter collector. Built fresh for every render, so rendering
/// the same tree twice yields identical output.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub dialect: Dialect,
    pub profile: &'static DialectProfile,
    /// Active identifier quote character, overridable per render.
    pub quote_char: char,
    pub params: Option<Parameterizer>,
    /// Current subquery nesting level; 0 at the top-level statement.
    pub depth: usize,
}

impl RenderContext {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_profile(dialect, dialect.profile())
    }

    /// A context whose profile differs from the dialect's stock one. Used
    /// for dialect variants and in tests.
    pub fn with_profile(dialect: Dialect, profile: &'static DialectProfile) -> Self {
        Self {
            dialect,
            profile,
            quote_char: profile.quote_char,
            params: None,
            depth: 0,
        }
    }

    pub fn parameterized(dialect: Dialect, style: ParamStyle) -> Self {
        Self {
            params: Some(Parameterizer::new(style)),
            ..Self::new(dialect)
        }
    }

    /// Overrides the identifier quote character for this render.
    pub fn quote_override(mut self, quote_char: char) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Quotes an identifier with the active quote character, doubling any
    /// embedded occurrence.
    pub fn quote(&self, ident: &str) -> String {
        let q = self.quote_char;
        let mut out = String::with_capacity(ident.len() + 2);
        out.push(q);
        for ch in ident.chars() {
            if ch == q {
                out.push(q);
            }
            out.push(ch);
        }
        out.push(q);
        out
    }

    /// Hands the collected bind values back, in placeholder order.
    pub fn take_values(self) -> Vec<Value> {
        self.params.map(Parameterizer::into_values).unwrap_or_default()
    }
}
