//! Token model for the Logo dialect.
//!
//! A [`Token`] pairs a classification [`Tag`] with an optional payload
//! [`Value`]. Tokens are immutable once constructed; two tokens are equal
//! iff tag and value match.
//!
//! # Tag Numbering
//!
//! Single-character tokens are identified by their code point. Every named
//! variant maps to a numeric code of 256 or above (see [`Tag::code`]), so
//! the two ranges can never collide. The named codes follow the historical
//! token table of the language (`GEQ = 258` … `IFELSE = 476`,
//! `EOF = 65535`).

use std::fmt;

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// End of input. Returned indefinitely once the source is exhausted.
    Eof,
    /// A single-character token such as `(`, `+`, or `.`.
    Char(char),

    // Multi-character operators
    /// `>=`
    Geq,
    /// `<=`
    Leq,
    /// `<>`
    Neq,
    /// `:=`
    Assign,

    // Word operators
    And,
    Or,
    Mod,

    // Literals and identifiers
    Id,
    Number,
    Str,
    /// `#T`
    True,
    /// `#F`
    False,

    // Reserved words
    Var,
    Forward,
    Backward,
    Right,
    Left,
    SetX,
    SetY,
    SetXy,
    Home,
    Clear,
    Circle,
    Arc,
    PenUp,
    PenDown,
    Color,
    PenWidth,
    Print,
    While,
    If,
    IfElse,
}

impl Tag {
    /// Numeric tag code.
    ///
    /// `Char(c)` is the character's code point; named variants are all
    /// 256 or above so they can never collide with single characters.
    pub fn code(self) -> u32 {
        match self {
            Tag::Char(c) => u32::from(c),
            Tag::Geq => 258,
            Tag::Leq => 259,
            Tag::Neq => 260,
            Tag::Assign => 261,
            Tag::And => 262,
            Tag::Or => 263,
            Tag::Mod => 264,
            Tag::Id => 358,
            Tag::Number => 359,
            Tag::Str => 360,
            Tag::True => 361,
            Tag::False => 362,
            Tag::Var => 457,
            Tag::Forward => 458,
            Tag::Backward => 459,
            Tag::Right => 460,
            Tag::Left => 461,
            Tag::SetX => 462,
            Tag::SetY => 463,
            Tag::SetXy => 464,
            Tag::Home => 465,
            Tag::Clear => 466,
            Tag::Circle => 467,
            Tag::Arc => 468,
            Tag::PenUp => 469,
            Tag::PenDown => 470,
            Tag::Color => 471,
            Tag::PenWidth => 472,
            Tag::Print => 473,
            Tag::While => 474,
            Tag::If => 475,
            Tag::IfElse => 476,
            Tag::Eof => 65535,
        }
    }

    /// Canonical kind name, used as the statistics key.
    ///
    /// Single-character tokens render as `ASCII_<char>`, matching the
    /// historical reporting format.
    pub fn label(self) -> String {
        match self {
            Tag::Char(c) => format!("ASCII_{c}"),
            Tag::Eof => "EOF".to_owned(),
            Tag::Geq => "GEQ".to_owned(),
            Tag::Leq => "LEQ".to_owned(),
            Tag::Neq => "NEQ".to_owned(),
            Tag::Assign => "ASSIGN".to_owned(),
            Tag::And => "AND".to_owned(),
            Tag::Or => "OR".to_owned(),
            Tag::Mod => "MOD".to_owned(),
            Tag::Id => "ID".to_owned(),
            Tag::Number => "NUMBER".to_owned(),
            Tag::Str => "STRING".to_owned(),
            Tag::True => "TRUE".to_owned(),
            Tag::False => "FALSE".to_owned(),
            Tag::Var => "VAR".to_owned(),
            Tag::Forward => "FORWARD".to_owned(),
            Tag::Backward => "BACKWARD".to_owned(),
            Tag::Right => "RIGHT".to_owned(),
            Tag::Left => "LEFT".to_owned(),
            Tag::SetX => "SETX".to_owned(),
            Tag::SetY => "SETY".to_owned(),
            Tag::SetXy => "SETXY".to_owned(),
            Tag::Home => "HOME".to_owned(),
            Tag::Clear => "CLEAR".to_owned(),
            Tag::Circle => "CIRCLE".to_owned(),
            Tag::Arc => "ARC".to_owned(),
            Tag::PenUp => "PENUP".to_owned(),
            Tag::PenDown => "PENDOWN".to_owned(),
            Tag::Color => "COLOR".to_owned(),
            Tag::PenWidth => "PENWIDTH".to_owned(),
            Tag::Print => "PRINT".to_owned(),
            Tag::While => "WHILE".to_owned(),
            Tag::If => "IF".to_owned(),
            Tag::IfElse => "IFELSE".to_owned(),
        }
    }

    /// Whether this tag is one of the reserved-word variants.
    pub fn is_reserved_word(self) -> bool {
        matches!(
            self,
            Tag::And
                | Tag::Or
                | Tag::Mod
                | Tag::Var
                | Tag::Forward
                | Tag::Backward
                | Tag::Right
                | Tag::Left
                | Tag::SetX
                | Tag::SetY
                | Tag::SetXy
                | Tag::Home
                | Tag::Clear
                | Tag::Circle
                | Tag::Arc
                | Tag::PenUp
                | Tag::PenDown
                | Tag::Color
                | Tag::PenWidth
                | Tag::Print
                | Tag::While
                | Tag::If
                | Tag::IfElse
        )
    }
}

/// Payload carried by literal and identifier tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer-valued number (no `.` was consumed).
    Int(i64),
    /// Number with a fractional part.
    Float(f64),
    /// Identifier text (uppercased), string literal (including both
    /// delimiting quotes), or an operator's canonical spelling.
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// A classified unit of lexical meaning. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    tag: Tag,
    value: Option<Value>,
}

impl Token {
    /// Token with no payload.
    pub fn new(tag: Tag) -> Self {
        Self { tag, value: None }
    }

    /// Token carrying a text payload.
    pub fn text(tag: Tag, text: impl Into<String>) -> Self {
        Self {
            tag,
            value: Some(Value::Text(text.into())),
        }
    }

    /// Integer-valued `NUMBER` token.
    pub fn int(value: i64) -> Self {
        Self {
            tag: Tag::Number,
            value: Some(Value::Int(value)),
        }
    }

    /// Fractional `NUMBER` token.
    pub fn float(value: f64) -> Self {
        Self {
            tag: Tag::Number,
            value: Some(Value::Float(value)),
        }
    }

    /// Single-character token.
    pub fn char(c: char) -> Self {
        Self {
            tag: Tag::Char(c),
            value: None,
        }
    }

    /// End-of-input token.
    pub fn eof() -> Self {
        Self::new(Tag::Eof)
    }

    /// The token's classification.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The token's payload, if any.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Whether this is the end-of-input token.
    pub fn is_eof(&self) -> bool {
        self.tag == Tag::Eof
    }
}

impl fmt::Display for Token {
    /// Human-readable rendering for display and logging (not a wire format).
    ///
    /// Operators render as their quoted symbol, literals as `KIND = value`,
    /// reserved words as their quoted canonical text, single characters as
    /// the quoted character.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Tag::Eof => f.write_str("EOF"),
            Tag::Char(c) => write!(f, "'{c}'"),
            Tag::Geq => f.write_str("'>='"),
            Tag::Leq => f.write_str("'<='"),
            Tag::Neq => f.write_str("'<>'"),
            Tag::Assign => f.write_str("':='"),
            Tag::True => f.write_str("'#T'"),
            Tag::False => f.write_str("'#F'"),
            Tag::And => f.write_str("'AND'"),
            Tag::Or => f.write_str("'OR'"),
            Tag::Mod => f.write_str("'MOD'"),
            Tag::Number => match &self.value {
                Some(v) => write!(f, "NUMBER = {v}"),
                None => f.write_str("NUMBER"),
            },
            Tag::Id => match &self.value {
                Some(v) => write!(f, "ID = '{v}'"),
                None => f.write_str("ID"),
            },
            Tag::Str => match &self.value {
                Some(v) => write!(f, "STRING = {v}"),
                None => f.write_str("STRING"),
            },
            _ => match &self.value {
                Some(v) => write!(f, "'{v}'"),
                None => write!(f, "'{}'", self.tag.label()),
            },
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
