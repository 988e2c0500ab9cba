//! Host-neutral type references.
//!
//! A [`TypeRef`] is what a schema adapter hands to the engine for every
//! property: the name of a built-in type or generic wrapper, an array, or a
//! reference to an enum or record declared in the same schema set. Turning a
//! reference into a [`TypeDescriptor`](crate::TypeDescriptor) is the
//! classifier's job, not this module's.
//!
//! References also have a compact textual form, used by catalog documents:
//!
//! ```text
//! Int32            List<OrderItem>        Order[]
//! Int32?           Nullable<Decimal>      Dictionary<String, Int32>
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ids::TypeId;

const NULLABLE_NAME: &str = "Nullable";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// A type resolved by name: built-ins, nullable wrappers, generic
    /// containers, or anything the adapter could not place more precisely.
    Named { name: String, args: Vec<TypeRef> },
    /// A fixed-size or variable-size array of the element type.
    Array(Box<TypeRef>),
    /// An enum declared in the schema set.
    Enum(TypeId),
    /// A record declared in the schema set.
    Record(TypeId),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    pub fn nullable(inner: TypeRef) -> Self {
        Self::generic(NULLABLE_NAME, vec![inner])
    }

    pub fn list(element: TypeRef) -> Self {
        Self::generic("List", vec![element])
    }

    pub fn array(element: TypeRef) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn enumeration(id: impl Into<TypeId>) -> Self {
        Self::Enum(id.into())
    }

    pub fn record(id: impl Into<TypeId>) -> Self {
        Self::Record(id.into())
    }

    /// Rewrites bare names using `resolve`, leaving generic arguments and
    /// array elements to the same treatment.
    ///
    /// Adapters use this to turn names that refer to declared enums and
    /// records into [`TypeRef::Enum`] and [`TypeRef::Record`].
    pub fn resolve_names<F>(self, resolve: &F) -> TypeRef
    where
        F: Fn(&str) -> Option<TypeRef>,
    {
        match self {
            TypeRef::Named { name, args } if args.is_empty() => {
                resolve(&name).unwrap_or(TypeRef::Named { name, args })
            }
            TypeRef::Named { name, args } => TypeRef::Named {
                name,
                args: args
                    .into_iter()
                    .map(|arg| arg.resolve_names(resolve))
                    .collect(),
            },
            TypeRef::Array(element) => TypeRef::Array(Box::new(element.resolve_names(resolve))),
            other => other,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, args } if name == NULLABLE_NAME && args.len() == 1 => {
                write!(f, "{}?", args[0])
            }
            TypeRef::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (idx, arg) in args.iter().enumerate() {
                        if idx > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeRef::Array(element) => write!(f, "{element}[]"),
            TypeRef::Enum(id) | TypeRef::Record(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for TypeRef {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = RefParser { input: s, pos: 0 };
        let parsed = parser.parse_ref()?;
        parser.skip_whitespace();
        if parser.pos != s.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(parsed)
    }
}

struct RefParser<'a> {
    input: &'a str,
    pos: usize,
}

impl RefParser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn parse_ref(&mut self) -> Result<TypeRef, ModelError> {
        self.skip_whitespace();
        let name = self.parse_name()?;
        self.skip_whitespace();
        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse_ref()?);
                self.skip_whitespace();
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }
        let mut parsed = TypeRef::Named { name, args };
        loop {
            self.skip_whitespace();
            if self.eat('?') {
                parsed = TypeRef::nullable(parsed);
            } else if self.eat('[') {
                self.skip_whitespace();
                if !self.eat(']') {
                    return Err(self.error("expected ']'"));
                }
                parsed = TypeRef::array(parsed);
            } else {
                return Ok(parsed);
            }
        }
    }

    fn parse_name(&mut self) -> Result<String, ModelError> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || matches!(ch, '_' | '.' | ':') {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected a type name"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn error(&self, reason: &str) -> ModelError {
        ModelError::InvalidTypeRef {
            input: self.input.to_string(),
            reason: format!("{reason} at offset {}", self.pos),
        }
    }
}
