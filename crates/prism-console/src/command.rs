//! Command descriptor types: type tags, signatures, parsed arguments.

use std::cell::RefCell;
use std::fmt;

use prism_types::error::Result;

/// Primitive parameter type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    Float,
    Int,
    Str,
}

impl TypeTag {
    /// Parse a token against this tag.
    ///
    /// Returns `None` when the token is not a valid literal for the tag.
    /// `Str` accepts any token verbatim (no de-quoting).
    pub fn parse(self, token: &str) -> Option<ArgValue> {
        match self {
            TypeTag::Bool => token.parse::<bool>().ok().map(ArgValue::Bool),
            TypeTag::Float => token.parse::<f64>().ok().map(ArgValue::Float),
            TypeTag::Int => token.parse::<i64>().ok().map(ArgValue::Int),
            TypeTag::Str => Some(ArgValue::Str(token.to_string())),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Bool => "Bool",
            TypeTag::Float => "Float",
            TypeTag::Int => "Int",
            TypeTag::Str => "String",
        };
        f.write_str(name)
    }
}

/// A positional argument after type coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Bool(bool),
    Float(f64),
    Int(i64),
    Str(String),
}

/// Parameter shape of a command: arity plus per-slot type tags.
///
/// A closed union rather than runtime type tests: the dispatcher's overload
/// attempt is a single exhaustive match, so a missing type combination is a
/// compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSignature {
    Nullary,
    Unary(TypeTag),
    Binary(TypeTag, TypeTag),
}

impl CommandSignature {
    /// Number of positional arguments.
    pub fn arity(self) -> usize {
        match self {
            CommandSignature::Nullary => 0,
            CommandSignature::Unary(_) => 1,
            CommandSignature::Binary(_, _) => 2,
        }
    }

    /// Attempt to parse every token against this signature.
    ///
    /// Succeeds only when the token count equals the arity and every token
    /// parses against its slot's tag.
    pub fn parse_args(self, tokens: &[&str]) -> Option<Vec<ArgValue>> {
        if tokens.len() != self.arity() {
            return None;
        }
        match self {
            CommandSignature::Nullary => Some(Vec::new()),
            CommandSignature::Unary(a) => Some(vec![a.parse(tokens[0])?]),
            CommandSignature::Binary(a, b) => {
                Some(vec![a.parse(tokens[0])?, b.parse(tokens[1])?])
            },
        }
    }
}

/// Callback bound to a descriptor's signature. Receives arguments already
/// parsed against the signature's type tags.
pub type CommandCallback = Box<dyn FnMut(&[ArgValue]) -> Result<()>>;

/// Identity and behavior of one registrable console operation.
pub struct CommandDescriptor {
    /// What the operator types. Non-empty, no whitespace.
    pub id: String,
    /// One-line description for help display.
    pub description: String,
    /// Parameter shape.
    pub signature: CommandSignature,
    /// Console-intrinsic; protected from removal and override.
    pub native: bool,
    /// Whether invocations of this command are appended to history.
    pub show_in_history: bool,
    callback: RefCell<CommandCallback>,
}

impl CommandDescriptor {
    /// Create a descriptor with the default flags: not native, shown in
    /// history.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        signature: CommandSignature,
        callback: impl FnMut(&[ArgValue]) -> Result<()> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            signature,
            native: false,
            show_in_history: true,
            callback: RefCell::new(Box::new(callback)),
        }
    }

    /// Mark as console-intrinsic (protected from removal and override).
    pub fn native(mut self) -> Self {
        self.native = true;
        self
    }

    /// Suppress history entries for this command's invocations.
    pub fn hidden(mut self) -> Self {
        self.show_in_history = false;
        self
    }

    /// Arity shorthand.
    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    /// Invoke the bound callback with parsed arguments.
    pub(crate) fn invoke(&self, args: &[ArgValue]) -> Result<()> {
        (self.callback.borrow_mut())(args)
    }

    /// The capitalized-letters acronym: every upper-case character of the
    /// id, with the first character always included regardless of case.
    pub fn acronym(&self) -> String {
        let mut out = String::new();
        for (i, ch) in self.id.chars().enumerate() {
            if i == 0 || ch.is_uppercase() {
                out.push(ch);
            }
        }
        out
    }

    /// Render the suggestion/help label, e.g. `"teleport [Int] [Int]"`.
    pub fn suggestion_label(&self) -> String {
        match self.signature {
            CommandSignature::Nullary => self.id.clone(),
            CommandSignature::Unary(a) => format!("{} [{a}]", self.id),
            CommandSignature::Binary(a, b) => format!("{} [{a}] [{b}]", self.id),
        }
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("signature", &self.signature)
            .field("native", &self.native)
            .field("show_in_history", &self.show_in_history)
            .finish_non_exhaustive()
    }
}
