use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

/// Engine-independent representation of a script-side value.
///
/// Bindings convert `rquickjs::Value` into this at the boundary so that the
/// validation layer (and everything behind it) never touches engine types.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Array(Vec<ScriptValue>),
    Object(HashMap<String, ScriptValue>),
}

/// Expected kind at a schema position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Number,
    Text,
    Bool,
    Array,
    Object,
}

impl ArgKind {
    fn describe(self) -> &'static str {
        match self {
            ArgKind::Number => "a number",
            ArgKind::Text => "a string",
            ArgKind::Bool => "a boolean",
            ArgKind::Array => "an array",
            ArgKind::Object => "an object",
        }
    }

    fn matches(self, value: &ScriptValue) -> bool {
        matches!(
            (self, value),
            (ArgKind::Number, ScriptValue::Number(_))
                | (ArgKind::Text, ScriptValue::Text(_))
                | (ArgKind::Bool, ScriptValue::Bool(_))
                | (ArgKind::Array, ScriptValue::Array(_))
                | (ArgKind::Object, ScriptValue::Object(_))
        )
    }
}

/// Arity or type mismatch at the validation gate, identifying the offending
/// zero-based argument position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("bad argument at position {position}: expected {expected}")]
pub struct InvalidArgument {
    pub position: usize,
    pub expected: &'static str,
}

impl InvalidArgument {
    pub fn new(position: usize, expected: &'static str) -> Self {
        Self { position, expected }
    }
}

/// An argument list that has passed an ordered schema check.
///
/// `check` verifies arity and per-position kind up front, before any side
/// effect occurs. The typed accessors re-verify on extraction so a mismatch
/// can never silently produce a partial result.
#[derive(Debug)]
pub struct CheckedArgs<'a> {
    args: &'a [ScriptValue],
}

impl<'a> CheckedArgs<'a> {
    pub fn check(schema: &[ArgKind], args: &'a [ScriptValue]) -> Result<Self, InvalidArgument> {
        for (position, expected) in schema.iter().copied().enumerate() {
            match args.get(position) {
                Some(value) if expected.matches(value) => {}
                _ => return Err(InvalidArgument::new(position, expected.describe())),
            }
        }
        if args.len() > schema.len() {
            return Err(InvalidArgument::new(schema.len(), "no further arguments"));
        }
        Ok(Self { args })
    }

    pub fn number(&self, position: usize) -> Result<f64, InvalidArgument> {
        match self.args.get(position) {
            Some(ScriptValue::Number(value)) => Ok(*value),
            _ => Err(InvalidArgument::new(position, ArgKind::Number.describe())),
        }
    }

    /// Number extraction with JS `IntegerValue` semantics (truncation).
    pub fn integer(&self, position: usize) -> Result<i64, InvalidArgument> {
        self.number(position).map(|value| value as i64)
    }

    pub fn text(&self, position: usize) -> Result<&'a str, InvalidArgument> {
        match self.args.get(position) {
            Some(ScriptValue::Text(value)) => Ok(value),
            _ => Err(InvalidArgument::new(position, ArgKind::Text.describe())),
        }
    }

    pub fn array(&self, position: usize) -> Result<&'a [ScriptValue], InvalidArgument> {
        match self.args.get(position) {
            Some(ScriptValue::Array(values)) => Ok(values),
            _ => Err(InvalidArgument::new(position, ArgKind::Array.describe())),
        }
    }

    pub fn object(
        &self,
        position: usize,
    ) -> Result<&'a HashMap<String, ScriptValue>, InvalidArgument> {
        match self.args.get(position) {
            Some(ScriptValue::Object(map)) => Ok(map),
            _ => Err(InvalidArgument::new(position, ArgKind::Object.describe())),
        }
    }
}

/// Permissive text-to-path conversion: accepts any byte sequence a platform
/// path allows and performs no existence check.
pub fn path_from_text(text: &str) -> PathBuf {
    PathBuf::from(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_args() -> Vec<ScriptValue> {
        vec![
            ScriptValue::Number(1.0),
            ScriptValue::Text("title".into()),
            ScriptValue::Array(vec![ScriptValue::Text("a".into())]),
        ]
    }

    #[test]
    fn accepts_matching_schema() {
        let args = sample_args();
        let checked =
            CheckedArgs::check(&[ArgKind::Number, ArgKind::Text, ArgKind::Array], &args).unwrap();
        assert_eq!(checked.integer(0).unwrap(), 1);
        assert_eq!(checked.text(1).unwrap(), "title");
        assert_eq!(checked.array(2).unwrap().len(), 1);
    }

    #[test]
    fn rejects_kind_mismatch_with_position() {
        let args = sample_args();
        let err =
            CheckedArgs::check(&[ArgKind::Number, ArgKind::Number, ArgKind::Array], &args)
                .unwrap_err();
        assert_eq!(err.position, 1);
    }

    #[test]
    fn rejects_short_arity() {
        let args = vec![ScriptValue::Number(1.0)];
        let err = CheckedArgs::check(&[ArgKind::Number, ArgKind::Text], &args).unwrap_err();
        assert_eq!(err.position, 1);
    }

    #[test]
    fn rejects_excess_arguments() {
        let args = sample_args();
        let err = CheckedArgs::check(&[ArgKind::Number, ArgKind::Text], &args).unwrap_err();
        assert_eq!(err.position, 2);
    }

    #[test]
    fn integer_truncates() {
        let args = vec![ScriptValue::Number(3.9)];
        let checked = CheckedArgs::check(&[ArgKind::Number], &args).unwrap();
        assert_eq!(checked.integer(0).unwrap(), 3);
    }

    #[test]
    fn path_conversion_is_permissive() {
        assert_eq!(path_from_text(""), PathBuf::new());
        assert_eq!(
            path_from_text("/no/such/dir/definitely missing.txt"),
            PathBuf::from("/no/such/dir/definitely missing.txt")
        );
    }
}
