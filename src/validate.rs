use std::fmt;

use crate::error::{Result, ScaffoldError};

/// Longest name the platform accepts for a metadata API name.
pub const MAX_IDENTIFIER_LEN: usize = 40;

/// Words the platform reserves; compared case-insensitively.
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "activate", "and", "any", "array", "as", "asc", "autonomous", "begin",
    "bigdecimal", "blob", "boolean", "break", "bulk", "by", "byte", "case", "cast", "catch",
    "char", "class", "collect", "commit", "const", "continue", "currency", "date", "datetime",
    "decimal", "default", "delete", "desc", "do", "double", "else", "end", "enum", "exception",
    "exit", "export", "extends", "false", "final", "finally", "float", "for", "from", "global",
    "goto", "group", "having", "hint", "if", "implements", "import", "in", "inner", "insert",
    "instanceof", "int", "integer", "interface", "into", "join", "like", "limit", "list",
    "long", "loop", "map", "merge", "new", "not", "null", "nulls", "number", "object", "of",
    "on", "or", "outer", "override", "package", "parallel", "pragma", "private", "protected",
    "public", "retrieve", "return", "rollback", "savepoint", "search", "select", "set",
    "short", "sort", "stat", "static", "string", "super", "switch", "synchronized", "system",
    "testmethod", "then", "this", "throw", "time", "transaction", "trigger", "true", "try",
    "undelete", "update", "upsert", "using", "virtual", "void", "webservice", "when", "where",
    "while",
];

/// Why a name was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierViolation {
    Empty,
    TooLong { len: usize },
    LeadingDigit,
    MustStartWithLetter,
    IllegalCharacter(char),
    TrailingUnderscore,
    DoubleUnderscore,
    ReservedKeyword,
}

impl fmt::Display for IdentifierViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierViolation::Empty => f.write_str("name cannot be empty"),
            IdentifierViolation::TooLong { len } => write!(
                f,
                "name is {len} characters long, the limit is {MAX_IDENTIFIER_LEN}"
            ),
            IdentifierViolation::LeadingDigit => f.write_str("name cannot start with a digit"),
            IdentifierViolation::MustStartWithLetter => f.write_str("name must start with a letter"),
            IdentifierViolation::IllegalCharacter(c) => {
                write!(f, "'{c}' is not allowed, use only letters, digits and underscores")
            }
            IdentifierViolation::TrailingUnderscore => {
                f.write_str("name cannot end with an underscore")
            }
            IdentifierViolation::DoubleUnderscore => {
                f.write_str("name cannot contain two consecutive underscores")
            }
            IdentifierViolation::ReservedKeyword => f.write_str("name is a reserved keyword"),
        }
    }
}

/// Check a name against the platform identifier rules.
pub fn check_identifier(name: &str) -> std::result::Result<(), IdentifierViolation> {
    let Some(first) = name.chars().next() else {
        return Err(IdentifierViolation::Empty);
    };

    let len = name.chars().count();
    if len > MAX_IDENTIFIER_LEN {
        return Err(IdentifierViolation::TooLong { len });
    }

    if first.is_ascii_digit() {
        return Err(IdentifierViolation::LeadingDigit);
    }
    if !first.is_ascii_alphabetic() {
        return Err(IdentifierViolation::MustStartWithLetter);
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(IdentifierViolation::IllegalCharacter(c));
    }

    if name.ends_with('_') {
        return Err(IdentifierViolation::TrailingUnderscore);
    }
    if name.contains("__") {
        return Err(IdentifierViolation::DoubleUnderscore);
    }

    if RESERVED_KEYWORDS
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(name))
    {
        return Err(IdentifierViolation::ReservedKeyword);
    }

    Ok(())
}

/// Validate the answer `field` holding `value`, reporting both on failure.
pub fn validate(field: &str, value: &str) -> Result<()> {
    check_identifier(value).map_err(|violation| ScaffoldError::InvalidIdentifier {
        field: field.to_string(),
        value: value.to_string(),
        violation,
    })
}
