//! Schema validation for persisted documents and user input.
//!
//! Two validation levels, mirrored on every read and write boundary:
//!
//! 1. **Schema**: the JSON value must deserialize into the typed struct.
//!    Enum membership, uuid shape, ISO 8601 date-times and integer widths
//!    are all checked here. Failures carry the dotted path of the field
//!    that failed to deserialize and the serde message.
//! 2. **Semantic**: hand-written [`Validate`] impls check length ceilings,
//!    numeric ranges, id and color formats and cross-field rules. Every
//!    issue carries the dotted path of the offending field, e.g.
//!    `jobTargets.3.company`.
//!
//! The Rust structs in [`crate::model`] are the static shape; the
//! [`Validate`] impls next to them must be kept in lockstep by hand.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_path_to_error::Segment;

/// Category of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The value did not deserialize into the expected shape.
    Malformed,
    /// A required string was empty or shorter than its minimum.
    TooShort,
    /// A string exceeded its length ceiling.
    TooLong,
    /// A number fell outside its allowed range.
    OutOfRange,
    /// An id, color or URL did not match its format.
    InvalidFormat,
    /// A set-like list or keyed collection held the same value twice.
    Duplicate,
    /// Two fields contradict each other (e.g. `updatedAt < createdAt`).
    Inconsistent,
}

/// Details about a single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted field path from the document root (`$` for the root itself).
    pub path: String,
    pub kind: IssueKind,
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Non-empty list of issues found while validating one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    /// A single-issue error, used for input checks outside a full document.
    #[must_use]
    pub fn single(path: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue {
                path: path.into(),
                kind,
                message: message.into(),
            }],
        }
    }

    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// First issue, which is the one surfaced in one-line error output.
    #[must_use]
    pub fn first(&self) -> &ValidationIssue {
        &self.issues[0]
    }

    /// Whether any issue sits exactly at `path`.
    #[must_use]
    pub fn has_path(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: ")?;
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Accumulates issues while walking a value, tracking the current field path.
#[derive(Debug, Default)]
pub struct Validator {
    path: Vec<String>,
    issues: Vec<ValidationIssue>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with `segment` pushed onto the current path.
    pub fn nested(&mut self, segment: impl fmt::Display, f: impl FnOnce(&mut Self)) {
        self.path.push(segment.to_string());
        f(self);
        self.path.pop();
    }

    /// Validate every element of `items` under `field.<index>`.
    pub fn each<T: Validate>(&mut self, field: &str, items: &[T]) {
        self.nested(field, |v| {
            for (idx, item) in items.iter().enumerate() {
                v.nested(idx, |v| item.validate_into(v));
            }
        });
    }

    fn field_path(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else if field.is_empty() {
            self.path.join(".")
        } else {
            format!("{}.{field}", self.path.join("."))
        }
    }

    /// Record an issue at `field` relative to the current path.
    pub fn issue(&mut self, field: &str, kind: IssueKind, message: impl Into<String>) {
        let path = self.field_path(field);
        self.issues.push(ValidationIssue {
            path,
            kind,
            message: message.into(),
        });
    }

    /// Require `min..=max` characters.
    pub fn text(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min {
            if min == 1 {
                self.issue(field, IssueKind::TooShort, "must not be empty");
            } else {
                self.issue(
                    field,
                    IssueKind::TooShort,
                    format!("must be at least {min} characters"),
                );
            }
        } else if len > max {
            self.issue(
                field,
                IssueKind::TooLong,
                format!("must be <= {max} characters"),
            );
        }
    }

    /// Optional text: only the ceiling applies when present.
    pub fn opt_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.text(field, value, 0, max);
        }
    }

    pub fn range(&mut self, field: &str, value: i64, min: i64, max: i64) {
        if value < min || value > max {
            self.issue(
                field,
                IssueKind::OutOfRange,
                format!("must be between {min} and {max}, got {value}"),
            );
        }
    }

    pub fn hex_color(&mut self, field: &str, value: &str) {
        if !is_hex_color(value) {
            self.issue(
                field,
                IssueKind::InvalidFormat,
                format!("'{value}' is not a #RRGGBB color"),
            );
        }
    }

    pub fn url(&mut self, field: &str, value: &str) {
        if !is_http_url(value) {
            self.issue(
                field,
                IssueKind::InvalidFormat,
                format!("'{value}' is not an http(s) URL"),
            );
        }
    }

    /// Reject repeated values in a set-like list.
    pub fn unique<T: PartialEq + fmt::Display>(&mut self, field: &str, values: &[T]) {
        for (idx, value) in values.iter().enumerate() {
            if values[..idx].contains(value) {
                self.issue(
                    field,
                    IssueKind::Duplicate,
                    format!("'{value}' appears more than once"),
                );
            }
        }
    }

    /// Finish, returning every recorded issue.
    ///
    /// # Errors
    ///
    /// Returns the accumulated [`ValidationErrors`] when any issue was recorded.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                issues: self.issues,
            })
        }
    }
}

/// Semantic validation for a typed value.
pub trait Validate {
    /// Record every issue in `self` into `v`, relative to its current path.
    fn validate_into(&self, v: &mut Validator);

    /// Validate `self` as a document root.
    ///
    /// # Errors
    ///
    /// Returns every semantic issue found.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        self.validate_into(&mut v);
        v.finish()
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_into(&self, v: &mut Validator) {
        for (idx, item) in self.iter().enumerate() {
            v.nested(idx, |v| item.validate_into(v));
        }
    }
}

/// Dotted form of a deserializer path: `jobTargets.0.priority`, or `$` at
/// the root.
fn dotted_path(path: &serde_path_to_error::Path) -> String {
    let segments: Vec<String> = path
        .iter()
        .map(|segment| match segment {
            Segment::Seq { index } => index.to_string(),
            other => other.to_string(),
        })
        .collect();
    if segments.is_empty() {
        "$".to_string()
    } else {
        segments.join(".")
    }
}

/// Parse an arbitrary JSON value into a constraint-satisfying `T`.
///
/// # Errors
///
/// Returns a `Malformed` issue at the offending field when the value does
/// not deserialize, or the semantic issues reported by `T`'s [`Validate`]
/// impl.
pub fn parse_value<T>(value: serde_json::Value) -> Result<T, ValidationErrors>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_path_to_error::deserialize(value).map_err(|err| {
        ValidationErrors::single(
            dotted_path(err.path()),
            IssueKind::Malformed,
            err.inner().to_string(),
        )
    })?;
    parsed.validate()?;
    Ok(parsed)
}

/// Parse raw JSON text into a constraint-satisfying `T`.
///
/// # Errors
///
/// Same as [`parse_value`], plus a `Malformed` issue when `raw` is not JSON.
pub fn parse_str<T>(raw: &str) -> Result<T, ValidationErrors>
where
    T: DeserializeOwned + Validate,
{
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|err| ValidationErrors::single("$", IssueKind::Malformed, err.to_string()))?;
    parse_value(value)
}

#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[must_use]
pub fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    rest.is_some_and(|host| {
        let host = host.split(['/', '?', '#']).next().unwrap_or_default();
        !host.is_empty() && !host.chars().any(char::is_whitespace)
    })
}
