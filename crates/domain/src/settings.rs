//! Substitution Settings
//!
//! Defines how placeholders are recognized and resolved.

use serde::{Deserialize, Serialize};

/// How an opening `{` is recognized as the start of a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Skip whitespace after `{`, then open a placeholder only if the next
    /// character is a letter (default).
    #[default]
    Lookahead,
    /// Every `{` opens a placeholder.
    Strict,
}

/// What to do with a `{` that never sees its closing `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnterminatedPolicy {
    /// Fail the substitution with a malformed-token error (default).
    #[default]
    Error,
    /// Emit the partial placeholder text unchanged.
    Literal,
}

/// How a placeholder key is looked up in the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    /// Top-level keys only (default).
    #[default]
    Flat,
    /// `a.b.c` walks nested objects.
    DottedPath,
}

/// Settings for a substitution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SubstitutionSettings {
    /// Placeholder recognition mode.
    #[serde(default)]
    pub scan_mode: ScanMode,

    /// Handling of unterminated placeholders.
    #[serde(default)]
    pub unterminated: UnterminatedPolicy,

    /// Dictionary lookup mode.
    #[serde(default)]
    pub lookup: LookupMode,
}

impl SubstitutionSettings {
    /// Returns a copy with the given scan mode.
    #[must_use]
    pub const fn with_scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }

    /// Returns a copy with the given unterminated-placeholder policy.
    #[must_use]
    pub const fn with_unterminated(mut self, unterminated: UnterminatedPolicy) -> Self {
        self.unterminated = unterminated;
        self
    }

    /// Returns a copy with the given lookup mode.
    #[must_use]
    pub const fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }
}
