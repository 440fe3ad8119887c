//! Placeholder rewriting engine
//!
//! Scans text for `{key}` placeholders in a single pass and replaces each one
//! with what a [`KeyResolver`] returns for it.
//!
//! Rules:
//! - Text outside placeholders is copied unchanged.
//! - An unresolved placeholder is copied unchanged, delimiters and inner
//!   whitespace included.
//! - In [`ScanMode::Lookahead`] a `{` only opens a placeholder when the first
//!   non-whitespace character after it is a letter. Otherwise the `{`, the
//!   skipped whitespace and that character are copied as they are, so
//!   `{{name}}` passes through untouched. Once open, everything up to the
//!   next `}` (including another `{`) is part of the key.
//! - In [`ScanMode::Strict`] every `{` opens a placeholder, and a `{` inside an
//!   open placeholder restarts it. The abandoned text is copied.
//! - A placeholder still open at end of input is handled by [`UnterminatedPolicy`].
//!
//! The letter test is [`char::is_alphabetic`], which is slightly wider than the
//! Unicode letter categories: letter numbers such as `Ⅻ` and combining marks
//! with the `Alphabetic` property also open a placeholder. Whitespace skipped
//! after `{` stays part of the placeholder text, so an unresolved `{ key }` is
//! copied with its spaces.

use bearcub_domain::{ScanMode, SubstitutionSettings, UnterminatedPolicy};
use thiserror::Error;

use super::resolver::{KeyResolver, Resolution};

const OPEN: char = '{';
const CLOSE: char = '}';

/// Errors raised while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A `{` was never closed.
    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated {
        /// Byte offset of the opening `{`.
        offset: usize,
    },
}

/// Result of rewriting one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteResult {
    /// The rewritten text.
    pub output: String,

    /// Keys that were substituted, trimmed, in first-seen order.
    pub resolved: Vec<String>,

    /// Keys left in place, trimmed, in first-seen order.
    pub unresolved: Vec<String>,
}

impl RewriteResult {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Whether every placeholder found was substituted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    fn record(list: &mut Vec<String>, key: &str) {
        let key = key.trim();
        if !list.iter().any(|k| k == key) {
            list.push(key.to_string());
        }
    }
}

/// Rewrites placeholders according to a scan mode and unterminated policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rewriter {
    mode: ScanMode,
    unterminated: UnterminatedPolicy,
}

impl Rewriter {
    /// Creates a rewriter from substitution settings.
    #[must_use]
    pub const fn new(settings: &SubstitutionSettings) -> Self {
        Self {
            mode: settings.scan_mode,
            unterminated: settings.unterminated,
        }
    }

    /// Rewrites every placeholder in `input`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Unterminated`] if a placeholder is still open at
    /// end of input and the policy is [`UnterminatedPolicy::Error`].
    pub fn rewrite<R>(&self, input: &str, resolver: &R) -> Result<RewriteResult, ScanError>
    where
        R: KeyResolver + ?Sized,
    {
        let mut result = RewriteResult::with_capacity(input.len());
        let mut chars = input.char_indices().peekable();
        // Byte offsets of the open `{` and of the first key character.
        let mut open: Option<(usize, usize)> = None;

        while let Some((i, ch)) = chars.next() {
            match (open, ch) {
                (Some(_), OPEN) if self.mode == ScanMode::Lookahead => {}
                (_, OPEN) => {
                    if let Some((start, _)) = open.take() {
                        result.output.push_str(&input[start..i]);
                    }

                    let mut key_start = i + OPEN.len_utf8();
                    if self.mode == ScanMode::Strict {
                        open = Some((i, key_start));
                        continue;
                    }

                    while let Some(&(j, c)) = chars.peek() {
                        if !c.is_whitespace() {
                            break;
                        }
                        key_start = j + c.len_utf8();
                        chars.next();
                    }

                    match chars.peek() {
                        Some(&(j, c)) if !c.is_alphabetic() => {
                            chars.next();
                            result.output.push_str(&input[i..j + c.len_utf8()]);
                        }
                        _ => open = Some((i, key_start)),
                    }
                }
                (Some((start, key_start)), CLOSE) => {
                    let key = &input[key_start..i];
                    match resolver.resolve(key) {
                        Resolution::Found(value) => {
                            result.output.push_str(&value);
                            RewriteResult::record(&mut result.resolved, key);
                        }
                        Resolution::Unresolved => {
                            tracing::trace!(key = key.trim(), "placeholder left unresolved");
                            result.output.push_str(&input[start..i + CLOSE.len_utf8()]);
                            RewriteResult::record(&mut result.unresolved, key);
                        }
                    }
                    open = None;
                }
                (Some(_), _) => {}
                (None, _) => result.output.push(ch),
            }
        }

        if let Some((start, _)) = open {
            match self.unterminated {
                UnterminatedPolicy::Error => return Err(ScanError::Unterminated { offset: start }),
                UnterminatedPolicy::Literal => result.output.push_str(&input[start..]),
            }
        }

        Ok(result)
    }
}

/// Returns true if `input` may contain a placeholder.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    input.contains(OPEN)
}

/// Rewrites `input` with default settings and returns only the output text.
///
/// # Errors
///
/// Returns [`ScanError::Unterminated`] for a `{` without a closing `}`.
pub fn rewrite<R>(input: &str, resolver: &R) -> Result<String, ScanError>
where
    R: KeyResolver + ?Sized,
{
    Rewriter::default()
        .rewrite(input, resolver)
        .map(|r| r.output)
}
