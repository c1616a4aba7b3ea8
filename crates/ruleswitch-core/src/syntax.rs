//! Syntactic well-formedness of path patterns.
//!
//! This check looks only at bracket balance and escapes. It does not try to
//! decide what a pattern matches.

/// A syntactic defect in a glob pattern. Positions are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// The pattern is empty.
    #[error("pattern is empty")]
    Empty,

    /// `[` without a closing `]`.
    #[error("unclosed `[` at offset {position}")]
    UnclosedClass {
        /// Offset of the opening bracket.
        position: usize,
    },

    /// `]` outside of a character class.
    #[error("unmatched `]` at offset {position}")]
    UnopenedClass {
        /// Offset of the stray bracket.
        position: usize,
    },

    /// `{` without a closing `}`.
    #[error("unclosed `{{` at offset {position}")]
    UnclosedAlternates {
        /// Offset of the opening brace.
        position: usize,
    },

    /// `}` without an opening `{`.
    #[error("unmatched `}}` at offset {position}")]
    UnopenedAlternates {
        /// Offset of the stray brace.
        position: usize,
    },

    /// A trailing `\` with nothing to escape.
    #[error("dangling escape at offset {position}")]
    DanglingEscape {
        /// Offset of the backslash.
        position: usize,
    },
}

/// Checks that a pattern is balanced and has no dangling escapes.
///
/// # Errors
///
/// Returns the first defect found, scanning left to right.
pub fn validate(pattern: &str) -> Result<(), SyntaxError> {
    if pattern.is_empty() {
        return Err(SyntaxError::Empty);
    }

    let mut chars = pattern.char_indices().peekable();
    let mut open_braces: Vec<usize> = Vec::new();

    while let Some((position, c)) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return Err(SyntaxError::DanglingEscape { position });
                }
            }
            '[' => {
                // `[!` / `[^` negate; a `]` right after the opener is literal.
                if matches!(chars.peek(), Some((_, '!' | '^'))) {
                    chars.next();
                }
                if matches!(chars.peek(), Some((_, ']'))) {
                    chars.next();
                }
                let mut closed = false;
                while let Some((inner, c)) = chars.next() {
                    match c {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '\\' if chars.next().is_none() => {
                            return Err(SyntaxError::DanglingEscape { position: inner });
                        }
                        _ => {}
                    }
                }
                if !closed {
                    return Err(SyntaxError::UnclosedClass { position });
                }
            }
            ']' => return Err(SyntaxError::UnopenedClass { position }),
            '{' => open_braces.push(position),
            '}' => {
                if open_braces.pop().is_none() {
                    return Err(SyntaxError::UnopenedAlternates { position });
                }
            }
            _ => {}
        }
    }

    match open_braces.first() {
        Some(&position) => Err(SyntaxError::UnclosedAlternates { position }),
        None => Ok(()),
    }
}
