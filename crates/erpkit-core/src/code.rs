//! # Sequential Code Module
//!
//! Fixed-width base-36 codes used as abbreviations for catalog entries
//! (colors, sizes, brands, seasons).
//!
//! ## Counting Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Alphabet: 0 1 2 3 4 5 6 7 8 9 A B C ... X Y Z   (digits 0..=35)        │
//! │                                                                         │
//! │  Rightmost character is least significant:                              │
//! │                                                                         │
//! │    000 → 001 → ... → 009 → 00A → ... → 00Z → 010 → ... → ZZZ            │
//! │                                                                     │   │
//! │    ZZZ ─── overflow ──► 000  (Wrapped, reported to the caller)  ◄───┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two APIs
//! - [`next_code`] / [`CodePolicy::advance`]: never fail. Bad input becomes a
//!   seed, overflow wraps to all-zero, and the [`NextCode`] says which happened.
//! - [`CodePolicy::try_advance`]: strict. Bad input is
//!   [`CodeError::InvalidSeed`], overflow is [`CodeError::Overflow`].
//!
//! ## Usage
//! ```rust
//! use erpkit_core::code::{next_code, CodePolicy};
//!
//! assert_eq!(next_code("009"), "00A");
//! assert_eq!(next_code(""), "000");
//!
//! let next = CodePolicy::default().advance(Some("ZZZ"));
//! assert!(next.overflowed());
//! assert_eq!(next.code.as_str(), "000");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::CodeError;

/// The 36 symbols, in counting order.
pub const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of symbols per position.
pub const RADIX: u64 = 36;

/// Width used when the input gives no usable width.
pub const DEFAULT_WIDTH: usize = 3;

/// Widths accepted by the default policy.
pub const DEFAULT_ALLOWED_WIDTHS: [usize; 2] = [2, 3];

fn digit_of(symbol: u8) -> Option<u64> {
    match symbol {
        b'0'..=b'9' => Some(u64::from(symbol - b'0')),
        b'A'..=b'Z' => Some(u64::from(symbol - b'A') + 10),
        _ => None,
    }
}

// =============================================================================
// Code
// =============================================================================

/// A fixed-width code over `0-9A-Z`.
///
/// Every position is guaranteed to hold one of the 36 symbols. Codes of the
/// same width order by their base-36 value; shorter codes sort first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export)]
pub struct Code(String);

impl Code {
    /// Parses a code, rejecting empty input and foreign characters.
    ///
    /// Lowercase letters are foreign: `"0a"` is not the same code as `"0A"`.
    pub fn parse(input: &str) -> Result<Self, CodeError> {
        if input.is_empty() {
            return Err(CodeError::InvalidSeed {
                input: input.to_string(),
                reason: "code is empty".to_string(),
            });
        }

        if let Some(bad) = input.chars().find(|c| !c.is_ascii() || digit_of(*c as u8).is_none()) {
            return Err(CodeError::InvalidSeed {
                input: input.to_string(),
                reason: format!("'{}' is not one of 0-9, A-Z", bad),
            });
        }

        Ok(Code(input.to_string()))
    }

    /// The all-`0` code of the given width.
    pub fn zero(width: usize) -> Result<Self, CodeError> {
        if width == 0 {
            return Err(CodeError::InvalidWidth { width });
        }
        Ok(Self::repeat(b'0', width))
    }

    /// The all-`Z` code of the given width.
    pub fn max(width: usize) -> Result<Self, CodeError> {
        if width == 0 {
            return Err(CodeError::InvalidWidth { width });
        }
        Ok(Self::repeat(b'Z', width))
    }

    /// Builds the code for a base-36 value, left-padded with `0`.
    ///
    /// ## Example
    /// ```rust
    /// use erpkit_core::code::Code;
    ///
    /// assert_eq!(Code::from_value(36, 3).unwrap().as_str(), "010");
    /// assert!(Code::from_value(36 * 36, 2).is_err());
    /// ```
    pub fn from_value(value: u64, width: usize) -> Result<Self, CodeError> {
        if width == 0 {
            return Err(CodeError::InvalidWidth { width });
        }

        // Wide codes hold every u64, so only check when the limit fits.
        if let Some(limit) = u32::try_from(width).ok().and_then(|w| RADIX.checked_pow(w)) {
            if value >= limit {
                return Err(CodeError::Overflow { width });
            }
        }

        let mut symbols = vec![b'0'; width];
        let mut remaining = value;
        for slot in symbols.iter_mut().rev() {
            if remaining == 0 {
                break;
            }
            *slot = ALPHABET[(remaining % RADIX) as usize];
            remaining /= RADIX;
        }

        Ok(Self::from_symbols(&symbols))
    }

    /// Base-36 value of the code, or `None` if it does not fit in a u64.
    pub fn value(&self) -> Option<u64> {
        self.0.bytes().try_fold(0u64, |acc, symbol| {
            acc.checked_mul(RADIX)?.checked_add(digit_of(symbol)?)
        })
    }

    /// Number of characters.
    #[inline]
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Returns the immediate successor and whether the counter wrapped.
    ///
    /// Scans from the rightmost character: `Z` resets to `0` and carries,
    /// any other symbol steps to the next one and stops the scan. A carry
    /// out of the leftmost position means the input was all `Z`; the result
    /// is then the all-`0` code and the flag is `true`.
    pub fn successor(&self) -> (Code, bool) {
        let mut symbols = self.0.as_bytes().to_vec();

        for slot in symbols.iter_mut().rev() {
            match *slot {
                b'Z' => *slot = b'0',
                b'9' => {
                    *slot = b'A';
                    return (Self::from_symbols(&symbols), false);
                }
                other => {
                    *slot = other + 1;
                    return (Self::from_symbols(&symbols), false);
                }
            }
        }

        (Self::from_symbols(&symbols), true)
    }

    /// Returns the code as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the code, returning the inner string.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Checks if every position is `0`.
    pub fn is_zero(&self) -> bool {
        self.0.bytes().all(|b| b == b'0')
    }

    fn repeat(symbol: u8, width: usize) -> Self {
        Code((symbol as char).to_string().repeat(width))
    }

    fn from_symbols(symbols: &[u8]) -> Self {
        Code(symbols.iter().map(|&b| b as char).collect())
    }
}

impl Ord for Code {
    fn cmp(&self, other: &Self) -> Ordering {
        // ASCII order of 0-9A-Z is the counting order, so same-width codes
        // compare correctly as strings.
        self.width()
            .cmp(&other.width())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Code {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Code {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Code::parse(s)
    }
}

impl TryFrom<String> for Code {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Code::parse(&value)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

// =============================================================================
// Advance Outcome
// =============================================================================

/// How [`CodePolicy::advance`] produced its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CodeAdvance {
    /// Input was a valid code; output is its successor.
    Incremented,
    /// Input was unusable; output is the all-zero seed.
    Seeded,
    /// Input was the all-`Z` code; the counter wrapped to all-zero.
    Wrapped,
}

/// A generated code tagged with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NextCode {
    pub code: Code,
    pub advance: CodeAdvance,
}

impl NextCode {
    /// True when the sequence was exhausted and wrapped to all-zero.
    ///
    /// A catalog must not hand out a wrapped code: `000` is already taken.
    #[inline]
    pub fn overflowed(&self) -> bool {
        self.advance == CodeAdvance::Wrapped
    }

    /// True when the input was unusable and a fresh seed was returned.
    #[inline]
    pub fn seed_applied(&self) -> bool {
        self.advance == CodeAdvance::Seeded
    }
}

// =============================================================================
// Code Policy
// =============================================================================

/// Which widths are accepted and which width seeds a fresh sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CodePolicy {
    /// Seed width when the input gives no usable width.
    pub default_width: usize,
    /// Widths accepted as a current code.
    pub allowed_widths: Vec<usize>,
}

impl Default for CodePolicy {
    fn default() -> Self {
        CodePolicy {
            default_width: DEFAULT_WIDTH,
            allowed_widths: DEFAULT_ALLOWED_WIDTHS.to_vec(),
        }
    }
}

impl CodePolicy {
    /// Creates a policy, checking that the default width is itself allowed.
    pub fn new(default_width: usize, allowed_widths: Vec<usize>) -> Result<Self, CodeError> {
        if let Some(&width) = allowed_widths.iter().find(|&&w| w == 0) {
            return Err(CodeError::InvalidWidth { width });
        }
        if default_width == 0 || !allowed_widths.contains(&default_width) {
            return Err(CodeError::InvalidWidth {
                width: default_width,
            });
        }

        Ok(CodePolicy {
            default_width,
            allowed_widths,
        })
    }

    /// A policy accepting exactly one width.
    pub fn fixed(width: usize) -> Result<Self, CodeError> {
        Self::new(width, vec![width])
    }

    /// Checks if a width is accepted.
    #[inline]
    pub fn allows_width(&self, width: usize) -> bool {
        self.allowed_widths.contains(&width)
    }

    /// Strict successor: surfaces bad input and exhaustion as errors.
    ///
    /// Leading and trailing whitespace is ignored.
    pub fn try_advance(&self, current: &str) -> Result<Code, CodeError> {
        let current = current.trim();
        let width = current.chars().count();

        if width == 0 {
            return Err(CodeError::InvalidSeed {
                input: current.to_string(),
                reason: "code is empty".to_string(),
            });
        }

        if !self.allows_width(width) {
            return Err(CodeError::InvalidSeed {
                input: current.to_string(),
                reason: format!(
                    "width {} is not allowed (expected one of {:?})",
                    width, self.allowed_widths
                ),
            });
        }

        let (next, wrapped) = Code::parse(current)?.successor();
        if wrapped {
            return Err(CodeError::Overflow { width });
        }

        Ok(next)
    }

    /// Lenient successor: never fails, tags the outcome.
    ///
    /// - valid code → successor, [`CodeAdvance::Incremented`]
    /// - `None`, empty, wrong width, foreign characters → all-zero seed,
    ///   [`CodeAdvance::Seeded`]. The seed keeps the input's width when that
    ///   width is allowed, otherwise uses `default_width`.
    /// - all-`Z` → all-zero, [`CodeAdvance::Wrapped`]
    pub fn advance(&self, current: Option<&str>) -> NextCode {
        let input = current.unwrap_or("").trim();

        match self.try_advance(input) {
            Ok(code) => NextCode {
                code,
                advance: CodeAdvance::Incremented,
            },
            Err(CodeError::Overflow { width }) => {
                warn!(input, width, "Code sequence exhausted, wrapping to zero");
                NextCode {
                    code: Code::repeat(b'0', width),
                    advance: CodeAdvance::Wrapped,
                }
            }
            Err(err) => {
                let width = self.seed_width(input);
                debug!(input, width, error = %err, "Unusable code, applying seed");
                NextCode {
                    code: Code::repeat(b'0', width),
                    advance: CodeAdvance::Seeded,
                }
            }
        }
    }

    fn seed_width(&self, input: &str) -> usize {
        let width = input.chars().count();
        if self.allows_width(width) {
            width
        } else {
            self.default_width.max(1)
        }
    }
}

/// Lenient successor under the default policy (widths 2 and 3, seed `000`).
///
/// ## Example
/// ```rust
/// use erpkit_core::code::next_code;
///
/// assert_eq!(next_code("00Z"), "010");
/// assert_eq!(next_code("ZZ"), "00");
/// assert_eq!(next_code("ABCD"), "000");
/// ```
pub fn next_code(current: &str) -> String {
    CodePolicy::default().advance(Some(current)).code.into_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
