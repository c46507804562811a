//! Splitting the text of a single group into tokens and classifying them.

use alloc::{string::String, vec::Vec};
use core::fmt;

use chumsky::Parser;

use crate::{
	dice::{Dice, Error as DiceError},
	number::Number,
	parse,
};

/// Every character that acts as an arithmetic operator
pub const OPERATORS: [char; 9] = ['+', '-', '–', '—', '−', '*', '×', '/', '÷'];

/// Operator characters that also serve as a negative sign in front of a literal
pub const MINUS_SIGNS: [char; 4] = ['-', '–', '—', '−'];

/// Operators that keep the operator before them from being a split point
const NON_SIGN_OPERATORS: [char; 5] = ['+', '*', '×', '/', '÷'];

/// Checks whether a character is one of the arithmetic [`OPERATORS`].
#[must_use]
#[inline]
pub fn is_operator(c: char) -> bool {
	OPERATORS.contains(&c)
}

/// Checks whether a character is one of the [`MINUS_SIGNS`].
#[must_use]
#[inline]
pub fn is_minus(c: char) -> bool {
	MINUS_SIGNS.contains(&c)
}

/// A single classified piece of a group's text
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Token {
	/// Numeric literal, optionally signed
	Num(Number),

	/// Operator, kept as the exact glyph that was written
	Op(char),

	/// Dice to roll
	Die(DieTerm),
}

/// A die term such as `d20`, `3d8`, or `2d%`, before it has been validated or rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct DieTerm {
	/// Number of dice, if it was written out
	pub count: Option<Number>,

	/// Number of sides per die (sigils already resolved)
	pub sides: Number,
}

impl DieTerm {
	/// Whether the rolled faces are spliced back as a parenthesized sum.
	///
	/// Only terms with an explicitly written count are wrapped: `2d6` becomes `(3 + 5)` while `d6` becomes a bare
	/// `4`. A bare face needs no protection from surrounding multiplication, but `1d6` is still wrapped.
	#[must_use]
	#[inline]
	pub const fn wraps_expansion(&self) -> bool {
		self.count.is_some()
	}

	/// Validates the term into rollable dice.
	///
	/// # Errors
	/// See [`Dice::from_values()`].
	pub fn dice(&self) -> Result<Dice, DiceError> {
		Dice::from_values(self.count.unwrap_or(Number::from_integer(1)), self.sides)
	}
}

impl fmt::Display for DieTerm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.count {
			Some(count) => write!(f, "{count}d{}", self.sides),
			None => write!(f, "d{}", self.sides),
		}
	}
}

/// A part of a group that matches none of the supported grammars (number, operator, die term)
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported token: \"{0}\"")]
#[allow(clippy::exhaustive_structs)]
pub struct UnsupportedToken(pub String);

/// Splits a group's text at its operators, keeping each operator as its own part.
///
/// The result always alternates operand, operator, operand, and so on, starting and ending with an operand.
/// Operands may be empty. An operator character only splits when a non-operator character comes right before it
/// and the character right after it isn't one of `+ * × / ÷`. That keeps a sign glued to its literal in `3*-2`,
/// `3--2`, or a leading `-3`, and leaves runs like `3++2` unsplit (and therefore unsupported).
///
/// # Examples
/// ```
/// use dicetrace::token::split;
///
/// assert_eq!(split("2d6+-3"), vec!["2d6", "+", "-3"]);
/// assert_eq!(split("3--2"), vec!["3", "-", "-2"]);
/// assert_eq!(split("-3×2"), vec!["-3", "×", "2"]);
/// assert_eq!(split("3++2"), vec!["3++2"]);
/// assert_eq!(split("4-"), vec!["4", "-", ""]);
/// ```
#[must_use]
pub fn split(text: &str) -> Vec<&str> {
	let chars = text.char_indices().collect::<Vec<_>>();
	let mut parts = Vec::new();
	let mut start = 0;

	for (idx, &(pos, c)) in chars.iter().enumerate() {
		if !is_operator(c) {
			continue;
		}

		let prev = idx.checked_sub(1).and_then(|prev| chars.get(prev)).map(|&(_, c)| c);
		let next = chars.get(idx.saturating_add(1)).map(|&(_, c)| c);
		let splits = prev.is_some_and(|prev| !is_operator(prev)) && !next.is_some_and(|next| NON_SIGN_OPERATORS.contains(&next));

		if splits {
			let end = pos.saturating_add(c.len_utf8());
			parts.push(&text[start..pos]);
			parts.push(&text[pos..end]);
			start = end;
		}
	}

	parts.push(&text[start..]);
	parts
}

/// Splits and classifies a group's text.
///
/// # Errors
/// If any operand is not a literal or die term, [`UnsupportedToken`] is returned with that operand.
///
/// # Examples
/// ```
/// use dicetrace::{number::Number, token::{tokenize, Token}};
///
/// let tokens = tokenize("2d%×-3")?;
/// assert!(matches!(tokens[0], Token::Die(term) if term.sides == Number::from_integer(100)));
/// assert_eq!(tokens[1], Token::Op('×'));
/// assert_eq!(tokens[2], Token::Num(Number::from_integer(-3)));
///
/// assert!(tokenize("1+x").is_err());
/// # Ok::<(), dicetrace::token::UnsupportedToken>(())
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token>, UnsupportedToken> {
	split(text)
		.into_iter()
		.enumerate()
		.map(|(idx, part)| {
			if idx % 2 == 1 {
				// Odd positions are always the operator that was split on
				part.chars().next().map(Token::Op).ok_or_else(|| UnsupportedToken(part.into()))
			} else {
				parse::operand()
					.parse(part)
					.into_result()
					.map_err(|_errs| UnsupportedToken(part.into()))
			}
		})
		.collect()
}
