//! Evaluation of complete dice notation expressions, from raw text to a final value and a trace of every step.

use alloc::{
	format,
	string::{String, ToString},
};

#[cfg(feature = "os-rng")]
use crate::dice::roller::OsRandom;
use crate::{
	dice::{Error as DiceError, Roller},
	expr::CalcError,
	number::Number,
	reduce,
	resolve::Expression,
	token::UnsupportedToken,
	trace::{self, Trace},
};

/// Input that asks for the list of supported notation instead of a roll
pub const SUPPORTED_KEYWORD: &str = "supported";

/// Description of the supported notation, sent in response to [`SUPPORTED_KEYWORD`]
pub const SUPPORTED_NOTATION: &str = "\
Supported notation (capital letters are numbers, brackets surround optional parts):
- A (whole or decimal numbers, optionally negative)
- +, -, *, ×, /, ÷ and parentheses
- [A]dB, e.g. d20 or 3d8
- [A]d%, [A]d‰, [A]d‱ for d100, d1000 and d10000
Up to 65536 dice with 2 to 65536 sides each can be rolled at once.";

/// Limits applied while evaluating and formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Limits {
	/// Deepest parenthesis nesting accepted, counting the synthetic outer group
	pub max_depth: usize,

	/// Longest trace, in characters, shown in full
	pub trace_budget: usize,

	/// Characters kept from each end of a trace that exceeds its budget
	pub trace_keep: usize,

	/// Longest echoed input, in characters, shown in full
	pub echo_budget: usize,
}

impl Limits {
	/// Creates the default limits.
	#[must_use]
	pub const fn new() -> Self {
		Self {
			max_depth: 128,
			trace_budget: 1020,
			trace_keep: 500,
			echo_budget: 255,
		}
	}

	/// Sets the deepest parenthesis nesting accepted.
	#[must_use]
	pub const fn max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Sets the longest trace shown in full, and how much of each end is kept from a longer one.
	#[must_use]
	pub const fn trace_budget(mut self, budget: usize, keep: usize) -> Self {
		self.trace_budget = budget;
		self.trace_keep = keep;
		self
	}

	/// Sets the longest echoed input shown in full.
	#[must_use]
	pub const fn echo_budget(mut self, budget: usize) -> Self {
		self.echo_budget = budget;
		self
	}
}

impl Default for Limits {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

/// The result of a successful evaluation, ready to display without further escaping
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Evaluation {
	/// Final value of the expression, as text
	pub title: String,

	/// Original input, escaped and shortened to the echo budget
	pub echoed_input: String,

	/// Every reduction step on its own line, escaped and shortened to the trace budget
	pub trace: String,

	/// Final value of the expression
	pub value: Number,
}

/// Response to a command argument
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Reply {
	/// The input asked for the supported notation
	Supported(&'static str),

	/// The input was evaluated
	Rolled(Evaluation),
}

/// Evaluates dice expressions with a [`Roller`].
///
/// # Examples
/// ```
/// use dicetrace::{dice::roller::Iter as IterRoller, Engine};
///
/// let mut engine = Engine::new(IterRoller::new(vec![4, 2]));
/// let evaluation = engine.evaluate("2d6 * 3")?;
/// assert_eq!(evaluation.title, "18");
/// assert_eq!(evaluation.trace, "(2d6\\*3)\n((4 + 2) \\* 3)\n((4 + 2)\\*3)\n(6\\*3)\n(6 \\* 3)\n18");
/// # Ok::<(), dicetrace::engine::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine<R> {
	/// Source of every die roll
	roller: R,

	/// Limits applied to every evaluation
	limits: Limits,
}

impl<R: Roller> Engine<R> {
	/// Creates an engine with the default limits.
	#[must_use]
	pub fn new(roller: R) -> Self {
		Self::with_limits(roller, Limits::default())
	}

	/// Creates an engine with specific limits.
	#[must_use]
	pub const fn with_limits(roller: R, limits: Limits) -> Self {
		Self { roller, limits }
	}

	/// Gets the limits applied to every evaluation.
	#[must_use]
	pub const fn limits(&self) -> &Limits {
		&self.limits
	}

	/// Gets the roller, e.g. to check whether a scripted roller has run dry.
	pub fn roller_mut(&mut self) -> &mut R {
		&mut self.roller
	}

	/// Responds to a command argument, answering [`SUPPORTED_KEYWORD`] with [`SUPPORTED_NOTATION`] and evaluating
	/// anything else.
	///
	/// # Errors
	/// See [`Self::evaluate()`].
	pub fn respond(&mut self, input: &str) -> Result<Reply, Error> {
		if input.trim() == SUPPORTED_KEYWORD {
			return Ok(Reply::Supported(SUPPORTED_NOTATION));
		}
		self.evaluate(input).map(Reply::Rolled)
	}

	/// Evaluates an expression: its groups are resolved from the most deeply nested outwards (left-most first), dice
	/// within each are rolled, and its arithmetic is folded with the usual precedence. Every rewrite is recorded.
	///
	/// # Errors
	/// Malformed input fails before any dice are rolled. Once resolution starts, any unsupported token, unrollable
	/// dice, overflow, or division by zero fails the whole evaluation.
	#[tracing::instrument(level = "debug", skip(self))]
	pub fn evaluate(&mut self, input: &str) -> Result<Evaluation, Error> {
		let input = input.trim();
		let mut expr = self.normalize(input)?;

		let mut trace = Trace::new(&self.limits);
		trace.record(&expr.to_string());

		// The outer group is always the last one folded, so the last value is the final one
		let mut value = None;

		while let Some(path) = expr.next_group() {
			let text = expr.group_text(&path).unwrap_or_default();
			let pieces = reduce::expand(&text, &mut self.roller)?;

			expr.show_in_group(&path, reduce::render(&pieces));
			trace.record(&expr.to_string());

			if pieces.iter().any(reduce::Piece::is_nested) {
				// Rolled sums become groups of their own and are resolved before this group's arithmetic
				expr.fill_group(&path, pieces.iter().map(reduce::Piece::to_node).collect());
				continue;
			}

			let folded = reduce::fold(&pieces)?;
			expr.collapse_group(&path, folded);
			trace.record(&expr.to_string());
			value = Some(folded);
		}

		// Normalizing adds the outer group and it is always folded, so `value` is set by now
		let value = value.ok_or(FormatError::Arity)?;
		let title = expr.to_string();
		tracing::debug!(%title, steps = trace.step_count(), "evaluated expression");

		Ok(Evaluation {
			title,
			echoed_input: trace::bound_echo(&trace::escape(input), self.limits.echo_budget),
			trace: trace.render(),
			value,
		})
	}

	/// Strips whitespace, wraps the input in an outer group, and checks that it's worth resolving.
	fn normalize(&self, input: &str) -> Result<Expression, FormatError> {
		let compact = input.chars().filter(|c| !c.is_whitespace()).collect::<String>();
		let wrapped = format!("({compact})");

		if wrapped.matches('(').count() != wrapped.matches(')').count() {
			return Err(FormatError::Unbalanced);
		}
		if !wrapped.chars().any(is_roll_sigil) {
			return Err(FormatError::NothingToRoll);
		}

		let depth = max_depth(&wrapped);
		if depth > self.limits.max_depth {
			return Err(FormatError::TooDeep {
				depth,
				max: self.limits.max_depth,
			});
		}

		if closes_early(&wrapped) {
			return Err(FormatError::Misplaced);
		}
		Expression::parse(&wrapped).ok_or(FormatError::Misplaced)
	}
}

/// Evaluates an expression using the operating system's random source and the default limits.
///
/// # Errors
/// See [`Engine::evaluate()`].
///
/// # Examples
/// ```
/// let evaluation = dicetrace::evaluate("(1+2)*3")?;
/// assert_eq!(evaluation.title, "9");
///
/// assert!(dicetrace::evaluate("(1+2").is_err());
/// # Ok::<(), dicetrace::engine::Error>(())
/// ```
#[cfg(feature = "os-rng")]
pub fn evaluate(input: &str) -> Result<Evaluation, Error> {
	Engine::new(OsRandom).evaluate(input)
}

/// Checks whether a character shows that the input has something to roll or calculate.
fn is_roll_sigil(c: char) -> bool {
	c.is_ascii_digit() || matches!(c, '%' | '‰' | '‱' | 'd' | 'D' | 'f' | 'F' | 'b' | 'B')
}

/// Finds the deepest parenthesis nesting in some text.
fn max_depth(text: &str) -> usize {
	let mut depth = 0_usize;
	let mut max = 0;
	for c in text.chars() {
		match c {
			'(' => {
				depth = depth.saturating_add(1);
				max = max.max(depth);
			}
			')' => depth = depth.saturating_sub(1),
			_ => {}
		}
	}
	max
}

/// Checks whether the outer group closes before the end of the text, as in `(1)+(2)`, or a group closes before it
/// opens.
fn closes_early(wrapped: &str) -> bool {
	let mut depth = 0_isize;
	let last = wrapped.chars().count().saturating_sub(1);
	wrapped.chars().enumerate().any(|(idx, c)| {
		match c {
			'(' => depth = depth.saturating_add(1),
			')' => depth = depth.saturating_sub(1),
			_ => {}
		}
		depth < 0 || (depth == 0 && idx < last)
	})
}

/// Ways an expression can be malformed
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatError {
	/// The numbers of opening and closing parentheses differ.
	#[error("unbalanced parentheses")]
	Unbalanced,

	/// There isn't a single digit or die sigil.
	#[error("nothing to roll or calculate")]
	NothingToRoll,

	/// Parentheses are nested more deeply than allowed.
	#[error("parentheses nested {depth} deep (at most {max} allowed)")]
	TooDeep {
		/// Deepest nesting found
		depth: usize,

		/// Deepest nesting allowed
		max: usize,
	},

	/// The parentheses are balanced in number but a group closes before it opens.
	/// Input such as `1)+(2` counts too, since it would close the outer group early.
	#[error("misplaced parentheses")]
	Misplaced,

	/// Numbers and operators don't alternate.
	///
	/// [`Engine::evaluate()`] never reports this: splitting a group always alternates numbers and operators, and
	/// anything else is an [`Error::UnsupportedToken`]. It comes from [`reduce::fold()`] given pieces built by hand.
	#[error("numbers and operators don't alternate")]
	Arity,
}

/// Error that can occur during [`Engine::evaluate()`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// Malformed or pathological input
	#[error("malformed expression: {0}")]
	Format(#[from] FormatError),

	/// Part of a group that is not a number, operator, or die term
	#[error(transparent)]
	UnsupportedToken(#[from] UnsupportedToken),

	/// Dice that can't be rolled
	#[error("dice error: {0}")]
	Dice(#[from] DiceError),

	/// Overflow or division by zero
	#[error("calculation error: {0}")]
	Calc(#[from] CalcError),
}

impl Error {
	/// Gets the broad category of the error.
	///
	/// # Examples
	/// ```
	/// use dicetrace::{dice::roller::Max as MaxRoller, engine::ErrorKind, Engine};
	///
	/// let mut engine = Engine::new(MaxRoller);
	/// assert_eq!(engine.evaluate("1 + x").unwrap_err().kind(), ErrorKind::UnsupportedToken);
	/// assert_eq!(engine.evaluate("0d6").unwrap_err().kind(), ErrorKind::Range);
	/// ```
	#[must_use]
	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::Format(..) => ErrorKind::Format,
			Self::UnsupportedToken(..) => ErrorKind::UnsupportedToken,
			Self::Dice(DiceError::Range { .. }) => ErrorKind::Range,
			Self::Dice(DiceError::Type { .. }) => ErrorKind::Type,
			Self::Calc(..) => ErrorKind::Arithmetic,
		}
	}
}

/// Broad category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
	/// Unbalanced, misplaced, or too deeply nested parentheses, or nothing to roll
	Format,

	/// Something that isn't a number, operator, or die term
	UnsupportedToken,

	/// Dice count or sides out of range
	Range,

	/// Dice count or sides not whole
	Type,

	/// Overflow or division by zero
	Arithmetic,
}
