//! Recording every rewrite of an expression and formatting bounded previews of it for display.

use alloc::{collections::VecDeque, string::String};

use crate::engine::Limits;

/// Characters that rich-text chat renderers treat as markup
pub const MARKDOWN_SPECIAL: [char; 6] = ['\\', '*', '_', '~', '`', '|'];

/// Marker placed between the head and tail of a truncated trace
const TRACE_ELLIPSIS: &str = "\n...\n";

/// Marker placed at the end of a truncated echo
const ECHO_ELLIPSIS: &str = "...";

/// Snapshots of a full expression, one after each substitution, joined by newlines and escaped as they arrive.
///
/// Only as much text is held as the trace budget can ever show: the first `trace_budget` characters and a rolling
/// window of the last `trace_keep`. Long evaluations therefore record in constant space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
	/// Leading characters, up to the larger of the budget and the kept length
	head: String,

	/// Number of characters in `head`
	head_len: usize,

	/// Trailing characters, at most the kept length
	tail: VecDeque<char>,

	/// Number of characters recorded in total
	len: usize,

	/// Number of snapshots recorded
	steps: usize,

	/// Longest trace shown in full
	budget: usize,

	/// Characters kept from each end of a trace over budget
	keep: usize,
}

impl Trace {
	/// Creates an empty trace bounded by the given limits.
	#[must_use]
	pub fn new(limits: &Limits) -> Self {
		Self {
			head: String::new(),
			head_len: 0,
			tail: VecDeque::with_capacity(limits.trace_keep),
			len: 0,
			steps: 0,
			budget: limits.trace_budget,
			keep: limits.trace_keep,
		}
	}

	/// Records a snapshot of the expression.
	pub fn record(&mut self, step: &str) {
		tracing::debug!(%step, "recorded reduction step");
		if self.steps > 0 {
			self.push('\n');
		}
		for c in step.chars() {
			if MARKDOWN_SPECIAL.contains(&c) {
				self.push('\\');
			}
			self.push(c);
		}
		self.steps = self.steps.saturating_add(1);
	}

	/// Gets the number of recorded snapshots.
	#[must_use]
	pub const fn step_count(&self) -> usize {
		self.steps
	}

	/// Gets the length in characters of the full escaped trace, before any shortening.
	#[must_use]
	pub const fn char_count(&self) -> usize {
		self.len
	}

	/// Builds the display form of the trace: one escaped snapshot per line. If that is longer than the budget, only
	/// the first and last kept characters are shown, joined by a line holding only `...`.
	///
	/// # Examples
	/// ```
	/// use dicetrace::{engine::Limits, trace::Trace};
	///
	/// let mut trace = Trace::new(&Limits::default());
	/// trace.record("(2*3)");
	/// trace.record("(2 * 3)");
	/// trace.record("6");
	/// assert_eq!(trace.render(), "(2\\*3)\n(2 \\* 3)\n6");
	///
	/// let mut short = Trace::new(&Limits::new().trace_budget(10, 2));
	/// short.record("abcdefghijkl");
	/// assert_eq!(short.render(), "ab\n...\nkl");
	/// ```
	#[must_use]
	pub fn render(&self) -> String {
		if self.len <= self.budget {
			return self.head.clone();
		}

		let mut bounded = self.head.chars().take(self.keep).collect::<String>();
		bounded.push_str(TRACE_ELLIPSIS);
		bounded.extend(self.tail.iter());
		bounded
	}

	/// Appends one character of the escaped trace.
	fn push(&mut self, c: char) {
		if self.head_len < self.budget.max(self.keep) {
			self.head.push(c);
			self.head_len = self.head_len.saturating_add(1);
		}
		if self.keep > 0 {
			if self.tail.len() == self.keep {
				self.tail.pop_front();
			}
			self.tail.push_back(c);
		}
		self.len = self.len.saturating_add(1);
	}
}

/// Escapes every [`MARKDOWN_SPECIAL`] character with a backslash.
///
/// # Examples
/// ```
/// use dicetrace::trace::escape;
///
/// assert_eq!(escape("2*d_6"), "2\\*d\\_6");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		if MARKDOWN_SPECIAL.contains(&c) {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped
}

/// Shortens text longer than `budget` characters so that, with a trailing `...`, it is exactly `budget` characters.
///
/// # Examples
/// ```
/// use dicetrace::trace::bound_echo;
///
/// assert_eq!(bound_echo("1d20 + 4", 10), "1d20 + 4");
/// assert_eq!(bound_echo("1d20 + 4 + 2d6", 10), "1d20 + ...");
/// ```
#[must_use]
pub fn bound_echo(text: &str, budget: usize) -> String {
	if text.chars().count() <= budget {
		return text.into();
	}

	let mut bounded = text
		.chars()
		.take(budget.saturating_sub(ECHO_ELLIPSIS.len()))
		.collect::<String>();
	bounded.push_str(ECHO_ELLIPSIS);
	bounded
}
