//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". For dice as they appear inside an expression, see
//! [`DieTerm`].
//!
//! [`DieTerm`]: crate::token::DieTerm

pub mod roller;

use alloc::{
	borrow::Cow,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

pub use self::roller::Roller;
use crate::number::Number;

/// Largest number of dice that can be rolled at once
pub const MAX_COUNT: u32 = 65536;

/// Smallest number of sides a die can have
pub const MIN_SIDES: u32 = 2;

/// Largest number of sides a die can have
pub const MAX_SIDES: u32 = 65536;

/// A set of one or more rollable dice with a specific number of sides.
///
/// Dice can be created with any values, but only a count in `1..=65536` and sides in `2..=65536` can be rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_structs)]
pub struct Dice {
	/// Number of dice to roll
	pub count: u32,

	/// Number of sides for each die
	pub sides: u32,
}

impl Dice {
	/// Creates a new set of dice with a given count and number of sides.
	#[must_use]
	pub const fn new(count: u32, sides: u32) -> Self {
		Self { count, sides }
	}

	/// Checks that the dice can be rolled.
	///
	/// # Errors
	/// If the count or sides are outside of the rollable range, [`Error::Range`] is returned.
	///
	/// # Examples
	/// ```
	/// use dicetrace::dice::{Dice, Error};
	///
	/// assert!(Dice::new(3, 8).check().is_ok());
	/// assert!(matches!(Dice::new(0, 6).check(), Err(Error::Range { .. })));
	/// assert!(matches!(Dice::new(1, 1).check(), Err(Error::Range { .. })));
	/// ```
	pub fn check(&self) -> Result<(), Error> {
		if (1..=MAX_COUNT).contains(&self.count) && (MIN_SIDES..=MAX_SIDES).contains(&self.sides) {
			Ok(())
		} else {
			Err(Error::Range {
				count: self.count.into(),
				sides: self.sides.into(),
			})
		}
	}

	/// Creates dice from numeric values, as found in an expression.
	/// Range is validated before integrality, so `0.5` reports a range problem while `1.5` reports a type problem.
	///
	/// # Errors
	/// [`Error::Range`] if either value is outside of the rollable range, [`Error::Type`] if either value has a
	/// fractional part.
	///
	/// # Examples
	/// ```
	/// use dicetrace::{dice::{Dice, Error}, number::Number};
	///
	/// let dice = Dice::from_values(Number::from_integer(2), Number::from_integer(6))?;
	/// assert_eq!(dice, Dice::new(2, 6));
	///
	/// let three_halves = Number::from_integer(3).checked_div(&Number::from_integer(2)).unwrap();
	/// assert!(matches!(Dice::from_values(three_halves, Number::from_integer(6)), Err(Error::Type { .. })));
	/// # Ok::<(), dicetrace::dice::Error>(())
	/// ```
	pub fn from_values(count: Number, sides: Number) -> Result<Self, Error> {
		let count_range = Number::from_integer(1)..=Number::from(MAX_COUNT);
		let sides_range = Number::from(MIN_SIDES)..=Number::from(MAX_SIDES);
		if !count_range.contains(&count) || !sides_range.contains(&sides) {
			return Err(Error::Range { count, sides });
		}

		match (count.to_u32(), sides.to_u32()) {
			(Some(count), Some(sides)) => Ok(Self::new(count, sides)),
			_ => Err(Error::Type { count, sides }),
		}
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)
	}
}

/// Representation of the result from rolling [`Dice`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Rolled<'a> {
	/// Each individual face that was rolled, in roll order
	pub rolls: Vec<u32>,

	/// Dice that were rolled to produce this
	pub dice: Cow<'a, Dice>,
}

impl Rolled<'_> {
	/// Calculates the total of all roll values. With at most 65536 faces of at most 65536 each, the sum always
	/// fits.
	///
	/// # Examples
	/// ```
	/// use dicetrace::dice::{roller::{Iter as IterRoller, Roller}, Dice};
	///
	/// let dice = Dice::new(3, 8);
	/// let rolled = IterRoller::new(vec![2, 8, 5]).roll(&dice)?;
	/// assert_eq!(rolled.total(), 15);
	/// # Ok::<(), dicetrace::dice::Error>(())
	/// ```
	#[must_use]
	pub fn total(&self) -> u64 {
		self.rolls.iter().copied().map(u64::from).sum()
	}

	/// Creates a new rolled set of dice from a given set of dice and an iterator of faces.
	#[must_use]
	pub fn from_dice_and_rolls(dice: &Dice, rolls: impl IntoIterator<Item = u32>) -> Rolled<'_> {
		Rolled {
			rolls: rolls.into_iter().collect(),
			dice: Cow::Borrowed(dice),
		}
	}

	/// Builds a string of the dice the roll is from and a list of the individual faces.
	///
	/// If `list_limit` is specified and there are more rolls than it, the list is truncated and appended with
	/// "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use dicetrace::dice::{Dice, Rolled};
	///
	/// let dice = Dice::new(4, 6);
	/// let rolled = Rolled::from_dice_and_rolls(&dice, [6, 2, 5, 3]);
	/// assert_eq!(rolled.describe(None), "4d6[6, 2, 5, 3]");
	/// assert_eq!(rolled.describe(Some(2)), "4d6[6, 2, 2 more...]");
	/// ```
	#[must_use]
	pub fn describe(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated_rolls = self.rolls.len().saturating_sub(list_limit);

		format!(
			"{}[{}{}]",
			self.dice,
			self.rolls
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated_rolls > 0 {
				format!(", {truncated_rolls} more...")
			} else {
				String::new()
			}
		)
	}
}

impl fmt::Display for Rolled<'_> {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The count or sides are outside of the rollable range (count 1-65536, sides 2-65536).
	#[error("{count}d{sides} is outside of the rollable range")]
	Range {
		/// Requested number of dice
		count: Number,

		/// Requested number of sides
		sides: Number,
	},

	/// The count or sides aren't whole numbers.
	#[error("{count}d{sides} does not describe a whole number of dice and sides")]
	Type {
		/// Requested number of dice
		count: Number,

		/// Requested number of sides
		sides: Number,
	},
}
