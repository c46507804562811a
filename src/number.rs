//! Exact numeric values that flow through expression reduction.

use core::fmt;

use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub};

/// Slash joining the numerator and denominator of an exact fraction literal such as `1⁄3` (U+2044, which is not an
/// arithmetic operator)
pub const FRACTION_SLASH: char = '⁄';

/// An exact rational value.
///
/// Literals are signed 64-bit integers (optionally with a decimal part), and division never truncates, so
/// `7 / 2` is exactly `3.5`. Every arithmetic operation is checked; `None` means overflow or division by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(clippy::exhaustive_structs)]
pub struct Number(pub Rational64);

impl Number {
	/// Creates a number from an integer.
	#[must_use]
	#[inline]
	pub const fn from_integer(val: i64) -> Self {
		Self(Rational64::new_raw(val, 1))
	}

	/// Builds a number from the pieces of a decimal literal: its sign, its integer digits, and its optional
	/// fractional digits. Returns `None` if a piece contains anything other than ASCII digits or the value doesn't
	/// fit in 64 bits.
	///
	/// # Examples
	/// ```
	/// use dicetrace::number::Number;
	///
	/// assert_eq!(Number::from_decimal(false, "42", None), Some(Number::from_integer(42)));
	/// assert_eq!(Number::from_decimal(true, "3", Some("5")).map(|n| n.to_string()).as_deref(), Some("-3.5"));
	/// assert_eq!(Number::from_decimal(false, "99999999999999999999", None), None);
	/// ```
	#[must_use]
	pub fn from_decimal(negative: bool, int: &str, frac: Option<&str>) -> Option<Self> {
		let mut numer: i64 = 0;
		let mut denom: i64 = 1;

		for c in int.chars() {
			numer = numer.checked_mul(10)?.checked_add(i64::from(c.to_digit(10)?))?;
		}
		for c in frac.unwrap_or_default().chars() {
			numer = numer.checked_mul(10)?.checked_add(i64::from(c.to_digit(10)?))?;
			denom = denom.checked_mul(10)?;
		}
		if negative {
			numer = numer.checked_neg()?;
		}

		Some(Self(Rational64::new(numer, denom)))
	}

	/// Builds a number from the digits of an exact fraction literal like `1⁄3`. Returns `None` if a piece contains
	/// anything other than ASCII digits, the denominator is zero, or a value doesn't fit in 64 bits.
	///
	/// # Examples
	/// ```
	/// use dicetrace::number::Number;
	///
	/// let third = Number::from_fraction(false, "1", "3").unwrap();
	/// assert_eq!(third.checked_mul(&Number::from_integer(3)), Some(Number::from_integer(1)));
	/// assert_eq!(Number::from_fraction(false, "1", "0"), None);
	/// ```
	#[must_use]
	pub fn from_fraction(negative: bool, numer: &str, denom: &str) -> Option<Self> {
		let numer = Self::from_decimal(negative, numer, None)?;
		let denom = Self::from_decimal(false, denom, None)?;
		if denom == Self::from_integer(0) {
			return None;
		}
		numer.checked_div(&denom)
	}

	/// Gets a lossless text form of the number that parses back to the same value: integers are written plainly and
	/// anything else as a fraction joined by [`FRACTION_SLASH`].
	///
	/// # Examples
	/// ```
	/// use dicetrace::number::Number;
	///
	/// let third = Number::from_integer(-1).checked_div(&Number::from_integer(3)).unwrap();
	/// assert_eq!(third.exact().to_string(), "-1⁄3");
	/// assert_eq!(Number::from_integer(12).exact().to_string(), "12");
	/// ```
	#[must_use]
	#[inline]
	pub const fn exact(self) -> Exact {
		Exact(self)
	}

	/// Checks whether the number has no fractional part.
	#[must_use]
	#[inline]
	pub fn is_integer(&self) -> bool {
		self.0.is_integer()
	}

	/// Converts the number to a `u32` if it is a non-negative integer that fits.
	#[must_use]
	pub fn to_u32(&self) -> Option<u32> {
		if self.is_integer() {
			u32::try_from(*self.0.numer()).ok()
		} else {
			None
		}
	}

	/// Adds two numbers, returning `None` on overflow.
	#[must_use]
	pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
		self.0.checked_add(&rhs.0).map(Self)
	}

	/// Subtracts `rhs` from this number, returning `None` on overflow.
	#[must_use]
	pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
		self.0.checked_sub(&rhs.0).map(Self)
	}

	/// Multiplies two numbers, returning `None` on overflow.
	#[must_use]
	pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
		self.0.checked_mul(&rhs.0).map(Self)
	}

	/// Divides this number by `rhs`, returning `None` on overflow or division by zero.
	#[must_use]
	pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
		self.0.checked_div(&rhs.0).map(Self)
	}
}

impl From<i64> for Number {
	#[inline]
	fn from(val: i64) -> Self {
		Self::from_integer(val)
	}
}

impl From<u32> for Number {
	#[inline]
	fn from(val: u32) -> Self {
		Self::from_integer(i64::from(val))
	}
}

impl TryFrom<u64> for Number {
	type Error = core::num::TryFromIntError;

	#[inline]
	fn try_from(val: u64) -> Result<Self, Self::Error> {
		i64::try_from(val).map(Self::from_integer)
	}
}

impl fmt::Display for Number {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// Integers are written plainly. Anything else is written as its closest decimal expansion, so this is meant
	/// for people to read. [`Number::exact()`] gives a lossless form.
	///
	/// # Examples
	/// ```
	/// use dicetrace::number::Number;
	///
	/// assert_eq!(Number::from_integer(-12).to_string(), "-12");
	/// let half = Number::from_integer(7).checked_div(&Number::from_integer(2)).unwrap();
	/// assert_eq!(half.to_string(), "3.5");
	/// ```
	#[expect(clippy::cast_precision_loss, reason = "Only used for display of non-integral values")]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_integer() {
			write!(f, "{}", self.0.numer())
		} else {
			write!(f, "{}", *self.0.numer() as f64 / *self.0.denom() as f64)
		}
	}
}

/// Lossless display adapter for a [`Number`], created by [`Number::exact()`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Exact(pub Number);

impl fmt::Display for Exact {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let ratio = self.0 .0;
		if ratio.is_integer() {
			write!(f, "{}", ratio.numer())
		} else {
			write!(f, "{}{FRACTION_SLASH}{}", ratio.numer(), ratio.denom())
		}
	}
}
