//! AST-like data structure for calculating the arithmetic of a single group once its dice have been rolled.

use alloc::{boxed::Box, vec::Vec};
use core::fmt;

use crate::number::Number;

/// Arithmetic operation between two values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Op {
	/// Sum
	Add,

	/// Difference
	Sub,

	/// Product
	Mul,

	/// Exact quotient
	Div,
}

impl Op {
	/// Checks whether this is multiplication or division.
	#[must_use]
	pub const fn is_multiplicative(self) -> bool {
		matches!(self, Self::Mul | Self::Div)
	}

	/// Applies the operation to two numbers.
	///
	/// # Errors
	/// If there is an overflow or a division by zero, an error variant will be returned.
	pub fn apply(self, lhs: Number, rhs: Number) -> Result<Number, CalcError> {
		let result = match self {
			Self::Add => lhs.checked_add(&rhs),
			Self::Sub => lhs.checked_sub(&rhs),
			Self::Mul => lhs.checked_mul(&rhs),
			Self::Div if rhs == Number::from_integer(0) => return Err(CalcError::Division(lhs)),
			Self::Div => lhs.checked_div(&rhs),
		};
		result.ok_or(CalcError::Overflow { lhs, op: self, rhs })
	}
}

impl fmt::Display for Op {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let glyph = match self {
			Self::Add => '+',
			Self::Sub => '-',
			Self::Mul => '*',
			Self::Div => '/',
		};
		write!(f, "{glyph}")
	}
}

/// Individual elements of a group's arithmetic.
///
/// Runs of operations with the same precedence are kept flat in a [`Chain`](Self::Chain) rather than nested, so a
/// group holding thousands of rolled faces stays shallow.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Expr {
	/// Standalone number
	Num(Number),

	/// First operand followed by operations applied from left to right
	Chain(Box<Self>, Vec<(Op, Self)>),
}

impl Expr {
	/// Calculates the final result of the expression and all of its children (if any).
	///
	/// # Errors
	/// If there is an overflow or a division by zero, an error variant will be returned.
	///
	/// # Examples
	/// ```
	/// use dicetrace::{expr::{Expr, Op}, number::Number};
	///
	/// let num = |val| Expr::Num(Number::from_integer(val));
	/// let expr = Expr::Chain(Box::new(num(7)), vec![(Op::Div, num(2))]);
	/// assert_eq!(expr.calc()?.to_string(), "3.5");
	/// # Ok::<(), dicetrace::expr::CalcError>(())
	/// ```
	pub fn calc(&self) -> Result<Number, CalcError> {
		match self {
			Self::Num(x) => Ok(*x),
			Self::Chain(first, rest) => rest
				.iter()
				.try_fold(first.calc()?, |acc, (op, rhs)| op.apply(acc, rhs.calc()?)),
		}
	}

	/// Checks whether this expression is a chain of additions and subtractions.
	#[must_use]
	pub fn is_additive(&self) -> bool {
		match self {
			Self::Chain(_, rest) => rest.iter().any(|(op, _)| !op.is_multiplicative()),
			Self::Num(..) => false,
		}
	}
}

impl fmt::Display for Expr {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// Operands are grouped with parentheses wherever leaving them out would change the result.
	///
	/// # Examples
	/// ```
	/// use dicetrace::{expr::{Expr, Op}, number::Number};
	///
	/// let num = |val| Expr::Num(Number::from_integer(val));
	/// let diff = Expr::Chain(Box::new(num(5)), vec![(Op::Sub, num(2))]);
	/// let expr = Expr::Chain(Box::new(diff), vec![(Op::Mul, num(3))]);
	/// assert_eq!(expr.to_string(), "(5 - 2) * 3");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Num(x) => write!(f, "{x}"),
			Self::Chain(first, rest) => {
				let multiplicative = rest.iter().any(|(op, _)| op.is_multiplicative());
				let wraps = |operand: &Self| match operand {
					Self::Num(..) => false,
					Self::Chain(..) => multiplicative || operand.is_additive(),
				};

				if multiplicative && first.is_additive() {
					write!(f, "({first})")?;
				} else {
					write!(f, "{first}")?;
				}
				for (op, operand) in rest {
					if wraps(operand) {
						write!(f, " {op} ({operand})")?;
					} else {
						write!(f, " {op} {operand}")?;
					}
				}
				Ok(())
			}
		}
	}
}

/// Error that can occur during [`Expr::calc()`]
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CalcError {
	/// Overflow of the 64-bit numerator or denominator
	#[error("overflow while calculating {lhs} {op} {rhs}")]
	Overflow {
		/// Left operand
		lhs: Number,

		/// Operation that overflowed
		op: Op,

		/// Right operand
		rhs: Number,
	},

	/// Division of a number by zero
	#[error("division by zero while calculating {0} / 0")]
	Division(Number),
}
