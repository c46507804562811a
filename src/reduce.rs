//! Reducing the text of a single group: rolling its dice, then calculating its arithmetic.

use alloc::{
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

use chumsky::Parser;

use crate::{
	dice::{Error as DiceError, Roller},
	engine::{Error, FormatError},
	number::Number,
	resolve::Node,
	token::{self, Token},
};

/// A token of a group after its dice have been rolled
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Piece {
	/// Number, either written out or a single rolled face
	Num(Number),

	/// Operator glyph
	Op(char),

	/// Faces of an explicitly counted die term, in roll order
	Sum(Vec<u32>),
}

impl Piece {
	/// Checks whether this piece introduces a new group that must be resolved before any arithmetic.
	#[must_use]
	#[inline]
	pub const fn is_nested(&self) -> bool {
		matches!(self, Self::Sum(..))
	}

	/// Converts the piece into nodes of the working expression.
	#[must_use]
	pub fn to_node(&self) -> Node {
		match self {
			Self::Num(val) => Node::Value(*val),
			Self::Op(op) => Node::Text(op.to_string()),
			Self::Sum(faces) => Node::Group(alloc::vec![Node::Text(join_faces(faces, "+"))]),
		}
	}
}

impl fmt::Display for Piece {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Num(val) => write!(f, "{val}"),
			Self::Op(op) => write!(f, "{op}"),
			Self::Sum(faces) => write!(f, "({})", join_faces(faces, " + ")),
		}
	}
}

/// Joins rolled faces with a separator.
fn join_faces(faces: &[u32], separator: &str) -> String {
	faces
		.iter()
		.map(|face| face.to_string())
		.collect::<Vec<_>>()
		.join(separator)
}

/// Tokenizes a group's text and rolls every die term in it.
///
/// # Errors
/// If a part of the text isn't supported, or a die term can't be rolled, an error variant is returned.
///
/// # Examples
/// ```
/// use dicetrace::{dice::roller::Iter as IterRoller, number::Number, reduce::{expand, Piece}};
///
/// let pieces = expand("2d6+d20", &mut IterRoller::new(vec![3, 5, 17]))?;
/// assert_eq!(pieces, vec![Piece::Sum(vec![3, 5]), Piece::Op('+'), Piece::Num(Number::from_integer(17))]);
/// # Ok::<(), dicetrace::engine::Error>(())
/// ```
pub fn expand<R: Roller>(text: &str, roller: &mut R) -> Result<Vec<Piece>, Error> {
	token::tokenize(text)?
		.into_iter()
		.map(|token| -> Result<Piece, Error> {
			Ok(match token {
				Token::Num(val) => Piece::Num(val),
				Token::Op(op) => Piece::Op(op),
				Token::Die(term) => {
					let dice = term.dice()?;
					let rolled = roller.roll(&dice)?;
					if term.wraps_expansion() {
						Piece::Sum(rolled.rolls)
					} else {
						// Without a written count there's exactly one face
						let total = Number::try_from(rolled.total()).map_err(|_err| DiceError::Range {
							count: dice.count.into(),
							sides: dice.sides.into(),
						})?;
						Piece::Num(total)
					}
				}
			})
		})
		.collect()
}

/// Renders pieces the way they're shown in the trace, separated by spaces.
#[must_use]
pub fn render(pieces: &[Piece]) -> String {
	pieces
		.iter()
		.map(|piece| piece.to_string())
		.collect::<Vec<_>>()
		.join(" ")
}

/// Calculates the value of a group's pieces. None of them may be nested.
///
/// # Errors
/// If the pieces don't alternate between numbers and operators, [`FormatError::Arity`] is returned.
/// Overflow and division by zero are reported as [`Error::Calc`].
///
/// # Examples
/// ```
/// use dicetrace::{number::Number, reduce::{fold, Piece}};
///
/// let num = |val: i64| Piece::Num(Number::from_integer(val));
/// let pieces = [num(1), Piece::Op('+'), num(2), Piece::Op('×'), num(3)];
/// assert_eq!(fold(&pieces)?, Number::from_integer(7));
/// # Ok::<(), dicetrace::engine::Error>(())
/// ```
pub fn fold(pieces: &[Piece]) -> Result<Number, Error> {
	let expr = crate::parse::arithmetic()
		.parse(pieces)
		.into_result()
		.map_err(|_errs| FormatError::Arity)?;
	tracing::trace!(%expr, "folding group");
	Ok(expr.calc()?)
}
