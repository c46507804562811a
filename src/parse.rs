//! Parser combinators for the grammars of dice notation: the nesting structure of a whole expression, single
//! operands within a group, and the arithmetic over a group once its dice have been rolled.

use alloc::{boxed::Box, string::String, vec::Vec};

use chumsky::prelude::*;

use crate::{
	expr::{Expr, Op},
	number::{Number, FRACTION_SLASH},
	reduce::Piece,
	resolve::Node,
	token::{self, DieTerm, Token},
};

/// Generates a parser for an unsigned numeral like "42", "3.5", or "1⁄3", yielding its leading digits and, if
/// present, the separator and digits after it.
fn numeral<'src>(
) -> impl Parser<'src, &'src str, (String, Option<(char, String)>), extra::Err<Rich<'src, char>>> + Clone {
	let digits = any().filter(char::is_ascii_digit).repeated().at_least(1).collect::<String>();
	let separator = just('.').or(just(FRACTION_SLASH));
	digits.clone().then(separator.then(digits).or_not())
}

/// Converts the pieces of a numeral into a number.
fn numeral_value(negative: bool, (int, rest): (String, Option<(char, String)>)) -> Option<Number> {
	match rest {
		None => Number::from_decimal(negative, &int, None),
		Some(('.', frac)) => Number::from_decimal(negative, &int, Some(&frac)),
		Some((_, denom)) => Number::from_fraction(negative, &int, &denom),
	}
}

/// Generates a parser for an unsigned number.
fn unsigned<'src>() -> impl Parser<'src, &'src str, Number, extra::Err<Rich<'src, char>>> + Clone {
	numeral().try_map(|numeral, span| {
		numeral_value(false, numeral).ok_or_else(|| Rich::custom(span, "number does not fit in 64 bits"))
	})
}

/// Generates a parser for a numeric literal with an optional leading minus sign (any of the [`MINUS_SIGNS`]).
///
/// [`MINUS_SIGNS`]: token::MINUS_SIGNS
pub fn literal<'src>() -> impl Parser<'src, &'src str, Number, extra::Err<Rich<'src, char>>> + Clone {
	any()
		.filter(|c: &char| token::is_minus(*c))
		.or_not()
		.then(numeral())
		.try_map(|(sign, numeral), span| {
			numeral_value(sign.is_some(), numeral).ok_or_else(|| Rich::custom(span, "literal does not fit in 64 bits"))
		})
}

/// Generates a parser that handles die terms like "d20", "3d8", "2d%", "d‰", and "d‱".
pub fn die_term<'src>() -> impl Parser<'src, &'src str, DieTerm, extra::Err<Rich<'src, char>>> + Clone {
	// Percentile, permille, and permyriad sigils stand in for the number of sides
	let sides = choice((
		unsigned(),
		just('%').to(Number::from_integer(100)),
		just('‰').to(Number::from_integer(1000)),
		just('‱').to(Number::from_integer(10_000)),
	));

	unsigned()
		.or_not()
		.then_ignore(just('d').or(just('D')))
		.then(sides)
		.map(|(count, sides)| DieTerm { count, sides })
}

/// Generates a parser that classifies a complete operand of a group and expects end of input.
pub fn operand<'src>() -> impl Parser<'src, &'src str, Token, extra::Err<Rich<'src, char>>> + Clone {
	choice((die_term().map(Token::Die), literal().map(Token::Num))).then_ignore(end())
}

/// Generates a parser for the nesting structure of an expression: runs of text interleaved with parenthesized
/// groups, which contain the same structure recursively.
pub fn nodes<'src>() -> impl Parser<'src, &'src str, Vec<Node>, extra::Err<Rich<'src, char>>> + Clone {
	recursive(|nodes| {
		let text = any()
			.filter(|c: &char| *c != '(' && *c != ')')
			.repeated()
			.at_least(1)
			.collect::<String>()
			.map(Node::Text);
		let group = nodes.delimited_by(just('('), just(')')).map(Node::Group);

		text.or(group).repeated().collect::<Vec<_>>()
	})
}

/// Generates a parser for the nesting structure of a whole expression and expects end of input.
pub fn expression<'src>() -> impl Parser<'src, &'src str, Vec<Node>, extra::Err<Rich<'src, char>>> + Clone {
	nodes().then_ignore(end())
}

/// Generates a parser that builds an arithmetic tree from a group's expanded pieces: a chain of additions and
/// subtractions over chains of multiplications and divisions, each applied from left to right. Every piece must be
/// a number or an operator, and they must alternate.
pub fn arithmetic<'src>() -> impl Parser<'src, &'src [Piece], Expr> + Clone {
	let operand = select! { Piece::Num(val) => Expr::Num(val) };

	// Parser for multiplication and division operators
	let product_op = select! {
		Piece::Op('*' | '×') => Op::Mul,
		Piece::Op('/' | '÷') => Op::Div,
	};

	// Parser for addition and subtraction operators
	let sum_op = select! {
		Piece::Op('+') => Op::Add,
		Piece::Op('-' | '–' | '—' | '−') => Op::Sub,
	};

	let product = operand
		.clone()
		.then(product_op.then(operand).repeated().collect::<Vec<_>>())
		.map(chain);

	product
		.clone()
		.then(sum_op.then(product).repeated().collect::<Vec<_>>())
		.map(chain)
		.then_ignore(end())
}

/// Joins a first operand and the operations after it, leaving a lone operand as it is.
fn chain((first, rest): (Expr, Vec<(Op, Expr)>)) -> Expr {
	if rest.is_empty() {
		first
	} else {
		Expr::Chain(Box::new(first), rest)
	}
}
