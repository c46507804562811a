use chumsky::Parser;

use crate::{
	dice::roller::Iter as IterRoller,
	engine::{Error, FormatError},
	expr::{CalcError, Expr, Op},
	number::Number,
	reduce::{expand, fold, render, Piece},
};

fn num(val: i64) -> Expr {
	Expr::Num(Number::from_integer(val))
}

fn chain(first: Expr, rest: impl IntoIterator<Item = (Op, Expr)>) -> Expr {
	Expr::Chain(Box::new(first), rest.into_iter().collect())
}

fn pieces(text: &str) -> Vec<Piece> {
	expand(text, &mut IterRoller::new(Vec::<u32>::new())).unwrap()
}

#[test]
fn basic_arithmetic() {
	assert_eq!(chain(num(42), [(Op::Add, num(69))]).calc(), Ok(Number::from_integer(111)));
	assert_eq!(chain(num(42), [(Op::Sub, num(69))]).calc(), Ok(Number::from_integer(-27)));
	assert_eq!(chain(num(42), [(Op::Mul, num(69))]).calc(), Ok(Number::from_integer(2898)));
	assert_eq!(chain(num(50), [(Op::Div, num(10))]).calc(), Ok(Number::from_integer(5)));
}

#[test]
fn division_is_exact() {
	let quotient = chain(num(50), [(Op::Div, num(11))]).calc().unwrap();
	assert!(!quotient.is_integer());
	assert_eq!(
		chain(num(7), [(Op::Div, num(2)), (Op::Mul, num(2))]).calc(),
		Ok(Number::from_integer(7))
	);
}

#[test]
fn division_by_zero() {
	let expr = chain(num(1), [(Op::Div, chain(num(2), [(Op::Sub, num(2))]))]);
	assert_eq!(expr.calc(), Err(CalcError::Division(Number::from_integer(1))));
}

#[test]
fn overflow() {
	assert_eq!(
		chain(num(i64::MAX), [(Op::Mul, num(2))]).calc(),
		Err(CalcError::Overflow {
			lhs: Number::from_integer(i64::MAX),
			op: Op::Mul,
			rhs: Number::from_integer(2),
		})
	);
	assert!(chain(num(i64::MAX), [(Op::Add, num(1))]).calc().is_err());
	assert!(chain(num(i64::MIN + 1), [(Op::Sub, num(2))]).calc().is_err());
}

#[test]
fn long_chains_stay_shallow() {
	let expr = chain(num(1), (1..65_536).map(|_| (Op::Add, num(1))));
	assert_eq!(expr.calc(), Ok(Number::from_integer(65_536)));
}

#[test]
fn display_keeps_grouping() {
	let diff = chain(num(4), [(Op::Sub, num(3))]);
	assert_eq!(chain(num(10), [(Op::Sub, diff.clone())]).to_string(), "10 - (4 - 3)");
	assert_eq!(chain(diff.clone(), [(Op::Mul, num(3))]).to_string(), "(4 - 3) * 3");
	assert_eq!(chain(num(10), [(Op::Sub, num(4)), (Op::Sub, num(3))]).to_string(), "10 - 4 - 3");

	let quotient = chain(num(6), [(Op::Div, num(3))]);
	assert_eq!(chain(num(2), [(Op::Mul, quotient.clone())]).to_string(), "2 * (6 / 3)");
	assert_eq!(chain(num(1), [(Op::Add, quotient)]).to_string(), "1 + 6 / 3");
}

#[test]
fn fold_precedence() {
	assert_eq!(fold(&pieces("2+3*4")).unwrap(), Number::from_integer(14));
	assert_eq!(fold(&pieces("2*3+4")).unwrap(), Number::from_integer(10));
	assert_eq!(fold(&pieces("10-4*2÷4")).unwrap(), Number::from_integer(8));
}

#[test]
fn fold_left_to_right() {
	assert_eq!(fold(&pieces("10-4-3")).unwrap(), Number::from_integer(3));
	assert_eq!(fold(&pieces("12/3/2")).unwrap(), Number::from_integer(2));
	assert_eq!(fold(&pieces("7/2*2")).unwrap(), Number::from_integer(7));
	assert_eq!(fold(&pieces("3--2")).unwrap(), Number::from_integer(5));
	assert_eq!(fold(&pieces("8−3")).unwrap(), Number::from_integer(5));
}

#[test]
fn fold_requires_alternation() {
	let one = Piece::Num(Number::from_integer(1));
	assert_eq!(fold(&[one.clone(), one.clone()]), Err(Error::Format(FormatError::Arity)));
	assert_eq!(fold(&[Piece::Op('+')]), Err(Error::Format(FormatError::Arity)));
	assert_eq!(fold(&[one.clone(), Piece::Op('+')]), Err(Error::Format(FormatError::Arity)));
	assert_eq!(fold(&[]), Err(Error::Format(FormatError::Arity)));
	assert_eq!(
		fold(&[one, Piece::Op('+'), Piece::Sum(vec![1, 2])]),
		Err(Error::Format(FormatError::Arity))
	);
}

#[test]
fn fold_builds_chains() {
	let pieces = pieces("1+2*3-4");
	let expr = crate::parse::arithmetic().parse(pieces.as_slice()).into_result().unwrap();
	assert_eq!(
		expr,
		chain(
			num(1),
			[(Op::Add, chain(num(2), [(Op::Mul, num(3))])), (Op::Sub, num(4))]
		)
	);
	assert_eq!(expr.to_string(), "1 + 2 * 3 - 4");
}

#[test]
fn fold_division_by_zero() {
	assert!(matches!(fold(&pieces("4/0")), Err(Error::Calc(CalcError::Division(..)))));
}

#[test]
fn expand_wraps_counted_dice() {
	let mut roller = IterRoller::new(vec![3, 5, 6, 19]);
	let expanded = expand("2d6*1d6+d20", &mut roller).unwrap();
	assert_eq!(
		expanded,
		vec![
			Piece::Sum(vec![3, 5]),
			Piece::Op('*'),
			Piece::Sum(vec![6]),
			Piece::Op('+'),
			Piece::Num(Number::from_integer(19)),
		]
	);
	assert_eq!(render(&expanded), "(3 + 5) * (6) + 19");
	assert!(!roller.can_roll());
}

#[test]
fn expand_rejects_unrollable_dice() {
	let mut roller = IterRoller::new(Vec::<u32>::new());
	assert!(matches!(expand("0d6", &mut roller), Err(Error::Dice(..))));
	assert!(matches!(expand("1.5d6", &mut roller), Err(Error::Dice(..))));
	assert!(matches!(expand("1+y", &mut roller), Err(Error::UnsupportedToken(..))));
}
