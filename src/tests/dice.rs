use crate::{
	dice::{
		roller::{unbiased_face, FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller, OsRandom, Roller},
		Dice, Error, Rolled, MAX_COUNT, MAX_SIDES,
	},
	number::Number,
};

#[test]
fn single_d20() {
	let dice = Dice::new(1, 20);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 1);
	assert_eq!(rolled.dice.as_ref(), &dice);
}

#[test]
fn hundred_d42s() {
	let dice = Dice::new(100, 42);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 100);
}

#[test]
fn max_dice() {
	let dice = Dice::new(MAX_COUNT, MAX_SIDES);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), MAX_COUNT as usize);
}

#[test]
fn os_random_in_range() {
	let dice = Dice::new(500, 6);
	let rolled = OsRandom.roll(&dice).unwrap();
	rolls_in_range(&rolled.rolls, 6);
}

#[test]
fn unrollable_dice() {
	for (count, sides) in [(0, 6), (1, 1), (1, 0), (MAX_COUNT + 1, 6), (1, MAX_SIDES + 1)] {
		let dice = Dice::new(count, sides);
		assert!(
			matches!(MaxRoller.roll(&dice), Err(Error::Range { .. })),
			"{dice} should be out of range"
		);
	}
}

#[test]
fn from_values_checks_range_before_type() {
	let half = Number::from_integer(1).checked_div(&Number::from_integer(2)).unwrap();
	let three_halves = Number::from_integer(3).checked_div(&Number::from_integer(2)).unwrap();

	assert!(matches!(
		Dice::from_values(half, Number::from_integer(6)),
		Err(Error::Range { .. })
	));
	assert!(matches!(
		Dice::from_values(three_halves, Number::from_integer(6)),
		Err(Error::Type { .. })
	));
	assert!(matches!(
		Dice::from_values(Number::from_integer(2), Number::from_integer(65_537)),
		Err(Error::Range { .. })
	));
	assert_eq!(
		Dice::from_values(Number::from_integer(2), Number::from_integer(6)),
		Ok(Dice::new(2, 6))
	);
}

#[test]
fn all_dice_sides_occur() {
	let dice = Dice::new(1000, 20);
	let rolled = FastRandRoller::with_seed(0x5eed).roll(&dice).unwrap();
	rolls_in_range(&rolled.rolls, 20);

	for side in 1..=20 {
		assert!(rolled.rolls.contains(&side), "face {side} never came up");
	}
}

#[test]
fn seeded_rollers_agree() {
	let dice = Dice::new(32, 100);
	let a = FastRandRoller::with_seed(42).roll(&dice).unwrap().rolls;
	let b = FastRandRoller::with_seed(42).roll(&dice).unwrap().rolls;
	assert_eq!(a, b);
}

#[test]
fn iter_roller_keeps_order() {
	let dice = Dice::new(3, 10);
	let mut roller = IterRoller::new(vec![9, 1, 4]);
	assert!(roller.can_roll());
	assert_eq!(roller.roll(&dice).unwrap().rolls, vec![9, 1, 4]);
	assert!(!roller.can_roll());
}

#[test]
fn rejection_bound() {
	// 65536 % 6 == 4, so draws above 65531 are redrawn
	assert_eq!(unbiased_face(6, || 65531), 6);

	let mut draws = [65532, 65533, 65534, 65535, 12].into_iter();
	assert_eq!(unbiased_face(6, || draws.next().unwrap()), 1);
	assert_eq!(draws.next(), None);
}

#[test]
fn power_of_two_sides_never_reject() {
	assert_eq!(unbiased_face(65536, || 0), 1);
	assert_eq!(unbiased_face(65536, || u16::MAX), 65536);
	assert_eq!(unbiased_face(2, || u16::MAX), 2);
	assert_eq!(unbiased_face(256, || 513), 2);
}

#[test]
fn accepted_draws_are_uniform() {
	for sides in [3, 6, 7, 20, 100, 1000] {
		let mut counts = vec![0_u32; sides as usize];

		for value in 0..=u16::MAX {
			let mut calls = 0;
			let face = unbiased_face(sides, || {
				calls += 1;
				if calls == 1 {
					value
				} else {
					0
				}
			});

			// Only draws accepted on the first try count towards the distribution
			if calls == 1 {
				counts[face as usize - 1] += 1;
			}
		}

		let expected = (65536 - 65536 % sides) / sides;
		assert!(counts.iter().all(|count| *count == expected), "d{sides} is biased: {counts:?}");
	}
}

#[test]
fn rolled_total() {
	let dice = Dice::new(3, MAX_SIDES);
	let rolled = Rolled::from_dice_and_rolls(&dice, [MAX_SIDES; 3]);
	assert_eq!(rolled.total(), 3 * 65536);
}

#[test]
fn rolled_describe() {
	let dice = Dice::new(5, 8);
	let rolled = Rolled::from_dice_and_rolls(&dice, [1, 2, 3, 4, 5]);
	assert_eq!(rolled.describe(None), "5d8[1, 2, 3, 4, 5]");
	assert_eq!(rolled.describe(Some(3)), "5d8[1, 2, 3, 2 more...]");
	assert_eq!(rolled.to_string(), rolled.describe(None));
}

#[test]
fn dice_display() {
	assert_eq!(Dice::new(3, 8).to_string(), "3d8");
}

fn rolls_successfully_and_in_range(dice: &Dice) -> Rolled<'_> {
	let rolled = FastRandRoller::default().roll(dice);
	assert!(rolled.is_ok());
	let rolled = rolled.unwrap();
	rolls_in_range(&rolled.rolls, dice.sides);
	rolled
}

fn rolls_in_range(rolls: &[u32], sides: u32) {
	for roll in rolls {
		assert!((1..=sides).contains(roll), "{roll} is not in 1..={sides}");
	}
}
