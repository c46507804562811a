//! Abstractions for rolling dice using various means.

use alloc::{borrow::Cow, vec::Vec};
use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;
#[cfg(feature = "os-rng")]
use rand::{rngs::OsRng, RngCore};

use super::{Dice, Error, Rolled};

/// Size of the space that a single draw is taken from (a 16-bit value)
const DRAW_SPACE: u32 = 1 << 16;

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die with the given number of sides, producing a face in `1..=sides`.
	#[must_use]
	fn roll_die(&mut self, sides: u32) -> u32;

	/// Rolls a set of dice, keeping the faces in the order they were rolled.
	///
	/// # Errors
	/// If the dice can't be rolled (see [`Dice::check()`]), [`Error::Range`] is returned.
	fn roll<'d>(&mut self, dice: &'d Dice) -> Result<Rolled<'d>, Error>
	where
		Self: Sized,
	{
		dice.check()?;

		let mut rolls = Vec::with_capacity(dice.count as usize);
		for _ in 0..dice.count {
			rolls.push(self.roll_die(dice.sides));
		}

		let rolled = Rolled {
			rolls,
			dice: Cow::Borrowed(dice),
		};
		tracing::trace!(rolled = %rolled.describe(Some(16)), "rolled dice");
		Ok(rolled)
	}
}

/// Maps uniformly distributed 16-bit draws onto the faces of a die without modulo bias.
///
/// Draws above the largest multiple of `sides` that fits in the 16-bit space are discarded and redrawn, so every
/// face is equally likely whether or not `sides` divides 65536. `sides` must be in `1..=65536`.
///
/// # Examples
/// ```
/// use dicetrace::dice::roller::unbiased_face;
///
/// // 65535 is above the acceptance bound for a d6 (65531), so it's discarded
/// let mut draws = [65535, 7].into_iter();
/// assert_eq!(unbiased_face(6, || draws.next().unwrap()), 2);
/// ```
pub fn unbiased_face(sides: u32, mut draw: impl FnMut() -> u16) -> u32 {
	let max_accepted = DRAW_SPACE - (DRAW_SPACE % sides) - 1;
	loop {
		let value = u32::from(draw());
		if value <= max_accepted {
			return (value % sides) + 1;
		}
	}
}

/// Generates rolls from the operating system's cryptographically strong random source. Requires the `os-rng`
/// feature (enabled by default).
///
/// The roller holds no state of its own, so any number of them can be used side by side.
///
/// # Examples
/// ```
/// use dicetrace::dice::{roller::{OsRandom, Roller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let rolled = OsRandom.roll(&dice)?;
/// assert!(rolled.rolls.iter().all(|face| (1..=6).contains(face)));
/// # Ok::<(), dicetrace::dice::Error>(())
/// ```
#[cfg(feature = "os-rng")]
#[derive(Debug, Default, Clone, Copy)]
#[expect(clippy::exhaustive_structs, reason = "Stateless handle")]
pub struct OsRandom;

#[cfg(feature = "os-rng")]
impl Roller for OsRandom {
	/// Rolls a single die from two big-endian bytes per draw of the OS generator.
	fn roll_die(&mut self, sides: u32) -> u32 {
		unbiased_face(sides, || {
			let mut bytes = [0; 2];
			OsRng.fill_bytes(&mut bytes);
			u16::from_be_bytes(bytes)
		})
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// This generator is fast and can be seeded for reproducible results, but it is not cryptographically strong.
///
/// # Examples
/// ```
/// use dicetrace::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let mut a = FastRandRoller::with_seed(0x750c38d574400);
/// let mut b = FastRandRoller::with_seed(0x750c38d574400);
///
/// let dice = Dice::new(4, 6);
/// assert_eq!(a.roll(&dice)?.rolls, b.roll(&dice)?.rolls);
/// # Ok::<(), dicetrace::dice::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		unbiased_face(sides, || self.0.u16(..))
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use dicetrace::dice::{roller::{Roller, Val as ValRoller}, Dice};
///
/// let mut roller = ValRoller(4);
///
/// let dice = Dice::new(4, 6);
/// let rolled = roller.roll(&dice)?;
/// assert!(rolled.rolls.iter().all(|face| *face == 4));
/// # Ok::<(), dicetrace::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u32);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use dicetrace::dice::{roller::{Max as MaxRoller, Roller}, Dice};
///
/// let dice = Dice::new(2, 20);
/// let rolled = MaxRoller.roll(&dice)?;
/// assert_eq!(rolled.rolls, vec![20, 20]);
/// # Ok::<(), dicetrace::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		sides
	}
}

/// Generates rolls from an iterator of faces. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use dicetrace::dice::{roller::{Iter as IterRoller, Roller}, Dice};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 10]);
/// assert_eq!(roller.roll(&Dice::new(5, 10))?.rolls, vec![1, 2, 3, 4, 10]);
/// assert!(!roller.can_roll());
/// # Ok::<(), dicetrace::dice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u32>>(Peekable<I>);

impl<I: Iterator<Item = u32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide faces.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u32>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0.next().expect("iterator is finished")
	}
}
