use std::{
    fmt::Display,
    ops::{AddAssign, SubAssign},
};

use num_traits::Num;
use std::fmt::Debug;

pub trait MIDINumFrom<T> {
    /// Builds a time value from another supported numeric type.
    ///
    /// The decoder always produces `u64` ticks, so every [`MIDINum`] can be
    /// built from a `u64`.
    /// ## Example
    /// ```
    ///use midi_notes::num::MIDINumFrom;
    ///
    ///assert_eq!(f64::midi_num_from(96u64), 96.0f64);
    ///assert_eq!(i64::midi_num_from(96u64), 96i64);
    /// ```
    fn midi_num_from(val: T) -> Self;
}

pub trait MIDINumInto<T> {
    /// Casts the time value into another supported numeric type.
    /// ## Example
    /// ```
    ///use midi_notes::num::MIDINumInto;
    ///
    ///let ticks: u64 = 480;
    ///let seconds_base: f64 = ticks.midi_num_into();
    ///assert_eq!(seconds_base, 480.0);
    /// ```
    fn midi_num_into(&self) -> T;
}

/// A time or duration value: ordered, closed under the usual arithmetic, and
/// buildable from the decoder's tick deltas.
///
/// Implemented for u64, i64, f32 and f64. A track chunk holds at most 2^32 bytes
/// and each delta adds at most 2^28 ticks, so track time stays below 2^58 and
/// none of these can overflow.
pub trait MIDINum:
    Num
    + PartialOrd
    + PartialEq
    + AddAssign
    + SubAssign
    + Copy
    + Sized
    + Debug
    + Display
    + MIDINumFrom<u64>
    + MIDINumInto<u64>
    + MIDINumInto<f64>
{
}

macro_rules! impl_num_cast {
    ($num:ident, $other:ident) => {
        impl MIDINumInto<$other> for $num {
            #[inline(always)]
            fn midi_num_into(&self) -> $other {
                *self as $other
            }
        }

        impl MIDINumFrom<$other> for $num {
            #[inline(always)]
            fn midi_num_from(val: $other) -> Self {
                val as $num
            }
        }
    };
}

macro_rules! impl_midi_num {
    ($num:ident) => {
        impl_num_cast!($num, u64);
        impl_num_cast!($num, f64);

        impl MIDINum for $num {}
    };
}

impl_midi_num!(u64);
impl_midi_num!(i64);
impl_midi_num!(f32);
impl_midi_num!(f64);

#[cfg(test)]
mod tests {
    use crate::num::{MIDINumFrom, MIDINumInto};

    #[test]
    fn builds_from_ticks() {
        assert_eq!(i64::midi_num_from(10u64), 10i64);
        assert_eq!(f32::midi_num_from(10u64), 10f32);
        assert_eq!(f64::midi_num_from(10u64), 10f64);
    }

    #[test]
    fn casts_into_ticks() {
        let time: f64 = 12.0;
        let ticks: u64 = time.midi_num_into();
        assert_eq!(ticks, 12);

        let time: i64 = 7;
        let float: f64 = time.midi_num_into();
        assert_eq!(float, 7.0);
    }
}
