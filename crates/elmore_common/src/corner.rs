//! Analysis corners and per-corner value grids.
//!
//! A [`Corner`] is one combination of an analysis [`Split`] (early/late) and a
//! signal [`Tran`]sition (rise/fall). Every timing quantity computed on an RC
//! tree is evaluated independently for each of the four corners and stored in
//! a [`CornerGrid`].

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Number of analysis splits.
pub const NUM_SPLITS: usize = 2;

/// Number of signal transitions.
pub const NUM_TRANS: usize = 2;

/// The analysis split: early (hold, minimum) or late (setup, maximum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Early analysis (minimum delays).
    Min,
    /// Late analysis (maximum delays).
    Max,
}

impl Split {
    /// Both splits, in grid order.
    pub const ALL: [Split; NUM_SPLITS] = [Split::Min, Split::Max];

    fn index(self) -> usize {
        match self {
            Split::Min => 0,
            Split::Max => 1,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Split::Min => "min",
            Split::Max => "max",
        }
    }
}

/// The direction of a signal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tran {
    /// Rising transition.
    Rise,
    /// Falling transition.
    Fall,
}

impl Tran {
    /// Both transitions, in grid order.
    pub const ALL: [Tran; NUM_TRANS] = [Tran::Rise, Tran::Fall];

    fn index(self) -> usize {
        match self {
            Tran::Rise => 0,
            Tran::Fall => 1,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Tran::Rise => "rise",
            Tran::Fall => "fall",
        }
    }
}

/// One analysis corner: a split paired with a transition.
///
/// Displays and parses as `"<split>_<tran>"`, e.g. `"max_rise"`. The aliases
/// `early` and `late` are accepted for `min` and `max` when parsing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Corner {
    /// The analysis split.
    pub split: Split,
    /// The signal transition.
    pub tran: Tran,
}

impl Corner {
    /// Every corner, in grid order (split-major).
    pub const ALL: [Corner; NUM_SPLITS * NUM_TRANS] = [
        Corner::new(Split::Min, Tran::Rise),
        Corner::new(Split::Min, Tran::Fall),
        Corner::new(Split::Max, Tran::Rise),
        Corner::new(Split::Max, Tran::Fall),
    ];

    /// The corner used when a single representative value is needed.
    pub const REPRESENTATIVE: Corner = Corner::new(Split::Min, Tran::Rise);

    /// Creates a corner from a split and a transition.
    pub const fn new(split: Split, tran: Tran) -> Self {
        Self { split, tran }
    }

    /// Returns an iterator over every corner.
    pub fn all() -> impl Iterator<Item = Corner> {
        Self::ALL.into_iter()
    }
}

impl fmt::Debug for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Corner({self})")
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.split.as_str(), self.tran.as_str())
    }
}

/// Error type for parsing corner strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCornerError {
    /// The input string that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseCornerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid corner: '{}'", self.input)
    }
}

impl std::error::Error for ParseCornerError {}

impl FromStr for Corner {
    type Err = ParseCornerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseCornerError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (split, tran) = lower
            .split_once(|c| c == '_' || c == '/' || c == ':')
            .ok_or_else(err)?;
        let split = match split {
            "min" | "early" => Split::Min,
            "max" | "late" => Split::Max,
            _ => return Err(err()),
        };
        let tran = match tran {
            "rise" | "r" => Tran::Rise,
            "fall" | "f" => Tran::Fall,
            _ => return Err(err()),
        };
        Ok(Corner::new(split, tran))
    }
}

impl Serialize for Corner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Corner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CornerVisitor;

        impl Visitor<'_> for CornerVisitor {
            type Value = Corner;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a corner such as \"max_rise\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(CornerVisitor)
    }
}

/// A fixed-size container holding one value per [`Corner`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerGrid<T> {
    values: [[T; NUM_TRANS]; NUM_SPLITS],
}

impl<T: Copy> CornerGrid<T> {
    /// Creates a grid with every corner set to `value`.
    pub fn splat(value: T) -> Self {
        Self {
            values: [[value; NUM_TRANS]; NUM_SPLITS],
        }
    }

    /// Creates a grid by evaluating `f` once per corner.
    pub fn from_fn(mut f: impl FnMut(Corner) -> T) -> Self {
        let mut values = [[f(Corner::ALL[0]); NUM_TRANS]; NUM_SPLITS];
        for corner in Corner::ALL.into_iter().skip(1) {
            values[corner.split.index()][corner.tran.index()] = f(corner);
        }
        Self { values }
    }

    /// Returns the value at `corner`.
    pub fn get(&self, corner: Corner) -> T {
        self[corner]
    }

    /// Sets the value at `corner`.
    pub fn set(&mut self, corner: Corner, value: T) {
        self[corner] = value;
    }

    /// Returns a new grid with `f` applied to every value.
    pub fn map<U: Copy>(&self, mut f: impl FnMut(T) -> U) -> CornerGrid<U> {
        CornerGrid::from_fn(|c| f(self[c]))
    }

    /// Returns an iterator over `(corner, value)` pairs in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (Corner, T)> + '_ {
        Corner::all().map(move |c| (c, self[c]))
    }
}

impl<T: Copy + Default> Default for CornerGrid<T> {
    fn default() -> Self {
        Self::splat(T::default())
    }
}

impl<T> Index<Corner> for CornerGrid<T> {
    type Output = T;

    fn index(&self, corner: Corner) -> &T {
        &self.values[corner.split.index()][corner.tran.index()]
    }
}

impl<T> IndexMut<Corner> for CornerGrid<T> {
    fn index_mut(&mut self, corner: Corner) -> &mut T {
        &mut self.values[corner.split.index()][corner.tran.index()]
    }
}
