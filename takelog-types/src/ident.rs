//! Scene / cut / take identifier codec.
//!
//! Tokens are a non-negative integer followed by an optional single-letter
//! suffix in `a..=g` (`"12"`, `"3b"`). The cut role additionally accepts the
//! sentinel token `"only"`, meaning the take covers the whole scene. At the
//! string level the sentinel has magnitude [`SENTINEL`]; the typed roles model
//! it as [`CutNo::Only`].
//!
//! Parsing never fails: anything unrecognized degrades to magnitude 0 with no
//! suffix.

use serde::{Deserialize, Serialize};

/// Rendered form of the "whole scene" cut.
pub const ONLY_TOKEN: &str = "only";

/// String-level magnitude of the "only" cut.
pub const SENTINEL: i64 = -1;

/// Step size for the fast increment/decrement buttons.
pub const FAST_STEP: i32 = 5;

/// Letter suffix on a scene or cut number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Suffix {
    #[default]
    None,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Suffix {
    pub const ALL: [Suffix; 8] = [
        Suffix::None,
        Suffix::A,
        Suffix::B,
        Suffix::C,
        Suffix::D,
        Suffix::E,
        Suffix::F,
        Suffix::G,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Suffix::None => "",
            Suffix::A => "a",
            Suffix::B => "b",
            Suffix::C => "c",
            Suffix::D => "d",
            Suffix::E => "e",
            Suffix::F => "f",
            Suffix::G => "g",
        }
    }

    /// Case-insensitive letter lookup.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Suffix::A),
            'b' => Some(Suffix::B),
            'c' => Some(Suffix::C),
            'd' => Some(Suffix::D),
            'e' => Some(Suffix::E),
            'f' => Some(Suffix::F),
            'g' => Some(Suffix::G),
            _ => None,
        }
    }

    /// Parse a suffix field. The empty string is `Suffix::None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Some(Suffix::None);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }
}

impl std::fmt::Display for Suffix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a token into magnitude and suffix.
///
/// `"only"` (any case) yields `(SENTINEL, Suffix::None)`. Malformed input
/// yields `(0, Suffix::None)`.
pub fn parse_token(token: &str) -> (i64, Suffix) {
    const MALFORMED: (i64, Suffix) = (0, Suffix::None);

    let token = token.trim();
    if token.eq_ignore_ascii_case(ONLY_TOKEN) {
        return (SENTINEL, Suffix::None);
    }

    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    if digits_end == 0 {
        return MALFORMED;
    }
    let (digits, rest) = token.split_at(digits_end);
    let Ok(magnitude) = digits.parse::<u32>() else {
        return MALFORMED;
    };
    match Suffix::parse(rest) {
        Some(suffix) if rest.trim() == rest => (i64::from(magnitude), suffix),
        _ => MALFORMED,
    }
}

/// Inverse of [`parse_token`]. The sentinel magnitude always renders as
/// `"only"`, whatever suffix is passed.
pub fn combine(magnitude: i64, suffix: Suffix) -> String {
    if magnitude == SENTINEL {
        return ONLY_TOKEN.to_string();
    }
    format!("{}{}", magnitude.max(0), suffix)
}

fn clamp_step(number: u32, delta: i32) -> u32 {
    let next = i64::from(number) + i64::from(delta);
    next.clamp(1, i64::from(u32::MAX)) as u32
}

/// A number with an optional letter suffix (the scene role, and the
/// numbered arm of the cut role).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Numbered {
    pub number: u32,
    pub suffix: Suffix,
}

impl Default for Numbered {
    fn default() -> Self {
        Self::new(1, Suffix::None)
    }
}

impl Numbered {
    pub fn new(number: u32, suffix: Suffix) -> Self {
        Self { number, suffix }
    }

    /// Parse in the scene role. The sentinel is not a scene number and
    /// degrades like any other malformed token.
    pub fn parse(token: &str) -> Self {
        match parse_token(token) {
            (magnitude, suffix) if magnitude >= 0 => Self::new(magnitude as u32, suffix),
            _ => Self::new(0, Suffix::None),
        }
    }

    pub fn token(&self) -> String {
        combine(i64::from(self.number), self.suffix)
    }

    /// Move the number by `delta`, clamped to a minimum of 1. The suffix is kept.
    pub fn step(self, delta: i32) -> Self {
        Self::new(clamp_step(self.number, delta), self.suffix)
    }
}

/// Cut number: either a numbered cut or the whole-scene "only" cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CutNo {
    Numbered(Numbered),
    Only,
}

impl Default for CutNo {
    fn default() -> Self {
        CutNo::Numbered(Numbered::default())
    }
}

impl CutNo {
    pub fn number(number: u32) -> Self {
        CutNo::Numbered(Numbered::new(number, Suffix::None))
    }

    pub fn parse(token: &str) -> Self {
        match parse_token(token) {
            (SENTINEL, _) => CutNo::Only,
            (magnitude, suffix) => CutNo::Numbered(Numbered::new(magnitude.max(0) as u32, suffix)),
        }
    }

    pub fn token(&self) -> String {
        combine(self.magnitude(), self.suffix())
    }

    /// String-level magnitude; [`SENTINEL`] for the "only" cut.
    pub fn magnitude(&self) -> i64 {
        match self {
            CutNo::Numbered(n) => i64::from(n.number),
            CutNo::Only => SENTINEL,
        }
    }

    pub fn suffix(&self) -> Suffix {
        match self {
            CutNo::Numbered(n) => n.suffix,
            CutNo::Only => Suffix::None,
        }
    }

    pub fn is_only(&self) -> bool {
        matches!(self, CutNo::Only)
    }

    /// Replace the suffix. Ignored while the cut is "only".
    pub fn with_suffix(self, suffix: Suffix) -> Self {
        match self {
            CutNo::Numbered(n) => CutNo::Numbered(Numbered::new(n.number, suffix)),
            CutNo::Only => CutNo::Only,
        }
    }

    /// "only" goes to 1 (never 0); numbered cuts count up keeping their suffix.
    pub fn increment(self) -> Self {
        match self {
            CutNo::Only => CutNo::number(1),
            CutNo::Numbered(n) => CutNo::Numbered(n.step(1)),
        }
    }

    /// 1 (any suffix) goes to "only"; "only" stays put.
    pub fn decrement(self) -> Self {
        match self {
            CutNo::Only => CutNo::Only,
            CutNo::Numbered(n) if n.number <= 1 => CutNo::Only,
            CutNo::Numbered(n) => CutNo::Numbered(n.step(-1)),
        }
    }

    /// Jump by `delta`, treating "only" as 1 when computing the new base.
    /// Landing below 1 yields "only".
    pub fn fast_step(self, delta: i32) -> Self {
        let (base, suffix) = match self {
            CutNo::Only => (1, Suffix::None),
            CutNo::Numbered(n) => (i64::from(n.number), n.suffix),
        };
        let next = base + i64::from(delta);
        if next < 1 {
            CutNo::Only
        } else {
            CutNo::Numbered(Numbered::new(next.min(i64::from(u32::MAX)) as u32, suffix))
        }
    }

    /// Unit steps (±1) use the boundary transitions of `increment`/`decrement`;
    /// anything larger is a fast step.
    pub fn step(self, delta: i32) -> Self {
        match delta {
            0 => self,
            1 => self.increment(),
            -1 => self.decrement(),
            d => self.fast_step(d),
        }
    }
}

/// Take number, a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TakeNo(pub u32);

impl Default for TakeNo {
    fn default() -> Self {
        TakeNo(1)
    }
}

impl TakeNo {
    /// Suffixes are meaningless on takes and are dropped.
    pub fn parse(token: &str) -> Self {
        let (magnitude, _) = parse_token(token);
        TakeNo(magnitude.max(0) as u32)
    }

    pub fn token(&self) -> String {
        self.0.to_string()
    }

    pub fn step(self, delta: i32) -> Self {
        TakeNo(clamp_step(self.0, delta))
    }
}
