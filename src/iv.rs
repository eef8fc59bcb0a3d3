//! Individual value (IV) triples.

use crate::error::IvError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest value any single IV can take.
pub const MAX_IV: u8 = 15;

/// Sum of three perfect IVs.
pub const MAX_IV_TOTAL: u32 = MAX_IV as u32 * 3;

/// An exact `(attack, defense, stamina)` IV triple, each in `0..=15`.
///
/// # Examples
///
/// ```rust
/// use ivdex::IvCombination;
///
/// let iv = IvCombination::new(15, 15, 15);
/// assert!(iv.is_perfect());
/// assert_eq!(iv.percent_perfect(), 100);
/// assert_eq!(IvCombination::new(10, 8, 7).to_string(), "10/8/7");
///
/// // Decoding goes through the same range check.
/// assert!(serde_json::from_str::<IvCombination>(r#"{"attack":16,"defense":0,"stamina":0}"#).is_err());
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIv")]
pub struct IvCombination {
    pub(crate) attack: u8,
    pub(crate) defense: u8,
    pub(crate) stamina: u8,
}

/// Unchecked wire form of [`IvCombination`].
#[derive(Deserialize)]
struct RawIv {
    attack: u8,
    defense: u8,
    stamina: u8,
}

impl TryFrom<RawIv> for IvCombination {
    type Error = IvError;

    fn try_from(raw: RawIv) -> Result<Self, Self::Error> {
        Self::try_new(raw.attack, raw.defense, raw.stamina).ok_or(IvError::OutOfRange {
            attack: raw.attack,
            defense: raw.defense,
            stamina: raw.stamina,
        })
    }
}

impl IvCombination {
    /// The worst possible combination.
    pub const MIN: IvCombination = IvCombination {
        attack: 0,
        defense: 0,
        stamina: 0,
    };

    /// The best possible combination.
    pub const MAX: IvCombination = IvCombination {
        attack: MAX_IV,
        defense: MAX_IV,
        stamina: MAX_IV,
    };

    /// Create a combination.
    ///
    /// # Panics
    ///
    /// Panics if any value is above [`MAX_IV`].
    pub fn new(attack: u8, defense: u8, stamina: u8) -> Self {
        Self::try_new(attack, defense, stamina)
            .unwrap_or_else(|| panic!("IV out of range: {attack}/{defense}/{stamina}"))
    }

    /// Create a combination, or `None` if any value is above [`MAX_IV`].
    pub fn try_new(attack: u8, defense: u8, stamina: u8) -> Option<Self> {
        if attack > MAX_IV || defense > MAX_IV || stamina > MAX_IV {
            return None;
        }
        Some(Self {
            attack,
            defense,
            stamina,
        })
    }

    /// Attack IV, in `0..=15`.
    pub fn attack(&self) -> u8 {
        self.attack
    }

    /// Defense IV, in `0..=15`.
    pub fn defense(&self) -> u8 {
        self.defense
    }

    /// Stamina IV, in `0..=15`.
    pub fn stamina(&self) -> u8 {
        self.stamina
    }

    /// Sum of the three IVs.
    pub fn total(&self) -> u32 {
        u32::from(self.attack) + u32::from(self.defense) + u32::from(self.stamina)
    }

    /// The total as a rounded percentage of [`MAX_IV_TOTAL`].
    pub fn percent_perfect(&self) -> u8 {
        (f64::from(self.total()) * 100.0 / f64::from(MAX_IV_TOTAL)).round() as u8
    }

    /// Whether every IV is at its maximum.
    pub fn is_perfect(&self) -> bool {
        *self == Self::MAX
    }
}

impl fmt::Display for IvCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.attack, self.defense, self.stamina)
    }
}
