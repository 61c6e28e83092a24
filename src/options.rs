//! The closed set of tasting options.
//!
//! Each [`OptionKey`] has a stable camelCase key (used on the command line and
//! in the JSON payload) and a Korean display label (used in the report). The
//! order of [`OptionKey::ALL`] is the order options appear in a report.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One flavor/ingredient toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    RedBean,
    FineBean,
    WholeBean,
    Chestnut,
    Walnut,
    NutMix,
    RedDate,
    Ssanghwa,
    Raspberry,
    MilkTea,
    DriedPersimmon,
    Jeju,
    Matcha,
    WhiteBean,
    BlackSesame,
    SweetPotato,
    Pumpkin,
}

impl OptionKey {
    /// Number of options.
    pub const COUNT: usize = 17;

    /// All options in report order.
    pub const ALL: [OptionKey; Self::COUNT] = [
        OptionKey::RedBean,
        OptionKey::FineBean,
        OptionKey::WholeBean,
        OptionKey::Chestnut,
        OptionKey::Walnut,
        OptionKey::NutMix,
        OptionKey::RedDate,
        OptionKey::Ssanghwa,
        OptionKey::Raspberry,
        OptionKey::MilkTea,
        OptionKey::DriedPersimmon,
        OptionKey::Jeju,
        OptionKey::Matcha,
        OptionKey::WhiteBean,
        OptionKey::BlackSesame,
        OptionKey::SweetPotato,
        OptionKey::Pumpkin,
    ];

    /// Position in [`OptionKey::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// camelCase identifier.
    pub fn key(self) -> &'static str {
        match self {
            OptionKey::RedBean => "redBean",
            OptionKey::FineBean => "fineBean",
            OptionKey::WholeBean => "wholeBean",
            OptionKey::Chestnut => "chestnut",
            OptionKey::Walnut => "walnut",
            OptionKey::NutMix => "nutMix",
            OptionKey::RedDate => "redDate",
            OptionKey::Ssanghwa => "ssanghwa",
            OptionKey::Raspberry => "raspberry",
            OptionKey::MilkTea => "milkTea",
            OptionKey::DriedPersimmon => "driedPersimmon",
            OptionKey::Jeju => "jeju",
            OptionKey::Matcha => "matcha",
            OptionKey::WhiteBean => "whiteBean",
            OptionKey::BlackSesame => "blackSesame",
            OptionKey::SweetPotato => "sweetPotato",
            OptionKey::Pumpkin => "pumpkin",
        }
    }

    /// Display label used in the report.
    ///
    /// The match is exhaustive, so adding a variant without a label does not
    /// compile.
    pub fn label(self) -> &'static str {
        match self {
            OptionKey::RedBean => "팥",
            OptionKey::FineBean => "고운앙금",
            OptionKey::WholeBean => "통팥",
            OptionKey::Chestnut => "밤",
            OptionKey::Walnut => "호두",
            OptionKey::NutMix => "견과",
            OptionKey::RedDate => "대추",
            OptionKey::Ssanghwa => "쌍화",
            OptionKey::Raspberry => "라즈베리",
            OptionKey::MilkTea => "밀크티",
            OptionKey::DriedPersimmon => "상주곶감",
            OptionKey::Jeju => "제주녹차",
            OptionKey::Matcha => "보성말차",
            OptionKey::WhiteBean => "백앙금",
            OptionKey::BlackSesame => "흑임자",
            OptionKey::SweetPotato => "고구마",
            OptionKey::Pumpkin => "단호박",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accepts the camelCase key, the Korean label, or the 1-based position.
impl FromStr for OptionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| OptionKey::ALL.get(i).copied())
                .ok_or_else(|| Error::UnknownOption(s.to_string()));
        }
        OptionKey::ALL
            .iter()
            .copied()
            .find(|k| k.key() == s || k.label() == s)
            .ok_or_else(|| Error::UnknownOption(s.to_string()))
    }
}
