use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

/// Cumulative day count at the end of each month of the 365-day year.
const CUMULATIVE_DAYS: [i32; 12] = [31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum Month {
    #[strum(serialize = "Morning Star")]
    MorningStar = 0,
    #[strum(serialize = "Sun's Dawn")]
    SunsDawn = 1,
    #[strum(serialize = "First Seed")]
    FirstSeed = 2,
    #[strum(serialize = "Rain's Hand")]
    RainsHand = 3,
    #[strum(serialize = "Second Seed")]
    SecondSeed = 4,
    #[strum(serialize = "Midyear")]
    Midyear = 5,
    #[strum(serialize = "Sun's Height")]
    SunsHeight = 6,
    #[strum(serialize = "Last Seed")]
    LastSeed = 7,
    #[strum(serialize = "Hearthfire")]
    Hearthfire = 8,
    #[strum(serialize = "Frostfall")]
    Frostfall = 9,
    #[strum(serialize = "Sun's Dusk")]
    SunsDusk = 10,
    #[strum(serialize = "Evening Star")]
    EveningStar = 11,
}

impl Month {
    /// Locate a 1-based day of the year inside the month table.
    ///
    /// Lower-bound over the cumulative boundaries: the month is the first
    /// whose end boundary is >= the year day, and the month day is whatever
    /// remains past the previous boundary.
    pub fn from_year_day(year_day: i32) -> (Self, i32) {
        let index = CUMULATIVE_DAYS.partition_point(|&boundary| boundary < year_day);
        let index = index.min(11);
        let month = Self::from_repr(index as u8).expect("index is 0..=11");
        let month_day = if index == 0 {
            year_day
        } else {
            year_day - CUMULATIVE_DAYS[index - 1]
        };
        (month, month_day)
    }

    /// 1-based month number.
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn long_name(&self) -> &'static str {
        self.into()
    }

    /// The birthsign tied to this month.
    pub fn birthsign(&self) -> &'static str {
        match self {
            Self::MorningStar => "The Ritual",
            Self::SunsDawn => "The Lover",
            Self::FirstSeed => "The Lord",
            Self::RainsHand => "The Mage",
            Self::SecondSeed => "The Shadow",
            Self::Midyear => "The Steed",
            Self::SunsHeight => "The Apprentice",
            Self::LastSeed => "The Warrior",
            Self::Hearthfire => "The Lady",
            Self::Frostfall => "The Tower",
            Self::SunsDusk => "The Atronach",
            Self::EveningStar => "The Thief",
        }
    }

    /// The Argonian month name, with its translation.
    pub fn argonian_name(&self) -> &'static str {
        match self {
            Self::MorningStar => "Vakka (Sun)",
            Self::SunsDawn => "Xeech (Nut)",
            Self::FirstSeed => "Sisei (Sprout)",
            Self::RainsHand => "Hist-Deek (Hist Sapling)",
            Self::SecondSeed => "Hist-Dooka (Mature Hist)",
            Self::Midyear => "Hist-Tsoko (Elder Hist)",
            Self::SunsHeight => "Thtithil-Gah (Egg-Basket)",
            Self::LastSeed => "Thtithil (Egg)",
            Self::Hearthfire => "Nushmeeko (Lizard)",
            Self::Frostfall => "Shaja-Nushmeeko (Semi-Humanoid Lizard)",
            Self::SunsDusk => "Saxhleel (Argonian)",
            Self::EveningStar => "Xulomaht (The Deceased)",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum Weekday {
    Sundas = 0,
    Morndas = 1,
    Tirdas = 2,
    Middas = 3,
    Turdas = 4,
    Fredas = 5,
    Loredas = 6,
}

impl Weekday {
    pub fn from_index(index: u8) -> Option<Self> {
        Self::from_repr(index)
    }

    /// 1-based weekday number.
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn long_name(&self) -> &'static str {
        self.into()
    }

    /// First three letters of the day name.
    pub fn short_name(&self) -> &'static str {
        &self.long_name()[..3]
    }
}
