use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeError};
use crate::keyspace::{DIVISIONS, FEMALE_CLASSES, MALE_CLASSES};

/// Suffix marking the drug-tested variant of a division.
pub const TESTED_SUFFIX: &str = "-D";

/// Lifter sex. Selects the weight-class vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    M,
    F,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::M, Sex::F];

    /// Weight classes contested by this sex.
    pub fn weight_classes(self) -> &'static [&'static str] {
        match self {
            Self::M => MALE_CLASSES,
            Self::F => FEMALE_CLASSES,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
        }
    }
}

/// Meet format a result was achieved in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Event {
    /// Full meet: squat, bench and deadlift.
    FullMeet,
    BenchOnly,
    DeadliftOnly,
}

impl Event {
    pub const ALL: [Event; 3] = [Event::FullMeet, Event::BenchOnly, Event::DeadliftOnly];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullMeet => "SBD",
            Self::BenchOnly => "B",
            Self::DeadliftOnly => "D",
        }
    }
}

/// The individual lift (or total) a record is held for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lift {
    Squat,
    Bench,
    Deadlift,
    Total,
}

impl Lift {
    pub const ALL: [Lift; 4] = [Lift::Squat, Lift::Bench, Lift::Deadlift, Lift::Total];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Squat => "S",
            Self::Bench => "B",
            Self::Deadlift => "D",
            Self::Total => "SBD",
        }
    }
}

/// Equipment category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Equipment {
    Raw,
    Wraps,
    Sleeves,
    Bare,
    SinglePly,
    MultiPly,
    Unlimited,
}

impl Equipment {
    pub const ALL: [Equipment; 7] = [
        Equipment::Raw,
        Equipment::Wraps,
        Equipment::Sleeves,
        Equipment::Bare,
        Equipment::SinglePly,
        Equipment::MultiPly,
        Equipment::Unlimited,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "Raw",
            Self::Wraps => "Wraps",
            Self::Sleeves => "Sleeves",
            Self::Bare => "Bare",
            Self::SinglePly => "Single-ply",
            Self::MultiPly => "Multi-ply",
            Self::Unlimited => "Unlimited",
        }
    }
}

macro_rules! vocabulary {
    ($ty:ident, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self> {
                Self::ALL
                    .into_iter()
                    .find(|item| item.as_str() == s)
                    .ok_or_else(|| TypeError::UnknownValue {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

vocabulary!(Sex, "sex");
vocabulary!(Event, "event");
vocabulary!(Lift, "lift");
vocabulary!(Equipment, "equipment");

/// Age/experience bracket, with the drug-tested flag carried alongside.
///
/// `Open` and `Open-D` are the same bracket; the `-D` suffix only marks
/// the tested variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Division {
    pub name: String,
    pub tested: bool,
}

impl Division {
    /// Split a raw division segment into bracket name and tested flag.
    ///
    /// Does not check the bracket against the known list.
    pub fn from_segment(segment: &str) -> Self {
        match segment.strip_suffix(TESTED_SUFFIX) {
            Some(name) => Self {
                name: name.to_string(),
                tested: true,
            },
            None => Self {
                name: segment.to_string(),
                tested: false,
            },
        }
    }

    /// Division of an arbitrary key string, recognized or not.
    ///
    /// Returns `None` when the key has no second `|` segment.
    pub fn of_key(key: &str) -> Option<Self> {
        key.split('|').nth(1).map(Self::from_segment)
    }

    /// Whether this is the unrestricted bracket.
    pub fn is_open(&self) -> bool {
        self.name == "Open"
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tested {
            write!(f, "{}{TESTED_SUFFIX}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Structured form of a `sex|division|event|equipment|class|lift` key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassificationKey {
    pub sex: Sex,
    pub division: Division,
    pub event: Event,
    pub equipment: Equipment,
    pub weight_class: String,
    pub lift: Lift,
}

impl ClassificationKey {
    /// Parse a pipe-delimited key.
    ///
    /// Each segment must belong to its vocabulary; whether the combination
    /// is legal is the [`Keyspace`](crate::Keyspace)'s call.
    pub fn parse(raw: &str) -> Result<Self> {
        let segments: Vec<&str> = raw.split('|').collect();
        let [sex, division, event, equipment, weight_class, lift] = segments[..] else {
            return Err(TypeError::SegmentCount(segments.len()));
        };

        let division = Division::from_segment(division);
        if !DIVISIONS.contains(&division.name.as_str()) {
            return Err(TypeError::UnknownValue {
                field: "division",
                value: division.name,
            });
        }

        let known_class = MALE_CLASSES
            .iter()
            .chain(FEMALE_CLASSES)
            .any(|class| *class == weight_class);
        if !known_class {
            return Err(TypeError::UnknownValue {
                field: "weight class",
                value: weight_class.to_string(),
            });
        }

        Ok(Self {
            sex: sex.parse()?,
            division,
            event: event.parse()?,
            equipment: equipment.parse()?,
            weight_class: weight_class.to_string(),
            lift: lift.parse()?,
        })
    }
}

impl FromStr for ClassificationKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ClassificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}|{}",
            self.sex, self.division, self.event, self.equipment, self.weight_class, self.lift
        )
    }
}
