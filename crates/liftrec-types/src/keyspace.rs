//! The closed set of legal classification keys.
//!
//! Legality is a product over sex, division (plain and tested), event,
//! equipment, weight class and lift, filtered by three tables:
//!
//! - [`LIFTS_BY_EVENT`]: which lifts an event contests
//! - [`EQUIPMENT_BY_LIFT`]: which equipment categories a lift may be filed under
//! - `Unlimited` is only filed for the bench lift of a bench-only event
//!
//! Squat and total reject `Raw` (their unequipped categories are
//! `Bare`/`Sleeves`/`Wraps`); bench and deadlift reject those three and use
//! `Raw` instead.

use std::collections::HashSet;

use crate::key::{Division, Equipment, Event, Lift, Sex};

pub const MALE_CLASSES: &[&str] = &[
    "52", "56", "60", "67.5", "75", "82.5", "90", "100", "110", "125", "140", "SHW",
];

pub const FEMALE_CLASSES: &[&str] = &[
    "44", "48", "52", "56", "60", "67.5", "75", "82.5", "90", "100", "110", "SHW",
];

pub const DIVISIONS: &[&str] = &[
    "Open", "Youth", "T13-15", "T16-17", "T18-19", "J20-23", "M40-44", "M45-49", "M50-54",
    "M55-59", "M60-64", "M65-69", "M70-74", "M75-79", "M80+",
];

/// Lifts contested in each event.
pub const LIFTS_BY_EVENT: &[(Event, &[Lift])] = &[
    (
        Event::FullMeet,
        &[Lift::Squat, Lift::Bench, Lift::Deadlift, Lift::Total],
    ),
    (Event::BenchOnly, &[Lift::Bench]),
    (Event::DeadliftOnly, &[Lift::Deadlift]),
];

/// Equipment categories each lift may be filed under, before the
/// `Unlimited` restriction is applied.
pub const EQUIPMENT_BY_LIFT: &[(Lift, &[Equipment])] = &[
    (
        Lift::Squat,
        &[
            Equipment::Wraps,
            Equipment::Sleeves,
            Equipment::Bare,
            Equipment::SinglePly,
            Equipment::MultiPly,
            Equipment::Unlimited,
        ],
    ),
    (
        Lift::Bench,
        &[
            Equipment::Raw,
            Equipment::SinglePly,
            Equipment::MultiPly,
            Equipment::Unlimited,
        ],
    ),
    (
        Lift::Deadlift,
        &[
            Equipment::Raw,
            Equipment::SinglePly,
            Equipment::MultiPly,
            Equipment::Unlimited,
        ],
    ),
    (
        Lift::Total,
        &[
            Equipment::Wraps,
            Equipment::Sleeves,
            Equipment::Bare,
            Equipment::SinglePly,
            Equipment::MultiPly,
            Equipment::Unlimited,
        ],
    ),
];

fn lifts_for(event: Event) -> &'static [Lift] {
    LIFTS_BY_EVENT
        .iter()
        .find(|(e, _)| *e == event)
        .map(|(_, lifts)| *lifts)
        .unwrap_or(&[])
}

fn equipment_for(lift: Lift) -> &'static [Equipment] {
    EQUIPMENT_BY_LIFT
        .iter()
        .find(|(l, _)| *l == lift)
        .map(|(_, equipment)| *equipment)
        .unwrap_or(&[])
}

/// Legality predicate over one point of the product space.
///
/// `division` is the bracket name without the tested suffix.
pub fn is_legal(
    sex: Sex,
    division: &str,
    event: Event,
    equipment: Equipment,
    weight_class: &str,
    lift: Lift,
) -> bool {
    if !DIVISIONS.contains(&division) || !sex.weight_classes().contains(&weight_class) {
        return false;
    }
    if !lifts_for(event).contains(&lift) || !equipment_for(lift).contains(&equipment) {
        return false;
    }
    equipment != Equipment::Unlimited || (event == Event::BenchOnly && lift == Lift::Bench)
}

/// Membership set of every legal key string.
///
/// Generated once per run and only consulted for membership.
#[derive(Clone, Debug)]
pub struct Keyspace {
    keys: HashSet<String>,
}

impl Keyspace {
    /// Enumerate the full product space through [`is_legal`].
    pub fn generate() -> Self {
        let mut keys = HashSet::new();
        for sex in Sex::ALL {
            for name in DIVISIONS {
                for tested in [false, true] {
                    let division = Division {
                        name: (*name).to_string(),
                        tested,
                    };
                    for event in Event::ALL {
                        for lift in Lift::ALL {
                            for equipment in Equipment::ALL {
                                for class in sex.weight_classes() {
                                    if is_legal(sex, name, event, equipment, class, lift) {
                                        keys.insert(format!(
                                            "{sex}|{division}|{event}|{equipment}|{class}|{lift}"
                                        ));
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        Self { keys }
    }

    /// Whether `key` is a legal classification key string.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::generate()
    }
}
