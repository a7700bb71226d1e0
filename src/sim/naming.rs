//! Greek polygon names from a side count
//!
//! Traditional names up to 19, then tens/units compounding joined with the
//! infix "kai", then hundreds compounding that recurses into the general
//! case. Anything from 1000 sides up falls back to "{n}-gon".

use crate::error::{Result, ToyError};

/// Suffix every composed name ends with
pub const SUFFIX: &str = "gon";
/// Infix joining compounded prefixes
pub const INFIX: &str = "kai";
/// Smallest side count that gets the numeric fallback
pub const FALLBACK_THRESHOLD: u32 = 1000;

const TRADITIONAL: [&str; 12] = [
    "monogon",
    "digon",
    "triangle",
    "quadrilateral",
    "pentagon",
    "hexagon",
    "heptagon",
    "octagon",
    "nonagon",
    "decagon",
    "hendecagon",
    "dodecagon",
];

/// Indexed by `n - 13`
const TEENS: [&str; 7] = [
    "tridecagon",
    "tetradecagon",
    "pentadecagon",
    "hexadecagon",
    "heptadecagon",
    "octadecagon",
    "enneadecagon",
];

/// Indexed by digit; slot 0 is unused
const UNITS: [&str; 10] = [
    "", "hen", "di", "tri", "tetra", "penta", "hexa", "hepta", "octa", "ennea",
];

const TENS: [&str; 10] = [
    "",
    "deca",
    "icosa",
    "triaconta",
    "tetraconta",
    "pentaconta",
    "hexaconta",
    "heptaconta",
    "octaconta",
    "enneaconta",
];

const HUNDREDS: [&str; 10] = [
    "",
    "hecta",
    "dihecta",
    "trihecta",
    "tetrahecta",
    "pentahecta",
    "hexahecta",
    "heptahecta",
    "octahecta",
    "enneahecta",
];

/// Name of a regular polygon with `sides` sides.
///
/// Fails with [`ToyError::InvalidArgument`] for zero sides.
pub fn polygon_name(sides: u32) -> Result<String> {
    match sides {
        0 => Err(ToyError::invalid("side count must be at least 1, got 0")),
        1..=12 => lookup(&TRADITIONAL, "traditional", sides - 1).map(str::to_owned),
        13..=19 => lookup(&TEENS, "teens", sides - 13).map(str::to_owned),
        20..=99 => {
            let mut name = lookup(&TENS, "tens", sides / 10)?.to_owned();
            let units = sides % 10;
            if units != 0 {
                name.push_str(INFIX);
                name.push_str(lookup(&UNITS, "units", units)?);
            }
            name.push_str(SUFFIX);
            Ok(name)
        }
        100..=999 => {
            let mut name = lookup(&HUNDREDS, "hundreds", sides / 100)?.to_owned();
            let remainder = sides % 100;
            if remainder != 0 {
                let inner = polygon_name(remainder)?;
                name.push_str(INFIX);
                name.push_str(strip_suffix(&inner));
            }
            name.push_str(SUFFIX);
            Ok(name)
        }
        _ => Ok(format!("{sides}-{SUFFIX}")),
    }
}

/// Trim one trailing "gon" off a name.
///
/// Only the end of the string is considered, so a "gon" anywhere else is
/// left alone. Names that do not end in "gon" ("triangle") are returned
/// unchanged.
pub fn strip_suffix(name: &str) -> &str {
    name.strip_suffix(SUFFIX).unwrap_or(name)
}

/// Announcement line for a polygon name
pub fn exclaim(name: &str) -> String {
    format!("{name}!")
}

fn lookup(table: &[&'static str], table_name: &'static str, key: u32) -> Result<&'static str> {
    table
        .get(key as usize)
        .copied()
        .filter(|prefix| !prefix.is_empty())
        .ok_or(ToyError::LookupGap {
            table: table_name,
            key,
        })
}
