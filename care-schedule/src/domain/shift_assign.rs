use chrono::NaiveDate;

use crate::application::time::date_key;
use crate::domain::models::Person;
use crate::domain::shift_role::{Language, ShiftInfo, ShiftRole};

/// Unit used when a person carries no unit of their own
pub const DEFAULT_UNIT_ID: &str = "u1";

/// The one unit that rotates the development catalog instead of care shifts
pub const DEVELOPMENT_UNIT_ID: &str = "u3";

/// Computes the role `person_id` works on `date` in `unit_id`.
///
/// Pure: the result depends only on the arguments. There is no stored shift
/// table, every date (past or future) is derived the same way.
///
/// ```text
/// roster ──filter(unit, staff)──sort(id)──> [s1, s2,  s3, s4, s5, s6, s7, s8 ]
///                                             0   1    2   3   4   5   6   7
/// pool   = rotation + off padding  ────────> [mr, mb,  er, eb, nr, nb, off, off]
/// shuffle(seed(2024-03-15, u1))    ────────> [er, off, nb, mb, eb, mr, nr, off]
/// s3 -> pool[2] = nb
/// ```
pub fn assign_shift(person_id: &str, date: NaiveDate, unit_id: &str, roster: &[Person]) -> ShiftRole {
    let unit_staff = unit_shift_staff(unit_id, roster);

    let Some(index) = unit_staff.iter().position(|person| person.id == person_id) else {
        return ShiftRole::Off;
    };

    shuffled_pool(date, unit_id, unit_staff.len())[index]
}

/// Assigns the whole unit for one day at once
pub fn assign_unit_day<'a>(unit_id: &str, date: NaiveDate, roster: &'a [Person]) -> Vec<(&'a Person, ShiftRole)> {
    let unit_staff = unit_shift_staff(unit_id, roster);
    let pool = shuffled_pool(date, unit_id, unit_staff.len());

    unit_staff.into_iter().zip(pool).collect()
}

/// Looks the person up in the roster to find their unit, then assigns.
/// Persons missing from the roster or without a unit fall back to
/// [`DEFAULT_UNIT_ID`], which in practice yields `off`.
pub fn shift_for_person(person_id: &str, date: NaiveDate, roster: &[Person], lang: Language) -> ShiftInfo {
    let unit_id = roster
        .iter()
        .find(|person| person.id == person_id)
        .and_then(|person| person.unit_id.as_deref())
        .unwrap_or(DEFAULT_UNIT_ID);

    assign_shift(person_id, date, unit_id, roster).info(lang)
}

/// Care staff of `unit_id`, ordered by id so the index never depends on roster order
pub fn unit_shift_staff<'a>(unit_id: &str, roster: &'a [Person]) -> Vec<&'a Person> {
    let mut staff: Vec<&Person> = roster
        .iter()
        .filter(|person| person.unit_id.as_deref() == Some(unit_id) && person.role.is_shift_staff())
        .collect();
    staff.sort_by(|a, b| a.id.cmp(&b.id));
    staff
}

pub fn active_roles(unit_id: &str) -> &'static [ShiftRole] {
    if unit_id == DEVELOPMENT_UNIT_ID {
        &ShiftRole::DEVELOPMENT_ROTATION
    } else {
        &ShiftRole::CARE_ROTATION
    }
}

/// Rotation padded with `off` until every staff member has a slot
pub fn shift_pool(unit_id: &str, staff_count: usize) -> Vec<ShiftRole> {
    let mut pool = active_roles(unit_id).to_vec();
    if pool.len() < staff_count {
        pool.resize(staff_count, ShiftRole::Off);
    }
    pool
}

/// Sum of the UTF-16 code units of `"YYYY-MM-DD" + unit_id`
pub fn day_seed(date: NaiveDate, unit_id: &str) -> u32 {
    date_key(date)
        .encode_utf16()
        .chain(unit_id.encode_utf16())
        .map(u32::from)
        .sum()
}

/// `frac(sin(x) * 10000)`, always in `[0, 1)`
pub fn pseudo_random(x: f64) -> f64 {
    let scaled = x.sin() * 10000.0;
    scaled - scaled.floor()
}

/// Fisher-Yates over the padded pool, drawing `floor(pseudo_random(seed + i) * (i + 1))`
/// from the last index down to 1. Other clients derive the same roster from this
/// exact sequence, so neither the generator nor the loop order may change.
pub fn shuffled_pool(date: NaiveDate, unit_id: &str, staff_count: usize) -> Vec<ShiftRole> {
    let mut pool = shift_pool(unit_id, staff_count);
    let seed = f64::from(day_seed(date, unit_id));

    for i in (1..pool.len()).rev() {
        let draw = (pseudo_random(seed + i as f64) * (i + 1) as f64).floor() as usize;
        // frac() can round up to exactly 1.0
        let j = draw.min(i);
        pool.swap(i, j);
    }
    pool
}
