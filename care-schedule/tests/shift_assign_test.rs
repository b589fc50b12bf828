mod tools;

#[cfg(test)]
mod shift_assign_tests {
    use std::collections::HashSet;

    use chrono::{Duration, NaiveDate};

    use care_schedule::application::time::date_range;
    use care_schedule::domain::models::Person;
    use care_schedule::domain::shift_assign::{assign_shift, assign_unit_day, shift_for_person};
    use care_schedule::domain::shift_role::{Language, ShiftRole};

    use crate::tools::roster::{mixed_roster, unit_staff};
    use crate::tools::show_output::show_unit_day_debug_data;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Ninety days spanning a month and a year boundary
    fn sample_days() -> Vec<NaiveDate> {
        let start = date(2023, 12, 1);
        date_range(start, start + Duration::days(89))
    }

    fn roles_of(unit_id: &str, day: NaiveDate, roster: &[Person]) -> Vec<ShiftRole> {
        assign_unit_day(unit_id, day, roster).into_iter().map(|(_, role)| role).collect()
    }

    #[test]
    fn test_reference_day() {
        let roster = mixed_roster();
        let day = date(2024, 3, 15);

        let assignment = assign_unit_day("u1", day, &roster);
        show_unit_day_debug_data("u1", day, &assignment);

        let ids: Vec<&str> = assignment.iter().map(|(person, _)| person.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8"]);
        assert_eq!(assign_shift("s3", day, "u1", &roster), ShiftRole::NightBlue);
        assert_eq!(assign_shift("s2", day, "u1", &roster), ShiftRole::Off);
        assert_eq!(assign_shift("d1", day, "u3", &roster), ShiftRole::DevBeta);
    }

    #[test]
    fn test_same_inputs_same_role_regardless_of_roster_order() {
        let roster = mixed_roster();
        let mut reversed = roster.clone();
        reversed.reverse();
        let mut rotated = roster.clone();
        rotated.rotate_left(5);

        for day in sample_days() {
            for person in roster.iter().filter(|p| p.unit_id.is_some()) {
                let unit = person.unit_id.as_deref().unwrap();
                let role = assign_shift(&person.id, day, unit, &roster);
                assert_eq!(role, assign_shift(&person.id, day, unit, &roster));
                assert_eq!(role, assign_shift(&person.id, day, unit, &reversed));
                assert_eq!(role, assign_shift(&person.id, day, unit, &rotated));
            }
        }
    }

    #[test]
    fn test_more_staff_than_roles_leaves_exactly_the_overflow_off() {
        let roster = unit_staff("s", "u1", 9);

        for day in sample_days() {
            let roles = roles_of("u1", day, &roster);
            let working: Vec<ShiftRole> = roles.iter().copied().filter(|r| *r != ShiftRole::Off).collect();

            assert_eq!(working.len(), 6, "{day}");
            assert_eq!(roles.len() - working.len(), 3, "{day}");
            let distinct: HashSet<ShiftRole> = working.iter().copied().collect();
            assert_eq!(distinct.len(), 6, "{day}");
        }
    }

    #[test]
    fn test_fewer_staff_than_roles_all_work_distinct_roles() {
        for count in 1..=6 {
            let roster = unit_staff("s", "u2", count);
            for day in sample_days() {
                let roles = roles_of("u2", day, &roster);
                assert!(roles.iter().all(|r| *r != ShiftRole::Off), "{count} staff on {day}");
                let distinct: HashSet<ShiftRole> = roles.iter().copied().collect();
                assert_eq!(distinct.len(), count);
            }
        }
    }

    #[test]
    fn test_development_unit_uses_its_own_catalog() {
        let roster = mixed_roster();

        for day in sample_days() {
            for role in roles_of("u3", day, &roster) {
                assert!(
                    role == ShiftRole::Off || ShiftRole::DEVELOPMENT_ROTATION.contains(&role),
                    "{role} in u3"
                );
            }
            for role in roles_of("u1", day, &roster) {
                assert!(!ShiftRole::DEVELOPMENT_ROTATION.contains(&role), "{role} in u1");
                assert_ne!(role, ShiftRole::AdminDay);
            }
        }
    }

    #[test]
    fn test_outsiders_are_always_off() {
        let roster = mixed_roster();

        for day in sample_days() {
            // care recipient and admin in u1
            assert_eq!(assign_shift("b1", day, "u1", &roster), ShiftRole::Off);
            assert_eq!(assign_shift("a1", day, "u1", &roster), ShiftRole::Off);
            // staff asked about another unit
            assert_eq!(assign_shift("s1", day, "u3", &roster), ShiftRole::Off);
            assert_eq!(assign_shift("ghost", day, "u1", &roster), ShiftRole::Off);
        }
    }

    #[test]
    fn test_adding_other_units_does_not_move_assignments() {
        let u1_only = unit_staff("s", "u1", 8);
        let roster = mixed_roster();

        for day in sample_days() {
            assert_eq!(roles_of("u1", day, &u1_only), roles_of("u1", day, &roster));
        }
    }

    #[test]
    fn test_shift_for_person_resolves_unit_from_roster() {
        let roster = mixed_roster();
        let day = date(2024, 3, 15);

        let info = shift_for_person("s3", day, &roster, Language::En);
        assert_eq!(info.id, ShiftRole::NightBlue);
        assert_eq!(info.label, "Night (Blue)");
        assert_eq!(info.time, "21:00 - 07:00");

        // the label follows the language, the role does not
        assert_eq!(shift_for_person("s3", day, &roster, Language::Ar).id, info.id);

        // no unit: falls back to u1, where they are not listed
        assert!(shift_for_person("n1", day, &roster, Language::Sv).is_off());
        assert!(shift_for_person("ghost", day, &roster, Language::Sv).is_off());
    }
}
