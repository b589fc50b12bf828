use chrono::NaiveDate;

use care_schedule::domain::models::Person;
use care_schedule::domain::shift_role::{Language, ShiftRole};

pub fn show_unit_day_debug_data(unit_id: &str, date: NaiveDate, assignment: &[(&Person, ShiftRole)]) {
    println!("\n=======================================================");
    println!("[DEBUG] {} on {} ({} staff)", unit_id, date, assignment.len());
    println!("=======================================================");
    for (person, role) in assignment {
        let info = role.info(Language::En);
        println!("   {:<6} {:<14} {:<16} {}", person.id, role.as_str(), info.label, info.time);
    }
    println!("=======================================================\n");
}
