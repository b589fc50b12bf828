use care_schedule::domain::models::{Person, PersonRole};

pub fn person(id: &str, role: PersonRole, unit_id: Option<&str>) -> Person {
    Person {
        id: id.to_string(),
        name: format!("Name {id}"),
        role,
        unit_id: unit_id.map(String::from),
        username: None,
        avatar: None,
    }
}

pub fn staff(id: &str, unit_id: &str) -> Person {
    person(id, PersonRole::Staff, Some(unit_id))
}

/// `count` care staff named `{prefix}1..{prefix}{count}` in one unit
pub fn unit_staff(prefix: &str, unit_id: &str, count: usize) -> Vec<Person> {
    (1..=count).map(|n| staff(&format!("{prefix}{n}"), unit_id)).collect()
}

/// Eight staff in u1, five in u3, plus people who never work shifts
pub fn mixed_roster() -> Vec<Person> {
    let mut roster = unit_staff("s", "u1", 8);
    roster.extend(unit_staff("d", "u3", 5));
    roster.push(person("p1", PersonRole::Personal, Some("u2")));
    roster.push(person("b1", PersonRole::User, Some("u1")));
    roster.push(person("a1", PersonRole::Admin, Some("u1")));
    roster.push(person("n1", PersonRole::Staff, None));
    roster
}
