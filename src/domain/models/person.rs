use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A member of the fixed roster that calendar entries can be assigned to.
///
/// The roster is configuration, not data: adding someone means adding a
/// variant here. Variant order is the row order of the week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Person {
    RichardGumpinger,
    SimonHoeld,
    BennetWylezol,
}

impl Person {
    pub const ALL: [Person; 3] = [
        Person::RichardGumpinger,
        Person::SimonHoeld,
        Person::BennetWylezol,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Person::RichardGumpinger => "richard-gumpinger",
            Person::SimonHoeld => "simon-hoeld",
            Person::BennetWylezol => "bennet-wylezol",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Person::RichardGumpinger => "Richard Gumpinger",
            Person::SimonHoeld => "Simon Höld",
            Person::BennetWylezol => "Bennet Wylezol",
        }
    }

    /// Strict lookup by slug, used for stored assignment rows.
    pub fn from_id(id: &str) -> Option<Person> {
        Person::ALL.into_iter().find(|p| p.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPerson(pub String);

impl fmt::Display for UnknownPerson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not on the roster", self.0)
    }
}

impl FromStr for Person {
    type Err = UnknownPerson;

    // Older forms submit the display name, so both forms resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Person::ALL
            .into_iter()
            .find(|p| p.id() == needle || p.display_name() == needle)
            .ok_or_else(|| UnknownPerson(s.to_string()))
    }
}

impl TryFrom<String> for Person {
    type Error = UnknownPerson;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for Person {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PersonView::from(*self).serialize(serializer)
    }
}

/// Wire shape of a roster member.
#[derive(Debug, Serialize, Clone)]
pub struct PersonView {
    pub id: &'static str,
    pub display_name: &'static str,
}

impl From<Person> for PersonView {
    fn from(person: Person) -> Self {
        Self {
            id: person.id(),
            display_name: person.display_name(),
        }
    }
}

pub fn list_roster() -> Vec<PersonView> {
    Person::ALL.into_iter().map(PersonView::from).collect()
}
