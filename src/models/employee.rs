use super::position::{Gender, Position, Status};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Roster entry stored in the `Employee` collection.
///
/// Documents are written by other clients too, so reading is lenient:
/// an empty or unknown position/gender reads as `None`, and any status other
/// than `"active"` reads as inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient_position",
        serialize_with = "blank_if_none"
    )]
    pub position: Option<Position>,
    #[serde(
        default,
        deserialize_with = "lenient_gender",
        serialize_with = "blank_if_none"
    )]
    pub gender: Option<Gender>,
    #[serde(default = "missing_status", deserialize_with = "lenient_status")]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// Fields collected by the add/edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeForm {
    pub name: String,
    pub email: String,
    pub position: Option<Position>,
    pub gender: Option<Gender>,
}

/// Partial edit: only the `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.position.is_none()
            && self.gender.is_none()
            && self.status.is_none()
    }

    pub fn apply_to(&self, e: &mut Employee) {
        if let Some(v) = &self.name {
            e.name = v.clone();
        }
        if let Some(v) = &self.email {
            e.email = v.clone();
        }
        if let Some(v) = self.position {
            e.position = Some(v);
        }
        if let Some(v) = self.gender {
            e.gender = Some(v);
        }
        if let Some(v) = self.status {
            e.status = v;
        }
    }
}

impl Employee {
    pub fn position_str(&self) -> &str {
        self.position.as_ref().map(|p| p.as_str()).unwrap_or("")
    }

    pub fn gender_str(&self) -> &str {
        self.gender.as_ref().map(|g| g.as_str()).unwrap_or("")
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

fn missing_status() -> Status {
    Status::Inactive
}

fn lenient_position<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Position>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.as_deref().and_then(Position::from_code))
}

fn lenient_gender<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Gender>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.as_deref().and_then(Gender::from_code))
}

fn lenient_status<'de, D: Deserializer<'de>>(d: D) -> Result<Status, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(match raw.as_deref() {
        Some("active") => Status::Active,
        _ => Status::Inactive,
    })
}

fn blank_if_none<T: Serialize, S: Serializer>(v: &Option<T>, s: S) -> Result<S::Ok, S::Error> {
    match v {
        Some(inner) => inner.serialize(s),
        None => s.serialize_str(""),
    }
}
