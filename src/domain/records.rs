//! Catalog records
//!
//! Course and user account shapes as the REST backend returns them.
//! Decoding is lenient about the parts the report does not depend on:
//! prices may be missing, owners may be embedded objects, and enrollments
//! come either as bare course ids or as objects wrapping one.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{Money, RecordId};

/// Owner key used for courses that name no instructor.
pub const UNASSIGNED_OWNER_KEY: &str = "unassigned";

/// Display name used for courses that name no instructor.
pub const UNASSIGNED_OWNER_NAME: &str = "Unassigned";

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(alias = "_id")]
    pub id: RecordId,

    #[serde(default)]
    pub title: Option<String>,

    /// Owning instructor
    #[serde(default, rename = "instructor")]
    pub owner: Option<OwnerRef>,

    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Money,
}

impl Course {
    pub fn new(id: RecordId, owner: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            title: None,
            owner: Some(OwnerRef::Key(owner.into())),
            price,
        }
    }

    /// Resolve who this course's revenue is attributed to.
    pub fn owner_identity(&self) -> OwnerIdentity {
        self.owner
            .as_ref()
            .and_then(OwnerRef::identity)
            .unwrap_or_else(OwnerIdentity::unassigned)
    }
}

/// Reference to a course's instructor.
///
/// Older endpoints return the instructor's name as a plain string; populated
/// endpoints embed the instructor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
    Key(String),
    Embedded {
        #[serde(default, alias = "_id")]
        id: Option<RecordId>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl OwnerRef {
    /// Key and display name, or `None` when the reference is blank.
    pub fn identity(&self) -> Option<OwnerIdentity> {
        match self {
            OwnerRef::Key(key) => {
                let key = key.trim();
                (!key.is_empty()).then(|| OwnerIdentity {
                    key: key.to_string(),
                    name: key.to_string(),
                })
            }
            OwnerRef::Embedded { id, name } => {
                let name = name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty());
                let key = id
                    .as_ref()
                    .map(|id| id.as_str().to_string())
                    .or_else(|| name.map(str::to_string))?;
                Some(OwnerIdentity {
                    name: name.map(str::to_string).unwrap_or_else(|| key.clone()),
                    key,
                })
            }
        }
    }
}

/// Grouping key of an owner plus the name shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerIdentity {
    pub key: String,
    pub name: String,
}

impl OwnerIdentity {
    pub fn unassigned() -> Self {
        Self {
            key: UNASSIGNED_OWNER_KEY.to_string(),
            name: UNASSIGNED_OWNER_NAME.to_string(),
        }
    }
}

/// A user account together with its enrollments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(alias = "_id")]
    pub id: RecordId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default, rename = "enrolledCourses", deserialize_with = "null_as_empty")]
    pub enrollments: Vec<Enrollment>,
}

impl UserAccount {
    pub fn new(id: RecordId, enrollments: Vec<Enrollment>) -> Self {
        Self {
            id,
            name: None,
            email: None,
            enrollments,
        }
    }
}

/// One entry of a user's `enrolledCourses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Enrollment {
    /// `"c1"`
    Bare(RecordId),
    /// `{ "courseId": "c1" }`, `{ "course": { "_id": "c1" } }`, ...
    Wrapped(WrappedEnrollment),
    /// Anything else; kept so one odd entry does not reject the account.
    Unrecognized(Value),
}

/// Object form of an enrollment.
///
/// Each member decodes on its own: a member that fails to decode reads as
/// absent instead of demoting the whole entry to `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedEnrollment {
    #[serde(
        default,
        rename = "courseId",
        deserialize_with = "lenient_member",
        skip_serializing_if = "Option::is_none"
    )]
    pub course_id: Option<CourseField>,

    #[serde(
        default,
        deserialize_with = "lenient_member",
        skip_serializing_if = "Option::is_none"
    )]
    pub course: Option<CourseField>,

    /// Present when the enrollment is the populated course document itself.
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient_member",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
}

/// A course reference inside a wrapped enrollment: an id or a populated
/// course document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseField {
    Id(RecordId),
    Document {
        #[serde(default, alias = "_id", deserialize_with = "lenient_member")]
        id: Option<RecordId>,
    },
}

impl CourseField {
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            CourseField::Id(id) => Some(id),
            CourseField::Document { id } => id.as_ref(),
        }
    }
}

/// Normalized course reference of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseRef<'a> {
    BareId(&'a RecordId),
    WrappedId(&'a RecordId),
}

impl<'a> CourseRef<'a> {
    pub fn id(&self) -> &'a RecordId {
        match self {
            CourseRef::BareId(id) | CourseRef::WrappedId(id) => id,
        }
    }
}

impl Enrollment {
    /// Bare-id enrollment, mostly for building fixtures.
    pub fn bare(id: RecordId) -> Self {
        Enrollment::Bare(id)
    }

    /// Referenced course id, or `None` when the entry names no course.
    ///
    /// Wrapped forms are tried in order: `courseId`, `course`, own id.
    pub fn course_ref(&self) -> Option<CourseRef<'_>> {
        match self {
            Enrollment::Bare(id) => Some(CourseRef::BareId(id)),
            Enrollment::Wrapped(wrapped) => wrapped
                .course_id
                .as_ref()
                .and_then(CourseField::id)
                .or_else(|| wrapped.course.as_ref().and_then(CourseField::id))
                .or(wrapped.id.as_ref())
                .map(CourseRef::WrappedId),
            Enrollment::Unrecognized(_) => None,
        }
    }
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(Money::from_json_lenient).unwrap_or_default())
}

fn lenient_member<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
