use serde::Serialize;

/// A class of students (one attendance sheet per group and day).
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}
