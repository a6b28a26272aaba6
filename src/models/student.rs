use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Student {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub group_id: i64,
}

impl Student {
    /// Name as shown in the first cell of a sheet row.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
