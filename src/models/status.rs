use serde::Serialize;

/// Attendance status of an entry. Seeded into the `statuses` table by the
/// migrations; the three absence kinds double as the reason selector options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusKind {
    Present,
    Excused,
    Unexcused,
    Sick,
}

impl StatusKind {
    pub const ALL: [StatusKind; 4] = [
        StatusKind::Present,
        StatusKind::Excused,
        StatusKind::Unexcused,
        StatusKind::Sick,
    ];

    /// Convert enum → DB label
    pub fn label(&self) -> &'static str {
        match self {
            StatusKind::Present => "Present",
            StatusKind::Excused => "Excused",
            StatusKind::Unexcused => "Unexcused",
            StatusKind::Sick => "Sick",
        }
    }

    /// Convert DB label → enum
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s.trim()))
    }

    /// Single-letter code used in the monthly grid.
    pub fn initial(&self) -> char {
        match self {
            StatusKind::Present => 'P',
            StatusKind::Excused => 'E',
            StatusKind::Unexcused => 'U',
            StatusKind::Sick => 'S',
        }
    }

    pub fn is_absence(&self) -> bool {
        !matches!(self, StatusKind::Present)
    }

    /// Options offered by the reason selector of an absent row.
    pub fn reasons() -> impl Iterator<Item = StatusKind> {
        Self::ALL.into_iter().filter(StatusKind::is_absence)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub id: i64,
    pub kind: StatusKind,
}
