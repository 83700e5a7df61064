use std::fmt::Write as _;

use chrono::{DateTime, Local, Timelike};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Length of a self-assigned id, in hex characters.
pub const ID_LEN: usize = 16;

/// Timestamp rendering fed into the id hash. Second resolution, so two
/// identical items created within the same second collide.
const HASH_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// A stored field that failed to parse while rehydrating an item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected `{field}` as {expected}, got `{value}`")]
pub struct FormatError {
    pub field: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// A single todo entry.
///
/// The id is assigned once at construction and never changes. Timestamps
/// are kept at second resolution, the resolution the stored format keeps.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_done: bool,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl TodoItem {
    /// Creates a new item with a freshly assigned id and both timestamps
    /// set to now.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let title = title.into();
        let description = description.into();
        let now = now_secs();
        let id = assign_id(&title, &description, now);
        Self {
            id,
            title,
            description,
            is_done: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs an item from its stored textual fields.
    ///
    /// Only used when rehydrating from storage: the id is taken verbatim,
    /// never re-hashed. `is_done` must be `true` or `false`; the two
    /// timestamps must be RFC 3339.
    pub fn from_fields(
        id: &str,
        title: &str,
        description: &str,
        is_done: &str,
        created_at: &str,
        updated_at: &str,
    ) -> Result<Self, FormatError> {
        let is_done = is_done.parse::<bool>().map_err(|_| FormatError {
            field: "is_done",
            expected: "boolean",
            value: is_done.to_string(),
        })?;
        let created_at = parse_timestamp("created_at", created_at)?;
        let updated_at = parse_timestamp("updated_at", updated_at)?;
        Ok(Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            is_done,
            created_at,
            updated_at,
        })
    }

    /// Marks the item complete. A no-op when it already is.
    pub fn mark_done(&mut self) {
        if self.is_done {
            return;
        }
        self.is_done = true;
        self.touch();
    }

    /// Marks the item incomplete. A no-op when it already is.
    pub fn mark_undone(&mut self) {
        if !self.is_done {
            return;
        }
        self.is_done = false;
        self.touch();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = now_secs();
    }
}

/// Derives an id from the item's content and creation second, as a
/// truncated hex digest.
///
/// This is a convenience id, not a uniqueness guarantee: two items with
/// the same title and description created within the same second collide.
/// Acceptable for a single-user local list.
fn assign_id(title: &str, description: &str, created_at: DateTime<Local>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(description.as_bytes());
    hasher.update(
        created_at
            .format(HASH_TIMESTAMP_FORMAT)
            .to_string()
            .as_bytes(),
    );
    let digest = hasher.finalize();

    let mut id = String::with_capacity(ID_LEN);
    for byte in &digest[..ID_LEN / 2] {
        let _ = write!(id, "{byte:02x}");
    }
    id
}

fn now_secs() -> DateTime<Local> {
    let now = Local::now();
    now.with_nanosecond(0).unwrap_or(now)
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Local>, FormatError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Local))
        .map_err(|_| FormatError {
            field,
            expected: "RFC 3339 timestamp",
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SecondsFormat;

    #[test]
    fn new_item_starts_undone_with_assigned_id() {
        let todo = TodoItem::new("buy milk", "2% lowfat");
        assert!(!todo.is_done);
        assert_eq!(todo.id.len(), ID_LEN);
        assert!(todo.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn different_content_hashes_to_different_ids() {
        let a = TodoItem::new("buy milk", "");
        let b = TodoItem::new("walk the dog", "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn from_fields_round_trips_a_created_item() {
        let todo = TodoItem::new("buy milk", "2% lowfat");
        let rehydrated = TodoItem::from_fields(
            &todo.id,
            &todo.title,
            &todo.description,
            &todo.is_done.to_string(),
            &todo.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            &todo.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
        .unwrap();
        assert_eq!(rehydrated, todo);
    }

    #[test]
    fn from_fields_keeps_stored_id_verbatim() {
        let todo = TodoItem::from_fields(
            "deadbeef00112233",
            "title",
            "",
            "true",
            "2026-08-06T09:30:00+02:00",
            "2026-08-06T09:30:00+02:00",
        )
        .unwrap();
        assert_eq!(todo.id, "deadbeef00112233");
        assert!(todo.is_done);
    }

    #[test]
    fn from_fields_rejects_bad_boolean() {
        let err = TodoItem::from_fields(
            "id",
            "t",
            "",
            "yes",
            "2026-08-06T09:30:00Z",
            "2026-08-06T09:30:00Z",
        )
        .unwrap_err();
        assert_eq!(err.field, "is_done");
        assert_eq!(err.value, "yes");
    }

    #[test]
    fn from_fields_rejects_bad_timestamps() {
        let err = TodoItem::from_fields("id", "t", "", "false", "not-a-date", "2026-08-06T09:30:00Z")
            .unwrap_err();
        assert_eq!(err.field, "created_at");

        let err = TodoItem::from_fields("id", "t", "", "false", "2026-08-06T09:30:00Z", "someday")
            .unwrap_err();
        assert_eq!(err.field, "updated_at");
    }

    #[test]
    fn mark_done_flips_state_and_refreshes_updated_at() {
        let mut todo = TodoItem::new("buy milk", "");
        let rewound = todo.updated_at - chrono::Duration::seconds(60);
        todo.updated_at = rewound;

        todo.mark_done();
        assert!(todo.is_done);
        assert!(todo.updated_at > rewound);
    }

    #[test]
    fn mark_done_when_already_done_is_a_noop() {
        let mut todo = TodoItem::new("buy milk", "");
        todo.mark_done();
        let rewound = todo.updated_at - chrono::Duration::seconds(60);
        todo.updated_at = rewound;

        todo.mark_done();
        assert_eq!(todo.updated_at, rewound);
    }

    #[test]
    fn mark_undone_flips_state_back() {
        let mut todo = TodoItem::new("buy milk", "");
        todo.mark_done();
        todo.mark_undone();
        assert!(!todo.is_done);

        let rewound = todo.updated_at - chrono::Duration::seconds(60);
        todo.updated_at = rewound;
        todo.mark_undone();
        assert_eq!(todo.updated_at, rewound);
    }

    #[test]
    fn setters_refresh_updated_at() {
        let mut todo = TodoItem::new("buy milk", "");
        let rewound = todo.updated_at - chrono::Duration::seconds(60);
        todo.updated_at = rewound;

        todo.set_title("buy oat milk");
        assert_eq!(todo.title, "buy oat milk");
        assert!(todo.updated_at > rewound);

        let rewound = todo.updated_at - chrono::Duration::seconds(60);
        todo.updated_at = rewound;
        todo.set_description("from the corner shop");
        assert_eq!(todo.description, "from the corner shop");
        assert!(todo.updated_at > rewound);
    }
}
