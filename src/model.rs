use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Registry-assigned entity id. Each registry counts up from 1 and never
/// reuses an id within a process lifetime.
pub type Id = u32;

/// Whether a room accepts new reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Active,
    Inactive,
}

impl RoomStatus {
    pub fn is_active(self) -> bool {
        matches!(self, RoomStatus::Active)
    }
}

impl Default for RoomStatus {
    fn default() -> Self {
        RoomStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub capacity: u32,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
}

/// A booking of one room by one user for a `[start, end)` window on a single
/// calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Id,
    pub user_id: Id,
    pub room_id: Id,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub reason: String,
}

impl Reservation {
    pub fn slot(&self) -> Slot {
        Slot::new(self.start_time, self.end_time)
    }
}

/// Half-open wall-clock window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Slot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Half-open overlap test: windows that merely touch do not overlap.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Reservations carry times as zero-padded `HH:MM` on the wire.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M").map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn slot(start: &str, end: &str) -> Slot {
        Slot::new(t(start), t(end))
    }

    #[test]
    fn slot_overlap() {
        let a = slot("09:00", "10:00");
        let b = slot("09:30", "10:30");
        let c = slot("10:00", "11:00");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c)); // touching, not overlapping
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn slot_containment_overlaps() {
        let outer = slot("09:00", "11:00");
        let inner = slot("09:30", "10:30");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
        assert!(outer.overlaps(&outer)); // identical windows conflict
    }

    #[test]
    fn room_status_wire_names() {
        assert_eq!(serde_json::to_string(&RoomStatus::Active).unwrap(), "\"active\"");
        let s: RoomStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(s, RoomStatus::Inactive);
        assert!(serde_json::from_str::<RoomStatus>("\"open\"").is_err());
    }

    #[test]
    fn reservation_json_shape() {
        let r = Reservation {
            id: 3,
            user_id: 1,
            room_id: 2,
            date: NaiveDate::from_ymd_opt(2026, 12, 10).unwrap(),
            start_time: t("09:00"),
            end_time: t("10:30"),
            reason: "planning".into(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["date"], "2026-12-10");
        assert_eq!(v["start_time"], "09:00");
        assert_eq!(v["end_time"], "10:30");
        assert_eq!(v["user_id"], 1);
        assert_eq!(v["room_id"], 2);
    }

    #[test]
    fn room_json_uses_type_key() {
        let room = Room {
            id: 1,
            name: "Lab 01".into(),
            kind: "laboratory".into(),
            capacity: 30,
            status: RoomStatus::Active,
        };
        let v = serde_json::to_value(&room).unwrap();
        assert_eq!(v["type"], "laboratory");
        assert_eq!(v["status"], "active");
    }

    #[test]
    fn hhmm_roundtrip_rejects_seconds() {
        let r: Result<Reservation, _> = serde_json::from_value(serde_json::json!({
            "id": 1, "user_id": 1, "room_id": 1, "date": "2026-01-05",
            "start_time": "09:00:00", "end_time": "10:00", "reason": "x"
        }));
        assert!(r.is_err());
    }
}
