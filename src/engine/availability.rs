use chrono::NaiveDate;

use crate::model::{Reservation, Room, Slot};

use super::conflict::find_conflict;
use super::{ReservationEngine, RoomDirectory};

/// Every active room without a live reservation overlapping `slot` on
/// `date`, in the directory's insertion order. The caller boundary rejects
/// inverted windows before invoking this; an inverted window here has no
/// defined result. Past dates are deliberately not rejected — the query may
/// look backwards.
pub fn available_rooms(
    rooms: &impl RoomDirectory,
    reservations: &[Reservation],
    date: NaiveDate,
    slot: Slot,
) -> Vec<Room> {
    rooms
        .active()
        .filter(|room| find_conflict(reservations, room.id, date, slot, None).is_none())
        .cloned()
        .collect()
}

impl ReservationEngine {
    pub fn available_rooms(
        &self,
        rooms: &impl RoomDirectory,
        date: NaiveDate,
        slot: Slot,
    ) -> Vec<Room> {
        available_rooms(rooms, &self.reservations, date, slot)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use crate::model::{Id, RoomStatus};
    use crate::registry::{NewRoom, RoomRegistry};

    use super::*;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn resv(id: Id, room_id: Id, date: &str, start: &str, end: &str) -> Reservation {
        Reservation {
            id,
            user_id: 1,
            room_id,
            date: d(date),
            start_time: t(start),
            end_time: t(end),
            reason: "meeting".into(),
        }
    }

    fn three_rooms() -> RoomRegistry {
        let mut rooms = RoomRegistry::new();
        for name in ["Room 101", "Lab 01", "Auditorium"] {
            rooms.create(NewRoom {
                name: name.into(),
                kind: "classroom".into(),
                capacity: 40,
                status: None,
            });
        }
        rooms
    }

    #[test]
    fn booked_room_is_excluded() {
        let rooms = three_rooms();
        let taken = vec![resv(1, 1, "2026-12-12", "09:00", "10:00")];
        let free = available_rooms(&rooms, &taken, d("2026-12-12"), Slot::new(t("09:00"), t("10:00")));
        assert_eq!(free.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn disjoint_window_frees_every_room() {
        let rooms = three_rooms();
        let taken = vec![resv(1, 1, "2026-12-12", "09:00", "10:00")];
        let free = available_rooms(&rooms, &taken, d("2026-12-12"), Slot::new(t("10:00"), t("11:00")));
        assert_eq!(free.len(), 3);
    }

    #[test]
    fn other_dates_do_not_block() {
        let rooms = three_rooms();
        let taken = vec![resv(1, 1, "2026-12-11", "09:00", "10:00")];
        let free = available_rooms(&rooms, &taken, d("2026-12-12"), Slot::new(t("09:00"), t("10:00")));
        assert_eq!(free.len(), 3);
    }

    #[test]
    fn inactive_room_never_listed() {
        let mut rooms = three_rooms();
        rooms
            .update(
                2,
                crate::registry::RoomPatch {
                    status: Some(RoomStatus::Inactive),
                    ..Default::default()
                },
            )
            .unwrap();
        let free = available_rooms(&rooms, &[], d("2026-12-12"), Slot::new(t("09:00"), t("10:00")));
        assert_eq!(free.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn fully_booked_day_returns_nothing() {
        let rooms = three_rooms();
        let taken = vec![
            resv(1, 1, "2026-12-13", "10:00", "11:00"),
            resv(2, 2, "2026-12-13", "10:00", "11:00"),
            resv(3, 3, "2026-12-13", "10:00", "11:00"),
        ];
        let free = available_rooms(&rooms, &taken, d("2026-12-13"), Slot::new(t("10:00"), t("11:00")));
        assert!(free.is_empty());
    }

    #[test]
    fn past_dates_are_queryable() {
        let rooms = three_rooms();
        let free = available_rooms(&rooms, &[], d("2020-01-10"), Slot::new(t("09:00"), t("10:00")));
        assert_eq!(free.len(), 3);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let rooms = three_rooms();
        let free = available_rooms(&rooms, &[], d("2026-12-12"), Slot::new(t("09:00"), t("10:00")));
        assert_eq!(
            free.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["Room 101", "Lab 01", "Auditorium"]
        );
    }
}
