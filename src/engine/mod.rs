mod availability;
mod conflict;
mod mutations;
mod queries;

pub use availability::available_rooms;

use chrono::{NaiveDate, NaiveTime};

use crate::model::{Id, Reservation, Room, User};

/// Minimal capability surface the engine needs from the room registry:
/// existence, bookability, and enumeration for the availability query.
pub trait RoomDirectory {
    fn resolve(&self, id: Id) -> Option<&Room>;
    fn is_active(&self, id: Id) -> bool;
    /// Active rooms in insertion order.
    fn active(&self) -> impl Iterator<Item = &Room>;
}

/// Capability surface over the user registry.
pub trait UserDirectory {
    fn resolve(&self, id: Id) -> Option<&User>;
}

pub struct NewReservation {
    pub user_id: Id,
    pub room_id: Id,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason: String,
}

/// Partial update. `user_id` and `room_id` are immutable once booked.
#[derive(Debug, Default)]
pub struct ReservationPatch {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub reason: Option<String>,
}

/// Owns the reservation collection and the scheduling rules that guard it.
/// Invariant: for any one room and date, no two live reservations' half-open
/// windows overlap.
pub struct ReservationEngine {
    reservations: Vec<Reservation>,
    next_id: Id,
}

impl Default for ReservationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationEngine {
    pub fn new() -> Self {
        Self {
            reservations: Vec::new(),
            next_id: 1,
        }
    }
}
