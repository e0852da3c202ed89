use crate::engine::ReservationEngine;
use crate::registry::{RoomRegistry, UserRegistry};

/// Process-wide state: the two registries and the reservation engine, each
/// owning its own collection and id counter. Constructed once per process —
/// or once per test, which is why no reset hook exists.
#[derive(Default)]
pub struct Store {
    pub rooms: RoomRegistry,
    pub users: UserRegistry,
    pub reservations: ReservationEngine,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
