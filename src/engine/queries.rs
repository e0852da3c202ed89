use chrono::NaiveDate;

use crate::model::{Id, Reservation};

use super::ReservationEngine;

impl ReservationEngine {
    pub fn list(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn get(&self, id: Id) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    pub fn by_room_and_date(&self, room_id: Id, date: NaiveDate) -> Vec<Reservation> {
        self.reservations
            .iter()
            .filter(|r| r.room_id == room_id && r.date == date)
            .cloned()
            .collect()
    }

    pub fn by_user(&self, user_id: Id) -> Vec<Reservation> {
        self.reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }
}
