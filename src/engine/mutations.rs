use crate::error::{Entity, Error};
use crate::model::{Id, Reservation, Slot};

use super::conflict::{find_conflict, now, validate_slot};
use super::{NewReservation, ReservationEngine, ReservationPatch, RoomDirectory, UserDirectory};

impl ReservationEngine {
    /// Book a room. Checks run in a fixed order: user exists, room exists,
    /// room active, window ordered, start not in the past, no overlap with a
    /// live reservation on the same room and date. Either every check passes
    /// and the reservation is stored, or nothing changes.
    pub fn create(
        &mut self,
        rooms: &impl RoomDirectory,
        users: &impl UserDirectory,
        new: NewReservation,
    ) -> Result<Reservation, Error> {
        if users.resolve(new.user_id).is_none() {
            return Err(Error::NotFound(Entity::User, new.user_id));
        }
        if rooms.resolve(new.room_id).is_none() {
            return Err(Error::NotFound(Entity::Room, new.room_id));
        }
        if !rooms.is_active(new.room_id) {
            return Err(Error::RoomInactive(new.room_id));
        }
        let slot = Slot::new(new.start_time, new.end_time);
        validate_slot(&slot)?;
        if new.date.and_time(new.start_time) < now() {
            return Err(Error::ReservationInPast);
        }
        if find_conflict(&self.reservations, new.room_id, new.date, slot, None).is_some() {
            return Err(Error::SlotTaken {
                room_id: new.room_id,
                date: new.date,
            });
        }

        let reservation = Reservation {
            id: self.next_id,
            user_id: new.user_id,
            room_id: new.room_id,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            reason: new.reason,
        };
        self.next_id += 1;
        self.reservations.push(reservation.clone());
        Ok(reservation)
    }

    /// Rewrite the window or reason of an existing reservation. The effective
    /// date and times (supplied or current) are validated and re-scanned
    /// against every other live reservation on the same room before anything
    /// is written back.
    pub fn update(&mut self, id: Id, patch: ReservationPatch) -> Result<Reservation, Error> {
        let pos = self
            .reservations
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::NotFound(Entity::Reservation, id))?;

        let current = &self.reservations[pos];
        let room_id = current.room_id;
        let date = patch.date.unwrap_or(current.date);
        let slot = Slot::new(
            patch.start_time.unwrap_or(current.start_time),
            patch.end_time.unwrap_or(current.end_time),
        );
        validate_slot(&slot)?;
        if find_conflict(&self.reservations, room_id, date, slot, Some(id)).is_some() {
            return Err(Error::SlotTaken { room_id, date });
        }

        let r = &mut self.reservations[pos];
        if let Some(date) = patch.date {
            r.date = date;
        }
        if let Some(start) = patch.start_time {
            r.start_time = start;
        }
        if let Some(end) = patch.end_time {
            r.end_time = end;
        }
        if let Some(reason) = patch.reason {
            r.reason = reason;
        }
        Ok(r.clone())
    }

    /// Remove a reservation, permitted only strictly before its start
    /// instant. At or after the start it is too late.
    pub fn cancel(&mut self, id: Id) -> Result<Reservation, Error> {
        let pos = self
            .reservations
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::NotFound(Entity::Reservation, id))?;

        let starts_at = self.reservations[pos]
            .date
            .and_time(self.reservations[pos].start_time);
        if now() >= starts_at {
            return Err(Error::CancelAfterStart);
        }
        Ok(self.reservations.remove(pos))
    }
}
