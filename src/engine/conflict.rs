use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::error::Error;
use crate::model::{Id, Reservation, Slot};

/// Naive local wall-clock time, the reference for the past-date and
/// cancellation-window rules.
pub(super) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(super) fn validate_slot(slot: &Slot) -> Result<(), Error> {
    if slot.end <= slot.start {
        return Err(Error::EndNotAfterStart);
    }
    Ok(())
}

/// Scan the live reservations of one room on one date for a window
/// overlapping `slot`. Reservations on other rooms or dates are never
/// inspected. `exclude` skips the reservation being rewritten during an
/// update.
pub(super) fn find_conflict<'a>(
    reservations: &'a [Reservation],
    room_id: Id,
    date: NaiveDate,
    slot: Slot,
    exclude: Option<Id>,
) -> Option<&'a Reservation> {
    reservations.iter().find(|r| {
        exclude != Some(r.id) && r.room_id == room_id && r.date == date && r.slot().overlaps(&slot)
    })
}
