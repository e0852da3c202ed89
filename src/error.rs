use chrono::NaiveDate;

use crate::model::Id;

/// Broad failure class, used by the boundary to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
}

/// Which entity an id failed to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Room,
    User,
    Reservation,
}

impl Entity {
    fn label(self) -> &'static str {
        match self {
            Entity::Room => "room",
            Entity::User => "user",
            Entity::Reservation => "reservation",
        }
    }
}

/// Every business-rule rejection the registries and the reservation engine
/// can produce. Callers branch on the variant (or on `kind()`), never on the
/// rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    NotFound(Entity, Id),
    /// Another room already holds this name (case-insensitive).
    RoomNameTaken(String),
    /// Another user already holds this email (case-insensitive).
    EmailTaken(String),
    /// A live reservation on the same room and date overlaps the window.
    SlotTaken { room_id: Id, date: NaiveDate },
    InvalidEmail(String),
    EndNotAfterStart,
    ReservationInPast,
    RoomInactive(Id),
    CancelAfterStart,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(..) => ErrorKind::NotFound,
            Error::RoomNameTaken(_) | Error::EmailTaken(_) | Error::SlotTaken { .. } => {
                ErrorKind::Conflict
            }
            Error::InvalidEmail(_)
            | Error::EndNotAfterStart
            | Error::ReservationInPast
            | Error::RoomInactive(_)
            | Error::CancelAfterStart => ErrorKind::InvalidInput,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound(entity, id) => write!(f, "{} {id} not found", entity.label()),
            Error::RoomNameTaken(name) => {
                write!(f, "a room named {name:?} already exists")
            }
            Error::EmailTaken(email) => {
                write!(f, "a user with email {email:?} already exists")
            }
            Error::SlotTaken { room_id, date } => {
                write!(f, "room {room_id} already has a reservation in that window on {date}")
            }
            Error::InvalidEmail(email) => write!(f, "invalid email: {email:?}"),
            Error::EndNotAfterStart => write!(f, "end time must be after start time"),
            Error::ReservationInPast => write!(f, "cannot create reservations in the past"),
            Error::RoomInactive(id) => write!(f, "room {id} is inactive and cannot be reserved"),
            Error::CancelAfterStart => {
                write!(f, "cannot cancel a reservation at or after its start time")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Error::NotFound(Entity::User, 9).kind(), ErrorKind::NotFound);
        assert_eq!(Error::RoomNameTaken("Lab".into()).kind(), ErrorKind::Conflict);
        assert_eq!(
            Error::SlotTaken {
                room_id: 1,
                date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(Error::CancelAfterStart.kind(), ErrorKind::InvalidInput);
        assert_eq!(Error::ReservationInPast.kind(), ErrorKind::InvalidInput);
    }
}
