mod rooms;
mod users;

pub use rooms::{NewRoom, RoomPatch, RoomRegistry};
pub use users::{UserPatch, UserRegistry};
