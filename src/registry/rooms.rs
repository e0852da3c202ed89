use std::collections::HashMap;

use crate::engine::RoomDirectory;
use crate::error::{Entity, Error};
use crate::model::{Id, Room, RoomStatus};

pub struct NewRoom {
    pub name: String,
    pub kind: String,
    pub capacity: u32,
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Default)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub capacity: Option<u32>,
    pub status: Option<RoomStatus>,
}

/// Owns the room collection. Names are unique case-insensitively; the
/// lowercased-name index is kept in step with the collection on every
/// create/update/delete. `create` does not check uniqueness itself — that
/// rule belongs to the API layer in front of the registry; `update` does.
pub struct RoomRegistry {
    rooms: Vec<Room>,
    by_name: HashMap<String, Id>,
    next_id: Id,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Vec::new(),
            by_name: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn create(&mut self, new: NewRoom) -> Room {
        let room = Room {
            id: self.next_id,
            name: new.name,
            kind: new.kind,
            capacity: new.capacity,
            status: new.status.unwrap_or_default(),
        };
        self.next_id += 1;
        self.by_name.insert(room.name.to_lowercase(), room.id);
        self.rooms.push(room.clone());
        room
    }

    pub fn list(&self) -> &[Room] {
        &self.rooms
    }

    pub fn get(&self, id: Id) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Case-insensitive name lookup, used by the API layer ahead of `create`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Overwrites only the supplied fields. A new name that differs from the
    /// current one (case-insensitively) must not collide with another room.
    pub fn update(&mut self, id: Id, patch: RoomPatch) -> Result<Room, Error> {
        let pos = self
            .rooms
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::NotFound(Entity::Room, id))?;

        if let Some(name) = patch.name {
            let key = name.to_lowercase();
            let old_key = self.rooms[pos].name.to_lowercase();
            if key != old_key {
                if self.by_name.get(&key).is_some_and(|&other| other != id) {
                    return Err(Error::RoomNameTaken(name));
                }
                if self.by_name.get(&old_key) == Some(&id) {
                    self.by_name.remove(&old_key);
                }
                self.by_name.insert(key, id);
            }
            self.rooms[pos].name = name;
        }
        if let Some(kind) = patch.kind {
            self.rooms[pos].kind = kind;
        }
        if let Some(capacity) = patch.capacity {
            self.rooms[pos].capacity = capacity;
        }
        if let Some(status) = patch.status {
            self.rooms[pos].status = status;
        }
        Ok(self.rooms[pos].clone())
    }

    pub fn delete(&mut self, id: Id) -> Result<Room, Error> {
        let pos = self
            .rooms
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::NotFound(Entity::Room, id))?;
        let room = self.rooms.remove(pos);
        let key = room.name.to_lowercase();
        if self.by_name.get(&key) == Some(&id) {
            self.by_name.remove(&key);
        }
        Ok(room)
    }

    /// False both for inactive rooms and for unknown ids.
    pub fn is_active(&self, id: Id) -> bool {
        self.get(id).is_some_and(|r| r.status.is_active())
    }
}

impl RoomDirectory for RoomRegistry {
    fn resolve(&self, id: Id) -> Option<&Room> {
        self.get(id)
    }

    fn is_active(&self, id: Id) -> bool {
        RoomRegistry::is_active(self, id)
    }

    fn active(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| r.status.is_active())
    }
}
