use std::collections::HashMap;

use crate::engine::UserDirectory;
use crate::error::{Entity, Error};
use crate::model::{Id, User};

#[derive(Debug, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Owns the user collection. Emails are unique case-insensitively with the
/// original casing preserved; the lowercased-email index mirrors the
/// collection. On `create` the duplicate check runs before the format check;
/// on `update` the order is reversed.
pub struct UserRegistry {
    users: Vec<User>,
    by_email: HashMap<String, Id>,
    next_id: Id,
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRegistry {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            by_email: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn create(&mut self, name: String, email: String) -> Result<User, Error> {
        let key = email.to_lowercase();
        if self.by_email.contains_key(&key) {
            return Err(Error::EmailTaken(email));
        }
        if !is_valid_email(&email) {
            return Err(Error::InvalidEmail(email));
        }
        let user = User {
            id: self.next_id,
            name,
            email,
        };
        self.next_id += 1;
        self.by_email.insert(key, user.id);
        self.users.push(user.clone());
        Ok(user)
    }

    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: Id) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn update(&mut self, id: Id, patch: UserPatch) -> Result<User, Error> {
        let pos = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(Error::NotFound(Entity::User, id))?;

        if let Some(email) = patch.email {
            if email != self.users[pos].email {
                if !is_valid_email(&email) {
                    return Err(Error::InvalidEmail(email));
                }
                let key = email.to_lowercase();
                if self.by_email.get(&key).is_some_and(|&other| other != id) {
                    return Err(Error::EmailTaken(email));
                }
                let old_key = self.users[pos].email.to_lowercase();
                if self.by_email.get(&old_key) == Some(&id) {
                    self.by_email.remove(&old_key);
                }
                self.by_email.insert(key, id);
                self.users[pos].email = email;
            }
        }
        if let Some(name) = patch.name {
            self.users[pos].name = name;
        }
        Ok(self.users[pos].clone())
    }

    pub fn delete(&mut self, id: Id) -> Result<User, Error> {
        let pos = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(Error::NotFound(Entity::User, id))?;
        let user = self.users.remove(pos);
        let key = user.email.to_lowercase();
        if self.by_email.get(&key) == Some(&id) {
            self.by_email.remove(&key);
        }
        Ok(user)
    }
}

impl UserDirectory for UserRegistry {
    fn resolve(&self, id: Id) -> Option<&User> {
        self.get(id)
    }
}

/// Minimal syntactic shape: non-empty local part, `@`, domain containing a
/// dot with non-empty sides, no whitespace or second `@` anywhere.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
