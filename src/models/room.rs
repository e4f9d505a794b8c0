use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    /// Lab rooms only host lab sessions. The scheduler enforces it.
    pub is_lab: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomField {
    Name(String),
    IsLab(bool),
}

impl Room {
    pub fn apply(&mut self, field: RoomField) {
        match field {
            RoomField::Name(name) => self.name = name,
            RoomField::IsLab(is_lab) => self.is_lab = is_lab,
        }
    }
}
