#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Student = 1,
    Instructor = 2,
    Admin = 3,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Student),
            2 => Some(Role::Instructor),
            3 => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn is_student(&self) -> bool {
        matches!(self, Role::Student)
    }
}
