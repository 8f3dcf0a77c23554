/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
