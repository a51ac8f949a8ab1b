//! Editable buffer behind the "Add Friend" form.

use shared::protocol::AddFriendFormSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFriendForm {
    open: bool,
    name: String,
    image_ref: String,
    default_image_ref: String,
}

impl AddFriendForm {
    pub fn new(default_image_ref: impl Into<String>) -> Self {
        let default_image_ref = default_image_ref.into();
        Self {
            open: false,
            name: String::new(),
            image_ref: default_image_ref.clone(),
            default_image_ref,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_image_ref(&mut self, image_ref: impl Into<String>) {
        self.image_ref = image_ref.into();
    }

    /// Both fields hold something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.image_ref.trim().is_empty()
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.image_ref.clone_from(&self.default_image_ref);
    }

    pub fn summary(&self) -> AddFriendFormSummary {
        AddFriendFormSummary {
            open: self.open,
            name: self.name.clone(),
            image_ref: self.image_ref.clone(),
        }
    }
}
