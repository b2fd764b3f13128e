use serde::Serialize;

/// Whether the viewer has registered for the event attached to the post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Registration {
    #[default]
    Unregistered,
    Registered,
}

impl Registration {
    /// The only transition: each click flips the state.
    pub fn toggled(self) -> Self {
        match self {
            Registration::Unregistered => Registration::Registered,
            Registration::Registered => Registration::Unregistered,
        }
    }

    pub fn is_registered(self) -> bool {
        self == Registration::Registered
    }

    pub fn button(self) -> RegisterButton {
        match self {
            Registration::Unregistered => RegisterButton {
                label: "Register for this Event",
                icon: "app_registration",
                color: "primary",
            },
            Registration::Registered => RegisterButton {
                label: "Registered!",
                icon: "done",
                color: "success",
            },
        }
    }
}

/// Presentation of the register control, derived solely from `Registration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegisterButton {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}
