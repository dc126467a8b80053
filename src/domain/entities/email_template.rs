//! Lost password email templates owned by a reseller.

/// Which stored email a form section edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Sent first; asks the customer to confirm the password reset.
    Activation,
    /// Sent after confirmation; carries the new password.
    LostPassword,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 2] = [TemplateKind::Activation, TemplateKind::LostPassword];

    /// Row name in `email_tpls.name`.
    pub fn storage_name(self) -> &'static str {
        match self {
            Self::Activation => "lostpw-msg-1",
            Self::LostPassword => "lostpw-msg-2",
        }
    }

    pub fn default_subject(self) -> &'static str {
        match self {
            Self::Activation => "Please activate your new control panel password",
            Self::LostPassword => "Your new control panel login",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            Self::Activation => {
                "Dear {NAME},\n\n\
                 Please click on the link below to renew your password:\n\n\
                 {LINK}\n\n\
                 If you did not request a new password, you can ignore this email.\n"
            }
            Self::LostPassword => {
                "Dear {NAME},\n\n\
                 Your new password for {USERNAME} is: {PASSWORD}\n\n\
                 You can log in at {BASE_SERVER_VHOST_PREFIX}{BASE_SERVER_VHOST}:{BASE_SERVER_VHOST_PORT}\n"
            }
        }
    }
}

/// Placeholders substituted when the emails are sent, with their meaning.
pub const TEMPLATE_PLACEHOLDERS: [(&str, &str); 7] = [
    ("{USERNAME}", "User login (system) name"),
    ("{PASSWORD}", "User password"),
    ("{NAME}", "User (first and last) name"),
    ("{LINK}", "Lost password link"),
    ("{BASE_SERVER_VHOST_PREFIX}", "URL protocol"),
    ("{BASE_SERVER_VHOST}", "URL to this admin panel"),
    ("{BASE_SERVER_VHOST_PORT}", "URL port"),
];

/// A stored email template together with its display-only sender fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    pub subject: String,
    pub message: String,
    pub sender_email: String,
    pub sender_name: String,
}

impl EmailTemplate {
    /// Built-in template used until the owner saves one.
    pub fn default_for(kind: TemplateKind, sender_email: String, sender_name: String) -> Self {
        Self {
            subject: kind.default_subject().to_string(),
            message: kind.default_message().to_string(),
            sender_email,
            sender_name,
        }
    }

    /// Replaces subject and message; sender fields are never edited here.
    pub fn apply(&mut self, update: &TemplateUpdate) {
        self.subject.clone_from(&update.subject);
        self.message.clone_from(&update.message);
    }
}

/// The editable part of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateUpdate {
    pub subject: String,
    pub message: String,
}

/// Both lost password templates of one owner, as shown on the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LostPasswordTemplates {
    pub activation: EmailTemplate,
    pub lost_password: EmailTemplate,
}
