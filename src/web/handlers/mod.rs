//! Page handlers of the panel.

mod domain_status;
mod health;
mod login;
mod lost_password;
mod users;

pub use domain_status::domain_status_change_handler;
pub use health::health_handler;
pub use login::{login_page_handler, login_submit_handler, logout_handler};
pub use lost_password::{lost_password_page_handler, lost_password_submit_handler};
pub use users::users_handler;
