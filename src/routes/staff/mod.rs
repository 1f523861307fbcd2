mod handler;
mod model;

pub use handler::{dashboard, login, login_page, logout, register, register_page};
pub use model::{LoginRequest, RegisterRequest, StaffAccounts};
