//! CLI command handlers. Each command is in its own file.

mod add_session;
mod add_user;
mod hosts;
mod list;
mod remove_session;
mod set_image;
mod show;

pub use add_session::run_add_session;
pub use add_user::run_add_user;
pub use hosts::run_hosts;
pub use list::run_list;
pub use remove_session::run_remove_session;
pub use set_image::run_set_image;
pub use show::run_show;
