pub mod admin;
pub mod home;
pub mod login;
pub mod not_found;
pub mod project_detail;
pub mod projects;
pub mod service_detail;
