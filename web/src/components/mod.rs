pub mod about;
pub mod admin;
pub mod contact;
pub mod feedback;
pub mod footer;
pub mod hero;
pub mod nav;
pub mod portfolio;
pub mod project_card;
pub mod services;
