pub mod get_application;
pub mod list_applications;
pub mod submit_application;
pub mod update_application;
