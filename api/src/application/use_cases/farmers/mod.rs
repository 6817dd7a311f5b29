pub mod create_farmer;
pub mod delete_farmer;
pub mod get_farmer;
pub mod list_farmers;
pub mod update_farmer;
