pub mod delete;
pub mod edit;
pub mod feed;
pub mod list;
pub mod login;
pub mod logout;
pub mod new;
