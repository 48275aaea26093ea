pub mod items;
pub mod root;
pub mod users;
pub mod utils;
