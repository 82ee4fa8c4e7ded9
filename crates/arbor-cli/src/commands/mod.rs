pub mod blank;
pub mod defaults;
pub mod dispatch;
pub mod index;
pub mod schema;
pub mod search;
pub mod set;
pub mod show;
pub mod validate;
