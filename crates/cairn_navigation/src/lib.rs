pub mod bearings;
pub mod path;
pub mod translation;
pub mod validate;
