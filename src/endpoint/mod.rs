pub mod courses;
pub mod messages;
pub mod router;
