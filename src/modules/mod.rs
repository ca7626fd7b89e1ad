pub mod admins;
pub mod courses;
pub mod divisions;
pub mod files;
pub mod lectures;
pub mod login;
pub mod professors;
pub mod schools;
pub mod students;
pub mod terms;
pub mod timeslots;
pub mod timetable;
pub mod users;
pub mod utils;
pub mod years;

pub use self::users::model::User;
