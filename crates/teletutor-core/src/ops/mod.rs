pub mod assignment_ops;
pub mod attendance_ops;
pub mod store;

pub use store::Store;
