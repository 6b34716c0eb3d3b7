// Application queries

pub mod attendance_queries;
