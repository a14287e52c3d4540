pub mod attendance_service;
pub mod punch_service;
pub mod status_service;
pub mod validation_service;
