pub mod attendance_dto;
