pub mod time_utils;
pub mod validation;
