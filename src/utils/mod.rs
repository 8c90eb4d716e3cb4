//! 공용 유틸리티

pub mod parse;
pub mod time;
