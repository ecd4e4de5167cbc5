//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 쿼리 플래그 해석, 정규식 이스케이프
//! - [`display_terminal`] - 기동 과정 터미널 출력
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::parse_bool_flag;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let only_favorites = parse_bool_flag("1");
//! print_boxed_title("🍳 RECIPE SERVICE STARTING");
//! ```

pub mod string_utils;
pub mod display_terminal;
