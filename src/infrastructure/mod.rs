//! Infrastructure layer
//! 파일시스템/외부 프로세스/터미널과 직접 통신하는 구현체 집합.

pub mod actions;
pub mod config;
pub mod console;
pub mod logging;
pub mod process;
pub mod warnings;
