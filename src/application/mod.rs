//! Application layer
//! 명령 트리 조립, 디스패치, 종료 정책을 정의하고 포트를 통해 인프라를 사용한다.

pub mod dispatch;
pub mod exit_policy;
pub mod ports;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;
