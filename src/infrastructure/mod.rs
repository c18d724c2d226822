//! Infrastructure layer - Storage backends and services

pub mod logging;
pub mod member;
pub mod storage;
