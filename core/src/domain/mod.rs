//! Domain entities and value objects

pub mod entities;
pub mod subscription;
