//! Teams domain layer: entities, DTOs, state machines, validation, passwords

pub mod dto;
pub mod entities;
pub mod password;
pub mod state;
pub mod validation;
