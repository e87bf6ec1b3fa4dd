//! Enumerated types.

mod confirmation_type;
mod persona_state;

pub use confirmation_type::ConfirmationType;
pub use persona_state::PersonaState;
