//! One module per subcommand; each exposes an `execute` function.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod hash;
pub mod inspect;
pub mod keygen;
pub mod matches;
pub mod verify;
