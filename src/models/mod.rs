//! Domain models for classroll.
//!
//! # Core Concepts
//!
//! - [`Allocation`]: A teacher's assignment to a class and subject. Loaded once,
//!   never mutated.
//! - [`Student`]: A roster entry. Rosters are keyed by allocation id inside the
//!   [`Document`].
//! - [`Identifier`]: Canonical form of allocation and student ids, so `"1"`,
//!   `1` and `1.0` name the same thing.
//! - [`AttendanceRecord`]: Append-only presence snapshot for an allocation on a
//!   given date and period.
//! - [`LoginInfo`]: The simulated current user, passed through verbatim.
//! - [`Document`]: Root of the persisted JSON, holding all of the above.
//!
//! Wire names follow the JSON document the frontend already consumes
//! (`id_alocacao`, `turma`, `alunos`, ...); Rust names are English.
//!
//! The [`Document`] holds the loaded JSON as-is. [`Allocation`] and
//! [`Student`] are read views built from it with tolerant decoding, so mock
//! data with loosely typed fields still loads and is rewritten unchanged.

mod allocation;
mod attendance;
mod document;
mod identifier;
mod lenient;
mod roster;

pub use allocation::*;
pub use attendance::*;
pub use document::*;
pub use identifier::*;
pub use roster::*;
