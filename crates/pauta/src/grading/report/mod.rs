//! Document assemblers: thin mappers from the grade matrix into the three
//! payload shapes. No numeric computation happens past this boundary.

mod detailed;
mod ledger;
mod metadata;
mod summary;
pub mod views;

pub use detailed::detailed_roster;
pub use ledger::class_ledger;
pub use metadata::{DocumentKind, DocumentMetadata};
pub use summary::mini_pauta;
