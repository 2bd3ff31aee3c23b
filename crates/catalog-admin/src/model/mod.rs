//! Catalog entities as the REST backend exchanges them.

pub mod catalogue;
pub mod categorie;
pub mod cours;
pub mod creneau;
pub mod evaluation;
pub mod paiement;
pub mod utilisateur;

pub use catalogue::*;
pub use categorie::*;
pub use cours::*;
pub use creneau::*;
pub use evaluation::*;
pub use paiement::*;
pub use utilisateur::*;
