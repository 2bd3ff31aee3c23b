//! Typed clients for each catalog resource.
//!
//! Most resources need nothing beyond the generic CRUD surface, so they are
//! plain aliases of [`ResourceClient`]. [`CoursClient`] adds the course edit
//! form's relation handling.

pub mod cours_client;

pub use cours_client::CoursClient;

use crate::model::{Catalogue, Categorie, Creneau, Evaluation, Paiement, Utilisateur};
use resource_framework::ResourceClient;

pub type CategorieClient = ResourceClient<Categorie>;
pub type CatalogueClient = ResourceClient<Catalogue>;
pub type PaiementClient = ResourceClient<Paiement>;
pub type EvaluationClient = ResourceClient<Evaluation>;
pub type UtilisateurClient = ResourceClient<Utilisateur>;
pub type CreneauClient = ResourceClient<Creneau>;
