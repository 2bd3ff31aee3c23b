//! # Cours Client
//!
//! Wraps a `ResourceClient<Cours>` and adds what the course screens need on
//! top of plain CRUD: paged listing and saving a form whose relations are
//! given as selected ids.
use crate::error::AdminError;
use crate::model::{Catalogue, Cours};
use resource_framework::{QueryParams, ResourceClient};
use tracing::{debug, instrument};

/// Client for the `cours` resource.
#[derive(Clone)]
pub struct CoursClient {
    inner: ResourceClient<Cours>,
}

impl CoursClient {
    pub fn new(inner: ResourceClient<Cours>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &ResourceClient<Cours> {
        &self.inner
    }

    /// Loads one page of courses, newest id first.
    #[instrument(skip(self))]
    pub async fn page(&self, page: u32, size: u32) -> Result<Vec<Cours>, AdminError> {
        Ok(self
            .inner
            .list(QueryParams::page(page, size).sorted_by("id,desc"))
            .await?)
    }

    /// Saves a course from edit-form values.
    ///
    /// `category_ids` are the multi-select values and `catalogue_id` the
    /// single-select value, resolved against the `catalogues` already loaded
    /// for the form. Creates when `form` has no id, updates otherwise.
    #[instrument(skip(self, form, catalogues))]
    pub async fn save_form(
        &self,
        form: Cours,
        category_ids: &[String],
        catalogue_id: &str,
        catalogues: &[Catalogue],
    ) -> Result<Cours, AdminError> {
        let cours = form
            .with_category_ids(category_ids)?
            .with_catalogue(catalogue_id, catalogues);
        debug!(?cours, "Saving course form");

        let saved = match cours.id {
            Some(_) => self.inner.update(&cours).await?,
            None => self.inner.create(&cours).await?,
        };
        Ok(saved)
    }
}
