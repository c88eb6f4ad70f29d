//! Pet catalog and adoption application workflow.
//!
//! Two components share one invariant: a pet is `Pending` exactly while it
//! has an application waiting for review. [`PetCatalog`] owns pet records
//! and their status; [`ApplicationRegistry`] owns applications and performs
//! the coupled transitions (submit, approve, deny) transactionally so the
//! two tables can never be observed half-updated.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod registry;
pub mod router;

#[cfg(test)]
mod tests;

pub use catalog::PetCatalog;
pub use domain::{
    adoption_fee_for, Answer, Application, ApplicationForm, ApplicationStatus, FencedYard,
    LivingSituation, Pet, PetFilter, PetForm, PetStatus, UnknownLabel,
};
pub use error::AdoptionError;
pub use registry::ApplicationRegistry;
pub use router::{adoption_router, AdoptionState};
