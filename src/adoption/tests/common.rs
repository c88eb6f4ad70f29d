use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::adoption::catalog::PetCatalog;
use crate::adoption::domain::{
    Answer, ApplicationForm, FencedYard, LivingSituation, Pet, PetForm, PetStatus,
};
use crate::adoption::registry::ApplicationRegistry;
use crate::adoption::router::adoption_router;

pub(super) fn catalog(pool: &SqlitePool) -> PetCatalog {
    PetCatalog::new(pool.clone())
}

pub(super) fn registry(pool: &SqlitePool) -> ApplicationRegistry {
    ApplicationRegistry::new(pool.clone())
}

pub(super) fn shelter_router(pool: &SqlitePool) -> axum::Router {
    adoption_router(catalog(pool), registry(pool))
}

pub(super) fn pet_form(pet_id: &str, name: &str, species: &str) -> PetForm {
    PetForm {
        pet_id: pet_id.to_string(),
        name: name.to_string(),
        species: species.to_string(),
        breed: "Mixed".to_string(),
        age: "3".to_string(),
        gender: "Male".to_string(),
        size: "Medium".to_string(),
        shelter: "Northside Shelter".to_string(),
        status: PetStatus::Available,
        comments: String::new(),
    }
}

pub(super) fn application_form(pet_id: i64) -> ApplicationForm {
    ApplicationForm {
        pet_id,
        adopter_name: "Jordan Reyes".to_string(),
        adopter_email: "jordan.reyes@example.com".to_string(),
        adopter_phone: "555-0142".to_string(),
        owned_before: Some(Answer::Yes),
        aware_needs: Some(Answer::Yes),
        ready_costs: Some(Answer::Yes),
        adoption_date: NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"),
        own_other_pets: Some(Answer::No),
        other_pets_type: String::new(),
        living_situation: Some(LivingSituation::House),
        fenced_yard: Some(FencedYard::Yes),
        primary_caregiver: "Jordan Reyes".to_string(),
        notes: String::new(),
        certified: true,
    }
}

pub(super) async fn seed_pet(pool: &SqlitePool, pet_id: &str, name: &str, species: &str) -> Pet {
    catalog(pool)
        .register_or_update(pet_form(pet_id, name, species))
        .await
        .expect("seed pet")
}

pub(super) async fn stored_pet_status(pool: &SqlitePool, pet_id: i64) -> PetStatus {
    catalog(pool)
        .get(pet_id)
        .await
        .expect("fetch pet")
        .expect("pet present")
        .status
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
