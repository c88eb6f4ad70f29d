use sqlx::SqlitePool;

use super::common::*;
use crate::adoption::domain::{Pet, PetFilter, PetStatus};
use crate::adoption::error::AdoptionError;

fn ids(pets: &[Pet]) -> Vec<i64> {
    pets.iter().map(|pet| pet.pet_id).collect()
}

#[sqlx::test]
async fn register_normalizes_species_and_prices_the_pet(pool: SqlitePool) {
    let catalog = catalog(&pool);

    let mut form = pet_form("1", "Rex", "Dog");
    form.comments = "  Loves fetch  ".to_string();
    let pet = catalog.register_or_update(form).await.expect("register");

    assert_eq!(pet.pet_id, 1);
    assert_eq!(pet.species, "dog");
    assert_eq!(pet.adoption_fee, 250.0);
    assert_eq!(pet.status, PetStatus::Available);
    assert_eq!(pet.comments, "Loves fetch");

    let stored = catalog.get(1).await.expect("fetch").expect("present");
    assert_eq!(stored, pet);
}

#[sqlx::test]
async fn register_overwrites_existing_records_and_reprices(pool: SqlitePool) {
    let catalog = catalog(&pool);
    seed_pet(&pool, "7", "Misu", "dog").await;

    let mut form = pet_form("7", "Misu", "cat");
    form.breed = "Calico".to_string();
    form.age = "4".to_string();
    catalog.register_or_update(form).await.expect("update");

    let stored = catalog.get(7).await.expect("fetch").expect("present");
    assert_eq!(stored.breed, "Calico");
    assert_eq!(stored.age, 4);
    assert_eq!(stored.adoption_fee, 150.0);

    let all = catalog.find(&PetFilter::default()).await.expect("find");
    assert_eq!(all.len(), 1);
}

#[sqlx::test]
async fn register_rejects_blank_required_fields(pool: SqlitePool) {
    let catalog = catalog(&pool);

    match catalog.register_or_update(pet_form("1", "", "dog")).await {
        Err(AdoptionError::MissingField { field: "name" }) => {}
        other => panic!("expected missing name, got {other:?}"),
    }
    match catalog.register_or_update(pet_form("1", "Rex", "")).await {
        Err(AdoptionError::MissingField { field: "species" }) => {}
        other => panic!("expected missing species, got {other:?}"),
    }

    let mut form = pet_form("1", "Rex", "dog");
    form.breed = String::new();
    match catalog.register_or_update(form).await {
        Err(AdoptionError::MissingField { field: "breed" }) => {}
        other => panic!("expected missing breed, got {other:?}"),
    }

    assert!(catalog.get(1).await.expect("fetch").is_none());
}

#[sqlx::test]
async fn register_rejects_non_numeric_id_and_age(pool: SqlitePool) {
    let catalog = catalog(&pool);

    match catalog.register_or_update(pet_form("seven", "Rex", "dog")).await {
        Err(AdoptionError::InvalidNumber {
            field: "pet_id",
            value,
        }) => assert_eq!(value, "seven"),
        other => panic!("expected invalid id, got {other:?}"),
    }

    let mut form = pet_form("7", "Rex", "dog");
    form.age = "four".to_string();
    match catalog.register_or_update(form).await {
        Err(AdoptionError::InvalidNumber { field: "age", .. }) => {}
        other => panic!("expected invalid age, got {other:?}"),
    }

    let mut form = pet_form("7", "Rex", "dog");
    form.age = "-2".to_string();
    match catalog.register_or_update(form).await {
        Err(AdoptionError::InvalidNumber { field: "age", .. }) => {}
        other => panic!("expected negative age rejection, got {other:?}"),
    }
}

#[sqlx::test]
async fn get_returns_none_for_unknown_ids(pool: SqlitePool) {
    assert!(catalog(&pool).get(99).await.expect("fetch").is_none());
}

#[sqlx::test]
async fn find_applies_filters_conjunctively(pool: SqlitePool) {
    let catalog = catalog(&pool);

    let mut labrador = pet_form("1", "Buddy", "dog");
    labrador.breed = "Labrador".to_string();
    labrador.age = "5".to_string();
    catalog.register_or_update(labrador).await.expect("seed");

    let mut calico = pet_form("2", "Misu", "cat");
    calico.breed = "Calico".to_string();
    catalog.register_or_update(calico).await.expect("seed");

    let mut husky = pet_form("3", "Shadow", "dog");
    husky.breed = "Husky".to_string();
    catalog.register_or_update(husky).await.expect("seed");

    let everything = catalog.find(&PetFilter::default()).await.expect("find");
    assert_eq!(ids(&everything), vec![1, 2, 3]);

    let dogs = catalog
        .find(&PetFilter {
            species: Some("dog".to_string()),
            ..PetFilter::default()
        })
        .await
        .expect("find");
    assert_eq!(ids(&dogs), vec![1, 3]);

    let young_dogs = catalog
        .find(&PetFilter {
            species: Some("dog".to_string()),
            age: Some(3),
            ..PetFilter::default()
        })
        .await
        .expect("find");
    assert_eq!(ids(&young_dogs), vec![3]);

    let labs = catalog
        .find(&PetFilter {
            breed: Some("LAB".to_string()),
            ..PetFilter::default()
        })
        .await
        .expect("find");
    assert_eq!(ids(&labs), vec![1]);

    catalog
        .set_status(2, PetStatus::Pending)
        .await
        .expect("status change");
    let held = catalog
        .find(&PetFilter {
            status: Some(PetStatus::Pending),
            ..PetFilter::default()
        })
        .await
        .expect("find");
    assert_eq!(ids(&held), vec![2]);

    let none = catalog
        .find(&PetFilter {
            species: Some("dog".to_string()),
            age: Some(9),
            ..PetFilter::default()
        })
        .await
        .expect("find");
    assert!(none.is_empty());
}

#[sqlx::test]
async fn search_matches_text_columns_case_insensitively(pool: SqlitePool) {
    let catalog = catalog(&pool);

    let mut labrador = pet_form("1", "Buddy", "dog");
    labrador.breed = "Labrador".to_string();
    labrador.age = "5".to_string();
    catalog.register_or_update(labrador).await.expect("seed");

    let mut calico = pet_form("2", "Misu", "cat");
    calico.breed = "Calico".to_string();
    calico.age = "4".to_string();
    calico.shelter = "Eastside Annex".to_string();
    catalog.register_or_update(calico).await.expect("seed");

    seed_pet(&pool, "12", "Rex", "dog").await;

    let by_name = catalog.search("REX").await.expect("search");
    assert_eq!(ids(&by_name), vec![12]);

    let by_breed = catalog.search("calico").await.expect("search");
    assert_eq!(ids(&by_breed), vec![2]);

    let by_shelter = catalog.search("eastside").await.expect("search");
    assert_eq!(ids(&by_shelter), vec![2]);
}

#[sqlx::test]
async fn search_reaches_id_fragments_and_lists_all_on_empty_terms(pool: SqlitePool) {
    let catalog = catalog(&pool);

    let mut labrador = pet_form("1", "Buddy", "dog");
    labrador.age = "5".to_string();
    catalog.register_or_update(labrador).await.expect("seed");

    let mut calico = pet_form("2", "Misu", "cat");
    calico.age = "4".to_string();
    catalog.register_or_update(calico).await.expect("seed");

    seed_pet(&pool, "12", "Rex", "dog").await;

    let digit = catalog.search("1").await.expect("search");
    assert_eq!(ids(&digit), vec![1, 12]);

    let everything = catalog.search("  ").await.expect("search");
    assert_eq!(ids(&everything), vec![1, 2, 12]);
}

#[sqlx::test]
async fn set_status_overwrites_and_rejects_unknown_pets(pool: SqlitePool) {
    let catalog = catalog(&pool);
    seed_pet(&pool, "4", "Luna", "cat").await;

    catalog
        .set_status(4, PetStatus::Adopted)
        .await
        .expect("status change");
    assert_eq!(stored_pet_status(&pool, 4).await, PetStatus::Adopted);

    match catalog.set_status(99, PetStatus::Pending).await {
        Err(AdoptionError::PetNotFound { pet_id: 99 }) => {}
        other => panic!("expected missing pet, got {other:?}"),
    }
}

#[sqlx::test]
async fn update_comments_trims_and_rejects_unknown_pets(pool: SqlitePool) {
    let catalog = catalog(&pool);
    seed_pet(&pool, "5", "Pepper", "dog").await;

    catalog
        .update_comments(5, "  Good with kids.  ")
        .await
        .expect("comments");
    let stored = catalog.get(5).await.expect("fetch").expect("present");
    assert_eq!(stored.comments, "Good with kids.");

    match catalog.update_comments(41, "gone").await {
        Err(AdoptionError::PetNotFound { pet_id: 41 }) => {}
        other => panic!("expected missing pet, got {other:?}"),
    }
}
