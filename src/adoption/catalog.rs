use std::str::FromStr;

use sqlx::query_builder::QueryBuilder;
use sqlx::SqlitePool;
use tracing::info;

use super::domain::{adoption_fee_for, Pet, PetFilter, PetForm, PetStatus};
use super::error::AdoptionError;

/// Store-backed catalog owning the shelter's pet records and their status.
#[derive(Debug, Clone)]
pub struct PetCatalog {
    pool: SqlitePool,
}

/// Row shape of the `pets` table. Column names predate this service and keep
/// their original camelCase spelling.
#[derive(Debug, sqlx::FromRow)]
struct PetRow {
    #[sqlx(rename = "petId")]
    pet_id: i64,
    #[sqlx(rename = "petName")]
    pet_name: String,
    species: String,
    breed: String,
    age: i64,
    gender: String,
    size: String,
    shelter: String,
    #[sqlx(rename = "adoptionFee")]
    adoption_fee: f64,
    status: String,
    comments: String,
}

impl TryFrom<PetRow> for Pet {
    type Error = sqlx::Error;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<PetStatus>()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let age = u32::try_from(row.age).map_err(|_| {
            sqlx::Error::Decode(
                format!("pet {}: stored age {} is out of range", row.pet_id, row.age).into(),
            )
        })?;

        Ok(Pet {
            pet_id: row.pet_id,
            name: row.pet_name,
            species: row.species,
            breed: row.breed,
            age,
            gender: row.gender,
            size: row.size,
            shelter: row.shelter,
            adoption_fee: row.adoption_fee,
            status,
            comments: row.comments,
        })
    }
}

fn collect_pets(rows: Vec<PetRow>) -> Result<Vec<Pet>, sqlx::Error> {
    rows.into_iter().map(Pet::try_from).collect()
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, AdoptionError> {
    raw.trim().parse().map_err(|_| AdoptionError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

impl PetCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create or refresh a pet record, keyed on the operator-assigned id.
    ///
    /// The adoption fee is derived from the normalized species on every save,
    /// so a species change re-prices the pet while everything else leaves the
    /// fee as it was.
    pub async fn register_or_update(&self, form: PetForm) -> Result<Pet, AdoptionError> {
        let pet_id: i64 = parse_number("pet_id", &form.pet_id)?;
        let age: u32 = parse_number("age", &form.age)?;

        let species = form.species.to_lowercase();
        if form.name.is_empty() {
            return Err(AdoptionError::MissingField { field: "name" });
        }
        if species.is_empty() {
            return Err(AdoptionError::MissingField { field: "species" });
        }
        if form.breed.is_empty() {
            return Err(AdoptionError::MissingField { field: "breed" });
        }

        let fee = adoption_fee_for(&species);
        let comments = form.comments.trim();

        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT petId FROM pets WHERE petId = ?")
            .bind(pet_id)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_some() {
            sqlx::query(
                "UPDATE pets SET petName = ?, species = ?, breed = ?, age = ?, gender = ?, \
                 size = ?, shelter = ?, adoptionFee = ?, status = ?, comments = ? \
                 WHERE petId = ?",
            )
            .bind(&form.name)
            .bind(&species)
            .bind(&form.breed)
            .bind(age)
            .bind(&form.gender)
            .bind(&form.size)
            .bind(&form.shelter)
            .bind(fee)
            .bind(form.status.label())
            .bind(comments)
            .bind(pet_id)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query(
                "INSERT INTO pets (petId, petName, species, breed, age, gender, size, shelter, \
                 adoptionFee, status, comments) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(pet_id)
            .bind(&form.name)
            .bind(&species)
            .bind(&form.breed)
            .bind(age)
            .bind(&form.gender)
            .bind(&form.size)
            .bind(&form.shelter)
            .bind(fee)
            .bind(form.status.label())
            .bind(comments)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            pet_id,
            species = %species,
            updated = existing.is_some(),
            "pet record saved"
        );

        Ok(Pet {
            pet_id,
            name: form.name,
            species,
            breed: form.breed,
            age,
            gender: form.gender,
            size: form.size,
            shelter: form.shelter,
            adoption_fee: fee,
            status: form.status,
            comments: comments.to_string(),
        })
    }

    pub async fn get(&self, pet_id: i64) -> Result<Option<Pet>, AdoptionError> {
        let row: Option<PetRow> = sqlx::query_as("SELECT * FROM pets WHERE petId = ?")
            .bind(pet_id)
            .fetch_optional(&self.pool)
            .await?;

        let pet = row.map(Pet::try_from).transpose()?;
        Ok(pet)
    }

    /// Browse the catalog with optional criteria combined conjunctively.
    /// Species and breed match as case-insensitive substrings; age and status
    /// match exactly. An empty filter returns the whole catalog.
    pub async fn find(&self, filter: &PetFilter) -> Result<Vec<Pet>, AdoptionError> {
        let mut query = QueryBuilder::new("SELECT * FROM pets WHERE 1=1");

        if let Some(species) = &filter.species {
            query.push(" AND LOWER(species) LIKE ");
            query.push_bind(format!("%{}%", species.to_lowercase()));
        }
        if let Some(breed) = &filter.breed {
            query.push(" AND LOWER(breed) LIKE ");
            query.push_bind(format!("%{}%", breed.to_lowercase()));
        }
        if let Some(age) = filter.age {
            query.push(" AND age = ");
            query.push_bind(age);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(status.label());
        }

        query.push(" ORDER BY petId");

        let rows: Vec<PetRow> = query.build_query_as().fetch_all(&self.pool).await?;
        let pets = collect_pets(rows)?;
        Ok(pets)
    }

    /// Free-text search across the columns shown on the intake desk: name,
    /// species, breed, shelter, status, plus the textual form of the id and
    /// age. An empty term lists every pet.
    pub async fn search(&self, term: &str) -> Result<Vec<Pet>, AdoptionError> {
        let term = term.trim();

        let rows: Vec<PetRow> = if term.is_empty() {
            sqlx::query_as("SELECT * FROM pets ORDER BY petId")
                .fetch_all(&self.pool)
                .await?
        } else {
            let pattern = format!("%{}%", term.to_lowercase());
            sqlx::query_as(
                "SELECT * FROM pets \
                 WHERE LOWER(petName) LIKE ? OR LOWER(species) LIKE ? OR LOWER(breed) LIKE ? \
                    OR LOWER(shelter) LIKE ? OR LOWER(status) LIKE ? \
                    OR CAST(petId AS TEXT) LIKE ? OR CAST(age AS TEXT) LIKE ? \
                 ORDER BY petId",
            )
            .bind(pattern.clone())
            .bind(pattern.clone())
            .bind(pattern.clone())
            .bind(pattern.clone())
            .bind(pattern.clone())
            .bind(pattern.clone())
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?
        };

        let pets = collect_pets(rows)?;
        Ok(pets)
    }

    /// Unconditional status overwrite used by the front desk.
    pub async fn set_status(&self, pet_id: i64, status: PetStatus) -> Result<(), AdoptionError> {
        let result = sqlx::query("UPDATE pets SET status = ? WHERE petId = ?")
            .bind(status.label())
            .bind(pet_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AdoptionError::PetNotFound { pet_id });
        }

        info!(pet_id, status = status.label(), "pet status changed");
        Ok(())
    }

    /// Replace the free-text comments on a pet record.
    pub async fn update_comments(&self, pet_id: i64, comments: &str) -> Result<(), AdoptionError> {
        let result = sqlx::query("UPDATE pets SET comments = ? WHERE petId = ?")
            .bind(comments.trim())
            .bind(pet_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AdoptionError::PetNotFound { pet_id });
        }

        Ok(())
    }
}
