use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::domain::{
    Answer, Application, ApplicationForm, ApplicationStatus, FencedYard, LivingSituation,
    PetStatus, UnknownLabel,
};
use super::error::AdoptionError;

/// Store-backed register of adoption applications. Owns the coupled state
/// machine linking a pet's status to the review state of its application.
#[derive(Debug, Clone)]
pub struct ApplicationRegistry {
    pool: SqlitePool,
}

/// Row shape of the `applications` table, camelCase columns included.
#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    #[sqlx(rename = "appId")]
    app_id: i64,
    #[sqlx(rename = "petId")]
    pet_id: i64,
    #[sqlx(rename = "petName")]
    pet_name: String,
    #[sqlx(rename = "adopterName")]
    adopter_name: String,
    #[sqlx(rename = "adopterEmail")]
    adopter_email: String,
    #[sqlx(rename = "adopterPhone")]
    adopter_phone: String,
    #[sqlx(rename = "ownedBefore")]
    owned_before: String,
    #[sqlx(rename = "awareNeeds")]
    aware_needs: String,
    #[sqlx(rename = "readyCosts")]
    ready_costs: String,
    #[sqlx(rename = "adoptionDate")]
    adoption_date: NaiveDate,
    #[sqlx(rename = "ownOtherPets")]
    own_other_pets: String,
    #[sqlx(rename = "otherPetsType")]
    other_pets_type: String,
    #[sqlx(rename = "livingSituation")]
    living_situation: String,
    #[sqlx(rename = "fencedYard")]
    fenced_yard: String,
    #[sqlx(rename = "primaryCaregiver")]
    primary_caregiver: String,
    notes: String,
    #[sqlx(rename = "appStatus")]
    status: String,
    #[sqlx(rename = "submittedAt")]
    submitted_at: DateTime<Utc>,
}

fn parse_label<T>(raw: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = UnknownLabel>,
{
    raw.parse().map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl TryFrom<ApplicationRow> for Application {
    type Error = sqlx::Error;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Application {
            app_id: row.app_id,
            pet_id: row.pet_id,
            pet_name: row.pet_name,
            adopter_name: row.adopter_name,
            adopter_email: row.adopter_email,
            adopter_phone: row.adopter_phone,
            owned_before: parse_label(&row.owned_before)?,
            aware_needs: parse_label(&row.aware_needs)?,
            ready_costs: parse_label(&row.ready_costs)?,
            adoption_date: row.adoption_date,
            own_other_pets: parse_label(&row.own_other_pets)?,
            other_pets_type: row.other_pets_type,
            living_situation: parse_label(&row.living_situation)?,
            fenced_yard: parse_label(&row.fenced_yard)?,
            primary_caregiver: row.primary_caregiver,
            notes: row.notes,
            status: parse_label(&row.status)?,
            submitted_at: row.submitted_at,
        })
    }
}

/// The questionnaire answers after screening, with every required answer
/// unwrapped.
struct ScreenedAnswers {
    owned_before: Answer,
    aware_needs: Answer,
    ready_costs: Answer,
    own_other_pets: Answer,
    living_situation: LivingSituation,
    fenced_yard: FencedYard,
}

/// Check the questionnaire the way the front desk always has: contact
/// details first, then the experience answers, then the living situation,
/// then the caregiver, then the certification. The first gap wins.
fn screen(form: &ApplicationForm) -> Result<ScreenedAnswers, AdoptionError> {
    if form.adopter_name.trim().is_empty() {
        return Err(AdoptionError::MissingField {
            field: "adopter_name",
        });
    }
    if form.adopter_email.trim().is_empty() {
        return Err(AdoptionError::MissingField {
            field: "adopter_email",
        });
    }
    if form.adopter_phone.trim().is_empty() {
        return Err(AdoptionError::MissingField {
            field: "adopter_phone",
        });
    }

    let owned_before = form.owned_before.ok_or(AdoptionError::MissingField {
        field: "owned_before",
    })?;
    let aware_needs = form.aware_needs.ok_or(AdoptionError::MissingField {
        field: "aware_needs",
    })?;
    let ready_costs = form.ready_costs.ok_or(AdoptionError::MissingField {
        field: "ready_costs",
    })?;

    let own_other_pets = form.own_other_pets.ok_or(AdoptionError::MissingField {
        field: "own_other_pets",
    })?;
    let living_situation = form.living_situation.ok_or(AdoptionError::MissingField {
        field: "living_situation",
    })?;
    let fenced_yard = form.fenced_yard.ok_or(AdoptionError::MissingField {
        field: "fenced_yard",
    })?;

    if form.primary_caregiver.trim().is_empty() {
        return Err(AdoptionError::MissingField {
            field: "primary_caregiver",
        });
    }
    if !form.certified {
        return Err(AdoptionError::MissingField {
            field: "certification",
        });
    }

    Ok(ScreenedAnswers {
        owned_before,
        aware_needs,
        ready_costs,
        own_other_pets,
        living_situation,
        fenced_yard,
    })
}

impl ApplicationRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// File an application for a pet that is currently available.
    ///
    /// The availability check and both writes run inside one transaction: the
    /// pet's status is re-read, the application row is inserted, and the pet
    /// is held as `Pending`. A pet that is anything other than `Available` at
    /// that point rejects the submission and nothing is written.
    pub async fn submit(&self, form: ApplicationForm) -> Result<Application, AdoptionError> {
        let answers = screen(&form)?;

        let adopter_name = form.adopter_name.trim();
        let adopter_email = form.adopter_email.trim();
        let adopter_phone = form.adopter_phone.trim();
        let other_pets_type = form.other_pets_type.trim();
        let primary_caregiver = form.primary_caregiver.trim();
        let notes = form.notes.trim();

        let mut tx = self.pool.begin().await?;

        let pet: Option<(String, String)> =
            sqlx::query_as("SELECT petName, status FROM pets WHERE petId = ?")
                .bind(form.pet_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (pet_name, pet_status) = pet.ok_or(AdoptionError::PetNotFound {
            pet_id: form.pet_id,
        })?;

        if !pet_status.eq_ignore_ascii_case(PetStatus::Available.label()) {
            return Err(AdoptionError::PetUnavailable {
                pet_id: form.pet_id,
                status: pet_status,
            });
        }

        let submitted_at = Utc::now();
        let app_id: i64 = sqlx::query_scalar(
            "INSERT INTO applications (petId, petName, adopterName, adopterEmail, adopterPhone, \
             ownedBefore, awareNeeds, readyCosts, adoptionDate, ownOtherPets, otherPetsType, \
             livingSituation, fencedYard, primaryCaregiver, notes, appStatus, submittedAt) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING appId",
        )
        .bind(form.pet_id)
        .bind(&pet_name)
        .bind(adopter_name)
        .bind(adopter_email)
        .bind(adopter_phone)
        .bind(answers.owned_before.label())
        .bind(answers.aware_needs.label())
        .bind(answers.ready_costs.label())
        .bind(form.adoption_date)
        .bind(answers.own_other_pets.label())
        .bind(other_pets_type)
        .bind(answers.living_situation.label())
        .bind(answers.fenced_yard.label())
        .bind(primary_caregiver)
        .bind(notes)
        .bind(ApplicationStatus::Submitted.label())
        .bind(submitted_at)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE pets SET status = ? WHERE petId = ?")
            .bind(PetStatus::Pending.label())
            .bind(form.pet_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            app_id,
            pet_id = form.pet_id,
            "application submitted; pet held as pending"
        );

        Ok(Application {
            app_id,
            pet_id: form.pet_id,
            pet_name,
            adopter_name: adopter_name.to_string(),
            adopter_email: adopter_email.to_string(),
            adopter_phone: adopter_phone.to_string(),
            owned_before: answers.owned_before,
            aware_needs: answers.aware_needs,
            ready_costs: answers.ready_costs,
            adoption_date: form.adoption_date,
            own_other_pets: answers.own_other_pets,
            other_pets_type: other_pets_type.to_string(),
            living_situation: answers.living_situation,
            fenced_yard: answers.fenced_yard,
            primary_caregiver: primary_caregiver.to_string(),
            notes: notes.to_string(),
            status: ApplicationStatus::Submitted,
            submitted_at,
        })
    }

    /// All applications, most recent first.
    pub async fn list(&self) -> Result<Vec<Application>, AdoptionError> {
        let rows: Vec<ApplicationRow> =
            sqlx::query_as("SELECT * FROM applications ORDER BY appId DESC")
                .fetch_all(&self.pool)
                .await?;

        let applications = rows
            .into_iter()
            .map(Application::try_from)
            .collect::<Result<_, sqlx::Error>>()?;
        Ok(applications)
    }

    pub async fn get(&self, app_id: i64) -> Result<Option<Application>, AdoptionError> {
        let row: Option<ApplicationRow> =
            sqlx::query_as("SELECT * FROM applications WHERE appId = ?")
                .bind(app_id)
                .fetch_optional(&self.pool)
                .await?;

        let application = row.map(Application::try_from).transpose()?;
        Ok(application)
    }

    /// Approve a submitted application and mark its pet adopted.
    pub async fn approve(&self, app_id: i64) -> Result<(), AdoptionError> {
        self.review(app_id, ApplicationStatus::Approved, PetStatus::Adopted)
            .await
    }

    /// Deny a submitted application and release its pet back to the catalog.
    pub async fn deny(&self, app_id: i64) -> Result<(), AdoptionError> {
        self.review(app_id, ApplicationStatus::Denied, PetStatus::Available)
            .await
    }

    /// Record a reviewer's verdict and the matching pet transition in one
    /// transaction. Applications already past review are left untouched, so
    /// repeating a verdict (or contradicting one) cannot disturb a pet that
    /// may since have moved on to another applicant.
    async fn review(
        &self,
        app_id: i64,
        verdict: ApplicationStatus,
        pet_outcome: PetStatus,
    ) -> Result<(), AdoptionError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT petId, appStatus FROM applications WHERE appId = ?")
                .bind(app_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (pet_id, current) = row.ok_or(AdoptionError::ApplicationNotFound { app_id })?;

        if !current.eq_ignore_ascii_case(ApplicationStatus::Submitted.label()) {
            debug!(app_id, current = %current, "application already reviewed; no-op");
            tx.commit().await?;
            return Ok(());
        }

        sqlx::query("UPDATE applications SET appStatus = ? WHERE appId = ?")
            .bind(verdict.label())
            .bind(app_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE pets SET status = ? WHERE petId = ?")
            .bind(pet_outcome.label())
            .bind(pet_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(app_id, pet_id, verdict = verdict.label(), "application reviewed");
        Ok(())
    }
}
