use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::flight::{CreateFlightRequest, FlightResponse, GroupDetail, GroupSpec, UpdateFlightRequest};
use crate::error::{Result, StorageError};
use crate::models::{Flight, FlightStatus, Group};
use crate::repository::nomination::NominationRepository;

/// Repository for Flight and Group database operations. Flights own their
/// groups: creation and update run in a single transaction covering the
/// flight row, the group rows and the nomination group-references.
pub struct FlightRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FlightRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Flight> {
        let flight = sqlx::query_as::<_, Flight>(
            r#"
            SELECT flight_id, competition_id, number, status, start_time, created_at
            FROM flights
            WHERE flight_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(flight)
    }

    pub async fn list_by_competition(&self, competition_id: Uuid) -> Result<Vec<Flight>> {
        let flights = sqlx::query_as::<_, Flight>(
            r#"
            SELECT flight_id, competition_id, number, status, start_time, created_at
            FROM flights
            WHERE competition_id = $1
            ORDER BY number
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(flights)
    }

    pub async fn list_groups(&self, flight_id: Uuid) -> Result<Vec<Group>> {
        let groups = sqlx::query_as::<_, Group>(
            r#"
            SELECT group_id, flight_id, number, name, start_time, created_at
            FROM groups
            WHERE flight_id = $1
            ORDER BY number
            "#,
        )
        .bind(flight_id)
        .fetch_all(self.pool)
        .await?;

        Ok(groups)
    }

    /// Create a flight with its groups and assign the named nominations,
    /// all inside one transaction. Nothing persists on any failure.
    pub async fn create_with_groups(&self, req: &CreateFlightRequest) -> Result<Flight> {
        let mut tx = self.pool.begin().await?;

        let flight = sqlx::query_as::<_, Flight>(
            r#"
            INSERT INTO flights (competition_id, number, status, start_time)
            VALUES ($1, $2, $3, $4)
            RETURNING flight_id, competition_id, number, status, start_time, created_at
            "#,
        )
        .bind(req.competition_id)
        .bind(req.number)
        .bind(FlightStatus::Pending.as_str())
        .bind(req.start_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_flight_number_conflict)?;

        for spec in &req.groups {
            self.insert_group(&mut tx, flight.flight_id, spec).await?;
        }

        tx.commit().await?;

        Ok(flight)
    }

    /// Wholesale replace of a flight's start time and group layout: existing
    /// groups are dropped, their nominations unassigned, and the new layout
    /// applied from scratch. Any group or assignment missing from the new
    /// specs is discarded. Transactional, so concurrent readers never see a
    /// nomination transiently unassigned.
    pub async fn update_with_groups(
        &self,
        flight_id: Uuid,
        req: &UpdateFlightRequest,
    ) -> Result<Flight> {
        let mut tx = self.pool.begin().await?;

        let flight = sqlx::query_as::<_, Flight>(
            r#"
            UPDATE flights
            SET start_time = $2
            WHERE flight_id = $1
            RETURNING flight_id, competition_id, number, status, start_time, created_at
            "#,
        )
        .bind(flight_id)
        .bind(req.start_time)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        sqlx::query(
            r#"
            UPDATE nominations
            SET group_id = NULL
            WHERE group_id IN (SELECT group_id FROM groups WHERE flight_id = $1)
            "#,
        )
        .bind(flight_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM groups WHERE flight_id = $1")
            .bind(flight_id)
            .execute(&mut *tx)
            .await?;

        for spec in &req.groups {
            self.insert_group(&mut tx, flight_id, spec).await?;
        }

        tx.commit().await?;

        Ok(flight)
    }

    pub async fn update_status(&self, flight_id: Uuid, status: FlightStatus) -> Result<Flight> {
        let flight = sqlx::query_as::<_, Flight>(
            r#"
            UPDATE flights
            SET status = $2
            WHERE flight_id = $1
            RETURNING flight_id, competition_id, number, status, start_time, created_at
            "#,
        )
        .bind(flight_id)
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(flight)
    }

    /// A flight with groups and their nominations populated, for responses.
    pub async fn find_detailed(&self, flight_id: Uuid) -> Result<FlightResponse> {
        let flight = self.find_by_id(flight_id).await?;
        self.populate(flight).await
    }

    pub async fn list_by_competition_detailed(
        &self,
        competition_id: Uuid,
    ) -> Result<Vec<FlightResponse>> {
        let flights = self.list_by_competition(competition_id).await?;

        let mut detailed = Vec::with_capacity(flights.len());
        for flight in flights {
            detailed.push(self.populate(flight).await?);
        }

        Ok(detailed)
    }

    async fn populate(&self, flight: Flight) -> Result<FlightResponse> {
        let groups = self.list_groups(flight.flight_id).await?;
        let group_ids: Vec<Uuid> = groups.iter().map(|g| g.group_id).collect();

        let nominations = NominationRepository::new(self.pool)
            .list_by_group_ids(&group_ids)
            .await?;

        let mut details = Vec::with_capacity(groups.len());
        for group in groups {
            let assigned = nominations
                .iter()
                .filter(|n| n.group_id == Some(group.group_id))
                .cloned()
                .collect();
            details.push(GroupDetail::new(group, assigned));
        }

        Ok(FlightResponse::new(flight, details))
    }

    async fn insert_group(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        flight_id: Uuid,
        spec: &GroupSpec,
    ) -> Result<()> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (flight_id, number, name, start_time)
            VALUES ($1, $2, $3, $4)
            RETURNING group_id, flight_id, number, name, start_time, created_at
            "#,
        )
        .bind(flight_id)
        .bind(spec.number)
        .bind(&spec.name)
        .bind(spec.start_time)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_group_number_conflict)?;

        self.assign_nominations(tx, group.group_id, &spec.nomination_ids)
            .await
    }

    /// Point every named nomination at the group. Rejects the whole
    /// transaction when an id does not exist, so a flight is never silently
    /// created with a partial roster.
    async fn assign_nominations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        group_id: Uuid,
        nomination_ids: &[Uuid],
    ) -> Result<()> {
        if nomination_ids.is_empty() {
            return Ok(());
        }

        let updated = sqlx::query(
            "UPDATE nominations SET group_id = $1 WHERE nomination_id = ANY($2)",
        )
        .bind(group_id)
        .bind(nomination_ids)
        .execute(&mut **tx)
        .await?
        .rows_affected();

        if updated as usize != nomination_ids.len() {
            return Err(StorageError::Validation(format!(
                "{} of {} nominations do not exist",
                nomination_ids.len() - updated as usize,
                nomination_ids.len()
            )));
        }

        Ok(())
    }
}

fn map_flight_number_conflict(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.code().as_deref() == Some("23505") {
            return StorageError::ConstraintViolation(
                "Flight number already used in this competition".to_string(),
            );
        }
    }
    StorageError::from(e)
}

fn map_group_number_conflict(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.code().as_deref() == Some("23505") {
            return StorageError::ConstraintViolation(
                "Group number already used in this flight".to_string(),
            );
        }
    }
    StorageError::from(e)
}
