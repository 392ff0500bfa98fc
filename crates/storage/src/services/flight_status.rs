use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{AthleteResult, Flight, FlightStatus, Nomination};
use crate::repository::flight::FlightRepository;
use crate::repository::nomination::NominationRepository;
use crate::repository::result::ResultRepository;

/// Classify a flight from its nominations and their results.
///
/// - `pending`: nobody is assigned, or nothing has been recorded yet
/// - `completed`: every nomination has a result with all nine attempts judged
/// - `inProgress`: anything in between
pub fn derive_flight_status(
    nominations: &[Nomination],
    results: &[AthleteResult],
) -> FlightStatus {
    if nominations.is_empty() || results.is_empty() {
        return FlightStatus::Pending;
    }

    let any_started = results.iter().any(AthleteResult::has_started);
    if !any_started {
        return FlightStatus::Pending;
    }

    let all_completed = nominations.iter().all(|nomination| {
        results
            .iter()
            .find(|r| r.nomination_id == nomination.nomination_id)
            .is_some_and(AthleteResult::is_fully_judged)
    });

    if all_completed {
        FlightStatus::Completed
    } else {
        FlightStatus::InProgress
    }
}

/// Load a flight's groups, their nominations and the matching results, and
/// run the pure classification over them.
pub async fn calculate_flight_status(pool: &PgPool, flight_id: Uuid) -> Result<FlightStatus> {
    let flight_repo = FlightRepository::new(pool);

    // 404 for an unknown flight, not a silent "pending".
    flight_repo.find_by_id(flight_id).await?;

    let groups = flight_repo.list_groups(flight_id).await?;
    let group_ids: Vec<Uuid> = groups.iter().map(|g| g.group_id).collect();

    let nominations = NominationRepository::new(pool)
        .list_by_group_ids(&group_ids)
        .await?;
    let nomination_ids: Vec<Uuid> = nominations.iter().map(|n| n.nomination_id).collect();

    let results = ResultRepository::new(pool)
        .list_by_nomination_ids(&nomination_ids)
        .await?;

    Ok(derive_flight_status(&nominations, &results))
}

/// Recompute the derived status and persist it, overwriting whatever was
/// stored.
pub async fn recalculate_flight_status(pool: &PgPool, flight_id: Uuid) -> Result<Flight> {
    let status = calculate_flight_status(pool, flight_id).await?;
    FlightRepository::new(pool)
        .update_status(flight_id, status)
        .await
}

/// Persist a caller-requested status. Only a `completed` claim is audited
/// against the derived status; pending/inProgress are taken at face value.
pub async fn update_flight_status(
    pool: &PgPool,
    flight_id: Uuid,
    requested: FlightStatus,
) -> Result<Flight> {
    if requested == FlightStatus::Completed {
        let derived = calculate_flight_status(pool, flight_id).await?;
        if derived != FlightStatus::Completed {
            return Err(StorageError::Validation(format!(
                "Flight cannot be marked completed: derived status is {derived}"
            )));
        }
    }

    FlightRepository::new(pool)
        .update_status(flight_id, requested)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttemptCard, AttemptSlot, AttemptStatus};
    use rust_decimal::Decimal;
    use sqlx::types::Json;

    fn nomination(group_id: Uuid) -> Nomination {
        Nomination {
            nomination_id: Uuid::new_v4(),
            athlete_id: Uuid::new_v4(),
            competition_id: Uuid::new_v4(),
            weight_category: "M_93".to_string(),
            age_category: "open".to_string(),
            status: "approved".to_string(),
            nominated_by: None,
            nominated_at: chrono::Utc::now().naive_utc(),
            group_id: Some(group_id),
        }
    }

    fn empty_result(nomination: &Nomination) -> AthleteResult {
        AthleteResult {
            result_id: Uuid::new_v4(),
            athlete_id: nomination.athlete_id,
            competition_id: nomination.competition_id,
            nomination_id: nomination.nomination_id,
            flight_id: None,
            group_id: nomination.group_id,
            age_category: nomination.age_category.clone(),
            weight_category: nomination.weight_category.clone(),
            bodyweight: None,
            lot_number: None,
            weighed_in_at: None,
            attempts: Json(AttemptCard::empty()),
            best_squat: None,
            best_bench: None,
            best_deadlift: None,
            total: None,
            wilks: None,
            ipf_points: None,
            place: None,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    fn fully_judged(nomination: &Nomination) -> AthleteResult {
        let mut result = empty_result(nomination);
        result.bodyweight = Some(Decimal::from(92));
        let card = &mut result.attempts.0;
        for lift in crate::models::LiftType::ALL {
            for (i, slot) in card.lift_mut(lift).iter_mut().enumerate() {
                *slot = AttemptSlot {
                    weight: Some(Decimal::from(100 + i as u32 * 5)),
                    status: Some(if i == 2 {
                        AttemptStatus::NoGood
                    } else {
                        AttemptStatus::Good
                    }),
                    timestamp: None,
                };
            }
        }
        result
    }

    #[test]
    fn test_no_nominations_is_pending() {
        assert_eq!(derive_flight_status(&[], &[]), FlightStatus::Pending);
    }

    #[test]
    fn test_nominations_without_results_is_pending() {
        let noms = vec![nomination(Uuid::new_v4())];
        assert_eq!(derive_flight_status(&noms, &[]), FlightStatus::Pending);
    }

    #[test]
    fn test_results_without_any_activity_is_pending() {
        let noms = vec![nomination(Uuid::new_v4())];
        let results = vec![empty_result(&noms[0])];
        assert_eq!(derive_flight_status(&noms, &results), FlightStatus::Pending);
    }

    #[test]
    fn test_weigh_in_alone_starts_the_flight() {
        let noms = vec![nomination(Uuid::new_v4())];
        let mut result = empty_result(&noms[0]);
        result.bodyweight = Some(Decimal::from(83));
        assert_eq!(
            derive_flight_status(&noms, &[result]),
            FlightStatus::InProgress
        );
    }

    #[test]
    fn test_single_declared_opener_starts_the_flight() {
        let noms = vec![nomination(Uuid::new_v4())];
        let mut result = empty_result(&noms[0]);
        result.attempts.0.squat[0].weight = Some(Decimal::from(150));
        assert_eq!(
            derive_flight_status(&noms, &[result]),
            FlightStatus::InProgress
        );
    }

    #[test]
    fn test_all_nominations_fully_judged_is_completed() {
        let group_id = Uuid::new_v4();
        let noms: Vec<Nomination> = (0..4).map(|_| nomination(group_id)).collect();
        let results: Vec<AthleteResult> = noms.iter().map(fully_judged).collect();
        assert_eq!(
            derive_flight_status(&noms, &results),
            FlightStatus::Completed
        );
    }

    #[test]
    fn test_missing_result_blocks_completion() {
        let group_id = Uuid::new_v4();
        let noms: Vec<Nomination> = (0..4).map(|_| nomination(group_id)).collect();
        // One athlete has no result at all.
        let results: Vec<AthleteResult> = noms[..3].iter().map(fully_judged).collect();
        assert_eq!(
            derive_flight_status(&noms, &results),
            FlightStatus::InProgress
        );
    }

    #[test]
    fn test_one_pending_attempt_blocks_completion() {
        let noms = vec![nomination(Uuid::new_v4())];
        let mut result = fully_judged(&noms[0]);
        result.attempts.0.bench[2].status = Some(AttemptStatus::Pending);
        assert_eq!(
            derive_flight_status(&noms, &[result]),
            FlightStatus::InProgress
        );
    }
}
