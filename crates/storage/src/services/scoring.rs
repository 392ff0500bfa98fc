use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::result::{AttemptRequest, WeighInRequest};
use crate::error::{Result, StorageError};
use crate::models::{AthleteResult, AttemptCard, AttemptSlot, AttemptStatus, LiftType};
use crate::repository::nomination::NominationRepository;
use crate::repository::result::ResultRepository;

/// Fetch the unique result for (athlete, competition), creating a skeleton
/// on first use. Categories are required only when the skeleton has to be
/// created. A create race is resolved by re-reading the winner's row.
pub async fn get_or_create_result(
    pool: &PgPool,
    athlete_id: Uuid,
    competition_id: Uuid,
    nomination_id: Uuid,
    age_category: Option<&str>,
    weight_category: Option<&str>,
) -> Result<AthleteResult> {
    let repo = ResultRepository::new(pool);

    if let Some(existing) = repo
        .find_by_athlete_and_competition(athlete_id, competition_id)
        .await?
    {
        return Ok(existing);
    }

    let (age_category, weight_category) = match (age_category, weight_category) {
        (Some(age), Some(weight)) => (age, weight),
        _ => {
            return Err(StorageError::Validation(
                "Age and weight categories are required to create a result".to_string(),
            ));
        }
    };

    match repo
        .insert_skeleton(
            athlete_id,
            competition_id,
            nomination_id,
            age_category,
            weight_category,
        )
        .await
    {
        Ok(created) => Ok(created),
        Err(e) if e.is_unique_violation() => {
            // Lost the create race; the other writer's row is the one.
            repo.find_by_athlete_and_competition(athlete_id, competition_id)
                .await?
                .ok_or(StorageError::NotFound)
        }
        Err(e) => Err(e),
    }
}

/// Record a weigh-in. Overwrites the weigh-in block and re-stamps every
/// cross-reference unconditionally, and seeds attempt 1 of each lift from
/// the declared openers when they are supplied.
pub async fn save_weigh_in(pool: &PgPool, req: &WeighInRequest) -> Result<AthleteResult> {
    let mut result = get_or_create_result(
        pool,
        req.athlete_id,
        req.competition_id,
        req.nomination_id,
        Some(&req.age_category),
        Some(&req.weight_category),
    )
    .await?;

    let now = Utc::now().naive_utc();

    result.nomination_id = req.nomination_id;
    result.flight_id = Some(req.flight_id);
    result.group_id = Some(req.group_id);
    result.age_category = req.age_category.clone();
    result.weight_category = req.weight_category.clone();
    result.bodyweight = Some(req.bodyweight);
    result.lot_number = Some(req.lot_number);
    result.weighed_in_at = Some(now);

    if let Some(openers) = req.start_weights {
        for (lift, weight) in [
            (LiftType::Squat, openers.squat),
            (LiftType::Bench, openers.bench),
            (LiftType::Deadlift, openers.deadlift),
        ] {
            result.attempts.0.lift_mut(lift)[0] = AttemptSlot {
                weight: Some(weight),
                status: Some(AttemptStatus::Pending),
                timestamp: Some(now),
            };
        }
    }

    ResultRepository::new(pool).save(&result).await
}

/// Record one attempt. The athlete's nomination must exist; it supplies the
/// categories when the result has to be lazily created. The slot is written
/// unconditionally, then the best/total rule is applied.
pub async fn save_attempt(pool: &PgPool, req: &AttemptRequest) -> Result<AthleteResult> {
    if !(1..=AttemptCard::ATTEMPTS_PER_LIFT as u8).contains(&req.attempt_number) {
        return Err(StorageError::Validation(format!(
            "Attempt number must be between 1 and {}",
            AttemptCard::ATTEMPTS_PER_LIFT
        )));
    }

    let nomination = NominationRepository::new(pool)
        .find_by_athlete_and_competition(req.athlete_id, req.competition_id)
        .await?;

    let mut result = get_or_create_result(
        pool,
        req.athlete_id,
        req.competition_id,
        nomination.nomination_id,
        Some(&nomination.age_category),
        Some(&nomination.weight_category),
    )
    .await?;

    result.flight_id = Some(req.flight_id);
    result.group_id = Some(req.group_id);

    let slot_index = (req.attempt_number - 1) as usize;
    result.attempts.0.lift_mut(req.lift_type)[slot_index] = AttemptSlot {
        weight: Some(req.weight),
        status: Some(req.status),
        timestamp: Some(Utc::now().naive_utc()),
    };

    if let Some(new_best) = updated_best(result.best_for(req.lift_type), req.status, req.weight) {
        result.set_best_for(req.lift_type, new_best);
        result.total = compute_total(result.best_squat, result.best_bench, result.best_deadlift);
    }

    ResultRepository::new(pool).save(&result).await
}

/// Monotonic-max best rule: only a good lift heavier than the standing best
/// raises it. Returns the new best when the attempt changes it.
pub fn updated_best(
    current: Option<Decimal>,
    status: AttemptStatus,
    weight: Decimal,
) -> Option<Decimal> {
    if status != AttemptStatus::Good {
        return None;
    }
    if weight > current.unwrap_or(Decimal::ZERO) {
        Some(weight)
    } else {
        None
    }
}

/// Total is defined only once all three lifts have a best.
pub fn compute_total(
    squat: Option<Decimal>,
    bench: Option<Decimal>,
    deadlift: Option<Decimal>,
) -> Option<Decimal> {
    match (squat, bench, deadlift) {
        (Some(s), Some(b), Some(d)) => Some(s + b + d),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: u32) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_good_lift_above_best_raises_it() {
        assert_eq!(
            updated_best(Some(dec(100)), AttemptStatus::Good, dec(110)),
            Some(dec(110))
        );
    }

    #[test]
    fn test_good_lift_below_best_stands() {
        // Attempt 3 at 105 after a 110 best leaves the best at 110.
        assert_eq!(updated_best(Some(dec(110)), AttemptStatus::Good, dec(105)), None);
        assert_eq!(updated_best(Some(dec(110)), AttemptStatus::Good, dec(110)), None);
    }

    #[test]
    fn test_first_good_lift_sets_best_from_zero() {
        assert_eq!(
            updated_best(None, AttemptStatus::Good, dec(90)),
            Some(dec(90))
        );
    }

    #[test]
    fn test_no_good_and_pending_never_touch_best() {
        assert_eq!(updated_best(Some(dec(50)), AttemptStatus::NoGood, dec(200)), None);
        assert_eq!(updated_best(None, AttemptStatus::NoGood, dec(200)), None);
        assert_eq!(updated_best(None, AttemptStatus::Pending, dec(200)), None);
    }

    #[test]
    fn test_total_requires_all_three_bests() {
        assert_eq!(compute_total(Some(dec(100)), Some(dec(80)), None), None);
        assert_eq!(compute_total(None, None, None), None);
        assert_eq!(
            compute_total(Some(dec(100)), Some(dec(80)), Some(dec(150))),
            Some(dec(330))
        );
    }

    #[test]
    fn test_best_sequence_matches_max_of_good_attempts() {
        let attempts = [
            (AttemptStatus::Good, 100),
            (AttemptStatus::Good, 110),
            (AttemptStatus::Good, 105),
            (AttemptStatus::NoGood, 120),
        ];

        let mut best = None;
        for (status, weight) in attempts {
            if let Some(new_best) = updated_best(best, status, dec(weight)) {
                best = Some(new_best);
            }
        }

        assert_eq!(best, Some(dec(110)));
    }
}
