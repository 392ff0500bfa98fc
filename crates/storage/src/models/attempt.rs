use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Judge verdict for a single attempt slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum AttemptStatus {
    Pending,
    Good,
    NoGood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum LiftType {
    Squat,
    Bench,
    Deadlift,
}

impl LiftType {
    pub const ALL: [LiftType; 3] = [LiftType::Squat, LiftType::Bench, LiftType::Deadlift];

    pub fn as_str(&self) -> &'static str {
        match self {
            LiftType::Squat => "squat",
            LiftType::Bench => "bench",
            LiftType::Deadlift => "deadlift",
        }
    }
}

/// One of the three tries at a lift. All fields start null and are filled
/// in by weigh-in seeding or attempt submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttemptSlot {
    pub weight: Option<Decimal>,
    pub status: Option<AttemptStatus>,
    pub timestamp: Option<chrono::NaiveDateTime>,
}

impl AttemptSlot {
    pub const EMPTY: AttemptSlot = AttemptSlot {
        weight: None,
        status: None,
        timestamp: None,
    };

    /// An attempt counts as judged once a referee has called it either way.
    pub fn is_judged(&self) -> bool {
        matches!(
            self.status,
            Some(AttemptStatus::Good) | Some(AttemptStatus::NoGood)
        )
    }
}

/// The full 3x3 attempt grid for one athlete, stored as a JSONB document.
/// Each lift always carries exactly three slots; slot N holds attempt N+1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttemptCard {
    pub squat: Vec<AttemptSlot>,
    pub bench: Vec<AttemptSlot>,
    pub deadlift: Vec<AttemptSlot>,
}

impl AttemptCard {
    pub const ATTEMPTS_PER_LIFT: usize = 3;

    pub fn empty() -> Self {
        Self {
            squat: vec![AttemptSlot::EMPTY; Self::ATTEMPTS_PER_LIFT],
            bench: vec![AttemptSlot::EMPTY; Self::ATTEMPTS_PER_LIFT],
            deadlift: vec![AttemptSlot::EMPTY; Self::ATTEMPTS_PER_LIFT],
        }
    }

    pub fn lift(&self, lift: LiftType) -> &[AttemptSlot] {
        match lift {
            LiftType::Squat => &self.squat,
            LiftType::Bench => &self.bench,
            LiftType::Deadlift => &self.deadlift,
        }
    }

    pub fn lift_mut(&mut self, lift: LiftType) -> &mut Vec<AttemptSlot> {
        match lift {
            LiftType::Squat => &mut self.squat,
            LiftType::Bench => &mut self.bench,
            LiftType::Deadlift => &mut self.deadlift,
        }
    }

    /// True once any slot of any lift carries a declared weight.
    pub fn any_weight_declared(&self) -> bool {
        LiftType::ALL
            .iter()
            .any(|lift| self.lift(*lift).iter().any(|slot| slot.weight.is_some()))
    }

    /// True only when every lift has exactly three slots and every slot has
    /// been judged good or no-good.
    pub fn all_judged(&self) -> bool {
        LiftType::ALL.iter().all(|lift| {
            let slots = self.lift(*lift);
            slots.len() == Self::ATTEMPTS_PER_LIFT && slots.iter().all(AttemptSlot::is_judged)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn judged(weight: u32, status: AttemptStatus) -> AttemptSlot {
        AttemptSlot {
            weight: Some(Decimal::from(weight)),
            status: Some(status),
            timestamp: None,
        }
    }

    #[test]
    fn test_empty_card_has_three_slots_per_lift() {
        let card = AttemptCard::empty();
        for lift in LiftType::ALL {
            assert_eq!(card.lift(lift).len(), 3);
        }
        assert!(!card.any_weight_declared());
        assert!(!card.all_judged());
    }

    #[test]
    fn test_any_weight_declared_detects_single_opener() {
        let mut card = AttemptCard::empty();
        card.bench[0].weight = Some(Decimal::from(80));
        assert!(card.any_weight_declared());
    }

    #[test]
    fn test_all_judged_requires_every_slot() {
        let mut card = AttemptCard::empty();
        for lift in LiftType::ALL {
            for slot in card.lift_mut(lift).iter_mut() {
                *slot = judged(100, AttemptStatus::Good);
            }
        }
        assert!(card.all_judged());

        card.deadlift[2].status = Some(AttemptStatus::Pending);
        assert!(!card.all_judged());
    }

    #[test]
    fn test_no_good_counts_as_judged() {
        let slot = judged(120, AttemptStatus::NoGood);
        assert!(slot.is_judged());
        let pending = judged(120, AttemptStatus::Pending);
        assert!(!pending.is_judged());
    }

    #[test]
    fn test_status_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&AttemptStatus::NoGood).unwrap(),
            "\"noGood\""
        );
        assert_eq!(
            serde_json::to_string(&AttemptStatus::Good).unwrap(),
            "\"good\""
        );
    }
}
