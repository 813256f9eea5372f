//! Integration tests for the period-evaluation engine.
//!
//! Walks full evaluation timelines: anchoring, multi-period catch-up,
//! calendar boundaries across week, month, and year edges, and the
//! level progression over many completed periods.

use chrono::{DateTime, Duration, TimeZone, Utc};
use habithub_core::{
    CompressedPeriods, EvaluationEvent, Evaluator, Habit, HabitStatus, Period, Timing, User,
};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

fn five_minute_days() -> Evaluator {
    Evaluator::new()
        .with_timing(Timing::Compressed(CompressedPeriods {
            daily: Duration::minutes(5),
            ..CompressedPeriods::default()
        }))
        .with_coin_seed(0)
}

#[test]
fn test_recorded_compressed_timeline() {
    // Five-minute "days". The habit is added at midnight and never
    // completed; eleven minutes of neglect later, three periods have
    // elapsed.
    let mut user = User::new("ada@example.com");
    user.hp = 10;
    user.habits.active.push(Habit::new(
        1,
        "Meditate",
        "wellness",
        Period::Daily,
        at(2024, 1, 1, 0, 0, 0),
    ));

    let evaluator = five_minute_days();

    // First evaluation anchors the boundary, costing nothing.
    let first = evaluator.evaluate(&user, at(2024, 1, 1, 0, 0, 0));
    assert_eq!(first.user.hp, 10);
    assert_eq!(
        first.user.habits.active[0].last_period_end,
        Some(at(2024, 1, 1, 0, 5, 0))
    );

    // 00:16:00 is past the 00:05, 00:10, and 00:15 boundaries.
    let second = evaluator.evaluate(&first.user, at(2024, 1, 1, 0, 16, 0));
    assert_eq!(second.user.hp, 7);
    assert_eq!(second.user.habits.active[0].streak, 0);
    assert_eq!(
        second.user.habits.active[0].last_period_end,
        Some(at(2024, 1, 1, 0, 20, 0))
    );

    let missed_ends: Vec<DateTime<Utc>> = second
        .events
        .iter()
        .map(|e| match e {
            EvaluationEvent::Missed { period_end, .. } => *period_end,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(
        missed_ends,
        vec![
            at(2024, 1, 1, 0, 5, 0),
            at(2024, 1, 1, 0, 10, 0),
            at(2024, 1, 1, 0, 15, 0),
        ]
    );
}

#[test]
fn test_calendar_daily_completion_cycle() {
    let mut user = User::new("ada@example.com");
    user.habits.active.push(Habit::new(
        1,
        "Journal",
        "writing",
        Period::Daily,
        at(2024, 1, 1, 9, 0, 0),
    ));

    let evaluator = Evaluator::new().with_coin_seed(0);

    let anchored = evaluator.evaluate(&user, at(2024, 1, 1, 9, 0, 0));
    assert_eq!(
        anchored.user.habits.active[0].last_period_end,
        Some(at(2024, 1, 1, 23, 59, 59) + Duration::milliseconds(999))
    );

    // Completed during the day; next morning the reward lands and the
    // boundary moves to the end of Jan 2.
    let mut user = anchored.user;
    user.habits.active[0].status = HabitStatus::Completed;
    let rewarded = evaluator.evaluate(&user, at(2024, 1, 2, 9, 0, 0));
    let habit = &rewarded.user.habits.active[0];
    assert_eq!(habit.streak, 1);
    assert_eq!(habit.status, HabitStatus::Default);
    assert_eq!(rewarded.user.exp, 5);
    assert_eq!(
        habit.last_period_end,
        Some(at(2024, 1, 2, 23, 59, 59) + Duration::milliseconds(999))
    );
}

#[test]
fn test_calendar_weekly_boundary() {
    // 2024-03-06 is a Wednesday; its week ends Sunday 2024-03-10.
    let mut user = User::new("ada@example.com");
    user.habits.active.push(Habit::new(
        1,
        "Review goals",
        "planning",
        Period::Weekly,
        at(2024, 3, 6, 10, 0, 0),
    ));

    let evaluator = Evaluator::new().with_coin_seed(0);
    let anchored = evaluator.evaluate(&user, at(2024, 3, 6, 10, 0, 0));
    assert_eq!(
        anchored.user.habits.active[0].last_period_end,
        Some(at(2024, 3, 10, 23, 59, 59) + Duration::milliseconds(999))
    );

    // The following Tuesday one week has been missed; the next
    // boundary is the Sunday after.
    let missed = evaluator.evaluate(&anchored.user, at(2024, 3, 12, 8, 0, 0));
    assert_eq!(missed.user.hp, anchored.user.hp - 1);
    assert_eq!(
        missed.user.habits.active[0].last_period_end,
        Some(at(2024, 3, 17, 23, 59, 59) + Duration::milliseconds(999))
    );
}

#[test]
fn test_calendar_monthly_boundary_across_year_end() {
    let mut user = User::new("ada@example.com");
    user.habits.active.push(Habit::new(
        1,
        "Budget",
        "finance",
        Period::Monthly,
        at(2023, 12, 15, 12, 0, 0),
    ));

    let evaluator = Evaluator::new().with_coin_seed(0);
    let anchored = evaluator.evaluate(&user, at(2023, 12, 15, 12, 0, 0));
    assert_eq!(
        anchored.user.habits.active[0].last_period_end,
        Some(at(2023, 12, 31, 23, 59, 59) + Duration::milliseconds(999))
    );

    let missed = evaluator.evaluate(&anchored.user, at(2024, 1, 5, 0, 0, 0));
    assert_eq!(missed.user.hp, anchored.user.hp - 1);
    assert_eq!(
        missed.user.habits.active[0].last_period_end,
        Some(at(2024, 1, 31, 23, 59, 59) + Duration::milliseconds(999))
    );
}

#[test]
fn test_mixed_habits_settle_independently() {
    let mut user = User::new("ada@example.com");
    let added = at(2024, 1, 1, 0, 0, 0);
    let mut done = Habit::new(1, "Run", "fitness", Period::Daily, added);
    done.last_period_end = Some(at(2024, 1, 1, 0, 5, 0));
    done.status = HabitStatus::Completed;
    let mut skipped = Habit::new(2, "Read", "learning", Period::Daily, added);
    skipped.last_period_end = Some(at(2024, 1, 1, 0, 5, 0));
    user.habits.active.push(done);
    user.habits.active.push(skipped);

    let result = five_minute_days().evaluate(&user, at(2024, 1, 1, 0, 6, 0));
    assert_eq!(result.user.hp, user.hp - 1);
    assert_eq!(result.user.habits.active[0].streak, 1);
    assert_eq!(result.user.habits.active[1].streak, 0);
    assert_eq!(result.events.len(), 2);
    assert!(matches!(
        result.events[0],
        EvaluationEvent::Rewarded { habit_id: 1, .. }
    ));
    assert!(matches!(
        result.events[1],
        EvaluationEvent::Missed { habit_id: 2, .. }
    ));
}

#[test]
fn test_level_progression_over_six_completed_periods() {
    // Exp per completed period is 5 * streak, so six straight
    // completions accumulate 5+10+15+20+25+30 = 105 and cross the
    // 100-exp line exactly once.
    let mut user = User::new("ada@example.com");
    user.habits.active.push(Habit::new(
        1,
        "Practice",
        "music",
        Period::Daily,
        at(2024, 1, 1, 0, 0, 0),
    ));

    let evaluator = five_minute_days();
    let mut current = evaluator.evaluate(&user, at(2024, 1, 1, 0, 0, 0)).user;
    // One minute past each successive boundary (00:05, 00:10, ...).
    let mut now = at(2024, 1, 1, 0, 6, 0);
    let mut level_ups = 0;

    for _ in 0..6 {
        current.habits.active[0].status = HabitStatus::Completed;
        let outcome = evaluator.evaluate(&current, now);
        level_ups += outcome
            .events
            .iter()
            .filter(|e| matches!(e, EvaluationEvent::LeveledUp { .. }))
            .count();
        current = outcome.user;
        now += Duration::minutes(5);
    }

    assert_eq!(current.habits.active[0].streak, 6);
    assert_eq!(current.level, 2);
    assert_eq!(current.exp, 0);
    assert_eq!(current.hp, 5);
    assert_eq!(level_ups, 1);
}
