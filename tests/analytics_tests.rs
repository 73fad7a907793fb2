use shiftlog::core::analytics::{AnalyticsLogic, aggregate};
use shiftlog::errors::AppError;
use shiftlog::models::filter::ShiftFilter;

mod common;
use common::{ORG, OTHER_ORG, memory_pool, seed_employee, seed_shift};

#[test]
fn test_open_shifts_are_excluded() {
    let pool = memory_pool();
    let a = seed_employee(&pool, ORG, None, false);
    let b = seed_employee(&pool, ORG, None, false);

    seed_shift(&pool, &a, 1_000, Some(5_000), Some("P1"), None);
    seed_shift(&pool, &b, 2_000, None, Some("P1"), None);

    let result = AnalyticsLogic::compute_project_time_analytics(
        &pool.conn,
        0,
        10_000,
        &ShiftFilter::for_organization(ORG),
    )
    .unwrap();

    assert_eq!(result.total_time, 4_000);
    assert_eq!(result.total_shifts, 1);
    assert_eq!(result.average_shift_duration, 4_000.0);
    assert_eq!(result.project_breakdown["P1"].shift_count, 1);
}

#[test]
fn test_project_and_task_breakdown() {
    let pool = memory_pool();
    let emp = seed_employee(&pool, ORG, None, false);

    seed_shift(&pool, &emp, 1_000, Some(1_100), Some("P1"), Some("T1"));
    seed_shift(&pool, &emp, 2_000, Some(2_200), Some("P1"), Some("T2"));
    seed_shift(&pool, &emp, 3_000, Some(3_300), Some("P2"), None);
    seed_shift(&pool, &emp, 4_000, Some(4_400), None, None);

    let r = AnalyticsLogic::compute_project_time_analytics(
        &pool.conn,
        0,
        10_000,
        &ShiftFilter::for_organization(ORG),
    )
    .unwrap();

    // the project-less shift counts toward the totals only
    assert_eq!(r.total_time, 1_000);
    assert_eq!(r.total_shifts, 4);
    assert_eq!(r.average_shift_duration, 250.0);
    assert_eq!(r.project_breakdown.len(), 2);

    let p1 = &r.project_breakdown["P1"];
    assert_eq!(p1.total_time, 300);
    assert_eq!(p1.shift_count, 2);
    assert_eq!(p1.tasks["T1"].total_time, 100);
    assert_eq!(p1.tasks["T2"].total_time, 200);
    assert_eq!(p1.tasks["T2"].shift_count, 1);

    let p2 = &r.project_breakdown["P2"];
    assert_eq!(p2.total_time, 300);
    assert!(p2.tasks.is_empty());
}

#[test]
fn test_time_window_and_scope_filters() {
    let pool = memory_pool();
    let a = seed_employee(&pool, ORG, Some("team-a"), false);
    let b = seed_employee(&pool, ORG, Some("team-b"), false);
    let stranger = seed_employee(&pool, OTHER_ORG, Some("team-a"), false);

    seed_shift(&pool, &a, 500, Some(1_500), Some("P1"), None); // starts before window
    seed_shift(&pool, &a, 2_000, Some(3_000), Some("P1"), None);
    seed_shift(&pool, &a, 8_000, Some(12_000), Some("P1"), None); // ends after window
    seed_shift(&pool, &b, 2_000, Some(2_500), Some("P1"), None);
    seed_shift(&pool, &stranger, 2_000, Some(9_000), Some("P1"), None);

    let all = AnalyticsLogic::compute_project_time_analytics(
        &pool.conn,
        1_000,
        10_000,
        &ShiftFilter::for_organization(ORG),
    )
    .unwrap();
    assert_eq!(all.total_shifts, 2);
    assert_eq!(all.total_time, 1_500);

    let mut scope = ShiftFilter::for_organization(ORG);
    scope.team_id = Some("team-a".into());
    let team_a =
        AnalyticsLogic::compute_project_time_analytics(&pool.conn, 1_000, 10_000, &scope).unwrap();
    assert_eq!(team_a.total_shifts, 1);
    assert_eq!(team_a.total_time, 1_000);
}

#[test]
fn test_empty_window_has_zero_average() {
    let pool = memory_pool();
    let r = AnalyticsLogic::compute_project_time_analytics(
        &pool.conn,
        0,
        10,
        &ShiftFilter::for_organization(ORG),
    )
    .unwrap();
    assert_eq!(r.total_shifts, 0);
    assert_eq!(r.total_time, 0);
    assert_eq!(r.average_shift_duration, 0.0);
    assert!(r.project_breakdown.is_empty());
    assert_eq!(aggregate(&[]), r);
}

#[test]
fn test_inverted_window_is_rejected() {
    let pool = memory_pool();
    let err = AnalyticsLogic::compute_project_time_analytics(
        &pool.conn,
        10,
        0,
        &ShiftFilter::for_organization(ORG),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_result_serializes_with_wire_names() {
    let pool = memory_pool();
    let emp = seed_employee(&pool, ORG, None, false);
    seed_shift(&pool, &emp, 0, Some(60_000), Some("P1"), Some("T1"));

    let r = AnalyticsLogic::compute_project_time_analytics(
        &pool.conn,
        0,
        60_000,
        &ShiftFilter::for_organization(ORG),
    )
    .unwrap();
    let json = serde_json::to_value(&r).unwrap();

    assert_eq!(json["totalTime"], 60_000);
    assert_eq!(json["totalShifts"], 1);
    assert_eq!(json["projectBreakdown"]["P1"]["tasks"]["T1"]["shiftCount"], 1);
    assert_eq!(json["averageShiftDuration"], 60_000.0);
}
