//! Chart orchestrator integration tests.

use dental_chart_core::chart::{ChartOptions, DentalChart};
use dental_chart_core::models::{ChartMap, Condition, SurfaceKey, ToothState, ToothStatus};
use dental_chart_core::render::{render_tooth, GlyphBody, RingStyle, STRIPED_OPACITY};
use dental_chart_core::vocabulary::STRIPE_COLOR;
use proptest::prelude::*;

fn surface_strategy() -> impl Strategy<Value = SurfaceKey> {
    prop::sample::select(SurfaceKey::all().to_vec())
}

fn condition_strategy() -> impl Strategy<Value = Condition> {
    prop::sample::select(Condition::known().to_vec())
}

fn status_strategy() -> impl Strategy<Value = ToothStatus> {
    prop::sample::select(ToothStatus::known().to_vec())
}

fn editable_chart() -> DentalChart {
    DentalChart::new(ChartMap::new(), ChartOptions::default())
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_caries_on_first_molar_renders_striped() {
    let mut chart = editable_chart();
    let state = chart.update_surface(14, SurfaceKey::Occlusal, Condition::CariesClassI);

    assert_eq!(state.status, ToothStatus::Present);
    assert_eq!(
        state.condition_at(&SurfaceKey::Occlusal),
        Some(&Condition::CariesClassI)
    );

    let glyph = chart.render_tooth(14);
    let overlays = glyph.overlays();
    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays[0].surface, SurfaceKey::Occlusal);
    assert!(overlays[0].fill.is_striped());
    assert_eq!(overlays[0].fill.color(), STRIPE_COLOR);
    assert!((overlays[0].opacity - STRIPED_OPACITY).abs() < f32::EPSILON);
}

#[test]
fn test_selecting_same_condition_twice_clears_surface() {
    let mut chart = editable_chart();
    chart.update_surface(14, SurfaceKey::Occlusal, Condition::CariesClassI);
    let state = chart.update_surface(14, SurfaceKey::Occlusal, Condition::CariesClassI);

    assert!(state.surfaces.is_empty());
    assert!(chart.active_conditions().is_empty());
}

#[test]
fn test_missing_tooth_ignores_surfaces() {
    let mut chart = editable_chart();
    chart.update_surface(3, SurfaceKey::Mesial, Condition::FillingAmalgam);
    chart.update_status(3, ToothStatus::Missing);

    // Surface data is kept but not drawn.
    assert_eq!(chart.tooth_data(3).surfaces.len(), 1);
    let glyph = chart.render_tooth(3);
    assert!(matches!(glyph.body, GlyphBody::Missing { .. }));
    assert!(glyph.overlays().is_empty());
    assert!(glyph.ring().is_none());

    // Restoring the tooth brings the filling back.
    chart.update_status(3, ToothStatus::Present);
    assert_eq!(chart.render_tooth(3).overlays().len(), 1);
}

#[test]
fn test_root_canal_ring_is_dashed() {
    let glyph = render_tooth(30, false, &ToothStatus::RootCanal, &Default::default(), false);
    let ring = glyph.ring().unwrap();
    assert_eq!(ring.style, RingStyle::Dashed);
}

#[test]
fn test_active_conditions_in_tooth_order() {
    let mut chart = editable_chart();
    chart.update_status(30, ToothStatus::Crown);
    chart.update_surface(3, SurfaceKey::Buccal, Condition::Abscess);
    chart.update_surface(19, SurfaceKey::Distal, Condition::FillingGold);
    chart.handle_tooth_press(19);

    let rows = chart.active_conditions();
    let teeth: Vec<u32> = rows.iter().map(|r| r.tooth).collect();
    assert_eq!(teeth, vec![3, 19, 30]);
    assert!(rows[1].selected);
    assert_eq!(rows[2].status_chip.as_deref(), Some("CROWN"));
    assert_eq!(rows[0].surface_chips[0].text, "B: Abscess");
}

#[test]
fn test_unknown_values_from_other_clients_round_trip() {
    let chart: ChartMap = serde_json::from_str(
        r#"{"12":{"status":"sealed","surfaces":{"O":"glass_ionomer","X":"caries"}}}"#,
    )
    .unwrap();
    let mut chart = DentalChart::new(chart, ChartOptions::default());

    let glyph = chart.render_tooth(12);
    // Unknown status: no ring. Unknown condition and surface: no overlay.
    assert!(glyph.ring().is_none());
    assert!(glyph.overlays().is_empty());

    chart.update_surface(12, SurfaceKey::Mesial, Condition::Caries);
    let json = chart.chart().to_canonical_json().unwrap();
    assert!(json.contains(r#""status":"sealed""#));
    assert!(json.contains(r#""O":"glass_ionomer""#));
    assert!(json.contains(r#""X":"caries""#));
    assert!(json.contains(r#""M":"caries""#));
}

#[test]
fn test_legacy_keys_survive_an_unrelated_edit() {
    let chart: ChartMap = serde_json::from_str(
        r#"{"3":{"surfaces":{"O":"class_ii"}},"5":{"status":"root_canal"}}"#,
    )
    .unwrap();
    let mut chart = DentalChart::new(chart, ChartOptions::default());

    chart.update_surface(14, SurfaceKey::Mesial, Condition::Caries);

    assert_eq!(
        chart.chart().to_canonical_json().unwrap(),
        r#"{"3":{"status":"present","surfaces":{"O":"class_ii"}},"5":{"status":"root_canal","surfaces":{}},"14":{"status":"present","surfaces":{"M":"caries"}}}"#
    );
    // Still drawn and listed as what they mean.
    assert!(chart.render_tooth(3).overlays()[0].fill.is_striped());
    assert_eq!(chart.active_conditions()[1].status_chip.as_deref(), Some("ROOTCANAL"));
}

#[test]
fn test_legacy_key_toggles_off_with_current_key() {
    let chart: ChartMap =
        serde_json::from_str(r#"{"3":{"status":"present","surfaces":{"O":"class_i"}}}"#).unwrap();
    let mut chart = DentalChart::new(chart, ChartOptions::default());

    let state = chart.update_surface(3, SurfaceKey::Occlusal, Condition::CariesClassI);
    assert!(state.surfaces.is_empty());
}

#[test]
fn test_uncharted_tooth_keys_survive_an_edit() {
    let chart: ChartMap = serde_json::from_str(
        r#"{"14":{"status":"present","surfaces":{}},"014":{"status":"crown"},"A":{"status":"present","surfaces":{"O":"caries"}}}"#,
    )
    .unwrap();
    let mut chart = DentalChart::new(chart, ChartOptions::default());

    chart.update_status(14, ToothStatus::Crown);

    assert_eq!(chart.tooth_data(14).status, ToothStatus::Crown);
    assert_eq!(
        chart.chart().to_canonical_json().unwrap(),
        r#"{"14":{"status":"crown","surfaces":{}},"014":{"status":"crown"},"A":{"status":"present","surfaces":{"O":"caries"}}}"#
    );
}

// =========================================================================
// Laws
// =========================================================================

proptest! {
    #[test]
    fn prop_toggle_twice_restores_state(
        tooth in 1u32..=32,
        seed in prop::collection::vec((surface_strategy(), condition_strategy()), 0..6),
        surface in surface_strategy(),
        condition in condition_strategy(),
    ) {
        let mut chart = editable_chart();
        for (s, c) in seed {
            chart.update_surface(tooth, s, c);
        }
        // Start from a healthy surface; an occupied one is overwritten on
        // the first press and cleared on the second.
        chart.update_surface(tooth, surface.clone(), Condition::None);
        let before = chart.tooth_data(tooth);

        chart.update_surface(tooth, surface.clone(), condition.clone());
        chart.update_surface(tooth, surface, condition);
        prop_assert_eq!(chart.tooth_data(tooth), before);
    }

    #[test]
    fn prop_different_condition_overwrites(
        surface in surface_strategy(),
        first in condition_strategy(),
        second in condition_strategy(),
    ) {
        prop_assume!(first != second);
        let mut chart = editable_chart();
        chart.update_surface(8, surface.clone(), first);
        let state = chart.update_surface(8, surface.clone(), second.clone());
        prop_assert_eq!(state.condition_at(&surface), Some(&second));
        prop_assert_eq!(state.surfaces.len(), 1);
    }

    #[test]
    fn prop_none_never_stored(
        surface in surface_strategy(),
        condition in condition_strategy(),
    ) {
        let mut chart = editable_chart();
        chart.update_surface(5, surface.clone(), condition);
        let state = chart.update_surface(5, surface, Condition::None);
        prop_assert!(state.surfaces.is_empty());
        prop_assert!(!state.surfaces.values().any(Condition::is_none));
    }

    #[test]
    fn prop_status_and_surfaces_are_independent(
        status in status_strategy(),
        surface in surface_strategy(),
        condition in condition_strategy(),
    ) {
        let mut chart = editable_chart();
        chart.update_surface(20, surface.clone(), condition.clone());
        let state = chart.update_status(20, status.clone());
        prop_assert_eq!(state.condition_at(&surface), Some(&condition));

        let state = chart.update_surface(20, surface, condition);
        prop_assert_eq!(state.status, status);
    }

    #[test]
    fn prop_projection_matches_affected_teeth(
        edits in prop::collection::vec(
            (1u32..=32, surface_strategy(), condition_strategy(), prop::option::of(status_strategy())),
            0..20,
        ),
    ) {
        let mut chart = editable_chart();
        for (tooth, surface, condition, status) in edits {
            chart.update_surface(tooth, surface, condition);
            if let Some(status) = status {
                chart.update_status(tooth, status);
            }
        }

        let projected: Vec<u32> = chart.active_conditions().iter().map(|r| r.tooth).collect();
        let expected: Vec<u32> = chart
            .chart()
            .iter()
            .filter(|(_, state)| state.is_affected())
            .map(|(tooth, _)| tooth)
            .collect();
        prop_assert_eq!(projected, expected);
    }

    #[test]
    fn prop_reading_never_writes(tooth in 0u32..200) {
        let chart = editable_chart();
        prop_assert_eq!(chart.tooth_data(tooth), ToothState::default());
        let _ = chart.render_tooth(tooth);
        prop_assert!(chart.chart().is_empty());
    }
}
