use batchdash::application::services::ColorRegistry;
use batchdash::domain::{CHART_PALETTE, Color};

#[test]
fn given_new_registry_when_assigning_then_uses_palette_in_first_seen_order() {
    let registry = ColorRegistry::new();

    assert_eq!(registry.color_for("gpu"), CHART_PALETTE[0]);
    assert_eq!(registry.color_for("cpu"), CHART_PALETTE[1]);
    assert_eq!(registry.assigned(), 2);
}

#[test]
fn given_assigned_queue_when_asking_again_then_color_is_stable() {
    let registry = ColorRegistry::new();
    let first = registry.color_for("gpu");

    for queue in ["a", "b", "c"] {
        registry.color_for(queue);
    }

    assert_eq!(registry.color_for("gpu"), first);
    assert_eq!(registry.assigned(), 4);
}

#[test]
fn given_more_queues_than_colors_when_assigning_then_wraps_around() {
    let registry = ColorRegistry::with_palette(vec![Color::new("#111111"), Color::new("#222222")]);

    let colors: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|queue| registry.color_for(queue))
        .collect();

    assert_eq!(colors[2], Color::new("#111111"));
    assert_ne!(colors[0], colors[1]);
}

#[test]
fn given_empty_palette_when_building_then_falls_back_to_default() {
    let registry = ColorRegistry::with_palette(Vec::new());
    assert_eq!(registry.color_for("only"), CHART_PALETTE[0]);
}

#[test]
fn given_two_registries_when_fed_same_order_then_agree() {
    let queues = vec!["gpu".to_string(), "cpu".to_string(), "io".to_string()];

    let left = ColorRegistry::new().colors_for(&queues);
    let right = ColorRegistry::new().colors_for(&queues);

    assert_eq!(left, right);
    assert_eq!(left[2].0, "io");
}

#[test]
fn given_default_palette_when_inspecting_then_all_colors_are_distinct_hex() {
    let mut seen: Vec<&str> = CHART_PALETTE.iter().map(Color::as_str).collect();
    seen.sort();
    seen.dedup();

    assert_eq!(seen.len(), CHART_PALETTE.len());
    assert!(seen.iter().all(|hex| hex.len() == 7 && hex.starts_with('#')));
}
