//! Command processor and command parsing

use intersection_scheduler::simulation::{
    apply_command, parse_commands, process_command, Command, Direction, IntersectionState, Road,
    Transition,
};

#[test]
fn test_add_vehicle_appends_to_queue() {
    let state = IntersectionState::new();
    let state = apply_command(&state, &Command::add_vehicle("v1", Road::North, Road::East));

    assert_eq!(state.current_step, 0);
    assert_eq!(state.vehicles.len(), 1);
    assert_eq!(state.vehicles[0].id, "v1");
    assert_eq!(
        state.vehicles[0].direction,
        Direction::new(Road::North, Road::East)
    );
    assert_eq!(state.vehicles[0].arrived_at_step, 0);
}

#[test]
fn test_vehicles_remember_arrival_step() {
    let commands = [
        Command::add_vehicle("v1", Road::North, Road::East),
        Command::add_vehicle("v2", Road::North, Road::East),
        Command::Step,
        Command::Step,
        Command::add_vehicle("v3", Road::South, Road::West),
    ];
    let state = commands
        .iter()
        .fold(IntersectionState::new(), |state, command| {
            apply_command(&state, command)
        });

    assert_eq!(state.current_step, 2);
    let arrivals: Vec<(&str, u32)> = state
        .vehicles
        .iter()
        .map(|v| (v.id.as_str(), v.arrived_at_step))
        .collect();
    assert_eq!(arrivals, vec![("v3", 2)]);
}

#[test]
fn test_step_increments_counter() {
    let state = apply_command(&IntersectionState::new(), &Command::Step);
    assert_eq!(state.current_step, 1);
    let state = apply_command(&state, &Command::Step);
    assert_eq!(state.current_step, 2);
}

#[test]
fn test_add_vehicle_does_not_touch_previous_state() {
    let before = IntersectionState::new();
    let after = apply_command(&before, &Command::add_vehicle("v1", Road::West, Road::East));

    assert!(before.vehicles.is_empty());
    assert_eq!(after.vehicles.len(), 1);
}

#[test]
fn test_unknown_command_is_ignored() {
    let state = apply_command(
        &IntersectionState::new(),
        &Command::add_vehicle("v1", Road::East, Road::South),
    );

    let transition = process_command(&state, &Command::Unknown);
    assert!(matches!(transition, Transition::Ignored(_)));
    assert_eq!(transition.state(), &state);
}

#[test]
fn test_parse_command_log() {
    let json = r#"{
        "commands": [
            {"type": "addVehicle", "vehicleId": "vehicle1", "startRoad": "south", "endRoad": "north"},
            {"type": "step"},
            {"type": "honk"}
        ]
    }"#;

    let commands = parse_commands(json).expect("valid command log");
    assert_eq!(
        commands,
        vec![
            Command::add_vehicle("vehicle1", Road::South, Road::North),
            Command::Step,
            Command::Unknown,
        ]
    );
}

#[test]
fn test_parse_rejects_unknown_road() {
    let json = r#"{"commands": [
        {"type": "addVehicle", "vehicleId": "v1", "startRoad": "North", "endRoad": "south"}
    ]}"#;
    assert!(parse_commands(json).is_err());
}

#[test]
fn test_parse_rejects_missing_fields() {
    let json = r#"{"commands": [{"type": "addVehicle", "startRoad": "north"}]}"#;
    assert!(parse_commands(json).is_err());
}

#[test]
fn test_road_from_str_is_exact() {
    assert_eq!("west".parse::<Road>(), Ok(Road::West));
    let err = "West".parse::<Road>().unwrap_err();
    assert!(err.to_string().contains("West"));
    assert!(" north".parse::<Road>().is_err());
}

#[test]
fn test_parse_rejects_non_string_command_type() {
    let json = r#"{"commands": [{"type": 5}, {"type": "step"}]}"#;
    assert!(parse_commands(json).is_err());
}
