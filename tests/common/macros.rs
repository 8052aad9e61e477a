/// Asserts that an agent with the given id is no longer in the world.
#[macro_export]
macro_rules! assert_agent_gone {
    ($world:expr, $id:expr) => {
        assert!(
            !$world.scheduler.contains($id),
            "Agent {} should be gone but is still on the roster",
            $id
        );
        assert!(
            $world.grid.position($id).is_none(),
            "Agent {} should be gone but still holds a grid cell",
            $id
        );
    };
}

/// Asserts the current activity label of an agent.
#[macro_export]
macro_rules! assert_activity {
    ($world:expr, $id:expr, $label:expr) => {
        let state = $world.scheduler.get($id).expect("Agent not found in world");
        assert_eq!(state.activity(), $label, "Agent {} activity mismatch", $id);
    };
}
