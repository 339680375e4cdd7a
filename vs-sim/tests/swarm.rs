use vs_sim::{RunConfig, Swarm};

#[test]
fn a_put_propagates_to_every_other_agent_in_the_swarm() {
    let config = RunConfig {
        agent_count: 3,
        start_positions: vec![(0, 0), (1, 1), (2, 2)],
        ticks: 0,
        vs_size: 8,
    };
    let mut swarm = Swarm::new(&config).unwrap();

    swarm.put(0, 5, 42).unwrap();
    swarm.settle();

    for i in 0..3 {
        assert!(swarm.agent(i).has(5), "agent {i} should have learned key 5");
    }
}

#[test]
fn settle_eventually_goes_quiet() {
    let config = RunConfig {
        agent_count: 2,
        start_positions: vec![(0, 0), (10, 10)],
        ticks: 0,
        vs_size: 8,
    };
    let mut swarm = Swarm::new(&config).unwrap();
    swarm.put(0, 1, 7).unwrap();

    // Should terminate; an infinite rebroadcast loop would hang the test.
    swarm.settle();
    assert!(swarm.agent(1).has(1));
}
