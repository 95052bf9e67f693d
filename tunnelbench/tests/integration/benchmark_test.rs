//! End-to-end benchmark runs

use super::{bench_with, write_tunnel_configs, FakeNetwork, Link};
use std::sync::Arc;
use tunnelbench::{BenchError, RouteDefinition};

#[tokio::test]
async fn test_best_route_selected_across_tunnels() {
    let dir = tempfile::tempdir().unwrap();
    write_tunnel_configs(dir.path(), &["a-ams", "b-fra", "c-nyc"]);

    let network = Arc::new(
        FakeNetwork::new(Link::Up { avg_ms: 38.0, hops: 9 })
            .tunnel("a-ams", Link::Up { avg_ms: 29.0, hops: 7 })
            .tunnel("b-fra", Link::Up { avg_ms: 73.0, hops: 12 })
            .tunnel("c-nyc", Link::Up { avg_ms: 29.0, hops: 8 }),
    );

    let report = bench_with(&network)
        .target("1.1.1.1")
        .tunnel_dir(dir.path())
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    let names: Vec<_> = report.results.iter().map(|r| r.route.as_str()).collect();
    assert_eq!(names, vec!["Direct", "a-ams", "b-fra", "c-nyc"]);
    assert_eq!(report.results[0].avg_latency_ms, Some(38.0));
    assert_eq!(report.results[2].hop_count, Some(12));
    assert_eq!(report.results[2].last_hop_rtt_ms, Some(73.0));

    // a-ams and c-nyc tie; the earlier route wins
    assert_eq!(report.best().unwrap().route, "a-ams");
    assert_eq!(network.overlaps(), 0);
    assert_eq!(network.active(), None);
}

#[tokio::test]
async fn test_probes_run_inside_their_tunnel() {
    let dir = tempfile::tempdir().unwrap();
    write_tunnel_configs(dir.path(), &["nl-ams"]);

    let network = Arc::new(
        FakeNetwork::new(Link::Up { avg_ms: 20.0, hops: 5 })
            .tunnel("nl-ams", Link::Up { avg_ms: 25.0, hops: 6 }),
    );

    bench_with(&network)
        .target("example.com")
        .tunnel_dir(dir.path())
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    // Direct probes, then the endpoint pre-flight ping outside the tunnel,
    // then the tunnel's own probes between up and down
    assert_eq!(
        network.events(),
        vec![
            "ping:direct",
            "trace:direct",
            "ping:direct",
            "up:nl-ams",
            "ping:nl-ams",
            "trace:nl-ams",
            "down:nl-ams",
        ]
    );
}

#[tokio::test]
async fn test_refused_tunnel_does_not_stop_run() {
    let dir = tempfile::tempdir().unwrap();
    write_tunnel_configs(dir.path(), &["broken", "works"]);

    let network = Arc::new(
        FakeNetwork::new(Link::Dark)
            .tunnel("broken", Link::Refused)
            .tunnel("works", Link::Up { avg_ms: 44.5, hops: 10 }),
    );

    let report = bench_with(&network)
        .target("1.1.1.1")
        .tunnel_dir(dir.path())
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.results.len(), 3);
    let broken = &report.results[1];
    assert_eq!(broken.avg_latency_ms, None);
    assert_eq!(broken.hop_count, None);
    assert_eq!(broken.last_hop_rtt_ms, None);

    assert_eq!(report.best().unwrap().route, "works");
    assert!(!network.events().contains(&"down:broken".to_string()));
    assert!(network.events().contains(&"down:works".to_string()));
}

#[tokio::test]
async fn test_unreachable_everywhere_has_no_best() {
    let network = Arc::new(FakeNetwork::new(Link::Dark));

    let report = bench_with(&network)
        .target("10.255.255.1")
        .routes(vec![RouteDefinition::direct("Direct")])
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(report.best().is_none());
    assert_eq!(report.results[0].avg_latency_ms, None);
    // Traced anyway, and the trace came back empty
    assert_eq!(report.results[0].hop_count, Some(0));
    assert_eq!(report.results[0].last_hop_rtt_ms, None);
    // One ping per latency attempt
    let pings = network.events().iter().filter(|e| e.starts_with("ping")).count();
    assert_eq!(pings, 2);
}

#[tokio::test]
async fn test_benchmark_can_run_twice() {
    let dir = tempfile::tempdir().unwrap();
    write_tunnel_configs(dir.path(), &["se-sto"]);

    let network = Arc::new(
        FakeNetwork::new(Link::Dark).tunnel("se-sto", Link::Up { avg_ms: 12.0, hops: 4 }),
    );
    let bench = bench_with(&network)
        .target("1.1.1.1")
        .tunnel_dir(dir.path())
        .build()
        .unwrap();

    let first = bench.run().await.unwrap();
    let second = bench.run().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(network.overlaps(), 0);
}

#[tokio::test]
async fn test_empty_route_list_rejected() {
    let network = Arc::new(FakeNetwork::new(Link::Dark));

    let result = bench_with(&network)
        .target("1.1.1.1")
        .routes(Vec::new())
        .build()
        .unwrap()
        .run()
        .await;

    assert!(matches!(result, Err(BenchError::Config(_))));
    assert!(network.events().is_empty());
}
