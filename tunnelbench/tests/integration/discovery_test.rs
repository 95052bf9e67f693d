//! Route discovery from a tunnel directory

use super::{bench_with, write_tunnel_configs, FakeNetwork, Link};
use std::sync::Arc;
use tunnelbench::BenchConfig;

#[tokio::test]
async fn test_missing_directory_tests_direct_only() {
    let network = Arc::new(FakeNetwork::new(Link::Up { avg_ms: 15.0, hops: 3 }));

    let report = bench_with(&network)
        .target("1.1.1.1")
        .tunnel_dir("/nonexistent/tunnelbench/tunnels")
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.best().unwrap().route, "Direct");
}

#[tokio::test]
async fn test_only_conf_files_become_routes() {
    let dir = tempfile::tempdir().unwrap();
    write_tunnel_configs(dir.path(), &["us-sea", "de-ber"]);
    std::fs::write(dir.path().join("README.md"), "notes").unwrap();
    std::fs::create_dir(dir.path().join("archive.conf")).unwrap();

    let network = Arc::new(FakeNetwork::new(Link::Dark));
    let bench = bench_with(&network)
        .target("1.1.1.1")
        .tunnel_dir(dir.path())
        .build()
        .unwrap();

    let names: Vec<_> = bench
        .routes()
        .await
        .unwrap()
        .iter()
        .map(|r| r.name().to_string())
        .collect();
    assert_eq!(names, vec!["Direct", "de-ber", "us-sea"]);
}

#[tokio::test]
async fn test_custom_direct_route_name() {
    let dir = tempfile::tempdir().unwrap();
    write_tunnel_configs(dir.path(), &["home", "office"]);

    let network = Arc::new(FakeNetwork::new(Link::Dark));
    let bench = bench_with(&network)
        .config(BenchConfig {
            direct_route_name: "home".into(),
            ..BenchConfig::default().without_delays()
        })
        .target("1.1.1.1")
        .tunnel_dir(dir.path())
        .build()
        .unwrap();

    let routes = bench.routes().await.unwrap();
    assert_eq!(routes.len(), 2);
    assert!(routes[0].is_direct());
    assert_eq!(routes[0].name(), "home");
    assert_eq!(routes[1].name(), "office");
}

#[tokio::test]
async fn test_case_variant_definitions_become_one_route() {
    let dir = tempfile::tempdir().unwrap();
    write_tunnel_configs(dir.path(), &["nl-ams"]);
    std::fs::copy(dir.path().join("nl-ams.conf"), dir.path().join("nl-ams.CONF")).unwrap();

    let network = Arc::new(
        FakeNetwork::new(Link::Dark).tunnel("nl-ams", Link::Up { avg_ms: 21.0, hops: 6 }),
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
    assert_eq!(names, vec!["Direct", "nl-ams"]);
    let raised = network.events().iter().filter(|e| e.starts_with("up:")).count();
    assert_eq!(raised, 1);
}
