use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use orgchart::config::GraphDefaults;
use orgchart::org::{Org, Role, Tier};
use orgchart::theme::Theme;
use orgchart::{build_chart, to_dot};

fn wide_org(reports: usize) -> Org {
    let mut roles = vec![Role {
        id: "root".to_string(),
        title: vec!["Director".to_string()],
        person: Some("Root".to_string()),
        tier: Tier::Dean,
        manager: None,
    }];
    for i in 0..reports {
        roles.push(Role {
            id: format!("r{i}"),
            title: vec![format!("Report {i}")],
            person: Some(format!("Person {i}")),
            tier: Tier::Staff,
            manager: Some("root".to_string()),
        });
    }
    Org {
        roles,
        teams: Vec::new(),
    }
}

fn bench_chart(c: &mut Criterion) {
    let theme = Theme::library_default();
    let defaults = GraphDefaults::default();

    c.bench_function("build_chart_library", |b| {
        b.iter(|| build_chart(black_box(Org::library()), &theme, &defaults).unwrap())
    });

    let graph = build_chart(Org::library(), &theme, &defaults).unwrap();
    c.bench_function("to_dot_library", |b| b.iter(|| to_dot(black_box(&graph))));

    let wide = wide_org(200);
    c.bench_function("build_chart_wide_200", |b| {
        b.iter(|| build_chart(black_box(&wide), &theme, &defaults).unwrap())
    });
}

criterion_group!(benches, bench_chart);
criterion_main!(benches);
