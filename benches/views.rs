use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ocgui::domain::{Agent, AgentId, SkillId};
use ocgui::views::{search_items, sort_agents, AgentSearch, AgentSort, AgentSortKey, SortDirection};
use std::sync::Arc;

fn create_agents(count: usize) -> Arc<Vec<Agent>> {
    let agents = (0..count)
        .map(|i| {
            let mut agent = Agent::new(
                AgentId::from(format!("agent-{}", i)),
                format!("Agent {:05}", (i * 7919) % count),
                format!("Handles task group {}", i % 13),
            );
            agent.enabled = i % 3 != 0;
            agent.model = (i % 4 == 0).then(|| "gpt-4".to_string());
            agent.tags = vec![format!("team-{}", i % 5), "automation".to_string()];
            agent.skills = (0..i % 6).map(|s| SkillId::from(format!("skill-{}", s))).collect();
            for t in 0..i % 4 {
                agent.tools.insert(format!("tool-{}", t), "allow".to_string());
            }
            agent
        })
        .collect();
    Arc::new(agents)
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1_000, 10_000] {
        let agents = create_agents(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("substring", size), &agents, |b, agents| {
            b.iter(|| search_items(black_box(agents), black_box("TEAM-3")))
        });

        group.bench_with_input(BenchmarkId::new("memoized", size), &agents, |b, agents| {
            let mut view = AgentSearch::new();
            b.iter(|| view.results(black_box(agents), black_box("team-3")))
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let agents = create_agents(10_000);
    group.throughput(Throughput::Elements(agents.len() as u64));

    for key in [
        AgentSortKey::Name,
        AgentSortKey::Status,
        AgentSortKey::Skills,
        AgentSortKey::Tools,
    ] {
        group.bench_with_input(BenchmarkId::new("by_key", key), &key, |b, &key| {
            b.iter(|| sort_agents(black_box(&agents), key, SortDirection::Asc))
        });
    }

    group.bench_function("memoized_name_desc", |b| {
        let mut sort = AgentSort::new();
        b.iter(|| sort.sorted(black_box(&agents), AgentSortKey::Name, SortDirection::Desc))
    });

    group.finish();
}

criterion_group!(benches, bench_search, bench_sort);
criterion_main!(benches);
