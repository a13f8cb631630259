use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sretools_client::IpRangesDocument;

fn sample_document(prefixes: u32) -> String {
    let entries: Vec<String> = (0..prefixes)
        .map(|i| {
            format!(
                r#"{{"ip_prefix":"3.{}.{}.0/24","region":"us-east-1","service":"AMAZON","network_border_group":"us-east-1"}}"#,
                (i >> 8) & 0xFF,
                i & 0xFF
            )
        })
        .collect();
    format!(
        r#"{{"syncToken":"1718236988","createDate":"2024-06-13-00-03-08","prefixes":[{}],"ipv6_prefixes":[]}}"#,
        entries.join(",")
    )
}

fn bench_from_json(c: &mut Criterion) {
    let json = sample_document(8000);
    c.bench_function("ip_ranges_from_json", |b| {
        b.iter(|| IpRangesDocument::from_json(black_box(&json)))
    });
}

fn bench_to_entries(c: &mut Criterion) {
    let doc = IpRangesDocument::from_json(&sample_document(8000)).unwrap();
    c.bench_function("ip_ranges_to_entries", |b| b.iter(|| black_box(&doc).to_entries()));
}

criterion_group!(benches, bench_from_json, bench_to_entries);
criterion_main!(benches);
