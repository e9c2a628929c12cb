use criterion::{Criterion, criterion_group, criterion_main};
use jsonmend::{Options, repair};

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair");
    let cases = vec![
        r#"{"already": "valid", "n": 1}"#,
        r#"{a: 1, b: 2, c: 3}"#,
        "// comment\n{\"a\": 1, /*b*/ \"b\": 2,}\n",
        r#"{ "on": True, "off": False, "vals": [1,2,], }"#,
        r#"{ "a": [ {"x":1} {"x":2} ] }"#,
        r#"{"text": "The quick brown fox, \n jumps"#,
        r#"{"amount": 1200.50", "flag": true}"#,
        "random garbage that never parses",
    ];
    let opts = Options::default();
    for (i, s) in cases.into_iter().enumerate() {
        group.bench_function(format!("case_{}", i), |b| {
            b.iter(|| {
                let report = repair(std::hint::black_box(s), &opts);
                std::hint::black_box(report);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_repair);
criterion_main!(benches);
