use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;
use std::hint::black_box;

use query_dispatcher::lexer::scan_condition;
use query_dispatcher::parser::parse_query;
use query_dispatcher::url_compiler::{decode, UrlCompiler};

// 创建一个带常用别名的别名表
fn create_aliases() -> HashMap<String, String> {
    let mut aliases = HashMap::new();
    aliases.insert("a".to_string(), "accounts".to_string());
    aliases.insert("jq".to_string(), "job_queue".to_string());
    aliases.insert("u".to_string(), "user.profile".to_string());
    aliases
}

const TEST_CASES: [(&str, &str); 3] = [
    ("simple", "from user where name = wei"),
    (
        "medium",
        "from u where name ilike '%wei%' and age >= 18",
    ),
    (
        "complex",
        r#"from job_queue.job where status in ("pending","running") and retries > 3 and finished_at is null and owner.name ilike '%ops%'"#,
    ),
];

// 基准测试：单个条件子句的扫描性能
fn benchmark_scanner(c: &mut Criterion) {
    let clauses = vec![
        ("equality", "status = open"),
        ("text_search", "name ilike '%release plan%'"),
        ("null_check", "deleted_at is not null"),
        ("dotted_field", "user.profile.name like '%wei%'"),
    ];

    let mut group = c.benchmark_group("scanner_performance");

    for (name, clause) in clauses {
        group.bench_with_input(BenchmarkId::new("scan", name), &clause, |b, &clause| {
            b.iter(|| {
                let condition = scan_condition(black_box(clause)).expect("解析应该成功");
                black_box(condition)
            })
        });
    }

    group.finish();
}

// 基准测试：完整命令解析性能
fn benchmark_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_performance");

    for (name, command) in TEST_CASES {
        group.bench_with_input(BenchmarkId::new("parse", name), &command, |b, &command| {
            b.iter(|| {
                let parsed = parse_query(black_box(command)).expect("解析应该成功");
                black_box(parsed)
            })
        });
    }

    group.finish();
}

// 基准测试：URL 编译性能
fn benchmark_url_compiler(c: &mut Criterion) {
    let aliases = create_aliases();
    let mut group = c.benchmark_group("url_compiler_performance");

    for (name, command) in TEST_CASES {
        // 预先完成解析
        let parsed = parse_query(command).expect("解析应该成功");

        group.bench_with_input(BenchmarkId::new("encode", name), &parsed, |b, parsed| {
            b.iter(|| {
                let compiler = UrlCompiler::new(&aliases);
                let compiled = compiler.encode(black_box(parsed)).expect("编译应该成功");
                black_box(compiled)
            })
        });
    }

    group.finish();
}

// 基准测试：完整的端到端处理
fn benchmark_end_to_end(c: &mut Criterion) {
    let aliases = create_aliases();
    let mut group = c.benchmark_group("end_to_end_performance");

    for (name, command) in TEST_CASES {
        group.bench_with_input(
            BenchmarkId::new("full_pipeline", name),
            &command,
            |b, &command| {
                b.iter(|| {
                    // 完整的处理流程
                    let parsed = parse_query(black_box(command)).expect("解析应该成功");
                    let compiler = UrlCompiler::new(&aliases);
                    let compiled = compiler.encode(&parsed).expect("编译应该成功");
                    black_box(compiled)
                })
            },
        );
    }

    group.finish();
}

// 基准测试：查询串反解性能
fn benchmark_decode(c: &mut Criterion) {
    let query_strings = vec![
        ("simple", "status=open"),
        ("medium", "name__icontains=wei&age__gte=18"),
        (
            "complex",
            "status__in=pending,running&retries__gt=3&finished_at__isnull=True&owner__name__icontains=ops",
        ),
    ];

    let mut group = c.benchmark_group("decode_performance");

    for (name, query_string) in query_strings {
        group.bench_with_input(
            BenchmarkId::new("decode", name),
            &query_string,
            |b, &query_string| b.iter(|| black_box(decode(black_box(query_string)))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_scanner,
    benchmark_parser,
    benchmark_url_compiler,
    benchmark_end_to_end,
    benchmark_decode
);
criterion_main!(benches);
