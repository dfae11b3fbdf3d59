// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for download filename resolution and bridge message
// parsing in the webshell-bridge crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use webshell_bridge::filename::{guess_file_name, resolve_filename};
use webshell_bridge::protocol::BridgeMessage;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Header with both `filename*` and plain `filename` parameters; the
/// extended form wins and must be percent-decoded.
fn bench_extended_header(c: &mut Criterion) {
    let cd = "attachment; filename=\"fallback.pdf\"; filename*=UTF-8''%EA%B3%B5%EC%A7%80%EC%82%AC%ED%95%AD.pdf";
    let url = "https://app.test/board/download.do?fileNo=3";

    c.bench_function("resolve_filename (extended header)", |b| {
        b.iter(|| black_box(resolve_filename(black_box(Some(cd)), black_box(url), black_box("application/pdf"))));
    });
}

/// No usable header: falls through to the URL path and MIME extension.
fn bench_url_fallback(c: &mut Criterion) {
    let url = "https://app.test/files/report%202024?download=1";

    c.bench_function("guess_file_name (url fallback)", |b| {
        b.iter(|| black_box(guess_file_name(black_box(url), black_box(None), black_box("application/pdf"))));
    });
}

fn bench_route_change_parse(c: &mut Criterion) {
    let raw = r#"{"type":"ROUTE_CHANGE","path":"/board/list.do","userId":"u-1024"}"#;

    c.bench_function("BridgeMessage::parse (ROUTE_CHANGE)", |b| {
        b.iter(|| black_box(BridgeMessage::parse(black_box(raw))));
    });
}

criterion_group!(benches, bench_extended_header, bench_url_fallback, bench_route_change_parse);
criterion_main!(benches);
