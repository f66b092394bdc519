use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sparcur::parser::{GraphResultParser, JsonResultParser, ResultParser, XmlResultParser};
use sparcur::results::ResultCursor;

fn xml_bindings(rows: usize) -> String {
    let mut doc = String::from(
        "<sparql xmlns=\"http://www.w3.org/2005/sparql-results#\"><head>\
         <variable name=\"s\"/><variable name=\"name\"/><variable name=\"age\"/></head><results>",
    );
    for i in 0..rows {
        doc.push_str(&format!(
            "<result><binding name=\"s\"><uri>http://example.org/p{i}</uri></binding>\
             <binding name=\"name\"><literal xml:lang=\"en\">Person {i}</literal></binding>\
             <binding name=\"age\"><literal datatype=\"http://www.w3.org/2001/XMLSchema#integer\">{}</literal></binding></result>",
            i % 100
        ));
    }
    doc.push_str("</results></sparql>");
    doc
}

fn json_bindings(rows: usize) -> String {
    let bindings: Vec<String> = (0..rows)
        .map(|i| {
            format!(
                "{{\"s\":{{\"type\":\"uri\",\"value\":\"http://example.org/p{i}\"}},\
                 \"name\":{{\"type\":\"literal\",\"xml:lang\":\"en\",\"value\":\"Person {i}\"}}}}"
            )
        })
        .collect();
    format!(
        "{{\"head\":{{\"vars\":[\"s\",\"name\"]}},\"results\":{{\"bindings\":[{}]}}}}",
        bindings.join(",")
    )
}

fn turtle_graph(triples: usize) -> String {
    (0..triples)
        .map(|i| format!("<http://example.org/p{i}> <http://xmlns.com/foaf/0.1/name> \"Person {i}\" .\n"))
        .collect()
}

/// Parse then walk every row
fn bench_xml_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("xml_results");
    for size in [100, 1000, 10_000].iter() {
        let doc = xml_bindings(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| {
                let mut rs = XmlResultParser.parse_bytes(doc.as_bytes(), None).unwrap();
                while rs.next().unwrap() {
                    let _ = rs.get_long(3).unwrap();
                }
            });
        });
    }
    group.finish();
}

fn bench_json_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_results");
    for size in [100, 1000, 10_000].iter() {
        let doc = json_bindings(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| JsonResultParser.parse_bytes(doc.as_bytes(), None).unwrap());
        });
    }
    group.finish();
}

fn bench_turtle_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("turtle_graph");
    for size in [100, 1000, 10_000].iter() {
        let doc = turtle_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| GraphResultParser::n3().parse_bytes(doc.as_bytes(), None).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_xml_results, bench_json_results, bench_turtle_graph);
criterion_main!(benches);
