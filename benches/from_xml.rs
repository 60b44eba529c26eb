use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use fromxml::{from_xml, from_xml_with_config, Config, MixedContent};

const SIMPLE_XML: &str = "<root><child>text</child></root>";
const ATTR_XML: &str = "<root id=\"1\" name='test'><item value=\"42\" /></root>";
const DOC_XML: &str = concat!(
    "<?xml version=\"1.0\"?>\n",
    "<!DOCTYPE feed SYSTEM \"feed.dtd\">\n",
    "<!-- generated -->\n",
    "<feed lang=\"en\">\n",
    "  <title>Example &amp; Co</title>\n",
    "  <entry id=\"1\"><title>One</title><summary><![CDATA[<b>bold</b>]]></summary></entry>\n",
    "  <entry id=\"2\"><title>Two</title><summary>Second &lt;entry&gt;</summary></entry>\n",
    "  <entry id=\"3\" draft><title>Three</title><link href=/three/></entry>\n",
    "</feed>\n",
);

fn repeated_items(n: usize) -> String {
    let items: String = (0..n)
        .map(|i| format!("<item n=\"{i}\">value {i}</item>"))
        .collect();
    format!("<list>{items}</list>")
}

fn bench_simple(c: &mut Criterion) {
    c.bench_function("from_xml_simple", |b| {
        b.iter(|| from_xml(black_box(SIMPLE_XML)))
    });
}

fn bench_attr(c: &mut Criterion) {
    c.bench_function("from_xml_attr", |b| {
        b.iter(|| from_xml(black_box(ATTR_XML)))
    });
}

fn bench_document(c: &mut Criterion) {
    c.bench_function("from_xml_document", |b| {
        b.iter(|| from_xml(black_box(DOC_XML)))
    });
    let ordered = Config::default().with_mixed_content(MixedContent::Ordered);
    c.bench_function("from_xml_document_ordered", |b| {
        b.iter(|| from_xml_with_config(black_box(DOC_XML), ordered))
    });
}

fn bench_repeated(c: &mut Criterion) {
    let input = repeated_items(1_000);
    c.bench_function("from_xml_repeated_1000", |b| {
        b.iter(|| from_xml(black_box(&input)))
    });
}

criterion_group!(
    benches,
    bench_simple,
    bench_attr,
    bench_document,
    bench_repeated
);
criterion_main!(benches);
