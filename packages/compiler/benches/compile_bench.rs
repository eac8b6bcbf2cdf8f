use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sitecraft_compiler::{compile_site, CompileOptions, PageTree};
use sitecraft_editor::{Document, NodeOverrides, NodeType, ROOT_ID};

fn build_page(name: &str, sections: usize) -> PageTree {
    let mut doc = Document::new(name);
    for i in 0..sections {
        let section = doc
            .insert_child(ROOT_ID, NodeType::Section, NodeOverrides::default())
            .unwrap();
        doc.insert_child(
            &section,
            NodeType::Text,
            NodeOverrides::default().with_content(format!("Heading {}", i)),
        );
        let row = doc
            .insert_child(&section, NodeType::Row, NodeOverrides::default())
            .unwrap();
        for _ in 0..3 {
            doc.insert_child(&row, NodeType::Product, NodeOverrides::default());
        }
        doc.insert_child(
            &section,
            NodeType::Button,
            NodeOverrides::default().with_name("Buy Button"),
        );
    }
    PageTree::new(name, name, doc.into_tree())
}

fn compile_single_page(c: &mut Criterion) {
    let pages = vec![build_page("Home", 5)];
    let options = CompileOptions::default();

    c.bench_function("compile_single_page", |b| {
        b.iter(|| compile_site(black_box(&pages), &options))
    });
}

fn compile_multi_page_site(c: &mut Criterion) {
    let pages: Vec<_> = ["Home", "About", "Shop", "Contact"]
        .iter()
        .map(|name| build_page(name, 20))
        .collect();
    let options = CompileOptions::default();

    c.bench_function("compile_multi_page_site", |b| {
        b.iter(|| compile_site(black_box(&pages), &options))
    });
}

criterion_group!(benches, compile_single_page, compile_multi_page_site);
criterion_main!(benches);
