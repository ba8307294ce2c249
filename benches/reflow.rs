//! Benchmarks for comment and docstring re-flow.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use docreflow::prelude::*;

fn long_comment(lines: usize) -> String {
    "    # lorem ipsum dolor sit amet consectetur adipiscing elit sed do\n".repeat(lines)
}

fn bench_reflow_comment(c: &mut Criterion) {
    let text = long_comment(200);
    c.bench_function("reflow_comment_200_lines", |b| {
        b.iter(|| {
            let mut buf = EditorBuffer::from_text(black_box(&text));
            buf.move_to(100, 6);
            run(&mut buf, Command::ReformatDocOrComment, &Options::default()).unwrap()
        })
    });
}

fn bench_structured_doc(c: &mut Criterion) {
    let mut text = String::from("def f(self, a, b=1, *args, c: int = 3, **kwargs):\n    \"\"\"\n    \n    \"\"\"\n");
    text.push_str(&"    if a:\n        raise ValueError(a)\n".repeat(50));
    c.bench_function("plan_structured_doc", |b| {
        b.iter(|| {
            let mut buf = EditorBuffer::from_text(black_box(&text));
            buf.move_to(2, 4);
            plan(&buf, Command::GenerateStructuredDoc, &Options::default()).unwrap()
        })
    });
}

criterion_group!(benches, bench_reflow_comment, bench_structured_doc);
criterion_main!(benches);
