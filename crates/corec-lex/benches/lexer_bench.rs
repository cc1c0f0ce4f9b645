use corec_lex::Lexer;
use corec_util::SourceFile;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SAMPLE: &str = r#"
program bench is
    procedure add(in a: integer; in b: integer; out result: integer) is
    begin
        result := a + b;
    end
    integer x;
    float y;
    string s;
begin
    x := 0;
    for (x < 1000)
        x := x + 1;
        y := 1.5 * x;
        s := "hello world";
    end
end
"#;

fn lex_sample(src: &str) {
    let source = SourceFile::from_string("bench.src".into(), src.to_string());
    let lexer = Lexer::new(&source);
    for token in lexer {
        black_box(token);
    }
}

fn bench_lexer(c: &mut Criterion) {
    c.bench_function("lex_sample_program", |b| b.iter(|| lex_sample(black_box(SAMPLE))));
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
