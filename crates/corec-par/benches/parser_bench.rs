use std::path::PathBuf;

use corec_util::SourceFile;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SAMPLE: &str = r#"
program bench_sample is
    global integer total;
    integer numbers[16];

    procedure sum_up(integer in n[16], integer in count, integer out result)
        integer i;
        integer acc;
    begin
        acc := 0;
        for (i := 0; i < count)
            acc := acc + n[i];
            i := i + 1;
        end for;
        result := acc;
        return;
    end procedure;

begin
    total := 0;
    if (total == 0) then
        total := total + 1;
    else
        total := total - 1;
    end if;
end program
"#;

fn bench_compile(c: &mut Criterion) {
    let source = SourceFile::from_string(PathBuf::from("bench_sample.src"), SAMPLE.to_string());
    c.bench_function("compile sample program", |b| {
        b.iter(|| {
            let output = corec_par::compile(black_box(&source), false);
            black_box(output.success)
        });
    });
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);
