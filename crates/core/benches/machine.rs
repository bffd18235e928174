use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use enigma_sim_core::{Machine, MachineConfig};

fn bench_step_and_encode(c: &mut Criterion) {
    let mut machine = Machine::new(MachineConfig::default()).unwrap();

    c.bench_function("machine_step_and_encode", |b| {
        b.iter(|| black_box(machine.step_and_encode(black_box('Q'))))
    });
}

fn bench_encode_fixed_position(c: &mut Criterion) {
    let machine = Machine::new(MachineConfig::default()).unwrap();

    c.bench_function("machine_encode_no_step", |b| {
        let mut i = 0u8;
        b.iter(|| {
            i = (i + 1) % 26;
            black_box(machine.encode(black_box(i)))
        })
    });
}

fn bench_encrypt_text(c: &mut Criterion) {
    let text = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG. ".repeat(64);
    let mut group = c.benchmark_group("encrypt_text");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("pangram_x64", |b| {
        b.iter(|| {
            let mut machine = Machine::new(MachineConfig::default()).unwrap();
            black_box(machine.encrypt_text(black_box(&text)))
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_step_and_encode,
    bench_encode_fixed_position,
    bench_encrypt_text
);
criterion_main!(benches);
