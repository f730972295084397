//! Boundary round-trip benchmark: compile through the C ABI and release the
//! buffer, against the same compilation through the safe API.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tsz_capi::ffi::{TszBuffer, tsz_buffer_free, tsz_compile};
use tsz_capi::{CompileOptions, compile};

// =============================================================================
// Test Sources
// =============================================================================

const SIMPLE_SOURCE: &str = r#"
function add(a: number, b: number): number {
    return a + b;
}

const result = add(1, 2);
console.log(result);
"#;

const MEDIUM_SOURCE: &str = r#"
interface User {
    id: number;
    name: string;
    email?: string;
}

enum Role { Admin, Member, Guest }

class UserService {
    private users: User[] = [];

    constructor(private readonly role: Role) {}

    addUser(user: User): void {
        this.users.push(user);
    }

    getAllUsers(): User[] {
        return this.users;
    }
}

namespace Defaults {
    export const role = Role.Member;
}

const service = new UserService(Defaults.role);
service.addUser({ id: 1, name: "Alice" });
service.addUser({ id: 2, name: "Bob", email: "bob@example.com" });
"#;

fn generate_large_source(functions: usize) -> String {
    let mut source = String::new();
    for i in 0..functions {
        source.push_str(&format!(
            "export function f{i}(a: number, b: string): string {{\n    const c: number = a * {i};\n    return b + c;\n}}\n\n"
        ));
    }
    source
}

fn compile_c(source: &str) -> u32 {
    let mut module = TszBuffer::EMPTY;
    let mut diagnostic = TszBuffer::EMPTY;
    let filename = "bench.ts";
    unsafe {
        let status = tsz_compile(
            source.as_ptr(),
            source.len(),
            filename.as_ptr(),
            filename.len(),
            0,
            &mut module,
            &mut diagnostic,
        );
        tsz_buffer_free(&mut module);
        tsz_buffer_free(&mut diagnostic);
        status
    }
}

fn bench_boundary(c: &mut Criterion) {
    let large = generate_large_source(200);
    let sources = [
        ("simple", SIMPLE_SOURCE),
        ("medium", MEDIUM_SOURCE),
        ("large", large.as_str()),
    ];

    let mut group = c.benchmark_group("boundary");
    for (name, source) in sources {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("c_abi", name), source, |b, source| {
            b.iter(|| compile_c(black_box(source)))
        });
        group.bench_with_input(BenchmarkId::new("safe_api", name), source, |b, source| {
            let options = CompileOptions::default();
            b.iter(|| compile(black_box(source), "bench.ts", &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_boundary);
criterion_main!(benches);
