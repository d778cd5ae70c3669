use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bounce_core::{Bounds, CollisionPolicy, IntegrationMethod, Vec2, World};

/// Build a running world with `n` balls on a grid, slightly spaced so the
/// first frames are collision-heavy.
fn grid_world(n: usize) -> World {
    let mut world = World::new(Bounds::from_size(20.0, 12.0));
    world.set_gravity(Vec2::new(0.0, -10.0));
    world.set_sub_steps(8).unwrap();

    let cols = 8;
    for i in 0..n {
        let x = 1.0 + (i % cols) as f64 * 1.1;
        let y = 1.0 + (i / cols) as f64 * 1.1;
        let vx = if i % 2 == 0 { 2.0 } else { -2.0 };
        world
            .add_body(Vec2::new(x, y), Vec2::new(vx, 0.0), 0.5)
            .unwrap();
    }
    world.start();
    world
}

fn run_frames(world: &mut World, frames: usize) {
    let dt = 1.0 / 60.0;
    for _ in 0..frames {
        world.step(black_box(dt)).unwrap();
    }
}

fn bench_collision_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_policy");
    for n in [16, 48] {
        group.bench_function(format!("per_substep_{}", n), |b| {
            b.iter(|| {
                let mut world = grid_world(n);
                world.set_collision_policy(CollisionPolicy::PerSubstep);
                run_frames(&mut world, 30);
            })
        });
        group.bench_function(format!("post_all_substeps_{}", n), |b| {
            b.iter(|| {
                let mut world = grid_world(n);
                world.set_collision_policy(CollisionPolicy::PostAllSubsteps);
                run_frames(&mut world, 30);
            })
        });
    }
    group.finish();
}

fn bench_integrators(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrator");
    let methods = [
        ("euler", IntegrationMethod::Euler),
        ("semi_implicit", IntegrationMethod::SemiImplicitEuler),
        ("rk4", IntegrationMethod::Rk4),
        ("verlet", IntegrationMethod::Verlet),
    ];
    for (name, method) in methods {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut world = grid_world(32);
                world.set_integration_method(method);
                run_frames(&mut world, 30);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_collision_policies, bench_integrators);
criterion_main!(benches);
