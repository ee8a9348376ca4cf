use criterion::{black_box, criterion_group, criterion_main, Criterion};

use brainplay::{
    daily_seed, game_seed, GameConfig, GameId, GameSession, GameStatus, GameView, InputEvent,
    SeededRng,
};
use chrono::{TimeZone, Utc};

fn bench_rng_stream(c: &mut Criterion) {
    let mut rng = SeededRng::new(12345);

    c.bench_function("rng_next_1000", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(rng.next());
            }
        })
    });

    let deck: Vec<u32> = (0..36).collect();
    c.bench_function("rng_shuffle_36", |b| {
        b.iter(|| black_box(rng.shuffle(&deck)))
    });
}

fn bench_seed_derivation(c: &mut Criterion) {
    let when = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    c.bench_function("daily_seed", |b| b.iter(|| black_box(daily_seed(when))));

    c.bench_function("game_seed_all", |b| {
        b.iter(|| {
            for id in GameId::ALL {
                black_box(game_seed(id, when));
            }
        })
    });
}

fn bench_session_start(c: &mut Criterion) {
    for id in GameId::ALL {
        c.bench_function(&format!("start_{id}"), |b| {
            b.iter(|| {
                let mut session =
                    GameSession::new(GameConfig::new(id).with_seed(black_box(12345))).unwrap();
                session.init();
                session.start(0);
                black_box(session.state().level)
            })
        });
    }
}

fn bench_arithmetic_session(c: &mut Criterion) {
    c.bench_function("arithmetic_full_run", |b| {
        b.iter(|| {
            let mut session =
                GameSession::new(GameConfig::new(GameId::Arithmetic).with_seed(black_box(42)))
                    .unwrap();
            session.init();
            session.start(0);

            let mut now = 0;
            while session.state().status == GameStatus::Playing {
                now += 1_000;
                let answer = match session.view() {
                    GameView::Arithmetic(Some(problem)) => problem.answer(),
                    _ => break,
                };
                session.handle_input(&InputEvent::Answer(answer), now);
            }
            black_box(session.state().score)
        })
    });
}

criterion_group!(
    benches,
    bench_rng_stream,
    bench_seed_derivation,
    bench_session_start,
    bench_arithmetic_session
);
criterion_main!(benches);
