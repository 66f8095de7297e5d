use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use simon_core::{
    EngineConfig, GameEngine, GuessOutcome, Leaderboard, ManualClock, MemoryStore, RandomColors,
};

/// Plays a perfect game up to `rounds`, waiting out every playback.
fn perfect_game(rounds: u32) -> u32 {
    let clock = ManualClock::new();
    let config = EngineConfig::default();
    let mut engine = GameEngine::new(
        config.clone(),
        MemoryStore::new(),
        RandomColors::new(0xC0FFEE),
        clock.clone(),
    );
    engine.set_player_name("bench");
    engine.start();

    for _ in 0..rounds {
        clock.advance(config.round_delay + config.playback_duration(engine.level()));
        engine.advance();
        let sequence = engine.sequence().to_vec();
        for color in sequence {
            if engine.submit_guess(color) == GuessOutcome::GameOver {
                return engine.level();
            }
        }
    }
    engine.level()
}

fn record_churn(players: usize) -> Leaderboard {
    let mut board = Leaderboard::new();
    for i in 0..players {
        let name = format!("player-{}", i % 17);
        board.record(&name, (i as u32 * 31) % 50 + 1);
    }
    board
}

fn bench_playback(c: &mut Criterion) {
    let mut group = c.benchmark_group("playback");
    group.measurement_time(Duration::from_secs(5));
    for rounds in [8, 32, 128] {
        group.bench_function(format!("perfect_game_{rounds}"), |b| {
            b.iter(|| perfect_game(black_box(rounds)))
        });
    }
    group.finish();
}

fn bench_leaderboard(c: &mut Criterion) {
    c.bench_function("leaderboard_record_1000", |b| {
        b.iter(|| record_churn(black_box(1000)))
    });
    c.bench_function("leaderboard_parse", |b| {
        let text = record_churn(1000).to_json().unwrap();
        b.iter(|| Leaderboard::from_json(black_box(&text)))
    });
}

criterion_group!(benches, bench_playback, bench_leaderboard);
criterion_main!(benches);
